//! Serial listener runtime.
//!
//! Runs the decode loop on its own schedule, next to the sync game loop. The
//! only thing the two share is the [`PendingPieceSlot`]: the loop overwrites
//! it whenever a token completes, the game reads it when it spawns.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use tokio::runtime::Runtime;
use tokio::sync::watch;

use crate::core::PendingPieceSlot;
use crate::decoder::{Step, Token, TokenDecoder};
use crate::source::{is_no_data, ByteSource};

/// Extra time given to the worker on shutdown, on top of one read timeout
const SHUTDOWN_GRACE: Duration = Duration::from_millis(100);

/// Counters shared between the worker and whoever displays them.
#[derive(Debug, Default)]
pub struct DecoderStats {
    tokens: AtomicU64,
    desyncs: AtomicU64,
    faults: AtomicU64,
}

/// Point-in-time copy of [`DecoderStats`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecoderCounts {
    /// Tokens decoded and published
    pub tokens: u64,
    /// Partial tokens thrown away because of a noise byte
    pub desyncs: u64,
    /// Read errors swallowed
    pub faults: u64,
}

impl DecoderStats {
    pub fn counts(&self) -> DecoderCounts {
        DecoderCounts {
            tokens: self.tokens.load(Ordering::Relaxed),
            desyncs: self.desyncs.load(Ordering::Relaxed),
            faults: self.faults.load(Ordering::Relaxed),
        }
    }
}

/// Reads bytes from a source, decodes tokens and publishes pieces.
pub struct DecodeLoop<S> {
    source: S,
    decoder: TokenDecoder,
    slot: PendingPieceSlot,
    stats: Arc<DecoderStats>,
    read_timeout: Duration,
    fault_streak: u32,
}

impl<S: ByteSource> DecodeLoop<S> {
    pub fn new(source: S, slot: PendingPieceSlot, read_timeout: Duration) -> Self {
        Self {
            source,
            decoder: TokenDecoder::new(),
            slot,
            stats: Arc::new(DecoderStats::default()),
            read_timeout,
            fault_streak: 0,
        }
    }

    pub fn stats(&self) -> Arc<DecoderStats> {
        Arc::clone(&self.stats)
    }

    /// Read at most one byte and act on it. Never fails.
    ///
    /// Read errors are counted, logged and backed off for one read timeout;
    /// the partial token survives them.
    pub fn poll_once(&mut self) -> Option<Token> {
        let byte = match self.source.read_byte(self.read_timeout) {
            Ok(Some(byte)) => byte,
            Ok(None) => return None,
            Err(e) if is_no_data(&e) => return None,
            Err(e) => {
                self.fault_streak += 1;
                self.stats.faults.fetch_add(1, Ordering::Relaxed);
                if self.fault_streak == 1 {
                    warn!("serial read failed, retrying: {e}");
                } else {
                    debug!("serial read failed ({} in a row): {e}", self.fault_streak);
                }
                thread::sleep(self.read_timeout);
                return None;
            }
        };
        self.fault_streak = 0;

        match self.decoder.push(byte) {
            Step::Token(token) => {
                self.slot.store(token.kind);
                self.stats.tokens.fetch_add(1, Ordering::Relaxed);
                debug!("token {:04X} -> {}", token.value, token.kind.as_str());
                Some(token)
            }
            Step::Desync { dropped } if dropped > 0 => {
                self.stats.desyncs.fetch_add(1, Ordering::Relaxed);
                None
            }
            _ => None,
        }
    }

    /// Poll until `shutdown` turns true, then close the source.
    pub fn run(mut self, shutdown: watch::Receiver<bool>) {
        while !*shutdown.borrow() {
            self.poll_once();
        }
        self.source.close();
        info!("serial listener stopped");
    }
}

/// Running listener instance.
///
/// Dropping it (or calling [`shutdown`](Self::shutdown)) signals the worker
/// and waits up to one read timeout for it to finish.
pub struct SerialListener {
    rt: Option<Runtime>,
    shutdown_tx: watch::Sender<bool>,
    stats: Arc<DecoderStats>,
    grace: Duration,
}

impl SerialListener {
    /// Start decoding `source` into `slot` on a background worker.
    pub fn spawn<S>(source: S, slot: PendingPieceSlot, read_timeout: Duration) -> Result<Self>
    where
        S: ByteSource + 'static,
    {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("serial-listener")
            .enable_time()
            .build()
            .context("create serial listener runtime")?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let decode = DecodeLoop::new(source, slot, read_timeout);
        let stats = decode.stats();

        rt.spawn_blocking(move || decode.run(shutdown_rx));
        info!("serial listener started");

        Ok(Self {
            rt: Some(rt),
            shutdown_tx,
            stats,
            grace: read_timeout + SHUTDOWN_GRACE,
        })
    }

    pub fn counts(&self) -> DecoderCounts {
        self.stats.counts()
    }

    /// Stop the worker and release the source.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(rt) = self.rt.take() {
            rt.shutdown_timeout(self.grace);
        }
    }
}

impl Drop for SerialListener {
    fn drop(&mut self) {
        self.stop();
    }
}
