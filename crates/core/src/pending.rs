//! The "next piece" slot shared between the serial decoder and the game loop.
//!
//! Only the latest value matters: the decoder overwrites it whenever a token
//! completes and the game loop reads it once per spawn. A stale read just
//! reuses the previous piece, so a single atomic byte is enough.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::types::PieceKind;

/// Latest-value-wins slot holding the most recently decoded piece.
///
/// Clones share the same slot. Starts out as the first alphabet entry (`I`).
#[derive(Debug, Clone, Default)]
pub struct PendingPieceSlot {
    inner: Arc<AtomicU8>,
}

impl PendingPieceSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot holding `kind`
    pub fn with_initial(kind: PieceKind) -> Self {
        let slot = Self::new();
        slot.store(kind);
        slot
    }

    /// Publish a newly decoded piece
    pub fn store(&self, kind: PieceKind) {
        self.inner.store(kind.index() as u8, Ordering::Release);
    }

    /// Read the current piece
    pub fn load(&self) -> PieceKind {
        PieceKind::from_index(self.inner.load(Ordering::Acquire) as usize)
    }
}
