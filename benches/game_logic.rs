use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use fpga_tetris::core::{GameState, Grid, PendingPieceSlot};
use fpga_tetris::serial::TokenDecoder;
use fpga_tetris::types::{GameConfig, PieceKind};

fn started() -> GameState {
    let slot = PendingPieceSlot::with_initial(PieceKind::T);
    let mut state = GameState::new(GameConfig::default(), slot);
    state.start();
    state
}

fn bench_tick(c: &mut Criterion) {
    let mut state = started();

    c.bench_function("game_tick_33ms", |b| {
        b.iter(|| {
            if !state.running() || state.game_over() {
                state.restart();
            }
            state.tick(black_box(33));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut grid = Grid::new(10, 20);
            for row in 16..20 {
                for col in 0..10 {
                    grid.set(col, row, Some(PieceKind::I));
                }
            }
            grid.clear_full_lines()
        })
    });
}

fn bench_piece_spawn(c: &mut Criterion) {
    let mut state = started();

    c.bench_function("spawn_piece", |b| {
        b.iter(|| {
            state.spawn_piece();
        })
    });
}

fn bench_try_move(c: &mut Criterion) {
    let mut state = started();

    c.bench_function("try_move", |b| {
        b.iter(|| {
            if !state.try_move(1, 0) {
                state.spawn_piece();
            }
        })
    });
}

fn bench_try_rotate(c: &mut Criterion) {
    let mut state = started();

    c.bench_function("try_rotate", |b| {
        b.iter(|| {
            state.try_rotate();
        })
    });
}

fn bench_decoder(c: &mut Criterion) {
    let stream: Vec<u8> = (0u16..1024)
        .flat_map(|v| format!("{v:04X}\r\n").into_bytes())
        .collect();

    let mut group = c.benchmark_group("decoder");
    group.throughput(Throughput::Bytes(stream.len() as u64));
    group.bench_function("push_all_6kb", |b| {
        b.iter(|| {
            let mut decoder = TokenDecoder::new();
            decoder.push_all(black_box(&stream))
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_piece_spawn,
    bench_try_move,
    bench_try_rotate,
    bench_decoder
);
criterion_main!(benches);
