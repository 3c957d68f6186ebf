use criterion::{black_box, criterion_group, criterion_main, Criterion};
use falling_blocks::core::{Board, Engine, GameSnapshot, GameState, RotationRules};
use falling_blocks::types::{CellState, GameAction, PieceKind, RotationDirection, ShiftDirection};

fn started(seed: u32) -> GameState {
    let mut state = GameState::new(22, 10, seed, RotationRules::default());
    state.start();
    state
}

fn bench_tick(c: &mut Criterion) {
    let mut state = started(12345);

    c.bench_function("game_tick", |b| {
        b.iter(|| {
            if state.game_over() {
                state.apply_action(GameAction::Restart);
            }
            black_box(state.tick());
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let mut board = Board::new(22, 10);
    for row in 18..22 {
        for col in 0..10 {
            board.set(row, col, CellState::Locked);
        }
    }

    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut engine = Engine::from_board(board.clone(), RotationRules::default());
            black_box(engine.resolve_lines());
        })
    });
}

fn bench_piece_spawn(c: &mut Criterion) {
    c.bench_function("spawn_piece", |b| {
        let mut engine = Engine::new(22, 10);
        b.iter(|| {
            engine.reset();
            black_box(engine.spawn(black_box(PieceKind::T))).ok();
        })
    });
}

fn bench_shift(c: &mut Criterion) {
    let mut engine = Engine::new(22, 10);
    let _ = engine.spawn(PieceKind::T);
    let mut direction = ShiftDirection::Left;

    c.bench_function("shift", |b| {
        b.iter(|| {
            if engine.shift(direction).is_err() {
                direction = direction.mirrored();
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut engine = Engine::new(22, 10);
    let _ = engine.spawn(PieceKind::L);
    for _ in 0..4 {
        let _ = engine.descend();
    }

    c.bench_function("rotate", |b| {
        b.iter(|| {
            black_box(engine.rotate(RotationDirection::Clockwise)).ok();
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut state = started(7);
    state.apply_action(GameAction::SoftDrop);
    let mut snap = GameSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            black_box(&snap);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_piece_spawn,
    bench_shift,
    bench_rotate,
    bench_snapshot
);
criterion_main!(benches);
