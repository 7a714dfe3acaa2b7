//! Engine benchmarks: move generation, move application, whole games.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use royal_ur::core::{Color, GameState, Move};
use royal_ur::rules::Rules;
use royal_ur::selfplay::{SelfPlayConfig, SelfPlayRunner};

fn midgame() -> GameState {
    GameState::new()
        .with_positions(Color::Light, &[14, 12, 9, 5, 2, 0])
        .with_positions(Color::Dark, &[14, 10, 6, 4, 1])
}

fn bench_legal_moves(c: &mut Criterion) {
    let rules = Rules::traditional();
    let state = midgame();

    c.bench_function("legal_moves_midgame", |b| {
        b.iter(|| {
            for roll in 0..=4 {
                black_box(rules.legal_moves(black_box(&state), roll));
            }
        })
    });
}

fn bench_apply_move(c: &mut Criterion) {
    let rules = Rules::traditional();
    let state = midgame();
    let capture = Move::new(Color::Light, 5, 6);

    c.bench_function("apply_move_capture", |b| {
        b.iter(|| black_box(rules.apply_move(black_box(&state), &capture)))
    });
}

fn bench_selfplay(c: &mut Criterion) {
    let runner = SelfPlayRunner::new(Rules::traditional(), SelfPlayConfig::default());
    let mut seed = 0u64;

    c.bench_function("selfplay_game_priority", |b| {
        b.iter(|| {
            seed = seed.wrapping_add(1);
            black_box(runner.play_game(seed))
        })
    });
}

criterion_group!(benches, bench_legal_moves, bench_apply_move, bench_selfplay);
criterion_main!(benches);
