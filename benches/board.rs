//! Benchmarks for the board engine hot paths.
//!
//! Flood fill and feature encoding dominate replay cost on large corpora.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use go_replay::{BoardState, Color, GameRecord, GameReplayer, MoveRecord, Point};

/// A 19x19 board holding one long black snake group plus scattered white
/// stones, worst-ish case for group traversal.
fn snake_board() -> BoardState {
    let mut board = BoardState::new(19).unwrap();
    let mut black = Vec::new();
    for y in (1..=19).step_by(2) {
        for x in 1..=19 {
            black.push((x, y));
        }
        if y + 1 <= 19 {
            black.push((if (y / 2) % 2 == 0 { 19 } else { 1 }, y + 1));
        }
    }
    board.apply_setup(Color::Black, &black);
    board
}

fn bench_flood_fill(c: &mut Criterion) {
    let board = snake_board();
    c.bench_function("group_and_liberties_snake_19x19", |b| {
        b.iter(|| {
            let (group, liberties) = board.group_and_liberties(black_box(Point::new(0, 0)));
            black_box((group.len(), liberties))
        })
    });
}

fn bench_feature_encode(c: &mut Criterion) {
    let board = snake_board();
    c.bench_function("feature_planes_19x19", |b| {
        b.iter(|| black_box(board.feature_planes(black_box(Color::Black))))
    });
}

fn bench_replay_game(c: &mut Criterion) {
    // A capture-free 150-move game on 19x19: alternating colors in separate
    // board halves.
    let mut moves = Vec::new();
    for i in 0..75 {
        moves.push(MoveRecord::Play {
            color: Color::Black,
            x: (i % 19) as i32,
            y: (i / 19) as i32,
        });
        moves.push(MoveRecord::Play {
            color: Color::White,
            x: (i % 19) as i32,
            y: (18 - i / 19) as i32,
        });
    }
    let record = GameRecord::from_moves(moves);

    c.bench_function("replay_150_move_game_19x19", |b| {
        b.iter(|| {
            let replayer = GameReplayer::new(black_box(record.clone()), 19).unwrap();
            black_box(replayer.count())
        })
    });
}

criterion_group!(
    benches,
    bench_flood_fill,
    bench_feature_encode,
    bench_replay_game
);
criterion_main!(benches);
