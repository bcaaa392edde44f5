//! Criterion benchmarks measure time of legal move computation: a full board
//! copy and attack scan for every candidate of every piece.

use caissa::chess::board::Board;
use caissa::chess::core::{Player, Square};
use caissa::chess::game::GameState;
use caissa::chess::legality::legal_moves;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

const POSITIONS: [&str; 5] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1",
    "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1",
];

fn all_legal_moves(boards: &[Board]) {
    for board in boards {
        for (square, _) in board.pieces() {
            std::hint::black_box(legal_moves(board, square));
        }
    }
}

fn legal_moves_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("Legal moves");
    let boards: Vec<Board> = POSITIONS
        .iter()
        .map(|placement| Board::from_placement(placement).unwrap())
        .collect();
    group.throughput(criterion::Throughput::Elements(boards.len() as u64));
    group.bench_with_input(
        BenchmarkId::new("all pieces", format!("{} positions", boards.len())),
        &boards,
        |b, boards| {
            b.iter(|| all_legal_moves(boards));
        },
    );
    group.finish();
}

// Selecting the king triggers castling checks on top of the simulation.
fn select_king_bench(c: &mut Criterion) {
    let board = Board::from_placement("r3k2r/8/8/8/8/8/8/R3K2R").unwrap();
    let _ = c.bench_function("select king with castling", |b| {
        b.iter(|| {
            let mut game = GameState::from_board(board, Player::White);
            std::hint::black_box(game.select_piece(Square::E1))
        });
    });
}

criterion_group! {
    name = legal_moves_group;
    config = Criterion::default().sample_size(100);
    targets = legal_moves_bench, select_king_bench
}

criterion_main!(legal_moves_group);
