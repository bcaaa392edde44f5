//! Geometric move generation: squares a piece can reach by its movement
//! pattern alone, without checking whether the move leaves its own king in
//! check. That is the job of [`crate::chess::legality`].
//!
//! The rules are a closed set of pure functions dispatched on [`PieceKind`]:
//!
//! - Sliding pieces ([`PieceKind::Rook`], [`PieceKind::Bishop`] and
//!   [`PieceKind::Queen`]) walk each of their rays until the board edge or the
//!   first occupied square, which is included only if it holds an opponent
//!   piece (capture).
//! - [`PieceKind::Knight`] and [`PieceKind::King`] jump to fixed offsets that
//!   are either empty or hold an opponent piece. Castling is handled by
//!   [`crate::chess::castling`].
//! - [`PieceKind::Pawn`] pushes forward onto empty squares (two squares from
//!   its starting rank if it has never moved) and captures diagonally only when
//!   an opponent piece is there. There is no en passant and no promotion.

use arrayvec::ArrayVec;
use strum::IntoEnumIterator;

use crate::chess::board::Board;
use crate::chess::core::{Direction, Piece, PieceKind, Player, Rank, Square};

/// The most squares a single piece can reach: a queen in the middle of an
/// empty board.
pub const MAX_TARGETS: usize = 27;

/// Destinations of a single piece.
pub type Targets = ArrayVec<Square, MAX_TARGETS>;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// Produces the squares the piece on `from` can reach geometrically. Returns
/// no targets for an empty square.
#[must_use]
pub fn geometric_moves(board: &Board, from: Square) -> Targets {
    let mut targets = Targets::new();
    let Some(piece) = board.get(from) else {
        return targets;
    };
    match piece.kind {
        PieceKind::Rook => slide(board, from, piece.owner, &Direction::ORTHOGONAL, &mut targets),
        PieceKind::Bishop => slide(board, from, piece.owner, &Direction::DIAGONAL, &mut targets),
        PieceKind::Queen => {
            slide(board, from, piece.owner, &Direction::ORTHOGONAL, &mut targets);
            slide(board, from, piece.owner, &Direction::DIAGONAL, &mut targets);
        },
        PieceKind::Knight => {
            let jumps = KNIGHT_OFFSETS
                .iter()
                .filter_map(|&(files, ranks)| from.offset(files, ranks));
            step(board, piece.owner, jumps, &mut targets);
        },
        PieceKind::King => {
            let steps = Direction::iter().filter_map(|direction| from.shift(direction));
            step(board, piece.owner, steps, &mut targets);
        },
        PieceKind::Pawn => pawn_moves(board, from, piece, &mut targets),
    }
    targets
}

/// Squares diagonally in front of a pawn of the given color, regardless of
/// what stands on them.
pub(crate) fn pawn_captures(from: Square, owner: Player) -> impl Iterator<Item = Square> {
    let forward = owner.push_direction();
    [-1, 1]
        .into_iter()
        .filter_map(move |files| from.offset(files, forward))
}

fn is_opponent(board: &Board, square: Square, owner: Player) -> bool {
    board.get(square).is_some_and(|piece| piece.owner != owner)
}

fn slide(
    board: &Board,
    from: Square,
    owner: Player,
    directions: &[Direction],
    targets: &mut Targets,
) {
    for &direction in directions {
        let mut current = from;
        while let Some(next) = current.shift(direction) {
            match board.get(next) {
                None => targets.push(next),
                Some(blocker) => {
                    if blocker.owner != owner {
                        targets.push(next);
                    }
                    break;
                },
            }
            current = next;
        }
    }
}

fn step(
    board: &Board,
    owner: Player,
    candidates: impl Iterator<Item = Square>,
    targets: &mut Targets,
) {
    for to in candidates {
        if board.get(to).map_or(true, |piece| piece.owner != owner) {
            targets.push(to);
        }
    }
}

fn pawn_moves(board: &Board, from: Square, pawn: Piece, targets: &mut Targets) {
    let forward = pawn.owner.push_direction();
    if let Some(push) = from.offset(0, forward) {
        if board.get(push).is_none() {
            targets.push(push);
            if !pawn.has_moved && from.rank() == Rank::pawns_starting(pawn.owner) {
                if let Some(double_push) = push.offset(0, forward) {
                    if board.get(double_push).is_none() {
                        targets.push(double_push);
                    }
                }
            }
        }
    }
    for capture in pawn_captures(from, pawn.owner) {
        if is_opponent(board, capture, pawn.owner) {
            targets.push(capture);
        }
    }
}
