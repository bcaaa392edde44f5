//! Attack detection: whether any piece of a given color attacks a square.
//!
//! Attacks are found by scanning every attacker piece and checking whether the
//! square is among its attacked squares. For all kinds except pawns those are
//! the geometric moves; pawns attack both squares diagonally in front of them
//! regardless of occupancy, so a pawn guards an empty square it could not move
//! to.

use crate::chess::board::Board;
use crate::chess::core::{Piece, PieceKind, Player, Square};
use crate::chess::movegen::{geometric_moves, pawn_captures};

/// Returns true if any piece of the `attacker` color attacks `square`. The
/// result does not depend on whose turn it is and is unaffected by a king
/// standing on the square itself.
///
/// ```
/// use caissa::chess::attacks::is_attacked;
/// use caissa::chess::board::Board;
/// use caissa::chess::core::{Player, Square};
///
/// let board = Board::starting();
/// assert!(is_attacked(&board, Square::F3, Player::White));
/// assert!(!is_attacked(&board, Square::E4, Player::White));
/// assert!(is_attacked(&board, Square::F6, Player::Black));
/// ```
#[must_use]
pub fn is_attacked(board: &Board, square: Square, attacker: Player) -> bool {
    board
        .player_pieces(attacker)
        .any(|(from, piece)| hits(board, from, piece, square))
}

/// Returns true if the king of `player` is attacked by the opponent. A board
/// without that king is never in check.
#[must_use]
pub fn in_check(board: &Board, player: Player) -> bool {
    board
        .find_king(player)
        .is_some_and(|king| is_attacked(board, king, player.opponent()))
}

fn hits(board: &Board, from: Square, piece: Piece, square: Square) -> bool {
    match piece.kind {
        PieceKind::Pawn => pawn_captures(from, piece.owner).any(|target| target == square),
        _ => geometric_moves(board, from).contains(&square),
    }
}
