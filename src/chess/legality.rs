//! Legality filter: keeps only the candidate moves that do not leave the
//! mover's own king attacked.
//!
//! Each candidate is played on a copy of the board and the mover's king is
//! checked for attacks afterwards. Castling candidates have already passed
//! [`crate::chess::castling::can_castle`], which guarantees the king's safety,
//! and are accepted as is.

use itertools::Itertools;
use serde::Serialize;
use tracing::trace;

use crate::chess::attacks::is_attacked;
use crate::chess::board::Board;
use crate::chess::castling::{castling_destinations, CastlingSide};
use crate::chess::core::{PieceKind, Square};
use crate::chess::movegen::geometric_moves;

/// Legal destinations of a single piece.
///
/// The origin square is kept apart from the destinations, which never contain
/// it. Use [`LegalMoves::with_null_move`] to get the list that also offers
/// "moving" onto the origin, which is what a selection UI would highlight to
/// allow cancelling by clicking the selected piece again.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LegalMoves {
    origin: Square,
    destinations: Vec<Square>,
}

impl LegalMoves {
    /// The square of the piece these moves belong to.
    #[must_use]
    pub const fn origin(&self) -> Square {
        self.origin
    }

    /// Legal destinations in generation order: geometric moves first, then
    /// castling.
    #[must_use]
    pub fn destinations(&self) -> &[Square] {
        &self.destinations
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn contains(&self, square: Square) -> bool {
        self.destinations.contains(&square)
    }

    /// Returns true if the piece can not move at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    /// Destinations prefixed with the origin square.
    #[must_use]
    pub fn with_null_move(&self) -> Vec<Square> {
        std::iter::once(self.origin)
            .chain(self.destinations.iter().copied())
            .collect()
    }
}

/// Computes legal moves of the piece on `from`, regardless of whose turn it
/// is. Returns `None` for an empty square.
///
/// King safety is only checked when the mover has a king on the board: on a
/// custom position without one every geometric move is legal, so that single
/// pieces can be studied in isolation.
///
/// ```
/// use caissa::chess::board::Board;
/// use caissa::chess::core::Square;
/// use caissa::chess::legality::legal_moves;
///
/// let moves = legal_moves(&Board::starting(), Square::E2).unwrap();
/// assert_eq!(moves.destinations(), &[Square::E3, Square::E4]);
/// assert_eq!(moves.with_null_move(), vec![Square::E2, Square::E3, Square::E4]);
/// ```
#[must_use]
pub fn legal_moves(board: &Board, from: Square) -> Option<LegalMoves> {
    let piece = board.get(from)?;
    let mut candidates = geometric_moves(board, from).to_vec();
    if piece.kind == PieceKind::King {
        candidates.extend(castling_destinations(board, from));
    }
    let destinations = candidates
        .into_iter()
        .unique()
        .filter(|&to| is_safe(board, from, to))
        .collect();
    Some(LegalMoves {
        origin: from,
        destinations,
    })
}

/// Returns true if moving the piece on `from` to `to` does not leave its king
/// attacked. Boards without the mover's king accept every move.
fn is_safe(board: &Board, from: Square, to: Square) -> bool {
    let Some(piece) = board.get(from) else {
        return false;
    };
    if piece.kind == PieceKind::King && CastlingSide::from_king_move(from, to).is_some() {
        trace!(%from, %to, "castling candidate accepted");
        return true;
    }
    let mut simulation = *board;
    let _ = simulation.relocate(from, to);
    let safe = simulation
        .find_king(piece.owner)
        .map_or(true, |king| !is_attacked(&simulation, king, piece.owner.opponent()));
    trace!(%from, %to, safe, "simulated candidate");
    safe
}
