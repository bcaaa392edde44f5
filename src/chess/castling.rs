//! Castling eligibility and the joint king and rook relocation.
//!
//! A king standing on its home square may castle towards an unmoved rook of
//! the same color in the corner of its backrank if:
//!
//! 1. The king has never moved.
//! 2. The king is not in check.
//! 3. The rook has never moved.
//! 4. All squares between the king and the rook are empty.
//! 5. None of the squares the king passes through (including its destination)
//!    is attacked by the opponent.

use arrayvec::ArrayVec;
use strum::IntoEnumIterator;
use tracing::trace;

use crate::chess::attacks::is_attacked;
use crate::chess::board::Board;
use crate::chess::core::{File, PieceKind, Rank, Square};

/// The side of the board the king castles towards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::EnumIter)]
pub enum CastlingSide {
    /// Towards the h-file rook ("O-O").
    Kingside,
    /// Towards the a-file rook ("O-O-O").
    Queenside,
}

impl CastlingSide {
    /// Recognizes a castling king move: two files sideways along the rank.
    #[must_use]
    pub fn from_king_move(from: Square, to: Square) -> Option<Self> {
        if from.rank() != to.rank() {
            return None;
        }
        match to.file() as i8 - from.file() as i8 {
            2 => Some(Self::Kingside),
            -2 => Some(Self::Queenside),
            _ => None,
        }
    }

    const fn rook_file(self) -> File {
        match self {
            Self::Kingside => File::H,
            Self::Queenside => File::A,
        }
    }

    const fn king_destination_file(self) -> File {
        match self {
            Self::Kingside => File::G,
            Self::Queenside => File::C,
        }
    }

    const fn rook_destination_file(self) -> File {
        match self {
            Self::Kingside => File::F,
            Self::Queenside => File::D,
        }
    }

    /// Files strictly between the king and the rook.
    const fn empty_files(self) -> &'static [File] {
        match self {
            Self::Kingside => &[File::F, File::G],
            Self::Queenside => &[File::B, File::C, File::D],
        }
    }

    /// Files the king steps on, excluding its origin.
    const fn safe_files(self) -> &'static [File] {
        match self {
            Self::Kingside => &[File::F, File::G],
            Self::Queenside => &[File::D, File::C],
        }
    }

    /// Where the king lands when castling from the home square on `rank`.
    #[must_use]
    pub const fn king_destination(self, rank: Rank) -> Square {
        Square::new(self.king_destination_file(), rank)
    }

    /// Origin and destination of the rook.
    #[must_use]
    pub const fn rook_move(self, rank: Rank) -> (Square, Square) {
        (
            Square::new(self.rook_file(), rank),
            Square::new(self.rook_destination_file(), rank),
        )
    }
}

/// Checks all castling conditions for the king standing on `king` and the
/// given side.
#[must_use]
pub fn can_castle(board: &Board, king: Square, side: CastlingSide) -> bool {
    let Some(piece) = board.get(king) else {
        return false;
    };
    let rank = Rank::backrank(piece.owner);
    if piece.kind != PieceKind::King || piece.has_moved || king != Square::new(File::E, rank) {
        return false;
    }
    let opponent = piece.owner.opponent();
    if is_attacked(board, king, opponent) {
        trace!(%king, ?side, "king is in check");
        return false;
    }
    let (rook_square, _) = side.rook_move(rank);
    let rook_ready = board.get(rook_square).is_some_and(|rook| {
        rook.kind == PieceKind::Rook && rook.owner == piece.owner && !rook.has_moved
    });
    if !rook_ready {
        trace!(%king, ?side, "no unmoved rook in the corner");
        return false;
    }
    if side
        .empty_files()
        .iter()
        .any(|&file| board.get(Square::new(file, rank)).is_some())
    {
        trace!(%king, ?side, "path between king and rook is blocked");
        return false;
    }
    if side
        .safe_files()
        .iter()
        .any(|&file| is_attacked(board, Square::new(file, rank), opponent))
    {
        trace!(%king, ?side, "king would pass through an attacked square");
        return false;
    }
    true
}

/// Castling destinations of the king on `king`: g1/c1 for White, g8/c8 for
/// Black, kingside first.
#[must_use]
pub fn castling_destinations(board: &Board, king: Square) -> ArrayVec<Square, 2> {
    CastlingSide::iter()
        .filter(|&side| can_castle(board, king, side))
        .map(|side| side.king_destination(king.rank()))
        .collect()
}

/// Relocates the king and the matching rook in one step, flagging both as
/// moved. The caller must have validated the move with [`can_castle`].
pub(crate) fn castle(board: &mut Board, king: Square, side: CastlingSide) {
    let rank = king.rank();
    let (rook_from, rook_to) = side.rook_move(rank);
    let _ = board.relocate(king, side.king_destination(rank));
    let _ = board.relocate(rook_from, rook_to);
}
