//! Square-centric board representation: a fixed array of 64 cells, each either
//! empty or holding a [`Piece`].
//!
//! The board is deliberately dumb: it knows nothing about turns or legality
//! and only provides placement primitives. It is [`Copy`], so cloning it for
//! a hypothetical move simulation produces a fully independent board.

use std::fmt::{self, Write};

use anyhow::bail;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::chess::core::{File, Piece, PieceKind, Player, Rank, Square, BOARD_SIZE, BOARD_WIDTH};

/// Rank-major grid used as the persisted shape of the board: `grid[0]` is rank
/// 1, `grid[0][0]` is a1.
pub type Grid = [[Option<Piece>; BOARD_WIDTH as usize]; BOARD_WIDTH as usize];

/// Mapping from each of the 64 squares to an optional piece. At most one piece
/// occupies a square by construction.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Grid", from = "Grid")]
pub struct Board {
    cells: [Option<Piece>; BOARD_SIZE as usize],
}

impl Board {
    /// Creates the starting position of the standard chess variant.
    ///
    /// ```
    /// use caissa::chess::board::Board;
    ///
    /// assert_eq!(
    ///     Board::starting().to_string(),
    ///     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
    /// );
    /// ```
    #[must_use]
    pub fn starting() -> Self {
        const BACKRANK: [PieceKind; BOARD_WIDTH as usize] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut board = Self::empty();
        for player in [Player::White, Player::Black] {
            for (file, kind) in File::iter().zip(BACKRANK) {
                board.set(
                    Square::new(file, Rank::backrank(player)),
                    Some(Piece::new(player, kind)),
                );
                board.set(
                    Square::new(file, Rank::pawns_starting(player)),
                    Some(Piece::new(player, PieceKind::Pawn)),
                );
            }
        }
        board
    }

    /// Creates a board without any pieces.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            cells: [None; BOARD_SIZE as usize],
        }
    }

    /// Parses the Piece Placement part of [Forsyth-Edwards Notation]: ranks from
    /// 8 to 1 separated by '/', digits for runs of empty squares. All parsed
    /// pieces are unmoved.
    ///
    /// # Errors
    ///
    /// If the input does not describe exactly 8 ranks of exactly 8 squares or
    /// contains unknown symbols.
    ///
    /// [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
    pub fn from_placement(placement: &str) -> anyhow::Result<Self> {
        let mut result = Self::empty();
        let mut rank_id = BOARD_WIDTH;
        for rank_fen in placement.split('/') {
            if rank_id == 0 {
                bail!("incorrect placement: expected 8 ranks, got {placement}");
            }
            rank_id -= 1;
            let rank = Rank::try_from(rank_id)?;
            let mut file: u8 = 0;
            for symbol in rank_fen.chars() {
                if file >= BOARD_WIDTH {
                    bail!("incorrect placement: rank {rank_fen} exceeds {BOARD_WIDTH} squares");
                }
                match symbol {
                    '0' => bail!("increment can not be 0"),
                    '1'..='8' => {
                        file += symbol as u8 - b'0';
                        continue;
                    },
                    _ => (),
                }
                let piece = Piece::try_from(symbol)?;
                result.set(Square::new(File::try_from(file)?, rank), Some(piece));
                file += 1;
            }
            if file != BOARD_WIDTH {
                bail!(
                    "incorrect placement: rank size should be exactly {BOARD_WIDTH}, got \
                     {rank_fen} of length {file}"
                );
            }
        }
        if rank_id != 0 {
            bail!("incorrect placement: there should be 8 ranks, got {placement}");
        }
        Ok(result)
    }

    /// Returns the piece standing on the square, if any.
    #[must_use]
    pub const fn get(&self, square: Square) -> Option<Piece> {
        self.cells[square.index()]
    }

    /// Places the piece on the square (or clears it with `None`), replacing
    /// whatever was there.
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.cells[square.index()] = piece;
    }

    /// Relocates the piece from `from` to `to`, capturing anything on `to` and
    /// flagging the piece as moved. Returns the moved piece.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        let piece = self.get(from)?.moved();
        self.set(from, None);
        self.set(to, Some(piece));
        Some(piece)
    }

    /// Finds the king of the given player. Positions without a king are
    /// tolerated and yield `None`.
    #[must_use]
    pub fn find_king(&self, player: Player) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| piece.owner == player && piece.kind == PieceKind::King)
            .map(|(square, _)| square)
    }

    /// Iterates over occupied squares from a1 to h8.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|square| self.get(square).map(|piece| (square, piece)))
    }

    /// Iterates over the squares occupied by the given player.
    pub fn player_pieces(&self, player: Player) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.owner == player)
    }

    /// Dumps the board diagram using Unicode figurines.
    #[must_use]
    pub fn figurines(&self) -> String {
        self.diagram(Piece::figurine)
    }

    fn diagram(&self, symbol: impl Fn(Piece) -> char) -> String {
        let mut result = String::new();
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                result.push(self.get(Square::new(file, rank)).map_or('.', &symbol));
                if file != File::H {
                    result.push_str(SQUARE_SEPARATOR);
                }
            }
            if rank != Rank::One {
                result.push_str(LINE_SEPARATOR);
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting()
    }
}

impl From<Board> for Grid {
    fn from(board: Board) -> Self {
        let mut grid: Self = [[None; BOARD_WIDTH as usize]; BOARD_WIDTH as usize];
        for square in Square::iter() {
            grid[square.rank() as usize][square.file() as usize] = board.get(square);
        }
        grid
    }
}

impl From<Grid> for Board {
    fn from(grid: Grid) -> Self {
        let mut board = Self::empty();
        for square in Square::iter() {
            board.set(square, grid[square.rank() as usize][square.file() as usize]);
        }
        board
    }
}

impl fmt::Display for Board {
    /// Prints board representation in FEN piece placement format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            let mut empty_squares = 0i32;
            for file in File::iter() {
                if let Some(piece) = self.get(Square::new(file, rank)) {
                    if empty_squares != 0 {
                        write!(f, "{empty_squares}")?;
                        empty_squares = 0;
                    }
                    write!(f, "{piece}")?;
                } else {
                    empty_squares += 1;
                }
            }
            if empty_squares != 0 {
                write!(f, "{empty_squares}")?;
            }
            if rank != Rank::One {
                const RANK_SEPARATOR: char = '/';
                f.write_char(RANK_SEPARATOR)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    /// Dumps the board in a simple format ('.' for empty square, FEN algebraic
    /// symbol for piece) a-la Stockfish "debug" command in UCI mode.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.diagram(Piece::symbol))
    }
}

const LINE_SEPARATOR: &str = "\n";
const SQUARE_SEPARATOR: &str = " ";

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn starting_board() {
        let starting_board = Board::starting();
        assert_eq!(
            format!("{starting_board:?}"),
            "r n b q k b n r\n\
             p p p p p p p p\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             P P P P P P P P\n\
             R N B Q K B N R"
        );
        assert_eq!(starting_board.pieces().count(), 32);
        assert_eq!(starting_board.player_pieces(Player::White).count(), 16);
        assert!(starting_board.pieces().all(|(_, piece)| !piece.has_moved));
        assert_eq!(starting_board.find_king(Player::White), Some(Square::E1));
        assert_eq!(starting_board.find_king(Player::Black), Some(Square::E8));
        assert_eq!(
            starting_board.get(Square::D1),
            Some(Piece::new(Player::White, PieceKind::Queen))
        );
        assert_eq!(
            starting_board.get(Square::G8),
            Some(Piece::new(Player::Black, PieceKind::Knight))
        );
        assert_eq!(starting_board.get(Square::E4), None);
    }

    #[test]
    fn figurines() {
        let board = Board::from_placement("4k3/8/8/8/8/8/4P3/4K3").unwrap();
        assert_eq!(
            board.figurines(),
            ". . . . ♚ . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . ♙ . . .\n\
             . . . . ♔ . . ."
        );
    }

    #[test]
    fn placement() {
        for placement in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
            "r3k2r/8/8/8/8/8/6N1/4K3",
            "8/8/8/8/8/8/8/8",
            "2r3r1/p3k3/1p3pp1/1B5p/5P2/2P1p1P1/PP4KP/3R4",
        ] {
            assert_eq!(Board::from_placement(placement).unwrap().to_string(), placement);
        }
        assert_eq!(
            Board::from_placement("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").unwrap(),
            Board::starting()
        );
    }

    #[test]
    fn incorrect_placement() {
        assert!(Board::from_placement("").is_err());
        assert!(Board::from_placement("8/8/8/8/8/8/8").is_err());
        assert!(Board::from_placement("8/8/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_placement("9/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_placement("08/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_placement("ppppppppp/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_placement("7/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_placement("7x/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_placement("44p/8/8/8/8/8/8/8").is_err());
    }

    #[test]
    fn set_and_get() {
        let mut board = Board::empty();
        let rook = Piece::new(Player::Black, PieceKind::Rook);
        board.set(Square::C5, Some(rook));
        assert_eq!(board.get(Square::C5), Some(rook));
        board.set(Square::C5, None);
        assert_eq!(board.get(Square::C5), None);
        assert_eq!(board.find_king(Player::White), None);
    }

    #[test]
    fn copies_are_independent() {
        let original = Board::starting();
        let mut simulation = original;
        let _ = simulation.relocate(Square::E2, Square::E4);
        assert_eq!(simulation.get(Square::E2), None);
        assert!(simulation.get(Square::E4).unwrap().has_moved);
        assert_eq!(original.get(Square::E4), None);
        assert!(!original.get(Square::E2).unwrap().has_moved);
    }

    #[test]
    fn relocation_captures() {
        let mut board = Board::from_placement("4k3/8/8/3p4/4P3/8/8/4K3").unwrap();
        let pawn = board.relocate(Square::E4, Square::D5).unwrap();
        assert_eq!(pawn.owner, Player::White);
        assert_eq!(board.get(Square::D5), Some(pawn));
        assert_eq!(board.player_pieces(Player::Black).count(), 1);
        assert_eq!(board.relocate(Square::A1, Square::A2), None);
    }

    #[test]
    fn grid_shape() {
        let grid = Grid::from(Board::starting());
        assert_eq!(grid[0][4], Some(Piece::new(Player::White, PieceKind::King)));
        assert_eq!(grid[7][3], Some(Piece::new(Player::Black, PieceKind::Queen)));
        assert_eq!(grid[3][3], None);
        assert_eq!(Board::from(grid), Board::starting());
    }
}
