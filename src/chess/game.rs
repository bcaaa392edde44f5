//! Game state and the operations a collaborator (UI, protocol loop, web
//! handler) calls to play a game: querying legal moves, selecting pieces,
//! making moves.
//!
//! [`GameState`] is a plain value owned by the caller and passed to every
//! operation. Rejected operations never fail hard: they return a
//! [`RuleViolation`] and leave the state untouched except for the message,
//! which describes the violation.

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::chess::board::Board;
use crate::chess::castling::{self, CastlingSide};
use crate::chess::core::{Piece, PieceKind, Player, Square};
use crate::chess::legality::{self, LegalMoves};

/// Recoverable violations of the game rules. The [`fmt::Display`] text is the
/// message shown to the player.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    /// The selected square is empty, holds an opponent piece or a piece that
    /// can not move.
    #[error("Invalid selection or not your piece. Try again.")]
    InvalidSelection,
    /// The origin of a move is empty or holds an opponent piece.
    #[error("Error: Invalid selection or not your piece.")]
    NotYourPiece {
        #[allow(missing_docs)]
        square: Square,
    },
    /// The destination is not among the freshly computed legal moves of the
    /// piece (this includes moving onto its own square).
    #[error(
        "Error: Invalid move for {} from {from} to {to}. (King Safety Check Failed)",
        .piece.figurine()
    )]
    IllegalMove {
        #[allow(missing_docs)]
        piece: Piece,
        #[allow(missing_docs)]
        from: Square,
        #[allow(missing_docs)]
        to: Square,
    },
    /// A move or cancellation was requested without a selected piece.
    #[error("No piece selected. Select a piece first.")]
    NoActiveSelection,
    /// File or rank outside of the board.
    #[error("Error: {0}")]
    OutOfRange(String),
}

/// A single accepted move, as stored in the history.
///
/// The text form is `"<color>: <from> to <to>"` for regular moves and
/// `"<color>: Castled <from> to <to>"` for castling:
///
/// ```
/// use caissa::chess::game::MoveRecord;
///
/// let record: MoveRecord = "white: Castled e1 to g1".parse().unwrap();
/// assert!(record.castle);
/// assert_eq!(record.to_string(), "white: Castled e1 to g1");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MoveRecord {
    /// The side that made the move.
    pub player: Player,
    /// King's origin for castling.
    pub from: Square,
    /// King's destination for castling.
    pub to: Square,
    #[allow(missing_docs)]
    pub castle: bool,
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.player)?;
        if self.castle {
            f.write_str("Castled ")?;
        }
        write!(f, "{} to {}", self.from, self.to)
    }
}

impl TryFrom<&str> for MoveRecord {
    type Error = anyhow::Error;

    fn try_from(record: &str) -> anyhow::Result<Self> {
        let Some((player, movement)) = record.split_once(": ") else {
            bail!("move record should start with \"<color>: \", got {record}");
        };
        // Only the spelled-out color names that `Display` writes.
        let player = match player {
            "white" => Player::White,
            "black" => Player::Black,
            _ => bail!("move record color should be 'white' or 'black', got '{player}'"),
        };
        let (castle, movement) = match movement.strip_prefix("Castled ") {
            Some(movement) => (true, movement),
            None => (false, movement),
        };
        let Some((from, to)) = movement.split_once(" to ") else {
            bail!("move record should contain \"<from> to <to>\", got {record}");
        };
        Ok(Self {
            player,
            from: from.try_into()?,
            to: to.try_into()?,
            castle,
        })
    }
}

impl TryFrom<String> for MoveRecord {
    type Error = anyhow::Error;

    fn try_from(record: String) -> anyhow::Result<Self> {
        Self::try_from(record.as_str())
    }
}

impl FromStr for MoveRecord {
    type Err = anyhow::Error;

    fn from_str(record: &str) -> anyhow::Result<Self> {
        Self::try_from(record)
    }
}

impl From<MoveRecord> for String {
    fn from(record: MoveRecord) -> Self {
        record.to_string()
    }
}

/// Complete state of a game: the board, the side to move, the last message for
/// the player and the append-only history of accepted moves.
///
/// There is no terminal state: checkmate, stalemate and draws are not
/// detected and the turn keeps alternating.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    turn: Player,
    message: String,
    history: Vec<MoveRecord>,
}

impl GameState {
    /// Starts a new game from the standard position, White to move.
    ///
    /// ```
    /// use caissa::chess::core::Player;
    /// use caissa::chess::game::GameState;
    ///
    /// let game = GameState::new();
    /// assert_eq!(game.turn(), Player::White);
    /// assert_eq!(game.message(), "White to move. Select a piece.");
    /// assert!(game.history().is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::from_board(Board::starting(), Player::White)
    }

    /// Starts a game from an arbitrary position.
    #[must_use]
    pub fn from_board(board: Board, turn: Player) -> Self {
        Self {
            board,
            turn,
            message: format!("{} to move. Select a piece.", turn.title()),
            history: Vec::new(),
        }
    }

    /// Discards everything and starts over from the standard position.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::new();
        info!("game reset");
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    #[must_use]
    pub const fn turn(&self) -> Player {
        self.turn
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Accepted moves, oldest first.
    #[must_use]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Legal moves of the piece on `square`. Returns `None` if the square is
    /// empty or the piece belongs to the side not to move.
    #[must_use]
    pub fn legal_moves(&self, square: Square) -> Option<LegalMoves> {
        match self.board.get(square) {
            Some(piece) if piece.owner == self.turn => legality::legal_moves(&self.board, square),
            _ => None,
        }
    }

    /// Selects the piece on `square` if it belongs to the side to move and has
    /// at least one legal move.
    ///
    /// # Errors
    ///
    /// [`RuleViolation::InvalidSelection`] otherwise.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn select_piece(&mut self, square: Square) -> Result<LegalMoves, RuleViolation> {
        match self.legal_moves(square) {
            Some(moves) if !moves.is_empty() => {
                debug!(moves = moves.len(), "piece selected");
                self.message = format!(
                    "Selected {square}. Now choose a destination (one of the highlighted squares)."
                );
                Ok(moves)
            },
            _ => Err(self.reject(RuleViolation::InvalidSelection)),
        }
    }

    /// Moves the piece on `from` to `to`. Legal moves are recomputed from
    /// scratch, so a stale selection can not sneak in an illegal move. A king
    /// moving two files castles and brings the rook along.
    ///
    /// On success the move is appended to the history and the turn passes to
    /// the opponent.
    ///
    /// # Errors
    ///
    /// - [`RuleViolation::NotYourPiece`] if `from` does not hold a piece of the
    ///   side to move.
    /// - [`RuleViolation::IllegalMove`] if `to` is not a legal destination.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn attempt_move(&mut self, from: Square, to: Square) -> Result<MoveRecord, RuleViolation> {
        let piece = match self.board.get(from) {
            Some(piece) if piece.owner == self.turn => piece,
            _ => return Err(self.reject(RuleViolation::NotYourPiece { square: from })),
        };
        let legal = self
            .legal_moves(from)
            .is_some_and(|moves| moves.contains(to));
        if !legal || from == to {
            return Err(self.reject(RuleViolation::IllegalMove { piece, from, to }));
        }
        let castle = match (piece.kind, CastlingSide::from_king_move(from, to)) {
            (PieceKind::King, Some(side)) => {
                castling::castle(&mut self.board, from, side);
                true
            },
            _ => {
                let _ = self.board.relocate(from, to);
                false
            },
        };
        let record = MoveRecord {
            player: self.turn,
            from,
            to,
            castle,
        };
        self.history.push(record);
        self.turn = self.turn.opponent();
        self.message = if castle {
            format!("{} to move. Last move: Castling.", self.turn.title())
        } else {
            format!("{} to move. Last move: {from} to {to}.", self.turn.title())
        };
        info!(%record, "move accepted");
        Ok(record)
    }

    /// Acknowledges that the player dropped their selection. The game itself
    /// does not track selections, so this only updates the message.
    #[instrument(skip(self))]
    pub fn cancel_selection(&mut self) -> &str {
        self.message = format!("{} to move. Selection cancelled.", self.turn.title());
        &self.message
    }

    /// Parses a square token such as "e2".
    ///
    /// # Errors
    ///
    /// [`RuleViolation::OutOfRange`] if the token does not name a square.
    pub fn parse_square(&mut self, token: &str) -> Result<Square, RuleViolation> {
        Square::try_from(token).map_err(|e| self.reject(RuleViolation::OutOfRange(e.to_string())))
    }

    /// Validates zero-based file and rank indices.
    ///
    /// # Errors
    ///
    /// [`RuleViolation::OutOfRange`] if either is outside of the board.
    pub fn square_at(&mut self, file: u8, rank: u8) -> Result<Square, RuleViolation> {
        Square::from_coordinates(file, rank)
            .map_err(|e| self.reject(RuleViolation::OutOfRange(e.to_string())))
    }

    /// Reports the violation to the player and hands it back to the caller.
    pub(crate) fn reject(&mut self, violation: RuleViolation) -> RuleViolation {
        match violation {
            RuleViolation::OutOfRange(_) => warn!(%violation, "rejected"),
            _ => debug!(%violation, "rejected"),
        }
        self.message = violation.to_string();
        violation
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
