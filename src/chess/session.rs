//! Turn-taking state machine on top of [`GameState`]: a player first selects
//! one of their pieces and then picks its destination.
//!
//! ```
//! use caissa::chess::core::{Player, Square};
//! use caissa::chess::session::{Phase, Session};
//!
//! let mut session = Session::new();
//! let selection = session.select(Square::E2).unwrap();
//! assert_eq!(selection.destinations(), &[Square::E3, Square::E4]);
//! let record = session.move_to(Square::E4).unwrap();
//! assert_eq!(record.to_string(), "white: e2 to e4");
//! assert_eq!(session.phase(), &Phase::AwaitingSelection);
//! assert_eq!(session.state().turn(), Player::Black);
//! ```

use tracing::{debug, instrument};

use crate::chess::core::Square;
use crate::chess::game::{GameState, MoveRecord, RuleViolation};
use crate::chess::legality::LegalMoves;

/// A selected piece together with its legal destinations at the time of
/// selection. The destinations are a cache for display: moves are always
/// re-validated against the current board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    moves: LegalMoves,
}

impl Selection {
    /// Square of the selected piece.
    #[must_use]
    pub const fn square(&self) -> Square {
        self.moves.origin()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn destinations(&self) -> &[Square] {
        self.moves.destinations()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn moves(&self) -> &LegalMoves {
        &self.moves
    }
}

/// Where the player is within their turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Nothing is selected. Initial phase and the phase after every move.
    AwaitingSelection,
    /// A piece of the side to move is selected.
    PieceSelected(Selection),
}

/// A game together with the selection phase of the side to move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    state: GameState,
    phase: Phase,
}

impl Session {
    /// Starts a new game, White to move.
    #[must_use]
    pub fn new() -> Self {
        Self::from_state(GameState::new())
    }

    /// Continues a game from the given state with nothing selected.
    #[must_use]
    pub const fn from_state(state: GameState) -> Self {
        Self {
            state,
            phase: Phase::AwaitingSelection,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Parses a square token, recording a bad token in the game message. The
    /// phase is not affected.
    ///
    /// # Errors
    ///
    /// [`RuleViolation::OutOfRange`] for anything but a valid square token.
    pub fn parse_square(&mut self, token: &str) -> Result<Square, RuleViolation> {
        self.state.parse_square(token)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The current selection, if any.
    #[must_use]
    pub const fn selection(&self) -> Option<&Selection> {
        match &self.phase {
            Phase::PieceSelected(selection) => Some(selection),
            Phase::AwaitingSelection => None,
        }
    }

    /// Selects the piece on `square`, replacing any previous selection.
    ///
    /// # Errors
    ///
    /// [`RuleViolation::InvalidSelection`] if the square does not hold a piece
    /// of the side to move with at least one legal move. A previous selection
    /// is dropped in that case.
    #[instrument(skip(self))]
    pub fn select(&mut self, square: Square) -> Result<Selection, RuleViolation> {
        match self.state.select_piece(square) {
            Ok(moves) => {
                let selection = Selection { moves };
                self.phase = Phase::PieceSelected(selection.clone());
                Ok(selection)
            },
            Err(violation) => {
                self.phase = Phase::AwaitingSelection;
                Err(violation)
            },
        }
    }

    /// Moves the selected piece to `to`.
    ///
    /// # Errors
    ///
    /// - [`RuleViolation::NoActiveSelection`] if nothing is selected.
    /// - Any violation of [`GameState::attempt_move`]. The selection is kept so
    ///   that the player can pick another destination.
    #[instrument(skip(self))]
    pub fn move_to(&mut self, to: Square) -> Result<MoveRecord, RuleViolation> {
        let Some(from) = self.selection().map(Selection::square) else {
            return Err(self.state.reject(RuleViolation::NoActiveSelection));
        };
        let record = self.state.attempt_move(from, to)?;
        self.phase = Phase::AwaitingSelection;
        Ok(record)
    }

    /// Drops the selection.
    ///
    /// # Errors
    ///
    /// [`RuleViolation::NoActiveSelection`] if nothing is selected. Neither the
    /// phase nor the message change in that case.
    #[instrument(skip(self))]
    pub fn cancel(&mut self) -> Result<&str, RuleViolation> {
        if self.selection().is_none() {
            debug!("nothing to cancel");
            return Err(RuleViolation::NoActiveSelection);
        }
        self.phase = Phase::AwaitingSelection;
        Ok(self.state.cancel_selection())
    }

    /// Starts over from the standard position with nothing selected.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.state.reset();
        self.phase = Phase::AwaitingSelection;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
