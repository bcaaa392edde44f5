//! The engine puts all pieces together: it owns a [`Session`] and drives it
//! through a simple line-oriented text protocol, which makes it usable from a
//! terminal, a test harness or a thin UI frontend.
//!
//! [`Engine::command_loop`] is the "main loop" of the engine which reads
//! commands from the input stream and writes responses to the output stream.

use std::io::{BufRead, Write};

use itertools::Itertools;
use tracing::{debug, info};

use crate::chess::core::Square;
use crate::chess::session::Session;

/// Output options of the protocol loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Print the serialized game state after every game command.
    pub json: bool,
    /// Draw the board with Unicode figurines instead of FEN letters.
    pub figurines: bool,
}

/// Protocol frontend of a single game.
#[derive(Debug, Default)]
pub struct Engine {
    session: Session,
    config: EngineConfig,
}

impl Engine {
    /// Creates an engine with a new game.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            session: Session::new(),
            config,
        }
    }

    /// The game being played.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Continuously reads the input stream and executes commands until "quit"
    /// is sent or the input ends.
    ///
    /// Supported commands:
    ///
    /// - `select <square>`: select a piece of the side to move
    /// - `move <square>`: move the selected piece
    /// - `cancel`: drop the selection
    /// - `moves <square>`: legal destinations of a piece of the side to move
    /// - `board`: draw the board
    /// - `history`: accepted moves, oldest first
    /// - `turn`: the side to move
    /// - `state`: the game state as JSON
    /// - `reset`: start a new game
    /// - `version`: engine version
    /// - `quit`
    ///
    /// Every game command answers with the resulting message for the player.
    ///
    /// # Errors
    ///
    /// Only I/O and serialization failures are errors. Rule violations and
    /// malformed commands are reported to the output and the loop goes on.
    pub fn command_loop(
        &mut self,
        input: &mut impl BufRead,
        output: &mut impl Write,
    ) -> anyhow::Result<()> {
        let mut line = String::new();
        loop {
            line.clear();
            // EOF reached.
            if input.read_line(&mut line)? == 0 {
                break;
            }
            let tokens: Vec<&str> = line.split_whitespace().collect();
            debug!(?tokens, "received command");

            match tokens.first() {
                Some(&"select") => {
                    if let Some(square) = self.square_argument(&tokens, output)? {
                        // The message describes the outcome either way.
                        drop(self.session.select(square));
                        writeln!(output, "{}", self.session.state().message())?;
                    }
                    self.print_state(output)?;
                },
                Some(&"move") => {
                    if let Some(square) = self.square_argument(&tokens, output)? {
                        drop(self.session.move_to(square));
                        writeln!(output, "{}", self.session.state().message())?;
                    }
                    self.print_state(output)?;
                },
                Some(&"cancel") => {
                    match self.session.cancel() {
                        Ok(message) => writeln!(output, "{message}")?,
                        Err(violation) => writeln!(output, "{violation}")?,
                    }
                    self.print_state(output)?;
                },
                Some(&"reset") => {
                    self.session.reset();
                    writeln!(output, "{}", self.session.state().message())?;
                    self.print_state(output)?;
                },
                Some(&"moves") => {
                    if let Some(square) = self.square_argument(&tokens, output)? {
                        match self.session.state().legal_moves(square) {
                            Some(moves) if !moves.is_empty() => writeln!(
                                output,
                                "{}",
                                moves.destinations().iter().join(" ")
                            )?,
                            _ => writeln!(output, "none")?,
                        }
                    }
                },
                Some(&"board") => {
                    let board = self.session.state().board();
                    if self.config.figurines {
                        writeln!(output, "{}", board.figurines())?;
                    } else {
                        writeln!(output, "{board:?}")?;
                    }
                },
                Some(&"history") => {
                    let history = self.session.state().history();
                    if history.is_empty() {
                        writeln!(output, "none")?;
                    } else {
                        writeln!(output, "{}", history.iter().join("; "))?;
                    }
                },
                Some(&"turn") => {
                    writeln!(output, "{}", self.session.state().turn())?;
                },
                Some(&"state") => {
                    writeln!(output, "{}", serde_json::to_string(self.session.state())?)?;
                },
                Some(&"version") => {
                    writeln!(output, "{} {}", env!("CARGO_PKG_NAME"), crate::engine_version())?;
                },
                Some(&"quit") => {
                    info!("quit");
                    break;
                },
                Some(&command) => {
                    writeln!(output, "info string Unsupported command: {command}")?;
                },
                None => {},
            }
        }
        Ok(())
    }

    /// Parses the single square argument of a command. Problems are reported
    /// to the output and yield `None`.
    fn square_argument(
        &mut self,
        tokens: &[&str],
        output: &mut impl Write,
    ) -> anyhow::Result<Option<Square>> {
        let Some(token) = tokens.get(1) else {
            writeln!(output, "info string Missing square for {}", tokens[0])?;
            return Ok(None);
        };
        match self.session.parse_square(token) {
            Ok(square) => Ok(Some(square)),
            Err(violation) => {
                writeln!(output, "{violation}")?;
                Ok(None)
            },
        }
    }

    fn print_state(&self, output: &mut impl Write) -> anyhow::Result<()> {
        if self.config.json {
            writeln!(output, "{}", serde_json::to_string(self.session.state())?)?;
        }
        Ok(())
    }
}
