//! Chess rules engine: owns the board, generates and validates moves, handles
//! castling and alternates turns. For more information, see [README].
//!
//! The entry points are [`chess::game::GameState`], which exposes the engine
//! operations on a plain state value, and [`chess::session::Session`], which
//! adds the select-then-move state machine on top of it. [`Engine`] drives a
//! session through a line-oriented text protocol.
//!
//! [README]: https://github.com/kirillbobyrev/caissa/blob/main/README.md

pub mod chess;

mod engine;
pub use engine::{Engine, EngineConfig};
use shadow_rs::shadow;

shadow!(build);

/// Returns the full engine version that can be used to identify how it was
/// built in the first place.
#[must_use]
pub fn engine_version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}

/// Prints informations about the engine version and GitHub repository on
/// startup. Goes to stderr to keep stdout for the protocol.
pub fn print_engine_info() {
    eprintln!("Caissa chess rules engine {}", engine_version());
    eprintln!("<https://github.com/kirillbobyrev/caissa>");
}
