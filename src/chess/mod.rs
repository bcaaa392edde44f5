//! Implementation of chess rules: board, move generation, legality, castling
//! and turn-taking.

pub mod attacks;
pub mod board;
pub mod castling;
pub mod core;
pub mod game;
pub mod legality;
pub mod movegen;
pub mod session;
