//! Terminal front end.
//!
//! A small console layer over the rules engine: a scripted-friendly prompt
//! loop and a plain-text scorecard. Nothing here decides rules; every throw
//! goes through `core` and its errors are shown back to the player.

pub mod console;
pub mod scorecard;

pub use ancient_bowling_core as core;
pub use ancient_bowling_types as types;

pub use console::ConsoleGame;
pub use scorecard::{render_scorecard, throw_marks};
