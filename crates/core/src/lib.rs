//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules of the ancient bowling variant: 15 pins per
//! frame, up to 3 throws per frame and 5 frames per player. It has no
//! dependency on terminals, sockets or storage, so the same engine drives the
//! console game and the network adapter.
//!
//! # Module Structure
//!
//! - [`frame`]: throw recording, strike/spare detection, pin availability and completion
//! - [`player`]: frame advancement, last-frame bonus continuation, score aggregation
//! - [`game`]: player registration, start/throw preconditions, turn rotation, scoreboard
//! - [`scoring`]: cumulative score with strike/spare look-ahead bonuses
//! - [`snapshot`]: owned read-only views for presentation layers
//! - [`error`]: the [`BowlingError`] taxonomy
//!
//! # Game Rules
//!
//! - **Strike**: all 15 pins with the first throw; adds the next 3 throws.
//! - **Spare**: all 15 pins over 2 or 3 throws; adds the next 2 throws.
//! - **Last frame**: a strike earns 3 bonus throws and a spare 2, taken in the
//!   same frame. Pins are reset after every strike and after every throw that
//!   clears the remaining pins.
//!
//! # Example
//!
//! ```
//! use ancient_bowling_core::Game;
//!
//! let mut game = Game::new();
//! game.add_player("Ann").unwrap();
//! game.add_player("Bob").unwrap();
//! game.start().unwrap();
//!
//! game.add_throw(15).unwrap(); // Ann strikes, turn passes
//! assert_eq!(game.current_player().unwrap().name(), "Bob");
//! game.add_throw(7).unwrap();
//! assert_eq!(game.remaining_pins(), Some(8));
//! ```

pub mod error;
pub mod frame;
pub mod game;
pub mod player;
pub mod scoring;
pub mod snapshot;

pub use ancient_bowling_types as types;

// Re-export commonly used types for convenience
pub use error::{pins_from_raw, BowlingError, Result};
pub use frame::{Frame, FrameState};
pub use game::{Game, ScoreEntry};
pub use player::{Player, ThrowOutcome};
pub use scoring::{calculate_score, cumulative_scores, frame_score, lookahead_bonus};
pub use snapshot::{FrameSnapshot, GameSnapshot, PlayerSnapshot};
