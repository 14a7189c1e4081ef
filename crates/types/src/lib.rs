//! Core types module - shared constants and small enums
//!
//! This crate defines the fundamental values used throughout the workspace.
//! Everything here is plain data with no external dependencies, so it can be
//! shared by the rules engine, the console front end and the JSON adapter.
//!
//! # Game Dimensions
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MAX_PINS` | 15 | Pins standing at the start of every frame |
//! | `MAX_THROWS` | 3 | Normal throws per frame |
//! | `MAX_FRAMES` | 5 | Frames per player |
//! | `MIN_PLAYERS` | 2 | Players required to start a game |
//! | `STRIKE_BONUS_THROWS` | 3 | Throws counted as bonus after a strike |
//! | `SPARE_BONUS_THROWS` | 2 | Throws counted as bonus after a spare |
//!
//! # Examples
//!
//! ```
//! use ancient_bowling_types::{BonusKind, FrameMark, MAX_FRAMES, MAX_PINS};
//!
//! assert_eq!(MAX_PINS, 15);
//! assert_eq!(MAX_FRAMES, 5);
//!
//! assert_eq!(FrameMark::from_str("STRIKE"), Some(FrameMark::Strike));
//! assert_eq!(FrameMark::Spare.symbol(), "/");
//! assert_eq!(BonusKind::Strike.owed(), 3);
//! ```

/// Pins standing at the start of a frame (and after every pin reset)
pub const MAX_PINS: u8 = 15;

/// Normal throws allowed in a frame
pub const MAX_THROWS: usize = 3;

/// Frames per player
pub const MAX_FRAMES: usize = 5;

/// Players required before a game can start
pub const MIN_PLAYERS: usize = 2;

/// Look-ahead throws added to a strike
pub const STRIKE_BONUS_THROWS: usize = 3;

/// Look-ahead throws added to a spare
pub const SPARE_BONUS_THROWS: usize = 2;

/// Upper bound on throws recorded in the last frame.
///
/// A spare completed on the third throw earns two bonus throws (3 + 2).
pub const MAX_LAST_FRAME_THROWS: usize = MAX_THROWS + SPARE_BONUS_THROWS;

/// Largest player count offered by the console game
pub const MAX_CONSOLE_PLAYERS: usize = 10;

/// Outcome of a frame as shown on a scorecard
///
/// - **Open**: pins were left standing after the normal throws
/// - **Spare**: all pins felled over two or three throws
/// - **Strike**: all pins felled by the first throw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameMark {
    Open,
    Spare,
    Strike,
}

impl FrameMark {
    /// Parse a mark from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use ancient_bowling_types::FrameMark;
    ///
    /// assert_eq!(FrameMark::from_str("open"), Some(FrameMark::Open));
    /// assert_eq!(FrameMark::from_str("Spare"), Some(FrameMark::Spare));
    /// assert_eq!(FrameMark::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "open" => Some(FrameMark::Open),
            "spare" => Some(FrameMark::Spare),
            "strike" => Some(FrameMark::Strike),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameMark::Open => "open",
            FrameMark::Spare => "spare",
            FrameMark::Strike => "strike",
        }
    }

    /// Scorecard symbol for the mark
    pub fn symbol(&self) -> &'static str {
        match self {
            FrameMark::Open => "",
            FrameMark::Spare => "/",
            FrameMark::Strike => "X",
        }
    }
}

/// Why the last frame is owed extra throws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BonusKind {
    Strike,
    Spare,
}

impl BonusKind {
    /// Number of bonus throws awarded
    pub fn owed(&self) -> u8 {
        match self {
            BonusKind::Strike => STRIKE_BONUS_THROWS as u8,
            BonusKind::Spare => SPARE_BONUS_THROWS as u8,
        }
    }
}

/// Coarse classification of a rejected operation
///
/// Presentation layers use this to tell bad input (re-prompt the user) apart
/// from illegal state transitions (a caller bug or stale view).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    BadInput,
    IllegalState,
    NotFound,
}
