//! Error taxonomy for the rules engine.

use thiserror::Error;

use crate::types::ErrorCategory;

/// Every way a frame, player or game can reject an operation.
///
/// Errors are raised before any state is touched, so a rejected call leaves
/// the game exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BowlingError {
    /// Pin count outside `0..=15`.
    #[error("invalid number of pins: {0} (must be between 0 and 15)")]
    InvalidPinCount(i64),

    /// Pin count is legal on its own but more pins than are standing.
    #[error("cannot knock down {pins} pins, only {remaining} standing")]
    ExceedsRemainingPins { pins: u8, remaining: u8 },

    #[error("frame is finished, cannot add more throws")]
    FrameFinished,

    #[error("game is complete, cannot add more throws")]
    GameComplete,

    #[error("game has already started")]
    AlreadyStarted,

    #[error("game has not started")]
    NotStarted,

    #[error("need at least {required} players to start the game, have {actual}")]
    InsufficientPlayers { required: usize, actual: usize },

    #[error("invalid player: {0}")]
    InvalidPlayer(String),
}

impl BowlingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BowlingError::InvalidPinCount(_)
            | BowlingError::ExceedsRemainingPins { .. }
            | BowlingError::InvalidPlayer(_) => ErrorCategory::BadInput,
            BowlingError::FrameFinished
            | BowlingError::GameComplete
            | BowlingError::AlreadyStarted
            | BowlingError::NotStarted
            | BowlingError::InsufficientPlayers { .. } => ErrorCategory::IllegalState,
        }
    }

    /// Stable snake_case identifier used on the wire.
    pub fn code(&self) -> &'static str {
        match self {
            BowlingError::InvalidPinCount(_) => "invalid_pin_count",
            BowlingError::ExceedsRemainingPins { .. } => "exceeds_remaining_pins",
            BowlingError::FrameFinished => "frame_finished",
            BowlingError::GameComplete => "game_complete",
            BowlingError::AlreadyStarted => "already_started",
            BowlingError::NotStarted => "not_started",
            BowlingError::InsufficientPlayers { .. } => "insufficient_players",
            BowlingError::InvalidPlayer(_) => "invalid_player",
        }
    }
}

pub type Result<T> = std::result::Result<T, BowlingError>;

/// Validate a raw pin count coming from an untyped source (console, wire).
pub fn pins_from_raw(raw: i64) -> Result<u8> {
    match u8::try_from(raw) {
        Ok(pins) if pins <= crate::types::MAX_PINS => Ok(pins),
        _ => Err(BowlingError::InvalidPinCount(raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pins_from_raw_bounds() {
        assert_eq!(pins_from_raw(0), Ok(0));
        assert_eq!(pins_from_raw(15), Ok(15));
        assert_eq!(pins_from_raw(-1), Err(BowlingError::InvalidPinCount(-1)));
        assert_eq!(pins_from_raw(16), Err(BowlingError::InvalidPinCount(16)));
        assert_eq!(pins_from_raw(300), Err(BowlingError::InvalidPinCount(300)));
    }

    #[test]
    fn categories_split_input_from_state() {
        assert_eq!(
            BowlingError::InvalidPinCount(20).category(),
            ErrorCategory::BadInput
        );
        assert_eq!(
            BowlingError::ExceedsRemainingPins { pins: 9, remaining: 5 }.category(),
            ErrorCategory::BadInput
        );
        assert_eq!(BowlingError::NotStarted.category(), ErrorCategory::IllegalState);
        assert_eq!(BowlingError::GameComplete.code(), "game_complete");
    }

    #[test]
    fn messages_mention_the_bound() {
        let err = BowlingError::ExceedsRemainingPins { pins: 9, remaining: 5 };
        assert_eq!(err.to_string(), "cannot knock down 9 pins, only 5 standing");
    }
}
