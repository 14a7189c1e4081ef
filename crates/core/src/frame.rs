//! Frame module - one scoring slot of up to three throws
//!
//! A regular frame ends on a strike, once all 15 pins are down, or after the
//! third throw. The last frame additionally collects bonus throws after a
//! strike (3) or a spare (2); those throws are recorded in the frame itself.
//!
//! Strike and spare are always derived from the throw list. The only stored
//! progress is [`FrameState`], which moves forward once per accepted throw.

use arrayvec::ArrayVec;
use tracing::{debug, trace};

use crate::error::{BowlingError, Result};
use crate::types::{BonusKind, FrameMark, MAX_LAST_FRAME_THROWS, MAX_PINS, MAX_THROWS};

/// Progress of a frame through its throws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameState {
    /// Normal throws still being taken.
    Open,
    /// Last frame only: a strike or spare has been made and bonus throws are owed.
    AwaitingBonus { kind: BonusKind, owed: u8 },
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    throws: ArrayVec<u8, MAX_LAST_FRAME_THROWS>,
    last_frame: bool,
    state: FrameState,
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame {
    /// Create an empty regular frame
    pub fn new() -> Self {
        Self::with_last_frame(false)
    }

    /// Create an empty last frame (bonus throws are taken in this frame)
    pub fn new_last() -> Self {
        Self::with_last_frame(true)
    }

    pub fn with_last_frame(last_frame: bool) -> Self {
        Self {
            throws: ArrayVec::new(),
            last_frame,
            state: FrameState::Open,
        }
    }

    /// Record a throw.
    ///
    /// Nothing is modified when the throw is rejected.
    pub fn add_throw(&mut self, pins: u8) -> Result<()> {
        if self.state == FrameState::Done {
            return Err(BowlingError::FrameFinished);
        }
        if pins > MAX_PINS {
            return Err(BowlingError::InvalidPinCount(pins.into()));
        }
        let remaining = self.remaining_pins();
        if pins > remaining {
            return Err(BowlingError::ExceedsRemainingPins { pins, remaining });
        }

        self.throws
            .try_push(pins)
            .map_err(|_| BowlingError::FrameFinished)?;
        self.state = self.advance();

        trace!(pins, throws = ?self.throws.as_slice(), state = ?self.state, "throw recorded");
        if self.state == FrameState::Done {
            debug!(
                throws = ?self.throws.as_slice(),
                total = self.pins_knocked_down(),
                last_frame = self.last_frame,
                "frame completed"
            );
        }
        Ok(())
    }

    /// State after the throw just appended to `throws`.
    fn advance(&self) -> FrameState {
        match self.state {
            FrameState::Done => FrameState::Done,
            FrameState::AwaitingBonus { kind, owed } => {
                if owed <= 1 {
                    FrameState::Done
                } else {
                    FrameState::AwaitingBonus {
                        kind,
                        owed: owed - 1,
                    }
                }
            }
            FrameState::Open => {
                if self.is_strike() {
                    self.bonus_or_done(BonusKind::Strike)
                } else if self.pins_knocked_down() == u32::from(MAX_PINS) {
                    self.bonus_or_done(BonusKind::Spare)
                } else if self.throws.len() == MAX_THROWS {
                    FrameState::Done
                } else {
                    FrameState::Open
                }
            }
        }
    }

    fn bonus_or_done(&self, kind: BonusKind) -> FrameState {
        if self.last_frame {
            FrameState::AwaitingBonus {
                kind,
                owed: kind.owed(),
            }
        } else {
            FrameState::Done
        }
    }

    /// Pins standing for the next throw.
    ///
    /// In the last frame all pins are reset after a strike and after the
    /// throw completing a spare, so only the current set counts.
    pub fn remaining_pins(&self) -> u8 {
        if self.last_frame {
            MAX_PINS - open_set_pins(&self.throws)
        } else {
            let felled = self.pins_knocked_down().min(u32::from(MAX_PINS)) as u8;
            MAX_PINS - felled
        }
    }

    /// The next throw opens a new set: nothing thrown yet, or the last set was cleared.
    pub fn at_set_start(&self) -> bool {
        let mut set_len = 0usize;
        let mut felled = 0u8;
        for &pins in &self.throws {
            felled = felled.saturating_add(pins);
            set_len += 1;
            if felled >= MAX_PINS {
                felled = 0;
                set_len = 0;
            }
        }
        set_len == 0
    }

    pub fn is_strike(&self) -> bool {
        self.throws.first() == Some(&MAX_PINS)
    }

    pub fn is_spare(&self) -> bool {
        self.spare_index().is_some()
    }

    /// Index of the throw that completed a spare, if any.
    ///
    /// Only the normal throws (the first three) can form a spare.
    pub fn spare_index(&self) -> Option<usize> {
        if self.is_strike() {
            return None;
        }
        let mut felled = 0u8;
        for (i, &pins) in self.throws.iter().take(MAX_THROWS).enumerate() {
            felled += pins;
            if felled == MAX_PINS {
                return Some(i);
            }
        }
        None
    }

    pub fn mark(&self) -> FrameMark {
        if self.is_strike() {
            FrameMark::Strike
        } else if self.is_spare() {
            FrameMark::Spare
        } else {
            FrameMark::Open
        }
    }

    pub fn is_completed(&self) -> bool {
        self.state == FrameState::Done
    }

    pub fn is_last_frame(&self) -> bool {
        self.last_frame
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Bonus throws still owed (last frame only).
    pub fn bonus_owed(&self) -> u8 {
        match self.state {
            FrameState::AwaitingBonus { owed, .. } => owed,
            _ => 0,
        }
    }

    pub fn throws(&self) -> &[u8] {
        &self.throws
    }

    /// Sum of every recorded throw, bonus throws included.
    pub fn pins_knocked_down(&self) -> u32 {
        self.throws.iter().map(|&p| u32::from(p)).sum()
    }
}

/// Pins felled in the set still in progress.
///
/// A set closes as soon as its throws add up to all pins.
pub fn open_set_pins(throws: &[u8]) -> u8 {
    throws.iter().fold(0u8, |set, &pins| {
        let felled = set.saturating_add(pins);
        if felled >= MAX_PINS {
            0
        } else {
            felled
        }
    })
}
