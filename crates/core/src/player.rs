//! Player module - one participant's frames and score
//!
//! A player starts with a single empty frame. A new frame is attached only
//! after the current one is completed, and the fifth frame absorbs every
//! remaining throw (bonus throws included); no sixth frame is ever created.

use arrayvec::ArrayVec;
use tracing::debug;

use crate::error::{BowlingError, Result};
use crate::frame::Frame;
use crate::scoring;
use crate::types::{FrameMark, MAX_FRAMES, MAX_PINS};

/// What happened to an accepted throw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrowOutcome {
    pub pins: u8,
    /// 1-based frame the throw landed in.
    pub frame_number: usize,
    /// Pins standing before the throw.
    pub pins_before: u8,
    pub frame_completed: bool,
    /// The throw was the first of its set and felled every pin.
    pub strike: bool,
    /// The throw cleared the pins left standing by earlier throws of its set.
    pub spare: bool,
    pub mark: FrameMark,
    pub game_complete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    frames: ArrayVec<Frame, MAX_FRAMES>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        let mut frames = ArrayVec::new();
        frames.push(Frame::new());
        Self {
            name: name.into(),
            frames,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The frame most recently attached.
    pub fn current_frame(&self) -> &Frame {
        // `frames` is never empty: `new` seeds it and frames are never removed.
        &self.frames[self.frames.len() - 1]
    }

    fn next_frame_due(&self) -> bool {
        self.current_frame().is_completed() && self.frames.len() < MAX_FRAMES
    }

    fn fresh_frame(&self) -> Frame {
        Frame::with_last_frame(self.frames.len() == MAX_FRAMES - 1)
    }

    /// Attach the next frame if the current one is completed.
    ///
    /// Idempotent; does nothing once the fifth frame exists.
    pub fn ensure_fresh_frame(&mut self) {
        if self.next_frame_due() {
            let frame = self.fresh_frame();
            self.frames.push(frame);
        }
    }

    /// 1-based number of the frame the next throw goes to.
    pub fn current_frame_number(&self) -> usize {
        if self.next_frame_due() {
            self.frames.len() + 1
        } else {
            self.frames.len()
        }
    }

    /// Pins standing for this player's next throw.
    pub fn remaining_pins(&self) -> u8 {
        if self.next_frame_due() {
            MAX_PINS
        } else {
            self.current_frame().remaining_pins()
        }
    }

    /// Route a throw to the correct frame.
    ///
    /// The next frame is only attached once its first throw is accepted, so a
    /// rejected throw leaves the player unchanged.
    pub fn add_throw(&mut self, pins: u8) -> Result<ThrowOutcome> {
        if self.is_game_complete() {
            return Err(BowlingError::GameComplete);
        }

        let pins_before = self.remaining_pins();
        let fresh_set = self.next_frame_due() || self.current_frame().at_set_start();
        if self.next_frame_due() {
            let mut frame = self.fresh_frame();
            frame.add_throw(pins)?;
            self.frames.push(frame);
        } else {
            let last = self.frames.len() - 1;
            self.frames[last].add_throw(pins)?;
        }

        let frame = self.current_frame();
        let outcome = ThrowOutcome {
            pins,
            frame_number: self.frames.len(),
            pins_before,
            frame_completed: frame.is_completed(),
            strike: fresh_set && pins == MAX_PINS,
            spare: !fresh_set && pins == pins_before,
            mark: frame.mark(),
            game_complete: self.is_game_complete(),
        };
        if outcome.game_complete {
            debug!(player = %self.name, score = self.total_score(), "player finished");
        }
        Ok(outcome)
    }

    /// Cumulative score through the first `through_frame` frames.
    pub fn calculate_score(&self, through_frame: usize) -> u32 {
        scoring::calculate_score(&self.frames, through_frame)
    }

    pub fn total_score(&self) -> u32 {
        self.calculate_score(self.frames.len())
    }

    pub fn cumulative_scores(&self) -> ArrayVec<u32, MAX_FRAMES> {
        scoring::cumulative_scores(&self.frames)
    }

    /// All five frames exist and the last one took every owed throw.
    pub fn is_game_complete(&self) -> bool {
        self.frames.len() == MAX_FRAMES && self.current_frame().is_completed()
    }

    /// The last frame holds a strike or spare whose bonus throws are not all taken.
    pub fn needs_bonus_throws(&self) -> bool {
        self.frames.len() == MAX_FRAMES && self.current_frame().bonus_owed() > 0
    }
}
