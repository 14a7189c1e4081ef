//! Scoring module - cumulative score with strike/spare look-ahead
//!
//! Scoring rules:
//! - Every frame is worth the pins it felled.
//! - A strike before the last frame adds the next 3 throws.
//! - A spare before the last frame adds the next 2 throws.
//! - The last frame already holds its bonus throws, so it only counts its pins.
//!
//! Look-ahead throws are collected across as many following frames as needed.
//! When too few throws exist yet, the bonus is partial (in-progress display).

use arrayvec::ArrayVec;

use crate::frame::Frame;
use crate::types::{MAX_FRAMES, SPARE_BONUS_THROWS, STRIKE_BONUS_THROWS};

/// Sum of up to `count` throws recorded after frame `index`.
pub fn lookahead_bonus(frames: &[Frame], index: usize, count: usize) -> u32 {
    frames
        .iter()
        .skip(index + 1)
        .flat_map(|frame| frame.throws().iter().copied())
        .take(count)
        .map(u32::from)
        .sum()
}

/// Points contributed by a single frame, bonus included.
pub fn frame_score(frames: &[Frame], index: usize) -> u32 {
    let Some(frame) = frames.get(index) else {
        return 0;
    };
    let mut score = frame.pins_knocked_down();
    if index < MAX_FRAMES - 1 {
        if frame.is_strike() {
            score += lookahead_bonus(frames, index, STRIKE_BONUS_THROWS);
        } else if frame.is_spare() {
            score += lookahead_bonus(frames, index, SPARE_BONUS_THROWS);
        }
    }
    score
}

/// Cumulative score through the first `through_frame` frames (1-based count).
pub fn calculate_score(frames: &[Frame], through_frame: usize) -> u32 {
    (0..through_frame.min(frames.len()))
        .map(|i| frame_score(frames, i))
        .sum()
}

/// Running totals, one entry per recorded frame.
pub fn cumulative_scores(frames: &[Frame]) -> ArrayVec<u32, MAX_FRAMES> {
    let mut out = ArrayVec::new();
    let mut total = 0u32;
    for i in 0..frames.len().min(MAX_FRAMES) {
        total += frame_score(frames, i);
        out.push(total);
    }
    out
}
