//! Plain-text scorecard.
//!
//! ```text
//! Player |   1   |   2   |   3   |   4   |     5     | Total
//! -------+-------+-------+-------+-------+-----------+------
//! Ann    | X     | 7 /   | 5 3 2 | X     | 6 4 -     |
//!        |    35 |    58 |    68 |    93 |       103 |   103
//! ```

use std::fmt::Write as _;

use crate::core::GameSnapshot;
use crate::types::{FrameMark, MAX_FRAMES, MAX_PINS};

const FRAME_WIDTH: usize = 7;
const LAST_FRAME_WIDTH: usize = 11;
const TOTAL_WIDTH: usize = 5;

/// Display symbol for every throw of a frame.
///
/// `X` fells a full rack, `/` clears what was left of one, `-` is a miss.
/// Racks are reset whenever they are cleared, which only happens more than
/// once in the last frame.
pub fn throw_marks(throws: &[u8]) -> Vec<String> {
    let mut marks = Vec::with_capacity(throws.len());
    let mut standing = MAX_PINS;
    let mut fresh_rack = true;
    for &pins in throws {
        let mark = if pins == MAX_PINS && fresh_rack {
            FrameMark::Strike.symbol().to_string()
        } else if pins == standing && pins > 0 {
            FrameMark::Spare.symbol().to_string()
        } else if pins == 0 {
            "-".to_string()
        } else {
            pins.to_string()
        };
        marks.push(mark);
        standing = standing.saturating_sub(pins);
        fresh_rack = standing == 0;
        if fresh_rack {
            standing = MAX_PINS;
        }
    }
    marks
}

fn frame_width(index: usize) -> usize {
    if index == MAX_FRAMES - 1 {
        LAST_FRAME_WIDTH
    } else {
        FRAME_WIDTH
    }
}

/// Render a header row plus two rows per player: throw marks, then running totals.
///
/// Running totals are only shown for completed frames.
pub fn render_scorecard(snapshot: &GameSnapshot) -> String {
    let name_width = snapshot
        .players
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Player".len());

    let mut out = String::new();

    let _ = write!(out, "{:<name_width$} |", "Player");
    for i in 0..MAX_FRAMES {
        let w = frame_width(i);
        let _ = write!(out, " {:^w$} |", i + 1);
    }
    let _ = writeln!(out, " Total");

    out.push_str(&"-".repeat(name_width + 1));
    for i in 0..MAX_FRAMES {
        out.push('+');
        out.push_str(&"-".repeat(frame_width(i) + 2));
    }
    out.push('+');
    out.push_str(&"-".repeat(TOTAL_WIDTH + 1));
    out.push('\n');

    for player in &snapshot.players {
        let _ = write!(out, "{:<name_width$} |", player.name);
        for i in 0..MAX_FRAMES {
            let w = frame_width(i);
            let marks = player.frames.get(i).map(|f| throw_marks(&f.throws).join(" "));
            let _ = write!(out, " {:<w$} |", marks.unwrap_or_default());
        }
        out.push('\n');

        let _ = write!(out, "{:<name_width$} |", "");
        for i in 0..MAX_FRAMES {
            let w = frame_width(i);
            match player.frames.get(i).filter(|f| f.completed) {
                Some(f) => {
                    let _ = write!(out, " {:>w$} |", f.cumulative);
                }
                None => {
                    let _ = write!(out, " {:>w$} |", "");
                }
            }
        }
        let _ = writeln!(out, " {:>TOTAL_WIDTH$}", player.total);
    }

    out
}
