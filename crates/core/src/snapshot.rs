//! Owned, read-only views of a game for presentation layers.

use crate::types::FrameMark;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrameSnapshot {
    pub throws: Vec<u8>,
    pub mark: FrameMark,
    pub completed: bool,
    pub last_frame: bool,
    /// Running total through this frame (partial while bonus throws are pending).
    pub cumulative: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerSnapshot {
    pub name: String,
    pub total: u32,
    pub complete: bool,
    /// Frames with at least one throw.
    pub frames: Vec<FrameSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameSnapshot {
    pub started: bool,
    pub complete: bool,
    pub current_player: Option<String>,
    pub current_frame: Option<usize>,
    pub remaining_pins: Option<u8>,
    pub players: Vec<PlayerSnapshot>,
}

impl GameSnapshot {
    pub fn player(&self, name: &str) -> Option<&PlayerSnapshot> {
        self.players.iter().find(|p| p.name == name)
    }
}
