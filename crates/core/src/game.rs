//! Game module - players, turn order and the scoreboard
//!
//! A game collects players before it starts, then routes every throw to the
//! current player. The turn passes once the current player's frame is
//! completed, skipping players who have already finished all five frames.
//! The game ends when every player's last frame (bonus throws included) is done.

use tracing::debug;

use crate::error::{BowlingError, Result};
use crate::player::{Player, ThrowOutcome};
use crate::snapshot::{FrameSnapshot, GameSnapshot, PlayerSnapshot};
use crate::types::MIN_PLAYERS;

/// One scoreboard row
#[derive(Debug, Clone, Copy)]
pub struct ScoreEntry<'a> {
    pub name: &'a str,
    pub score: u32,
    pub player: &'a Player,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Game {
    players: Vec<Player>,
    current_player: usize,
    started: bool,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a player. Only allowed before the game starts.
    pub fn add_player(&mut self, name: &str) -> Result<()> {
        if self.started {
            return Err(BowlingError::AlreadyStarted);
        }
        if name.trim().is_empty() {
            return Err(BowlingError::InvalidPlayer(
                "player name cannot be empty".to_string(),
            ));
        }
        if self.players.iter().any(|p| p.name() == name) {
            return Err(BowlingError::InvalidPlayer(format!(
                "player already exists: {name}"
            )));
        }
        self.players.push(Player::new(name));
        Ok(())
    }

    /// Freeze the player list and open play. Cannot be called twice.
    pub fn start(&mut self) -> Result<()> {
        if self.started {
            return Err(BowlingError::AlreadyStarted);
        }
        if self.players.len() < MIN_PLAYERS {
            return Err(BowlingError::InsufficientPlayers {
                required: MIN_PLAYERS,
                actual: self.players.len(),
            });
        }
        self.started = true;
        self.current_player = 0;
        debug!(players = self.players.len(), "game started");
        Ok(())
    }

    /// Record a throw for the current player and pass the turn if their frame is done.
    pub fn add_throw(&mut self, pins: u8) -> Result<ThrowOutcome> {
        if !self.started {
            return Err(BowlingError::NotStarted);
        }
        if self.is_game_complete() {
            return Err(BowlingError::GameComplete);
        }

        let outcome = self.players[self.current_player].add_throw(pins)?;
        if outcome.frame_completed {
            self.move_to_next_player();
        }
        if self.is_game_complete() {
            debug!("game complete");
        }
        Ok(outcome)
    }

    /// Advance circularly to the next player still owed throws.
    ///
    /// Stops after one full circle; if nobody is left to play the game is over
    /// and the index stays where it was.
    fn move_to_next_player(&mut self) {
        let count = self.players.len();
        let start = self.current_player;
        let mut index = start;
        loop {
            index = (index + 1) % count;
            if index == start {
                break;
            }
            if !self.players[index].is_game_complete() {
                self.current_player = index;
                debug!(
                    from = %self.players[start].name(),
                    to = %self.players[index].name(),
                    "turn passed"
                );
                return;
            }
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Every player has finished, bonus throws included.
    ///
    /// A game without players is never complete.
    pub fn is_game_complete(&self) -> bool {
        !self.players.is_empty() && self.players.iter().all(Player::is_game_complete)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player)
    }

    pub fn current_player_index(&self) -> usize {
        self.current_player
    }

    /// Pins standing for the next throw of the current player.
    pub fn remaining_pins(&self) -> Option<u8> {
        self.current_player().map(Player::remaining_pins)
    }

    /// Players ranked by total score, highest first.
    ///
    /// Ties keep the order in which players joined.
    pub fn scoreboard(&self) -> Vec<ScoreEntry<'_>> {
        let mut entries: Vec<ScoreEntry<'_>> = self
            .players
            .iter()
            .map(|player| ScoreEntry {
                name: player.name(),
                score: player.total_score(),
                player,
            })
            .collect();
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let complete = self.is_game_complete();
        let current = if self.started && !complete {
            self.current_player()
        } else {
            None
        };

        GameSnapshot {
            started: self.started,
            complete,
            current_player: current.map(|p| p.name().to_string()),
            current_frame: current.map(Player::current_frame_number),
            remaining_pins: current.map(Player::remaining_pins),
            players: self.players.iter().map(player_snapshot).collect(),
        }
    }
}

fn player_snapshot(player: &Player) -> PlayerSnapshot {
    let cumulative = player.cumulative_scores();
    let frames = player
        .frames()
        .iter()
        .zip(cumulative.iter())
        .filter(|(frame, _)| !frame.throws().is_empty())
        .map(|(frame, &score)| FrameSnapshot {
            throws: frame.throws().to_vec(),
            mark: frame.mark(),
            completed: frame.is_completed(),
            last_frame: frame.is_last_frame(),
            cumulative: score,
        })
        .collect();

    PlayerSnapshot {
        name: player.name().to_string(),
        total: player.total_score(),
        complete: player.is_game_complete(),
        frames,
    }
}
