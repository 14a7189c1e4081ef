//! In-memory game registry.
//!
//! Games are independent objects addressed by a [`GameId`]. Each game sits
//! behind its own mutex so all mutations of one game are serialized, while
//! different games can be played concurrently.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::core::Game;
use crate::types::ErrorCategory;

/// Opaque game handle (v4 UUID, serialized as a string).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(Uuid);

impl GameId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for GameId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("game not found with id: {0}")]
    NotFound(GameId),
}

impl RegistryError {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::NotFound
    }
}

/// A game shared between connections; lock it for every read or write.
pub type SharedGame = Arc<Mutex<Game>>;

#[derive(Debug, Default)]
pub struct GameRegistry {
    games: RwLock<HashMap<GameId, SharedGame>>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty game and return its id.
    pub async fn create(&self) -> GameId {
        let id = GameId::new();
        let mut games = self.games.write().await;
        games.insert(id, Arc::new(Mutex::new(Game::new())));
        id
    }

    pub async fn get(&self, id: &GameId) -> Result<SharedGame, RegistryError> {
        let games = self.games.read().await;
        games
            .get(id)
            .cloned()
            .ok_or(RegistryError::NotFound(*id))
    }

    /// Drop a game. Handles already obtained through [`get`](Self::get) stay valid.
    pub async fn delete(&self, id: &GameId) -> Result<(), RegistryError> {
        let mut games = self.games.write().await;
        games
            .remove(id)
            .map(|_| ())
            .ok_or(RegistryError::NotFound(*id))
    }

    /// Ids of all hosted games, sorted.
    pub async fn list(&self) -> Vec<GameId> {
        let games = self.games.read().await;
        let mut ids: Vec<GameId> = games.keys().copied().collect();
        ids.sort();
        ids
    }

    pub async fn len(&self) -> usize {
        self.games.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.games.read().await.is_empty()
    }
}
