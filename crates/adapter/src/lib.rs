//! Adapter module - remote play via TCP socket with JSON protocol
//!
//! This crate hosts any number of independent bowling games behind a TCP
//! socket. Each game lives in the [`registry`] behind its own mutex, so
//! clients can play different games concurrently while every mutation of one
//! game is serialized.
//!
//! # Protocol Overview
//!
//! The adapter implements a **line-delimited JSON protocol** over TCP:
//!
//! 1. **Connection**: Client connects to TCP socket (default: 127.0.0.1:7878)
//! 2. **Request**: Client sends one JSON object per line
//! 3. **Response**: Server answers every request with exactly one line
//!
//! # Message Types
//!
//! ## Client → Server
//!
//! - **create_game** / **list_games** / **delete_game**: manage hosted games
//! - **add_player** / **start**: set up a game
//! - **throw**: record pins for the current player
//! - **state** / **scoreboard**: read a game
//!
//! ## Server → Client
//!
//! - **created**, **games**, **ack**
//! - **throw_result**: who threw, the frame mark and whose turn is next
//! - **state**: full game snapshot with per-frame cumulative scores
//! - **scoreboard**: ranked totals
//! - **error**: `code`, `category` (`bad_input`, `illegal_state`, `not_found`) and message
//!
//! # Environment Variables
//!
//! - `BOWLING_HOST`: Bind address (default: "127.0.0.1")
//! - `BOWLING_PORT`: Port number (default: 7878)
//! - `BOWLING_MAX_LINE_BYTES`: Longest accepted request line (default: 8192)
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Server: {"type":"create_game","seq":1}
//! Server -> Client: {"type":"created","seq":1,"ts":1234567890,"game_id":"67e55044-10b1-426f-9247-bb680e5fe0c8"}
//! Client -> Server: {"type":"add_player","seq":2,"game_id":"67e55044-...","name":"Ann"}
//! Server -> Client: {"type":"ack","seq":2,"ts":1234567891}
//! Client -> Server: {"type":"throw","seq":5,"game_id":"67e55044-...","pins":15}
//! Server -> Client: {"type":"throw_result","seq":5,"ts":1234567892,"player":"Ann","frame":1,"pins":15,"strike":true,...}
//! ```
//!
//! # Testing
//!
//! ```bash
//! nc 127.0.0.1 7878
//! {"type":"create_game","seq":1}
//! ```

pub mod handler;
pub mod protocol;
pub mod registry;
pub mod server;

pub use ancient_bowling_core as core;
pub use ancient_bowling_types as types;

pub use handler::handle_request;
pub use registry::{GameId, GameRegistry, RegistryError, SharedGame};
pub use server::{run_server, ServerConfig};
