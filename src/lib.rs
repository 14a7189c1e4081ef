//! Ancient bowling (workspace facade crate).
//!
//! Re-exports `ancient_bowling::{core,adapter,term,types}` while the
//! implementation lives in dedicated crates under `crates/`.

pub use ancient_bowling_adapter as adapter;
pub use ancient_bowling_core as core;
pub use ancient_bowling_term as term;
pub use ancient_bowling_types as types;

pub mod telemetry;
