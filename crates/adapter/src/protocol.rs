//! Protocol module - JSON message types for the game server
//!
//! Line-delimited JSON: every request is one object on one line and gets
//! exactly one response line. All messages carry `type` and `seq`; responses
//! echo the request `seq` and add `ts` (timestamp in ms).

use serde::{Deserialize, Serialize};

use crate::core::{BowlingError, GameSnapshot, ScoreEntry, ThrowOutcome};
use crate::registry::{GameId, RegistryError};
use crate::types::{ErrorCategory, FrameMark};

// ============== Client -> Server Messages ==============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    CreateGame {
        #[serde(default)]
        seq: u64,
    },
    ListGames {
        #[serde(default)]
        seq: u64,
    },
    AddPlayer {
        #[serde(default)]
        seq: u64,
        game_id: GameId,
        name: String,
    },
    Start {
        #[serde(default)]
        seq: u64,
        game_id: GameId,
    },
    Throw {
        #[serde(default)]
        seq: u64,
        game_id: GameId,
        /// Signed so out-of-range values reach the rules engine and get a proper error.
        pins: i64,
    },
    State {
        #[serde(default)]
        seq: u64,
        game_id: GameId,
    },
    Scoreboard {
        #[serde(default)]
        seq: u64,
        game_id: GameId,
    },
    DeleteGame {
        #[serde(default)]
        seq: u64,
        game_id: GameId,
    },
}

impl Request {
    pub fn seq(&self) -> u64 {
        match self {
            Request::CreateGame { seq }
            | Request::ListGames { seq }
            | Request::AddPlayer { seq, .. }
            | Request::Start { seq, .. }
            | Request::Throw { seq, .. }
            | Request::State { seq, .. }
            | Request::Scoreboard { seq, .. }
            | Request::DeleteGame { seq, .. } => *seq,
        }
    }

    /// Wire name of the request type (for logs).
    pub fn kind(&self) -> &'static str {
        match self {
            Request::CreateGame { .. } => "create_game",
            Request::ListGames { .. } => "list_games",
            Request::AddPlayer { .. } => "add_player",
            Request::Start { .. } => "start",
            Request::Throw { .. } => "throw",
            Request::State { .. } => "state",
            Request::Scoreboard { .. } => "scoreboard",
            Request::DeleteGame { .. } => "delete_game",
        }
    }
}

const REQUEST_TYPES: [&str; 8] = [
    "create_game",
    "list_games",
    "add_player",
    "start",
    "throw",
    "state",
    "scoreboard",
    "delete_game",
];

/// Parsed incoming line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedRequest {
    Request(Request),
    /// Valid JSON with a `type` the server does not know.
    Unknown { seq: u64, msg_type: String },
}

/// Parse a JSON request from a line
pub fn parse_request(json: &str) -> Result<ParsedRequest, serde_json::Error> {
    match serde_json::from_str::<Request>(json) {
        Ok(req) => Ok(ParsedRequest::Request(req)),
        Err(e) => {
            // Unknown message type is not a hard parse error for the protocol.
            #[derive(Debug, Deserialize)]
            struct Header {
                #[serde(rename = "type")]
                msg_type: Option<String>,
                seq: Option<u64>,
            }
            let header = serde_json::from_str::<Header>(json)?;
            let msg_type = header.msg_type.unwrap_or_else(|| "unknown".to_string());
            if !REQUEST_TYPES.contains(&msg_type.as_str()) {
                return Ok(ParsedRequest::Unknown {
                    seq: header.seq.unwrap_or(0),
                    msg_type,
                });
            }
            Err(e)
        }
    }
}

/// Recover `seq` from a line that failed to parse.
pub fn extract_seq_best_effort(s: &str) -> Option<u64> {
    let start = s.find("\"seq\"")?;
    let after_key = &s[start + 5..];
    let colon = after_key.find(':')?;
    let rest = after_key[colon + 1..].trim_start();
    let end = rest.bytes().take_while(u8::is_ascii_digit).count();
    if end == 0 {
        return None;
    }
    rest[..end].parse::<u64>().ok()
}

// ============== Server -> Client Messages ==============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Created(CreatedMessage),
    Games(GamesMessage),
    Ack(AckMessage),
    ThrowResult(ThrowResultMessage),
    State(StateMessage),
    Scoreboard(ScoreboardMessage),
    Error(ErrorMessage),
}

impl Response {
    pub fn seq(&self) -> u64 {
        match self {
            Response::Created(m) => m.seq,
            Response::Games(m) => m.seq,
            Response::Ack(m) => m.seq,
            Response::ThrowResult(m) => m.seq,
            Response::State(m) => m.seq,
            Response::Scoreboard(m) => m.seq,
            Response::Error(m) => m.seq,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedMessage {
    pub seq: u64,
    pub ts: u64,
    pub game_id: GameId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamesMessage {
    pub seq: u64,
    pub ts: u64,
    pub game_ids: Vec<GameId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckMessage {
    pub seq: u64,
    pub ts: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkLower {
    Open,
    Spare,
    Strike,
}

impl From<FrameMark> for MarkLower {
    fn from(value: FrameMark) -> Self {
        match value {
            FrameMark::Open => Self::Open,
            FrameMark::Spare => Self::Spare,
            FrameMark::Strike => Self::Strike,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrowResultMessage {
    pub seq: u64,
    pub ts: u64,
    /// Player who threw.
    pub player: String,
    pub frame: usize,
    pub pins: u8,
    pub strike: bool,
    pub spare: bool,
    pub mark: MarkLower,
    pub frame_completed: bool,
    /// Whose turn it is now; absent once the game is complete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_player: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_pins: Option<u8>,
    pub game_complete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameState {
    pub throws: Vec<u8>,
    pub mark: MarkLower,
    pub completed: bool,
    /// The last frame allows bonus throws and resets its pins.
    pub last_frame: bool,
    pub cumulative: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    pub total: u32,
    pub complete: bool,
    pub frames: Vec<FrameState>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateMessage {
    pub seq: u64,
    pub ts: u64,
    pub game_id: GameId,
    pub started: bool,
    pub complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_player: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_frame: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_pins: Option<u8>,
    pub players: Vec<PlayerState>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreboardEntry {
    pub rank: usize,
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreboardMessage {
    pub seq: u64,
    pub ts: u64,
    pub entries: Vec<ScoreboardEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidPinCount,
    ExceedsRemainingPins,
    FrameFinished,
    GameComplete,
    AlreadyStarted,
    NotStarted,
    InsufficientPlayers,
    InvalidPlayer,
    NotFound,
    InvalidRequest,
}

impl From<&BowlingError> for ErrorCode {
    fn from(value: &BowlingError) -> Self {
        match value {
            BowlingError::InvalidPinCount(_) => Self::InvalidPinCount,
            BowlingError::ExceedsRemainingPins { .. } => Self::ExceedsRemainingPins,
            BowlingError::FrameFinished => Self::FrameFinished,
            BowlingError::GameComplete => Self::GameComplete,
            BowlingError::AlreadyStarted => Self::AlreadyStarted,
            BowlingError::NotStarted => Self::NotStarted,
            BowlingError::InsufficientPlayers { .. } => Self::InsufficientPlayers,
            BowlingError::InvalidPlayer(_) => Self::InvalidPlayer,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryLower {
    BadInput,
    IllegalState,
    NotFound,
}

impl From<ErrorCategory> for CategoryLower {
    fn from(value: ErrorCategory) -> Self {
        match value {
            ErrorCategory::BadInput => Self::BadInput,
            ErrorCategory::IllegalState => Self::IllegalState,
            ErrorCategory::NotFound => Self::NotFound,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub seq: u64,
    pub ts: u64,
    pub code: ErrorCode,
    pub category: CategoryLower,
    pub message: String,
}

// ============== Message Construction ==============

pub fn create_created(seq: u64, game_id: GameId) -> Response {
    Response::Created(CreatedMessage {
        seq,
        ts: current_timestamp_ms(),
        game_id,
    })
}

pub fn create_games(seq: u64, game_ids: Vec<GameId>) -> Response {
    Response::Games(GamesMessage {
        seq,
        ts: current_timestamp_ms(),
        game_ids,
    })
}

pub fn create_ack(seq: u64) -> Response {
    Response::Ack(AckMessage {
        seq,
        ts: current_timestamp_ms(),
    })
}

pub fn create_error(seq: u64, code: ErrorCode, category: ErrorCategory, message: &str) -> Response {
    Response::Error(ErrorMessage {
        seq,
        ts: current_timestamp_ms(),
        code,
        category: category.into(),
        message: message.to_string(),
    })
}

pub fn create_invalid_request(seq: u64, message: &str) -> Response {
    create_error(seq, ErrorCode::InvalidRequest, ErrorCategory::BadInput, message)
}

pub fn error_from_bowling(seq: u64, err: &BowlingError) -> Response {
    create_error(seq, err.into(), err.category(), &err.to_string())
}

pub fn error_from_registry(seq: u64, err: &RegistryError) -> Response {
    create_error(seq, ErrorCode::NotFound, err.category(), &err.to_string())
}

pub fn build_throw_result(
    seq: u64,
    player: &str,
    outcome: &ThrowOutcome,
    next_player: Option<String>,
    remaining_pins: Option<u8>,
    game_complete: bool,
) -> Response {
    Response::ThrowResult(ThrowResultMessage {
        seq,
        ts: current_timestamp_ms(),
        player: player.to_string(),
        frame: outcome.frame_number,
        pins: outcome.pins,
        strike: outcome.strike,
        spare: outcome.spare,
        mark: outcome.mark.into(),
        frame_completed: outcome.frame_completed,
        next_player,
        remaining_pins,
        game_complete,
    })
}

pub fn build_state(seq: u64, game_id: GameId, snapshot: &GameSnapshot) -> Response {
    let players = snapshot
        .players
        .iter()
        .map(|p| PlayerState {
            name: p.name.clone(),
            total: p.total,
            complete: p.complete,
            frames: p
                .frames
                .iter()
                .map(|f| FrameState {
                    throws: f.throws.clone(),
                    mark: f.mark.into(),
                    completed: f.completed,
                    last_frame: f.last_frame,
                    cumulative: f.cumulative,
                })
                .collect(),
        })
        .collect();

    Response::State(StateMessage {
        seq,
        ts: current_timestamp_ms(),
        game_id,
        started: snapshot.started,
        complete: snapshot.complete,
        current_player: snapshot.current_player.clone(),
        current_frame: snapshot.current_frame,
        remaining_pins: snapshot.remaining_pins,
        players,
    })
}

pub fn build_scoreboard(seq: u64, entries: &[ScoreEntry<'_>]) -> Response {
    Response::Scoreboard(ScoreboardMessage {
        seq,
        ts: current_timestamp_ms(),
        entries: entries
            .iter()
            .enumerate()
            .map(|(i, e)| ScoreboardEntry {
                rank: i + 1,
                name: e.name.to_string(),
                score: e.score,
            })
            .collect(),
    })
}

/// Get current timestamp in milliseconds
fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "67e55044-10b1-426f-9247-bb680e5fe0c8";

    #[test]
    fn test_parse_throw() {
        let json = format!(r#"{{"type":"throw","seq":4,"game_id":"{ID}","pins":7}}"#);
        match parse_request(&json).unwrap() {
            ParsedRequest::Request(Request::Throw { seq, game_id, pins }) => {
                assert_eq!(seq, 4);
                assert_eq!(game_id.to_string(), ID);
                assert_eq!(pins, 7);
            }
            other => panic!("Expected Throw request, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_negative_pins_is_accepted_by_the_parser() {
        let json = format!(r#"{{"type":"throw","seq":1,"game_id":"{ID}","pins":-1}}"#);
        let parsed = parse_request(&json).unwrap();
        assert!(matches!(
            parsed,
            ParsedRequest::Request(Request::Throw { pins: -1, .. })
        ));
    }

    #[test]
    fn test_parse_create_without_seq() {
        let parsed = parse_request(r#"{"type":"create_game"}"#).unwrap();
        assert_eq!(parsed, ParsedRequest::Request(Request::CreateGame { seq: 0 }));
    }

    #[test]
    fn test_unknown_type_is_not_a_parse_error() {
        let parsed = parse_request(r#"{"type":"reset","seq":9}"#).unwrap();
        assert_eq!(
            parsed,
            ParsedRequest::Unknown {
                seq: 9,
                msg_type: "reset".to_string()
            }
        );
    }

    #[test]
    fn test_known_type_with_bad_fields_is_an_error() {
        assert!(parse_request(r#"{"type":"throw","seq":2,"game_id":"nope","pins":3}"#).is_err());
        assert!(parse_request("not json").is_err());
    }

    #[test]
    fn test_extract_seq_best_effort() {
        assert_eq!(extract_seq_best_effort(r#"{"seq": 42, "type": "throw""#), Some(42));
        assert_eq!(extract_seq_best_effort(r#"{"type":"throw"}"#), None);
        assert_eq!(extract_seq_best_effort(r#"{"seq":"x"}"#), None);
    }

    #[test]
    fn test_error_serializes_code_and_category() {
        let err = error_from_bowling(
            3,
            &BowlingError::ExceedsRemainingPins {
                pins: 9,
                remaining: 5,
            },
        );
        let v: serde_json::Value = serde_json::to_value(&err).unwrap();
        assert_eq!(v["type"], "error");
        assert_eq!(v["seq"], 3);
        assert_eq!(v["code"], "exceeds_remaining_pins");
        assert_eq!(v["category"], "bad_input");

        let err = error_from_bowling(4, &BowlingError::NotStarted);
        let v: serde_json::Value = serde_json::to_value(&err).unwrap();
        assert_eq!(v["category"], "illegal_state");
    }

    #[test]
    fn test_response_tagging() {
        let ack = create_ack(10);
        let json = serde_json::to_string(&ack).unwrap();
        assert!(json.contains(r#""type":"ack""#));
        let parsed: Response = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.seq(), 10);
    }
}
