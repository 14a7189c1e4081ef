//! Request dispatch
//!
//! Maps one parsed [`Request`] onto the registry and the game engine. Every
//! game operation holds that game's mutex for its whole duration.

use thiserror::Error;
use tracing::{debug, info};

use crate::core::{pins_from_raw, BowlingError};
use crate::protocol::*;
use crate::registry::{GameRegistry, RegistryError};

#[derive(Debug, Error)]
enum RequestError {
    #[error(transparent)]
    Game(#[from] BowlingError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Execute a request. Failures come back as an `error` response.
pub async fn handle_request(registry: &GameRegistry, request: Request) -> Response {
    let seq = request.seq();
    let kind = request.kind();
    match dispatch(registry, request).await {
        Ok(response) => response,
        Err(RequestError::Game(e)) => {
            debug!(seq, kind, error = %e, "request rejected");
            error_from_bowling(seq, &e)
        }
        Err(RequestError::Registry(e)) => {
            debug!(seq, kind, error = %e, "request rejected");
            error_from_registry(seq, &e)
        }
    }
}

async fn dispatch(registry: &GameRegistry, request: Request) -> Result<Response, RequestError> {
    match request {
        Request::CreateGame { seq } => {
            let id = registry.create().await;
            info!(game_id = %id, "game created");
            Ok(create_created(seq, id))
        }
        Request::ListGames { seq } => Ok(create_games(seq, registry.list().await)),
        Request::AddPlayer { seq, game_id, name } => {
            let game = registry.get(&game_id).await?;
            game.lock().await.add_player(&name)?;
            debug!(game_id = %game_id, player = %name, "player added");
            Ok(create_ack(seq))
        }
        Request::Start { seq, game_id } => {
            let game = registry.get(&game_id).await?;
            game.lock().await.start()?;
            info!(game_id = %game_id, "game started");
            Ok(create_ack(seq))
        }
        Request::Throw {
            seq,
            game_id,
            pins,
        } => {
            let game = registry.get(&game_id).await?;
            let mut game = game.lock().await;
            if !game.is_started() {
                return Err(BowlingError::NotStarted.into());
            }
            let pins = pins_from_raw(pins)?;
            let player = game
                .current_player()
                .map(|p| p.name().to_string())
                .unwrap_or_default();

            let outcome = game.add_throw(pins)?;
            let complete = game.is_game_complete();
            let (next_player, remaining_pins) = if complete {
                info!(game_id = %game_id, "game complete");
                (None, None)
            } else {
                (
                    game.current_player().map(|p| p.name().to_string()),
                    game.remaining_pins(),
                )
            };
            Ok(build_throw_result(
                seq,
                &player,
                &outcome,
                next_player,
                remaining_pins,
                complete,
            ))
        }
        Request::State { seq, game_id } => {
            let game = registry.get(&game_id).await?;
            let snapshot = game.lock().await.snapshot();
            Ok(build_state(seq, game_id, &snapshot))
        }
        Request::Scoreboard { seq, game_id } => {
            let game = registry.get(&game_id).await?;
            let game = game.lock().await;
            Ok(build_scoreboard(seq, &game.scoreboard()))
        }
        Request::DeleteGame { seq, game_id } => {
            registry.delete(&game_id).await?;
            info!(game_id = %game_id, "game deleted");
            Ok(create_ack(seq))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::GameId;

    async fn started(registry: &GameRegistry) -> GameId {
        let Response::Created(created) = handle_request(registry, Request::CreateGame { seq: 1 }).await
        else {
            panic!("expected created");
        };
        let game_id = created.game_id;
        for name in ["Ann", "Bob"] {
            let r = handle_request(
                registry,
                Request::AddPlayer {
                    seq: 2,
                    game_id,
                    name: name.to_string(),
                },
            )
            .await;
            assert!(matches!(r, Response::Ack(_)));
        }
        let r = handle_request(registry, Request::Start { seq: 3, game_id }).await;
        assert!(matches!(r, Response::Ack(_)));
        game_id
    }

    fn throw(game_id: GameId, pins: i64) -> Request {
        Request::Throw {
            seq: 7,
            game_id,
            pins,
        }
    }

    #[tokio::test]
    async fn throw_reports_turn_change() {
        let registry = GameRegistry::new();
        let game_id = started(&registry).await;

        let Response::ThrowResult(r) = handle_request(&registry, throw(game_id, 15)).await else {
            panic!("expected throw_result");
        };
        assert_eq!(r.seq, 7);
        assert_eq!(r.player, "Ann");
        assert!(r.strike);
        assert!(r.frame_completed);
        assert_eq!(r.mark, MarkLower::Strike);
        assert_eq!(r.next_player.as_deref(), Some("Bob"));
        assert_eq!(r.remaining_pins, Some(15));
        assert!(!r.game_complete);
    }

    #[tokio::test]
    async fn rule_violations_map_to_codes() {
        let registry = GameRegistry::new();
        let game_id = started(&registry).await;

        let Response::Error(e) = handle_request(&registry, throw(game_id, -1)).await else {
            panic!("expected error");
        };
        assert_eq!(e.code, ErrorCode::InvalidPinCount);
        assert_eq!(e.category, CategoryLower::BadInput);

        handle_request(&registry, throw(game_id, 10)).await;
        let Response::Error(e) = handle_request(&registry, throw(game_id, 6)).await else {
            panic!("expected error");
        };
        assert_eq!(e.code, ErrorCode::ExceedsRemainingPins);

        let Response::Error(e) =
            handle_request(&registry, Request::Start { seq: 8, game_id }).await
        else {
            panic!("expected error");
        };
        assert_eq!(e.code, ErrorCode::AlreadyStarted);
        assert_eq!(e.category, CategoryLower::IllegalState);
    }

    #[tokio::test]
    async fn throw_before_start_is_not_started() {
        let registry = GameRegistry::new();
        let game_id = registry.create().await;
        let Response::Error(e) = handle_request(&registry, throw(game_id, 99)).await else {
            panic!("expected error");
        };
        assert_eq!(e.code, ErrorCode::NotStarted);
    }

    #[tokio::test]
    async fn unknown_game_is_not_found() {
        let registry = GameRegistry::new();
        let Response::Error(e) = handle_request(
            &registry,
            Request::State {
                seq: 5,
                game_id: GameId::new(),
            },
        )
        .await
        else {
            panic!("expected error");
        };
        assert_eq!(e.seq, 5);
        assert_eq!(e.code, ErrorCode::NotFound);
        assert_eq!(e.category, CategoryLower::NotFound);
    }

    #[tokio::test]
    async fn scoreboard_ranks_players() {
        let registry = GameRegistry::new();
        let game_id = started(&registry).await;
        handle_request(&registry, throw(game_id, 3)).await;
        handle_request(&registry, throw(game_id, 1)).await;
        handle_request(&registry, throw(game_id, 1)).await;
        handle_request(&registry, throw(game_id, 9)).await;

        let Response::Scoreboard(board) =
            handle_request(&registry, Request::Scoreboard { seq: 9, game_id }).await
        else {
            panic!("expected scoreboard");
        };
        assert_eq!(board.entries.len(), 2);
        assert_eq!(board.entries[0].name, "Bob");
        assert_eq!(board.entries[0].rank, 1);
        assert_eq!(board.entries[0].score, 9);
        assert_eq!(board.entries[1].name, "Ann");
        assert_eq!(board.entries[1].score, 5);
    }
}
