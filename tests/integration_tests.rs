//! Integration tests for full games

use ancient_bowling::core::{BowlingError, Game, Player};
use ancient_bowling::types::MAX_FRAMES;
use proptest::prelude::*;

fn game_with(names: &[&str]) -> Game {
    let mut game = Game::new();
    for name in names {
        game.add_player(name).unwrap();
    }
    game.start().unwrap();
    game
}

fn scoreboard(game: &Game) -> Vec<(String, u32)> {
    game.scoreboard()
        .iter()
        .map(|e| (e.name.to_string(), e.score))
        .collect()
}

#[test]
fn test_two_open_players() {
    let mut game = game_with(&["Ann", "Bob"]);
    let mut throws = 0;
    while !game.is_game_complete() {
        for pins in [5, 5, 3] {
            game.add_throw(pins).unwrap();
            throws += 1;
        }
    }
    assert_eq!(throws, 2 * 5 * 3);
    for player in game.players() {
        let pins: u32 = player.frames().iter().map(|f| f.pins_knocked_down()).sum();
        assert_eq!(player.total_score(), pins);
        assert_eq!(player.total_score(), 65);
    }
    assert_eq!(game.add_throw(1), Err(BowlingError::GameComplete));
}

#[test]
fn test_perfect_game_alongside_misses() {
    let mut game = game_with(&["Ann", "Bob"]);
    for _ in 0..4 {
        game.add_throw(15).unwrap();
        for _ in 0..3 {
            game.add_throw(0).unwrap();
        }
    }
    // Last frames: Ann strikes out, Bob misses three times.
    for _ in 0..4 {
        game.add_throw(15).unwrap();
    }
    assert_eq!(game.current_player().unwrap().name(), "Bob");
    for _ in 0..3 {
        game.add_throw(0).unwrap();
    }
    assert!(game.is_game_complete());
    assert_eq!(
        scoreboard(&game),
        vec![("Ann".to_string(), 300), ("Bob".to_string(), 0)]
    );
}

#[test]
fn test_setup_preconditions() {
    let mut game = Game::new();
    game.add_player("Ann").unwrap();
    assert!(matches!(
        game.add_player("Ann"),
        Err(BowlingError::InvalidPlayer(_))
    ));
    assert_eq!(game.add_throw(3), Err(BowlingError::NotStarted));
    assert_eq!(
        game.start(),
        Err(BowlingError::InsufficientPlayers {
            required: 2,
            actual: 1
        })
    );
    game.add_player("Bob").unwrap();
    game.start().unwrap();
    assert!(game.is_started());
}

#[test]
fn test_turn_rotation_waits_for_bonus_throws() {
    let mut game = game_with(&["Ann", "Bob"]);
    for _ in 0..4 {
        for pins in [1, 1, 1, 1, 1, 1] {
            game.add_throw(pins).unwrap();
        }
    }
    // Ann's last frame: spare then two bonus throws, all before Bob plays.
    game.add_throw(7).unwrap();
    game.add_throw(8).unwrap();
    assert_eq!(game.current_player().unwrap().name(), "Ann");
    assert!(game.current_player().unwrap().needs_bonus_throws());
    game.add_throw(15).unwrap();
    game.add_throw(3).unwrap();
    assert_eq!(game.current_player().unwrap().name(), "Bob");
    assert!(!game.is_game_complete());

    for pins in [2, 2, 2] {
        game.add_throw(pins).unwrap();
    }
    assert!(game.is_game_complete());
}

#[test]
fn test_rejected_throw_changes_nothing() {
    let mut game = game_with(&["Ann", "Bob"]);
    game.add_throw(9).unwrap();
    let before = game.clone();
    assert!(game.add_throw(7).is_err());
    assert_eq!(game, before);
}

#[test]
fn test_scoreboard_is_stable_for_ties() {
    let mut game = game_with(&["Ann", "Bob", "Cy"]);
    while !game.is_game_complete() {
        let pins = if game.current_player_index() == 2 { 4 } else { 2 };
        game.add_throw(pins).unwrap();
    }
    assert_eq!(
        scoreboard(&game),
        vec![
            ("Cy".to_string(), 60),
            ("Ann".to_string(), 30),
            ("Bob".to_string(), 30),
        ]
    );
}

#[test]
fn test_snapshot_tracks_progress() {
    let mut game = game_with(&["Ann", "Bob"]);
    game.add_throw(15).unwrap();
    game.add_throw(3).unwrap();
    let snap = game.snapshot();
    assert!(snap.started);
    assert!(!snap.complete);
    assert_eq!(snap.current_player.as_deref(), Some("Bob"));
    assert_eq!(snap.remaining_pins, Some(12));
    let ann = snap.player("Ann").unwrap();
    assert_eq!(ann.total, 15);
    assert_eq!(ann.frames.len(), 1);
    assert!(ann.frames[0].completed);
}

fn replay(names: &[&str], throws: &[u8]) -> Game {
    let mut game = game_with(names);
    for &pins in throws {
        game.add_throw(pins).unwrap();
    }
    game
}

/// Throw list for one player, drawn so that every throw is legal.
fn legal_player_throws() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(0u8..=15, 40)
}

fn clamp_into(player: &mut Player, wishes: &[u8]) -> Vec<u8> {
    let mut taken = Vec::new();
    for &wish in wishes {
        if player.is_game_complete() {
            break;
        }
        let pins = wish.min(player.remaining_pins());
        player.add_throw(pins).unwrap();
        taken.push(pins);
    }
    taken
}

proptest! {
    #[test]
    fn prop_random_games_complete(wishes in legal_player_throws()) {
        let mut player = Player::new("P");
        clamp_into(&mut player, &wishes);
        // 40 throws always finish a game: at most 3 per frame plus 3 bonus throws.
        prop_assert!(player.is_game_complete());
        prop_assert_eq!(player.frames().len(), MAX_FRAMES);
        for frame in &player.frames()[..MAX_FRAMES - 1] {
            prop_assert!(frame.pins_knocked_down() <= 15);
            prop_assert!(!(frame.is_strike() && frame.is_spare()));
        }
    }

    #[test]
    fn prop_score_is_monotonic(wishes in legal_player_throws()) {
        let mut player = Player::new("P");
        clamp_into(&mut player, &wishes);
        let totals: Vec<u32> = (0..=MAX_FRAMES).map(|n| player.calculate_score(n)).collect();
        prop_assert!(totals.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(player.total_score() <= 300);
    }

    #[test]
    fn prop_replay_reproduces_scoreboard(a in legal_player_throws(), b in legal_player_throws()) {
        let mut game = game_with(&["Ann", "Bob"]);
        let mut log = Vec::new();
        let (mut ia, mut ib) = (a.iter(), b.iter());
        while !game.is_game_complete() {
            let wish = if game.current_player_index() == 0 { ia.next() } else { ib.next() };
            let pins = (*wish.unwrap_or(&0)).min(game.remaining_pins().unwrap());
            game.add_throw(pins).unwrap();
            log.push(pins);
        }
        let again = replay(&["Ann", "Bob"], &log);
        prop_assert_eq!(scoreboard(&again), scoreboard(&game));
        prop_assert_eq!(again.snapshot(), game.snapshot());
    }
}
