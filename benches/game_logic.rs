use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ancient_bowling::core::{calculate_score, Game, Player};

fn bench_perfect_game(c: &mut Criterion) {
    c.bench_function("perfect_game_two_players", |b| {
        b.iter(|| {
            let mut game = Game::new();
            game.add_player("Ann").unwrap();
            game.add_player("Bob").unwrap();
            game.start().unwrap();
            while !game.is_game_complete() {
                game.add_throw(black_box(15)).unwrap();
            }
            game
        })
    });
}

fn bench_scoring(c: &mut Criterion) {
    let mut player = Player::new("Ann");
    for pins in [15, 7, 8, 5, 3, 2, 15, 6, 4, 3] {
        player.add_throw(pins).unwrap();
    }

    c.bench_function("calculate_score_5_frames", |b| {
        b.iter(|| calculate_score(black_box(player.frames()), black_box(5)))
    });
}

fn bench_scoreboard(c: &mut Criterion) {
    let mut game = Game::new();
    for i in 0..10 {
        game.add_player(&format!("P{i}")).unwrap();
    }
    game.start().unwrap();
    let mut pins = 0u8;
    while !game.is_game_complete() {
        let throw = pins.min(game.remaining_pins().unwrap_or(0));
        game.add_throw(throw).unwrap();
        pins = (pins + 4) % 16;
    }

    c.bench_function("scoreboard_10_players", |b| {
        b.iter(|| black_box(&game).scoreboard().len())
    });
}

criterion_group!(benches, bench_perfect_game, bench_scoring, bench_scoreboard);
criterion_main!(benches);
