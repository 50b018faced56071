use std::io::Cursor;

use battlesalvo::config::default_fleet_spec;
use battlesalvo::{AiPlayer, ConsolePlayer, CoordStatus, GameResult, LocalGame, Player, PlayerError};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_ai_vs_ai_game() {
    for seed in 0..8u64 {
        let p1 = AiPlayer::new("one", SmallRng::seed_from_u64(seed));
        let p2 = AiPlayer::new("two", SmallRng::seed_from_u64(seed + 100));
        let mut game = LocalGame::new(p1, p2, 10, 10, default_fleet_spec());
        let result = game.run().unwrap();

        let (one, two) = (game.first(), game.second());
        match result {
            GameResult::Win => {
                assert!(one.ships_afloat() > 0);
                assert_eq!(two.ships_afloat(), 0);
            }
            GameResult::Lose => {
                assert_eq!(one.ships_afloat(), 0);
                assert!(two.ships_afloat() > 0);
            }
            GameResult::Draw => {
                assert_eq!(one.ships_afloat(), 0);
                assert_eq!(two.ships_afloat(), 0);
            }
        }
    }
}

#[test]
fn test_small_board_game_finishes() {
    let p1 = AiPlayer::new("one", SmallRng::seed_from_u64(1));
    let p2 = AiPlayer::new("two", SmallRng::seed_from_u64(2));
    let mut game = LocalGame::new(p1, p2, 6, 6, default_fleet_spec());
    game.run().unwrap();
    let grid = game.first().state().opponent();
    let fired = grid.count(CoordStatus::Hit) + grid.count(CoordStatus::Miss);
    // a whole fleet is 18 cells, so at least that many shots landed somewhere
    assert!(fired >= 18 || game.second().ships_afloat() > 0);
    assert!(fired <= 36);
}

#[test]
fn test_console_player_quitting_ends_game_with_error() {
    let human = ConsolePlayer::new(
        "human",
        Cursor::new(b"0 0\n1 1\n".to_vec()),
        Vec::new(),
        SmallRng::seed_from_u64(5),
    );
    let ai = AiPlayer::new("ai", SmallRng::seed_from_u64(6));
    let mut game = LocalGame::new(human, ai, 8, 8, default_fleet_spec());
    assert!(matches!(game.run(), Err(PlayerError::InputClosed)));
}
