//! Property tests for the session engine.
//!
//! Random command/tick streams are driven through the public API and the
//! following must hold after every step:
//! - the falling piece stays inside the grid and off the settled blocks
//! - a lock adds exactly four blocks, minus one full row per cleared line
//! - the level always equals cleared lines / lines_per_level
//! - replaying the recording rebuilds the same session
use droptris::{BOARD_WIDTH, Command, Game, GameEvent, Phase, Step};
use proptest::prelude::*;

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => Just(Step::Tick),
        2 => Just(Step::Command(Command::MoveLeft)),
        2 => Just(Step::Command(Command::MoveRight)),
        2 => Just(Step::Command(Command::Rotate)),
        1 => any::<bool>().prop_map(|on| Step::Command(Command::Accelerate(on))),
        1 => Just(Step::Command(Command::Pause)),
        1 => Just(Step::Command(Command::Resume)),
        1 => Just(Step::Command(Command::Replay)),
    ]
}

fn run(game: &mut Game, step: Step) {
    match step {
        Step::Command(command) => {
            game.apply(command);
        }
        Step::Tick => {
            game.tick();
        }
    }
}

fn assert_piece_placed(game: &Game) {
    if !matches!(game.phase(), Phase::Playing | Phase::Paused) {
        return;
    }
    for (col, row) in game.current_piece().cells() {
        assert_eq!(game.board().get(col, row), Some(false), "piece cell ({col}, {row})");
    }
}

#[test]
fn fixed_seed_session_reaches_game_over() {
    let mut game = Game::with_seed(20240601);
    game.apply(Command::Start);

    // Dropping everything straight down must eventually top out
    for _ in 0..10_000 {
        if game.phase() == Phase::GameOver {
            break;
        }
        game.tick();
        assert_piece_placed(&game);
    }

    assert_eq!(game.phase(), Phase::GameOver);
    let events = game.take_events();
    assert!(events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
    assert!(!game.board().is_empty());
}

proptest! {
    #[test]
    fn random_streams_respect_invariants(
        seed in any::<u64>(),
        steps in prop::collection::vec(step_strategy(), 1..400),
    ) {
        let mut game = Game::with_seed(seed);
        game.apply(Command::Start);
        let per_level = game.rules().lines_per_level;

        for step in steps {
            let filled_before = game.board().filled_count();
            let lines_before = game.score().lines;
            let points_before = game.score().points;
            let was_over = game.phase() == Phase::GameOver;

            run(&mut game, step);
            assert_piece_placed(&game);

            let restarted = was_over && game.phase() == Phase::Playing;
            if restarted {
                prop_assert!(game.board().is_empty());
                prop_assert_eq!(game.score().points, 0);
                continue;
            }

            let cleared = (game.score().lines - lines_before) as usize;
            let filled_after = game.board().filled_count();
            if filled_after != filled_before || cleared > 0 {
                prop_assert_eq!(filled_after + cleared * BOARD_WIDTH, filled_before + 4);
            }
            prop_assert!(cleared <= 4);
            prop_assert!(game.score().points >= points_before);
            prop_assert_eq!(game.score().level, game.score().lines / per_level);
        }

        let replayed = game.recording().replay();
        prop_assert_eq!(replayed.snapshot(), game.snapshot());
        prop_assert_eq!(replayed.recording(), game.recording());
    }

    #[test]
    fn rotation_sequences_stay_in_bounds(
        seed in any::<u64>(),
        moves in prop::collection::vec(0u8..3, 0..60),
    ) {
        let mut game = Game::with_seed(seed);
        game.apply(Command::Start);

        for m in moves {
            let command = match m {
                0 => Command::MoveLeft,
                1 => Command::MoveRight,
                _ => Command::Rotate,
            };
            game.apply(command);
            let piece = *game.current_piece();
            for (col, row) in piece.cells() {
                prop_assert!((0..BOARD_WIDTH as i32).contains(&col));
                prop_assert!(row >= 0);
            }
            prop_assert!(piece.rotation < piece.kind.rotation_count());
        }
    }
}
