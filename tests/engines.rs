//! Engine invariants driven through the public API with generated seeds
//! and input scripts.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use calmcade::engine::minesweeper::{
    Board, Minesweeper, MinesweeperConfig, RevealOutcome, BOARD_SIZE, MINES_COUNT,
};
use calmcade::engine::snake::{Direction, Snake, TickOutcome};
use calmcade::engine::tetris::{
    MoveOutcome, SequenceShapes, ShapeKind, Tetris, BOARD_HEIGHT, BOARD_WIDTH,
};

fn direction(n: u8) -> Direction {
    match n % 4 {
        0 => Direction::Up,
        1 => Direction::Down,
        2 => Direction::Left,
        _ => Direction::Right,
    }
}

proptest! {
    #[test]
    fn generated_boards_have_exact_mines_and_counts(seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let board = Board::generate(BOARD_SIZE, BOARD_SIZE, MINES_COUNT, &mut rng).unwrap();

        prop_assert_eq!(board.mine_count(), MINES_COUNT);
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                let cell = board.cell(x, y).unwrap();
                if cell.is_mine {
                    continue;
                }
                let expected = board
                    .neighbors(x, y)
                    .filter(|&(nx, ny)| board.cell(nx, ny).is_some_and(|c| c.is_mine))
                    .count();
                prop_assert_eq!(cell.neighbor_mines as usize, expected);
            }
        }
    }

    #[test]
    fn reveal_score_matches_opened_cells(seed in any::<u64>(), picks in prop::collection::vec((0..BOARD_SIZE, 0..BOARD_SIZE), 1..30)) {
        let mut game = Minesweeper::new(MinesweeperConfig::default(), Some(seed)).unwrap();
        for (x, y) in picks {
            if game.state().is_over() {
                break;
            }
            match game.reveal(x, y).unwrap() {
                RevealOutcome::HitMine => {
                    prop_assert!(game.board().rows().flatten().filter(|c| c.is_mine).all(|c| c.is_revealed));
                }
                _ => prop_assert_eq!(game.score() as usize, game.board().revealed_count()),
            }
        }
    }

    #[test]
    fn snake_grows_by_at_most_one_per_tick(seed in any::<u64>(), turns in prop::collection::vec(any::<u8>(), 1..200)) {
        let mut snake = Snake::new(Some(seed));
        for turn in turns {
            snake.set_direction(direction(turn));
            let before: Vec<_> = snake.body().iter().copied().collect();
            match snake.tick() {
                TickOutcome::Moved => prop_assert_eq!(snake.len(), before.len()),
                TickOutcome::Ate => prop_assert_eq!(snake.len(), before.len() + 1),
                TickOutcome::Crashed(_) => {
                    let after: Vec<_> = snake.body().iter().copied().collect();
                    prop_assert_eq!(after, before);
                    prop_assert!(snake.phase().is_over());
                    break;
                }
                TickOutcome::Idle => prop_assert!(false, "active snake did not move"),
            }
        }
    }

    #[test]
    fn minesweeper_is_deterministic_per_seed(seed in any::<u64>(), picks in prop::collection::vec((0..BOARD_SIZE, 0..BOARD_SIZE), 1..20)) {
        let config = MinesweeperConfig::default();
        let mut a = Minesweeper::new(config, Some(seed)).unwrap();
        let mut b = Minesweeper::new(config, Some(seed)).unwrap();
        prop_assert_eq!(a.board(), b.board());

        for (x, y) in picks {
            prop_assert_eq!(a.reveal(x, y).unwrap(), b.reveal(x, y).unwrap());
            prop_assert_eq!(a.board(), b.board());
            prop_assert_eq!(a.score(), b.score());
            prop_assert_eq!(a.state(), b.state());
        }

        // The regenerated boards come from the same RNG stream too.
        a.new_game();
        b.new_game();
        prop_assert_eq!(a.board(), b.board());
        prop_assert_eq!(a.board().mine_count(), MINES_COUNT);
    }

    #[test]
    fn snake_is_deterministic_per_seed(seed in any::<u64>(), turns in prop::collection::vec(any::<u8>(), 0..100)) {
        let mut a = Snake::new(Some(seed));
        let mut b = Snake::new(Some(seed));

        // Walk onto the starting food at (15, 15) so both relocate it.
        let opening = [Direction::Down; 5].into_iter().chain([Direction::Right; 5]);
        for (step, heading) in opening.enumerate() {
            if step == 0 || step == 5 {
                a.set_direction(heading);
                b.set_direction(heading);
            }
            prop_assert_eq!(a.tick(), b.tick());
        }
        prop_assert_eq!(a.score(), 1);
        prop_assert_eq!(a.food(), b.food());

        for turn in turns {
            a.set_direction(direction(turn));
            b.set_direction(direction(turn));
            prop_assert_eq!(a.tick(), b.tick());
            prop_assert!(a.body().iter().eq(b.body().iter()));
            prop_assert_eq!(a.food(), b.food());
            prop_assert_eq!(a.score(), b.score());
        }
    }

    #[test]
    fn tetris_is_deterministic_per_seed(seed in any::<u64>(), moves in prop::collection::vec(0u8..4, 1..150)) {
        let mut a = Tetris::new(Some(seed));
        let mut b = Tetris::new(Some(seed));
        for m in moves {
            let step = |t: &mut Tetris| match m {
                0 => t.move_piece(-1, 0),
                1 => t.move_piece(1, 0),
                2 => {
                    t.rotate();
                    MoveOutcome::Moved
                }
                _ => t.tick(),
            };
            prop_assert_eq!(step(&mut a), step(&mut b));
            prop_assert_eq!(a.board(), b.board());
            prop_assert_eq!(a.piece(), b.piece());
            prop_assert_eq!(a.score(), b.score());
        }
    }
}

#[test]
fn single_mine_board_opens_everything_else() {
    let board = Board::from_mines(BOARD_SIZE, BOARD_SIZE, &[(0, 0)]).unwrap();
    let mut game = Minesweeper::from_board(board, MinesweeperConfig::default());

    assert_eq!(game.reveal(9, 9).unwrap(), RevealOutcome::Revealed(99));
    assert_eq!(game.score(), 99);
    assert!(!game.board().cell(0, 0).unwrap().is_revealed);
    assert!(!game.state().is_over());
}

#[test]
fn flag_toggle_is_idempotent() {
    let mut game = Minesweeper::new(MinesweeperConfig::default(), Some(11)).unwrap();
    let before = *game.board().cell(4, 4).unwrap();

    game.toggle_flag(4, 4).unwrap();
    game.toggle_flag(4, 4).unwrap();

    assert_eq!(*game.board().cell(4, 4).unwrap(), before);
    assert_eq!(game.flags_placed(), 0);
}

#[test]
fn snake_ignores_reversal() {
    let mut snake = Snake::new(Some(2));
    let start = snake.head();
    assert!(!snake.set_direction(Direction::Left));
    snake.tick();
    assert_eq!(snake.head().x, start.x + 1);
    assert_eq!(snake.head().y, start.y);
}

#[test]
fn vertical_i_in_every_column_clears_four_rows() {
    let mut game = Tetris::with_source(SequenceShapes::new(vec![ShapeKind::I]).unwrap());

    for column in 0..BOARD_WIDTH as i32 {
        assert!(game.rotate());
        let x = game.piece().position.x;
        let step = if column < x { -1 } else { 1 };
        for _ in 0..(column - x).abs() {
            assert_eq!(game.move_piece(step, 0), MoveOutcome::Moved);
        }
        while let MoveOutcome::Moved = game.tick() {}
    }

    assert_eq!(game.score(), 400);
    assert_eq!(game.board().locked_count(), 0);
    assert!(game.board().rows().len() == BOARD_HEIGHT);
    assert!(!game.phase().is_over());
}
