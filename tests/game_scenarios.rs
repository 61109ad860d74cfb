use chocosweeper::{
    Board, Difficulty, FlagOutcome, Game, GameConfig, GameEvent, GameStatus, Position,
    RevealOutcome,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex};

fn record(game: &mut Game) -> Arc<Mutex<Vec<GameEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    game.subscribe(move |event: &GameEvent| sink.lock().unwrap().push(*event));
    events
}

fn all_positions(rows: u32, columns: u32) -> impl Iterator<Item = Position> {
    (0..rows as i32).flat_map(move |row| (0..columns as i32).map(move |col| Position::new(row, col)))
}

fn neighbor_mines(board: &Board, pos: Position) -> u8 {
    let mut count = 0;
    for row in pos.row - 1..=pos.row + 1 {
        for col in pos.col - 1..=pos.col + 1 {
            let other = Position::new(row, col);
            if other != pos && board.cell(other).is_some_and(|c| c.has_mine()) {
                count += 1;
            }
        }
    }
    count
}

#[test]
fn test_beginner_first_click_is_safe() {
    for seed in 0..100 {
        let config = GameConfig::from_difficulty(Difficulty::Beginner);
        let mut game = Game::with_rng(config, StdRng::seed_from_u64(seed)).unwrap();

        let outcome = game.reveal(Position::new(4, 4)).unwrap();

        assert_ne!(outcome, RevealOutcome::HitMine, "seed {seed}");
        assert!(!game.cell(Position::new(4, 4)).unwrap().has_mine());
        assert_eq!(game.board().cells().filter(|c| c.has_mine()).count(), 10);
        assert_ne!(game.status(), GameStatus::Lost);
    }
}

#[test]
fn test_win_on_single_mine_board() {
    let mine = Position::new(3, 1);
    let mut game = Game::from_board(Board::with_mines(5, 5, &[mine]).unwrap());
    let events = record(&mut game);

    for pos in all_positions(5, 5).filter(|&p| p != mine) {
        game.reveal(pos).unwrap();
    }

    assert_eq!(game.status(), GameStatus::Won);
    assert_eq!(game.revealed_count(), 24);
    assert!(game.cell(mine).unwrap().is_flagged());
    assert!(!game.cell(mine).unwrap().is_revealed());
    assert_eq!(game.flag_count(), 1);
    assert_eq!(game.mines_remaining(), 0);

    let events = events.lock().unwrap();
    let n = events.len();
    assert!(matches!(events[n - 3], GameEvent::CellFlagged(cell) if cell.position() == mine));
    assert_eq!(events[n - 2], GameEvent::GameWon);
    assert_eq!(events[n - 1], GameEvent::StatusChanged(GameStatus::Won));
}

#[test]
fn test_win_does_not_need_flags() {
    let mines = [Position::new(0, 0), Position::new(4, 4)];
    let mut game = Game::from_board(Board::with_mines(5, 5, &mines).unwrap());

    assert_eq!(game.reveal(Position::new(2, 2)).unwrap(), RevealOutcome::Won);
    assert_eq!(game.flag_count(), 2);
}

#[test]
fn test_win_keeps_player_flags() {
    let mines = [Position::new(0, 0), Position::new(4, 4)];
    let mut game = Game::from_board(Board::with_mines(5, 5, &mines).unwrap());
    game.toggle_flag(Position::new(0, 0)).unwrap();

    assert_eq!(game.reveal(Position::new(2, 2)).unwrap(), RevealOutcome::Won);
    assert_eq!(game.flag_count(), 2);
}

#[test]
fn test_forced_mine_loses() {
    let mines = [Position::new(0, 0), Position::new(2, 3), Position::new(4, 4)];
    let mut game = Game::from_board(Board::with_mines(5, 5, &mines).unwrap());
    let events = record(&mut game);

    assert_eq!(game.reveal(Position::new(0, 0)).unwrap(), RevealOutcome::HitMine);

    assert_eq!(game.status(), GameStatus::Lost);
    assert!(game
        .board()
        .cells()
        .filter(|c| c.has_mine())
        .all(|c| c.is_revealed()));
    assert!(events
        .lock()
        .unwrap()
        .contains(&GameEvent::StatusChanged(GameStatus::Lost)));
}

#[test]
fn test_reveal_flagged_cell_is_noop() {
    let mut game = Game::from_board(Board::with_mines(5, 5, &[Position::new(4, 4)]).unwrap());
    game.toggle_flag(Position::new(0, 0)).unwrap();
    let events = record(&mut game);
    let before: Vec<_> = game.board().cells().copied().collect();

    assert_eq!(game.reveal(Position::new(0, 0)).unwrap(), RevealOutcome::NoChange);

    let after: Vec<_> = game.board().cells().copied().collect();
    assert_eq!(before, after);
    assert_eq!(game.revealed_count(), 0);
    assert!(events.lock().unwrap().is_empty());
}

#[test]
fn test_flag_events_and_counts() {
    let mut game = Game::new(GameConfig::default()).unwrap();
    let events = record(&mut game);
    let pos = Position::new(2, 7);

    assert_eq!(game.toggle_flag(pos).unwrap(), FlagOutcome::Flagged);
    assert_eq!(game.toggle_flag(pos).unwrap(), FlagOutcome::Unflagged);
    assert_eq!(game.flag_count(), 0);

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0], GameEvent::StatusChanged(GameStatus::InProgress));
    assert!(matches!(events[1], GameEvent::CellFlagged(cell) if cell.is_flagged()));
    assert!(matches!(events[2], GameEvent::CellFlagged(cell) if !cell.is_flagged()));
}

#[test]
fn test_elapsed_time_lifecycle() {
    let mut game = Game::from_board(Board::with_mines(5, 5, &[Position::new(0, 0)]).unwrap());
    assert_eq!(game.elapsed_seconds(), 0);

    game.toggle_flag(Position::new(1, 1)).unwrap();
    let first = game.state().elapsed();
    let second = game.state().elapsed();
    assert!(second >= first);

    game.reveal(Position::new(0, 0)).unwrap();
    let frozen = game.state().elapsed();
    std::thread::sleep(std::time::Duration::from_millis(5));
    assert_eq!(game.state().elapsed(), frozen);
    assert!(game.state().end_time().is_some());
}

#[test]
fn test_session_is_send() {
    fn assert_send<T: Send>() {}
    assert_send::<Game>();

    let game = Arc::new(Mutex::new(Game::new(GameConfig::default()).unwrap()));
    let worker = Arc::clone(&game);
    std::thread::spawn(move || {
        worker.lock().unwrap().reveal(Position::new(0, 0)).unwrap();
    })
    .join()
    .unwrap();
    assert!(game.lock().unwrap().board().mines_placed());
}

proptest! {
    #[test]
    fn prop_config_is_always_constructible(rows in 0u32..200, columns in 0u32..200, mines in 0u32..20_000) {
        let config = GameConfig::custom(rows, columns, mines);
        prop_assert!((5..=50).contains(&config.rows()));
        prop_assert!((5..=50).contains(&config.columns()));
        prop_assert!(config.mine_count() >= 1);
        prop_assert!(config.mine_count() <= config.total_cells() - 1);
        prop_assert!(Game::new(config).is_ok());
    }

    #[test]
    fn prop_placement_and_adjacency(
        seed in any::<u64>(),
        rows in 5u32..20,
        columns in 5u32..20,
        density in 0.0f64..1.0,
        safe_row in 0i32..20,
        safe_col in 0i32..20,
    ) {
        let mines = ((rows * columns - 1) as f64 * density) as u32;
        let config = GameConfig::custom(rows, columns, mines);
        let mut board = Board::new(config.rows(), config.columns(), config.mine_count()).unwrap();
        let safe = Position::new(safe_row % rows as i32, safe_col % columns as i32);
        board.place_mines(safe, &mut StdRng::seed_from_u64(seed)).unwrap();

        prop_assert_eq!(board.cells().filter(|c| c.has_mine()).count() as u32, config.mine_count());
        prop_assert!(!board.cell(safe).unwrap().has_mine());
        for cell in board.cells().filter(|c| !c.has_mine()) {
            prop_assert_eq!(cell.adjacent_mines(), neighbor_mines(&board, cell.position()));
        }
    }

    #[test]
    fn prop_each_cell_revealed_at_most_once(seed in any::<u64>(), moves in prop::collection::vec((0i32..9, 0i32..9, any::<bool>()), 1..60)) {
        let mut game = Game::with_rng(GameConfig::default(), StdRng::seed_from_u64(seed)).unwrap();
        let events = record(&mut game);

        for (row, col, flag) in moves {
            let pos = Position::new(row, col);
            if flag {
                game.toggle_flag(pos).unwrap();
            } else {
                game.reveal(pos).unwrap();
            }
        }

        let events = events.lock().unwrap();
        let mut revealed: Vec<Position> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::CellRevealed(cell) => Some(cell.position()),
                _ => None,
            })
            .collect();
        let total = revealed.len();
        revealed.sort();
        revealed.dedup();
        prop_assert_eq!(revealed.len(), total);

        let revealed_safe = game.board().cells().filter(|c| c.is_revealed() && !c.has_mine()).count() as u32;
        let revealed_mines = game.board().cells().filter(|c| c.is_revealed() && c.has_mine()).count() as u32;
        let expected = revealed_safe + u32::from(game.status() == GameStatus::Lost);
        prop_assert_eq!(game.revealed_count(), expected);
        if game.status() != GameStatus::Lost {
            prop_assert_eq!(revealed_mines, 0);
        }
        if game.status() == GameStatus::Won {
            prop_assert_eq!(revealed_safe, game.board().safe_cell_count());
        }
    }

    #[test]
    fn prop_toggle_flag_twice_is_identity(seed in any::<u64>(), row in 0i32..9, col in 0i32..9) {
        let mut game = Game::with_rng(GameConfig::default(), StdRng::seed_from_u64(seed)).unwrap();
        game.reveal(Position::new(4, 4)).unwrap();
        prop_assume!(game.status() == GameStatus::InProgress);

        let pos = Position::new(row, col);
        prop_assume!(!game.cell(pos).unwrap().is_revealed());
        let flagged = game.cell(pos).unwrap().is_flagged();
        let count = game.flag_count();

        game.toggle_flag(pos).unwrap();
        game.toggle_flag(pos).unwrap();

        prop_assert_eq!(game.cell(pos).unwrap().is_flagged(), flagged);
        prop_assert_eq!(game.flag_count(), count);
    }
}
