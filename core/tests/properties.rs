use mineboard_core::*;

const SEEDS: u64 = 64;

fn placed_board(size: Coord2, mines: CellCount, seed: u64, exclude: Coord2) -> Board {
    let mut board = Board::new(GameConfig::new(size, mines).unwrap(), seed).unwrap();
    board.place_mines(exclude).unwrap();
    board
}

fn all_coords(size: Coord2) -> impl Iterator<Item = Coord2> {
    let (rows, cols) = size;
    (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
}

#[test]
fn placement_invariants_hold_for_many_seeds() {
    let size = (7, 9);
    for seed in 0..SEEDS {
        let exclude = ((seed % 7) as Coord, (seed % 9) as Coord);
        let board = placed_board(size, 20, seed, exclude);
        let grid = board.grid();

        assert_eq!(grid.count(Cell::is_mine), 20);
        assert!(!grid[exclude].is_mine());

        for (coords, cell) in grid.iter() {
            if cell.is_mine() {
                continue;
            }
            let expected = grid
                .iter_neighbors(coords)
                .filter(|&pos| grid[pos].is_mine())
                .count() as u8;
            assert_eq!(cell.adjacent_mines(), expected, "seed {seed} at {coords:?}");
        }
    }
}

#[test]
fn revealed_cells_never_close_or_get_flagged() {
    for seed in 0..SEEDS {
        let mut session = Session::with_seed(GameConfig::new((6, 6), 6).unwrap(), seed).unwrap();
        session.reveal((3, 3)).unwrap();

        let opened: Vec<Coord2> = all_coords(session.size())
            .filter(|&pos| session.cell_at(pos).unwrap().is_revealed())
            .collect();

        for &pos in &opened {
            session.toggle_flag(pos).unwrap();
            session.reveal(pos).unwrap();
            session.chord(pos).unwrap();
            if session.is_game_over() {
                break;
            }
        }
        for &pos in &opened {
            let cell = session.cell_at(pos).unwrap();
            assert!(cell.is_revealed());
            assert!(!cell.is_flagged());
        }
    }
}

#[test]
fn flood_fill_reveals_zero_region_and_border_only() {
    for seed in 0..SEEDS {
        let size = (10, 10);
        let mut board = placed_board(size, 12, seed, (0, 0));
        let Some(start) = all_coords(size).find(|&pos| {
            let cell = board.grid()[pos];
            !cell.is_mine() && cell.adjacent_mines() == 0
        }) else {
            continue;
        };

        // expected region computed independently with a breadth-first search
        let grid = board.grid().clone();
        let mut zeros = vec![start];
        let mut expected = vec![start];
        while let Some(pos) = zeros.pop() {
            for next in grid.iter_neighbors(pos) {
                if expected.contains(&next) {
                    continue;
                }
                expected.push(next);
                if grid[next].adjacent_mines() == 0 {
                    zeros.push(next);
                }
            }
        }

        board.reveal_cell(start).unwrap();

        for pos in all_coords(size) {
            assert_eq!(
                board.grid()[pos].is_revealed(),
                expected.contains(&pos),
                "seed {seed} at {pos:?}"
            );
            if board.grid()[pos].is_revealed() {
                assert!(!board.grid()[pos].is_mine());
            }
        }
    }
}

#[test]
fn win_matches_revealed_count() {
    for seed in 0..SEEDS {
        let mut board = placed_board((5, 5), 5, seed, (2, 2));
        let safe: Vec<Coord2> = all_coords((5, 5))
            .filter(|&pos| !board.grid()[pos].is_mine())
            .collect();

        for &pos in &safe {
            assert_eq!(board.is_win(), board.revealed_count() == 25 - 5);
            board.reveal_cell(pos).unwrap();
        }
        assert!(board.is_win());
        assert_eq!(board.revealed_count(), 25 - 5);
    }
}

#[test]
fn first_reveal_never_loses() {
    for seed in 0..SEEDS {
        for start in all_coords((4, 4)) {
            let mut session =
                Session::with_seed(GameConfig::new((4, 4), 15).unwrap(), seed).unwrap();

            let outcome = session.reveal(start).unwrap();

            assert_eq!(outcome, RevealOutcome::Won);
            assert_eq!(session.state(), SessionState::Won);
        }
    }
}

#[test]
fn first_reveal_with_always_zero_opens_an_area() {
    for seed in 0..SEEDS {
        let config = GameConfig::new((8, 8), 10)
            .unwrap()
            .with_start_tile(StartTile::AlwaysZero);
        let mut session = Session::with_seed(config, seed).unwrap();

        session.reveal((4, 4)).unwrap();

        assert_eq!(session.view_at((4, 4)), Ok(CellView::Revealed(0)));
        assert!(session.board().revealed_count() >= 9);
    }
}

#[test]
fn random_play_respects_terminal_state() {
    for seed in 0..SEEDS {
        let mut session = Session::with_seed(GameConfig::new((6, 6), 8).unwrap(), seed).unwrap();

        for (step, pos) in all_coords((6, 6)).enumerate() {
            let before = session.clone();
            let finished = session.is_game_over();
            let updated = match step % 3 {
                0 => session.reveal(pos).unwrap().has_update(),
                1 => session.toggle_flag(pos).unwrap().has_update(),
                _ => session.chord(pos).unwrap().has_update(),
            };
            if finished {
                assert!(!updated);
                assert_eq!(session, before);
            }
        }

        if session.state() == SessionState::Won {
            assert!(session.board().is_win());
        }
        if session.state() == SessionState::Lost {
            let grid = session.board().grid();
            assert!(grid.iter().all(|(_, cell)| !cell.is_mine() || cell.is_revealed()));
            assert!(session.triggered_mine().is_some());
        }
    }
}
