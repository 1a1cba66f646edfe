use serde::{Deserialize, Serialize};

use crate::*;

/// Composite view of the session flags.
///
/// Valid transitions:
/// - Pending -> Active, on the first reveal or flag
/// - Pending -> Won, when the first reveal clears the board
/// - Pending -> Lost, only for boards whose mines were placed up front
/// - Active -> Won
/// - Active -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Pending,
    Active,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// What a renderer should draw for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    /// Mine shown after a loss.
    Mine,
    /// The mine that ended the game.
    Exploded,
    /// Flag on a safe cell, only shown after a loss.
    IncorrectFlag,
}

/// One game from the first intent to a terminal state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    board: Board,
    game_over: bool,
    won: bool,
    first_move: bool,
    triggered_mine: Option<Coord2>,
}

impl Session {
    /// Session with a random seed.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_seed(config, rand::random())
    }

    /// Session whose mine layout only depends on `seed` and the first intent.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Ok(Self::from_board(Board::new(config, seed)?))
    }

    /// Wraps an existing board, mines already on it are kept.
    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            game_over: false,
            won: false,
            first_move: true,
            triggered_mine: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn is_first_move(&self) -> bool {
        self.first_move
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn state(&self) -> SessionState {
        match (self.game_over, self.won, self.first_move) {
            (true, true, _) => SessionState::Won,
            (true, false, _) => SessionState::Lost,
            (false, _, true) => SessionState::Pending,
            (false, _, false) => SessionState::Active,
        }
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<&Cell> {
        self.board.cell(coords)
    }

    pub fn mines_left(&self) -> isize {
        self.board.mines_left()
    }

    pub fn view_at(&self, coords: Coord2) -> Result<CellView> {
        let cell = self.board.cell(coords)?;
        let lost = self.state() == SessionState::Lost;

        Ok(match (cell.is_revealed(), cell.is_mine(), cell.is_flagged()) {
            (true, true, _) if self.triggered_mine == Some(coords) => CellView::Exploded,
            (true, true, _) => CellView::Mine,
            (true, false, _) => CellView::Revealed(cell.adjacent_mines()),
            (false, false, true) if lost => CellView::IncorrectFlag,
            (false, _, true) => CellView::Flagged,
            (false, _, false) => CellView::Hidden,
        })
    }

    /// Seeds the board on the first reveal or flag.
    fn start(&mut self, coords: Coord2) -> Result<()> {
        if !self.first_move {
            return Ok(());
        }
        if !self.board.mines_placed() {
            self.board.place_mines(coords)?;
        }
        self.first_move = false;
        log::debug!("Session started at {:?}", coords);
        Ok(())
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.grid().validate_coords(coords)?;
        if self.game_over {
            return Ok(RevealOutcome::NoChange);
        }
        self.start(coords)?;

        let outcome = self.board.reveal_cell(coords)?;
        Ok(self.settle(coords, outcome))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.board.grid().validate_coords(coords)?;
        if self.game_over {
            return Ok(MarkOutcome::NoChange);
        }
        self.start(coords)?;

        self.board.toggle_flag(coords)
    }

    pub fn chord(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.grid().validate_coords(coords)?;
        if self.game_over || self.first_move {
            return Ok(RevealOutcome::NoChange);
        }

        let outcome = self.board.chord_cell(coords)?;
        Ok(self.settle(coords, outcome))
    }

    /// Applies loss or win after a reveal or chord.
    fn settle(&mut self, coords: Coord2, outcome: RevealOutcome) -> RevealOutcome {
        if outcome.hit_mine() {
            self.triggered_mine = self.find_triggered_mine(coords);
            self.board.reveal_all_mines();
            self.end_game(false);
            return RevealOutcome::HitMine;
        }

        // boards handed to `from_board` can already be complete, so check even on no change
        if self.board.is_win() {
            self.end_game(true);
            return RevealOutcome::Won;
        }
        outcome
    }

    /// The revealed mine at `coords` or, after a chord, among its neighbors.
    fn find_triggered_mine(&self, coords: Coord2) -> Option<Coord2> {
        let grid = self.board.grid();
        core::iter::once(coords)
            .chain(grid.iter_neighbors(coords))
            .find(|&pos| grid[pos].is_mine() && grid[pos].is_revealed())
    }

    fn end_game(&mut self, won: bool) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        self.won = won;
        log::debug!("Game ended, won: {}", won);
    }
}
