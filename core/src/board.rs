use serde::{Deserialize, Serialize};

use crate::*;

/// Grid plus mine metadata, implements every rule that touches cells.
///
/// Mines are placed lazily, exactly once, so the caller can keep the first move safe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    grid: Grid,
    total_mines: CellCount,
    mines_placed: bool,
    seed: u64,
    start_tile: StartTile,
}

impl Board {
    /// Empty board for `config`, mines will be generated from `seed` on [`Board::place_mines`].
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        // fields are public, so re-check what `GameConfig::new` enforces
        let checked = GameConfig::new(config.size, config.mines)?;
        Ok(Self {
            grid: Grid::new(checked.size),
            total_mines: checked.mines,
            mines_placed: false,
            seed,
            start_tile: config.start_tile,
        })
    }

    /// Board with mines already placed at `mines`, duplicates count once.
    pub fn with_mines(size: Coord2, mines: &[Coord2]) -> Result<Self> {
        let (rows, cols) = size;
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidSize);
        }
        if mines.iter().any(|&(row, col)| row >= rows || col >= cols) {
            return Err(GameError::InvalidCoords);
        }

        let mut board = Self {
            grid: Grid::new(size),
            total_mines: 0,
            mines_placed: false,
            seed: 0,
            start_tile: StartTile::default(),
        };
        board.place_with(FixedMineGenerator::new(mines))?;
        if board.total_mines >= board.grid.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(board)
    }

    pub fn config(&self) -> GameConfig {
        GameConfig {
            size: self.grid.size(),
            mines: self.total_mines,
            start_tile: self.start_tile,
        }
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.total_mines
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        self.grid.get(coords)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.grid.count(Cell::is_revealed)
    }

    pub fn flag_count(&self) -> CellCount {
        self.grid.count(Cell::is_flagged)
    }

    /// Mines not yet accounted for by flags, negative when over-flagged.
    pub fn mines_left(&self) -> isize {
        (self.total_mines as isize) - (self.flag_count() as isize)
    }

    /// Places mines randomly anywhere except around `exclude`, as the start tile policy dictates.
    pub fn place_mines(&mut self, exclude: Coord2) -> Result<()> {
        let exclude = self.grid.validate_coords(exclude)?;
        self.place_with(RandomMineGenerator::new(self.seed, exclude, self.start_tile))
    }

    /// Places mines from `generator` and computes adjacency counts, refuses to run twice.
    pub fn place_with(&mut self, generator: impl MineGenerator) -> Result<()> {
        if self.mines_placed {
            log::warn!("Ignoring second mine placement request");
            return Err(GameError::MinesAlreadyPlaced);
        }

        let mask = generator.generate(&self.config());
        if mask.dim() != (usize::from(self.grid.rows()), usize::from(self.grid.cols())) {
            return Err(GameError::InvalidBoardShape);
        }

        for ((row, col), &mine) in mask.indexed_iter() {
            if mine {
                self.grid[(row as Coord, col as Coord)].set_mine();
            }
        }
        self.total_mines = self.grid.count(Cell::is_mine);
        self.calculate_adjacent_mines();
        self.mines_placed = true;
        log::debug!("Placed {} mines on {:?} board", self.total_mines, self.size());
        Ok(())
    }

    fn calculate_adjacent_mines(&mut self) {
        let (rows, cols) = self.grid.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                if self.grid[coords].is_mine() {
                    continue;
                }
                let count = self.grid.count_neighbors(coords, Cell::is_mine);
                self.grid[coords].set_adjacent_mines(count);
            }
        }
    }

    /// Reveals a cell, flooding outwards from zero cells.
    ///
    /// Flagged or already revealed cells give `NoChange`. A mine gives `HitMine` and is left
    /// revealed, the caller decides what losing means.
    pub fn reveal_cell(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.grid.validate_coords(coords)?;

        let cell = &mut self.grid[coords];
        if !cell.reveal() {
            return Ok(RevealOutcome::NoChange);
        }
        if cell.is_mine() {
            log::debug!("Revealed mine at {:?}", coords);
            return Ok(RevealOutcome::HitMine);
        }

        let count = cell.adjacent_mines();
        log::debug!("Revealed cell at {:?}, mine count: {}", coords, count);
        if count == 0 {
            self.flood_from(coords);
        }
        Ok(RevealOutcome::Revealed)
    }

    /// Reveals the zero region around an already revealed zero cell plus its numbered border.
    fn flood_from(&mut self, origin: Coord2) {
        let mut pending: Vec<Coord2> = self.hidden_safe_neighbors(origin).collect();
        log::trace!("Starting flood-fill from {:?}, initial neighbors: {:?}", origin, pending);

        while let Some(coords) = pending.pop() {
            let cell = &mut self.grid[coords];
            // flagged cells stay closed, cells can be queued more than once
            if !cell.reveal() {
                continue;
            }

            let count = cell.adjacent_mines();
            log::trace!("Flood revealed cell at {:?}, mine count: {}", coords, count);
            if count == 0 {
                pending.extend(self.hidden_safe_neighbors(coords));
            }
        }
    }

    fn hidden_safe_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        self.grid.iter_neighbors(coords).filter(|&pos| {
            let cell = &self.grid[pos];
            !cell.is_revealed() && !cell.is_mine()
        })
    }

    /// Flips the flag on a hidden cell.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.grid.validate_coords(coords)?;

        let cell = &mut self.grid[coords];
        let was_flagged = cell.is_flagged();
        cell.toggle_flag();

        Ok(if cell.is_flagged() == was_flagged {
            MarkOutcome::NoChange
        } else {
            MarkOutcome::Changed
        })
    }

    /// Every safe cell is revealed.
    pub fn is_win(&self) -> bool {
        self.grid
            .iter()
            .all(|(_, cell)| cell.is_mine() || cell.is_revealed())
    }

    /// Shows every mine, flagged or not.
    pub fn reveal_all_mines(&mut self) {
        for cell in self.grid.iter_mut().filter(|cell| cell.is_mine()) {
            cell.force_reveal();
        }
    }

    /// Whether [`Board::chord_cell`] at `coords` would reveal anything or hit a mine.
    pub fn can_chord_at(&self, coords: Coord2) -> bool {
        let Ok(cell) = self.cell(coords) else {
            return false;
        };
        if !cell.is_revealed() || cell.is_mine() {
            return false;
        }
        self.grid.count_neighbors(coords, Cell::is_flagged) == cell.adjacent_mines()
            && self
                .grid
                .iter_neighbors(coords)
                .any(|pos| !self.grid[pos].is_revealed() && !self.grid[pos].is_flagged())
    }

    /// Reveals all unflagged neighbors of a revealed number whose flag count matches it.
    ///
    /// Neighbors are visited row-major, the first mine stops the chord with `HitMine` and leaves
    /// later neighbors closed. Flags are trusted, a wrong flag can make the count match.
    pub fn chord_cell(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.grid.validate_coords(coords)?;

        let cell = self.grid[coords];
        if !cell.is_revealed() || cell.is_mine() {
            return Ok(RevealOutcome::NoChange);
        }

        let flagged = self.grid.count_neighbors(coords, Cell::is_flagged);
        if flagged != cell.adjacent_mines() {
            log::debug!(
                "Chord at {:?} ignored, {} flags for {} mines",
                coords,
                flagged,
                cell.adjacent_mines()
            );
            return Ok(RevealOutcome::NoChange);
        }

        let mut outcome = RevealOutcome::NoChange;
        for pos in self.grid.iter_neighbors(coords) {
            let neighbor = &mut self.grid[pos];
            if neighbor.is_flagged() || neighbor.is_revealed() {
                continue;
            }

            neighbor.reveal();
            if neighbor.is_mine() {
                log::debug!("Chord at {:?} revealed mine at {:?}", coords, pos);
                return Ok(RevealOutcome::HitMine);
            }

            outcome = RevealOutcome::Revealed;
            if neighbor.adjacent_mines() == 0 {
                self.flood_from(pos);
            }
        }

        log::debug!("Chord at {:?} finished with {:?}", coords, outcome);
        Ok(outcome)
    }
}
