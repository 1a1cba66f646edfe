//! Rule engine for a grid-based mine-discovery puzzle.
//!
//! The crate is split in three layers: [`Grid`] stores [`Cell`]s, [`Board`] implements the game
//! rules on top of a grid, and [`Session`] turns player intents into board operations while
//! enforcing turn-level policy such as first-move safety. Presentation code is expected to call
//! the intents on a [`Session`] and read cell and session state back after each one.

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod grid;
mod session;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
    pub start_tile: StartTile,
}

impl GameConfig {
    /// Validates dimensions and mine count, at least one cell must stay free of mines.
    pub fn new((rows, cols): Coord2, mines: CellCount) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidSize);
        }
        if mines >= mult(rows, cols) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self {
            size: (rows, cols),
            mines,
            start_tile: StartTile::default(),
        })
    }

    pub const fn with_start_tile(mut self, start_tile: StartTile) -> Self {
        self.start_tile = start_tile;
        self
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Result of a reveal or chord.
///
/// Board operations only produce `NoChange`, `Revealed` and `HitMine`, the session decides `Won`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }

    pub const fn hit_mine(self) -> bool {
        matches!(self, Self::HitMine)
    }
}

/// Merges outcomes of several reveals
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

/// Starts a session on a `rows` by `cols` board with `mines` mines and an entropy seed.
pub fn new_session(rows: Coord, cols: Coord, mines: CellCount) -> Result<Session> {
    Session::new(GameConfig::new((rows, cols), mines)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_empty_dimensions() {
        assert_eq!(GameConfig::new((0, 5), 0), Err(GameError::InvalidSize));
        assert_eq!(GameConfig::new((5, 0), 0), Err(GameError::InvalidSize));
    }

    #[test]
    fn config_requires_a_safe_cell() {
        assert_eq!(GameConfig::new((3, 3), 9), Err(GameError::TooManyMines));
        assert_eq!(GameConfig::new((1, 1), 1), Err(GameError::TooManyMines));

        let config = GameConfig::new((3, 3), 8).unwrap();
        assert_eq!(config.safe_cells(), 1);
        assert_eq!(config.start_tile, StartTile::SimpleSafe);
    }

    #[test]
    fn zero_mines_is_a_valid_config() {
        let config = GameConfig::new((1, 1), 0).unwrap();
        assert_eq!(config.total_cells(), 1);
    }

    #[test]
    fn reveal_outcome_merge_prefers_mine() {
        use RevealOutcome::*;

        assert_eq!(Revealed | HitMine, HitMine);
        assert_eq!(Won | Revealed, Won);
        assert_eq!(NoChange | Revealed, Revealed);
        assert_eq!(NoChange | NoChange, NoChange);
        assert!(!NoChange.has_update());
    }

    #[test]
    fn new_session_validates_arguments() {
        assert_eq!(new_session(0, 3, 1).err(), Some(GameError::InvalidSize));
        assert_eq!(new_session(2, 2, 4).err(), Some(GameError::TooManyMines));
        assert!(new_session(2, 2, 3).is_ok());
    }
}
