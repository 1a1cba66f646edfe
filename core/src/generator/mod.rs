use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Produces a mine mask shaped like `config.size`.
pub trait MineGenerator {
    fn generate(self, config: &GameConfig) -> Array2<bool>;
}

/// How much of the first-move neighborhood is kept free of mines.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartTile {
    /// Only the cell of the first intent.
    #[default]
    SimpleSafe,
    /// The first intent's cell and all of its neighbors, so the first reveal cascades.
    AlwaysZero,
}
