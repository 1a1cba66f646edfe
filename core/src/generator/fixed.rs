use super::*;

/// Places mines at explicit coordinates, ignoring the configured count.
///
/// Out-of-range coordinates are skipped with a warning; use [`Board::with_mines`] to have them
/// rejected instead.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMineGenerator<'a> {
    mines: &'a [Coord2],
}

impl<'a> FixedMineGenerator<'a> {
    pub fn new(mines: &'a [Coord2]) -> Self {
        Self { mines }
    }
}

impl MineGenerator for FixedMineGenerator<'_> {
    fn generate(self, config: &GameConfig) -> Array2<bool> {
        let mut mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        let (rows, cols) = config.size;

        for &(row, col) in self.mines {
            if row < rows && col < cols {
                mask[(row, col).to_nd_index()] = true;
            } else {
                log::warn!("Skipping mine outside the board at {:?}", (row, col));
            }
        }

        mask
    }
}
