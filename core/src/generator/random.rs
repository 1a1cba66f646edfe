use super::*;

/// Uniform placement over every cell outside the excluded start area.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
    start: Coord2,
    start_tile: StartTile,
}

impl RandomMineGenerator {
    pub fn new(seed: u64, start: Coord2, start_tile: StartTile) -> Self {
        Self {
            seed,
            start,
            start_tile,
        }
    }

    /// Coordinates that must stay free of mines, after downgrading the policy if it cannot fit.
    fn excluded(&self, config: &GameConfig, bounds: &Array2<bool>) -> Vec<Coord2> {
        let mut excluded = vec![self.start];
        if self.start_tile == StartTile::AlwaysZero {
            excluded.extend(bounds.iter_neighbors(self.start));
            let free = config.total_cells() - excluded.len() as CellCount;
            if config.mines > free {
                log::warn!(
                    "Cannot make start cell zero with {} mines, fallback to simple safe",
                    config.mines
                );
                excluded.truncate(1);
            }
        }
        excluded
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: &GameConfig) -> Array2<bool> {
        use rand::{SeedableRng, rngs::SmallRng, seq::SliceRandom};

        let mut mines: Array2<bool> = Array2::default(config.size.to_nd_index());
        let excluded = self.excluded(config, &mines);

        let (rows, cols) = config.size;
        let mut available: Vec<Coord2> = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .filter(|pos| !excluded.contains(pos))
            .collect();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        available.shuffle(&mut rng);

        let wanted = usize::from(config.mines);
        if wanted > available.len() {
            log::warn!(
                "Requested {} mines but only {} cells are available",
                wanted,
                available.len()
            );
        }

        for &pos in available.iter().take(wanted) {
            mines[pos.to_nd_index()] = true;
        }

        log::debug!(
            "Generated {} mines on {:?} board avoiding {:?}",
            wanted.min(available.len()),
            config.size,
            excluded
        );
        mines
    }
}
