use ndarray::Array2;

use super::*;

/// Purely random placement with no first-move protection: any cell, including
/// the first one the player touches, may hold a mine.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
    placement: PlacementStrategy,
}

impl RandomMineGenerator {
    pub fn new(seed: u64, placement: PlacementStrategy) -> Self {
        Self { seed, placement }
    }

    /// Draws the seed from the thread-local RNG.
    pub fn from_entropy(placement: PlacementStrategy) -> Self {
        Self::new(rand::random(), placement)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn placement(&self) -> PlacementStrategy {
        self.placement
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mine_mask: Array2<bool> = Array2::default(config.size().to_nd_index());
        let mines = usize::from(config.mines());
        let total_cells = usize::from(config.total_cells());
        let cols = usize::from(config.cols());

        log::debug!(
            "Generating {} mines on {}x{} with {:?}, seed {}",
            mines,
            config.rows(),
            config.cols(),
            self.placement,
            self.seed
        );

        match self.placement {
            PlacementStrategy::Shuffle => {
                let mut indices: Vec<usize> = (0..total_cells).collect();
                let (chosen, _) = indices.partial_shuffle(&mut rng, mines);
                for &index in chosen.iter() {
                    mine_mask[[index / cols, index % cols]] = true;
                }
            }
            PlacementStrategy::Rejection => {
                // expected draws blow up as the board fills
                if mines * 2 > total_cells {
                    log::warn!(
                        "Rejection sampling {} mines into {} cells, consider the shuffle strategy",
                        mines,
                        total_cells
                    );
                }
                let mut mines_placed = 0;
                while mines_placed < mines {
                    let row = rng.random_range(0..config.rows());
                    let col = rng.random_range(0..config.cols());
                    let cell = &mut mine_mask[(row, col).to_nd_index()];
                    if !*cell {
                        *cell = true;
                        mines_placed += 1;
                    }
                }
            }
        }

        MineLayout::from_mine_mask(mine_mask)
    }
}
