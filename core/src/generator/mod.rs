use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

/// Source of a mine layout for a board of a given configuration.
pub trait MineGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout>;
}

/// A prepared layout places exactly the mines it holds, for replays and tests.
impl MineGenerator for MineLayout {
    fn generate(self, _config: GameConfig) -> Result<MineLayout> {
        Ok(self)
    }
}

/// How random mine positions are drawn. Both pick distinct cells uniformly.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementStrategy {
    /// Partial Fisher-Yates shuffle of the cell indices, linear in the cell count.
    #[default]
    Shuffle,
    /// Sample random positions until enough free ones were hit.
    Rejection,
}
