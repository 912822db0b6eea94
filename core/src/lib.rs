use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod session;
mod types;

/// Board dimensions and mine count. Always valid once constructed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    rows: Coord,
    cols: Coord,
    mines: CellCount,
}

#[derive(Deserialize)]
struct RawGameConfig {
    rows: Coord,
    cols: Coord,
    mines: CellCount,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = GameError;

    fn try_from(raw: RawGameConfig) -> Result<Self> {
        Self::new(raw.rows, raw.cols, raw.mines)
    }
}

impl GameConfig {
    pub(crate) const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    /// Requires a non-empty grid with at least one safe cell.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(ConfigProblem::EmptyBoard.into());
        }
        let cells = mult(rows, cols);
        if mines >= cells {
            return Err(ConfigProblem::TooManyMines { mines, cells }.into());
        }
        Ok(Self::new_unchecked(rows, cols, mines))
    }

    pub const fn rows(&self) -> Coord {
        self.rows
    }

    pub const fn cols(&self) -> Coord {
        self.cols
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mines
    }

    pub fn contains(&self, (row, col): Coord2) -> bool {
        row < self.rows && col < self.cols
    }
}

/// Which cells hold mines, independent of any play state. Dimensions always
/// fit in [`Coord`].
#[derive(Clone, Debug, PartialEq)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    size: Coord2,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        let (Ok(rows), Ok(cols)) = (Coord::try_from(rows), Coord::try_from(cols)) else {
            return Err(ConfigProblem::LayoutShape.into());
        };
        let mine_count = mine_count_of(&mine_mask)?;
        Ok(Self {
            mine_mask,
            size: (rows, cols),
            mine_count,
        })
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        // dimensions were checked against `Coord` on construction
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }
}

fn mine_count_of(mine_mask: &Array2<bool>) -> Result<CellCount> {
    mine_mask
        .iter()
        .filter(|&&is_mine| is_mine)
        .count()
        .try_into()
        .map_err(|_| ConfigProblem::LayoutShape.into())
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

/// Board-level result of revealing a cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealResult {
    /// Cell was already revealed or is flagged.
    NoChange,
    /// Every cell opened by this call, in the order it was opened.
    Revealed(Vec<Coord2>),
    /// Cell holds a mine, the board is left untouched.
    HitMine(Coord2),
}

impl RevealResult {
    pub const fn has_update(&self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Result of toggling a flag.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagResult {
    NoChange,
    Flagged,
    Unflagged,
}

impl FlagResult {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// Change to apply to the flag counter.
    pub const fn delta(self) -> i8 {
        match self {
            Self::NoChange => 0,
            Self::Flagged => 1,
            Self::Unflagged => -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_empty_board() {
        assert_eq!(
            GameConfig::new(0, 5, 0),
            Err(GameError::InvalidConfiguration(ConfigProblem::EmptyBoard))
        );
        assert_eq!(
            GameConfig::new(5, 0, 0),
            Err(GameError::InvalidConfiguration(ConfigProblem::EmptyBoard))
        );
    }

    #[test]
    fn config_requires_a_safe_cell() {
        assert_eq!(
            GameConfig::new(2, 2, 4),
            Err(GameError::InvalidConfiguration(ConfigProblem::TooManyMines {
                mines: 4,
                cells: 4
            }))
        );
        let config = GameConfig::new(2, 2, 3).unwrap();
        assert_eq!(config.safe_cell_count(), 1);
    }

    #[test]
    fn config_allows_zero_mines() {
        let config = GameConfig::new(3, 4, 0).unwrap();
        assert_eq!(config.total_cells(), 12);
        assert_eq!(config.size(), (3, 4));
    }

    #[test]
    fn config_deserialization_validates() {
        let config: GameConfig = serde_json::from_str(r#"{"rows":9,"cols":9,"mines":10}"#).unwrap();
        assert_eq!(config, GameConfig::new(9, 9, 10).unwrap());

        let invalid = serde_json::from_str::<GameConfig>(r#"{"rows":2,"cols":2,"mines":9}"#);
        assert!(invalid.is_err());
    }

    #[test]
    fn layout_counts_distinct_mines() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0), (2, 1), (0, 0)]).unwrap();
        assert_eq!(layout.mine_count(), 2);
        assert!(layout.contains_mine((2, 1)));
        assert!(!layout.contains_mine((1, 2)));
        assert_eq!(layout.iter_mines().collect::<Vec<_>>(), vec![(0, 0), (2, 1)]);
    }

    #[test]
    fn layout_rejects_mask_wider_than_coord() {
        let mut mine_mask = Array2::from_elem((258, 2), false);
        mine_mask[(257, 0)] = true;
        assert_eq!(
            MineLayout::from_mine_mask(mine_mask),
            Err(GameError::InvalidConfiguration(ConfigProblem::LayoutShape))
        );

        let mine_mask = Array2::from_elem((2, 256), true);
        assert_eq!(
            MineLayout::from_mine_mask(mine_mask),
            Err(GameError::InvalidConfiguration(ConfigProblem::LayoutShape))
        );
    }

    #[test]
    fn layout_accepts_largest_mask() {
        let mut mine_mask = Array2::from_elem((255, 255), false);
        mine_mask[(254, 254)] = true;
        let layout = MineLayout::from_mine_mask(mine_mask).unwrap();
        assert_eq!(layout.size(), (255, 255));
        assert_eq!(layout.iter_mines().collect::<Vec<_>>(), vec![(254, 254)]);
    }

    #[test]
    fn layout_rejects_out_of_bounds_mine() {
        assert_eq!(
            MineLayout::from_mine_coords((2, 3), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn flag_result_delta() {
        assert_eq!(FlagResult::Flagged.delta(), 1);
        assert_eq!(FlagResult::Unflagged.delta(), -1);
        assert_eq!(FlagResult::NoChange.delta(), 0);
        assert!(!FlagResult::NoChange.has_update());
    }
}
