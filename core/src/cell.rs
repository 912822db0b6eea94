use serde::{Deserialize, Serialize};

use crate::*;

/// One grid position, owned by its [`Board`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub(crate) is_mine: bool,
    pub(crate) is_revealed: bool,
    pub(crate) is_flagged: bool,
    /// Only meaningful for non-mine cells.
    pub(crate) neighbor_count: u8,
    /// Set on a flagged safe cell once the game is lost.
    pub(crate) is_wrong_flag: bool,
    pub(crate) row: Coord,
    pub(crate) col: Coord,
}

impl Cell {
    pub(crate) const fn hidden(row: Coord, col: Coord) -> Self {
        Self {
            is_mine: false,
            is_revealed: false,
            is_flagged: false,
            neighbor_count: 0,
            is_wrong_flag: false,
            row,
            col,
        }
    }

    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    pub const fn neighbor_count(&self) -> u8 {
        self.neighbor_count
    }

    pub const fn is_wrong_flag(&self) -> bool {
        self.is_wrong_flag
    }

    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }

    pub fn view(&self) -> CellView {
        CellView::from(self)
    }
}

/// Read-only snapshot of a cell handed to the presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub neighbor_count: u8,
    pub is_wrong_flag: bool,
}

impl From<&Cell> for CellView {
    fn from(cell: &Cell) -> Self {
        Self {
            is_mine: cell.is_mine,
            is_revealed: cell.is_revealed,
            is_flagged: cell.is_flagged,
            neighbor_count: cell.neighbor_count,
            is_wrong_flag: cell.is_wrong_flag,
        }
    }
}
