use core::num::Saturating;
use ndarray::Array2;

use crate::*;

/// The grid of cells for one game. Dimensions and mine count never change
/// after creation.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    config: GameConfig,
    cells: Array2<Cell>,
    revealed_count: Saturating<CellCount>,
}

impl Board {
    /// Allocates an all-hidden, mine-free grid.
    pub fn create(rows: Coord, cols: Coord, mine_count: CellCount) -> Result<Self> {
        Ok(Self::from_config(GameConfig::new(rows, cols, mine_count)?))
    }

    pub fn from_config(config: GameConfig) -> Self {
        let cells = Array2::from_shape_fn(config.size().to_nd_index(), |(row, col)| {
            Cell::hidden(row as Coord, col as Coord)
        });
        Self {
            config,
            cells,
            revealed_count: Saturating(0),
        }
    }

    /// Creates a board and fully populates it: mines placed, counts derived.
    pub fn generate(config: GameConfig, generator: impl MineGenerator) -> Result<Self> {
        let mut board = Self::from_config(config);
        board.place_mines(generator)?;
        board.compute_neighbor_counts();
        Ok(board)
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn rows(&self) -> Coord {
        self.config.rows()
    }

    pub fn cols(&self) -> Coord {
        self.config.cols()
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.config.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self.cells[coords.to_nd_index()])
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Places the generator's mines. The layout must match the board's size
    /// and hold exactly its mine count.
    pub fn place_mines(&mut self, generator: impl MineGenerator) -> Result<()> {
        let layout = generator.generate(self.config)?;

        if layout.size() != self.size() {
            return Err(ConfigProblem::LayoutShape.into());
        }
        if layout.mine_count() != self.mine_count() {
            return Err(ConfigProblem::LayoutMineCount {
                actual: layout.mine_count(),
                expected: self.mine_count(),
            }
            .into());
        }

        let mut placed: CellCount = 0;
        for cell in self.cells.iter_mut() {
            cell.is_mine = layout.contains_mine(cell.coords());
            if cell.is_mine {
                placed += 1;
            }
        }
        if placed != self.mine_count() {
            self.cells.iter_mut().for_each(|cell| cell.is_mine = false);
            return Err(ConfigProblem::LayoutMineCount {
                actual: placed,
                expected: self.mine_count(),
            }
            .into());
        }
        Ok(())
    }

    /// Derives every safe cell's count of adjacent mines.
    pub fn compute_neighbor_counts(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                if self.cells[coords.to_nd_index()].is_mine {
                    continue;
                }
                let count = self
                    .iter_neighbors(coords)
                    .filter(|&pos| self.cells[pos.to_nd_index()].is_mine)
                    .count() as u8;
                self.cells[coords.to_nd_index()].neighbor_count = count;
            }
        }
    }

    /// Reveals a hidden, unflagged cell and cascades through connected
    /// zero-count cells.
    ///
    /// A mine is not revealed here: the caller ends the game and calls
    /// [`Board::finalize_loss`]. The cascade uses an explicit stack and the
    /// revealed flag as its visited set, so each cell is opened at most once.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealResult> {
        let coords = self.validate_coords(coords)?;
        let cell = self.cells[coords.to_nd_index()];

        if cell.is_revealed || cell.is_flagged {
            return Ok(RevealResult::NoChange);
        }
        if cell.is_mine {
            log::debug!("Mine hit at {:?}", coords);
            return Ok(RevealResult::HitMine(coords));
        }

        let mut revealed = Vec::new();
        let mut pending = Vec::new();
        self.open_cell(coords, &mut revealed, &mut pending);
        log::debug!("Revealed {:?}, neighbor count {}", coords, cell.neighbor_count);

        while let Some(center) = pending.pop() {
            for pos in self.iter_neighbors(center) {
                let neighbor = &self.cells[pos.to_nd_index()];
                if neighbor.is_revealed || neighbor.is_flagged || neighbor.is_mine {
                    continue;
                }
                self.open_cell(pos, &mut revealed, &mut pending);
                log::trace!("Cascade opened {:?}", pos);
            }
        }

        if revealed.len() > 1 {
            log::debug!("Cascade from {:?} opened {} cells", coords, revealed.len());
        }
        Ok(RevealResult::Revealed(revealed))
    }

    fn open_cell(&mut self, coords: Coord2, revealed: &mut Vec<Coord2>, pending: &mut Vec<Coord2>) {
        let cell = &mut self.cells[coords.to_nd_index()];
        cell.is_revealed = true;
        self.revealed_count += 1;
        revealed.push(coords);
        if cell.neighbor_count == 0 {
            pending.push(coords);
        }
    }

    /// Flips the flag on an unrevealed cell; revealed cells are left alone.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagResult> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];

        if cell.is_revealed {
            return Ok(FlagResult::NoChange);
        }
        cell.is_flagged = !cell.is_flagged;
        Ok(if cell.is_flagged {
            FlagResult::Flagged
        } else {
            FlagResult::Unflagged
        })
    }

    /// Whether every safe cell has been revealed.
    pub fn check_win(&self) -> bool {
        self.revealed_count == Saturating(self.config.safe_cell_count())
    }

    /// Exposes unflagged mines and marks flags placed on safe cells. Flagged
    /// mines stay hidden under their flag.
    pub fn finalize_loss(&mut self) {
        for cell in self.cells.iter_mut() {
            match (cell.is_mine, cell.is_flagged) {
                (true, false) if !cell.is_revealed => {
                    cell.is_revealed = true;
                    self.revealed_count += 1;
                }
                (false, true) => cell.is_wrong_flag = true,
                _ => {}
            }
        }
    }
}
