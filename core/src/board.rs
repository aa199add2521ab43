use std::collections::VecDeque;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::types::saturating_count;
use crate::*;

/// Result of a flood reveal started on a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flood {
    /// The start cell was a mine, it is now revealed and nothing else changed.
    Mine,
    /// Number of cells newly revealed, zero when the start cell was not hidden.
    Opened(CellCount),
}

/// Rectangular grid of cells addressed by `(x, y)` with `x` in `[0, width)` and `y` in `[0, height)`.
///
/// The size is always the shape of the cell array, so a deserialized board cannot disagree with itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    /// Allocates a cleared board, non-positive dimensions give an empty board.
    pub fn new(size: Coord2) -> Self {
        let size = (size.0.max(0), size.1.max(0));
        Self {
            cells: Array2::default(size.to_nd_index()),
        }
    }

    /// Builds a board with mines at exactly `mine_coords` and clues computed from them.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut board = Self::new(size);
        for &coords in mine_coords {
            board.at_mut(coords)?.is_mine = true;
        }
        board.recount();
        Ok(board)
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (
            dim.0.try_into().unwrap_or(Coord::MAX),
            dim.1.try_into().unwrap_or(Coord::MAX),
        )
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    /// Saturates at `CellCount::MAX`, like the other counters.
    pub fn total_cells(&self) -> CellCount {
        saturating_count(self.cells.len())
    }

    pub fn contains(&self, (x, y): Coord2) -> bool {
        let (width, height) = self.size();
        x >= 0 && x < width && y >= 0 && y < height
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds(coords))
        }
    }

    pub fn at(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self.cells[coords.to_nd_index()])
    }

    pub fn at_mut(&mut self, coords: Coord2) -> Result<&mut Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&mut self.cells[coords.to_nd_index()])
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// Every coordinate of the board, column by column.
    pub fn coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (width, height) = self.size();
        (0..width).flat_map(move |x| (0..height).map(move |y| (x, y)))
    }

    /// Reallocates to exactly `size`, every cell is cleared even when the size did not change.
    pub fn resize_to(&mut self, size: Coord2) {
        *self = Self::new(size);
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Covers every cell again, leaving mines and clues untouched.
    pub fn reset_states(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.state = CellState::Hidden;
        }
    }

    /// Recomputes the clue of every cell from the current mine placement.
    pub fn recount(&mut self) {
        for coords in self.coords() {
            let n_mines = self
                .neighbors(coords)
                .filter(|&pos| self.at(pos).is_ok_and(|cell| cell.is_mine))
                .count();
            if let Ok(cell) = self.at_mut(coords) {
                // at most 8 neighbors
                cell.n_mines = n_mines as u8;
            }
        }
    }

    pub fn count_flagged(&self) -> CellCount {
        saturating_count(
            self.cells
                .iter()
                .filter(|cell| cell.state == CellState::Flagged)
                .count(),
        )
    }

    pub fn count_mines(&self) -> CellCount {
        saturating_count(self.cells.iter().filter(|cell| cell.is_mine).count())
    }

    /// Whether every cell without a mine has been revealed, flags are irrelevant.
    pub fn all_safe_revealed(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.is_mine || cell.is_revealed())
    }

    /// Breadth-first reveal starting at `coords`.
    ///
    /// Only hidden cells are opened, flagged and question-marked cells stop the propagation, and expansion continues
    /// only through cells without neighboring mines.
    pub fn flood_reveal(&mut self, coords: Coord2) -> Result<Flood> {
        let start = self.at_mut(coords)?;
        if start.is_mine {
            start.state = CellState::Revealed;
            return Ok(Flood::Mine);
        }

        let mut opened: CellCount = 0;
        let mut to_visit = VecDeque::from([coords]);

        while let Some(visit_coords) = to_visit.pop_front() {
            let Ok(cell) = self.at_mut(visit_coords) else {
                continue;
            };

            // already revealed, flagged or question-marked
            if cell.state != CellState::Hidden {
                continue;
            }

            cell.state = CellState::Revealed;
            opened = opened.saturating_add(1);

            if cell.n_mines != 0 {
                continue;
            }

            log::trace!("Flood expanding from {:?}", visit_coords);
            to_visit.extend(
                self.neighbors(visit_coords)
                    .filter(|&pos| self.at(pos).is_ok_and(|cell| cell.state == CellState::Hidden)),
            );
        }

        Ok(Flood::Opened(opened))
    }
}
