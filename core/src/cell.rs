use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell.
///
/// Anything other than [`CellState::Revealed`] counts as covered; flagged and question-marked cells are covered too.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Revealed,
    Hidden,
    Flagged,
    QuestionMarked,
}

impl CellState {
    /// Next state in the `Hidden -> Flagged -> QuestionMarked -> Hidden` marking cycle.
    pub const fn toggled(self) -> Self {
        use CellState::*;
        match self {
            Hidden => Flagged,
            Flagged => QuestionMarked,
            QuestionMarked => Hidden,
            Revealed => Revealed,
        }
    }

    pub const fn is_covered(self) -> bool {
        !matches!(self, Self::Revealed)
    }

    pub const fn is_marked(self) -> bool {
        matches!(self, Self::Flagged | Self::QuestionMarked)
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    /// Mines among the neighbors, only meaningful once mines were placed.
    pub n_mines: u8,
    pub state: CellState,
}

impl Cell {
    pub const fn is_revealed(&self) -> bool {
        matches!(self.state, CellState::Revealed)
    }

    pub const fn is_covered(&self) -> bool {
        self.state.is_covered()
    }

    pub const fn is_marked(&self) -> bool {
        self.state.is_marked()
    }
}
