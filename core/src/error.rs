use thiserror::Error;

use crate::{CellCount, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates {0:?} are outside the board")]
    OutOfBounds(Coord2),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("Not enough free cells to place {mines} mines, only {available} available")]
    InsufficientSpace {
        mines: CellCount,
        available: CellCount,
    },
}

pub type Result<T> = core::result::Result<T, GameError>;
