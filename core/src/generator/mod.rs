use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

pub trait MinefieldGenerator {
    /// Fills `board` with mines, keeping `start` and its neighbors free.
    fn generate(&mut self, board: &mut Board, start: Coord2) -> Result<Generation>;
}

/// Report of a finished generation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generation {
    /// Layouts tried, including the one that was kept.
    pub attempts: u32,
    /// Whether the kept layout can be cleared from the start cell without guessing.
    pub solvable: bool,
}

/// Generation strategy that retries seeded random layouts until one is logically solvable from the start cell, or
/// the attempt budget runs out, in which case the last layout is kept anyway.
///
/// A single random stream is used across all attempts, every attempt gets a different shuffle.
#[derive(Clone, Debug)]
pub struct SolvableGenerator {
    rng: SmallRng,
    mines: CellCount,
    attempts: u32,
}

impl SolvableGenerator {
    pub fn new(seed: u64, mines: CellCount, attempts: u32) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            mines,
            attempts,
        }
    }
}

impl MinefieldGenerator for SolvableGenerator {
    fn generate(&mut self, board: &mut Board, start: Coord2) -> Result<Generation> {
        let start = board.validate_coords(start)?;
        let forbidden = forbidden_zone(board, start);

        let mut generation = Generation {
            attempts: 0,
            solvable: false,
        };

        while generation.attempts < self.attempts {
            generation.attempts += 1;
            place_mines(board, &forbidden, self.mines, &mut self.rng)?;
            log::trace!("Checking layout attempt {}", generation.attempts);

            if is_logically_solvable(board, start) {
                generation.solvable = true;
                break;
            }
        }

        if generation.solvable {
            log::debug!(
                "Found solvable layout after {} attempt(s)",
                generation.attempts
            );
        } else {
            log::warn!(
                "No logically solvable layout found in {} attempts, keeping the last one",
                generation.attempts
            );
        }

        Ok(generation)
    }
}
