use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use solver::*;
pub use types::*;

mod board;
mod cell;
mod engine;
mod error;
mod generator;
mod solver;
mod types;

/// Cells around the first click (itself included) that are always kept free of mines.
pub const FORBIDDEN_ZONE_CELLS: i64 = 9;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
    /// Seed for mine placement, `None` draws a fresh one when the game is reset.
    pub seed: Option<u64>,
    /// Maximum number of layouts tried while looking for a logically solvable one.
    pub attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            mines: 10,
            seed: None,
            attempts: 100,
        }
    }
}

impl GameConfig {
    pub const fn new(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
            seed: None,
            attempts: 100,
        }
    }

    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub const fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }

    pub fn randomize_seed(&mut self) {
        self.seed = Some(rand::random());
    }

    pub const fn size(&self) -> Coord2 {
        (self.width, self.height)
    }

    /// Most mines that fit while keeping the first click's neighborhood free, negative for tiny boards.
    pub const fn capacity(&self) -> i64 {
        area(self.width, self.height) - FORBIDDEN_ZONE_CELLS
    }

    pub fn validate(&self) -> Result<()> {
        if self.width < 1 {
            return Err(GameError::InvalidConfig("width must be at least 1"));
        }
        if self.height < 1 {
            return Err(GameError::InvalidConfig("height must be at least 1"));
        }
        if self.attempts < 1 {
            return Err(GameError::InvalidConfig("attempts must be at least 1"));
        }
        if i64::from(self.mines) > self.capacity() {
            return Err(GameError::InvalidConfig(
                "too many mines, 9 cells must stay free around the first click",
            ));
        }
        Ok(())
    }
}

/// What a player action did to the game, so callers can skip redraws on [`ClickOutcome::NoChange`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    NoChange,
    Changed,
    Won,
    Lost,
}

impl ClickOutcome {
    pub const fn has_update(self) -> bool {
        use ClickOutcome::*;
        match self {
            NoChange => false,
            Changed => true,
            Won => true,
            Lost => true,
        }
    }

    pub(crate) const fn changed_if(changed: bool) -> Self {
        if changed { Self::Changed } else { Self::NoChange }
    }
}

/// Used to merge outcomes of multi-cell actions
impl BitOr for ClickOutcome {
    type Output = ClickOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use ClickOutcome::*;
        match (self, rhs) {
            (Lost, _) => Lost,
            (_, Lost) => Lost,
            (Won, _) => Won,
            (_, Won) => Won,
            (Changed, _) => Changed,
            (_, Changed) => Changed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();

        assert_eq!(config.size(), (8, 8));
        assert_eq!(config.mines, 10);
        assert_eq!(config.seed, None);
        assert_eq!(config.attempts, 100);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_bad_dimensions() {
        assert!(GameConfig::new(0, 8, 0).validate().is_err());
        assert!(GameConfig::new(8, -3, 0).validate().is_err());
        assert!(GameConfig::new(8, 8, 0).with_attempts(0).validate().is_err());
    }

    #[test]
    fn validate_reserves_first_click_neighborhood() {
        assert_eq!(GameConfig::new(4, 4, 7).validate(), Ok(()));
        assert!(matches!(
            GameConfig::new(4, 4, 8).validate(),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn tiny_boards_accept_no_mine_count() {
        let config = GameConfig::new(2, 2, 0);

        assert_eq!(config.capacity(), -5);
        assert!(config.validate().is_err());
        assert_eq!(GameConfig::new(3, 3, 0).validate(), Ok(()));
    }

    #[test]
    fn randomize_seed_sets_a_seed() {
        let mut config = GameConfig::default();

        config.randomize_seed();

        assert!(config.seed.is_some());
    }

    #[test]
    fn config_parses_with_missing_fields() {
        let config: GameConfig = serde_json::from_str(r#"{"width": 16, "seed": 7}"#).unwrap();

        assert_eq!(config.width, 16);
        assert_eq!(config.height, 8);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn outcomes_merge_by_priority() {
        use ClickOutcome::*;

        assert_eq!(NoChange | Changed, Changed);
        assert_eq!(Changed | Won, Won);
        assert_eq!(Won | Lost, Lost);
        assert_eq!(NoChange | NoChange, NoChange);
        assert!(!NoChange.has_update());
    }
}
