use core::ops::BitOr;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Valid transitions:
/// - AwaitingFirstClick -> Playing
/// - AwaitingFirstClick -> Won (the first click cleared the board)
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Mines are placed on the first primary click
    AwaitingFirstClick,
    Playing,
    /// Every safe cell is revealed
    Won,
    /// A mine got revealed
    Lost,
}

impl GameState {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::AwaitingFirstClick)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::AwaitingFirstClick
    }
}

/// A single game of minesweeper, from the first click to a win or a loss.
///
/// Coordinates given to the action methods come straight from user input, anything outside the board is ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEngine {
    config: GameConfig,
    board: Board,
    state: GameState,
    unsolvable: bool,
    triggered_mine: Option<Coord2>,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Self {
        let mut engine = Self {
            config,
            board: Board::new((0, 0)),
            state: Default::default(),
            unsolvable: false,
            triggered_mine: None,
        };
        engine.reset(config);
        engine
    }

    /// Starts a game already in progress on a prepared layout, skipping generation.
    pub fn from_board(board: Board) -> Self {
        let (width, height) = board.size();
        let config = GameConfig {
            width,
            height,
            mines: board.count_mines(),
            seed: Some(0),
            attempts: 1,
        };
        Self {
            config,
            board,
            state: GameState::Playing,
            unsolvable: false,
            triggered_mine: None,
        }
    }

    /// Starts over with a cleared board of the configured size, mines are placed on the next primary click.
    ///
    /// The configuration is not validated here, an invalid one leaves the board without mines.
    pub fn reset(&mut self, config: GameConfig) {
        self.config = config;
        if self.config.seed.is_none() {
            self.config.randomize_seed();
        }
        self.board.resize_to(config.size());
        self.state = GameState::AwaitingFirstClick;
        self.unsolvable = false;
        self.triggered_mine = None;
        log::debug!(
            "Reset to {}x{} with {} mines, seed {}",
            self.config.width,
            self.config.height,
            self.config.mines,
            self.seed()
        );
    }

    /// Configuration of the current game, with the seed that was actually used.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.config.seed.unwrap_or_default()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Whether generation gave up looking for a layout that can be cleared without guessing.
    pub fn unsolvable(&self) -> bool {
        self.unsolvable
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn cells_flagged(&self) -> CellCount {
        self.board.count_flagged()
    }

    /// Mines not yet flagged, negative when there are more flags than mines.
    pub fn mines_left(&self) -> i64 {
        i64::from(self.total_mines()) - i64::from(self.cells_flagged())
    }

    /// The mine whose reveal lost the game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn at(&self, coords: Coord2) -> Result<Cell> {
        self.board.at(coords).copied()
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        self.board.neighbors(coords)
    }

    pub fn check_won(&self) -> bool {
        self.board.all_safe_revealed()
    }

    /// Places mines keeping `coords` and its neighbors free, preferring layouts solvable from there without guessing.
    ///
    /// Does nothing and returns the reason when the configuration is invalid or `coords` is outside the board.
    pub fn generate_mines(&mut self, coords: Coord2) -> Result<Generation> {
        self.config.validate()?;
        let coords = self.board.validate_coords(coords)?;

        log::debug!("Generating mines around first click at {:?}", coords);
        let mut generator =
            SolvableGenerator::new(self.seed(), self.config.mines, self.config.attempts);
        let generation = generator.generate(&mut self.board, coords)?;
        self.unsolvable = !generation.solvable;
        Ok(generation)
    }

    /// Reveals a cell, flooding through cells without neighboring mines. Revealing a mine loses the game.
    pub fn reveal(&mut self, coords: Coord2) -> ClickOutcome {
        match self.board.flood_reveal(coords) {
            Ok(Flood::Mine) => {
                self.mark_lost(coords);
                ClickOutcome::Lost
            }
            Ok(Flood::Opened(opened)) => {
                log::trace!("Revealed {} cell(s) from {:?}", opened, coords);
                ClickOutcome::changed_if(opened > 0)
            }
            Err(_) => ClickOutcome::NoChange,
        }
    }

    /// Reveals the hidden neighbors of a revealed cell once the marks around it match its clue.
    ///
    /// Question marks count as marks here, a wrong mark can still set off a mine.
    pub fn speed_reveal(&mut self, coords: Coord2) -> ClickOutcome {
        let Some(n_mines) = self.revealed_clue(coords) else {
            return ClickOutcome::NoChange;
        };

        let neighbors = self.neighbor_states(coords);
        let marked = neighbors.iter().filter(|(_, state)| state.is_marked()).count();
        if marked != usize::from(n_mines) {
            return ClickOutcome::NoChange;
        }

        neighbors
            .iter()
            .filter(|(_, state)| *state == CellState::Hidden)
            .map(|&(pos, _)| self.reveal(pos))
            .fold(ClickOutcome::NoChange, BitOr::bitor)
    }

    /// Flags every covered neighbor of a revealed cell when their number matches its clue.
    pub fn speed_flag(&mut self, coords: Coord2) -> ClickOutcome {
        let Some(n_mines) = self.revealed_clue(coords) else {
            return ClickOutcome::NoChange;
        };

        let covered: SmallVec<[(Coord2, CellState); 8]> = self
            .neighbor_states(coords)
            .into_iter()
            .filter(|(_, state)| state.is_covered())
            .collect();
        if covered.len() != usize::from(n_mines) {
            return ClickOutcome::NoChange;
        }

        let mut changed = false;
        for (pos, state) in covered {
            if let Ok(cell) = self.board.at_mut(pos) {
                cell.state = CellState::Flagged;
                changed |= state != CellState::Flagged;
            }
        }
        ClickOutcome::changed_if(changed)
    }

    /// Cycles a covered cell through flagged, question-marked and back to hidden.
    pub fn toggle(&mut self, coords: Coord2) -> ClickOutcome {
        match self.board.at_mut(coords) {
            Ok(cell) if cell.is_covered() => {
                cell.state = cell.state.toggled();
                ClickOutcome::Changed
            }
            _ => ClickOutcome::NoChange,
        }
    }

    /// Primary action: places mines on the first click, then reveals covered cells or chords revealed ones.
    ///
    /// # Panics
    ///
    /// When mine placement runs out of room on a configuration that passed validation.
    pub fn primary_click(&mut self, coords: Coord2) -> ClickOutcome {
        if !self.board.contains(coords) {
            return ClickOutcome::NoChange;
        }

        match self.state {
            GameState::AwaitingFirstClick => return self.first_click(coords),
            GameState::Playing => {}
            GameState::Won | GameState::Lost => return ClickOutcome::NoChange,
        }

        let Ok(cell) = self.at(coords) else {
            return ClickOutcome::NoChange;
        };

        // marks have to be removed before revealing
        if cell.is_marked() {
            return ClickOutcome::NoChange;
        }

        let outcome = if cell.is_mine || !cell.is_revealed() {
            self.reveal(coords)
        } else if cell.n_mines > 0 {
            self.speed_reveal(coords)
        } else {
            ClickOutcome::NoChange
        };

        outcome | self.update_won()
    }

    /// Secondary action: toggles marks on covered cells, flags around revealed ones.
    pub fn secondary_click(&mut self, coords: Coord2) -> ClickOutcome {
        if self.state != GameState::Playing {
            return ClickOutcome::NoChange;
        }

        let Ok(cell) = self.at(coords) else {
            return ClickOutcome::NoChange;
        };

        let outcome = if cell.is_revealed() {
            self.speed_flag(coords)
        } else {
            self.toggle(coords)
        };

        outcome | self.update_won()
    }

    fn first_click(&mut self, coords: Coord2) -> ClickOutcome {
        match self.generate_mines(coords) {
            Ok(generation) => log::debug!(
                "Generated layout in {} attempt(s), solvable: {}",
                generation.attempts,
                generation.solvable
            ),
            Err(err @ GameError::InsufficientSpace { .. }) => {
                panic!("mine placement does not fit a validated configuration: {err}")
            }
            Err(err) => log::warn!("Mine generation skipped: {}", err),
        }

        let outcome = self.reveal(coords);
        if self.state != GameState::Lost {
            self.state = GameState::Playing;
        }

        ClickOutcome::Changed | outcome | self.update_won()
    }

    fn update_won(&mut self) -> ClickOutcome {
        if self.state == GameState::Playing && self.check_won() {
            self.state = GameState::Won;
            log::debug!("Game won");
            ClickOutcome::Won
        } else {
            ClickOutcome::NoChange
        }
    }

    fn mark_lost(&mut self, coords: Coord2) {
        if self.state.is_finished() {
            return;
        }
        self.state = GameState::Lost;
        self.triggered_mine = Some(coords);
        log::debug!("Game lost on mine at {:?}", coords);
    }

    /// Clue of a revealed cell, `None` for covered cells and outside the board.
    fn revealed_clue(&self, coords: Coord2) -> Option<u8> {
        self.board
            .at(coords)
            .ok()
            .filter(|cell| cell.is_revealed())
            .map(|cell| cell.n_mines)
    }

    fn neighbor_states(&self, coords: Coord2) -> SmallVec<[(Coord2, CellState); 8]> {
        self.board
            .neighbors(coords)
            .filter_map(|pos| Some((pos, self.board.at(pos).ok()?.state)))
            .collect()
    }
}
