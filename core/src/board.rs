use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::fmt;

use ndarray::Array2;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::events::Listeners;
use crate::*;

/// Valid transitions:
/// - Fresh -> InProgress on the first successful open
/// - Fresh | InProgress -> Won | Lost
/// - any -> Fresh via [`Board::reset`]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameState {
    /// No cell has been opened yet; the first-move guard is still armed.
    Fresh,
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_fresh(self) -> bool {
        matches!(self, Self::Fresh)
    }

    pub const fn is_ended(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Fresh
    }
}

/// The pitch: exclusive owner of its cells, plus game lifecycle state and
/// the listener registry notifications fan out through.
pub struct Board {
    config: BoardConfig,
    cells: Array2<Cell>,
    state: GameState,
    initial_time: ClockTime,
    seed: u64,
    listeners: Listeners,
}

impl Board {
    /// Builds a pitch with mines placed by independent Bernoulli trials with
    /// probability `config.p_mine`.
    pub fn new(config: BoardConfig, seed: u64) -> Self {
        Self::with_generator(config, seed, BernoulliMines::new(seed))
    }

    pub fn with_initial_time(config: BoardConfig, seed: u64, initial_time: ClockTime) -> Self {
        let mut board = Self::new(config, seed);
        board.initial_time = initial_time;
        board
    }

    /// Builds a pitch from any mine placement strategy. [`Board::reset`]
    /// always falls back to Bernoulli placement.
    pub fn with_generator(config: BoardConfig, seed: u64, generator: impl MineGenerator) -> Self {
        let cells = build_cells(config, generator.generate(config));
        Self {
            config,
            cells,
            state: GameState::Fresh,
            initial_time: [0; 3],
            seed,
            listeners: Listeners::default(),
        }
    }

    /// Starts a new game in place: fresh grid, re-sampled mines, zeroed
    /// clock. All prior cells and listeners are discarded; a detached
    /// listener never hears from the new grid.
    pub fn reset(&mut self) {
        self.seed = SmallRng::seed_from_u64(self.seed).random();
        self.cells = build_cells(
            self.config,
            BernoulliMines::new(self.seed).generate(self.config),
        );
        self.state = GameState::Fresh;
        self.initial_time = [0; 3];
        self.listeners.clear();
    }

    /// Reassembles a board from previously captured state. Used by the
    /// snapshot restore path; never re-randomizes mine placement.
    pub(crate) fn from_parts(
        config: BoardConfig,
        cells: Array2<Cell>,
        state: GameState,
        initial_time: ClockTime,
        seed: u64,
    ) -> Self {
        Self {
            config,
            cells,
            state,
            initial_time,
            seed,
            listeners: Listeners::default(),
        }
    }

    pub(crate) fn seed(&self) -> u64 {
        self.seed
    }

    pub fn height(&self) -> Coord {
        self.config.height
    }

    pub fn width(&self) -> Coord {
        self.config.width
    }

    pub fn p_mine(&self) -> f64 {
        self.config.p_mine
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_ended(&self) -> bool {
        self.state.is_ended()
    }

    pub fn is_won(&self) -> bool {
        matches!(self.state, GameState::Won)
    }

    pub fn initial_time(&self) -> ClockTime {
        self.initial_time
    }

    pub fn set_initial_time(&mut self, initial_time: ClockTime) {
        self.initial_time = initial_time;
    }

    /// Panics if `coords` lies outside the pitch; callers are expected to
    /// only issue coordinates obtained from board enumeration.
    pub fn cell(&self, coords: Coord2) -> &Cell {
        &self.cells[coords.to_nd_index()]
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Live count of mined neighbors. Recomputed on every call, never
    /// cached: the first-move guard may clear a mine flag after adjacency
    /// is built.
    pub fn neighbor_mine_count(&self, coords: Coord2) -> u8 {
        self.cell(coords)
            .neighbors()
            .iter()
            .filter(|&&pos| self.cells[pos.to_nd_index()].is_mine())
            .count() as u8
    }

    /// Attaches a listener; it is invoked synchronously on every matching
    /// state change until the game ends or the board resets.
    pub fn attach(&mut self, scope: ListenerScope, listener: impl ChangeListener + 'static) {
        self.listeners.attach(scope, Box::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Opens the cell at `coords`. No-op once the game has ended, or when
    /// the cell is already open or currently marked. Zero-neighbor openings
    /// flood outwards; end-of-game is evaluated once, after the flood
    /// settles.
    pub fn open_field(&mut self, coords: Coord2) -> OpenOutcome {
        use OpenOutcome::*;

        if self.state.is_ended() {
            return NoChange;
        }

        {
            let cell = &self.cells[coords.to_nd_index()];
            if cell.is_open() || cell.is_marked() {
                return NoChange;
            }
        }

        // First click is never fatal: defuse before the open lands.
        if self.state.is_fresh() {
            let cell = &mut self.cells[coords.to_nd_index()];
            if cell.is_mine() {
                cell.set_mine(false);
            }
        }

        let opened = self.cells[coords.to_nd_index()].open();
        debug_assert!(opened);
        self.listeners.emit(&BoardEvent::CellChanged { coords });

        if self.state.is_fresh() {
            self.state = GameState::InProgress;
        }

        if !self.cells[coords.to_nd_index()].is_mine() && self.neighbor_mine_count(coords) == 0 {
            self.flood_open(coords);
        }

        match self.evaluate_end() {
            Some(true) => Won,
            Some(false) => Exploded,
            None => Opened,
        }
    }

    /// Toggles the mark on the cell at `coords`. No-op once the game has
    /// ended. Marking an open cell is refused here rather than in
    /// [`Cell`], keeping the cell-level flip unconditional.
    pub fn mark_field(&mut self, coords: Coord2) -> MarkOutcome {
        use MarkOutcome::*;

        if self.state.is_ended() {
            return NoChange;
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_open() {
            return NoChange;
        }
        let marked = cell.is_marked();
        cell.set_marked(!marked);

        self.listeners.emit(&BoardEvent::CellChanged { coords });
        self.evaluate_end();
        Toggled
    }

    /// Iterative worklist replacement for the recursive flood fill: a
    /// neighbor of a zero-count cell is never a mine, and `Cell::open` is
    /// idempotent, so the loop terminates with the same set of open cells
    /// regardless of traversal order.
    fn flood_open(&mut self, start: Coord2) {
        let mut queue: VecDeque<Coord2> = self.cell(start).neighbors().iter().copied().collect();

        while let Some(coords) = queue.pop_front() {
            if !self.cells[coords.to_nd_index()].open() {
                continue;
            }
            self.listeners.emit(&BoardEvent::CellChanged { coords });

            if self.neighbor_mine_count(coords) == 0 {
                queue.extend(self.cell(coords).neighbors().iter().copied());
            }
        }
    }

    /// Full-grid end-of-game scan, run once after every open/mark mutation.
    /// Loss takes priority: a won board can never contain an exploded cell.
    fn evaluate_end(&mut self) -> Option<bool> {
        if self.cells.iter().any(Cell::is_exploded) {
            self.finish(false);
            return Some(false);
        }

        if self.cells.iter().all(|cell| cell.is_marked() || cell.is_open()) {
            self.finish(true);
            Some(true)
        } else {
            None
        }
    }

    fn finish(&mut self, won: bool) {
        self.state = if won { GameState::Won } else { GameState::Lost };
        log::debug!("game ended, won = {won}");

        // Reveal the pitch; a won game keeps its marks in place.
        let mut revealed: Vec<Coord2> = Vec::new();
        for cell in self.cells.iter_mut() {
            if won && cell.is_marked() {
                continue;
            }
            if cell.force_open() {
                revealed.push(cell.coords());
            }
        }
        for coords in revealed {
            self.listeners.emit(&BoardEvent::CellChanged { coords });
        }

        self.listeners.emit(&BoardEvent::GameEnded { won });
        self.listeners.clear();
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

pub(crate) fn build_cells(config: BoardConfig, mine_mask: Array2<bool>) -> Array2<Cell> {
    let bounds = config.size();
    let mut cells = Array2::from_shape_fn(bounds.to_nd_index(), |(x, y)| {
        let coords = (x as Coord, y as Coord);
        Cell::new(coords, mine_mask[[x, y]])
    });

    for x in 0..bounds.0 {
        for y in 0..bounds.1 {
            let coords = (x, y);
            cells[coords.to_nd_index()].connect(adjacent_coords(coords, bounds));
        }
    }
    cells
}
