use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::types::Coord2;

/// One position on the pitch. Owned exclusively by its [`Board`]; the
/// neighbor list holds index pairs into the same board's grid, never
/// ownership-bearing handles.
///
/// [`Board`]: crate::Board
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    coords: Coord2,
    mine: bool,
    open: bool,
    marked: bool,
    neighbors: SmallVec<[Coord2; 8]>,
}

impl Cell {
    pub(crate) fn new(coords: Coord2, mine: bool) -> Self {
        Self {
            coords,
            mine,
            open: false,
            marked: false,
            neighbors: SmallVec::new(),
        }
    }

    /// Wires the adjacency list. Called once during board construction; the
    /// neighbor set never changes afterwards.
    pub(crate) fn connect(&mut self, neighbors: SmallVec<[Coord2; 8]>) {
        self.neighbors = neighbors;
    }

    pub fn coords(&self) -> Coord2 {
        self.coords
    }

    pub fn is_mine(&self) -> bool {
        self.mine
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_marked(&self) -> bool {
        self.marked
    }

    /// An opened mine. A board with an exploded cell is lost.
    pub fn is_exploded(&self) -> bool {
        self.open && self.mine
    }

    /// Coordinates of every bordering cell, clipped at the pitch edges.
    pub fn neighbors(&self) -> &[Coord2] {
        &self.neighbors
    }

    /// Cleared by the first-move guard, at most once per game.
    pub(crate) fn set_mine(&mut self, mine: bool) {
        self.mine = mine;
    }

    /// Opens the cell, reporting whether its open flag transitioned. Already
    /// open or currently marked cells are left untouched.
    pub(crate) fn open(&mut self) -> bool {
        if self.open || self.marked {
            return false;
        }
        self.open = true;
        true
    }

    /// End-of-game reveal: opens even a marked cell. Reports whether the
    /// open flag transitioned.
    pub(crate) fn force_open(&mut self) -> bool {
        if self.open {
            return false;
        }
        self.open = true;
        true
    }

    /// Unconditional flag flip; the board is responsible for refusing to
    /// mark an open cell.
    pub(crate) fn set_marked(&mut self, marked: bool) {
        self.marked = marked;
    }
}
