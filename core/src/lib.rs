#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use events::*;
pub use generator::*;
pub use snapshot::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod events;
mod generator;
mod snapshot;
mod types;

/// Shape and mine density a pitch is built from.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub height: Coord,
    pub width: Coord,
    pub p_mine: f64,
}

impl BoardConfig {
    pub const fn new_unchecked(height: Coord, width: Coord, p_mine: f64) -> Self {
        Self {
            height,
            width,
            p_mine,
        }
    }

    pub fn new(height: Coord, width: Coord, p_mine: f64) -> Self {
        let clamped_height = height.max(1);
        let clamped_width = width.max(1);
        let clamped_p = p_mine.clamp(0.0, 1.0);
        if clamped_height != height || clamped_width != width || clamped_p != p_mine {
            log::warn!(
                "clamped board config {}x{} (p = {}) to {}x{} (p = {})",
                height,
                width,
                p_mine,
                clamped_height,
                clamped_width,
                clamped_p,
            );
        }
        Self::new_unchecked(clamped_height, clamped_width, clamped_p)
    }

    /// `(height, width)` as a coordinate bound.
    pub const fn size(&self) -> Coord2 {
        (self.height, self.width)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.height, self.width)
    }
}

/// Outcome of an open request.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OpenOutcome {
    NoChange,
    Opened,
    Exploded,
    Won,
}

impl OpenOutcome {
    pub const fn has_update(self) -> bool {
        use OpenOutcome::*;
        match self {
            NoChange => false,
            Opened => true,
            Exploded => true,
            Won => true,
        }
    }
}

/// Outcome of a mark request.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Toggled,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Toggled => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_clamps_degenerate_values() {
        let config = BoardConfig::new(0, 10, 1.5);
        assert_eq!(config.size(), (1, 10));
        assert_eq!(config.p_mine, 1.0);
    }

    #[test]
    fn total_cells_covers_the_pitch() {
        assert_eq!(BoardConfig::new(4, 5, 0.2).total_cells(), 20);
    }
}
