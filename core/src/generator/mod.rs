use ndarray::Array2;

use crate::error::{BoardError, Result};
use crate::types::{Coord2, ToNdIndex};
use crate::BoardConfig;

pub use random::*;

mod random;

/// Produces the mine mask a new pitch is built from.
pub trait MineGenerator {
    fn generate(self, config: BoardConfig) -> Array2<bool>;
}

/// A caller-supplied mine layout, for scripted games and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMines {
    mask: Array2<bool>,
}

impl FixedMines {
    pub fn from_mask(mask: Array2<bool>) -> Self {
        Self { mask }
    }

    pub fn from_coords(size: Coord2, mines: &[Coord2]) -> Result<Self> {
        let mut mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mines {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(BoardError::InvalidCoords);
            }
            mask[coords.to_nd_index()] = true;
        }

        Ok(Self { mask })
    }
}

impl MineGenerator for FixedMines {
    fn generate(self, config: BoardConfig) -> Array2<bool> {
        let (height, width) = config.size();
        if self.mask.dim() != (height as usize, width as usize) {
            log::warn!(
                "Fixed mine mask is {:?}, config asks for {:?}",
                self.mask.dim(),
                config.size(),
            );
        }
        self.mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_coords_rejects_out_of_range_mines() {
        assert_eq!(
            FixedMines::from_coords((2, 2), &[(2, 0)]),
            Err(BoardError::InvalidCoords)
        );
    }

    #[test]
    fn from_coords_sets_exactly_the_given_cells() {
        let fixed = FixedMines::from_coords((2, 3), &[(0, 1), (1, 2)]).unwrap();
        let mask = fixed.generate(BoardConfig::new(2, 3, 0.0));

        assert!(mask[[0, 1]]);
        assert!(mask[[1, 2]]);
        assert_eq!(mask.iter().filter(|&&mine| mine).count(), 2);
    }
}
