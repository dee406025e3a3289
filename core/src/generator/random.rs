use ndarray::Array2;
use rand::prelude::*;

use super::MineGenerator;
use crate::BoardConfig;

/// Mine placement by independent Bernoulli trials: each cell is a mine with
/// probability `p_mine`, sampled from a seeded RNG so the same seed always
/// yields the same pitch.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BernoulliMines {
    seed: u64,
}

impl BernoulliMines {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for BernoulliMines {
    fn generate(self, config: BoardConfig) -> Array2<bool> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let (height, width) = config.size();

        let mask = Array2::from_shape_fn((height as usize, width as usize), |_| {
            rng.random_bool(config.p_mine)
        });

        log::debug!(
            "placed {} mines on a {}x{} pitch (p = {})",
            mask.iter().filter(|&&mine| mine).count(),
            height,
            width,
            config.p_mine,
        );
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_probability_places_no_mines() {
        let mask = BernoulliMines::new(7).generate(BoardConfig::new(4, 4, 0.0));
        assert!(mask.iter().all(|&mine| !mine));
    }

    #[test]
    fn full_probability_mines_every_cell() {
        let mask = BernoulliMines::new(7).generate(BoardConfig::new(4, 4, 1.0));
        assert!(mask.iter().all(|&mine| mine));
    }

    #[test]
    fn same_seed_yields_same_layout() {
        let config = BoardConfig::new(8, 8, 0.4);
        let first = BernoulliMines::new(99).generate(config);
        let second = BernoulliMines::new(99).generate(config);
        assert_eq!(first, second);
    }
}
