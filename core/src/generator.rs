use ndarray::Array2;

use crate::*;

pub trait LayoutGenerator {
    fn generate(self, config: GameConfig) -> SpecialLayout;
}

/// Energy restock rolled when advancing to the next level.
pub const LEVEL_ENERGY_MIN: CellCount = 15;
pub const LEVEL_ENERGY_MAX: CellCount = 30;

pub fn roll_level_energy<R: rand::Rng + ?Sized>(rng: &mut R) -> CellCount {
    rng.random_range(LEVEL_ENERGY_MIN..=LEVEL_ENERGY_MAX)
}

/// Seeded generation strategy: one combined uniform draw of distinct cells
/// across the whole grid, the first `bounties` of which pay bounty and the
/// rest energy. Sampling without replacement terminates regardless of how
/// full the grid is.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: GameConfig) -> SpecialLayout {
        use rand::prelude::*;

        let total = config.total_cells();
        let mut bounties = config.bounties;
        let mut energy = config.energy;
        if config.special_cells() > total {
            log::warn!(
                "Grid cannot hold {} bounty + {} energy cells, only {} fit, clamping",
                bounties,
                energy,
                total
            );
            bounties = bounties.min(total);
            energy = energy.min(total - bounties);
        }

        let mut special_mask: Array2<SpecialCell> = Array2::default(config.size.to_nd_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let picks = rand::seq::index::sample(
            &mut rng,
            total as usize,
            (bounties + energy) as usize,
        );
        {
            let cells = special_mask
                .as_slice_mut()
                .expect("layout should be standard");
            for (i, pick) in picks.into_iter().enumerate() {
                cells[pick] = if (i as CellCount) < bounties {
                    SpecialCell::Bounty
                } else {
                    SpecialCell::Energy
                };
            }
        }

        SpecialLayout::from_special_mask(special_mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_counts_match_config() {
        let config = GameConfig::new((12, 12), 3, 20);
        let layout = RandomLayoutGenerator::new(42).generate(config);

        assert_eq!(layout.size(), (12, 12));
        assert_eq!(layout.bounty_count(), 3);
        assert_eq!(layout.energy_count(), 20);
    }

    #[test]
    fn same_seed_reproduces_the_layout() {
        let config = GameConfig::new((12, 12), 2, 17);

        let a = RandomLayoutGenerator::new(7).generate(config);
        let b = RandomLayoutGenerator::new(7).generate(config);

        assert_eq!(a, b);
    }

    #[test]
    fn overfull_request_is_clamped() {
        let config = GameConfig::new_unchecked((2, 2), 5, 3);
        let layout = RandomLayoutGenerator::new(0).generate(config);

        assert_eq!(layout.bounty_count(), 4);
        assert_eq!(layout.energy_count(), 0);
    }

    #[test]
    fn level_energy_roll_stays_in_range() {
        use rand::prelude::*;
        let mut rng = SmallRng::seed_from_u64(123);

        for _ in 0..100 {
            let energy = roll_level_energy(&mut rng);
            assert!((LEVEL_ENERGY_MIN..=LEVEL_ENERGY_MAX).contains(&energy));
        }
    }
}
