#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub bounties: CellCount,
    pub energy: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, bounties: CellCount, energy: CellCount) -> Self {
        Self {
            size,
            bounties,
            energy,
        }
    }

    pub fn new((size_x, size_y): Coord2, bounties: CellCount, energy: CellCount) -> Self {
        let size_x = size_x.clamp(1, Coord::MAX);
        let size_y = size_y.clamp(1, Coord::MAX);
        let total = mult(size_x, size_y);
        let bounties = bounties.min(total);
        let energy = energy.min(total - bounties);
        Self::new_unchecked((size_x, size_y), bounties, energy)
    }

    /// The opening board: a 12x12 grid hiding a single bounty and no energy.
    pub const fn first_level() -> Self {
        Self::new_unchecked((12, 12), 1, 0)
    }

    /// Config for the level after this one: one more bounty, a fresh energy
    /// stock (see [`roll_level_energy`]).
    pub fn next_level(&self, energy: CellCount) -> Self {
        Self::new(self.size, self.bounties.saturating_add(1), energy)
    }

    pub const fn special_cells(&self) -> CellCount {
        self.bounties.saturating_add(self.energy)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpecialLayout {
    special_mask: Array2<SpecialCell>,
    bounty_count: CellCount,
    energy_count: CellCount,
}

impl SpecialLayout {
    pub fn from_special_mask(special_mask: Array2<SpecialCell>) -> Self {
        let count_of = |kind: SpecialCell| {
            special_mask
                .iter()
                .filter(|&&cell| cell == kind)
                .count()
                .try_into()
                .unwrap()
        };
        let bounty_count = count_of(SpecialCell::Bounty);
        let energy_count = count_of(SpecialCell::Energy);
        Self {
            special_mask,
            bounty_count,
            energy_count,
        }
    }

    pub fn from_special_coords(
        size: Coord2,
        bounties: &[Coord2],
        energy: &[Coord2],
    ) -> Result<Self> {
        let mut special_mask: Array2<SpecialCell> = Array2::default(size.to_nd_index());

        let mut place = |coords: Coord2, kind: SpecialCell| {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            let cell = &mut special_mask[coords.to_nd_index()];
            if !matches!(*cell, SpecialCell::Empty) && *cell != kind {
                return Err(GameError::SpecialsOverlap);
            }
            *cell = kind;
            Ok(())
        };

        for &coords in bounties {
            place(coords, SpecialCell::Bounty)?;
        }
        for &coords in energy {
            place(coords, SpecialCell::Energy)?;
        }

        Ok(Self::from_special_mask(special_mask))
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            size: self.size(),
            bounties: self.bounty_count,
            energy: self.energy_count,
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.special_mask.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        self.special_mask.len().try_into().unwrap()
    }

    pub fn bounty_count(&self) -> CellCount {
        self.bounty_count
    }

    pub fn energy_count(&self) -> CellCount {
        self.energy_count
    }

    pub fn kind_at(&self, coords: Coord2) -> SpecialCell {
        self[coords]
    }
}

impl Index<Coord2> for SpecialLayout {
    type Output = SpecialCell;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.special_mask[(x as usize, y as usize)]
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum HoverOutcome {
    NoChange,
    Revealed,
}

impl HoverOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Revealed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    NoChange,
    BountyFound,
    EnergyFound,
    GameOver,
}

impl ClickOutcome {
    pub const fn has_update(self) -> bool {
        use ClickOutcome::*;
        match self {
            NoChange => false,
            BountyFound => true,
            EnergyFound => true,
            GameOver => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_counts_derive_from_mask() {
        let layout =
            SpecialLayout::from_special_coords((4, 4), &[(0, 0), (1, 0)], &[(2, 2)]).unwrap();

        assert_eq!(layout.bounty_count(), 2);
        assert_eq!(layout.energy_count(), 1);
        assert!(layout.kind_at((1, 0)).is_bounty());
        assert!(layout.kind_at((2, 2)).is_energy());
        assert_eq!(layout.kind_at((3, 3)), SpecialCell::Empty);
    }

    #[test]
    fn layout_rejects_out_of_bounds_and_overlap() {
        assert_eq!(
            SpecialLayout::from_special_coords((2, 2), &[(2, 0)], &[]),
            Err(GameError::InvalidCoords)
        );
        assert_eq!(
            SpecialLayout::from_special_coords((2, 2), &[(0, 0)], &[(0, 0)]),
            Err(GameError::SpecialsOverlap)
        );
    }

    #[test]
    fn config_clamps_specials_to_grid() {
        let config = GameConfig::new((2, 2), 3, 5);

        assert_eq!(config.bounties, 3);
        assert_eq!(config.energy, 1);
        assert_eq!(config.special_cells(), config.total_cells());
    }

    #[test]
    fn next_level_adds_one_bounty() {
        let config = GameConfig::first_level();
        let next = config.next_level(20);

        assert_eq!(next.bounties, 2);
        assert_eq!(next.energy, 20);
        assert_eq!(next.size, config.size);
    }
}
