use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Tries granted at every level start.
pub const STARTING_TRIES: i32 = 10;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    Playing,
    GameOver,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::GameOver)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Playing
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridGame {
    layout: SpecialLayout,
    board: Array2<CellMark>,
    level: u32,
    tries_remaining: i32,
    energy_count: i32,
    found_bounties: Saturating<CellCount>,
    state: EngineState,
}

impl GridGame {
    pub fn new(level: u32, layout: SpecialLayout) -> Self {
        let size = layout.size();
        let energy_count = layout.energy_count().into();
        Self {
            layout,
            board: Array2::default(size.to_nd_index()),
            level,
            tries_remaining: STARTING_TRIES,
            energy_count,
            found_bounties: Saturating(0),
            state: Default::default(),
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.layout.size()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Unclamped: never goes negative in practice because the game ends the
    /// moment it hits zero, but nothing here enforces that.
    pub fn tries_remaining(&self) -> i32 {
        self.tries_remaining
    }

    /// The displayed energy counter. May go negative (collecting an already
    /// collected energy cell keeps subtracting).
    pub fn energy_count(&self) -> i32 {
        self.energy_count
    }

    pub fn bounty_count(&self) -> CellCount {
        self.layout.bounty_count()
    }

    pub fn unfound_bounties(&self) -> CellCount {
        self.layout.bounty_count().saturating_sub(self.found_bounties.0)
    }

    pub fn mark_at(&self, coords: Coord2) -> CellMark {
        self.board[coords.to_nd_index()]
    }

    pub fn kind_at(&self, coords: Coord2) -> SpecialCell {
        self.layout[coords]
    }

    /// Pointer-hover reveal. Counters are untouched; anything that cannot
    /// change (out of bounds, already revealed, found, finished game) reports
    /// [`HoverOutcome::NoChange`].
    pub fn hover(&mut self, coords: Coord2) -> HoverOutcome {
        use HoverOutcome::*;

        if self.state.is_finished() {
            return NoChange;
        }
        let Ok(coords) = self.layout.validate_coords(coords) else {
            return NoChange;
        };

        match self.board[coords.to_nd_index()] {
            CellMark::Hidden => {
                self.board[coords.to_nd_index()] = CellMark::Revealed;
                Revealed
            }
            CellMark::Revealed | CellMark::Found => NoChange,
        }
    }

    /// Resolves a click. Out-of-bounds and empty cells are a no-op; clicking
    /// any special applies its counter effects, found or not, so
    /// re-collecting a cell repeats them.
    pub fn click(&mut self, coords: Coord2) -> Result<ClickOutcome> {
        use ClickOutcome::*;

        self.check_not_finished()?;
        let Ok(coords) = self.layout.validate_coords(coords) else {
            return Ok(NoChange);
        };

        match self.layout[coords] {
            SpecialCell::Empty => Ok(NoChange),
            SpecialCell::Bounty => {
                self.mark_found(coords);
                self.tries_remaining -= 1;
                if self.tries_remaining == 0 || self.unfound_bounties() == 0 {
                    self.end_game();
                    Ok(GameOver)
                } else {
                    // every collected bounty also bumps the displayed
                    // energy counter
                    self.energy_count += 1;
                    Ok(BountyFound)
                }
            }
            SpecialCell::Energy => {
                self.mark_found(coords);
                self.tries_remaining += 1;
                self.energy_count -= 1;
                Ok(EnergyFound)
            }
        }
    }

    /// Swaps in a freshly generated layout for the next level: level counter
    /// up, tries restocked, board fully hidden again.
    pub fn advance_level(&mut self, layout: SpecialLayout) -> Result<()> {
        self.check_not_finished()?;

        let size = layout.size();
        self.level += 1;
        self.tries_remaining = STARTING_TRIES;
        self.energy_count = layout.energy_count().into();
        self.found_bounties = Saturating(0);
        self.board = Array2::default(size.to_nd_index());
        self.layout = layout;
        Ok(())
    }

    fn mark_found(&mut self, coords: Coord2) {
        if self.board[coords.to_nd_index()].is_found() {
            return;
        }
        if self.layout[coords].is_bounty() {
            self.found_bounties += 1;
        }
        self.board[coords.to_nd_index()] = CellMark::Found;
    }

    fn end_game(&mut self) {
        if self.state.is_finished() {
            return;
        }
        self.state = EngineState::GameOver;
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
