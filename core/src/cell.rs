use serde::{Deserialize, Serialize};

/// Player-visible per-cell state stored by the gameplay engine.
///
/// `Found` takes precedence over `Revealed`: once a cell is collected its
/// reveal tint never shows again until the board is regenerated.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellMark {
    Hidden,
    Revealed,
    Found,
}

impl CellMark {
    pub const fn is_found(self) -> bool {
        matches!(self, Self::Found)
    }
}

impl Default for CellMark {
    fn default() -> Self {
        Self::Hidden
    }
}

/// What a cell pays out when clicked. A cell is never both bounty and energy.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SpecialCell {
    Empty,
    Bounty,
    Energy,
}

impl SpecialCell {
    pub const fn is_bounty(self) -> bool {
        matches!(self, Self::Bounty)
    }

    pub const fn is_energy(self) -> bool {
        matches!(self, Self::Energy)
    }
}

impl Default for SpecialCell {
    fn default() -> Self {
        Self::Empty
    }
}
