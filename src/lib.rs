#![no_std]

extern crate alloc;

use ndarray::Array3;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use generator::*;
pub use solver::*;
pub use types::*;

mod board;
mod error;
mod generator;
mod solver;
mod types;

/// Mine placement for an NxNxN board. Immutable after construction; the
/// gameplay state machine layers visibility on top of it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array3<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array3<bool>) -> Self {
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);
        Self {
            mine_mask,
            mine_count,
        }
    }

    /// Duplicate coordinates collapse into the mask (set semantics).
    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord3]) -> Result<Self> {
        if size < 1 {
            return Err(GameError::InvalidSize);
        }

        let n = size as usize;
        let mut mine_mask: Array3<bool> = Array3::default([n, n, n]);

        for &coords in mine_coords {
            if !coords.in_bounds(size) {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn size(&self) -> Coord {
        self.mine_mask.dim().0 as Coord
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord3) -> bool {
        self.mine_mask[coords.to_nd_index()]
    }

    pub fn adjacent_mine_count(&self, coords: Coord3) -> u8 {
        coords
            .neighbors(self.size())
            .filter(|&pos| self.contains_mine(pos))
            .count() as u8
    }
}

/// Result of a reveal or chord-reveal action. Not an error type: every
/// variant is an expected gameplay outcome.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    /// At least one cell became visible.
    Revealed,
    /// A mine was revealed; the game is lost.
    HitMine,
    /// Nothing to do: cell already revealed, game over, or chord not armed.
    AlreadyRevealed,
    /// The cell is flagged and must be unflagged before revealing.
    Flagged,
    OutOfBounds,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Revealed | Self::HitMine)
    }
}

/// Result of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}
