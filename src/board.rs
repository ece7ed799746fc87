use alloc::collections::VecDeque;
use alloc::vec::Vec;
use ndarray::Array3;
use serde::{Deserialize, Serialize};

use crate::*;

/// Visibility state of a single cell. Flagged and Revealed are mutually
/// exclusive: a cell toggles Hidden <-> Flagged, and only Hidden -> Revealed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CellState {
    #[default]
    Hidden,
    Revealed,
    Flagged,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// NxNxN Minesweeper board: mine layout, per-cell visibility, precomputed
/// neighbor-mine counts, and win/loss tracking.
///
/// Mutable only through `reveal`, `chord_reveal`, and `toggle_flag`; once the
/// status leaves `Playing`, all three become no-ops.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    layout: MineLayout,
    states: Array3<CellState>,
    counts: Array3<u8>,
    revealed_safe: CellCount,
    revealed_total: CellCount,
    flagged_count: CellCount,
    status: GameStatus,
    triggered_mine: Option<Coord3>,
}

impl Board {
    pub fn new(size: Coord, mine_coords: &[Coord3]) -> Result<Self> {
        Ok(Self::from_layout(MineLayout::from_mine_coords(
            size,
            mine_coords,
        )?))
    }

    pub fn from_layout(layout: MineLayout) -> Self {
        let size = layout.size();
        let n = size as usize;

        // Counts are computed exactly once; mines never move afterwards.
        let mut counts: Array3<u8> = Array3::default([n, n, n]);
        for cell in iter_cells(size) {
            counts[cell.to_nd_index()] = layout.adjacent_mine_count(cell);
        }

        Self {
            layout,
            states: Array3::default([n, n, n]),
            counts,
            revealed_safe: 0,
            revealed_total: 0,
            flagged_count: 0,
            status: GameStatus::default(),
            triggered_mine: None,
        }
    }

    // --- read surface ---

    pub fn size(&self) -> Coord {
        self.layout.size()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn in_bounds(&self, coords: Coord3) -> bool {
        coords.in_bounds(self.size())
    }

    pub fn is_mine(&self, coords: Coord3) -> bool {
        self.layout.contains_mine(coords)
    }

    pub fn state_at(&self, coords: Coord3) -> CellState {
        self.states[coords.to_nd_index()]
    }

    /// Precomputed count of mines among the cell's in-bounds 26-neighbors.
    pub fn count_at(&self, coords: Coord3) -> u8 {
        self.counts[coords.to_nd_index()]
    }

    pub fn iter_neighbors(&self, coords: Coord3) -> NeighborIter {
        coords.neighbors(self.size())
    }

    pub fn neighbors(&self, coords: Coord3) -> Vec<Coord3> {
        self.iter_neighbors(coords).collect()
    }

    pub fn mine_count(&self) -> CellCount {
        self.layout.mine_count()
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.layout.total_cells()
    }

    pub fn total_safe(&self) -> CellCount {
        self.layout.safe_cell_count()
    }

    pub fn revealed_safe(&self) -> CellCount {
        self.revealed_safe
    }

    pub fn revealed_total(&self) -> CellCount {
        self.revealed_total
    }

    pub fn hidden_count(&self) -> CellCount {
        self.total_cells() - self.revealed_total
    }

    pub fn safe_left(&self) -> CellCount {
        self.total_safe() - self.revealed_safe
    }

    /// The mine that ended the game, if it ended in a loss.
    pub fn triggered_mine(&self) -> Option<Coord3> {
        self.triggered_mine
    }

    // --- mutating surface ---

    /// Single-click reveal. A zero-count cell opens its whole zero region;
    /// revealing a mine loses the game and exposes only the clicked mine.
    pub fn reveal(&mut self, coords: Coord3) -> RevealOutcome {
        use RevealOutcome::*;

        if !self.in_bounds(coords) {
            return OutOfBounds;
        }
        if !self.status.is_playing() {
            return AlreadyRevealed;
        }

        match self.state_at(coords) {
            CellState::Revealed => AlreadyRevealed,
            CellState::Flagged => Flagged,
            CellState::Hidden => {
                if self.layout.contains_mine(coords) {
                    self.states[coords.to_nd_index()] = CellState::Revealed;
                    self.revealed_total += 1;
                    self.triggered_mine = Some(coords);
                    self.status = GameStatus::Lost;
                    HitMine
                } else {
                    self.flood_fill(coords);
                    self.check_win();
                    Revealed
                }
            }
        }
    }

    /// Chord action on a revealed numbered cell: when the flagged neighbor
    /// count equals the cell's number, reveals every remaining hidden
    /// neighbor. Wrongly placed flags can detonate a mine; the count match
    /// alone does not make chording safe.
    pub fn chord_reveal(&mut self, coords: Coord3) -> RevealOutcome {
        use RevealOutcome::*;

        if !self.in_bounds(coords) {
            return OutOfBounds;
        }
        if !self.status.is_playing() {
            return AlreadyRevealed;
        }
        if self.state_at(coords) != CellState::Revealed {
            return AlreadyRevealed;
        }

        let required_flags = self.count_at(coords);
        if required_flags == 0 {
            return AlreadyRevealed;
        }

        let flagged = self
            .iter_neighbors(coords)
            .filter(|&pos| self.state_at(pos) == CellState::Flagged)
            .count() as u8;
        if flagged != required_flags {
            return AlreadyRevealed;
        }

        for pos in coords.neighbors(self.size()) {
            if self.state_at(pos) != CellState::Hidden {
                continue;
            }
            if self.reveal(pos) == HitMine {
                return HitMine;
            }
        }

        Revealed
    }

    /// Toggles Hidden <-> Flagged. Revealed cells and finished games are
    /// untouched.
    pub fn toggle_flag(&mut self, coords: Coord3) -> MarkOutcome {
        use MarkOutcome::*;

        if !self.in_bounds(coords) || !self.status.is_playing() {
            return NoChange;
        }

        match self.state_at(coords) {
            CellState::Hidden => {
                self.states[coords.to_nd_index()] = CellState::Flagged;
                self.flagged_count += 1;
                Changed
            }
            CellState::Flagged => {
                self.states[coords.to_nd_index()] = CellState::Hidden;
                self.flagged_count -= 1;
                Changed
            }
            CellState::Revealed => NoChange,
        }
    }

    // --- internals ---

    /// Queue-based expansion from a safe hidden cell. Zero-count cells expand
    /// the frontier; numbered cells become visible but act as barriers.
    fn flood_fill(&mut self, start: Coord3) {
        let mut queue = VecDeque::from([start]);

        while let Some(coords) = queue.pop_front() {
            let idx = coords.to_nd_index();
            // Duplicates can be enqueued from two zero cells; mines should
            // never be enqueued at all.
            if self.states[idx] == CellState::Revealed || self.layout.contains_mine(coords) {
                continue;
            }

            self.states[idx] = CellState::Revealed;
            self.revealed_safe += 1;
            self.revealed_total += 1;

            if self.counts[idx] == 0 {
                queue.extend(coords.neighbors(self.size()).filter(|&pos| {
                    self.states[pos.to_nd_index()] == CellState::Hidden
                        && !self.layout.contains_mine(pos)
                }));
            }
        }
    }

    fn check_win(&mut self) {
        if self.revealed_safe == self.total_safe() {
            self.status = GameStatus::Won;
        }
    }
}
