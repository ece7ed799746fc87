use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::*;

/// The two deterministic deduction rules. Both read a revealed numbered cell
/// and its neighbor partition (flagged / hidden / revealed).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleKind {
    /// R1: remaining mines equal the hidden neighbors, so all of them are
    /// mines.
    AllHiddenAreMines,
    /// R2: the flags already account for the full count, so every remaining
    /// hidden neighbor is safe.
    AllRemainingAreSafe,
}

impl RuleKind {
    pub const fn id(self) -> &'static str {
        match self {
            Self::AllHiddenAreMines => "R1",
            Self::AllRemainingAreSafe => "R2",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Mine,
    Safe,
}

impl Verdict {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

/// One explainable inference: which rule fired, from which numbered cell(s),
/// and what it determined about which hidden cells. Read-only artifact for
/// logging and replay; never stored on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionStep {
    pub rule: RuleKind,
    pub source_cells: Vec<Coord3>,
    pub affected_cells: Vec<Coord3>,
    pub verdict: Verdict,
}

impl fmt::Display for DeductionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] from ", self.rule)?;
        write_cells(f, &self.source_cells)?;
        f.write_str(" -> ")?;
        write_cells(f, &self.affected_cells)?;
        let label = if self.verdict.is_mine() { "MINE" } else { "SAFE" };
        write!(f, " = {label}")
    }
}

fn write_cells(f: &mut fmt::Formatter<'_>, cells: &[Coord3]) -> fmt::Result {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{cell}")?;
    }
    Ok(())
}

struct NeighborPartition {
    flagged: Vec<Coord3>,
    hidden: Vec<Coord3>,
}

fn partition_neighbors(board: &Board, cell: Coord3) -> NeighborPartition {
    let mut flagged = Vec::new();
    let mut hidden = Vec::new();
    for n in board.iter_neighbors(cell) {
        match board.state_at(n) {
            CellState::Flagged => flagged.push(n),
            CellState::Hidden => hidden.push(n),
            CellState::Revealed => {}
        }
    }
    NeighborPartition { flagged, hidden }
}

/// R1: if `count - flagged` is positive and equals the number of hidden
/// neighbors, every hidden neighbor holds a mine.
pub fn all_hidden_are_mines(board: &Board, cell: Coord3) -> Option<DeductionStep> {
    if board.state_at(cell) != CellState::Revealed {
        return None;
    }
    let count = board.count_at(cell);
    if count == 0 {
        return None;
    }

    let NeighborPartition { flagged, hidden } = partition_neighbors(board, cell);
    let remaining = count as i32 - flagged.len() as i32;
    if remaining > 0 && remaining as usize == hidden.len() {
        Some(DeductionStep {
            rule: RuleKind::AllHiddenAreMines,
            source_cells: vec![cell],
            affected_cells: hidden,
            verdict: Verdict::Mine,
        })
    } else {
        None
    }
}

/// R2: if the flagged neighbors already match the count, every remaining
/// hidden neighbor is safe.
pub fn all_remaining_are_safe(board: &Board, cell: Coord3) -> Option<DeductionStep> {
    if board.state_at(cell) != CellState::Revealed {
        return None;
    }
    let count = board.count_at(cell);
    if count == 0 {
        return None;
    }

    let NeighborPartition { flagged, hidden } = partition_neighbors(board, cell);
    if flagged.len() == count as usize && !hidden.is_empty() {
        Some(DeductionStep {
            rule: RuleKind::AllRemainingAreSafe,
            source_cells: vec![cell],
            affected_cells: hidden,
            verdict: Verdict::Safe,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    fn coord(x: Coord, y: Coord, z: Coord) -> Coord3 {
        Coord3::new(x, y, z)
    }

    #[test]
    fn r1_fires_when_hidden_neighbors_match_the_count() {
        // 2x2x2, mine in one corner; the opposite corner sees count 1 with
        // seven hidden neighbors, so R1 stays quiet until only the mine is
        // left hidden.
        let mut board = Board::new(2, &[coord(0, 0, 0)]).unwrap();
        for cell in iter_cells(2).filter(|&c| c != coord(0, 0, 0) && c != coord(1, 1, 1)) {
            board.reveal(cell);
        }
        board.reveal(coord(1, 1, 1));

        // All safe cells revealed; every numbered cell has exactly the mine
        // hidden.
        let step = all_hidden_are_mines(&board, coord(1, 1, 1)).unwrap();
        assert_eq!(step.rule, RuleKind::AllHiddenAreMines);
        assert_eq!(step.verdict, Verdict::Mine);
        assert_eq!(step.affected_cells, [coord(0, 0, 0)]);
    }

    #[test]
    fn r1_stays_quiet_with_too_many_hidden_neighbors() {
        let mut board = Board::new(2, &[coord(0, 0, 0)]).unwrap();
        board.reveal(coord(1, 1, 1));
        assert_eq!(all_hidden_are_mines(&board, coord(1, 1, 1)), None);
    }

    #[test]
    fn r2_fires_once_flags_satisfy_the_count() {
        let mut board = Board::new(2, &[coord(0, 0, 0)]).unwrap();
        board.reveal(coord(1, 1, 1));
        board.toggle_flag(coord(0, 0, 0));

        let step = all_remaining_are_safe(&board, coord(1, 1, 1)).unwrap();
        assert_eq!(step.rule, RuleKind::AllRemainingAreSafe);
        assert_eq!(step.verdict, Verdict::Safe);
        assert_eq!(step.affected_cells.len(), 6);
        assert!(!step.affected_cells.contains(&coord(0, 0, 0)));
    }

    #[test]
    fn rules_ignore_hidden_and_zero_cells() {
        let mut board = Board::new(3, &[coord(0, 0, 0)]).unwrap();
        assert_eq!(all_hidden_are_mines(&board, coord(2, 2, 2)), None);

        board.reveal(coord(2, 2, 2));
        assert_eq!(board.count_at(coord(2, 2, 2)), 0);
        assert_eq!(all_hidden_are_mines(&board, coord(2, 2, 2)), None);
        assert_eq!(all_remaining_are_safe(&board, coord(2, 2, 2)), None);
    }

    #[test]
    fn step_trace_renders_rule_and_verdict() {
        let step = DeductionStep {
            rule: RuleKind::AllHiddenAreMines,
            source_cells: vec![coord(1, 1, 1)],
            affected_cells: vec![coord(0, 0, 0), coord(0, 1, 0)],
            verdict: Verdict::Mine,
        };

        let trace = step.to_string();
        assert_eq!(trace, "[R1] from (1,1,1) -> (0,0,0),(0,1,0) = MINE");
    }

    #[test]
    fn step_round_trips_through_serde() {
        let step = DeductionStep {
            rule: RuleKind::AllRemainingAreSafe,
            source_cells: vec![coord(2, 0, 1)],
            affected_cells: vec![coord(1, 0, 0)],
            verdict: Verdict::Safe,
        };

        let json = serde_json::to_string(&step).unwrap();
        let back: DeductionStep = serde_json::from_str(&json).unwrap();
        assert_eq!(back, step);
    }
}
