use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::*;
pub use rules::*;

mod rules;

/// Outcome of a full auto-solve run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolveReport {
    /// Every deduction applied, in the order it was found.
    pub steps: Vec<DeductionStep>,
    /// True when the run ended with the board won; false on a stall.
    pub solved: bool,
}

/// One full pass over the board in scan order, evaluating R1 then R2 on every
/// revealed numbered cell. Within a pass the first assertion about a cell
/// wins; later steps drop already-asserted cells and vanish entirely if
/// nothing novel remains. An empty batch means the solver has stalled.
pub fn solve_step(board: &Board) -> Vec<DeductionStep> {
    let mut steps = Vec::new();
    let mut seen: BTreeSet<Coord3> = BTreeSet::new();

    for cell in iter_cells(board.size()) {
        if board.state_at(cell) != CellState::Revealed || board.count_at(cell) == 0 {
            continue;
        }

        for step in [
            all_hidden_are_mines(board, cell),
            all_remaining_are_safe(board, cell),
        ]
        .into_iter()
        .flatten()
        {
            push_novel(&mut steps, &mut seen, step);
        }
    }

    steps
}

fn push_novel(steps: &mut Vec<DeductionStep>, seen: &mut BTreeSet<Coord3>, mut step: DeductionStep) {
    step.affected_cells.retain(|&cell| !seen.contains(&cell));
    if step.affected_cells.is_empty() {
        return;
    }
    seen.extend(step.affected_cells.iter().copied());
    steps.push(step);
}

/// Reveals `first_click`, then alternates deduction passes with applying
/// their verdicts (flag inferred mines, reveal inferred-safe cells) until the
/// game ends or a pass finds nothing.
///
/// Each applied step converts at least one hidden cell, so the loop ends
/// within at most `size^3` productive iterations.
pub fn solve_full(board: &mut Board, first_click: Coord3) -> SolveReport {
    let mut steps = Vec::new();
    board.reveal(first_click);

    while board.status().is_playing() {
        let batch = solve_step(board);
        if batch.is_empty() {
            log::debug!(
                "solver stalled with {} safe cells left hidden",
                board.safe_left()
            );
            break;
        }

        for step in &batch {
            for &cell in &step.affected_cells {
                match step.verdict {
                    Verdict::Mine => {
                        if board.state_at(cell) == CellState::Hidden {
                            board.toggle_flag(cell);
                        }
                    }
                    Verdict::Safe => {
                        board.reveal(cell);
                    }
                }
            }
        }

        steps.extend(batch);
    }

    SolveReport {
        steps,
        solved: board.status() == GameStatus::Won,
    }
}

/// Decides whether a layout is solvable without guessing from the given
/// opening. Works on a fresh board built from the layout, so the caller's
/// state is never touched; meant as the rejection oracle in a generate-retry
/// pipeline.
pub fn validate_no_guess(size: Coord, mine_coords: &[Coord3], first_click: Coord3) -> Result<bool> {
    let mut board = Board::new(size, mine_coords)?;
    Ok(solve_full(&mut board, first_click).solved)
}
