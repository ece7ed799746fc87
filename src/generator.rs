use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use rand::prelude::*;

use crate::*;

/// Builds a mine layout with a guaranteed-safe opening: the first click and
/// its whole 26-neighborhood never hold a mine, so the opening reveal always
/// flood-fills at least one zero cell.
///
/// Identical `(size, mine_count, first_click, seed)` inputs always produce an
/// identical layout.
pub fn generate_layout(
    size: Coord,
    mine_count: CellCount,
    first_click: Coord3,
    seed: u64,
) -> Result<MineLayout> {
    if size < 1 {
        return Err(GameError::InvalidSize);
    }
    if !first_click.in_bounds(size) {
        return Err(GameError::InvalidCoords);
    }

    let mut excluded: BTreeSet<Coord3> = first_click.neighbors(size).collect();
    excluded.insert(first_click);

    let total = (size as usize).pow(3);
    let available = total - excluded.len();
    if mine_count as usize > available {
        // Never clamp or partially place.
        return Err(GameError::TooManyMines);
    }

    // Candidate pool in ascending flat-index order, then an in-place
    // Fisher-Yates shuffle; the first `mine_count` entries become mines.
    let mut candidates: Vec<Coord3> = iter_cells(size)
        .filter(|cell| !excluded.contains(cell))
        .collect();

    let mut rng = SmallRng::seed_from_u64(seed);
    for i in (1..candidates.len()).rev() {
        let j = rng.random_range(0..=i);
        candidates.swap(i, j);
    }

    let layout = MineLayout::from_mine_coords(size, &candidates[..mine_count as usize])?;
    log::debug!(
        "generated {size}^3 layout: {mine_count} mines, safe zone of {} cells around {first_click}",
        excluded.len()
    );
    Ok(layout)
}

/// `generate_layout` plus board construction, for normal play.
pub fn generate(
    size: Coord,
    mine_count: CellCount,
    first_click: Coord3,
    seed: u64,
) -> Result<Board> {
    Ok(Board::from_layout(generate_layout(
        size,
        mine_count,
        first_click,
        seed,
    )?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_click_and_neighbors_are_never_mines() {
        let click = Coord3::new(2, 2, 2);
        for seed in 0..100 {
            let board = generate(6, 10, click, seed).unwrap();
            assert!(!board.is_mine(click), "mine under first click, seed={seed}");
            for n in click.neighbors(6) {
                assert!(!board.is_mine(n), "mine at neighbor {n}, seed={seed}");
            }
        }
    }

    #[test]
    fn places_the_exact_mine_count() {
        let board = generate(8, 25, Coord3::new(3, 3, 3), 42).unwrap();
        assert_eq!(board.mine_count(), 25);
        assert_eq!(
            iter_cells(8).filter(|&c| board.is_mine(c)).count(),
            25
        );
    }

    #[test]
    fn same_seed_reproduces_the_layout_cell_by_cell() {
        let click = Coord3::new(2, 2, 2);
        let a = generate(6, 10, click, 99).unwrap();
        let b = generate(6, 10, click, 99).unwrap();

        for cell in iter_cells(6) {
            assert_eq!(a.is_mine(cell), b.is_mine(cell), "mismatch at {cell}");
        }
    }

    #[test]
    fn different_seeds_differ_somewhere() {
        let click = Coord3::new(2, 2, 2);
        let a = generate(6, 10, click, 1).unwrap();
        let b = generate(6, 10, click, 2).unwrap();

        assert!(iter_cells(6).any(|c| a.is_mine(c) != b.is_mine(c)));
    }

    #[test]
    fn rejects_mine_count_exceeding_available_cells() {
        // 3^3 grid with an interior click excludes all 27 cells.
        assert_eq!(
            generate(3, 1, Coord3::new(1, 1, 1), 0),
            Err(GameError::TooManyMines)
        );
        // Corner click excludes 8, leaving 19 available.
        assert_eq!(
            generate(3, 20, Coord3::new(0, 0, 0), 0),
            Err(GameError::TooManyMines)
        );
        assert!(generate(3, 19, Coord3::new(0, 0, 0), 0).is_ok());
    }

    #[test]
    fn rejects_out_of_bounds_first_click() {
        assert_eq!(
            generate(3, 1, Coord3::new(3, 0, 0), 0),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn full_fill_of_all_available_cells_stays_safe() {
        let click = Coord3::new(0, 0, 0);
        let board = generate(3, 19, click, 7).unwrap();
        assert!(!board.is_mine(click));
        assert_eq!(board.total_safe(), 8);
    }
}
