use core::fmt;

use serde::{Deserialize, Serialize};

/// Single coordinate axis. Signed so that callers can probe out-of-bounds
/// positions (e.g. `(-1, 0, 0)`) and get a clean bounds failure.
pub type Coord = i32;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Integer coordinate in an NxNxN grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord3 {
    pub x: Coord,
    pub y: Coord,
    pub z: Coord,
}

impl Coord3 {
    pub const fn new(x: Coord, y: Coord, z: Coord) -> Self {
        Self { x, y, z }
    }

    pub const fn in_bounds(self, size: Coord) -> bool {
        self.x >= 0
            && self.x < size
            && self.y >= 0
            && self.y < size
            && self.z >= 0
            && self.z < size
    }

    /// Iterates the bounds-filtered 26-neighborhood (3x3x3 minus self).
    ///
    /// This is the single neighbor-enumeration primitive; count computation,
    /// flood fill, chording, the deduction rules, and the generator's
    /// exclusion zone all go through it.
    pub fn neighbors(self, size: Coord) -> NeighborIter {
        NeighborIter::new(self, size)
    }
}

impl From<(Coord, Coord, Coord)> for Coord3 {
    fn from((x, y, z): (Coord, Coord, Coord)) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for Coord3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.x, self.y, self.z)
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord3 {
    type Output = [usize; 3];

    /// Only meaningful for in-bounds coordinates.
    fn to_nd_index(self) -> Self::Output {
        [self.x as usize, self.y as usize, self.z as usize]
    }
}

const DISPLACEMENTS: [(Coord, Coord, Coord); 26] = build_displacements();

const fn build_displacements() -> [(Coord, Coord, Coord); 26] {
    let mut table = [(0, 0, 0); 26];
    let mut filled = 0;
    let mut dz = -1;
    while dz <= 1 {
        let mut dy = -1;
        while dy <= 1 {
            let mut dx = -1;
            while dx <= 1 {
                if dx != 0 || dy != 0 || dz != 0 {
                    table[filled] = (dx, dy, dz);
                    filled += 1;
                }
                dx += 1;
            }
            dy += 1;
        }
        dz += 1;
    }
    table
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord3,
    size: Coord,
    index: u8,
}

impl NeighborIter {
    fn new(center: Coord3, size: Coord) -> Self {
        Self {
            center,
            size,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord3;

    fn next(&mut self) -> Option<Self::Item> {
        while usize::from(self.index) < DISPLACEMENTS.len() {
            let (dx, dy, dz) = DISPLACEMENTS[self.index as usize];
            self.index += 1;

            let next = Coord3::new(self.center.x + dx, self.center.y + dy, self.center.z + dz);
            if next.in_bounds(self.size) {
                return Some(next);
            }
        }
        None
    }
}

/// Iterates every cell of an NxNxN grid in ascending flat-index order
/// (x innermost, then y, then z). The generator's candidate pool and the
/// solver's scan both rely on this order being fixed.
pub fn iter_cells(size: Coord) -> impl Iterator<Item = Coord3> {
    (0..size).flat_map(move |z| {
        (0..size).flat_map(move |y| (0..size).map(move |x| Coord3::new(x, y, z)))
    })
}
