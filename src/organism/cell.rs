//! Cell coordinates and their packed 64-bit key form.
//!
//! A `CellKey` stores `y` in the high 32 bits and `x` in the low 32 bits,
//! both reinterpreted as unsigned. Packing and unpacking are exact inverses
//! over the whole `i32 x i32` plane.

use std::fmt;

pub type CellCoord = i32;

/// Moore neighbourhood offsets in scan order (column-major, center excluded).
pub const NEIGHBOR_OFFSETS: [(CellCoord, CellCoord); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const _: () = assert!(
    u64::BITS == 2 * CellCoord::BITS,
    "CellKey must hold two coordinates without loss"
);

/// A lattice coordinate. Ordering is lexicographic by `x`, then `y`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub x: CellCoord,
    pub y: CellCoord,
}

impl Cell {
    #[inline(always)]
    pub const fn new(x: CellCoord, y: CellCoord) -> Self {
        Self { x, y }
    }

    #[inline(always)]
    pub const fn key(self) -> CellKey {
        CellKey::pack(self.x, self.y)
    }

    #[inline(always)]
    pub const fn offset(self, dx: CellCoord, dy: CellCoord) -> Self {
        Self {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
        }
    }

    /// The 8 surrounding cells in [`NEIGHBOR_OFFSETS`] order.
    #[inline]
    pub fn neighbors(self) -> [Cell; 8] {
        NEIGHBOR_OFFSETS.map(|(dx, dy)| self.offset(dx, dy))
    }

    pub fn chebyshev_distance(self, other: Cell) -> u64 {
        let dx = (i64::from(self.x) - i64::from(other.x)).unsigned_abs();
        let dy = (i64::from(self.y) - i64::from(other.y)).unsigned_abs();
        dx.max(dy)
    }
}

impl From<(CellCoord, CellCoord)> for Cell {
    #[inline]
    fn from((x, y): (CellCoord, CellCoord)) -> Self {
        Self { x, y }
    }
}

impl From<Cell> for (CellCoord, CellCoord) {
    #[inline]
    fn from(cell: Cell) -> Self {
        (cell.x, cell.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

/// Packed form of a [`Cell`], used as the live-set key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellKey(u64);

impl CellKey {
    #[inline(always)]
    pub const fn pack(x: CellCoord, y: CellCoord) -> Self {
        Self(((y as u32 as u64) << 32) | (x as u32 as u64))
    }

    #[inline(always)]
    pub const fn x(self) -> CellCoord {
        self.0 as u32 as CellCoord
    }

    #[inline(always)]
    pub const fn y(self) -> CellCoord {
        (self.0 >> 32) as u32 as CellCoord
    }

    #[inline(always)]
    pub const fn cell(self) -> Cell {
        Cell::new(self.x(), self.y())
    }

    #[inline(always)]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline(always)]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<Cell> for CellKey {
    #[inline(always)]
    fn from(cell: Cell) -> Self {
        cell.key()
    }
}

impl From<CellKey> for Cell {
    #[inline(always)]
    fn from(key: CellKey) -> Self {
        key.cell()
    }
}
