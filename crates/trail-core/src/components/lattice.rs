//! Hex Lattice
//!
//! Axial hex coordinates, the six headings, and the radius-bounded lattice
//! the colony lives on.

use serde::{Deserialize, Serialize};

/// A hex address in axial coordinates, relative to the colony origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct HexCell {
    pub q: i32,
    pub r: i32,
}

impl HexCell {
    /// The nest
    pub const ORIGIN: HexCell = HexCell { q: 0, r: 0 };

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Hex distance from the origin
    pub fn ring(self) -> i32 {
        self.q.abs().max(self.r.abs()).max((self.q + self.r).abs())
    }

    /// The adjacent cell in `direction`, with no bounds check
    pub fn step(self, direction: Direction) -> HexCell {
        let (dq, dr) = direction.delta();
        HexCell::new(self.q + dq, self.r + dr)
    }

    pub fn is_origin(self) -> bool {
        self == HexCell::ORIGIN
    }
}

impl From<(i32, i32)> for HexCell {
    fn from((q, r): (i32, i32)) -> Self {
        HexCell::new(q, r)
    }
}

/// One of the six headings, clockwise from "up"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Up,
    UpRight,
    DownRight,
    Down,
    DownLeft,
    UpLeft,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Up,
        Direction::UpRight,
        Direction::DownRight,
        Direction::Down,
        Direction::DownLeft,
        Direction::UpLeft,
    ];

    /// Direction for an index, taken mod 6
    pub fn from_index(index: usize) -> Direction {
        Self::ALL[index % 6]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Axial (dq, dr) offset of one step
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::UpRight => (1, -1),
            Direction::DownRight => (1, 0),
            Direction::Down => (0, 1),
            Direction::DownLeft => (-1, 1),
            Direction::UpLeft => (-1, 0),
        }
    }

    /// Heading one step counter-clockwise (d - 1 mod 6)
    pub fn left(self) -> Direction {
        Self::from_index(self.index() + 5)
    }

    /// Heading one step clockwise (d + 1 mod 6)
    pub fn right(self) -> Direction {
        Self::from_index(self.index() + 1)
    }

    pub fn opposite(self) -> Direction {
        Self::from_index(self.index() + 3)
    }

    /// The three headings reachable in one step, in selection order:
    /// left, straight, right
    pub fn forward_fan(self) -> [Direction; 3] {
        [self.left(), self, self.right()]
    }
}

/// Radius-bounded hexagonal lattice centred on the origin
///
/// Backing grids are `(2R + 1)²` squares in axial coordinates; the corners of
/// the square that fall outside the hexagon are sentinel cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lattice {
    radius: u32,
}

impl Lattice {
    pub fn new(radius: u32) -> Self {
        Self { radius }
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Row length of the backing square grid
    pub fn side(&self) -> usize {
        2 * self.radius as usize + 1
    }

    /// Number of slots in the backing grid, sentinels included
    pub fn grid_len(&self) -> usize {
        self.side() * self.side()
    }

    /// Number of valid cells: 3R(R + 1) + 1
    pub fn cell_count(&self) -> usize {
        let r = self.radius as usize;
        3 * r * (r + 1) + 1
    }

    pub fn is_valid(&self, cell: HexCell) -> bool {
        cell.ring() <= self.radius as i32
    }

    /// Pure coordinate arithmetic; the caller checks `is_valid` on the result
    pub fn neighbor(&self, cell: HexCell, direction: Direction) -> HexCell {
        cell.step(direction)
    }

    /// Valid neighbours of a cell, in direction order
    pub fn neighbors(&self, cell: HexCell) -> impl Iterator<Item = (Direction, HexCell)> + '_ {
        Direction::ALL
            .into_iter()
            .map(move |d| (d, cell.step(d)))
            .filter(move |(_, c)| self.is_valid(*c))
    }

    /// Index into the backing grid (row = r, column = q), for any cell
    /// inside the bounding square, valid or not
    pub fn grid_index(&self, cell: HexCell) -> Option<usize> {
        let radius = self.radius as i32;
        if cell.q.abs() > radius || cell.r.abs() > radius {
            return None;
        }
        let row = (cell.r + radius) as usize;
        let col = (cell.q + radius) as usize;
        Some(row * self.side() + col)
    }

    /// Inverse of `grid_index`
    pub fn cell_at(&self, index: usize) -> HexCell {
        let side = self.side();
        let radius = self.radius as i32;
        let row = (index / side) as i32;
        let col = (index % side) as i32;
        HexCell::new(col - radius, row - radius)
    }

    /// All valid cells, row-major over the backing grid
    pub fn cells(&self) -> impl Iterator<Item = HexCell> + '_ {
        (0..self.grid_len())
            .map(move |i| self.cell_at(i))
            .filter(move |c| self.is_valid(*c))
    }

    /// Planar centre of a cell: unit spacing, origin at (0, 0), "up" is +y
    pub fn to_planar(&self, cell: HexCell) -> (f64, f64) {
        let half_root3 = 3f64.sqrt() / 2.0;
        let q = cell.q as f64;
        let r = cell.r as f64;
        (q * half_root3, -r - q / 2.0)
    }
}
