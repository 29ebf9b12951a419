use std::fmt;

use smallvec::SmallVec;

/// A single addressable grid position. Identity is the coordinate pair;
/// start/end designation lives on the corridor graph, not on the cell.
#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Cell {
        Cell { x, y }
    }

    /// True when the two cells line up on exactly one axis, i.e. a purely
    /// horizontal or purely vertical corridor could connect them.
    pub fn shares_one_axis(&self, other: Cell) -> bool {
        (self.x == other.x) != (self.y == other.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

pub type CellSmallVec = SmallVec<[Cell; 8]>;

/// Border of the grid a generation endpoint is placed on.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}
