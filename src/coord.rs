/// What is known about a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordStatus {
    Unknown,
    Hit,
    Miss,
}

/// A board cell. `x` is the column, `y` the row. The status never leaves the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    x: usize,
    y: usize,
    status: CoordStatus,
}

impl Coord {
    /// A cell with unknown status.
    pub fn new(x: usize, y: usize) -> Self {
        Self::with_status(x, y, CoordStatus::Unknown)
    }

    pub fn with_status(x: usize, y: usize, status: CoordStatus) -> Self {
        Self { x, y, status }
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    pub fn status(&self) -> CoordStatus {
        self.status
    }

    pub fn set_status(&mut self, status: CoordStatus) {
        self.status = status;
    }

    /// `true` if both coordinates name the same cell, whatever their status.
    pub fn same_cell(&self, other: &Coord) -> bool {
        self.x == other.x && self.y == other.y
    }
}
