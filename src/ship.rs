//! Ship definitions and placement geometry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::coord::{Coord, CoordStatus};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Kind of ship. Variants are ordered largest first, which is also the order fleets are placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShipType {
    Carrier,
    Battleship,
    Destroyer,
    Submarine,
}

impl ShipType {
    /// Number of cells a ship of this type covers.
    pub const fn length(self) -> usize {
        match self {
            ShipType::Carrier => 6,
            ShipType::Battleship => 5,
            ShipType::Destroyer => 4,
            ShipType::Submarine => 3,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            ShipType::Carrier => "Carrier",
            ShipType::Battleship => "Battleship",
            ShipType::Destroyer => "Destroyer",
            ShipType::Submarine => "Submarine",
        }
    }

    /// The ship type covering exactly `length` cells, if any.
    pub fn from_length(length: usize) -> Option<Self> {
        crate::config::SHIP_TYPES
            .iter()
            .copied()
            .find(|t| t.length() == length)
    }
}

/// How many ships of each type a player must field.
pub type FleetSpec = BTreeMap<ShipType, usize>;

/// A ship and the cells it covers, in order from its anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    ship_type: ShipType,
    cells: Vec<Coord>,
}

impl Ship {
    /// Wrap an explicit list of cells. No geometry checks are made.
    pub fn new(ship_type: ShipType, cells: Vec<Coord>) -> Self {
        Self { ship_type, cells }
    }

    /// Lay a ship out from its anchor at (`x`, `y`).
    pub fn place(ship_type: ShipType, x: usize, y: usize, orientation: Orientation) -> Self {
        let cells = (0..ship_type.length())
            .map(|i| match orientation {
                Orientation::Horizontal => Coord::new(x + i, y),
                Orientation::Vertical => Coord::new(x, y + i),
            })
            .collect();
        Self { ship_type, cells }
    }

    pub fn ship_type(&self) -> ShipType {
        self.ship_type
    }

    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.cells.iter().any(|c| c.x() == x && c.y() == y)
    }

    /// Register a shot at (`x`, `y`). Returns `true` if it struck this ship.
    pub fn hit(&mut self, x: usize, y: usize) -> bool {
        match self.cells.iter_mut().find(|c| c.x() == x && c.y() == y) {
            Some(cell) => {
                cell.set_status(CoordStatus::Hit);
                true
            }
            None => false,
        }
    }

    /// Check if the ship is sunk (all cells hit).
    pub fn is_sunk(&self) -> bool {
        self.cells.iter().all(|c| c.status() == CoordStatus::Hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_lays_cells_from_anchor() {
        let ship = Ship::place(ShipType::Submarine, 1, 2, Orientation::Vertical);
        let cells: Vec<_> = ship.cells().iter().map(|c| (c.x(), c.y())).collect();
        assert_eq!(cells, vec![(1, 2), (1, 3), (1, 4)]);
        assert!(ship.contains(1, 4));
        assert!(!ship.contains(2, 2));
    }

    #[test]
    fn sinks_after_every_cell_is_hit() {
        let mut ship = Ship::place(ShipType::Submarine, 0, 0, Orientation::Horizontal);
        assert!(ship.hit(0, 0));
        assert!(ship.hit(1, 0));
        assert!(!ship.is_sunk());
        assert!(!ship.hit(0, 1));
        assert!(ship.hit(2, 0));
        assert!(ship.is_sunk());
    }

    #[test]
    fn ship_type_lengths_round_trip() {
        for t in crate::config::SHIP_TYPES {
            assert_eq!(ShipType::from_length(t.length()), Some(t));
        }
        assert_eq!(ShipType::from_length(2), None);
    }
}
