//! Game board state: ship placements and incoming shots on a board of any size.

use core::fmt;
use rand::Rng;

use crate::common::BoardError;
use crate::config::{DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::coord::{Coord, CoordStatus};
use crate::ship::{Orientation, Ship, ShipType};

/// Random placement tries before falling back to a full scan.
const PLACEMENT_ATTEMPTS: usize = 100;

/// Per-cell status grid. Used both for shots received on our board and for what we know of the
/// opponent's board.
#[derive(Clone, PartialEq, Eq)]
pub struct ShotGrid {
    width: usize,
    height: usize,
    cells: Vec<CoordStatus>,
}

impl ShotGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![CoordStatus::Unknown; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Status at (`x`, `y`); anything off the grid reads as unknown.
    pub fn get(&self, x: usize, y: usize) -> CoordStatus {
        if self.in_bounds(x, y) {
            self.cells[y * self.width + x]
        } else {
            CoordStatus::Unknown
        }
    }

    /// Record `status` at (`x`, `y`). Off-grid cells are ignored and yield `false`.
    pub fn set(&mut self, x: usize, y: usize, status: CoordStatus) -> bool {
        if self.in_bounds(x, y) {
            self.cells[y * self.width + x] = status;
            true
        } else {
            false
        }
    }

    /// Cells not yet shot at, row by row.
    pub fn unknown_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y)))
            .filter(move |&(x, y)| self.get(x, y) == CoordStatus::Unknown)
    }

    pub fn count(&self, status: CoordStatus) -> usize {
        self.cells.iter().filter(|&&s| s == status).count()
    }
}

impl fmt::Debug for ShotGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ShotGrid {{ {}x{}, hits: {}, misses: {} }}",
            self.width,
            self.height,
            self.count(CoordStatus::Hit),
            self.count(CoordStatus::Miss)
        )
    }
}

/// A player's own board: where the fleet sits and what the opponent has fired at it.
#[derive(Debug, Clone)]
pub struct Board {
    ships: Vec<Ship>,
    shots: ShotGrid,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            ships: Vec::new(),
            shots: ShotGrid::new(DEFAULT_BOARD_SIZE, DEFAULT_BOARD_SIZE),
        }
    }
}

impl Board {
    /// Create an empty board (no ships placed). Both dimensions must lie in
    /// `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`.
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        let allowed = MIN_BOARD_SIZE..=MAX_BOARD_SIZE;
        if !allowed.contains(&width) || !allowed.contains(&height) {
            return Err(BoardError::InvalidDimensions { width, height });
        }
        Ok(Self {
            ships: Vec::new(),
            shots: ShotGrid::new(width, height),
        })
    }

    pub fn width(&self) -> usize {
        self.shots.width()
    }

    pub fn height(&self) -> usize {
        self.shots.height()
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Shots received so far.
    pub fn shots(&self) -> &ShotGrid {
        &self.shots
    }

    pub fn ships_afloat(&self) -> usize {
        self.ships.iter().filter(|s| !s.is_sunk()).count()
    }

    /// Returns `true` when all ships are sunk.
    pub fn all_sunk(&self) -> bool {
        self.ships_afloat() == 0
    }

    pub fn has_ship_at(&self, x: usize, y: usize) -> bool {
        self.ships.iter().any(|s| s.contains(x, y))
    }

    fn check_fits(&self, ship: &Ship) -> Result<(), BoardError> {
        if ship
            .cells()
            .iter()
            .any(|c| !self.shots.in_bounds(c.x(), c.y()))
        {
            return Err(BoardError::ShipOutOfBounds);
        }
        if ship.cells().iter().any(|c| self.has_ship_at(c.x(), c.y())) {
            return Err(BoardError::ShipOverlaps);
        }
        Ok(())
    }

    /// Place a ship on the board.
    pub fn place(&mut self, ship: Ship) -> Result<(), BoardError> {
        self.check_fits(&ship)?;
        self.ships.push(ship);
        Ok(())
    }

    /// Largest anchor (x, y) that keeps a ship of `length` on the board, if it fits at all.
    fn anchor_limits(&self, length: usize, orientation: Orientation) -> Option<(usize, usize)> {
        let (w, h) = (self.width(), self.height());
        match orientation {
            Orientation::Horizontal if length <= w => Some((w - length, h - 1)),
            Orientation::Vertical if length <= h => Some((w - 1, h - length)),
            _ => None,
        }
    }

    /// Returns a random non-overlapping placement for a ship of `ship_type`.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        ship_type: ShipType,
    ) -> Result<Ship, BoardError> {
        let length = ship_type.length();
        for _ in 0..PLACEMENT_ATTEMPTS {
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let Some((max_x, max_y)) = self.anchor_limits(length, orientation) else {
                continue;
            };
            let x = rng.random_range(0..=max_x);
            let y = rng.random_range(0..=max_y);
            let ship = Ship::place(ship_type, x, y, orientation);
            if self.check_fits(&ship).is_ok() {
                return Ok(ship);
            }
        }

        // crowded board: pick among every legal slot instead
        let mut candidates = Vec::new();
        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            let Some((max_x, max_y)) = self.anchor_limits(length, orientation) else {
                continue;
            };
            for y in 0..=max_y {
                for x in 0..=max_x {
                    let ship = Ship::place(ship_type, x, y, orientation);
                    if self.check_fits(&ship).is_ok() {
                        candidates.push(ship);
                    }
                }
            }
        }
        if candidates.is_empty() {
            return Err(BoardError::UnableToPlaceShip(ship_type));
        }
        let pick = rng.random_range(0..candidates.len());
        Ok(candidates.swap_remove(pick))
    }

    /// Process an incoming shot, marking hits/misses. Shots off the board are misses and are not
    /// recorded.
    pub fn receive_shot(&mut self, x: usize, y: usize) -> CoordStatus {
        if !self.shots.in_bounds(x, y) {
            return CoordStatus::Miss;
        }
        let struck = self.ships.iter_mut().any(|s| s.hit(x, y));
        let status = if struck {
            CoordStatus::Hit
        } else {
            CoordStatus::Miss
        };
        self.shots.set(x, y, status);
        status
    }

    /// Resolve a volley, returning the shots that struck a ship in the order they were fired.
    pub fn receive_volley(&mut self, shots: &[Coord]) -> Vec<Coord> {
        shots
            .iter()
            .filter(|c| self.receive_shot(c.x(), c.y()) == CoordStatus::Hit)
            .map(|c| Coord::with_status(c.x(), c.y(), CoordStatus::Hit))
            .collect()
    }
}
