//! Mapping between wire records and domain values.
//!
//! Outbound values are always recomputed from the domain object being sent. Inbound values are
//! built from the explicit wire fields only.

use serde::de::Error as _;

use super::error::ProtocolError;
use super::records::{CoordJson, CoordinatesJson, Direction, FleetJson, ShipJson};
use crate::coord::Coord;
use crate::ship::{Orientation, Ship, ShipType};

/// Drop the status and keep the cell.
pub fn coordinate_to_wire(coord: &Coord) -> CoordJson {
    CoordJson {
        x: coord.x(),
        y: coord.y(),
    }
}

/// Every inbound coordinate starts out with unknown status.
pub fn wire_to_coordinate(wire: &CoordJson) -> Coord {
    Coord::new(wire.x, wire.y)
}

/// Describe a ship by its first cell, cell count, and direction.
///
/// The direction comes from the first two cells alone: horizontal when the second cell sits to
/// the right of the first, vertical otherwise. Ships are assumed straight and contiguous.
pub fn ship_to_wire(ship: &Ship) -> Result<ShipJson, ProtocolError> {
    let [first, second, ..] = ship.cells() else {
        return Err(ProtocolError::UnadaptableShip { cells: ship.len() });
    };
    let direction = if second.x() > first.x() {
        Direction::Horizontal
    } else {
        Direction::Vertical
    };
    Ok(ShipJson {
        coord: coordinate_to_wire(first),
        length: ship.len(),
        direction,
    })
}

/// Expand a wire ship into its cells. The type is the one whose length matches.
///
/// The server never sends ships to this client; this is the inbound half of the ship record,
/// kept so a [`ShipJson`] can be read back, e.g. when checking a fleet reply.
pub fn wire_to_ship(wire: &ShipJson) -> Result<Ship, ProtocolError> {
    let ship_type = ShipType::from_length(wire.length).ok_or_else(|| {
        ProtocolError::Decode(serde_json::Error::custom(format_args!(
            "no ship type is {} cells long",
            wire.length
        )))
    })?;
    let orientation = match wire.direction {
        Direction::Horizontal => Orientation::Horizontal,
        Direction::Vertical => Orientation::Vertical,
    };
    Ok(Ship::place(ship_type, wire.coord.x, wire.coord.y, orientation))
}

/// Adapt a whole fleet, keeping the order the ships were placed in.
pub fn fleet_to_wire(ships: &[Ship]) -> Result<FleetJson, ProtocolError> {
    let fleet = ships.iter().map(ship_to_wire).collect::<Result<_, _>>()?;
    Ok(FleetJson { fleet })
}

pub fn list_to_wire(coords: &[Coord]) -> CoordinatesJson {
    CoordinatesJson {
        coordinates: coords.iter().map(coordinate_to_wire).collect(),
    }
}

pub fn wire_to_list(wire: &CoordinatesJson) -> Vec<Coord> {
    wire.coordinates.iter().map(wire_to_coordinate).collect()
}
