use std::collections::BTreeMap;

use crate::protocol::GameType;
use crate::ship::{FleetSpec, ShipType};

/// Name announced to the server in the `join` reply.
pub const DEFAULT_NAME: &str = "giovabattelli";
/// Board edge used by the local game when none is given.
pub const DEFAULT_BOARD_SIZE: usize = 10;
pub const MIN_BOARD_SIZE: usize = 6;
pub const MAX_BOARD_SIZE: usize = 15;

/// Longest inbound line (in bytes) a transport accepts before giving up on the peer.
pub const MAX_LINE_LENGTH: usize = 1_000_000;

pub const NUM_SHIP_TYPES: usize = 4;
pub const SHIP_TYPES: [ShipType; NUM_SHIP_TYPES] = [
    ShipType::Carrier,
    ShipType::Battleship,
    ShipType::Destroyer,
    ShipType::Submarine,
];

/// One ship of every type.
pub fn default_fleet_spec() -> FleetSpec {
    SHIP_TYPES.iter().map(|&t| (t, 1)).collect::<BTreeMap<_, _>>()
}

/// Identity this client presents when joining a server game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub name: String,
    pub game_type: GameType,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            game_type: GameType::Single,
        }
    }
}
