//! Wire records: every payload the server and this client exchange.
//!
//! Field names here are the server's, not ours. Renames are part of the contract and must match
//! byte for byte, hyphens included.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::GameResult;
use crate::ship::FleetSpec;

/// Top-level message: a command name and its command-specific arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "method-name")]
    pub method_name: String,
    pub arguments: Value,
}

impl Envelope {
    pub fn new(method_name: impl Into<String>, arguments: Value) -> Self {
        Self {
            method_name: method_name.into(),
            arguments,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordJson {
    pub x: usize,
    pub y: usize,
}

/// An ordered list of cells: a volley, or the subset of one that hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinatesJson {
    pub coordinates: Vec<CoordJson>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Horizontal,
    Vertical,
}

/// A placed ship: first cell, length, and the direction it extends in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipJson {
    pub coord: CoordJson,
    pub length: usize,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetJson {
    pub fleet: Vec<ShipJson>,
}

/// `setup` arguments: board size and how many ships of each type to field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupJson {
    pub width: usize,
    pub height: usize,
    #[serde(rename = "fleet-spec")]
    pub fleet_spec: FleetSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GameType {
    Single,
    Multi,
}

/// `join` reply arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinJson {
    pub name: String,
    #[serde(rename = "game-type")]
    pub game_type: GameType,
}

/// `end-game` arguments, when the server includes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndGameJson {
    pub result: GameResult,
    pub reason: String,
}
