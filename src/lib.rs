//! BattleSalvo client: a salvo battleship player that serves a game server's commands over
//! line-delimited JSON, plus a local game against the built-in AI.

pub mod ai;
pub mod board;
pub mod common;
pub mod config;
pub mod coord;
pub mod dispatcher;
pub mod game;
mod logging;
pub mod player;
pub mod protocol;
pub mod ship;
pub mod transport;
pub mod view;

pub use board::{Board, ShotGrid};
pub use common::*;
pub use config::*;
pub use coord::{Coord, CoordStatus};
pub use dispatcher::Dispatcher;
pub use game::LocalGame;
pub use logging::init_logging;
pub use player::{AiPlayer, ConsolePlayer, Player, PlayerState};
pub use protocol::{GameType, JsonCodec, ProtocolError};
pub use ship::{FleetSpec, Orientation, Ship, ShipType};
pub use transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
