//! Wire protocol spoken with the BattleSalvo server.
//!
//! - **Records** ([`Envelope`], [`SetupJson`], ...): payload shapes with the server's field names.
//! - **Codec** ([`JsonCodec`]): records to JSON nodes, envelopes to single lines of text.
//! - **Adapters** ([`adapter`]): records to domain values and back.
//! - **Errors** ([`ProtocolError`]).

pub mod adapter;
mod codec;
mod error;
mod records;

pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use records::{
    CoordJson, CoordinatesJson, Direction, EndGameJson, Envelope, FleetJson, GameType, JoinJson,
    SetupJson, ShipJson,
};
