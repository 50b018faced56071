//! Error types for the protocol layer.

use crate::common::PlayerError;

/// Fatal conditions raised while serving the server's commands.
///
/// None of these are retried: once one is raised the session is over.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// A record could not be turned into JSON, e.g. two fields share a wire name.
    #[error("encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// Inbound JSON was malformed, or fields were missing or mistyped.
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// The server sent a command this client does not know.
    #[error("protocol violation: unrecognized command `{0}`")]
    UnknownCommand(String),

    /// A ship needs two cells for its direction to be known.
    #[error("cannot adapt a ship with {cells} cell(s) to the wire format")]
    UnadaptableShip { cells: usize },

    /// The player behind the protocol failed to answer.
    #[error("player failed: {0}")]
    Player(#[from] PlayerError),
}
