//! Common types for BattleSalvo: board errors, player errors and game results.

use serde::{Deserialize, Serialize};

use crate::ship::ShipType;

/// Outcome of a finished game from one player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GameResult {
    Win,
    Lose,
    Draw,
}

impl GameResult {
    /// The same outcome seen from the opponent's side.
    pub fn flip(self) -> Self {
        match self {
            GameResult::Win => GameResult::Lose,
            GameResult::Lose => GameResult::Win,
            GameResult::Draw => GameResult::Draw,
        }
    }
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// A board needs at least one row and one column.
    #[error("invalid board dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Ship placement leaves the board.
    #[error("ship placement is out of bounds")]
    ShipOutOfBounds,
    /// Ship placement overlaps another ship.
    #[error("ship placement overlaps with another ship")]
    ShipOverlaps,
    /// No free slot is left for a ship of this type.
    #[error("unable to place {0:?}")]
    UnableToPlaceShip(ShipType),
}

/// Errors a player implementation can raise while serving a game.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("console error: {0}")]
    Io(#[from] std::io::Error),
    /// The interactive input ended before the player answered.
    #[error("input closed")]
    InputClosed,
}
