//! Player trait and implementations
//!
//! The [`Player`] trait is the capability set the protocol dispatcher and the local game drive.
//! Concrete players:
//! - AiPlayer: probability-based AI
//! - ConsolePlayer: interactive player reading shots from a terminal

use rand::Rng;

use crate::{
    board::{Board, ShotGrid},
    common::{GameResult, PlayerError},
    config::DEFAULT_BOARD_SIZE,
    coord::{Coord, CoordStatus},
    ship::{FleetSpec, Ship},
};

/// Interface implemented by different player types.
///
/// A Player is responsible for:
/// - Sizing its board and placing a fleet
/// - Choosing each volley
/// - Reporting which incoming shots struck it
/// - Tracking the results of its own shots
pub trait Player: Send {
    /// Name used when announcing results.
    fn name(&self) -> &str;

    /// Reset the board to `height` rows by `width` columns.
    fn resize(&mut self, height: usize, width: usize) -> Result<(), PlayerError>;

    /// Place a fleet matching `spec`, returning the ships in placement order.
    fn place_fleet(
        &mut self,
        height: usize,
        width: usize,
        spec: &FleetSpec,
    ) -> Result<Vec<Ship>, PlayerError>;

    /// Choose the next volley of shots, in firing order.
    fn next_volley(&mut self) -> Result<Vec<Coord>, PlayerError>;

    /// Apply the opponent's volley to our board and return the shots that hit, in firing order.
    fn resolve_incoming(&mut self, shots: &[Coord]) -> Result<Vec<Coord>, PlayerError>;

    /// Learn which of our last volley's shots struck the opponent.
    fn record_confirmed_hits(&mut self, hits: &[Coord]) -> Result<(), PlayerError>;

    /// Ships of ours not yet sunk.
    fn ships_afloat(&self) -> usize;

    /// Inform the player that the game is over.
    fn end_game(&mut self, _result: GameResult, _reason: &str) {}
}

/// Board bookkeeping shared by the player implementations.
#[derive(Debug, Clone)]
pub struct PlayerState {
    board: Board,
    opponent: ShotGrid,
    fleet_lengths: Vec<usize>,
    last_volley: Vec<Coord>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            board: Board::default(),
            opponent: ShotGrid::new(DEFAULT_BOARD_SIZE, DEFAULT_BOARD_SIZE),
            fleet_lengths: Vec::new(),
            last_volley: Vec::new(),
        }
    }
}

impl PlayerState {
    pub fn new(width: usize, height: usize) -> Result<Self, PlayerError> {
        Ok(Self {
            board: Board::new(width, height)?,
            opponent: ShotGrid::new(width, height),
            fleet_lengths: Vec::new(),
            last_volley: Vec::new(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// What we know of the opponent's board.
    pub fn opponent(&self) -> &ShotGrid {
        &self.opponent
    }

    /// Lengths of the ships each side fields.
    pub fn fleet_lengths(&self) -> &[usize] {
        &self.fleet_lengths
    }

    /// Shots still available on the opponent board, capped by our surviving ships.
    pub fn volley_size(&self) -> usize {
        self.board
            .ships_afloat()
            .min(self.opponent.count(CoordStatus::Unknown))
    }

    pub fn resize(&mut self, height: usize, width: usize) -> Result<(), PlayerError> {
        *self = Self::new(width, height)?;
        Ok(())
    }

    /// Place a fleet at random, largest ships first.
    pub fn place_fleet<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        height: usize,
        width: usize,
        spec: &FleetSpec,
    ) -> Result<Vec<Ship>, PlayerError> {
        let reuse = self.board.width() == width
            && self.board.height() == height
            && self.board.ships().is_empty();
        if !reuse {
            self.resize(height, width)?;
        }
        for (&ship_type, &count) in spec {
            for _ in 0..count {
                let ship = self.board.random_placement(rng, ship_type)?;
                self.board.place(ship)?;
                self.fleet_lengths.push(ship_type.length());
            }
        }
        Ok(self.board.ships().to_vec())
    }

    /// Remember the volley about to be fired so its misses can be recorded later.
    pub fn commit_volley(&mut self, volley: Vec<Coord>) -> Vec<Coord> {
        self.last_volley = volley.clone();
        volley
    }

    pub fn resolve_incoming(&mut self, shots: &[Coord]) -> Vec<Coord> {
        self.board.receive_volley(shots)
    }

    pub fn record_confirmed_hits(&mut self, hits: &[Coord]) {
        for shot in self.last_volley.drain(..) {
            let status = if hits.iter().any(|h| h.same_cell(&shot)) {
                CoordStatus::Hit
            } else {
                CoordStatus::Miss
            };
            self.opponent.set(shot.x(), shot.y(), status);
        }
        for hit in hits {
            self.opponent.set(hit.x(), hit.y(), CoordStatus::Hit);
        }
    }
}

pub mod ai;
pub use ai::AiPlayer;

pub mod console;
pub use console::ConsolePlayer;
