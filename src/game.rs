//! Local game: a referee that plays two [`Player`]s against each other in one process.

use log::{debug, info};

use crate::{
    common::{GameResult, PlayerError},
    player::Player,
    ship::FleetSpec,
};

/// Drives a full salvo game between two players sharing one board size and fleet spec.
pub struct LocalGame<A: Player, B: Player> {
    first: A,
    second: B,
    width: usize,
    height: usize,
    spec: FleetSpec,
}

impl<A: Player, B: Player> LocalGame<A, B> {
    pub fn new(first: A, second: B, width: usize, height: usize, spec: FleetSpec) -> Self {
        Self {
            first,
            second,
            width,
            height,
            spec,
        }
    }

    pub fn first(&self) -> &A {
        &self.first
    }

    pub fn second(&self) -> &B {
        &self.second
    }

    /// Play until a fleet is sunk. Returns the result from the first player's side.
    pub fn run(&mut self) -> Result<GameResult, PlayerError> {
        let (h, w) = (self.height, self.width);
        self.first.resize(h, w)?;
        self.second.resize(h, w)?;
        self.first.place_fleet(h, w, &self.spec)?;
        self.second.place_fleet(h, w, &self.spec)?;
        info!(
            "{} vs {} on a {}x{} board",
            self.first.name(),
            self.second.name(),
            w,
            h
        );

        let mut round = 0usize;
        let result = loop {
            round += 1;
            let first_shots = self.first.next_volley()?;
            let second_shots = self.second.next_volley()?;
            if first_shots.is_empty() && second_shots.is_empty() {
                // neither side has a cell left to fire at
                break GameResult::Draw;
            }

            let first_hits = self.second.resolve_incoming(&first_shots)?;
            let second_hits = self.first.resolve_incoming(&second_shots)?;
            self.first.record_confirmed_hits(&first_hits)?;
            self.second.record_confirmed_hits(&second_hits)?;
            debug!(
                "round {}: {} hit {}/{}, {} hit {}/{}",
                round,
                self.first.name(),
                first_hits.len(),
                first_shots.len(),
                self.second.name(),
                second_hits.len(),
                second_shots.len()
            );

            match (self.first.ships_afloat() == 0, self.second.ships_afloat() == 0) {
                (false, false) => continue,
                (true, true) => break GameResult::Draw,
                (false, true) => break GameResult::Win,
                (true, false) => break GameResult::Lose,
            }
        };

        let reason = match result {
            GameResult::Draw => format!("The game ended in a draw after {} rounds.", round),
            _ => format!("A fleet was sunk after {} rounds.", round),
        };
        info!("game over: {} {:?} ({})", self.first.name(), result, reason);
        self.first.end_game(result, &reason);
        self.second.end_game(result.flip(), &reason);
        Ok(result)
    }
}
