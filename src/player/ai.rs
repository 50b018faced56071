use rand::rngs::SmallRng;

use crate::{
    ai,
    common::PlayerError,
    coord::Coord,
    ship::{FleetSpec, Ship},
};

use super::{Player, PlayerState};

/// AI player that uses probability based targeting.
pub struct AiPlayer {
    name: String,
    rng: SmallRng,
    state: PlayerState,
}

impl AiPlayer {
    pub fn new(name: impl Into<String>, rng: SmallRng) -> Self {
        Self {
            name: name.into(),
            rng,
            state: PlayerState::default(),
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }
}

impl Player for AiPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn resize(&mut self, height: usize, width: usize) -> Result<(), PlayerError> {
        self.state.resize(height, width)
    }

    fn place_fleet(
        &mut self,
        height: usize,
        width: usize,
        spec: &FleetSpec,
    ) -> Result<Vec<Ship>, PlayerError> {
        self.state.place_fleet(&mut self.rng, height, width, spec)
    }

    fn next_volley(&mut self) -> Result<Vec<Coord>, PlayerError> {
        let volley = ai::choose_volley(
            self.state.opponent(),
            self.state.fleet_lengths(),
            self.state.volley_size(),
            &mut self.rng,
        )
        .into_iter()
        .map(|(x, y)| Coord::new(x, y))
        .collect();
        Ok(self.state.commit_volley(volley))
    }

    fn resolve_incoming(&mut self, shots: &[Coord]) -> Result<Vec<Coord>, PlayerError> {
        Ok(self.state.resolve_incoming(shots))
    }

    fn record_confirmed_hits(&mut self, hits: &[Coord]) -> Result<(), PlayerError> {
        self.state.record_confirmed_hits(hits);
        Ok(())
    }

    fn ships_afloat(&self) -> usize {
        self.state.board().ships_afloat()
    }
}
