use std::io::{BufRead, Write};

use rand::rngs::SmallRng;

use crate::{
    common::{GameResult, PlayerError},
    coord::{Coord, CoordStatus},
    ship::{FleetSpec, Ship},
    view::{render_board, render_opponent},
};

use super::{Player, PlayerState};

/// Interactive player: the fleet is placed at random, shots are typed in as `x y`.
pub struct ConsolePlayer<R, W> {
    name: String,
    input: R,
    output: W,
    rng: SmallRng,
    state: PlayerState,
}

impl<R: BufRead + Send, W: Write + Send> ConsolePlayer<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W, rng: SmallRng) -> Self {
        Self {
            name: name.into(),
            input,
            output,
            rng,
            state: PlayerState::default(),
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Give back the output sink, e.g. to inspect what was printed.
    pub fn into_output(self) -> W {
        self.output
    }

    fn print_boards(&mut self) -> Result<(), PlayerError> {
        writeln!(self.output, "\nOpponent board:")?;
        write!(self.output, "{}", render_opponent(self.state.opponent()))?;
        writeln!(self.output, "\nYour board:")?;
        write!(self.output, "{}", render_board(self.state.board()))?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, PlayerError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PlayerError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    /// Prompt until the user names a cell that is on the board, not yet fired at, and not already
    /// part of this volley.
    fn read_shot(&mut self, index: usize, total: usize, volley: &[Coord]) -> Result<Coord, PlayerError> {
        loop {
            write!(self.output, "Shot {}/{} (x y): ", index, total)?;
            self.output.flush()?;
            let line = self.read_line()?;
            match parse_coord(&line) {
                Ok((x, y)) => {
                    let grid = self.state.opponent();
                    if !grid.in_bounds(x, y) {
                        writeln!(
                            self.output,
                            "({}, {}) is off the board; x must be below {} and y below {}",
                            x,
                            y,
                            grid.width(),
                            grid.height()
                        )?;
                    } else if grid.get(x, y) != CoordStatus::Unknown
                        || volley.iter().any(|c| c.x() == x && c.y() == y)
                    {
                        writeln!(self.output, "You already fired at ({}, {})", x, y)?;
                    } else {
                        return Ok(Coord::new(x, y));
                    }
                }
                Err(msg) => writeln!(self.output, "{}", msg)?,
            }
        }
    }
}

fn parse_coord(input: &str) -> Result<(usize, usize), String> {
    let mut parts = input.split_whitespace();
    let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err("Enter two numbers separated by a space, e.g. `3 4`".to_string());
    };
    let x = x
        .parse()
        .map_err(|_| format!("Invalid x '{}' - must be a non-negative number", x))?;
    let y = y
        .parse()
        .map_err(|_| format!("Invalid y '{}' - must be a non-negative number", y))?;
    Ok((x, y))
}

impl<R: BufRead + Send, W: Write + Send> Player for ConsolePlayer<R, W> {
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
        let ships = self.state.place_fleet(&mut self.rng, height, width, spec)?;
        writeln!(self.output, "Your fleet of {} ships has been placed:", ships.len())?;
        write!(self.output, "{}", render_board(self.state.board()))?;
        Ok(ships)
    }

    fn next_volley(&mut self) -> Result<Vec<Coord>, PlayerError> {
        self.print_boards()?;
        let total = self.state.volley_size();
        writeln!(self.output, "\nFire {} shot(s).", total)?;
        let mut volley = Vec::with_capacity(total);
        for i in 1..=total {
            let shot = self.read_shot(i, total, &volley)?;
            volley.push(shot);
        }
        Ok(self.state.commit_volley(volley))
    }

    fn resolve_incoming(&mut self, shots: &[Coord]) -> Result<Vec<Coord>, PlayerError> {
        let hits = self.state.resolve_incoming(shots);
        writeln!(
            self.output,
            "The opponent fired {} shot(s) and hit {}.",
            shots.len(),
            hits.len()
        )?;
        Ok(hits)
    }

    fn record_confirmed_hits(&mut self, hits: &[Coord]) -> Result<(), PlayerError> {
        self.state.record_confirmed_hits(hits);
        let cells: Vec<String> = hits.iter().map(|c| format!("({}, {})", c.x(), c.y())).collect();
        if cells.is_empty() {
            writeln!(self.output, "None of your shots hit.")?;
        } else {
            writeln!(self.output, "You hit: {}", cells.join(" "))?;
        }
        Ok(())
    }

    fn ships_afloat(&self) -> usize {
        self.state.board().ships_afloat()
    }

    fn end_game(&mut self, result: GameResult, reason: &str) {
        let banner = match result {
            GameResult::Win => "VICTORY!",
            GameResult::Lose => "DEFEAT",
            GameResult::Draw => "DRAW",
        };
        // the game is over either way; a closed terminal has nobody left to tell
        let _ = writeln!(self.output, "\n{} {}", banner, reason);
        let _ = self.print_boards();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_fleet_spec;
    use rand::SeedableRng;
    use std::io::Cursor;

    fn player(input: &str) -> ConsolePlayer<Cursor<Vec<u8>>, Vec<u8>> {
        ConsolePlayer::new(
            "tester",
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            SmallRng::seed_from_u64(9),
        )
    }

    #[test]
    fn parse_coord_accepts_two_numbers() {
        assert_eq!(parse_coord("3 4"), Ok((3, 4)));
        assert!(parse_coord("3").is_err());
        assert!(parse_coord("a 4").is_err());
        assert!(parse_coord("1 2 3").is_err());
    }

    #[test]
    fn volley_reprompts_on_bad_input() {
        let mut p = player("9 9\n0 0\n0 0\nx y\n1 0\n2 0\n3 0\n");
        p.place_fleet(6, 6, &default_fleet_spec()).unwrap();
        let volley = p.next_volley().unwrap();
        let cells: Vec<_> = volley.iter().map(|c| (c.x(), c.y())).collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("off the board"));
        assert!(out.contains("already fired"));
        assert!(out.contains("Invalid x"));
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut p = player("0 0\n");
        p.place_fleet(6, 6, &default_fleet_spec()).unwrap();
        assert!(matches!(p.next_volley(), Err(PlayerError::InputClosed)));
    }
}
