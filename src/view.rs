//! Text rendering of boards for the console player.

use std::fmt::Write;

use crate::board::{Board, ShotGrid};
use crate::coord::CoordStatus;

fn header(out: &mut String, width: usize) {
    out.push_str("    ");
    for x in 0..width {
        let _ = write!(out, "{:>3}", x);
    }
    out.push('\n');
}

/// Our own board: `S` ship, `X` hit, `o` miss, `.` water.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    header(&mut out, board.width());
    for y in 0..board.height() {
        let _ = write!(out, "{:>3} ", y);
        for x in 0..board.width() {
            let ch = match board.shots().get(x, y) {
                CoordStatus::Hit => 'X',
                CoordStatus::Miss => 'o',
                CoordStatus::Unknown if board.has_ship_at(x, y) => 'S',
                CoordStatus::Unknown => '.',
            };
            let _ = write!(out, "{:>3}", ch);
        }
        out.push('\n');
    }
    out.push_str("    Legend: S=Ship  X=Hit  o=Miss  .=Water\n");
    out
}

/// What we know of the opponent's board: `X` hit, `o` miss, `.` unknown.
pub fn render_opponent(grid: &ShotGrid) -> String {
    let mut out = String::new();
    header(&mut out, grid.width());
    for y in 0..grid.height() {
        let _ = write!(out, "{:>3} ", y);
        for x in 0..grid.width() {
            let ch = match grid.get(x, y) {
                CoordStatus::Hit => 'X',
                CoordStatus::Miss => 'o',
                CoordStatus::Unknown => '.',
            };
            let _ = write!(out, "{:>3}", ch);
        }
        out.push('\n');
    }
    out.push_str("    Legend: X=Hit  o=Miss  .=Unknown\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ship::{Orientation, Ship, ShipType};

    #[test]
    fn board_shows_ships_and_shots() {
        let mut board = Board::new(6, 6).unwrap();
        board
            .place(Ship::place(ShipType::Submarine, 0, 0, Orientation::Horizontal))
            .unwrap();
        board.receive_shot(1, 0);
        board.receive_shot(5, 5);
        let text = render_board(&board);
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows[1], "  0   S  X  S  .  .  .");
        assert_eq!(rows[6], "  5   .  .  .  .  .  o");
    }
}
