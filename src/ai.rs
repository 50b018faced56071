// Probability-based targeting against the opponent board.

use rand::Rng;

use crate::board::ShotGrid;
use crate::coord::CoordStatus;

/// Lower temperature biases the sampling towards higher probability cells.
const TEMPERATURE: f64 = 0.5;

/// Placements covering more observed hits get far more weight, so cells next to confirmed hits
/// stand out.
const HIT_BIAS: f64 = 10.0;

/// Probability matrix indexed `[y][x]`.
pub type Pdf = Vec<Vec<f64>>;

/// Compute a probability density over all unshot cells given what is known of the opponent
/// board and the lengths of the ships it fields. Each entry sums the relative likelihood of a
/// ship segment occupying that cell.
pub fn calc_pdf(grid: &ShotGrid, lengths: &[usize]) -> Pdf {
    let (width, height) = (grid.width(), grid.height());
    let mut matrix = vec![vec![0.0f64; width]; height];

    for &len in lengths {
        if len == 0 {
            continue;
        }
        for horizontal in [true, false] {
            let (span_x, span_y) = if horizontal { (len, 1) } else { (1, len) };
            if span_x > width || span_y > height {
                continue;
            }
            for y in 0..=height - span_y {
                for x in 0..=width - span_x {
                    let cells = (0..len).map(|k| if horizontal { (x + k, y) } else { (x, y + k) });
                    let mut n_hits = 0;
                    let mut valid = true;
                    for (cx, cy) in cells.clone() {
                        match grid.get(cx, cy) {
                            CoordStatus::Miss => {
                                valid = false;
                                break;
                            }
                            CoordStatus::Hit => n_hits += 1,
                            CoordStatus::Unknown => {}
                        }
                    }
                    if !valid {
                        continue;
                    }
                    let weight = HIT_BIAS.powi(n_hits);
                    for (cx, cy) in cells {
                        if grid.get(cx, cy) == CoordStatus::Unknown {
                            matrix[cy][cx] += weight;
                        }
                    }
                }
            }
        }
    }

    normalize(matrix, grid)
}

fn normalize(mut matrix: Pdf, grid: &ShotGrid) -> Pdf {
    let total: f64 = matrix.iter().flatten().sum();
    if total == 0.0 {
        // nothing fits anywhere: spread evenly over unshot cells
        let unknown = grid.count(CoordStatus::Unknown);
        if unknown > 0 {
            let uniform = 1.0 / unknown as f64;
            for (x, y) in grid.unknown_cells() {
                matrix[y][x] = uniform;
            }
        }
        return matrix;
    }
    for v in matrix.iter_mut().flatten() {
        *v /= total;
    }
    matrix
}

/// Sample a cell `(x, y)` from a probability matrix using a temperature parameter. Returns
/// `None` when every entry is zero.
pub fn sample_pdf<R: Rng + ?Sized>(pdf: &Pdf, temperature: f64, rng: &mut R) -> Option<(usize, usize)> {
    let adjusted: Vec<Vec<f64>> = pdf
        .iter()
        .map(|row| row.iter().map(|v| v.powf(1.0 / temperature)).collect())
        .collect();
    let total: f64 = adjusted.iter().flatten().sum();
    if total <= 0.0 {
        return None;
    }
    let threshold: f64 = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    let mut last = None;
    for (y, row) in adjusted.iter().enumerate() {
        for (x, &v) in row.iter().enumerate() {
            if v <= 0.0 {
                continue;
            }
            cumulative += v;
            last = Some((x, y));
            if threshold < cumulative {
                return last;
            }
        }
    }
    last
}

/// Pick up to `count` distinct unshot cells for the next volley, most likely first.
pub fn choose_volley<R: Rng + ?Sized>(
    grid: &ShotGrid,
    lengths: &[usize],
    count: usize,
    rng: &mut R,
) -> Vec<(usize, usize)> {
    let count = count.min(grid.count(CoordStatus::Unknown));
    let mut pdf = calc_pdf(grid, lengths);
    let mut volley = Vec::with_capacity(count);
    while volley.len() < count {
        let cell = match sample_pdf(&pdf, TEMPERATURE, rng) {
            Some(cell) => cell,
            None => {
                let rest: Vec<_> = grid
                    .unknown_cells()
                    .filter(|c| !volley.contains(c))
                    .collect();
                if rest.is_empty() {
                    break;
                }
                rest[rng.random_range(0..rest.len())]
            }
        };
        pdf[cell.1][cell.0] = 0.0;
        volley.push(cell);
    }
    volley
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn pdf_is_normalized_and_skips_shot_cells() {
        let mut grid = ShotGrid::new(6, 6);
        grid.set(0, 0, CoordStatus::Miss);
        grid.set(3, 3, CoordStatus::Hit);
        let pdf = calc_pdf(&grid, &[6, 5, 4, 3]);
        let total: f64 = pdf.iter().flatten().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(pdf[0][0], 0.0);
        assert_eq!(pdf[3][3], 0.0);
        // neighbours of a hit outweigh a far corner
        assert!(pdf[3][4] > pdf[5][0]);
    }

    #[test]
    fn volley_is_distinct_and_capped_by_unknown_cells() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut grid = ShotGrid::new(6, 6);
        for (x, y) in (0..6).flat_map(|y| (0..6).map(move |x| (x, y))).take(34) {
            grid.set(x, y, CoordStatus::Miss);
        }
        let volley = choose_volley(&grid, &[3], 4, &mut rng);
        assert_eq!(volley.len(), 2);
        assert!(volley.contains(&(4, 5)));
        assert!(volley.contains(&(5, 5)));
    }

    #[test]
    fn volley_uses_requested_count() {
        let mut rng = SmallRng::seed_from_u64(11);
        let grid = ShotGrid::new(10, 10);
        let volley = choose_volley(&grid, &[6, 5, 4, 3], 4, &mut rng);
        assert_eq!(volley.len(), 4);
        for (i, a) in volley.iter().enumerate() {
            assert!(!volley[i + 1..].contains(a));
        }
    }
}
