//! Ambient sparks
//!
//! Occasionally stamps a small ring on a screen row above the measured flame
//! height. Sparks are drawn after the flame height is measured, so they never
//! influence it within the same frame.

use super::circle::draw_circle;
use crate::core_types::IntensityGrid;
use rand::Rng;

/// Sparkle placement parameters
#[derive(Debug, Clone, Copy)]
pub struct SparkleParams {
    /// Chance per frame of drawing a spark, in [0, 1]
    pub probability: f64,
    /// Ring radius of a spark
    pub radius: i32,
}

impl Default for SparkleParams {
    fn default() -> Self {
        Self {
            probability: 0.2,
            radius: 2,
        }
    }
}

/// Maybe stamp one spark into `grid`.
///
/// The column is drawn from `[1, width-2]` and the screen row from
/// `[1, min(flame_height, height) - 1]`, falling back to row 1 when that
/// range is empty.
///
/// Returns the spark centre `(x, y)` in grid coordinates when one was drawn.
pub fn inject_sparkle(
    grid: &mut IntensityGrid,
    flame_height: usize,
    params: SparkleParams,
    rng: &mut impl Rng,
) -> Option<(usize, usize)> {
    if !rng.random_bool(params.probability.clamp(0.0, 1.0)) {
        return None;
    }

    let width = grid.width();
    let height = grid.height();

    let x = rng.random_range(1..=width - 2);
    let ceiling = flame_height.min(height).saturating_sub(1);
    let y = if ceiling > 1 {
        rng.random_range(1..=ceiling)
    } else {
        1
    };

    draw_circle(grid, x as i32, y as i32, params.radius);
    Some((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_probability_never_sparks() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut grid = IntensityGrid::new(32, 32);
        let params = SparkleParams {
            probability: 0.0,
            ..SparkleParams::default()
        };
        for _ in 0..200 {
            assert!(inject_sparkle(&mut grid, 20, params, &mut rng).is_none());
        }
        assert!(grid.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_spark_rows_are_screen_rows_below_flame_height() {
        let mut rng = StdRng::seed_from_u64(4);
        let params = SparkleParams {
            probability: 1.0,
            ..SparkleParams::default()
        };
        for _ in 0..1000 {
            let mut grid = IntensityGrid::new(64, 48);
            let (x, y) = inject_sparkle(&mut grid, 10, params, &mut rng).expect("always sparks");
            assert!((1..=62).contains(&x));
            assert!((1..=9).contains(&y), "spark row {y}");
            assert_eq!(grid.get(x + 1, y), 255);
        }
    }

    #[test]
    fn test_low_flame_defaults_to_row_one() {
        let mut rng = StdRng::seed_from_u64(5);
        let params = SparkleParams {
            probability: 1.0,
            ..SparkleParams::default()
        };
        for flame_height in [0, 1, 2] {
            let mut grid = IntensityGrid::new(16, 16);
            let (x, y) = inject_sparkle(&mut grid, flame_height, params, &mut rng).expect("sparks");
            assert_eq!(y, 1);
            // The ring reaches the top row
            assert_eq!(grid.get(x, 0), 255);
        }
    }

    #[test]
    fn test_tall_flame_spreads_sparks_from_the_top() {
        let mut rng = StdRng::seed_from_u64(7);
        let params = SparkleParams {
            probability: 1.0,
            ..SparkleParams::default()
        };
        let mut grid = IntensityGrid::new(320, 240);
        let rows: Vec<usize> = (0..5000)
            .filter_map(|_| inject_sparkle(&mut grid, 200, params, &mut rng))
            .map(|(_, y)| y)
            .collect();
        assert_eq!(rows.len(), 5000);
        assert!(rows.iter().all(|y| (1..=199).contains(y)));
        assert!(rows.contains(&1));
        assert!(rows.iter().any(|&y| y > 150));
    }

    #[test]
    fn test_sparkle_rate_matches_probability() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut grid = IntensityGrid::new(32, 32);
        let hits = (0..10_000)
            .filter(|_| inject_sparkle(&mut grid, 16, SparkleParams::default(), &mut rng).is_some())
            .count();
        assert!((1_700..2_300).contains(&hits), "{hits} sparks in 10000 frames");
    }
}
