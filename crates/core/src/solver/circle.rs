//! Midpoint circle rasterizer
//!
//! Stamps rings of maximum intensity. Used for ambient sparks and for
//! pointer-driven ignition, which stacks rings of growing radius into a disc.

use crate::core_types::IntensityGrid;

/// Ring points of a midpoint circle centred on `(cx, cy)`.
///
/// The walk starts at `(radius - 1, 0)` and emits all eight octant
/// reflections of every step while `x > y`, so radius 1 yields no points
/// and radius 2 yields the four axis neighbours. Points may repeat and may
/// lie outside any grid.
#[must_use]
pub fn circle_points(cx: i32, cy: i32, radius: i32) -> Vec<(i32, i32)> {
    let mut points = Vec::new();
    let mut x = radius - 1;
    let mut y = 0;
    let mut dx = 1;
    let mut dy = 1;
    let mut err = dx - radius * 2;

    while x > y {
        points.extend_from_slice(&[
            (cx + x, cy + y),
            (cx + y, cy + x),
            (cx - y, cy + x),
            (cx - x, cy + y),
            (cx - x, cy - y),
            (cx - y, cy - x),
            (cx + y, cy - x),
            (cx + x, cy - y),
        ]);

        if err <= 0 {
            y += 1;
            err += dy;
            dy += 2;
        }
        if err > 0 {
            x -= 1;
            dx += 2;
            err += dx - radius * 2;
        }
    }

    points
}

/// Set every ring point that lands inside `grid` to maximum intensity.
///
/// Points outside the grid are discarded. Returns how many writes landed.
pub fn draw_circle(grid: &mut IntensityGrid, cx: i32, cy: i32, radius: i32) -> usize {
    circle_points(cx, cy, radius)
        .into_iter()
        .filter(|&(x, y)| grid.ignite(x, y))
        .count()
}

/// Stack rings of radius `1..=max_radius` around `(cx, cy)`.
pub fn draw_disc(grid: &mut IntensityGrid, cx: i32, cy: i32, max_radius: i32) {
    for radius in 1..=max_radius {
        draw_circle(grid, cx, cy, radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn offsets(radius: i32) -> BTreeSet<(i32, i32)> {
        circle_points(0, 0, radius).into_iter().collect()
    }

    #[test]
    fn test_radius_two_is_axis_diamond() {
        let points: BTreeSet<_> = circle_points(50, 50, 2).into_iter().collect();
        let expected: BTreeSet<_> = [(51, 50), (49, 50), (50, 51), (50, 49)].into_iter().collect();
        assert_eq!(points, expected);
    }

    #[test]
    fn test_radius_three_ring() {
        let expected: BTreeSet<_> = [
            (2, 0),
            (-2, 0),
            (0, 2),
            (0, -2),
            (2, 1),
            (2, -1),
            (-2, 1),
            (-2, -1),
            (1, 2),
            (-1, 2),
            (1, -2),
            (-1, -2),
        ]
        .into_iter()
        .collect();
        assert_eq!(offsets(3), expected);
    }

    #[test]
    fn test_degenerate_radii_draw_nothing() {
        assert!(circle_points(5, 5, 0).is_empty());
        assert!(circle_points(5, 5, 1).is_empty());
    }

    #[test]
    fn test_rings_have_eightfold_symmetry() {
        for radius in 2..=12 {
            let set = offsets(radius);
            for &(dx, dy) in &set {
                for image in [
                    (dx, -dy),
                    (-dx, dy),
                    (-dx, -dy),
                    (dy, dx),
                    (dy, -dx),
                    (-dy, dx),
                    (-dy, -dx),
                ] {
                    assert!(
                        set.contains(&image),
                        "radius {radius}: ({dx}, {dy}) present but {image:?} missing"
                    );
                }
            }
        }
    }

    #[test]
    fn test_draw_clips_at_grid_edges() {
        let mut grid = IntensityGrid::new(8, 8);
        // (1, 0) and (0, 1) are each emitted twice, the negative half is dropped
        let landed = draw_circle(&mut grid, 0, 0, 2);
        assert_eq!(landed, 4);
        assert_eq!(grid.get(1, 0), 255);
        assert_eq!(grid.get(0, 1), 255);
        assert_eq!(grid.as_slice().iter().filter(|&&v| v == 255).count(), 2);
    }

    #[test]
    fn test_disc_fills_centre_neighbourhood() {
        let mut grid = IntensityGrid::new(40, 40);
        draw_disc(&mut grid, 20, 20, 10);
        for (dx, dy) in [(1, 0), (0, 1), (-1, 0), (0, -1), (5, 0), (0, -9)] {
            assert_eq!(grid.get((20 + dx) as usize, (20 + dy) as usize), 255);
        }
        // Nothing further out than the largest ring
        assert_eq!(grid.get(31, 20), 0);
        assert_eq!(grid.get(20, 31), 0);
    }
}
