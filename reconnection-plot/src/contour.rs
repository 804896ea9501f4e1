//! Marching-squares contour lines of a scalar field on a rectilinear grid.

use ndarray::{Array1, Array2};
use rayon::prelude::*;

pub type Point = (f64, f64);

/// All line segments of one contour level.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourSet {
    pub level: f64,
    pub segments: Vec<[Point; 2]>,
}

/// `n` evenly spaced levels strictly between `min` and `max`.
pub fn contour_levels(min: f64, max: f64, n: usize) -> Vec<f64> {
    if !(max > min) || n == 0 {
        return Vec::new();
    }
    let step = (max - min) / (n + 1) as f64;
    (1..=n).map(|k| min + step * k as f64).collect()
}

/// Trace every level of `values` (indexed `[i, j]`, positioned at
/// `(x[i], y[j])`). Levels are independent and traced in parallel.
pub fn trace(
    values: &Array2<f64>,
    x: &Array1<f64>,
    y: &Array1<f64>,
    levels: &[f64],
) -> Vec<ContourSet> {
    levels
        .par_iter()
        .map(|&level| ContourSet {
            level,
            segments: trace_level(values, x, y, level),
        })
        .collect()
}

fn crossing(p0: Point, p1: Point, v0: f64, v1: f64, level: f64) -> Point {
    let t = (level - v0) / (v1 - v0);
    (p0.0 + t * (p1.0 - p0.0), p0.1 + t * (p1.1 - p0.1))
}

fn trace_level(
    values: &Array2<f64>,
    x: &Array1<f64>,
    y: &Array1<f64>,
    level: f64,
) -> Vec<[Point; 2]> {
    let (nx, ny) = values.dim();
    let mut segments = Vec::new();
    if nx < 2 || ny < 2 {
        return segments;
    }

    for i in 0..nx - 1 {
        for j in 0..ny - 1 {
            // Corners counter-clockwise from (i, j).
            let corners = [(i, j), (i + 1, j), (i + 1, j + 1), (i, j + 1)];
            let v = corners.map(|(a, b)| values[[a, b]]);
            let p = corners.map(|(a, b)| (x[a], y[b]));
            let above = v.map(|value| value >= level);

            // Edge k joins corner k and corner k + 1.
            let mut hits: [Option<Point>; 4] = [None; 4];
            for k in 0..4 {
                let k1 = (k + 1) % 4;
                if above[k] != above[k1] {
                    hits[k] = Some(crossing(p[k], p[k1], v[k], v[k1], level));
                }
            }

            match hits {
                [None, None, None, None] => {}
                [Some(b), Some(r), Some(t), Some(l)] => {
                    // Saddle: the centre decides which corners are connected.
                    let centre = 0.25 * v.iter().sum::<f64>();
                    if (centre >= level) == above[0] {
                        segments.push([b, r]);
                        segments.push([t, l]);
                    } else {
                        segments.push([l, b]);
                        segments.push([r, t]);
                    }
                }
                _ => {
                    let mut ends = hits.iter().flatten();
                    if let (Some(&a), Some(&b)) = (ends.next(), ends.next()) {
                        segments.push([a, b]);
                    }
                }
            }
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_levels_exclude_endpoints() {
        assert_eq!(contour_levels(0.0, 4.0, 3), vec![1.0, 2.0, 3.0]);
        assert!(contour_levels(1.0, 1.0, 5).is_empty());
        assert!(contour_levels(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_ramp_gives_straight_line() {
        // values = x, so the 1.5 contour is the vertical line x = 1.5.
        let x = array![0.0, 1.0, 2.0, 3.0];
        let y = array![0.0, 1.0, 2.0];
        let values = Array2::from_shape_fn((4, 3), |(i, _)| x[i]);
        let sets = trace(&values, &x, &y, &[1.5]);

        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].segments.len(), 2);
        for segment in &sets[0].segments {
            for point in segment {
                assert!((point.0 - 1.5).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_level_outside_range_is_empty() {
        let x = array![0.0, 1.0];
        let y = array![0.0, 1.0];
        let values = array![[0.0, 0.0], [1.0, 1.0]];
        let sets = trace(&values, &x, &y, &[5.0]);
        assert!(sets[0].segments.is_empty());
    }

    #[test]
    fn test_saddle_cell_gives_two_segments() {
        let x = array![0.0, 1.0];
        let y = array![0.0, 1.0];
        let values = array![[1.0, -1.0], [-1.0, 1.0]];
        let sets = trace(&values, &x, &y, &[0.5]);
        assert_eq!(sets[0].segments.len(), 2);
    }
}
