//! Out-of-plane vector potential Az (flux function) from the in-plane field.
//!
//! Az is integrated with the trapezoidal rule on index space: first down the
//! `i = 0` column from the `(0, jx-1)` corner, then along axis 1 one whole row
//! at a time. Contours of Az trace the in-plane field lines.

use crate::error::{FieldError, FieldResult};
use crate::field::{Component, NVAR};
use ndarray::{s, Array2, ArrayView3, Axis, Zip};
use serde::{Deserialize, Serialize};

/// Value assigned to Az at the reference corner `(0, jx-1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seed {
    /// A fixed gauge constant.
    Value(f64),
    /// `0.5 * (bx - by)` at the reference corner.
    CornerField,
}

impl Default for Seed {
    fn default() -> Self {
        Seed::Value(0.0)
    }
}

impl Seed {
    pub fn resolve(self, bx: f64, by: f64) -> f64 {
        match self {
            Seed::Value(v) => v,
            Seed::CornerField => 0.5 * (bx - by),
        }
    }
}

/// Integrate Az over the whole grid of `data` (shape `(ix, jx, NVAR)`).
pub fn flux_function(data: ArrayView3<f64>, seed: Seed) -> FieldResult<Array2<f64>> {
    let (ix, jx, nvar) = data.dim();
    if nvar != NVAR {
        return Err(FieldError::ShapeMismatch {
            what: "field components",
            expected: NVAR,
            actual: nvar,
        });
    }
    if ix < 2 {
        return Err(FieldError::DegenerateSize {
            axis: "x",
            len: ix,
            min: 2,
        });
    }
    if jx < 2 {
        return Err(FieldError::DegenerateSize {
            axis: "y",
            len: jx,
            min: 2,
        });
    }

    let bx = data.index_axis(Axis(2), Component::Bx.index());
    let by = data.index_axis(Axis(2), Component::By.index());
    let mut az = Array2::<f64>::zeros((ix, jx));

    az[[0, jx - 1]] = seed.resolve(bx[[0, jx - 1]], by[[0, jx - 1]]);
    for j in (1..jx).rev() {
        az[[0, j - 1]] = az[[0, j]] - 0.5 * (bx[[0, j - 1]] + bx[[0, j]]);
    }

    for i in 1..ix {
        let (prev, mut row) = az.multi_slice_mut((s![i - 1, ..], s![i, ..]));
        Zip::from(&mut row)
            .and(&prev)
            .and(by.row(i - 1))
            .and(by.row(i))
            .for_each(|a, &a_prev, &by_prev, &by_here| {
                *a = a_prev - 0.5 * (by_prev + by_here);
            });
    }

    Ok(az)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn field_from(
        bx: impl Fn(usize, usize) -> f64,
        by: impl Fn(usize, usize) -> f64,
        ix: usize,
        jx: usize,
    ) -> Array3<f64> {
        let mut data = Array3::<f64>::zeros((ix, jx, NVAR));
        for i in 0..ix {
            for j in 0..jx {
                data[[i, j, Component::Bx.index()]] = bx(i, j);
                data[[i, j, Component::By.index()]] = by(i, j);
            }
        }
        data
    }

    #[test]
    fn test_zero_field_gives_constant_seed() {
        let data = Array3::<f64>::zeros((4, 5, NVAR));
        let az = flux_function(data.view(), Seed::Value(3.25)).unwrap();
        assert!(az.iter().all(|&v| v == 3.25));
    }

    #[test]
    fn test_corner_field_seed() {
        let data = field_from(|_, _| 2.0, |_, _| 0.5, 2, 3);
        let az = flux_function(data.view(), Seed::CornerField).unwrap();
        assert_eq!(az[[0, 2]], 0.75);
    }

    #[test]
    fn test_recovers_bilinear_potential() {
        // Az = a*i + b*j + c*i*j gives bx = dAz/dj and by = -dAz/di, for which
        // the trapezoidal rule is exact.
        let (a, b, c) = (0.3, -1.2, 0.05);
        let exact = |i: usize, j: usize| a * i as f64 + b * j as f64 + c * (i * j) as f64;
        let (ix, jx) = (6, 7);
        let data = field_from(
            |i, _| b + c * i as f64,
            |_, j| -(a + c * j as f64),
            ix,
            jx,
        );
        let az = flux_function(data.view(), Seed::Value(exact(0, jx - 1))).unwrap();
        for i in 0..ix {
            for j in 0..jx {
                assert!((az[[i, j]] - exact(i, j)).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_degenerate_sizes() {
        let data = Array3::<f64>::zeros((1, 5, NVAR));
        assert!(matches!(
            flux_function(data.view(), Seed::default()),
            Err(FieldError::DegenerateSize { axis: "x", .. })
        ));
        let data = Array3::<f64>::zeros((5, 1, NVAR));
        assert!(matches!(
            flux_function(data.view(), Seed::default()),
            Err(FieldError::DegenerateSize { axis: "y", .. })
        ));
    }

    #[test]
    fn test_wrong_component_count() {
        let data = Array3::<f64>::zeros((3, 3, 7));
        assert!(matches!(
            flux_function(data.view(), Seed::default()),
            Err(FieldError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_seed_default_is_zero() {
        assert_eq!(Seed::default(), Seed::Value(0.0));
        assert_eq!(Seed::CornerField.resolve(1.0, 3.0), -1.0);
    }
}
