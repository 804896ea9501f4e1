//! Reconstruction of the full reconnection domain from a half-domain run.
//!
//! The run covers `y >= 0` only; row 0 of the half domain sits on the
//! current sheet and is dropped. Rows `1..` are copied as the upper half and
//! reflected, in reverse order, as the lower half. Variables that are odd
//! under the reflection (`vy`, `vz`, `bx`, `ps`) change sign in the lower half.

use crate::error::{FieldError, FieldResult};
use crate::field::{Component, Snapshot, NVAR};
use ndarray::{s, Array1, Array3, ArrayView1, ArrayView3};

fn half_width(jh_in: usize) -> FieldResult<usize> {
    if jh_in < 2 {
        return Err(FieldError::DegenerateSize {
            axis: "y (half domain)",
            len: jh_in,
            min: 2,
        });
    }
    Ok(jh_in - 1)
}

/// Mirrored y coordinates: `[-y[jh_in-1], ..., -y[1], y[1], ..., y[jh_in-1]]`.
pub fn mirror_axis(y_half: ArrayView1<f64>) -> FieldResult<Array1<f64>> {
    let jh = half_width(y_half.len())?;

    let mut y = Array1::<f64>::zeros(2 * jh);
    y.slice_mut(s![jh..]).assign(&y_half.slice(s![1..]));
    y.slice_mut(s![..jh])
        .assign(&y_half.slice(s![1..;-1]).mapv(|v| -v));
    Ok(y)
}

/// Mirrored field array of shape `(ix, 2 * jh_in - 2, NVAR)`.
pub fn mirror_field(data_half: ArrayView3<f64>) -> FieldResult<Array3<f64>> {
    let (ix, jh_in, nvar) = data_half.dim();
    if nvar != NVAR {
        return Err(FieldError::ShapeMismatch {
            what: "field components",
            expected: NVAR,
            actual: nvar,
        });
    }
    let jh = half_width(jh_in)?;

    let mut data = Array3::<f64>::zeros((ix, 2 * jh, NVAR));
    data.slice_mut(s![.., jh.., ..])
        .assign(&data_half.slice(s![.., 1.., ..]));
    data.slice_mut(s![.., ..jh, ..])
        .assign(&data_half.slice(s![.., 1..;-1, ..]));

    for c in Component::ALL.iter().filter(|c| c.is_odd()) {
        data.slice_mut(s![.., ..jh, c.index()])
            .mapv_inplace(|v| -v);
    }
    Ok(data)
}

/// Mirror coordinates and field together, checking they agree in length.
pub fn mirror(
    y_half: ArrayView1<f64>,
    data_half: ArrayView3<f64>,
) -> FieldResult<(Array1<f64>, Array3<f64>)> {
    let jh_in = data_half.dim().1;
    if jh_in != y_half.len() {
        return Err(FieldError::ShapeMismatch {
            what: "field axis 2 vs y coordinates",
            expected: y_half.len(),
            actual: jh_in,
        });
    }
    let y = mirror_axis(y_half)?;
    let data = mirror_field(data_half)?;
    Ok((y, data))
}

/// Consume a half-domain snapshot and return the full-domain one.
///
/// The half-domain field storage is released as soon as the full array is
/// populated, before the new snapshot is assembled.
pub fn mirror_snapshot(half: Snapshot) -> FieldResult<Snapshot> {
    let (y, data) = mirror(half.grid.y.view(), half.data.view())?;

    let Snapshot {
        grid,
        time,
        data: half_data,
    } = half;
    drop(half_data);

    log::debug!(
        "mirrored y axis: {} -> {} points",
        grid.y.len(),
        y.len()
    );
    Snapshot::new(grid.x, y, time, data)
}
