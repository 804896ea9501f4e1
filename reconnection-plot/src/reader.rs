//! OpenMHD field dumps.
//!
//! A dump is a little-endian stream: `t: f64`, `ix0, jx0: i32`,
//! `x: [f64; ix0]`, `y: [f64; jx0]`, then `ix0 * jx0 * 9` values in Fortran
//! order (x fastest, then y, then variable).

use crate::error::{FieldError, FieldResult};
use crate::field::{Snapshot, NVAR};
use byteorder::{LittleEndian, ReadBytesExt};
use ndarray::{s, Array1, Array3, ArrayView1};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// Partial-domain bounds, inclusive on both ends. Missing ends default to the
/// edges of the file; out-of-range ends are clamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainBounds {
    #[serde(default)]
    pub ix1: Option<usize>,
    #[serde(default)]
    pub ix2: Option<usize>,
    #[serde(default)]
    pub jx1: Option<usize>,
    #[serde(default)]
    pub jx2: Option<usize>,
}

impl DomainBounds {
    pub fn full() -> Self {
        Self::default()
    }

    pub fn new(ix1: usize, ix2: usize, jx1: usize, jx2: usize) -> Self {
        DomainBounds {
            ix1: Some(ix1),
            ix2: Some(ix2),
            jx1: Some(jx1),
            jx2: Some(jx2),
        }
    }

    fn clamp(
        axis: &'static str,
        lo: Option<usize>,
        hi: Option<usize>,
        len: usize,
    ) -> FieldResult<RangeInclusive<usize>> {
        let last = len.saturating_sub(1);
        let lo = lo.unwrap_or(0);
        let hi = hi.unwrap_or(last).min(last);
        if len == 0 || lo > hi {
            return Err(FieldError::InvalidBounds { axis, lo, hi, len });
        }
        Ok(lo..=hi)
    }

    /// Index ranges selected on a file of `ix0 x jx0` points.
    pub fn resolve(
        &self,
        ix0: usize,
        jx0: usize,
    ) -> FieldResult<(RangeInclusive<usize>, RangeInclusive<usize>)> {
        Ok((
            Self::clamp("x", self.ix1, self.ix2, ix0)?,
            Self::clamp("y", self.jx1, self.jx2, jx0)?,
        ))
    }
}

/// `dir/field-NNNNN.dat`, the dump written at output step `index`.
pub fn snapshot_path(dir: impl AsRef<Path>, index: usize) -> PathBuf {
    dir.as_ref().join(format!("field-{:05}.dat", index))
}

/// Source of half-domain snapshots.
pub trait SnapshotReader {
    fn read_from<R: Read>(&self, reader: R, bounds: &DomainBounds) -> FieldResult<Snapshot>;

    fn read_path(&self, path: &Path, bounds: &DomainBounds) -> FieldResult<Snapshot> {
        let file = File::open(path)?;
        self.read_from(BufReader::new(file), bounds)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OpenMhdReader;

impl OpenMhdReader {
    pub fn new() -> Self {
        OpenMhdReader
    }

    fn read_dimension<R: Read>(reader: &mut R, axis: &str) -> FieldResult<usize> {
        let n = reader.read_i32::<LittleEndian>()?;
        if n <= 0 {
            return Err(FieldError::Format(format!(
                "non-positive grid size along {}: {}",
                axis, n
            )));
        }
        Ok(n as usize)
    }

    fn read_f64s<R: Read>(reader: &mut R, n: usize) -> FieldResult<Vec<f64>> {
        let mut buf = vec![0.0; n];
        reader.read_f64_into::<LittleEndian>(&mut buf)?;
        Ok(buf)
    }
}

impl SnapshotReader for OpenMhdReader {
    fn read_from<R: Read>(&self, mut reader: R, bounds: &DomainBounds) -> FieldResult<Snapshot> {
        let time = reader.read_f64::<LittleEndian>()?;
        let ix0 = Self::read_dimension(&mut reader, "x")?;
        let jx0 = Self::read_dimension(&mut reader, "y")?;
        let (irange, jrange) = bounds.resolve(ix0, jx0)?;

        let x_all = Self::read_f64s(&mut reader, ix0)?;
        let y_all = Self::read_f64s(&mut reader, jx0)?;
        let x = Array1::from(x_all[irange.clone()].to_vec());
        let y = Array1::from(y_all[jrange.clone()].to_vec());

        let (i0, j0) = (*irange.start(), *jrange.start());
        let mut data = Array3::<f64>::zeros((x.len(), y.len(), NVAR));
        let mut row = vec![0.0; ix0];
        for k in 0..NVAR {
            for j in 0..jx0 {
                reader.read_f64_into::<LittleEndian>(&mut row)?;
                if jrange.contains(&j) {
                    data.slice_mut(s![.., j - j0, k])
                        .assign(&ArrayView1::from(&row[irange.clone()]));
                }
            }
        }

        log::debug!(
            "read snapshot t={} ({}x{} of {}x{}, offset ({}, {}))",
            time,
            x.len(),
            y.len(),
            ix0,
            jx0,
            i0,
            j0
        );
        Snapshot::new(x, y, time, data)
    }
}
