use crate::error::{FieldError, FieldResult};
use crate::grid::Grid;
use ndarray::{Array1, Array2, Array3, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of variables stored per grid point.
pub const NVAR: usize = 9;

/// Variables of a snapshot, in the order they are stored along the last axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    Vx = 0,
    Vy = 1,
    Vz = 2,
    #[serde(alias = "pressure")]
    Pr = 3,
    #[serde(alias = "density")]
    Ro = 4,
    Bx = 5,
    By = 6,
    Bz = 7,
    Ps = 8,
}

impl Component {
    pub const ALL: [Component; NVAR] = [
        Component::Vx,
        Component::Vy,
        Component::Vz,
        Component::Pr,
        Component::Ro,
        Component::Bx,
        Component::By,
        Component::Bz,
        Component::Ps,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Component::Vx => "vx",
            Component::Vy => "vy",
            Component::Vz => "vz",
            Component::Pr => "pr",
            Component::Ro => "ro",
            Component::Bx => "bx",
            Component::By => "by",
            Component::Bz => "bz",
            Component::Ps => "ps",
        }
    }

    /// Whether the variable changes sign under reflection across the
    /// current sheet (y -> -y with the reconnection symmetry).
    pub fn is_odd(self) -> bool {
        matches!(
            self,
            Component::Vy | Component::Vz | Component::Bx | Component::Ps
        )
    }

    /// `-1.0` for odd variables, `1.0` for even ones.
    pub fn parity(self) -> f64 {
        if self.is_odd() {
            -1.0
        } else {
            1.0
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Component {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vx" => Ok(Component::Vx),
            "vy" => Ok(Component::Vy),
            "vz" => Ok(Component::Vz),
            "pr" | "pressure" => Ok(Component::Pr),
            "ro" | "density" => Ok(Component::Ro),
            "bx" => Ok(Component::Bx),
            "by" => Ok(Component::By),
            "bz" => Ok(Component::Bz),
            "ps" => Ok(Component::Ps),
            other => Err(format!(
                "Unknown component '{}'. Must be one of: {:?}",
                other,
                Component::ALL.map(Component::name)
            )),
        }
    }
}

/// One field dump: coordinates, time and all variables on the grid.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub grid: Grid,
    pub time: f64,
    pub data: Array3<f64>, // (ix, jx, NVAR)
}

impl Snapshot {
    pub fn new(x: Array1<f64>, y: Array1<f64>, time: f64, data: Array3<f64>) -> FieldResult<Self> {
        let (ix, jx, nvar) = data.dim();
        if ix != x.len() {
            return Err(FieldError::ShapeMismatch {
                what: "field axis 1 vs x coordinates",
                expected: x.len(),
                actual: ix,
            });
        }
        if jx != y.len() {
            return Err(FieldError::ShapeMismatch {
                what: "field axis 2 vs y coordinates",
                expected: y.len(),
                actual: jx,
            });
        }
        if nvar != NVAR {
            return Err(FieldError::ShapeMismatch {
                what: "field components",
                expected: NVAR,
                actual: nvar,
            });
        }
        Ok(Snapshot {
            grid: Grid::new(x, y),
            time,
            data,
        })
    }

    pub fn dim(&self) -> (usize, usize) {
        (self.grid.nx(), self.grid.ny())
    }

    pub fn component(&self, c: Component) -> ArrayView2<'_, f64> {
        self.data.index_axis(Axis(2), c.index())
    }

    /// Centred-difference div B on the (possibly non-uniform) grid, with
    /// one-sided differences at the edges. Axes shorter than two points
    /// contribute nothing.
    pub fn divergence_b(&self) -> Array2<f64> {
        let bx = self.component(Component::Bx);
        let by = self.component(Component::By);
        let x = &self.grid.x;
        let y = &self.grid.y;
        let (nx, ny) = self.dim();
        let mut div = Array2::<f64>::zeros((nx, ny));

        for i in 0..nx {
            for j in 0..ny {
                let dbx_dx = if nx < 2 {
                    0.0
                } else {
                    let (lo, hi) = (i.saturating_sub(1), (i + 1).min(nx - 1));
                    (bx[[hi, j]] - bx[[lo, j]]) / (x[hi] - x[lo])
                };
                let dby_dy = if ny < 2 {
                    0.0
                } else {
                    let (lo, hi) = (j.saturating_sub(1), (j + 1).min(ny - 1));
                    (by[[i, hi]] - by[[i, lo]]) / (y[hi] - y[lo])
                };
                div[[i, j]] = dbx_dx + dby_dy;
            }
        }
        div
    }
}
