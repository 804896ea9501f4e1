use ndarray::Array1;

/// Cell-centred coordinates of a 2D snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub x: Array1<f64>, // Positions along axis 1 (never mirrored)
    pub y: Array1<f64>, // Positions along axis 2 (mirrored across y = 0)
}

impl Grid {
    pub fn new(x: Array1<f64>, y: Array1<f64>) -> Self {
        Grid { x, y }
    }

    pub fn nx(&self) -> usize {
        self.x.len()
    }

    pub fn ny(&self) -> usize {
        self.y.len()
    }

    pub fn in_bounds(&self, i: usize, j: usize) -> bool {
        i < self.nx() && j < self.ny()
    }

    /// `[left, right, bottom, top]`, the image extent of the snapshot.
    pub fn extent(&self) -> [f64; 4] {
        [
            self.x.first().copied().unwrap_or(0.0),
            self.x.last().copied().unwrap_or(0.0),
            self.y.first().copied().unwrap_or(0.0),
            self.y.last().copied().unwrap_or(0.0),
        ]
    }

    pub fn width(&self) -> f64 {
        let [left, right, _, _] = self.extent();
        right - left
    }

    pub fn height(&self) -> f64 {
        let [_, _, bottom, top] = self.extent();
        top - bottom
    }

    /// True when both axes are strictly increasing.
    pub fn is_increasing(&self) -> bool {
        let increasing = |a: &Array1<f64>| a.windows(2).into_iter().all(|w| w[1] > w[0]);
        increasing(&self.x) && increasing(&self.y)
    }

    /// Edges of the cells centred on `centres`, halfway between neighbours and
    /// extended by half a spacing at both ends.
    pub fn cell_edges(centres: &Array1<f64>) -> Vec<f64> {
        let n = centres.len();
        match n {
            0 => Vec::new(),
            1 => vec![centres[0] - 0.5, centres[0] + 0.5],
            _ => {
                let mut edges = Vec::with_capacity(n + 1);
                edges.push(centres[0] - 0.5 * (centres[1] - centres[0]));
                for k in 0..n - 1 {
                    edges.push(0.5 * (centres[k] + centres[k + 1]));
                }
                edges.push(centres[n - 1] + 0.5 * (centres[n - 1] - centres[n - 2]));
                edges
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_extent_and_size() {
        let grid = Grid::new(array![0.0, 1.0, 2.0], array![-2.0, -1.0, 1.0, 2.0]);
        assert_eq!(grid.extent(), [0.0, 2.0, -2.0, 2.0]);
        assert_eq!(grid.width(), 2.0);
        assert_eq!(grid.height(), 4.0);
        assert!(grid.in_bounds(2, 3));
        assert!(!grid.in_bounds(3, 0));
        assert!(grid.is_increasing());
    }

    #[test]
    fn test_cell_edges_uniform() {
        let edges = Grid::cell_edges(&array![0.5, 1.5, 2.5]);
        assert_eq!(edges, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_not_increasing() {
        let grid = Grid::new(array![0.0, 1.0], array![1.0, 1.0]);
        assert!(!grid.is_increasing());
    }
}
