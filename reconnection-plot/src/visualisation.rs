use crate::contour::{self, ContourSet};
use crate::field::{Component, Snapshot};
use crate::grid::Grid;
use ndarray::{Array2, ArrayView2};
use plotters::prelude::*;
use std::path::{Path, PathBuf};

/// Color range centred on zero: `vmax = max(max, -min)` when `max > 0`,
/// `vmin = min(min, -max)` when `min < 0`, each collapsing to 0 otherwise.
pub fn symmetric_range(values: ArrayView2<f64>) -> (f64, f64) {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let vmax = if max > 0.0 { max.max(-min) } else { 0.0 };
    let vmin = if min < 0.0 { min.min(-max) } else { 0.0 };
    (vmin, vmax)
}

/// Box one of the supported colorgrad presets.
pub fn gradient_by_name(name: &str) -> Option<Box<dyn colorgrad::Gradient>> {
    let gradient: Box<dyn colorgrad::Gradient> = match name {
        "turbo" => Box::new(colorgrad::preset::turbo()),
        "rd_yl_bu" => Box::new(colorgrad::preset::rd_yl_bu()),
        "rd_bu" => Box::new(colorgrad::preset::rd_bu()),
        "spectral" => Box::new(colorgrad::preset::spectral()),
        "viridis" => Box::new(colorgrad::preset::viridis()),
        _ => return None,
    };
    Some(gradient)
}

pub const COLORMAPS: [&str; 5] = ["turbo", "rd_yl_bu", "rd_bu", "spectral", "viridis"];

/// What to draw on one plot.
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub field: Component,
    pub title: String,
    pub contour_levels: usize,
}

pub struct SnapshotVisualiser {
    output: PathBuf,
    width: u32,
    height: u32,
    gradient: Box<dyn colorgrad::Gradient>,
}

impl SnapshotVisualiser {
    pub fn new(
        output: &Path,
        width: u32,
        height: u32,
        gradient: Box<dyn colorgrad::Gradient>,
    ) -> std::io::Result<Self> {
        if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        Ok(Self {
            output: output.to_path_buf(),
            width,
            height,
            gradient,
        })
    }

    /// Color map of `options.field` with white contour lines of `flux` on top.
    pub fn render(
        &self,
        snapshot: &Snapshot,
        flux: &Array2<f64>,
        options: &PlotOptions,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let root =
            BitMapBackend::new(&self.output, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let colorbar_width = (self.width / 8).max(60);
        let (plot_area, bar_area) = root.split_horizontally(self.width - colorbar_width);

        let values = snapshot.component(options.field);
        let (vmin, vmax) = symmetric_range(values);
        let [left, right, bottom, top] = snapshot.grid.extent();

        let title = format!("{} (t = {:6.1})", options.title, snapshot.time);
        let mut chart = ChartBuilder::on(&plot_area)
            .caption(&title, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(left..right, bottom..top)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("X")
            .y_desc("Y")
            .draw()?;

        let x_edges = Grid::cell_edges(&snapshot.grid.x);
        let y_edges = Grid::cell_edges(&snapshot.grid.y);
        let (xe, ye) = (&x_edges, &y_edges);
        let (nx, ny) = values.dim();
        chart.draw_series((0..nx).flat_map(move |i| {
            (0..ny).map(move |j| {
                let color = self.value_to_color(values[[i, j]], vmin, vmax);
                Rectangle::new(
                    [(xe[i], ye[j]), (xe[i + 1], ye[j + 1])],
                    color.filled(),
                )
            })
        }))?;

        let flux_min = flux.iter().copied().fold(f64::INFINITY, f64::min);
        let flux_max = flux.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let levels = contour::contour_levels(flux_min, flux_max, options.contour_levels);
        let sets: Vec<ContourSet> =
            contour::trace(flux, &snapshot.grid.x, &snapshot.grid.y, &levels);
        for set in &sets {
            chart.draw_series(
                set.segments
                    .iter()
                    .map(|[a, b]| PathElement::new(vec![*a, *b], WHITE.stroke_width(1))),
            )?;
        }

        self.draw_colorbar(&bar_area, vmin, vmax)?;

        root.present()?;
        log::info!(
            "Saved plot: {} ({} contour levels)",
            self.output.display(),
            levels.len()
        );
        Ok(())
    }

    fn draw_colorbar<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, plotters::coord::Shift>,
        vmin: f64,
        vmax: f64,
    ) -> Result<(), Box<dyn std::error::Error>>
    where
        DB::ErrorType: 'static,
    {
        // A flat field still gets a readable bar.
        let (lo, hi) = if vmax > vmin { (vmin, vmax) } else { (vmin - 1.0, vmax + 1.0) };
        let mut bar = ChartBuilder::on(area)
            .margin_top(40)
            .margin_bottom(50)
            .margin_right(10)
            .y_label_area_size(45)
            .build_cartesian_2d(0.0..1.0, lo..hi)?;

        bar.configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .y_labels(6)
            .draw()?;

        let steps = 128;
        let dv = (hi - lo) / steps as f64;
        bar.draw_series((0..steps).map(|k| {
            let v0 = lo + dv * k as f64;
            let color = self.value_to_color(v0 + 0.5 * dv, lo, hi);
            Rectangle::new([(0.0, v0), (1.0, v0 + dv)], color.filled())
        }))?;
        Ok(())
    }

    fn value_to_color(&self, value: f64, min_val: f64, max_val: f64) -> RGBColor {
        let normalized = if max_val > min_val {
            (value - min_val) / (max_val - min_val)
        } else {
            0.5
        };
        let normalized = normalized.clamp(0.0, 1.0);
        let color_rgba = self.gradient.at(normalized as f32).to_rgba8();
        RGBColor(color_rgba[0], color_rgba[1], color_rgba[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_symmetric_range_mixed_signs() {
        let values = array![[-1.0, 0.5], [2.0, 0.0]];
        assert_eq!(symmetric_range(values.view()), (-2.0, 2.0));
    }

    #[test]
    fn test_symmetric_range_positive_only() {
        let values = array![[0.5, 3.0], [1.0, 2.0]];
        assert_eq!(symmetric_range(values.view()), (0.0, 3.0));
    }

    #[test]
    fn test_symmetric_range_negative_only() {
        let values = array![[-0.5, -3.0]];
        assert_eq!(symmetric_range(values.view()), (-3.0, 0.0));
    }

    #[test]
    fn test_symmetric_range_zero_field() {
        let values = Array2::<f64>::zeros((3, 3));
        assert_eq!(symmetric_range(values.view()), (0.0, 0.0));
    }

    #[test]
    fn test_known_colormaps() {
        for name in COLORMAPS {
            assert!(gradient_by_name(name).is_some(), "missing colormap {}", name);
        }
        assert!(gradient_by_name("jet").is_none());
    }
}
