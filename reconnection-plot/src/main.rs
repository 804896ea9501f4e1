use anyhow::{anyhow, Context, Result};
use reconnection_plot::config::Config;
use reconnection_plot::pipeline::{reconstruct, PipelineOptions};
use reconnection_plot::reader::{OpenMhdReader, SnapshotReader};
use reconnection_plot::visualisation::{gradient_by_name, PlotOptions, SnapshotVisualiser};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "reconnection.toml".to_string());
    let config = Config::from_file(&config_path)?;
    config.print_summary();

    let path = config.input.path();
    let half = OpenMhdReader::new()
        .read_path(&path, &config.input.bounds)
        .with_context(|| format!("Failed to read snapshot '{}'", path.display()))?;
    println!(
        "Read {}x{} snapshot at t = {}",
        half.grid.nx(),
        half.grid.ny(),
        half.time
    );

    let options = PipelineOptions {
        mirror: config.mirror.enabled,
        seed: config.potential.seed,
    };
    let map = reconstruct(half, &options)?;

    let vis = &config.visualization;
    let gradient = gradient_by_name(&vis.colormap)
        .ok_or_else(|| anyhow!("Unknown colormap '{}'", vis.colormap))?;
    let visualiser =
        SnapshotVisualiser::new(&vis.output, vis.image_width, vis.image_height, gradient)
            .with_context(|| format!("Failed to prepare output '{}'", vis.output.display()))?;
    let plot = PlotOptions {
        field: vis.field,
        title: vis.title.clone(),
        contour_levels: vis.contour_levels,
    };
    visualiser
        .render(&map.snapshot, &map.flux, &plot)
        .map_err(|e| anyhow!("Failed to render plot: {}", e))?;

    println!("Plot saved to {}", vis.output.display());
    Ok(())
}
