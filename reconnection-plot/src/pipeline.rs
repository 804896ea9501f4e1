use crate::error::FieldResult;
use crate::field::Snapshot;
use crate::mirror::mirror_snapshot;
use crate::potential::{flux_function, Seed};
use ndarray::Array2;

/// A full-domain snapshot and its flux function, ready to plot.
#[derive(Debug, Clone)]
pub struct FluxMap {
    pub snapshot: Snapshot,
    pub flux: Array2<f64>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    pub mirror: bool,
    pub seed: Seed,
}

/// Mirror the half-domain snapshot (when asked) and integrate Az over it.
/// The half-domain snapshot is consumed.
pub fn reconstruct(half: Snapshot, options: &PipelineOptions) -> FieldResult<FluxMap> {
    let snapshot = if options.mirror {
        let (ix, jx) = half.dim();
        let full = mirror_snapshot(half)?;
        log::info!(
            "Mirrored {}x{} half domain to {}x{}",
            ix,
            jx,
            full.grid.nx(),
            full.grid.ny()
        );
        full
    } else {
        half
    };

    if !snapshot.grid.is_increasing() {
        log::warn!("Coordinates are not strictly increasing; check the mirror boundary");
    }

    let flux = flux_function(snapshot.data.view(), options.seed)?;
    let max_div = snapshot
        .divergence_b()
        .iter()
        .fold(0.0_f64, |acc, v| acc.max(v.abs()));
    log::debug!("max |div B| = {:.3e}", max_div);

    Ok(FluxMap { snapshot, flux })
}
