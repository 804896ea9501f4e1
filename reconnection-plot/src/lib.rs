//! Full-domain reconstruction and flux-function plots of 2D MHD
//! reconnection runs that were simulated on one side of the current sheet.

pub mod config;
pub mod contour;
pub mod error;
pub mod field;
pub mod grid;
pub mod mirror;
pub mod pipeline;
pub mod potential;
pub mod reader;
pub mod visualisation;

pub use error::{FieldError, FieldResult};
pub use field::{Component, Snapshot, NVAR};
pub use grid::Grid;
pub use pipeline::{reconstruct, FluxMap, PipelineOptions};
pub use potential::Seed;
