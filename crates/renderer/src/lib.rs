//! Drawing engine for the statistics chart.
//!
//! [`ChartModel`] is a validated, drawable snapshot of the stats buffer.
//! [`ChartSurface`] owns at most one model at a time and renders it on an
//! Iced canvas.

pub mod model;
pub mod surface;

pub use model::{format_rate, ChartModel, Series};
pub use surface::ChartSurface;
