//! plot-metrics: responsive dashboard charts over synthetic metrics.
//!
//! Data generators produce CPU-usage and price-prediction series, a
//! declarative `PlotSpec` describes how to draw them, and
//! `ResponsiveChartHost` keeps one rendered visual attached to a container,
//! regenerating it whenever the container width changes.

pub mod charts;
pub mod core;
pub mod data;
pub mod error;
pub mod host;
pub mod plot;
pub mod render;
pub mod telemetry;

pub use data::{CpuUsageGenerator, Dataset, PricePredictionGenerator};
pub use error::{ChartError, ChartResult};
pub use host::{ChartContainer, HeadlessContainer, ResizeObserver, ResponsiveChartHost, Visual};
pub use plot::{PlotSpec, render_plot};
