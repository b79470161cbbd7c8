//! The two dashboard charts: each pairs a generator with a width-driven plot
//! spec builder.

pub mod cpu_usage;
pub mod price_prediction;

use crate::data::Dataset;
use crate::plot::PlotSpec;
use crate::render::Color;

pub use cpu_usage::{CPU_CHART_HEIGHT, cpu_usage_chart, cpu_usage_plot_spec};
pub use price_prediction::{
    PRICE_CHART_HEIGHT, price_prediction_chart, price_prediction_plot_spec,
};

/// Plot spec builder signature used by the dashboard charts.
pub type SpecBuilderFn = fn(u32, &Dataset) -> PlotSpec;

/// Narrower containers still render at this width.
pub const MIN_CHART_WIDTH: u32 = 120;

pub const CHART_MARGIN_LEFT: f64 = 60.0;

pub const CORNFLOWER_BLUE: Color = Color::rgb8(100, 149, 237);
pub const LIGHT_GREEN: Color = Color::rgb8(144, 238, 144);

fn chart_width(container_width: u32) -> u32 {
    container_width.max(MIN_CHART_WIDTH)
}
