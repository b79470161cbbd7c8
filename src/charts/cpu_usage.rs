use crate::charts::{CHART_MARGIN_LEFT, CORNFLOWER_BLUE, SpecBuilderFn, chart_width};
use crate::data::{CpuUsageGenerator, Dataset};
use crate::host::{ChartContainer, ResponsiveChartHost};
use crate::plot::{LabelAnchor, Mark, PlotSpec, XAxisSpec, YAxisSpec};
use crate::render::Color;

pub const CPU_CHART_HEIGHT: u32 = 200;
const AREA_OPACITY: f64 = 0.7;
const X_TICKS: usize = 12;
const Y_TICKS: usize = 5;
const Y_LABEL_OFFSET: f64 = 40.0;

/// Hourly CPU load as a filled area over a fixed 0..100 % axis.
#[must_use]
pub fn cpu_usage_plot_spec(width: u32, dataset: &Dataset) -> PlotSpec {
    let (min, max) = dataset.domain().as_tuple();
    PlotSpec::new(chart_width(width), CPU_CHART_HEIGHT)
        .with_margin_left(CHART_MARGIN_LEFT)
        .with_style(Color::white(), Color::black())
        .with_mark(
            Mark::area(dataset.points().to_vec())
                .with_fill(CORNFLOWER_BLUE)
                .with_opacity(AREA_OPACITY),
        )
        .with_x_axis(
            XAxisSpec::time()
                .with_label("Time")
                .with_ticks(X_TICKS)
                .with_tick_format("%H:%M")
                .with_label_anchor(LabelAnchor::Center),
        )
        .with_y_axis(
            YAxisSpec::default()
                .with_label("CPU Usage (%)")
                .with_domain(min, max)
                .with_ticks(Y_TICKS)
                .with_grid(true)
                .with_label_anchor(LabelAnchor::Center)
                .with_label_offset(Y_LABEL_OFFSET),
        )
}

/// Host for the CPU chart, holding one freshly generated dataset.
#[must_use]
pub fn cpu_usage_chart<C>(generator: &CpuUsageGenerator) -> ResponsiveChartHost<C, SpecBuilderFn>
where
    C: ChartContainer + 'static,
{
    ResponsiveChartHost::new(generator.generate(), cpu_usage_plot_spec as SpecBuilderFn)
}
