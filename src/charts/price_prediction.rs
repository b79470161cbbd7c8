use crate::charts::{CHART_MARGIN_LEFT, CORNFLOWER_BLUE, LIGHT_GREEN, SpecBuilderFn, chart_width};
use crate::data::{ACTUAL_CATEGORY, Dataset, PREDICTED_FUTURE_CATEGORY, PricePredictionGenerator};
use crate::host::{ChartContainer, ResponsiveChartHost};
use crate::plot::{Field, LabelAnchor, Mark, PlotSpec, XAxisSpec, YAxisSpec};
use crate::render::Color;

pub const PRICE_CHART_HEIGHT: u32 = 150;
const FORECAST_FILL_OPACITY: f64 = 0.1;
const LINE_WIDTH: f64 = 1.0;
const X_TICKS: usize = 5;
const Y_TICKS: usize = 5;
const Y_LABEL_OFFSET: f64 = 60.0;

/// Actual price history and the future forecast.
///
/// The `predicted_historical` segment is part of the dataset but not drawn.
#[must_use]
pub fn price_prediction_plot_spec(width: u32, dataset: &Dataset) -> PlotSpec {
    let (min, max) = dataset.domain().as_tuple();
    let actual = dataset.filter_category(ACTUAL_CATEGORY);
    let forecast = dataset.filter_category(PREDICTED_FUTURE_CATEGORY);

    PlotSpec::new(chart_width(width), PRICE_CHART_HEIGHT)
        .with_margin_left(CHART_MARGIN_LEFT)
        .with_style(Color::white(), Color::black())
        .with_mark(
            Mark::area(actual.clone())
                .with_group(Field::Category)
                .with_fill(CORNFLOWER_BLUE),
        )
        .with_mark(
            Mark::line(actual)
                .with_group(Field::Category)
                .with_stroke(CORNFLOWER_BLUE)
                .with_stroke_width(LINE_WIDTH),
        )
        .with_mark(
            Mark::area(forecast.clone())
                .with_group(Field::Category)
                .with_fill(LIGHT_GREEN)
                .with_opacity(FORECAST_FILL_OPACITY),
        )
        .with_mark(
            Mark::line(forecast)
                .with_group(Field::Category)
                .with_stroke(LIGHT_GREEN)
                .with_stroke_width(LINE_WIDTH),
        )
        .with_x_axis(
            XAxisSpec::time()
                .with_label("Date")
                .with_ticks(X_TICKS)
                .with_tick_format("%b %d")
                .with_label_anchor(LabelAnchor::Center),
        )
        .with_y_axis(
            YAxisSpec::default()
                .with_label("Price (kr)")
                .with_domain(min, max)
                .with_ticks(Y_TICKS)
                .with_grid(true)
                .with_label_anchor(LabelAnchor::Center)
                .with_label_offset(Y_LABEL_OFFSET),
        )
}

/// Host for the price chart, holding one freshly generated dataset.
#[must_use]
pub fn price_prediction_chart<C>(
    generator: &PricePredictionGenerator,
) -> ResponsiveChartHost<C, SpecBuilderFn>
where
    C: ChartContainer + 'static,
{
    ResponsiveChartHost::new(generator.generate(), price_prediction_plot_spec as SpecBuilderFn)
}
