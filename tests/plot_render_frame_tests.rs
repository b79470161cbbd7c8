use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use plot_metrics::ChartError;
use plot_metrics::charts::{cpu_usage_plot_spec, price_prediction_plot_spec};
use plot_metrics::core::DataPoint;
use plot_metrics::data::{CpuUsageGenerator, PricePredictionGenerator};
use plot_metrics::plot::{Field, Mark, PlotSpec, XAxisSpec, YAxisSpec, render_plot};
use plot_metrics::render::{Color, TextOrientation};

fn anchor() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .expect("valid anchor")
}

fn ramp(count: i64) -> Vec<DataPoint> {
    (0..count)
        .map(|index| DataPoint::new(anchor() + TimeDelta::days(index), index as f64 * 10.0))
        .collect()
}

#[test]
fn cpu_chart_frame_has_expected_layers() {
    let dataset = CpuUsageGenerator::new(anchor()).with_seed(1).generate();
    let frame = render_plot(&cpu_usage_plot_spec(600, &dataset)).expect("render");

    assert_eq!(frame.viewport.width, 600);
    assert_eq!(frame.viewport.height, 200);
    assert_eq!(frame.rects.len(), 1);
    assert_eq!(frame.rects[0].fill_color, Color::white());
    assert_eq!(frame.polygons.len(), 1);

    // 6 grid lines + 8 x ticks + 6 y ticks.
    assert_eq!(frame.lines.len(), 20);
    // 8 x labels + "Time" + 6 y labels + "CPU Usage (%)".
    assert_eq!(frame.texts.len(), 16);

    let labels: Vec<&str> = frame.texts.iter().map(|text| text.text.as_str()).collect();
    assert_eq!(labels[0], "12:00");
    assert!(labels.contains(&"00:00"));
    assert!(labels.contains(&"100"));

    let y_label = frame
        .texts
        .iter()
        .find(|text| text.text == "CPU Usage (%)")
        .expect("y label");
    assert_eq!(y_label.orientation, TextOrientation::VerticalUp);
    assert!((y_label.x - 20.0).abs() <= 1e-9);
}

#[test]
fn area_polygon_closes_on_plot_bottom() {
    let dataset = CpuUsageGenerator::new(anchor()).generate();
    let frame = render_plot(&cpu_usage_plot_spec(480, &dataset)).expect("render");

    let polygon = &frame.polygons[0];
    assert_eq!(polygon.points.len(), dataset.len() + 3);
    let bottom = 200.0 - 30.0;
    assert!((polygon.points[0].1 - bottom).abs() <= 1e-9);
    assert!((polygon.points[0].0 - 60.0).abs() <= 1e-9);
    assert_eq!(polygon.points.first(), polygon.points.last());
    assert!((polygon.fill_color.alpha - 0.7).abs() <= 1e-12);
}

#[test]
fn price_chart_draws_actual_and_forecast_only() {
    let dataset = PricePredictionGenerator::default().generate();
    let frame = render_plot(&price_prediction_plot_spec(600, &dataset)).expect("render");

    assert_eq!(frame.viewport.height, 150);
    assert_eq!(frame.polygons.len(), 2);
    // 5 grid lines + 16 actual segments + 29 forecast segments + 4 x ticks + 5 y ticks.
    assert_eq!(frame.lines.len(), 59);

    let labels: Vec<&str> = frame.texts.iter().map(|text| text.text.as_str()).collect();
    assert_eq!(&labels[..4], &["Mar 03", "Mar 10", "Mar 17", "Mar 24"]);
    assert!(labels.contains(&"40,000"));
    assert!(labels.contains(&"Price (kr)"));
    assert!(labels.contains(&"Date"));
}

#[test]
fn spec_without_y_domain_spans_zero_to_data_max() {
    let spec = PlotSpec::new(400, 200)
        .with_mark(Mark::line(ramp(5)))
        .with_y_axis(YAxisSpec::default().with_ticks(4));
    let frame = render_plot(&spec).expect("render");

    let labels: Vec<&str> = frame.texts.iter().map(|text| text.text.as_str()).collect();
    assert!(labels.contains(&"0"));
    assert!(labels.contains(&"40"));
}

#[test]
fn grouped_marks_split_into_one_series_per_category() {
    let points: Vec<DataPoint> = ramp(3)
        .into_iter()
        .map(|point| point.with_category("first"))
        .chain(ramp(3).into_iter().map(|point| point.with_category("second")))
        .collect();

    let spec = PlotSpec::new(400, 200).with_mark(Mark::area(points).with_group(Field::Category));
    let frame = render_plot(&spec).expect("render");
    assert_eq!(frame.polygons.len(), 2);
}

#[test]
fn render_rejects_invalid_specs() {
    let empty = PlotSpec::new(400, 200);
    assert!(matches!(render_plot(&empty), Err(ChartError::InvalidData(_))));

    let zero_width = PlotSpec::new(0, 200).with_mark(Mark::line(ramp(3)));
    assert!(matches!(
        render_plot(&zero_width),
        Err(ChartError::InvalidViewport { width: 0, .. })
    ));

    let bad_format = PlotSpec::new(400, 200)
        .with_mark(Mark::line(ramp(3)))
        .with_x_axis(XAxisSpec::time().with_tick_format("%Q"));
    assert!(matches!(render_plot(&bad_format), Err(ChartError::InvalidSpec(_))));

    let crowded = PlotSpec::new(50, 200)
        .with_margin_left(60.0)
        .with_mark(Mark::line(ramp(3)));
    assert!(matches!(render_plot(&crowded), Err(ChartError::InvalidSpec(_))));
}

#[test]
fn narrow_containers_render_at_minimum_width() {
    let dataset = CpuUsageGenerator::new(anchor()).generate();
    let frame = render_plot(&cpu_usage_plot_spec(10, &dataset)).expect("render");
    assert_eq!(frame.viewport.width, plot_metrics::charts::MIN_CHART_WIDTH);
}
