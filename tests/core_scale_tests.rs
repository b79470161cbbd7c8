use approx::assert_abs_diff_eq;
use chrono::{DateTime, TimeZone, Utc};
use plot_metrics::core::{
    LinearScale, PixelRange, PlotArea, TimeInterval, TimeScale, Viewport, format_tick_number,
    linear_ticks,
};

fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[test]
fn linear_scale_maps_bottom_to_top_range() {
    let scale = LinearScale::new(0.0, 100.0).expect("scale");
    let range = PixelRange::new(190.0, 10.0);

    assert_abs_diff_eq!(scale.domain_to_pixel(0.0, range).expect("px"), 190.0);
    assert_abs_diff_eq!(scale.domain_to_pixel(100.0, range).expect("px"), 10.0);
    assert_abs_diff_eq!(scale.domain_to_pixel(50.0, range).expect("px"), 100.0);
    assert_abs_diff_eq!(
        scale.pixel_to_domain(55.0, range).expect("domain"),
        75.0,
        epsilon = 1e-9
    );
}

#[test]
fn linear_scale_rejects_degenerate_inputs() {
    assert!(LinearScale::new(5.0, 5.0).is_err());
    assert!(LinearScale::new(f64::NAN, 1.0).is_err());

    let scale = LinearScale::new(0.0, 1.0).expect("scale");
    assert!(scale.domain_to_pixel(0.5, PixelRange::new(3.0, 3.0)).is_err());
    assert!(
        scale
            .domain_to_pixel(f64::INFINITY, PixelRange::new(0.0, 10.0))
            .is_err()
    );
}

#[test]
fn axis_ticks_for_dashboard_domains() {
    assert_eq!(
        linear_ticks(0.0, 100.0, 5).as_slice(),
        &[0.0, 20.0, 40.0, 60.0, 80.0, 100.0]
    );
    let labels: Vec<String> = linear_ticks(0.0, 44_000.0, 5)
        .iter()
        .map(|value| format_tick_number(*value))
        .collect();
    assert_eq!(labels, vec!["0", "10,000", "20,000", "30,000", "40,000"]);
}

#[test]
fn time_scale_widens_single_instant() {
    let scale = TimeScale::new(1_000.0, 1_000.0).expect("scale");
    assert_eq!(scale.domain(), (999.5, 1_000.5));
    assert!(TimeScale::from_points(&[]).is_err());
}

#[test]
fn hourly_ticks_align_to_three_hour_boundaries() {
    let scale = TimeScale::from_datetimes(utc(2024, 2, 29, 12), utc(2024, 3, 1, 11)).expect("scale");
    let (interval, ticks) = scale.ticks(12).expect("ticks");

    assert_eq!(interval, TimeInterval::Hour(3));
    assert_eq!(ticks.len(), 8);
    assert_eq!(ticks[0], utc(2024, 2, 29, 12));
    assert_eq!(ticks[4], utc(2024, 3, 1, 0));
    assert_eq!(ticks[7], utc(2024, 3, 1, 9));
}

#[test]
fn daily_span_ticks_land_on_sundays() {
    let scale = TimeScale::from_datetimes(utc(2024, 3, 1, 0), utc(2024, 3, 30, 0)).expect("scale");
    let (interval, ticks) = scale.ticks(5).expect("ticks");

    assert_eq!(interval, TimeInterval::Week);
    assert_eq!(
        ticks,
        vec![
            utc(2024, 3, 3, 0),
            utc(2024, 3, 10, 0),
            utc(2024, 3, 17, 0),
            utc(2024, 3, 24, 0)
        ]
    );
}

#[test]
fn month_ticks_skip_partial_first_month() {
    let ticks = TimeInterval::Month(1).ticks(utc(2024, 1, 15, 0), utc(2024, 4, 2, 0));
    assert_eq!(
        ticks,
        vec![utc(2024, 2, 1, 0), utc(2024, 3, 1, 0), utc(2024, 4, 1, 0)]
    );
}

#[test]
fn plot_area_rejects_margins_that_consume_viewport() {
    let viewport = Viewport::new(100, 50);
    let area = PlotArea::from_margins(viewport, 20.0, 20.0, 30.0, 60.0);
    assert!(area.is_err());

    let area = PlotArea::from_margins(Viewport::new(600, 200), 20.0, 20.0, 30.0, 60.0).expect("area");
    assert_abs_diff_eq!(area.width(), 520.0);
    assert_abs_diff_eq!(area.height(), 150.0);
    assert!(PlotArea::from_margins(Viewport::new(0, 200), 0.0, 0.0, 0.0, 0.0).is_err());
}
