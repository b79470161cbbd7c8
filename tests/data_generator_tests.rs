use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use plot_metrics::data::{
    ACTUAL_CATEGORY, ACTUAL_SAMPLE_COUNT, CPU_USAGE_SAMPLE_COUNT, CpuUsageGenerator,
    PREDICTED_FUTURE_CATEGORY, PREDICTED_FUTURE_SAMPLE_COUNT, PREDICTED_HISTORICAL_CATEGORY,
    PREDICTED_HISTORICAL_SAMPLE_COUNT, PRICE_DOMAIN_MAX, PricePredictionGenerator,
};

fn anchor() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .expect("valid anchor")
}

#[test]
fn cpu_usage_has_one_sample_per_hour_before_anchor() {
    let dataset = CpuUsageGenerator::new(anchor()).with_seed(7).generate();
    assert_eq!(dataset.len(), CPU_USAGE_SAMPLE_COUNT);

    let points = dataset.points();
    assert_eq!(points[0].timestamp, anchor() - TimeDelta::hours(24));
    assert_eq!(points[23].timestamp, anchor() - TimeDelta::hours(1));
    for pair in points.windows(2) {
        assert_eq!(pair[1].timestamp - pair[0].timestamp, TimeDelta::hours(1));
    }
    assert!(points.iter().all(|point| point.category.is_none()));
}

#[test]
fn cpu_usage_values_follow_wave_plus_bounded_noise() {
    let dataset = CpuUsageGenerator::new(anchor()).with_seed(3).generate();
    for (index, point) in dataset.points().iter().enumerate() {
        let base = 40.0 + (index as f64 * 0.2).sin() * 8.0 + 30.0;
        assert!(point.value >= base - 1e-9, "sample {index} below wave");
        assert!(point.value < base + 10.0, "sample {index} exceeds noise band");
    }
}

#[test]
fn cpu_usage_clamps_overdriven_load() {
    let dataset = CpuUsageGenerator::new(anchor())
        .with_base_load(95.0)
        .with_noise_amplitude(50.0)
        .generate();
    assert!(dataset.all_within_domain());
    assert!(dataset.points().iter().any(|point| point.value == 100.0));
}

#[test]
fn cpu_usage_is_deterministic_per_seed() {
    let generator = CpuUsageGenerator::new(anchor()).with_seed(11);
    assert_eq!(generator.generate(), generator.generate());

    let other = CpuUsageGenerator::new(anchor()).with_seed(12).generate();
    assert_ne!(generator.generate(), other);
}

#[test]
fn price_prediction_emits_three_labeled_segments() {
    let dataset = PricePredictionGenerator::default().generate();
    assert_eq!(
        dataset.len(),
        ACTUAL_SAMPLE_COUNT + PREDICTED_HISTORICAL_SAMPLE_COUNT + PREDICTED_FUTURE_SAMPLE_COUNT
    );
    assert_eq!(dataset.len(), 62);

    let counts = dataset.category_counts();
    let order: Vec<&str> = counts.keys().map(String::as_str).collect();
    assert_eq!(
        order,
        vec![ACTUAL_CATEGORY, PREDICTED_HISTORICAL_CATEGORY, PREDICTED_FUTURE_CATEGORY]
    );
    assert_eq!(counts[ACTUAL_CATEGORY], 17);
    assert_eq!(counts[PREDICTED_HISTORICAL_CATEGORY], 15);
    assert_eq!(counts[PREDICTED_FUTURE_CATEGORY], 30);
}

#[test]
fn price_prediction_segments_are_daily_from_march_first() {
    let start = Utc
        .with_ymd_and_hms(2024, 3, 1, 0, 0, 0)
        .single()
        .expect("valid start");
    let dataset = PricePredictionGenerator::default().generate();

    for (category, count) in [
        (ACTUAL_CATEGORY, 17),
        (PREDICTED_HISTORICAL_CATEGORY, 15),
        (PREDICTED_FUTURE_CATEGORY, 30),
    ] {
        let segment = dataset.filter_category(category);
        assert_eq!(segment.len(), count);
        assert_eq!(segment[0].timestamp, start);
        for pair in segment.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, TimeDelta::days(1));
        }
    }
}

#[test]
fn price_prediction_future_start_is_configurable() {
    let start = Utc
        .with_ymd_and_hms(2024, 3, 1, 0, 0, 0)
        .single()
        .expect("valid start");
    let future_start = start + TimeDelta::days(17);
    let dataset = PricePredictionGenerator::new(start)
        .with_future_start(future_start)
        .generate();

    let future = dataset.filter_category(PREDICTED_FUTURE_CATEGORY);
    assert_eq!(future[0].timestamp, future_start);
    assert_eq!(future[29].timestamp, future_start + TimeDelta::days(29));

    let baseline = PricePredictionGenerator::new(start).generate();
    let values: Vec<f64> = future.iter().map(|point| point.value).collect();
    let baseline_values: Vec<f64> = baseline
        .filter_category(PREDICTED_FUTURE_CATEGORY)
        .iter()
        .map(|point| point.value)
        .collect();
    assert_eq!(values, baseline_values);
}

#[test]
fn price_prediction_first_actual_step_matches_noise_sequence() {
    let dataset = PricePredictionGenerator::default().generate();
    let first = &dataset.points()[0];

    let hashed = 42f64.sin() * 10_000.0;
    let noise = hashed - hashed.floor();
    let expected = 30_000.0 + (noise - 0.5) * 300.0;
    approx::assert_abs_diff_eq!(first.value, expected, epsilon = 1e-9);
}

#[test]
fn price_prediction_forecast_saturates_at_domain_max() {
    let dataset = PricePredictionGenerator::default().generate();
    assert!(dataset.all_within_domain());

    let future = dataset.filter_category(PREDICTED_FUTURE_CATEGORY);
    assert_eq!(future[29].value, PRICE_DOMAIN_MAX);
}

#[test]
fn price_prediction_is_deterministic_per_seed() {
    let generator = PricePredictionGenerator::default().with_seed(99);
    assert_eq!(generator.generate(), generator.generate());
    assert_ne!(generator.generate(), PricePredictionGenerator::default().generate());
}
