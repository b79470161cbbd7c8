//! Synthetic dataset generators.
//!
//! Generators are plain values: each `generate` call builds its own seeded
//! noise source, so two calls with the same configuration return identical
//! datasets and no state leaks between charts.

pub mod cpu_usage;
pub mod dataset;
pub mod noise;
pub mod price_prediction;

pub use cpu_usage::{CPU_USAGE_DOMAIN_MAX, CPU_USAGE_SAMPLE_COUNT, CpuUsageGenerator};
pub use dataset::{Dataset, ValueDomain};
pub use noise::{NoiseSource, SeededNoise, SineHashNoise};
pub use price_prediction::{
    ACTUAL_CATEGORY, ACTUAL_SAMPLE_COUNT, PREDICTED_FUTURE_CATEGORY,
    PREDICTED_FUTURE_SAMPLE_COUNT, PREDICTED_HISTORICAL_CATEGORY,
    PREDICTED_HISTORICAL_SAMPLE_COUNT, PRICE_DOMAIN_MAX, PricePredictionGenerator,
};
