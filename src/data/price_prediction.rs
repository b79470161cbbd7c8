use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::DataPoint;
use crate::data::{Dataset, NoiseSource, SineHashNoise, ValueDomain};

pub const ACTUAL_CATEGORY: &str = "actual";
pub const PREDICTED_HISTORICAL_CATEGORY: &str = "predicted_historical";
pub const PREDICTED_FUTURE_CATEGORY: &str = "predicted_future";

pub const ACTUAL_SAMPLE_COUNT: usize = 17;
pub const PREDICTED_HISTORICAL_SAMPLE_COUNT: usize = 15;
pub const PREDICTED_FUTURE_SAMPLE_COUNT: usize = 30;

pub const PRICE_DOMAIN_MAX: f64 = 44_000.0;

/// 2024-03-01T00:00:00Z as days since the unix epoch.
const DEFAULT_START_EPOCH_DAY: i64 = 19_783;

/// Random-walk parameters of one daily segment.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SegmentWalk {
    category: &'static str,
    count: usize,
    start: DateTime<Utc>,
    opening_price: f64,
    wave_frequency: f64,
    wave_amplitude: f64,
    growth_per_step: f64,
    noise_amplitude: f64,
}

impl SegmentWalk {
    /// Appends clamped samples and returns the final unclamped price.
    fn walk(
        self,
        noise: &mut impl NoiseSource,
        domain: ValueDomain,
        points: &mut Vec<DataPoint>,
    ) -> f64 {
        let mut price = self.opening_price;
        for index in 0..self.count {
            let step = index as f64;
            let timestamp = self.start + TimeDelta::days(index as i64);
            let trend = (step * self.wave_frequency).sin() * self.wave_amplitude;
            let growth = step * self.growth_per_step;
            let jitter = (noise.next_unit() - 0.5) * self.noise_amplitude;
            price += trend + growth + jitter;
            points.push(DataPoint::new(timestamp, domain.clamp(price)).with_category(self.category));
        }
        price
    }
}

/// Daily price series split into actual, back-tested and forecast segments.
///
/// All three segments draw from one sine-hash noise sequence in order, so
/// changing one segment's length shifts the noise seen by the next. The
/// forecast continues from the last unclamped back-tested price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePredictionGenerator {
    pub start: DateTime<Utc>,
    pub future_start: DateTime<Utc>,
    pub seed: i64,
}

impl Default for PricePredictionGenerator {
    fn default() -> Self {
        let start = DateTime::<Utc>::UNIX_EPOCH + TimeDelta::days(DEFAULT_START_EPOCH_DAY);
        Self::new(start)
    }
}

impl PricePredictionGenerator {
    /// The forecast starts on the same day as the history.
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            start,
            future_start: start,
            seed: SineHashNoise::DEFAULT_SEED,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_future_start(mut self, future_start: DateTime<Utc>) -> Self {
        self.future_start = future_start;
        self
    }

    #[must_use]
    pub fn domain() -> ValueDomain {
        ValueDomain {
            min: 0.0,
            max: PRICE_DOMAIN_MAX,
        }
    }

    #[must_use]
    pub fn generate(&self) -> Dataset {
        let domain = Self::domain();
        let mut noise = SineHashNoise::new(self.seed);
        let mut points = Vec::with_capacity(
            ACTUAL_SAMPLE_COUNT + PREDICTED_HISTORICAL_SAMPLE_COUNT + PREDICTED_FUTURE_SAMPLE_COUNT,
        );

        SegmentWalk {
            category: ACTUAL_CATEGORY,
            count: ACTUAL_SAMPLE_COUNT,
            start: self.start,
            opening_price: 30_000.0,
            wave_frequency: 0.2,
            wave_amplitude: 500.0,
            growth_per_step: 0.0,
            noise_amplitude: 300.0,
        }
        .walk(&mut noise, domain, &mut points);

        let last_predicted = SegmentWalk {
            category: PREDICTED_HISTORICAL_CATEGORY,
            count: PREDICTED_HISTORICAL_SAMPLE_COUNT,
            start: self.start,
            opening_price: 31_000.0,
            wave_frequency: 0.3,
            wave_amplitude: 600.0,
            growth_per_step: 0.0,
            noise_amplitude: 400.0,
        }
        .walk(&mut noise, domain, &mut points);

        SegmentWalk {
            category: PREDICTED_FUTURE_CATEGORY,
            count: PREDICTED_FUTURE_SAMPLE_COUNT,
            start: self.future_start,
            opening_price: last_predicted,
            wave_frequency: 0.4,
            wave_amplitude: 700.0,
            growth_per_step: 70.0,
            noise_amplitude: 500.0,
        }
        .walk(&mut noise, domain, &mut points);

        debug!(
            seed = self.seed,
            count = points.len(),
            "generated price prediction dataset"
        );
        Dataset::new(points, domain)
    }
}
