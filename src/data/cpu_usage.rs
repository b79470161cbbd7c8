use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::DataPoint;
use crate::data::{Dataset, NoiseSource, SeededNoise, ValueDomain};

pub const CPU_USAGE_SAMPLE_COUNT: usize = 24;
pub const CPU_USAGE_DOMAIN_MAX: f64 = 100.0;

/// Hourly CPU-usage samples for the day ending at `end`.
///
/// Sample `i` sits at `end - (24 - i)` hours with value
/// `base_load + sin(i * wave_frequency) * wave_amplitude + wave_offset + noise * noise_amplitude`,
/// clamped to `[0, 100]` after the terms are summed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CpuUsageGenerator {
    pub end: DateTime<Utc>,
    pub seed: u64,
    #[serde(default = "default_base_load")]
    pub base_load: f64,
    #[serde(default = "default_wave_amplitude")]
    pub wave_amplitude: f64,
    #[serde(default = "default_wave_offset")]
    pub wave_offset: f64,
    #[serde(default = "default_wave_frequency")]
    pub wave_frequency: f64,
    #[serde(default = "default_noise_amplitude")]
    pub noise_amplitude: f64,
}

impl CpuUsageGenerator {
    #[must_use]
    pub fn new(end: DateTime<Utc>) -> Self {
        Self {
            end,
            seed: 0,
            base_load: default_base_load(),
            wave_amplitude: default_wave_amplitude(),
            wave_offset: default_wave_offset(),
            wave_frequency: default_wave_frequency(),
            noise_amplitude: default_noise_amplitude(),
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_base_load(mut self, base_load: f64) -> Self {
        self.base_load = base_load;
        self
    }

    #[must_use]
    pub fn with_wave(mut self, amplitude: f64, offset: f64, frequency: f64) -> Self {
        self.wave_amplitude = amplitude;
        self.wave_offset = offset;
        self.wave_frequency = frequency;
        self
    }

    #[must_use]
    pub fn with_noise_amplitude(mut self, noise_amplitude: f64) -> Self {
        self.noise_amplitude = noise_amplitude;
        self
    }

    #[must_use]
    pub fn domain() -> ValueDomain {
        ValueDomain {
            min: 0.0,
            max: CPU_USAGE_DOMAIN_MAX,
        }
    }

    #[must_use]
    pub fn generate(&self) -> Dataset {
        let domain = Self::domain();
        let mut noise = SeededNoise::new(self.seed);
        let mut points = Vec::with_capacity(CPU_USAGE_SAMPLE_COUNT);

        for index in 0..CPU_USAGE_SAMPLE_COUNT {
            let hours_back = (CPU_USAGE_SAMPLE_COUNT - index) as i64;
            let timestamp = self.end - TimeDelta::hours(hours_back);
            let step = index as f64;
            let variation = (step * self.wave_frequency).sin() * self.wave_amplitude + self.wave_offset;
            let raw = self.base_load + variation + noise.next_unit() * self.noise_amplitude;
            points.push(DataPoint::new(timestamp, domain.clamp(raw)));
        }

        debug!(
            seed = self.seed,
            count = points.len(),
            "generated cpu usage dataset"
        );
        Dataset::new(points, domain)
    }
}

fn default_base_load() -> f64 {
    40.0
}

fn default_wave_amplitude() -> f64 {
    8.0
}

fn default_wave_offset() -> f64 {
    30.0
}

fn default_wave_frequency() -> f64 {
    0.2
}

fn default_noise_amplitude() -> f64 {
    10.0
}
