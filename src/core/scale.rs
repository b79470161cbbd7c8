use serde::{Deserialize, Serialize};

use crate::core::ticks::linear_ticks;
use crate::error::{ChartError, ChartResult};

/// Target pixel interval of a scale. `end` may be smaller than `start`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRange {
    pub start: f64,
    pub end: f64,
}

impl PixelRange {
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    fn validate(self) -> ChartResult<Self> {
        if !self.start.is_finite() || !self.end.is_finite() || self.start == self.end {
            return Err(ChartError::InvalidData(
                "pixel range must be finite and non-empty".to_owned(),
            ));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        let (low, high) = if self.domain_start <= self.domain_end {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        };
        value >= low && value <= high
    }

    /// Clamps `value` into the domain.
    #[must_use]
    pub fn clamp(self, value: f64) -> f64 {
        let low = self.domain_start.min(self.domain_end);
        let high = self.domain_start.max(self.domain_end);
        value.clamp(low, high)
    }

    pub fn domain_to_pixel(self, value: f64, range: PixelRange) -> ChartResult<f64> {
        let range = range.validate()?;
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        Ok(range.start + normalized * (range.end - range.start))
    }

    pub fn pixel_to_domain(self, pixel: f64, range: PixelRange) -> ChartResult<f64> {
        let range = range.validate()?;
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let normalized = (pixel - range.start) / (range.end - range.start);
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }

    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        linear_ticks(self.domain_start, self.domain_end, count).into_vec()
    }
}
