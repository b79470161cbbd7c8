use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_seconds, unix_seconds_to_datetime};
use crate::core::ticks::TimeInterval;
use crate::core::{DataPoint, LinearScale, PixelRange};
use crate::error::{ChartError, ChartResult};

/// Time axis model over unix seconds.
///
/// The domain is the raw extent of the data with no padding. A single
/// timestamp is widened by half a second on each side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    start: f64,
    end: f64,
}

impl TimeScale {
    pub fn new(time_start: f64, time_end: f64) -> ChartResult<Self> {
        let (start, end) = normalize_range(time_start, time_end, 1.0)?;
        Ok(Self { start, end })
    }

    pub fn from_datetimes(start: DateTime<Utc>, end: DateTime<Utc>) -> ChartResult<Self> {
        Self::new(
            datetime_to_unix_seconds(start),
            datetime_to_unix_seconds(end),
        )
    }

    pub fn from_points(points: &[DataPoint]) -> ChartResult<Self> {
        if points.is_empty() {
            return Err(ChartError::InvalidData(
                "time scale cannot be built from empty data".to_owned(),
            ));
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for point in points {
            let seconds = point.unix_seconds();
            min = min.min(seconds);
            max = max.max(seconds);
        }
        Self::new(min, max)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.start, self.end)
    }

    pub fn linear(self) -> ChartResult<LinearScale> {
        LinearScale::new(self.start, self.end)
    }

    pub fn time_to_pixel(self, time: DateTime<Utc>, range: PixelRange) -> ChartResult<f64> {
        self.linear()?
            .domain_to_pixel(datetime_to_unix_seconds(time), range)
    }

    pub fn pixel_to_time(self, pixel: f64, range: PixelRange) -> ChartResult<DateTime<Utc>> {
        let seconds = self.linear()?.pixel_to_domain(pixel, range)?;
        unix_seconds_to_datetime(seconds)
    }

    #[must_use]
    pub fn tick_interval(self, count: usize) -> TimeInterval {
        TimeInterval::for_span(self.end - self.start, count)
    }

    /// Calendar-aligned ticks inside the domain, roughly `count` of them.
    pub fn ticks(self, count: usize) -> ChartResult<(TimeInterval, Vec<DateTime<Utc>>)> {
        let interval = self.tick_interval(count);
        let start = unix_seconds_to_datetime(self.start)?;
        let end = unix_seconds_to_datetime(self.end)?;
        Ok((interval, interval.ticks(start, end)))
    }
}

fn normalize_range(start: f64, end: f64, min_span: f64) -> ChartResult<(f64, f64)> {
    if !start.is_finite() || !end.is_finite() {
        return Err(ChartError::InvalidData(
            "scale range must be finite".to_owned(),
        ));
    }

    if start == end {
        let half = min_span / 2.0;
        return Ok((start - half, end + half));
    }

    Ok((start.min(end), start.max(end)))
}
