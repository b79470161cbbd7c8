use chrono::{DateTime, Utc};

use crate::error::{ChartError, ChartResult};

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

pub fn unix_seconds_to_datetime(seconds: f64) -> ChartResult<DateTime<Utc>> {
    if !seconds.is_finite() {
        return Err(ChartError::InvalidData(
            "unix seconds must be finite".to_owned(),
        ));
    }

    let millis = (seconds * 1_000.0).round();
    if millis > (i64::MAX as f64) || millis < (i64::MIN as f64) {
        return Err(ChartError::InvalidData(
            "unix seconds out of representable range".to_owned(),
        ));
    }

    DateTime::<Utc>::from_timestamp_millis(millis as i64).ok_or_else(|| {
        ChartError::InvalidData("unix seconds out of calendar range".to_owned())
    })
}
