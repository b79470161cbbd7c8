use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

pub type TickValues = SmallVec<[f64; 16]>;

const MAX_TICKS: usize = 4_096;

const SECOND_SECS: f64 = 1.0;
const MINUTE_SECS: f64 = 60.0;
const HOUR_SECS: f64 = 3_600.0;
const DAY_SECS: f64 = 86_400.0;
const WEEK_SECS: f64 = 604_800.0;
const MONTH_SECS: f64 = 2_592_000.0;
const YEAR_SECS: f64 = 31_536_000.0;

/// Nice step between ticks: 1, 2, 5 or 10 times a power of ten.
#[must_use]
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let count = count.max(1) as f64;
    let step = (stop - start).abs() / count;
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }

    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * 10f64.powf(power)
}

/// Returns roughly `count` nicely rounded values spanning `[start, stop]`.
///
/// Values are ordered like the input bounds, so a reversed domain yields
/// descending ticks.
#[must_use]
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> TickValues {
    let mut ticks = TickValues::new();
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return ticks;
    }
    if start == stop {
        ticks.push(start);
        return ticks;
    }

    let reverse = stop < start;
    let (low, high) = if reverse { (stop, start) } else { (start, stop) };
    let step = tick_increment(low, high, count);
    if step <= 0.0 {
        return ticks;
    }

    if step >= 1.0 {
        let first = (low / step).ceil() as i64;
        let last = (high / step).floor() as i64;
        for index in first..=last {
            if ticks.len() >= MAX_TICKS {
                break;
            }
            ticks.push(index as f64 * step);
        }
    } else {
        // Dividing by the inverse step keeps values like 0.3 exact.
        let inverse = (1.0 / step).round();
        let first = (low * inverse).ceil() as i64;
        let last = (high * inverse).floor() as i64;
        for index in first..=last {
            if ticks.len() >= MAX_TICKS {
                break;
            }
            ticks.push(index as f64 / inverse);
        }
    }

    if reverse {
        ticks.reverse();
    }
    ticks
}

/// Formats a tick value with thousands separators, e.g. `10,000` or `0.25`.
#[must_use]
pub fn format_tick_number(value: f64) -> String {
    if !value.is_finite() {
        return "nan".to_owned();
    }

    let rounded = (value * 1_000_000.0).round() / 1_000_000.0;
    let abs = rounded.abs();
    let integer = abs.trunc();
    let fraction = abs - integer;

    let mut text = group_thousands(integer as u64);
    if fraction > 0.0 {
        let digits = format!("{fraction:.6}");
        let trimmed = digits.trim_start_matches('0').trim_end_matches('0');
        if trimmed != "." {
            text.push_str(trimmed);
        }
    }
    if rounded < 0.0 {
        text.insert(0, '-');
    }
    text
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Rejects strftime patterns chrono cannot render.
pub fn validate_time_format(pattern: &str) -> ChartResult<()> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(ChartError::InvalidSpec(format!(
            "invalid time tick format `{pattern}`"
        )));
    }
    Ok(())
}

pub fn format_time_tick(time: DateTime<Utc>, pattern: &str) -> ChartResult<String> {
    validate_time_format(pattern)?;
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    let mut text = String::new();
    write!(text, "{}", time.format_with_items(items.iter())).map_err(|_| {
        ChartError::InvalidSpec(format!("failed to format time tick with `{pattern}`"))
    })?;
    Ok(text)
}

/// Calendar interval used to place time-axis ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeInterval {
    Second(u32),
    Minute(u32),
    Hour(u32),
    Day(u32),
    Week,
    Month(u32),
    Year(u32),
}

const CANDIDATE_INTERVALS: [TimeInterval; 17] = [
    TimeInterval::Second(1),
    TimeInterval::Second(5),
    TimeInterval::Second(15),
    TimeInterval::Second(30),
    TimeInterval::Minute(1),
    TimeInterval::Minute(5),
    TimeInterval::Minute(15),
    TimeInterval::Minute(30),
    TimeInterval::Hour(1),
    TimeInterval::Hour(3),
    TimeInterval::Hour(6),
    TimeInterval::Hour(12),
    TimeInterval::Day(1),
    TimeInterval::Day(2),
    TimeInterval::Week,
    TimeInterval::Month(1),
    TimeInterval::Month(3),
];

impl TimeInterval {
    #[must_use]
    pub fn approx_seconds(self) -> f64 {
        match self {
            Self::Second(step) => f64::from(step) * SECOND_SECS,
            Self::Minute(step) => f64::from(step) * MINUTE_SECS,
            Self::Hour(step) => f64::from(step) * HOUR_SECS,
            Self::Day(step) => f64::from(step) * DAY_SECS,
            Self::Week => WEEK_SECS,
            Self::Month(step) => f64::from(step) * MONTH_SECS,
            Self::Year(step) => f64::from(step) * YEAR_SECS,
        }
    }

    /// Picks the candidate interval whose tick count over `span_seconds` is
    /// closest to `count`.
    #[must_use]
    pub fn for_span(span_seconds: f64, count: usize) -> Self {
        let target = span_seconds.abs() / count.max(1) as f64;
        if !target.is_finite() || target <= 0.0 {
            return Self::Second(1);
        }

        let index = CANDIDATE_INTERVALS.partition_point(|interval| interval.approx_seconds() <= target);
        if index == CANDIDATE_INTERVALS.len() {
            let years = tick_increment(0.0, span_seconds.abs() / YEAR_SECS, count)
                .round()
                .max(1.0);
            return Self::Year(years.min(f64::from(u32::MAX)) as u32);
        }
        if index == 0 {
            return Self::Second(1);
        }

        let lower = CANDIDATE_INTERVALS[index - 1];
        let upper = CANDIDATE_INTERVALS[index];
        if target / lower.approx_seconds() < upper.approx_seconds() / target {
            lower
        } else {
            upper
        }
    }

    #[must_use]
    pub fn is_sub_daily(self) -> bool {
        matches!(self, Self::Second(_) | Self::Minute(_) | Self::Hour(_))
    }

    /// Label pattern used when the axis spec carries no explicit format.
    #[must_use]
    pub fn default_format(self) -> &'static str {
        match self {
            Self::Second(_) => "%H:%M:%S",
            Self::Minute(_) | Self::Hour(_) => "%H:%M",
            Self::Day(_) | Self::Week => "%b %d",
            Self::Month(_) => "%B",
            Self::Year(_) => "%Y",
        }
    }

    /// Interval boundaries inside `[start, stop]`, in UTC.
    #[must_use]
    pub fn ticks(self, start: DateTime<Utc>, stop: DateTime<Utc>) -> Vec<DateTime<Utc>> {
        let (start, stop) = if start <= stop {
            (start, stop)
        } else {
            (stop, start)
        };

        match self {
            Self::Second(step) => epoch_aligned_ticks(start, stop, i64::from(step.max(1)) * 1_000),
            Self::Minute(step) => {
                epoch_aligned_ticks(start, stop, i64::from(step.max(1)) * 60_000)
            }
            Self::Hour(step) => {
                epoch_aligned_ticks(start, stop, i64::from(step.max(1)) * 3_600_000)
            }
            Self::Day(step) => {
                let step = step.max(1);
                daily_ticks(start, stop, |date| date.day0() % step == 0)
            }
            Self::Week => daily_ticks(start, stop, |date| date.weekday() == Weekday::Sun),
            Self::Month(step) => monthly_ticks(start, stop, step.max(1)),
            Self::Year(step) => yearly_ticks(start, stop, step.max(1)),
        }
    }
}

fn epoch_aligned_ticks(start: DateTime<Utc>, stop: DateTime<Utc>, step_ms: i64) -> Vec<DateTime<Utc>> {
    let start_ms = start.timestamp_millis();
    let stop_ms = stop.timestamp_millis();

    let mut tick = start_ms.div_euclid(step_ms) * step_ms;
    if tick < start_ms {
        tick += step_ms;
    }

    let mut ticks = Vec::new();
    while tick <= stop_ms && ticks.len() < MAX_TICKS {
        if let Some(time) = DateTime::<Utc>::from_timestamp_millis(tick) {
            ticks.push(time);
        }
        match tick.checked_add(step_ms) {
            Some(next) => tick = next,
            None => break,
        }
    }
    ticks
}

fn midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc())
}

fn daily_ticks(
    start: DateTime<Utc>,
    stop: DateTime<Utc>,
    keep: impl Fn(NaiveDate) -> bool,
) -> Vec<DateTime<Utc>> {
    let mut ticks = Vec::new();
    let mut date = start.date_naive();
    while ticks.len() < MAX_TICKS {
        let Some(time) = midnight(date) else {
            break;
        };
        if time > stop {
            break;
        }
        if time >= start && keep(date) {
            ticks.push(time);
        }
        let Some(next) = date.succ_opt() else {
            break;
        };
        date = next;
    }
    ticks
}

fn monthly_ticks(start: DateTime<Utc>, stop: DateTime<Utc>, step: u32) -> Vec<DateTime<Utc>> {
    let mut ticks = Vec::new();
    let mut year = start.year();
    let mut month0 = start.month0();
    while ticks.len() < MAX_TICKS {
        let Some(time) = NaiveDate::from_ymd_opt(year, month0 + 1, 1).and_then(midnight) else {
            break;
        };
        if time > stop {
            break;
        }
        if time >= start && month0 % step == 0 {
            ticks.push(time);
        }
        month0 += 1;
        if month0 == 12 {
            month0 = 0;
            year += 1;
        }
    }
    ticks
}

fn yearly_ticks(start: DateTime<Utc>, stop: DateTime<Utc>, step: u32) -> Vec<DateTime<Utc>> {
    let step = i64::from(step);
    let mut ticks = Vec::new();
    for year in start.year()..=stop.year() {
        if ticks.len() >= MAX_TICKS {
            break;
        }
        if i64::from(year).rem_euclid(step) != 0 {
            continue;
        }
        let Some(time) = NaiveDate::from_ymd_opt(year, 1, 1).and_then(midnight) else {
            continue;
        };
        if time >= start && time <= stop {
            ticks.push(time);
        }
    }
    ticks
}
