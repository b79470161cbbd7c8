use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::datetime_to_unix_seconds;
use crate::core::scale::PixelRange;
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// One `(timestamp, value[, category])` sample.
///
/// Insertion order is chronological order; callers guarantee it and nothing
/// here validates it. Timestamps need not be unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl DataPoint {
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self {
            timestamp,
            value,
            category: None,
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn unix_seconds(&self) -> f64 {
        datetime_to_unix_seconds(self.timestamp)
    }

    #[must_use]
    pub fn is_category(&self, category: &str) -> bool {
        self.category.as_deref() == Some(category)
    }
}

/// Field-resolved sample in domain space, ready for projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesSample {
    pub x: f64,
    pub y: f64,
}

impl SeriesSample {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Inner plotting rectangle in pixel space (viewport minus margins).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotArea {
    pub fn from_margins(
        viewport: Viewport,
        margin_top: f64,
        margin_right: f64,
        margin_bottom: f64,
        margin_left: f64,
    ) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let area = Self {
            left: margin_left,
            top: margin_top,
            right: f64::from(viewport.width) - margin_right,
            bottom: f64::from(viewport.height) - margin_bottom,
        };
        let finite = [area.left, area.top, area.right, area.bottom]
            .iter()
            .all(|edge| edge.is_finite());
        if !finite || area.right <= area.left || area.bottom <= area.top {
            return Err(ChartError::InvalidSpec(format!(
                "margins leave no plot area inside {}x{} viewport",
                viewport.width, viewport.height
            )));
        }
        Ok(area)
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }

    /// Horizontal pixel range, left to right.
    #[must_use]
    pub fn x_range(self) -> PixelRange {
        PixelRange::new(self.left, self.right)
    }

    /// Vertical pixel range, bottom to top so larger values sit higher.
    #[must_use]
    pub fn y_range(self) -> PixelRange {
        PixelRange::new(self.bottom, self.top)
    }
}
