use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{DataPoint, SeriesSample};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkKind {
    Area,
    Line,
}

/// Data-point channel a mark reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Timestamp,
    Value,
    Category,
}

impl Field {
    /// Numeric position of `point` on this channel. Timestamps map to unix
    /// seconds; categories have no numeric position.
    #[must_use]
    pub fn numeric(self, point: &DataPoint) -> Option<f64> {
        match self {
            Self::Timestamp => Some(point.unix_seconds()),
            Self::Value => point.value.is_finite().then_some(point.value),
            Self::Category => None,
        }
    }

    #[must_use]
    pub fn group_key(self, point: &DataPoint) -> String {
        match self {
            Self::Timestamp => point.timestamp.to_rfc3339(),
            Self::Value => point.value.to_string(),
            Self::Category => point.category.clone().unwrap_or_default(),
        }
    }
}

/// One layer of a plot: an area or a line over its own data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    pub kind: MarkKind,
    pub data: Vec<DataPoint>,
    #[serde(default = "default_x_field")]
    pub x: Field,
    #[serde(default = "default_y_field")]
    pub y: Field,
    #[serde(default)]
    pub z: Option<Field>,
    #[serde(default)]
    pub fill: Option<Color>,
    #[serde(default)]
    pub stroke: Option<Color>,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
}

impl Mark {
    #[must_use]
    pub fn new(kind: MarkKind, data: Vec<DataPoint>) -> Self {
        Self {
            kind,
            data,
            x: default_x_field(),
            y: default_y_field(),
            z: None,
            fill: None,
            stroke: None,
            opacity: default_opacity(),
            stroke_width: default_stroke_width(),
        }
    }

    #[must_use]
    pub fn area(data: Vec<DataPoint>) -> Self {
        Self::new(MarkKind::Area, data)
    }

    #[must_use]
    pub fn line(data: Vec<DataPoint>) -> Self {
        Self::new(MarkKind::Line, data)
    }

    #[must_use]
    pub fn with_fields(mut self, x: Field, y: Field) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Splits the data into one series per distinct `z` value.
    #[must_use]
    pub fn with_group(mut self, z: Field) -> Self {
        self.z = Some(z);
        self
    }

    #[must_use]
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: Color) -> Self {
        self.stroke = Some(stroke);
        self
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    #[must_use]
    pub fn with_stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.y == Field::Category || self.x == Field::Category {
            return Err(ChartError::InvalidSpec(
                "category field has no numeric position".to_owned(),
            ));
        }
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(ChartError::InvalidSpec(
                "mark opacity must be finite and in [0, 1]".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidSpec(
                "mark stroke width must be finite and > 0".to_owned(),
            ));
        }
        if let Some(fill) = self.fill {
            fill.validate()?;
        }
        if let Some(stroke) = self.stroke {
            stroke.validate()?;
        }
        Ok(())
    }

    /// Resolved samples per series, keyed by group value in first-seen order.
    ///
    /// Points whose x or y channel has no numeric position are skipped.
    #[must_use]
    pub fn series(&self) -> IndexMap<String, Vec<SeriesSample>> {
        let mut groups: IndexMap<String, Vec<SeriesSample>> = IndexMap::new();
        for point in &self.data {
            let (Some(x), Some(y)) = (self.x.numeric(point), self.y.numeric(point)) else {
                continue;
            };
            let key = self.z.map(|z| z.group_key(point)).unwrap_or_default();
            groups.entry(key).or_default().push(SeriesSample::new(x, y));
        }
        groups
    }
}

fn default_x_field() -> Field {
    Field::Timestamp
}

fn default_y_field() -> Field {
    Field::Value
}

fn default_opacity() -> f64 {
    1.0
}

fn default_stroke_width() -> f64 {
    1.5
}
