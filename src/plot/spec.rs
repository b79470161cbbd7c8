use serde::{Deserialize, Serialize};

use crate::core::ticks::validate_time_format;
use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::plot::Mark;
use crate::render::Color;

pub const DEFAULT_PLOT_WIDTH: u32 = 640;
pub const DEFAULT_PLOT_HEIGHT: u32 = 400;
pub const DEFAULT_MARGIN_TOP: f64 = 20.0;
pub const DEFAULT_MARGIN_RIGHT: f64 = 20.0;
pub const DEFAULT_MARGIN_BOTTOM: f64 = 30.0;
pub const DEFAULT_MARGIN_LEFT: f64 = 40.0;

/// Background and foreground (text, ticks, grid) colors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotStyle {
    pub background: Color,
    pub color: Color,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            background: Color::white(),
            color: Color::black(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisScaleKind {
    Time,
    Linear,
}

/// Where an axis label sits along its axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelAnchor {
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XAxisSpec {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default = "default_x_scale")]
    pub scale: AxisScaleKind,
    /// Approximate tick count. `None` derives one tick per 80px.
    #[serde(default)]
    pub ticks: Option<usize>,
    /// strftime pattern for time-axis tick labels.
    #[serde(default)]
    pub tick_format: Option<String>,
    #[serde(default = "default_label_anchor")]
    pub label_anchor: LabelAnchor,
    #[serde(default = "default_x_label_offset")]
    pub label_offset: f64,
}

impl Default for XAxisSpec {
    fn default() -> Self {
        Self {
            label: None,
            scale: default_x_scale(),
            ticks: None,
            tick_format: None,
            label_anchor: default_label_anchor(),
            label_offset: default_x_label_offset(),
        }
    }
}

impl XAxisSpec {
    #[must_use]
    pub fn time() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn linear() -> Self {
        Self {
            scale: AxisScaleKind::Linear,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_ticks(mut self, ticks: usize) -> Self {
        self.ticks = Some(ticks);
        self
    }

    #[must_use]
    pub fn with_tick_format(mut self, pattern: impl Into<String>) -> Self {
        self.tick_format = Some(pattern.into());
        self
    }

    #[must_use]
    pub fn with_label_anchor(mut self, anchor: LabelAnchor) -> Self {
        self.label_anchor = anchor;
        self
    }

    #[must_use]
    pub fn with_label_offset(mut self, offset: f64) -> Self {
        self.label_offset = offset;
        self
    }

    fn validate(&self) -> ChartResult<()> {
        if !self.label_offset.is_finite() {
            return Err(ChartError::InvalidSpec(
                "x label offset must be finite".to_owned(),
            ));
        }
        if let Some(pattern) = &self.tick_format {
            validate_time_format(pattern)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YAxisSpec {
    #[serde(default)]
    pub label: Option<String>,
    /// Fixed `[min, max]`. `None` spans zero through the data maximum.
    #[serde(default)]
    pub domain: Option<(f64, f64)>,
    /// Approximate tick count. `None` derives one tick per 35px.
    #[serde(default)]
    pub ticks: Option<usize>,
    #[serde(default)]
    pub grid: bool,
    #[serde(default = "default_label_anchor")]
    pub label_anchor: LabelAnchor,
    #[serde(default = "default_y_label_offset")]
    pub label_offset: f64,
}

impl Default for YAxisSpec {
    fn default() -> Self {
        Self {
            label: None,
            domain: None,
            ticks: None,
            grid: false,
            label_anchor: default_label_anchor(),
            label_offset: default_y_label_offset(),
        }
    }
}

impl YAxisSpec {
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_domain(mut self, min: f64, max: f64) -> Self {
        self.domain = Some((min, max));
        self
    }

    #[must_use]
    pub fn with_ticks(mut self, ticks: usize) -> Self {
        self.ticks = Some(ticks);
        self
    }

    #[must_use]
    pub fn with_grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    #[must_use]
    pub fn with_label_anchor(mut self, anchor: LabelAnchor) -> Self {
        self.label_anchor = anchor;
        self
    }

    #[must_use]
    pub fn with_label_offset(mut self, offset: f64) -> Self {
        self.label_offset = offset;
        self
    }

    fn validate(&self) -> ChartResult<()> {
        if !self.label_offset.is_finite() {
            return Err(ChartError::InvalidSpec(
                "y label offset must be finite".to_owned(),
            ));
        }
        if let Some((min, max)) = self.domain {
            if !min.is_finite() || !max.is_finite() || min == max {
                return Err(ChartError::InvalidSpec(
                    "y domain must be finite and non-empty".to_owned(),
                ));
            }
        }
        Ok(())
    }
}

/// Declarative description of one chart: size, style, marks and axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSpec {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_margin_top")]
    pub margin_top: f64,
    #[serde(default = "default_margin_right")]
    pub margin_right: f64,
    #[serde(default = "default_margin_bottom")]
    pub margin_bottom: f64,
    #[serde(default = "default_margin_left")]
    pub margin_left: f64,
    #[serde(default)]
    pub style: PlotStyle,
    #[serde(default)]
    pub marks: Vec<Mark>,
    #[serde(default)]
    pub x: XAxisSpec,
    #[serde(default)]
    pub y: YAxisSpec,
}

impl Default for PlotSpec {
    fn default() -> Self {
        Self::new(DEFAULT_PLOT_WIDTH, DEFAULT_PLOT_HEIGHT)
    }
}

impl PlotSpec {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            margin_top: DEFAULT_MARGIN_TOP,
            margin_right: DEFAULT_MARGIN_RIGHT,
            margin_bottom: DEFAULT_MARGIN_BOTTOM,
            margin_left: DEFAULT_MARGIN_LEFT,
            style: PlotStyle::default(),
            marks: Vec::new(),
            x: XAxisSpec::default(),
            y: YAxisSpec::default(),
        }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    #[must_use]
    pub fn with_margin_left(mut self, margin_left: f64) -> Self {
        self.margin_left = margin_left;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, top: f64, right: f64, bottom: f64, left: f64) -> Self {
        self.margin_top = top;
        self.margin_right = right;
        self.margin_bottom = bottom;
        self.margin_left = left;
        self
    }

    #[must_use]
    pub fn with_style(mut self, background: Color, color: Color) -> Self {
        self.style = PlotStyle { background, color };
        self
    }

    #[must_use]
    pub fn with_mark(mut self, mark: Mark) -> Self {
        self.marks.push(mark);
        self
    }

    #[must_use]
    pub fn with_x_axis(mut self, x: XAxisSpec) -> Self {
        self.x = x;
        self
    }

    #[must_use]
    pub fn with_y_axis(mut self, y: YAxisSpec) -> Self {
        self.y = y;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        let viewport = self.viewport();
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }

        for (side, margin) in [
            ("top", self.margin_top),
            ("right", self.margin_right),
            ("bottom", self.margin_bottom),
            ("left", self.margin_left),
        ] {
            if !margin.is_finite() || margin < 0.0 {
                return Err(ChartError::InvalidSpec(format!(
                    "margin `{side}` must be finite and >= 0"
                )));
            }
        }

        self.style.background.validate()?;
        self.style.color.validate()?;
        self.x.validate()?;
        self.y.validate()?;
        for mark in &self.marks {
            mark.validate()?;
        }
        Ok(())
    }
}

fn default_margin_top() -> f64 {
    DEFAULT_MARGIN_TOP
}

fn default_margin_right() -> f64 {
    DEFAULT_MARGIN_RIGHT
}

fn default_margin_bottom() -> f64 {
    DEFAULT_MARGIN_BOTTOM
}

fn default_margin_left() -> f64 {
    DEFAULT_MARGIN_LEFT
}

fn default_x_scale() -> AxisScaleKind {
    AxisScaleKind::Time
}

fn default_label_anchor() -> LabelAnchor {
    LabelAnchor::Center
}

fn default_x_label_offset() -> f64 {
    20.0
}

fn default_y_label_offset() -> f64 {
    32.0
}
