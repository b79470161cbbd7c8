use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
///
/// Deserializes from a CSS color string (`"cornflowerblue"`, `"#6495ed"`) or
/// a `{red, green, blue, alpha}` object; serializes as the object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr")]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

const CSS_NAMED_COLORS: [(&str, (u8, u8, u8)); 14] = [
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
    ("lightgray", (211, 211, 211)),
    ("red", (255, 0, 0)),
    ("green", (0, 128, 0)),
    ("blue", (0, 0, 255)),
    ("orange", (255, 165, 0)),
    ("cornflowerblue", (100, 149, 237)),
    ("lightgreen", (144, 238, 144)),
    ("steelblue", (70, 130, 180)),
    ("tomato", (255, 99, 71)),
    ("seagreen", (46, 139, 87)),
];

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub const fn rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(red as f64 / 255.0, green as f64 / 255.0, blue as f64 / 255.0)
    }

    #[must_use]
    pub const fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }

    #[must_use]
    pub const fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// Parses a CSS named color (`cornflowerblue`) or `#rrggbb` hex string.
    pub fn parse_css(input: &str) -> ChartResult<Self> {
        let trimmed = input.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| {
                ChartError::InvalidData(format!("invalid hex color `{trimmed}`"))
            });
        }

        let lowered = trimmed.to_ascii_lowercase();
        CSS_NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lowered)
            .map(|(_, (red, green, blue))| Self::rgb8(*red, *green, *blue))
            .ok_or_else(|| ChartError::InvalidData(format!("unknown color name `{trimmed}`")))
    }

    /// Multiplies alpha by `opacity`.
    #[must_use]
    pub fn with_opacity(self, opacity: f64) -> Self {
        Self {
            alpha: self.alpha * opacity,
            ..self
        }
    }

    /// `#rrggbb` form, alpha excluded.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            channel_to_u8(self.red),
            channel_to_u8(self.green),
            channel_to_u8(self.blue)
        )
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Css(String),
    Channels(ColorChannels),
}

#[derive(Deserialize)]
struct ColorChannels {
    red: f64,
    green: f64,
    blue: f64,
    #[serde(default = "opaque_alpha")]
    alpha: f64,
}

fn opaque_alpha() -> f64 {
    1.0
}

impl TryFrom<ColorRepr> for Color {
    type Error = ChartError;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Css(text) => Self::parse_css(&text),
            ColorRepr::Channels(channels) => Ok(Self::rgba(
                channels.red,
                channels.green,
                channels.blue,
                channels.alpha,
            )),
        }
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let red = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let green = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let blue = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::rgb8(red, green, blue))
}

fn channel_to_u8(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(ChartError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Filled axis-aligned rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Color,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill_color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "rect origin must be finite".to_owned(),
            ));
        }
        if !self.width.is_finite() || !self.height.is_finite() || self.width < 0.0 || self.height < 0.0
        {
            return Err(ChartError::InvalidData(
                "rect size must be finite and >= 0".to_owned(),
            ));
        }
        self.fill_color.validate()
    }
}

/// Closed filled polygon in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonPrimitive {
    pub points: Vec<(f64, f64)>,
    pub fill_color: Color,
}

impl PolygonPrimitive {
    #[must_use]
    pub fn new(points: Vec<(f64, f64)>, fill_color: Color) -> Self {
        Self { points, fill_color }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.points.len() < 3 {
            return Err(ChartError::InvalidData(
                "polygon needs at least 3 vertices".to_owned(),
            ));
        }
        if self
            .points
            .iter()
            .any(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(ChartError::InvalidData(
                "polygon vertices must be finite".to_owned(),
            ));
        }
        self.fill_color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// `VerticalUp` rotates the label a quarter turn counter-clockwise around
/// its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOrientation {
    Horizontal,
    VerticalUp,
}

/// Draw command for one label in pixel space. `y` is the top of the text box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
    pub orientation: TextOrientation,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
            orientation: TextOrientation::Horizontal,
        }
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: TextOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn parses_named_and_hex_colors() {
        let named = Color::parse_css("CornflowerBlue").expect("named color");
        assert_eq!(named.to_hex(), "#6495ed");

        let hex = Color::parse_css("#90ee90").expect("hex color");
        assert_eq!(hex, Color::parse_css("lightgreen").expect("named color"));

        assert!(Color::parse_css("not-a-color").is_err());
        assert!(Color::parse_css("#12345").is_err());
    }

    #[test]
    fn deserializes_css_strings_and_channel_objects() {
        let named: Color = serde_json::from_str("\"steelblue\"").expect("named color");
        assert_eq!(named, Color::rgb8(70, 130, 180));

        let channels: Color =
            serde_json::from_str(r#"{"red": 0.5, "green": 0.25, "blue": 1.0}"#).expect("channels");
        assert_eq!(channels, Color::rgba(0.5, 0.25, 1.0, 1.0));

        let encoded = serde_json::to_string(&named).expect("serialize");
        let decoded: Color = serde_json::from_str(&encoded).expect("round trip");
        assert_eq!(decoded, named);

        assert!(serde_json::from_str::<Color>("\"chartreuse-ish\"").is_err());
    }

    #[test]
    fn opacity_scales_alpha() {
        let color = Color::white().with_opacity(0.7);
        assert!((color.alpha - 0.7).abs() <= 1e-12);
        color.validate().expect("valid");
    }
}
