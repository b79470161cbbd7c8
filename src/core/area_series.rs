use crate::core::{LinearScale, PlotArea, SeriesSample};
use crate::error::ChartResult;
use serde::{Deserialize, Serialize};

/// Vertex in pixel coordinates used by deterministic area geometry output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaVertex {
    pub x: f64,
    pub y: f64,
}

/// Deterministic geometry for one area group.
///
/// `line_points` follows the mapped samples.
/// `fill_polygon` is an explicitly closed polygon against the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaGeometry {
    pub line_points: Vec<AreaVertex>,
    pub fill_polygon: Vec<AreaVertex>,
}

impl AreaGeometry {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            line_points: Vec::new(),
            fill_polygon: Vec::new(),
        }
    }
}

/// Projects samples into area geometry filled down to `baseline_value`.
///
/// The baseline is clamped into the y domain, so a `[0, 100]` axis fills to
/// the bottom edge of the plot area.
pub fn project_area_geometry(
    samples: &[SeriesSample],
    x_scale: LinearScale,
    y_scale: LinearScale,
    baseline_value: f64,
    area: PlotArea,
) -> ChartResult<AreaGeometry> {
    if samples.is_empty() {
        return Ok(AreaGeometry::empty());
    }

    let mut line_points = Vec::with_capacity(samples.len());
    for sample in samples {
        let x = x_scale.domain_to_pixel(sample.x, area.x_range())?;
        let y = y_scale.domain_to_pixel(sample.y, area.y_range())?;
        line_points.push(AreaVertex { x, y });
    }

    let baseline_y = y_scale.domain_to_pixel(y_scale.clamp(baseline_value), area.y_range())?;
    let first_x = line_points[0].x;
    let last_x = line_points[line_points.len() - 1].x;

    let mut fill_polygon = Vec::with_capacity(line_points.len() + 3);
    fill_polygon.push(AreaVertex {
        x: first_x,
        y: baseline_y,
    });
    fill_polygon.extend(line_points.iter().copied());
    fill_polygon.push(AreaVertex {
        x: last_x,
        y: baseline_y,
    });
    // Repeat the first baseline vertex so consumers need no implicit closure.
    fill_polygon.push(AreaVertex {
        x: first_x,
        y: baseline_y,
    });

    Ok(AreaGeometry {
        line_points,
        fill_polygon,
    })
}
