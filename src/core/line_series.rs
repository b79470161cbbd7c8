use crate::core::{LinearScale, PlotArea, SeriesSample};
use crate::error::ChartResult;
use serde::{Deserialize, Serialize};

/// Projected line segment in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Projects samples into adjacent line segments.
pub fn project_line_segments(
    samples: &[SeriesSample],
    x_scale: LinearScale,
    y_scale: LinearScale,
    area: PlotArea,
) -> ChartResult<Vec<LineSegment>> {
    if samples.len() < 2 {
        return Ok(Vec::new());
    }

    let mut mapped = Vec::with_capacity(samples.len());
    for sample in samples {
        let x = x_scale.domain_to_pixel(sample.x, area.x_range())?;
        let y = y_scale.domain_to_pixel(sample.y, area.y_range())?;
        mapped.push((x, y));
    }

    let mut segments = Vec::with_capacity(mapped.len() - 1);
    for pair in mapped.windows(2) {
        segments.push(LineSegment {
            x1: pair[0].0,
            y1: pair[0].1,
            x2: pair[1].0,
            y2: pair[1].1,
        });
    }

    Ok(segments)
}
