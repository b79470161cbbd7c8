use tracing::trace;

use crate::core::primitives::datetime_to_unix_seconds;
use crate::core::ticks::format_time_tick;
use crate::core::{
    LinearScale, PlotArea, TimeScale, format_tick_number, linear_ticks, project_area_geometry,
    project_line_segments,
};
use crate::error::{ChartError, ChartResult};
use crate::plot::{AxisScaleKind, LabelAnchor, MarkKind, PlotSpec};
use crate::render::{
    LinePrimitive, PolygonPrimitive, RectPrimitive, RenderFrame, TextHAlign,
    TextOrientation, TextPrimitive,
};

pub const FONT_SIZE_PX: f64 = 10.0;
pub const TICK_SIZE_PX: f64 = 6.0;
pub const TICK_PADDING_PX: f64 = 3.0;
pub const GRID_OPACITY: f64 = 0.1;

const X_PIXELS_PER_TICK: f64 = 80.0;
const Y_PIXELS_PER_TICK: f64 = 35.0;
const AXIS_STROKE_WIDTH: f64 = 1.0;

/// Compiles a plot spec into a backend-agnostic frame.
///
/// Paint order within the frame: background, grid, marks, ticks and labels.
pub fn render_plot(spec: &PlotSpec) -> ChartResult<RenderFrame> {
    spec.validate()?;

    let viewport = spec.viewport();
    let area = PlotArea::from_margins(
        viewport,
        spec.margin_top,
        spec.margin_right,
        spec.margin_bottom,
        spec.margin_left,
    )?;
    let x_scale = resolve_x_scale(spec)?;
    let y_scale = resolve_y_scale(spec)?;
    let foreground = spec.style.color;

    let mut frame = RenderFrame::new(viewport).with_rect(RectPrimitive::new(
        0.0,
        0.0,
        f64::from(viewport.width),
        f64::from(viewport.height),
        spec.style.background,
    ));

    let y_tick_count = spec
        .y
        .ticks
        .unwrap_or_else(|| density_tick_count(area.height(), Y_PIXELS_PER_TICK));
    let y_ticks: Vec<(f64, f64)> = linear_ticks(y_scale.domain().0, y_scale.domain().1, y_tick_count)
        .into_iter()
        .map(|value| -> ChartResult<(f64, f64)> {
            Ok((value, y_scale.domain_to_pixel(value, area.y_range())?))
        })
        .collect::<ChartResult<_>>()?;

    if spec.y.grid {
        let grid_color = foreground.with_opacity(GRID_OPACITY);
        for (_, y) in &y_ticks {
            frame.lines.push(LinePrimitive::new(
                area.left,
                *y,
                area.right,
                *y,
                AXIS_STROKE_WIDTH,
                grid_color,
            ));
        }
    }

    push_marks(&mut frame, spec, x_scale, y_scale, area)?;
    push_x_axis(&mut frame, spec, x_scale, area)?;
    push_y_axis(&mut frame, spec, &y_ticks, area);

    frame.validate()?;
    trace!(
        width = viewport.width,
        height = viewport.height,
        polygons = frame.polygons.len(),
        lines = frame.lines.len(),
        texts = frame.texts.len(),
        "rendered plot frame"
    );
    Ok(frame)
}

fn density_tick_count(span_px: f64, pixels_per_tick: f64) -> usize {
    ((span_px / pixels_per_tick).round() as usize).max(2)
}

fn resolve_x_scale(spec: &PlotSpec) -> ChartResult<LinearScale> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for mark in &spec.marks {
        for point in &mark.data {
            if let Some(x) = mark.x.numeric(point) {
                min = min.min(x);
                max = max.max(x);
            }
        }
    }

    if !min.is_finite() || !max.is_finite() {
        return Err(ChartError::InvalidData(
            "x domain cannot be derived from empty marks".to_owned(),
        ));
    }

    match spec.x.scale {
        AxisScaleKind::Time => TimeScale::new(min, max)?.linear(),
        AxisScaleKind::Linear if min == max => LinearScale::new(min - 0.5, max + 0.5),
        AxisScaleKind::Linear => LinearScale::new(min, max),
    }
}

fn resolve_y_scale(spec: &PlotSpec) -> ChartResult<LinearScale> {
    if let Some((min, max)) = spec.y.domain {
        return LinearScale::new(min, max);
    }

    let mut min = 0.0_f64;
    let mut max = f64::NEG_INFINITY;
    for mark in &spec.marks {
        for point in &mark.data {
            if let Some(y) = mark.y.numeric(point) {
                min = min.min(y);
                max = max.max(y);
            }
        }
    }

    if !max.is_finite() || max <= min {
        max = min + 1.0;
    }
    LinearScale::new(min, max)
}

fn push_marks(
    frame: &mut RenderFrame,
    spec: &PlotSpec,
    x_scale: LinearScale,
    y_scale: LinearScale,
    area: PlotArea,
) -> ChartResult<()> {
    let foreground = spec.style.color;

    for mark in &spec.marks {
        for samples in mark.series().values() {
            match mark.kind {
                MarkKind::Area => {
                    let geometry = project_area_geometry(samples, x_scale, y_scale, 0.0, area)?;
                    if geometry.fill_polygon.len() >= 3 {
                        let fill = mark.fill.unwrap_or(foreground).with_opacity(mark.opacity);
                        frame.polygons.push(PolygonPrimitive::new(
                            geometry
                                .fill_polygon
                                .iter()
                                .map(|vertex| (vertex.x, vertex.y))
                                .collect(),
                            fill,
                        ));
                    }
                    if let Some(stroke) = mark.stroke {
                        let color = stroke.with_opacity(mark.opacity);
                        for pair in geometry.line_points.windows(2) {
                            frame.lines.push(LinePrimitive::new(
                                pair[0].x,
                                pair[0].y,
                                pair[1].x,
                                pair[1].y,
                                mark.stroke_width,
                                color,
                            ));
                        }
                    }
                }
                MarkKind::Line => {
                    let color = mark.stroke.unwrap_or(foreground).with_opacity(mark.opacity);
                    for segment in project_line_segments(samples, x_scale, y_scale, area)? {
                        frame.lines.push(LinePrimitive::new(
                            segment.x1,
                            segment.y1,
                            segment.x2,
                            segment.y2,
                            mark.stroke_width,
                            color,
                        ));
                    }
                }
            }
        }
    }
    Ok(())
}

fn push_x_axis(
    frame: &mut RenderFrame,
    spec: &PlotSpec,
    x_scale: LinearScale,
    area: PlotArea,
) -> ChartResult<()> {
    let foreground = spec.style.color;
    let count = spec
        .x
        .ticks
        .unwrap_or_else(|| density_tick_count(area.width(), X_PIXELS_PER_TICK));

    let ticks: Vec<(f64, String)> = match spec.x.scale {
        AxisScaleKind::Time => {
            let (start, end) = x_scale.domain();
            let (interval, times) = TimeScale::new(start, end)?.ticks(count)?;
            let pattern = spec
                .x
                .tick_format
                .as_deref()
                .unwrap_or_else(|| interval.default_format());
            times
                .into_iter()
                .map(|time| -> ChartResult<(f64, String)> {
                    Ok((datetime_to_unix_seconds(time), format_time_tick(time, pattern)?))
                })
                .collect::<ChartResult<_>>()?
        }
        AxisScaleKind::Linear => {
            let (start, end) = x_scale.domain();
            linear_ticks(start, end, count)
                .into_iter()
                .map(|value| (value, format_tick_number(value)))
                .collect()
        }
    };

    let label_top = area.bottom + TICK_SIZE_PX + TICK_PADDING_PX;
    for (value, label) in ticks {
        if !x_scale.contains(value) {
            continue;
        }
        let x = x_scale.domain_to_pixel(value, area.x_range())?;
        frame.lines.push(LinePrimitive::new(
            x,
            area.bottom,
            x,
            area.bottom + TICK_SIZE_PX,
            AXIS_STROKE_WIDTH,
            foreground,
        ));
        if !label.is_empty() {
            frame.texts.push(TextPrimitive::new(
                label,
                x,
                label_top,
                FONT_SIZE_PX,
                foreground,
                TextHAlign::Center,
            ));
        }
    }

    if let Some(label) = spec.x.label.as_deref().filter(|label| !label.is_empty()) {
        let (x, h_align) = match spec.x.label_anchor {
            LabelAnchor::Start => (area.left, TextHAlign::Left),
            LabelAnchor::Center => ((area.left + area.right) / 2.0, TextHAlign::Center),
            LabelAnchor::End => (area.right, TextHAlign::Right),
        };
        frame.texts.push(TextPrimitive::new(
            label,
            x,
            area.bottom + spec.x.label_offset,
            FONT_SIZE_PX,
            foreground,
            h_align,
        ));
    }
    Ok(())
}

fn push_y_axis(frame: &mut RenderFrame, spec: &PlotSpec, ticks: &[(f64, f64)], area: PlotArea) {
    let foreground = spec.style.color;
    let label_right = area.left - TICK_SIZE_PX - TICK_PADDING_PX;

    for (value, y) in ticks {
        frame.lines.push(LinePrimitive::new(
            area.left - TICK_SIZE_PX,
            *y,
            area.left,
            *y,
            AXIS_STROKE_WIDTH,
            foreground,
        ));
        frame.texts.push(TextPrimitive::new(
            format_tick_number(*value),
            label_right,
            *y - FONT_SIZE_PX / 2.0,
            FONT_SIZE_PX,
            foreground,
            TextHAlign::Right,
        ));
    }

    if let Some(label) = spec.y.label.as_deref().filter(|label| !label.is_empty()) {
        // Rotated text runs bottom-to-top, so "left" alignment starts at the bottom.
        let (y, h_align) = match spec.y.label_anchor {
            LabelAnchor::Start => (area.bottom, TextHAlign::Left),
            LabelAnchor::Center => ((area.top + area.bottom) / 2.0, TextHAlign::Center),
            LabelAnchor::End => (area.top, TextHAlign::Right),
        };
        frame.texts.push(
            TextPrimitive::new(
                label,
                area.left - spec.y.label_offset,
                y,
                FONT_SIZE_PX,
                foreground,
                h_align,
            )
            .with_orientation(TextOrientation::VerticalUp),
        );
    }
}
