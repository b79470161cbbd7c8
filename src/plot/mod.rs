//! Declarative plot descriptions and their compilation into render frames.

mod frame_builder;
mod json_contract;
mod mark;
mod spec;

pub use frame_builder::{FONT_SIZE_PX, GRID_OPACITY, TICK_PADDING_PX, TICK_SIZE_PX, render_plot};
pub use json_contract::{PLOT_SPEC_JSON_SCHEMA_V1, PlotSpecJsonContractV1};
pub use mark::{Field, Mark, MarkKind};
pub use spec::{
    AxisScaleKind, DEFAULT_MARGIN_BOTTOM, DEFAULT_MARGIN_LEFT, DEFAULT_MARGIN_RIGHT,
    DEFAULT_MARGIN_TOP, DEFAULT_PLOT_HEIGHT, DEFAULT_PLOT_WIDTH, LabelAnchor, PlotSpec, PlotStyle,
    XAxisSpec, YAxisSpec,
};
