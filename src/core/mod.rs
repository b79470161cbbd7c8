pub mod area_series;
pub mod line_series;
pub mod primitives;
pub mod scale;
pub mod ticks;
pub mod time_scale;
pub mod types;

pub use area_series::{AreaGeometry, AreaVertex, project_area_geometry};
pub use line_series::{LineSegment, project_line_segments};
pub use scale::{LinearScale, PixelRange};
pub use ticks::{TimeInterval, format_tick_number, linear_ticks, tick_increment};
pub use time_scale::TimeScale;
pub use types::{DataPoint, PlotArea, SeriesSample, Viewport};
