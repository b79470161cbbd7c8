//! Container lifecycle: mounting a chart, following width changes and
//! tearing down.

mod container;
mod observer;
mod responsive;
mod visual;

pub use container::{AttachedVisual, ChartContainer, HeadlessContainer};
pub use observer::{ResizeObserver, Subscription};
pub use responsive::ResponsiveChartHost;
pub use visual::{Visual, VisualId};
