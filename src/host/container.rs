use crate::error::{ChartError, ChartResult};
use crate::host::{Visual, VisualId};
use crate::render::{NullRenderer, Renderer};

/// Region a chart visual is attached to.
///
/// A container holds whatever visuals the host attached and reports its
/// current width; the host guarantees at most one is attached at a time.
pub trait ChartContainer {
    fn width(&self) -> u32;

    fn attach(&mut self, visual: &Visual) -> ChartResult<()>;

    /// Removing a visual that is not attached is a no-op.
    fn detach(&mut self, visual: &Visual);
}

/// Record of a visual currently held by a [`HeadlessContainer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachedVisual {
    pub id: VisualId,
    pub width: u32,
    pub height: u32,
}

/// In-memory container that draws every attached visual through `R`.
#[derive(Debug)]
pub struct HeadlessContainer<R: Renderer = NullRenderer> {
    width: u32,
    renderer: R,
    attached: Vec<AttachedVisual>,
    attach_count: usize,
    detach_count: usize,
}

impl HeadlessContainer<NullRenderer> {
    #[must_use]
    pub fn new(width: u32) -> Self {
        Self::with_renderer(width, NullRenderer::default())
    }
}

impl<R: Renderer> HeadlessContainer<R> {
    #[must_use]
    pub fn with_renderer(width: u32, renderer: R) -> Self {
        Self {
            width,
            renderer,
            attached: Vec::new(),
            attach_count: 0,
            detach_count: 0,
        }
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    #[must_use]
    pub fn attached(&self) -> &[AttachedVisual] {
        &self.attached
    }

    #[must_use]
    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    /// Total successful attachments over the container's lifetime.
    #[must_use]
    pub fn attach_count(&self) -> usize {
        self.attach_count
    }

    #[must_use]
    pub fn detach_count(&self) -> usize {
        self.detach_count
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

impl<R: Renderer> ChartContainer for HeadlessContainer<R> {
    fn width(&self) -> u32 {
        self.width
    }

    fn attach(&mut self, visual: &Visual) -> ChartResult<()> {
        if self.attached.iter().any(|entry| entry.id == visual.id()) {
            return Err(ChartError::InvalidData(format!(
                "visual {} is already attached",
                visual.id().raw()
            )));
        }
        self.renderer.render(visual.frame())?;
        self.attached.push(AttachedVisual {
            id: visual.id(),
            width: visual.width(),
            height: visual.height(),
        });
        self.attach_count += 1;
        Ok(())
    }

    fn detach(&mut self, visual: &Visual) {
        let before = self.attached.len();
        self.attached.retain(|entry| entry.id != visual.id());
        self.detach_count += before - self.attached.len();
    }
}
