use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::render::RenderFrame;

/// Host-local identifier of one rendered visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VisualId(u64);

impl VisualId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// One rendered chart. Replaced on resize, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Visual {
    id: VisualId,
    frame: RenderFrame,
}

impl Visual {
    #[must_use]
    pub fn new(id: VisualId, frame: RenderFrame) -> Self {
        Self { id, frame }
    }

    #[must_use]
    pub fn id(&self) -> VisualId {
        self.id
    }

    #[must_use]
    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.frame.viewport
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.frame.viewport.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.frame.viewport.height
    }
}
