use std::sync::Arc;
use std::time::Instant;

use crate::{
    foundation::core::VideoInfo, output::slot::OutputSlot, transition::model::BlendSample,
};

/// Edge margin in pixels kept around the program view.
pub const PROGRAM_EDGE_SIZE: f32 = 10.0;

/// Placement of the base canvas inside an available surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Left offset in surface pixels.
    pub x: f32,
    /// Top offset in surface pixels.
    pub y: f32,
    /// Scaled width in surface pixels.
    pub width: f32,
    /// Scaled height in surface pixels.
    pub height: f32,
    /// Uniform scale applied to the base canvas.
    pub scale: f32,
}

/// Scale-to-fit placement of `base` inside `window`, centered with symmetric
/// margins on all sides.
pub fn fit_rect(base_width: u32, base_height: u32, window_width: f32, window_height: f32) -> Viewport {
    let base_w = base_width.max(1) as f32;
    let base_h = base_height.max(1) as f32;
    let window_w = window_width.max(0.0);
    let window_h = window_height.max(0.0);

    let scale = (window_w / base_w).min(window_h / base_h);
    let width = base_w * scale;
    let height = base_h * scale;
    Viewport {
        x: (window_w - width) / 2.0,
        y: (window_h - height) / 2.0,
        width,
        height,
        scale,
    }
}

/// Outbound port onto the rendering backend.
///
/// Invoked from the render callback's thread; implementations issue the
/// actual draw calls and answer the base-resolution query.
pub trait DrawBackend {
    /// Current video base resolution; `None` while no valid video setup
    /// exists yet.
    fn video_info(&self) -> Option<VideoInfo>;

    /// Fill the base canvas area behind the composited output.
    fn draw_backdrop(&mut self, width: f32, height: f32);

    /// Draw the current output blend framed by `viewport`.
    fn draw_blend(&mut self, sample: BlendSample, viewport: Viewport);
}

/// Per-frame render entry point for the program display.
///
/// Registered with an external scheduler and invoked once per display
/// refresh on a thread that is not the control thread; all state it reads
/// tolerates concurrent control-thread writes.
pub struct ProgramView {
    slot: Arc<OutputSlot>,
    edge: f32,
}

impl ProgramView {
    /// Create a view over the program output slot with the default edge
    /// margin.
    pub fn new(slot: Arc<OutputSlot>) -> Self {
        Self {
            slot,
            edge: PROGRAM_EDGE_SIZE,
        }
    }

    /// Override the edge margin.
    pub fn with_edge(slot: Arc<OutputSlot>, edge: f32) -> Self {
        Self { slot, edge }
    }

    /// Placement of the base canvas inside a surface, inset by the edge
    /// margin.
    pub fn layout(&self, info: VideoInfo, surface_width: u32, surface_height: u32) -> Viewport {
        let inner_w = surface_width as f32 - 2.0 * self.edge;
        let inner_h = surface_height as f32 - 2.0 * self.edge;
        let mut viewport = fit_rect(info.base_width, info.base_height, inner_w, inner_h);
        viewport.x += self.edge;
        viewport.y += self.edge;
        viewport
    }

    /// Render one frame: `(surface_width, surface_height)` callback shape.
    ///
    /// Reads the output slot and issues draw calls framed by the current
    /// viewport scale/offset. When the backend reports no video info the
    /// frame is skipped rather than failing; returns whether a frame was
    /// drawn.
    pub fn render<B: DrawBackend + ?Sized>(
        &self,
        backend: &mut B,
        surface_width: u32,
        surface_height: u32,
        now: Instant,
    ) -> bool {
        let Some(info) = backend.video_info() else {
            tracing::warn!("no video info available, frame skipped");
            return false;
        };
        let viewport = self.layout(info, surface_width, surface_height);
        backend.draw_backdrop(info.base_width as f32, info.base_height as f32);
        backend.draw_blend(self.slot.sample(now), viewport);
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/view.rs"]
mod tests;
