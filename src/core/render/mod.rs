//=========================================================================
// Render Surface Contract
//=========================================================================
//
// The scene graph decides what is drawn and where; an external 2D
// immediate-mode surface does the drawing.
//
// Architecture:
//   Stage::tick() ──> RenderContext { surface, tick, cycle_length }
//                          │
//                          └──> Scene::render(root, ctx) ──> surface calls
//
// The context is threaded through the render call explicitly, so any
// number of independent scenes can render to any number of surfaces.
//
//=========================================================================

//=== Module Declarations =================================================

mod recording;

//=== Public API ==========================================================

pub use recording::{DrawCommand, RecordingSurface};

use crate::core::asset::ImageHandle;
use crate::core::geometry::Rect;

//=== RenderSurface =======================================================

/// Immediate-mode 2D drawing surface provided by the host.
pub trait RenderSurface {
    /// Clears `(0, 0, width, height)`.
    fn clear_region(&mut self, width: f64, height: f64);

    /// Blits `clip` of `image` (or the whole image) scaled into `dest`.
    fn draw_image(&mut self, image: &ImageHandle, clip: Option<Rect>, dest: Rect);

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: &str);

    fn stroke_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: &str);

    /// Pushes the current global alpha.
    fn save(&mut self);

    /// Pops the global alpha pushed by the matching `save`.
    fn restore(&mut self);

    fn set_global_alpha(&mut self, alpha: f64);

    /// Width in pixels of `text` rendered with `font`.
    fn measure_text(&mut self, text: &str, font: &str) -> f64;
}

//=== RenderContext =======================================================

/// Per-pass render state handed down the tree.
pub struct RenderContext<'a> {
    pub surface: &'a mut dyn RenderSurface,
    /// Current value of the stage frame counter, in `[0, cycle_length)`.
    pub tick: u32,
    /// Ticks per full animation cycle.
    pub cycle_length: u32,
}

impl<'a> RenderContext<'a> {
    pub fn new(surface: &'a mut dyn RenderSurface, tick: u32, cycle_length: u32) -> Self {
        Self {
            surface,
            tick,
            cycle_length,
        }
    }
}
