//=========================================================================
// Recording Surface
//=========================================================================
//
// Headless `RenderSurface` that records every call as a `DrawCommand`.
//
// Used by hosts without a display (servers, replays) and by tests that
// assert on what a render pass produced.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::RenderSurface;
use crate::core::asset::ImageHandle;
use crate::core::geometry::Rect;

//=== DrawCommand =========================================================

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f64, height: f64 },
    Image {
        source: String,
        clip: Option<Rect>,
        dest: Rect,
        alpha: f64,
    },
    FillText {
        text: String,
        x: f64,
        y: f64,
        font: String,
        color: String,
        alpha: f64,
    },
    StrokeText {
        text: String,
        x: f64,
        y: f64,
        font: String,
        color: String,
        alpha: f64,
    },
}

//=== RecordingSurface ====================================================

/// Surface that stores draw calls instead of rasterizing them.
///
/// `measure_text` uses a fixed advance of `glyph_width` per character,
/// scaled by the font's pixel size relative to 10px.
#[derive(Debug)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    alpha: f64,
    alpha_stack: Vec<f64>,
    glyph_width: f64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            alpha: 1.0,
            alpha_stack: Vec::new(),
            glyph_width: 5.0,
        }
    }

    pub fn with_glyph_width(mut self, glyph_width: f64) -> Self {
        self.glyph_width = glyph_width;
        self
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Recorded image blits in draw order.
    pub fn images(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Image { .. }))
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn global_alpha(&self) -> f64 {
        self.alpha
    }

    /// Depth of unmatched `save` calls.
    pub fn save_depth(&self) -> usize {
        self.alpha_stack.len()
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSurface for RecordingSurface {
    fn clear_region(&mut self, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn draw_image(&mut self, image: &ImageHandle, clip: Option<Rect>, dest: Rect) {
        self.commands.push(DrawCommand::Image {
            source: image.source().to_string(),
            clip,
            dest,
            alpha: self.alpha,
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: &str) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
            font: font.to_string(),
            color: color.to_string(),
            alpha: self.alpha,
        });
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: &str) {
        self.commands.push(DrawCommand::StrokeText {
            text: text.to_string(),
            x,
            y,
            font: font.to_string(),
            color: color.to_string(),
            alpha: self.alpha,
        });
    }

    fn save(&mut self) {
        self.alpha_stack.push(self.alpha);
    }

    fn restore(&mut self) {
        if let Some(alpha) = self.alpha_stack.pop() {
            self.alpha = alpha;
        }
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }

    fn measure_text(&mut self, text: &str, font: &str) -> f64 {
        let px = crate::core::text::font_pixel_size(font).max(0.0);
        text.chars().count() as f64 * self.glyph_width * px / 10.0
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_restore_scopes_alpha() {
        let mut surface = RecordingSurface::new();
        surface.save();
        surface.set_global_alpha(0.25);
        assert_eq!(surface.global_alpha(), 0.25);
        surface.restore();
        assert_eq!(surface.global_alpha(), 1.0);
        assert_eq!(surface.save_depth(), 0);
    }

    #[test]
    fn draw_image_records_current_alpha() {
        let mut surface = RecordingSurface::new();
        let image = ImageHandle::loaded("a.png", 8.0, 8.0);
        surface.set_global_alpha(0.5);
        surface.draw_image(&image, None, Rect::new(1.0, 2.0, 8.0, 8.0));

        assert_eq!(
            surface.commands(),
            &[DrawCommand::Image {
                source: "a.png".to_string(),
                clip: None,
                dest: Rect::new(1.0, 2.0, 8.0, 8.0),
                alpha: 0.5,
            }]
        );
    }

    #[test]
    fn measure_text_scales_with_font_size() {
        let mut surface = RecordingSurface::new();
        assert_eq!(surface.measure_text("abcd", "10px arial"), 20.0);
        assert_eq!(surface.measure_text("abcd", "20px arial"), 40.0);
    }
}
