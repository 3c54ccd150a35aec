//=========================================================================
// Text Field
//=========================================================================
//
// Single-line text label drawn with a stroke and a fill pass.
//
// A text field's size is derived, never assigned: width is measured by
// the surface on every render and height is the leading pixel size of
// the font string.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::render::RenderSurface;
use crate::core::scene::{NodeId, Scene};
use crate::error::{SceneError, SceneResult};

//=== Font Helpers ========================================================

/// Leading number of a CSS-style font string: `"12px arial"` -> 12.
///
/// Returns 0 when the string does not start with a digit.
pub fn font_pixel_size(font: &str) -> f64 {
    let digits: String = font
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0.0)
}

//=== TextField ===========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct TextField {
    text: String,
    font: String,
    fill_color: String,
    stroke_color: String,
}

impl TextField {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: "12px arial".to_string(),
            fill_color: "white".to_string(),
            stroke_color: "black".to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font(&self) -> &str {
        &self.font
    }

    pub fn fill_color(&self) -> &str {
        &self.fill_color
    }

    pub fn stroke_color(&self) -> &str {
        &self.stroke_color
    }

    pub fn line_height(&self) -> f64 {
        font_pixel_size(&self.font)
    }

    pub(crate) fn draw(&self, surface: &mut dyn RenderSurface, x: f64, y: f64, alpha: f64) {
        surface.save();
        surface.set_global_alpha(alpha);
        surface.stroke_text(&self.text, x, y, &self.font, &self.stroke_color);
        surface.fill_text(&self.text, x, y, &self.font, &self.fill_color);
        surface.restore();
    }
}

//=== Scene Operations ====================================================

impl Scene {
    pub fn text_field(&self, id: NodeId) -> SceneResult<&TextField> {
        self.node(id)?.text().ok_or(SceneError::NotAText(id))
    }

    fn text_field_mut(&mut self, id: NodeId) -> SceneResult<&mut TextField> {
        self.node_mut(id)?.text_mut().ok_or(SceneError::NotAText(id))
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> SceneResult<()> {
        self.text_field_mut(id)?.text = text.into();
        Ok(())
    }

    /// Changes the font; the node height follows the new pixel size.
    pub fn set_font(&mut self, id: NodeId, font: impl Into<String>) -> SceneResult<()> {
        let field = self.text_field_mut(id)?;
        field.font = font.into();
        let height = field.line_height();
        let width = self.node(id)?.transform().width;
        self.force_size(id, width, height)
    }

    pub fn set_colors(
        &mut self,
        id: NodeId,
        fill: impl Into<String>,
        stroke: impl Into<String>,
    ) -> SceneResult<()> {
        let field = self.text_field_mut(id)?;
        field.fill_color = fill.into();
        field.stroke_color = stroke.into();
        Ok(())
    }

    /// Centers the label horizontally inside its parent.
    ///
    /// Uses the width measured by the last render pass.
    pub fn center_text(&mut self, id: NodeId) -> SceneResult<bool> {
        self.text_field(id)?;
        let node = self.node(id)?;
        let width = node.transform().width;
        let Some(parent) = node.parent().and_then(|p| self.get(p)) else {
            return Ok(false);
        };
        let x = (parent.transform().width - width) / 2.0;
        self.set_x(id, x)
    }
}

//=========================================================================
// Tests
//=========================================================================
