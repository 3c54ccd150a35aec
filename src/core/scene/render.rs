//=========================================================================
// Scene Render Pass
//=========================================================================
//
// Top-down traversal that turns the node tree into surface calls.
//
// Per node, in order:
//   1. skip if invisible
//   2. emit RenderStart          (user drawing hooks)
//   3. auto-advance animation    (animated sprites)
//   4. draw own visuals          (image or text)
//   5. render children           (snapshot of the draw list)
//   6. emit RenderDone
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::{Drawable, NodeId, Scene};
use crate::core::event::EventKind;
use crate::core::geometry::Rect;
use crate::core::render::RenderContext;
use crate::error::SceneResult;

//=== Render ==============================================================

impl Scene {
    /// Renders `id` and its subtree onto `ctx.surface`.
    ///
    /// Handlers run during the pass may restructure the tree. A node
    /// destroyed by its own `RenderStart` handler is skipped from then on.
    pub fn render(&mut self, id: NodeId, ctx: &mut RenderContext<'_>) -> SceneResult<()> {
        if !self.node(id)?.transform.visible {
            return Ok(());
        }

        self.emit_on(id, EventKind::RenderStart.into());
        if !self.contains(id) {
            return Ok(());
        }

        self.auto_animate(id, ctx.tick, ctx.cycle_length)?;
        self.draw_visuals(id, ctx)?;

        if self.node(id)?.is_container() {
            self.render_children(id, ctx)?;
        }

        if self.contains(id) {
            self.emit_on(id, EventKind::RenderDone.into());
        }
        Ok(())
    }

    /// Renders each child in draw order, iterating a snapshot of the list.
    pub fn render_children(&mut self, id: NodeId, ctx: &mut RenderContext<'_>) -> SceneResult<()> {
        let snapshot = self.child_list(id)?.as_slice().to_vec();
        for child in snapshot {
            if self.contains(child) {
                self.render(child, ctx)?;
            }
        }
        Ok(())
    }

    fn draw_visuals(&mut self, id: NodeId, ctx: &mut RenderContext<'_>) -> SceneResult<()> {
        if self.node(id)?.drawable.is_none() {
            return Ok(());
        }

        let x = self.draw_x(id)?;
        let y = self.draw_y(id)?;
        let alpha = self.draw_alpha(id)?;
        let node = self.node_mut(id)?;

        match &mut node.drawable {
            Some(Drawable::Image(sprite)) => {
                if !sprite.image().is_ready() {
                    trace!("Skipped {}: image '{}' not ready", id, sprite.image().source());
                    return Ok(());
                }
                if sprite.clip_on_load {
                    sprite.auto_clip_size();
                }
                let dest = Rect::new(x, y, node.transform.width, node.transform.height);
                sprite.draw(&mut *ctx.surface, dest, alpha);
            }
            Some(Drawable::Text(field)) => {
                node.transform.width = ctx.surface.measure_text(field.text(), field.font());
                node.transform.height = field.line_height();
                field.draw(&mut *ctx.surface, x, y, alpha);
            }
            None => {}
        }
        Ok(())
    }
}

//=========================================================================
// Tests
//=========================================================================
