//=========================================================================
// Sprite
//=========================================================================
//
// Image component of a node: a shared image handle plus a source clip
// rectangle.
//
// Clipping is enabled only while both clip dimensions are positive; with
// clipping off the whole image is blitted into the node's box.
//
//=========================================================================

//=== Module Declarations =================================================

mod animation;

//=== Public API ==========================================================

pub use animation::{Animation, Frame};

use crate::core::asset::ImageHandle;
use crate::core::geometry::Rect;
use crate::core::render::RenderSurface;
use crate::core::scene::{NodeId, Scene};
use crate::error::{SceneError, SceneResult};

//=== Sprite ==============================================================

#[derive(Debug, Clone)]
pub struct Sprite {
    image: ImageHandle,
    clip: Rect,
    /// Adopt the image's natural size as the clip once it is ready.
    pub(crate) clip_on_load: bool,
}

impl Sprite {
    pub fn new(image: ImageHandle) -> Self {
        Self {
            image,
            clip: Rect::default(),
            clip_on_load: true,
        }
    }

    pub fn image(&self) -> &ImageHandle {
        &self.image
    }

    pub fn set_image(&mut self, image: ImageHandle) {
        self.image = image;
        self.clip = Rect::default();
        self.clip_on_load = true;
    }

    pub fn clip(&self) -> Rect {
        self.clip
    }

    /// Sets the source rectangle. Non-finite rectangles are ignored.
    pub fn set_clip(&mut self, clip: Rect) -> bool {
        if !clip.is_finite() {
            return false;
        }
        self.clip = clip;
        self.clip_on_load = false;
        true
    }

    pub fn clip_enabled(&self) -> bool {
        self.clip.width > 0.0 && self.clip.height > 0.0
    }

    /// Resets the clip to the image's natural bounds.
    pub fn auto_clip_size(&mut self) {
        let (width, height) = self.image.natural_size();
        self.clip = Rect::new(0.0, 0.0, width, height);
        self.clip_on_load = false;
    }

    /// Blits the image into `dest`. Unready images draw nothing.
    pub fn draw(&self, surface: &mut dyn RenderSurface, dest: Rect, alpha: f64) {
        if !self.image.is_ready() {
            return;
        }
        let clip = self.clip_enabled().then_some(self.clip);

        surface.save();
        surface.set_global_alpha(alpha);
        surface.draw_image(&self.image, clip, dest);
        surface.restore();
    }
}

//=== Scene Operations ====================================================

impl Scene {
    pub fn sprite(&self, id: NodeId) -> SceneResult<&Sprite> {
        self.node(id)?.sprite().ok_or(SceneError::NotASprite(id))
    }

    pub(crate) fn sprite_mut(&mut self, id: NodeId) -> SceneResult<&mut Sprite> {
        self.node_mut(id)?
            .sprite_mut()
            .ok_or(SceneError::NotASprite(id))
    }

    /// Sets the sprite's source rectangle. Non-finite values are ignored.
    pub fn set_clip(&mut self, id: NodeId, clip: Rect) -> SceneResult<bool> {
        Ok(self.sprite_mut(id)?.set_clip(clip))
    }

    pub fn auto_clip_size(&mut self, id: NodeId) -> SceneResult<()> {
        self.sprite_mut(id)?.auto_clip_size();
        Ok(())
    }

    pub fn set_image(&mut self, id: NodeId, image: ImageHandle) -> SceneResult<()> {
        self.sprite_mut(id)?.set_image(image);
        Ok(())
    }
}

//=========================================================================
// Tests
//=========================================================================
