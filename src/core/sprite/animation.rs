//=========================================================================
// Sprite Animation
//=========================================================================
//
// Named frame sequences cycled through a sprite's clip rectangle.
//
// State machine:
//   current: none ──play(name)──> (name, frame 0, playing)
//   goto / next / prev   move the cursor within [0, num_frames)
//   stop                 clears the auto-advance flag
//
// Auto-advance is throttled by the stage frame counter so one sequence
// completes once per `cycle_length` ticks regardless of its frame count.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::event::EventKind;
use crate::core::geometry::Rect;
use crate::core::scene::{NodeId, Scene};
use crate::error::{SceneError, SceneResult};

//=== Frame ===============================================================

/// Source sub-rectangle of one animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub clip: Rect,
}

impl Frame {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            clip: Rect::new(x, y, width, height),
        }
    }

    fn is_well_formed(&self) -> bool {
        self.clip.is_finite() && self.clip.width > 0.0 && self.clip.height > 0.0
    }
}

//=== Animation ===========================================================

#[derive(Debug, Clone, Default)]
pub struct Animation {
    sequences: HashMap<String, Vec<Frame>>,
    current: Option<String>,
    frame: usize,
    playing: bool,
}

impl Animation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) a named sequence.
    pub fn add(&mut self, name: impl Into<String>, frames: Vec<Frame>) -> SceneResult<()> {
        let name = name.into();
        let reason = if frames.is_empty() {
            Some("no frames".to_string())
        } else {
            frames
                .iter()
                .position(|f| !f.is_well_formed())
                .map(|index| format!("frame {index} has a non-positive or non-finite size"))
        };
        if let Some(reason) = reason {
            return Err(SceneError::MalformedAnimation { name, reason });
        }
        self.sequences.insert(name, frames);
        Ok(())
    }

    pub fn has(&self, name: &str) -> bool {
        self.sequences.contains_key(name)
    }

    /// Switches to `name` at frame 0 and enables auto-advance.
    pub fn play(&mut self, name: &str) -> bool {
        if !self.has(name) {
            return false;
        }
        self.current = Some(name.to_string());
        self.frame = 0;
        self.playing = true;
        true
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn current_frame(&self) -> usize {
        self.frame
    }

    /// Frame count of the current sequence; 0 when nothing is selected.
    pub fn num_frames(&self) -> usize {
        self.frames().map_or(0, <[Frame]>::len)
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    fn frames(&self) -> Option<&[Frame]> {
        self.current
            .as_ref()
            .and_then(|name| self.sequences.get(name))
            .map(Vec::as_slice)
    }

    /// The frame under the cursor.
    pub fn current(&self) -> Option<Frame> {
        self.frames().and_then(|frames| frames.get(self.frame)).copied()
    }

    /// Moves the cursor to `frame` (wrapped) and sets the auto-advance flag.
    pub fn goto(&mut self, frame: usize, playing: bool) -> bool {
        let n = self.num_frames();
        if n == 0 {
            return false;
        }
        self.frame = frame % n;
        self.playing = playing;
        true
    }

    pub fn next(&mut self) -> bool {
        let n = self.num_frames();
        if n == 0 {
            return false;
        }
        self.frame = (self.frame + 1) % n;
        true
    }

    pub fn prev(&mut self) -> bool {
        let n = self.num_frames();
        if n == 0 {
            return false;
        }
        self.frame = (self.frame + n - 1) % n;
        true
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Whether the frame counter value `tick` is an advance point.
    pub fn should_advance(&self, tick: u32, cycle_length: u32) -> bool {
        let n = self.num_frames();
        if !self.playing || n == 0 {
            return false;
        }
        let step = (cycle_length as usize / n).max(1);
        tick as usize % step == 0
    }
}

//=== Scene Operations ====================================================

impl Scene {
    pub fn animation(&self, id: NodeId) -> SceneResult<&Animation> {
        self.node(id)?
            .animation
            .as_ref()
            .ok_or(SceneError::NotAnimated(id))
    }

    fn animation_mut(&mut self, id: NodeId) -> SceneResult<&mut Animation> {
        self.node_mut(id)?
            .animation
            .as_mut()
            .ok_or(SceneError::NotAnimated(id))
    }

    /// Registers a named frame sequence on an animated sprite.
    pub fn add_animation(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        frames: Vec<Frame>,
    ) -> SceneResult<()> {
        self.animation_mut(id)?.add(name, frames)
    }

    /// Starts `name` from its first frame. `Ok(false)` for unknown names.
    pub fn play_animation(&mut self, id: NodeId, name: &str) -> SceneResult<bool> {
        if !self.animation_mut(id)?.play(name) {
            return Ok(false);
        }
        debug!("Node {} playing animation '{}'", id, name);
        self.apply_frame(id)?;
        Ok(true)
    }

    pub fn goto_and_play(&mut self, id: NodeId, frame: usize) -> SceneResult<bool> {
        self.step_animation(id, |a| a.goto(frame, true))
    }

    pub fn goto_and_stop(&mut self, id: NodeId, frame: usize) -> SceneResult<bool> {
        self.step_animation(id, |a| a.goto(frame, false))
    }

    pub fn next_frame(&mut self, id: NodeId) -> SceneResult<bool> {
        self.step_animation(id, Animation::next)
    }

    pub fn prev_frame(&mut self, id: NodeId) -> SceneResult<bool> {
        self.step_animation(id, Animation::prev)
    }

    pub fn stop_animation(&mut self, id: NodeId) -> SceneResult<()> {
        self.animation_mut(id)?.stop();
        Ok(())
    }

    fn step_animation<F>(&mut self, id: NodeId, step: F) -> SceneResult<bool>
    where
        F: FnOnce(&mut Animation) -> bool,
    {
        if !step(self.animation_mut(id)?) {
            return Ok(false);
        }
        self.apply_frame(id)?;
        Ok(true)
    }

    /// Copies the current frame into the sprite clip and emits `AnimUpdate`.
    fn apply_frame(&mut self, id: NodeId) -> SceneResult<()> {
        let Some(frame) = self.animation(id)?.current() else {
            return Ok(());
        };
        self.sprite_mut(id)?.set_clip(frame.clip);
        self.emit_on(id, EventKind::AnimUpdate.into());
        Ok(())
    }

    /// Render-time auto-advance. No-op for nodes without animation state.
    pub(crate) fn auto_animate(
        &mut self,
        id: NodeId,
        tick: u32,
        cycle_length: u32,
    ) -> SceneResult<()> {
        let advance = match &self.node(id)?.animation {
            Some(animation) => animation.should_advance(tick, cycle_length),
            None => false,
        };
        if advance {
            self.next_frame(id)?;
        }
        Ok(())
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::asset::ImageHandle;
    use std::cell::Cell;
    use std::rc::Rc;

    //--- Test Helpers -----------------------------------------------------

    fn walk_cycle() -> Vec<Frame> {
        (0..4).map(|i| Frame::new(i as f64 * 16.0, 0.0, 16.0, 16.0)).collect()
    }

    fn animated() -> (Scene, NodeId) {
        let mut scene = Scene::new();
        let id = scene.create_animated_sprite(
            ImageHandle::loaded("sheet.png", 64.0, 16.0),
            Rect::new(0.0, 0.0, 16.0, 16.0),
        );
        scene.add_animation(id, "walk", walk_cycle()).unwrap();
        (scene, id)
    }

    //--- Animation State --------------------------------------------------

    #[test]
    fn frame_index_wraps_both_ways() {
        let mut animation = Animation::new();
        animation.add("walk", walk_cycle()).unwrap();
        animation.play("walk");

        animation.prev();
        assert_eq!(animation.current_frame(), 3);
        animation.next();
        animation.next();
        assert_eq!(animation.current_frame(), 1);
        animation.goto(9, false);
        assert_eq!(animation.current_frame(), 1);
        assert!(!animation.is_playing());
    }

    #[test]
    fn empty_state_never_advances() {
        let animation = Animation::new();
        assert_eq!(animation.num_frames(), 0);
        for tick in 0..60 {
            assert!(!animation.should_advance(tick, 60));
        }
    }

    #[test]
    fn advance_step_spreads_cycle_over_frames() {
        let mut animation = Animation::new();
        animation.add("walk", walk_cycle()).unwrap();
        animation.play("walk");

        let advances = (0..60).filter(|&t| animation.should_advance(t, 60)).count();
        assert_eq!(advances, 4);
        assert!(animation.should_advance(0, 2));
        assert!(animation.should_advance(1, 2));
    }

    #[test]
    fn malformed_sequences_are_rejected() {
        let (mut scene, id) = animated();

        assert_eq!(
            scene.add_animation(id, "none", Vec::new()).unwrap_err(),
            SceneError::MalformedAnimation {
                name: "none".to_string(),
                reason: "no frames".to_string(),
            }
        );
        assert!(scene
            .add_animation(id, "flat", vec![Frame::new(0.0, 0.0, 0.0, 16.0)])
            .is_err());
        assert!(scene
            .add_animation(id, "nan", vec![Frame::new(f64::NAN, 0.0, 4.0, 4.0)])
            .is_err());
    }

    //--- Scene Operations -------------------------------------------------

    #[test]
    fn play_applies_first_frame_and_emits() {
        let (mut scene, id) = animated();
        let updates = Rc::new(Cell::new(0));
        let counter = Rc::clone(&updates);
        scene
            .on(id, EventKind::AnimUpdate, move |_, _| counter.set(counter.get() + 1))
            .unwrap();

        assert!(!scene.play_animation(id, "run").unwrap());
        assert!(scene.play_animation(id, "walk").unwrap());
        assert_eq!(scene.sprite(id).unwrap().clip(), Rect::new(0.0, 0.0, 16.0, 16.0));

        scene.goto_and_stop(id, 2).unwrap();
        assert_eq!(scene.sprite(id).unwrap().clip().x, 32.0);
        assert!(!scene.animation(id).unwrap().is_playing());
        assert_eq!(updates.get(), 2);
    }

    #[test]
    fn auto_animate_steps_on_advance_ticks() {
        let (mut scene, id) = animated();
        scene.play_animation(id, "walk").unwrap();

        scene.auto_animate(id, 1, 60).unwrap();
        assert_eq!(scene.animation(id).unwrap().current_frame(), 0);
        scene.auto_animate(id, 15, 60).unwrap();
        assert_eq!(scene.animation(id).unwrap().current_frame(), 1);

        scene.stop_animation(id).unwrap();
        scene.auto_animate(id, 30, 60).unwrap();
        assert_eq!(scene.animation(id).unwrap().current_frame(), 1);
    }

    #[test]
    fn plain_sprites_are_not_animated() {
        let mut scene = Scene::new();
        let id = scene.create_sprite(ImageHandle::empty(), Rect::default());
        assert_eq!(scene.next_frame(id).unwrap_err(), SceneError::NotAnimated(id));
    }
}
