//=========================================================================
// Stage
//
// Root of a renderable scene and owner of the frame clock.
//
// Architecture:
// ```text
//     StageBuilder  ──build()──>  Stage  ──tick(surface)──>  [one frame]
//         │                         │
//         ├─ with_size()            ├─ pump_input()    host events
//         ├─ with_cycle_length()    ├─ advance_frame() animation clock
//         └─ with_input_capacity()  ├─ clear_region()
//                                   └─ render(root)
// ```
//
// The host owns the stage and calls `tick` once per display refresh.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::event::{Event, EventKind};
use crate::core::input::{click_probe, InputEvent, KeyState};
use crate::core::render::{RenderContext, RenderSurface};
use crate::core::scene::{Node, NodeId, Scene, Transform};
use crate::error::SceneResult;
use crate::platform::{input_channel, InputReceiver, InputSender};

//=== StageBuilder ========================================================

/// Builder for configuring and constructing a [`Stage`].
///
/// # Default Values
///
/// - **Size**: 550 x 400
/// - **Cycle length**: 60 ticks per animation cycle
/// - **Input capacity**: 128 queued events
///
/// # Examples
///
/// ```
/// use flashfire::StageBuilder;
///
/// let stage = StageBuilder::new()
///     .with_size(800.0, 600.0)
///     .with_cycle_length(30)
///     .build();
///
/// assert_eq!(stage.size(), (800.0, 600.0));
/// ```
#[derive(Debug, Clone)]
pub struct StageBuilder {
    width: f64,
    height: f64,
    cycle_length: u32,
    input_capacity: usize,
}

impl StageBuilder {
    pub fn new() -> Self {
        Self {
            width: 550.0,
            height: 400.0,
            cycle_length: 60,
            input_capacity: 128,
        }
    }

    /// Default: 550 x 400
    ///
    /// # Panics
    ///
    /// Panics if either dimension is negative or not finite.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        assert!(
            width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0,
            "Stage size must be finite and non-negative, got {}x{}",
            width,
            height
        );
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the number of ticks in one animation cycle.
    ///
    /// Every playing animation completes one pass of its frames per cycle.
    ///
    /// Default: 60
    ///
    /// # Panics
    ///
    /// Panics if `cycle_length == 0`.
    pub fn with_cycle_length(mut self, cycle_length: u32) -> Self {
        assert!(cycle_length > 0, "Cycle length must be positive");
        self.cycle_length = cycle_length;
        self
    }

    /// Sets how many host events may queue between ticks.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_input_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Input capacity must be positive");
        self.input_capacity = capacity;
        self
    }

    pub fn build(self) -> Stage {
        info!(
            "Building stage ({}x{}, cycle: {}, input: {})",
            self.width, self.height, self.cycle_length, self.input_capacity
        );

        let mut scene = Scene::new();
        let transform = Transform::new(0.0, 0.0, self.width, self.height);
        let root = scene.insert(Node::new(transform).with_children().with_fixed_size());
        let (input_tx, input_rx) = input_channel(self.input_capacity);

        Stage {
            scene,
            root,
            width: self.width,
            height: self.height,
            frame: 0,
            cycle_length: self.cycle_length,
            keys: KeyState::new(),
            input_tx,
            input_rx,
        }
    }
}

impl Default for StageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Stage ===============================================================

/// A scene with a fixed-size root container and a cycling frame counter.
#[derive(Debug)]
pub struct Stage {
    scene: Scene,
    root: NodeId,
    width: f64,
    height: f64,
    frame: u32,
    cycle_length: u32,
    keys: KeyState,
    input_tx: InputSender,
    input_rx: InputReceiver,
}

impl Stage {
    /// Stage with default configuration.
    pub fn new() -> Self {
        StageBuilder::new().build()
    }

    //--- Accessors --------------------------------------------------------

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Current frame counter, in `[0, cycle_length)`.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn cycle_length(&self) -> u32 {
        self.cycle_length
    }

    pub fn keys(&self) -> &KeyState {
        &self.keys
    }

    pub fn keys_mut(&mut self) -> &mut KeyState {
        &mut self.keys
    }

    /// Handle for the host to queue input from any thread.
    pub fn input_sender(&self) -> InputSender {
        self.input_tx.clone()
    }

    //--- Configuration ----------------------------------------------------

    /// Matches the stage to a new surface size. Negative or non-finite
    /// values are ignored, per dimension.
    pub fn resize(&mut self, width: f64, height: f64) {
        if width.is_finite() && width >= 0.0 {
            self.width = width;
        }
        if height.is_finite() && height >= 0.0 {
            self.height = height;
        }
        // Fails only if the root was destroyed through `scene_mut`.
        if self.scene.force_size(self.root, self.width, self.height).is_err() {
            warn!("Stage root {} no longer exists", self.root);
        }
    }

    /// Attaches `child` to the root container.
    pub fn add_child(&mut self, child: NodeId) -> SceneResult<bool> {
        self.scene.add_child(self.root, child)
    }

    //--- Frame Loop -------------------------------------------------------

    /// Runs one frame: input, clock, clear, render.
    pub fn tick(&mut self, surface: &mut dyn RenderSurface) -> SceneResult<()> {
        self.pump_input()?;
        self.advance_frame();
        self.render(surface)
    }

    pub fn advance_frame(&mut self) {
        self.frame = (self.frame + 1) % self.cycle_length;
    }

    /// Clears the surface and renders the root at the current frame.
    pub fn render(&mut self, surface: &mut dyn RenderSurface) -> SceneResult<()> {
        surface.clear_region(self.width, self.height);
        let mut ctx = RenderContext::new(surface, self.frame, self.cycle_length);
        self.scene.render(self.root, &mut ctx)
    }

    //--- Input ------------------------------------------------------------

    /// Applies every queued host event. Returns how many were handled.
    pub fn pump_input(&mut self) -> SceneResult<usize> {
        let events = self.input_rx.drain();
        for &event in &events {
            self.handle_input(event)?;
        }
        if !events.is_empty() {
            trace!("Pumped {} input events", events.len());
        }
        Ok(events.len())
    }

    pub fn handle_input(&mut self, event: InputEvent) -> SceneResult<()> {
        self.keys.process(&event);
        if let InputEvent::Click { x, y, .. } = event {
            self.dispatch_click(x, y)?;
        }
        Ok(())
    }

    /// Emits `Click` on every node under the root hit by a click probe.
    ///
    /// Nodes are tested in pre-order against their absolute bounds. Returns
    /// the nodes that received the event.
    pub fn dispatch_click(&mut self, x: f64, y: f64) -> SceneResult<Vec<NodeId>> {
        let probe = click_probe(x, y);
        let mut hits = Vec::new();

        self.scene.for_each_child_recursive(self.root, |scene, id, _| {
            let hit = scene
                .absolute_bounds(id)
                .is_ok_and(|bounds| bounds.intersects(&probe));
            if hit {
                hits.push(id);
                scene.emit_on(id, Event::new(EventKind::Click));
            }
        })?;

        trace!("Click at ({}, {}) hit {} nodes", x, y, hits.len());
        Ok(hits)
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::asset::ImageHandle;
    use crate::core::geometry::Rect;
    use crate::core::input::{KeyCode, MouseButton};
    use crate::core::render::{DrawCommand, RecordingSurface};
    use crate::core::sprite::Frame;
    use std::cell::RefCell;
    use std::rc::Rc;

    //--- Builder ----------------------------------------------------------

    #[test]
    fn builder_defaults() {
        let stage = StageBuilder::new().build();
        assert_eq!(stage.size(), (550.0, 400.0));
        assert_eq!(stage.cycle_length(), 60);
        assert_eq!(stage.frame(), 0);
    }

    #[test]
    #[should_panic(expected = "Cycle length must be positive")]
    fn zero_cycle_length_panics() {
        let _ = StageBuilder::new().with_cycle_length(0);
    }

    #[test]
    #[should_panic(expected = "Input capacity must be positive")]
    fn zero_input_capacity_panics() {
        let _ = StageBuilder::new().with_input_capacity(0);
    }

    //--- Frame Loop -------------------------------------------------------

    #[test]
    fn frame_counter_cycles() {
        let mut stage = StageBuilder::new().with_cycle_length(3).build();
        let frames: Vec<u32> = (0..5)
            .map(|_| {
                stage.advance_frame();
                stage.frame()
            })
            .collect();
        assert_eq!(frames, vec![1, 2, 0, 1, 2]);
    }

    #[test]
    fn tick_clears_before_drawing() {
        let mut stage = StageBuilder::new().with_size(100.0, 80.0).build();
        let image = ImageHandle::loaded("hero.png", 8.0, 8.0);
        let hero = stage.scene_mut().create_sprite(image, Rect::new(4.0, 4.0, 8.0, 8.0));
        stage.add_child(hero).unwrap();

        let mut surface = RecordingSurface::new();
        stage.tick(&mut surface).unwrap();

        assert_eq!(surface.commands()[0], DrawCommand::Clear { width: 100.0, height: 80.0 });
        assert_eq!(surface.images().count(), 1);
        assert_eq!(stage.frame(), 1);
    }

    #[test]
    fn root_ignores_size_setters_but_follows_resize() {
        let mut stage = Stage::new();
        let root = stage.root();

        assert!(!stage.scene_mut().set_width(root, 10.0).unwrap());
        stage.resize(320.0, 240.0);

        assert_eq!(stage.size(), (320.0, 240.0));
        assert_eq!(
            stage.scene().node(root).unwrap().bounds(),
            Rect::new(0.0, 0.0, 320.0, 240.0)
        );
    }

    #[test]
    fn resize_keeps_previous_size_for_bad_dimensions() {
        let mut stage = Stage::new();
        let root = stage.root();

        stage.resize(-10.0, 300.0);
        assert_eq!(stage.size(), (550.0, 300.0));

        stage.resize(f64::NAN, -1.0);
        assert_eq!(stage.size(), (550.0, 300.0));
        assert_eq!(
            stage.scene().node(root).unwrap().bounds(),
            Rect::new(0.0, 0.0, 550.0, 300.0)
        );
    }

    #[test]
    fn depth_sorted_children_render_bottom_last() {
        let mut stage = Stage::new();
        let root = stage.root();
        for (name, y) in [("a.png", 20.0), ("b.png", 0.0), ("c.png", 10.0)] {
            let id = stage
                .scene_mut()
                .create_sprite(ImageHandle::loaded(name, 1.0, 1.0), Rect::new(0.0, y, 10.0, 10.0));
            stage.add_child(id).unwrap();
        }

        stage.scene_mut().depth_sort(root).unwrap();
        let mut surface = RecordingSurface::new();
        stage.render(&mut surface).unwrap();

        let sources: Vec<&str> = surface
            .images()
            .filter_map(|c| match c {
                DrawCommand::Image { source, .. } => Some(source.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(sources, vec!["b.png", "c.png", "a.png"]);
    }

    #[test]
    fn animation_completes_once_per_cycle() {
        let mut stage = StageBuilder::new().with_cycle_length(4).build();
        let sheet = ImageHandle::loaded("sheet.png", 32.0, 8.0);
        let runner = stage.scene_mut().create_animated_sprite(sheet, Rect::new(0.0, 0.0, 8.0, 8.0));
        stage.add_child(runner).unwrap();
        let frames = (0..4).map(|i| Frame::new(i as f64 * 8.0, 0.0, 8.0, 8.0)).collect();
        stage.scene_mut().add_animation(runner, "run", frames).unwrap();
        stage.scene_mut().play_animation(runner, "run").unwrap();

        let mut surface = RecordingSurface::new();
        for _ in 0..4 {
            stage.tick(&mut surface).unwrap();
        }

        let animation = stage.scene().animation(runner).unwrap();
        assert_eq!(animation.current_frame(), 0);
    }

    //--- Input ------------------------------------------------------------

    #[test]
    fn queued_keys_apply_on_tick() {
        let mut stage = Stage::new();
        let sender = stage.input_sender();
        sender.send(InputEvent::KeyDown(KeyCode::ArrowRight));

        assert!(stage.keys().is_key_up(KeyCode::ArrowRight));
        stage.tick(&mut RecordingSurface::new()).unwrap();
        assert!(stage.keys().is_key_down(KeyCode::ArrowRight));
    }

    #[test]
    fn click_reaches_nested_nodes_by_absolute_bounds() {
        let mut stage = Stage::new();
        let scene = stage.scene_mut();
        let panel = scene.create_container(Rect::new(100.0, 100.0, 50.0, 50.0));
        let button = scene.create_display_object(Rect::new(10.0, 10.0, 20.0, 20.0));
        let elsewhere = scene.create_display_object(Rect::new(0.0, 0.0, 5.0, 5.0));
        scene.add_child(panel, button).unwrap();

        let clicked = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&clicked);
        scene
            .on(button, EventKind::Click, move |_, e| log.borrow_mut().push(e.emitter))
            .unwrap();

        stage.add_child(panel).unwrap();
        stage.add_child(elsewhere).unwrap();

        stage
            .input_sender()
            .send(InputEvent::Click { x: 115.0, y: 115.0, button: MouseButton::Left });
        stage.pump_input().unwrap();

        assert_eq!(*clicked.borrow(), vec![Some(button)]);
        assert_eq!(stage.dispatch_click(115.0, 115.0).unwrap(), vec![panel, button]);
        assert!(stage.dispatch_click(400.0, 300.0).unwrap().is_empty());
    }
}
