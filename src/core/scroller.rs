//=========================================================================
// Viewport Scroller
//=========================================================================
//
// Dead-zone camera over a bounded world.
//
// The viewport keeps a fixed size and a mutable offset that never leaves
// the world bounds. Tracked containers are moved opposite to the offset,
// so scrolling the camera right slides the world left.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::geometry::Rect;
use crate::core::scene::{NodeId, Scene};
use crate::error::{SceneError, SceneResult};

//=== Scroller ============================================================

#[derive(Debug, Clone)]
pub struct Scroller {
    bounds: Rect,
    viewport: Rect,
    tracked: Vec<NodeId>,
}

impl Scroller {
    /// Creates a viewport of `width` x `height` at the bounds' origin.
    ///
    /// Fails if the bounds are not finite, the viewport size is not
    /// positive, or the viewport does not fit inside the bounds.
    pub fn new(bounds: Rect, width: f64, height: f64) -> SceneResult<Self> {
        if !bounds.is_finite() {
            return Err(SceneError::InvalidBounds("world bounds must be finite".into()));
        }
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(SceneError::InvalidBounds(format!(
                "viewport size {width}x{height} must be positive"
            )));
        }
        if width > bounds.width || height > bounds.height {
            return Err(SceneError::InvalidBounds(format!(
                "viewport {width}x{height} exceeds world {}x{}",
                bounds.width, bounds.height
            )));
        }

        Ok(Self {
            bounds,
            viewport: Rect::new(bounds.x, bounds.y, width, height),
            tracked: Vec::new(),
        })
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Current `(x, y)` offset of the viewport in world space.
    pub fn offset(&self) -> (f64, f64) {
        (self.viewport.x, self.viewport.y)
    }

    /// Moves the viewport to `(x, y)` if it stays within bounds.
    pub fn set_offset(&mut self, x: f64, y: f64) -> bool {
        let next = Rect::new(x, y, self.viewport.width, self.viewport.height);
        if !next.is_finite() || !self.bounds.contains_rect(&next) {
            return false;
        }
        self.viewport = next;
        true
    }

    //--- Scrolling --------------------------------------------------------

    pub fn scroll_x(&mut self, delta: f64) -> bool {
        self.set_offset(self.viewport.x + delta, self.viewport.y)
    }

    pub fn scroll_y(&mut self, delta: f64) -> bool {
        self.set_offset(self.viewport.x, self.viewport.y + delta)
    }

    /// Scrolls horizontally only once `target` is past the viewport
    /// center in the direction of `delta`.
    pub fn scroll_x_with(&mut self, target: &Rect, delta: f64) -> bool {
        let crossed = past_center(target.center_x(), self.viewport.center_x(), delta);
        crossed && self.scroll_x(delta)
    }

    /// Vertical counterpart of [`Scroller::scroll_x_with`].
    pub fn scroll_y_with(&mut self, target: &Rect, delta: f64) -> bool {
        let crossed = past_center(target.center_y(), self.viewport.center_y(), delta);
        crossed && self.scroll_y(delta)
    }

    //--- Tracking ---------------------------------------------------------

    pub fn track(&mut self, id: NodeId) {
        if !self.tracked.contains(&id) {
            self.tracked.push(id);
        }
    }

    pub fn untrack(&mut self, id: NodeId) -> bool {
        let before = self.tracked.len();
        self.tracked.retain(|&t| t != id);
        self.tracked.len() != before
    }

    pub fn tracked(&self) -> &[NodeId] {
        &self.tracked
    }

    /// Moves every tracked container to the negated viewport offset.
    pub fn update(&self, scene: &mut Scene) -> SceneResult<()> {
        let (x, y) = self.offset();
        trace!("Scroller update: offset ({}, {})", x, y);
        for &id in &self.tracked {
            scene.set_position(id, -x, -y)?;
        }
        Ok(())
    }
}

fn past_center(target: f64, center: f64, delta: f64) -> bool {
    if delta > 0.0 {
        target > center
    } else if delta < 0.0 {
        target < center
    } else {
        false
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> Scroller {
        Scroller::new(Rect::new(0.0, 0.0, 200.0, 100.0), 100.0, 50.0).unwrap()
    }

    #[test]
    fn invalid_bounds_are_rejected() {
        assert!(matches!(
            Scroller::new(Rect::new(0.0, 0.0, f64::NAN, 10.0), 5.0, 5.0),
            Err(SceneError::InvalidBounds(_))
        ));
        assert!(Scroller::new(Rect::new(0.0, 0.0, 10.0, 10.0), 0.0, 5.0).is_err());
        assert!(Scroller::new(Rect::new(0.0, 0.0, 10.0, 10.0), 20.0, 5.0).is_err());
    }

    #[test]
    fn scroll_never_leaves_bounds() {
        let mut scroller = world();

        assert!(!scroller.scroll_x(-1.0));
        assert!(scroller.scroll_x(100.0));
        assert!(!scroller.scroll_x(0.5));
        assert_eq!(scroller.offset(), (100.0, 0.0));

        assert!(scroller.scroll_y(50.0));
        assert!(!scroller.scroll_y(1.0));
        assert!(!scroller.scroll_y(f64::NAN));
        assert_eq!(scroller.offset(), (100.0, 50.0));
    }

    #[test]
    fn follow_waits_for_center_crossing() {
        let mut scroller = world();
        let left_of_center = Rect::new(40.0, 0.0, 4.0, 4.0);
        let right_of_center = Rect::new(60.0, 0.0, 4.0, 4.0);

        assert!(!scroller.scroll_x_with(&left_of_center, 2.0));
        assert!(scroller.scroll_x_with(&right_of_center, 2.0));
        assert!(!scroller.scroll_x_with(&right_of_center, -2.0));
        assert!(!scroller.scroll_x_with(&right_of_center, 0.0));
        assert_eq!(scroller.offset(), (2.0, 0.0));
    }

    #[test]
    fn update_moves_tracked_containers() {
        let mut scene = Scene::new();
        let world_layer = scene.create_container(Rect::default());
        let mut scroller = world();
        scroller.track(world_layer);
        scroller.track(world_layer);
        scroller.scroll_x(30.0);
        scroller.scroll_y(10.0);

        scroller.update(&mut scene).unwrap();

        let t = *scene.node(world_layer).unwrap().transform();
        assert_eq!((t.x, t.y), (-30.0, -10.0));
        assert_eq!(scroller.tracked().len(), 1);
        assert!(scroller.untrack(world_layer));
        assert!(!scroller.untrack(world_layer));
    }
}
