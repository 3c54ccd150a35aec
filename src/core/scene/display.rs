//=========================================================================
// Display Object Operations
//=========================================================================
//
// Transform setters, resolved (absolute) coordinates and hit testing.
//
// Setter contract:
//   - finite value   -> stored, `Move` / `Resize` emitted, Ok(true)
//   - non-finite     -> ignored, no event, Ok(false)
//   - unknown node   -> Err(UnknownNode)
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;
use serde_json::Value;

//=== Internal Dependencies ===============================================

use super::{NodeId, Property, Scene};
use crate::core::event::EventKind;
use crate::core::geometry::Rect;
use crate::error::SceneResult;

//=== Axis ================================================================

#[derive(Clone, Copy)]
enum Field {
    X,
    Y,
    Width,
    Height,
}

//=== Setters =============================================================

impl Scene {
    fn set_field(&mut self, id: NodeId, field: Field, value: f64) -> SceneResult<bool> {
        let node = self.node_mut(id)?;
        if !value.is_finite() {
            trace!("Ignored non-finite value for {}", id);
            return Ok(false);
        }

        let event = match field {
            Field::X => {
                node.transform.x = value;
                EventKind::Move
            }
            Field::Y => {
                node.transform.y = value;
                EventKind::Move
            }
            Field::Width | Field::Height if node.fixed_size => return Ok(false),
            Field::Width => {
                node.transform.width = value;
                EventKind::Resize
            }
            Field::Height => {
                node.transform.height = value;
                EventKind::Resize
            }
        };

        self.emit_on(id, event.into());
        Ok(true)
    }

    pub fn set_x(&mut self, id: NodeId, x: f64) -> SceneResult<bool> {
        self.set_field(id, Field::X, x)
    }

    pub fn set_y(&mut self, id: NodeId, y: f64) -> SceneResult<bool> {
        self.set_field(id, Field::Y, y)
    }

    /// Ignored for fixed-size nodes (text fields, stage roots).
    pub fn set_width(&mut self, id: NodeId, width: f64) -> SceneResult<bool> {
        self.set_field(id, Field::Width, width)
    }

    /// Ignored for fixed-size nodes (text fields, stage roots).
    pub fn set_height(&mut self, id: NodeId, height: f64) -> SceneResult<bool> {
        self.set_field(id, Field::Height, height)
    }

    /// Assigns `x` then `y`; each accepted component emits its own `Move`.
    pub fn set_position(&mut self, id: NodeId, x: f64, y: f64) -> SceneResult<bool> {
        let moved_x = self.set_x(id, x)?;
        let moved_y = self.set_y(id, y)?;
        Ok(moved_x || moved_y)
    }

    /// Assigns `width` then `height`; each accepted component emits `Resize`.
    pub fn set_size(&mut self, id: NodeId, width: f64, height: f64) -> SceneResult<bool> {
        let resized_w = self.set_width(id, width)?;
        let resized_h = self.set_height(id, height)?;
        Ok(resized_w || resized_h)
    }

    /// Sets the size of a fixed-size node without emitting events.
    pub(crate) fn force_size(&mut self, id: NodeId, width: f64, height: f64) -> SceneResult<()> {
        let transform = &mut self.node_mut(id)?.transform;
        if width.is_finite() {
            transform.width = width;
        }
        if height.is_finite() {
            transform.height = height;
        }
        Ok(())
    }

    /// Stores `alpha` clamped into `[0, 1]`. NaN is ignored.
    pub fn set_alpha(&mut self, id: NodeId, alpha: f64) -> SceneResult<bool> {
        let node = self.node_mut(id)?;
        if alpha.is_nan() {
            return Ok(false);
        }
        node.transform.alpha = alpha.clamp(0.0, 1.0);
        Ok(true)
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> SceneResult<()> {
        self.node_mut(id)?.transform.visible = visible;
        Ok(())
    }

    /// Dynamically assigns a property from an untyped value.
    ///
    /// Numeric properties accept JSON numbers only and `Visible` accepts
    /// booleans only. Anything else is dropped with `Ok(false)`.
    pub fn assign(&mut self, id: NodeId, property: Property, value: &Value) -> SceneResult<bool> {
        self.node(id)?;
        match (property, value) {
            (Property::Visible, Value::Bool(visible)) => {
                self.set_visible(id, *visible)?;
                Ok(true)
            }
            (Property::Visible, _) => Ok(false),
            (numeric, Value::Number(number)) => {
                let Some(v) = number.as_f64() else {
                    return Ok(false);
                };
                match numeric {
                    Property::X => self.set_x(id, v),
                    Property::Y => self.set_y(id, v),
                    Property::Width => self.set_width(id, v),
                    Property::Height => self.set_height(id, v),
                    Property::Alpha => self.set_alpha(id, v),
                    Property::Visible => Ok(false),
                }
            }
            _ => Ok(false),
        }
    }

    //--- Resolved Coordinates ---------------------------------------------

    /// Walks `id` and its ancestors, folding `f` over their transforms.
    fn fold_ancestors<F>(&self, id: NodeId, init: f64, f: F) -> SceneResult<f64>
    where
        F: Fn(f64, &super::Transform) -> f64,
    {
        let mut node = self.node(id)?;
        let mut acc = f(init, &node.transform);
        while let Some(parent) = node.parent.and_then(|p| self.get(p)) {
            acc = f(acc, &parent.transform);
            node = parent;
        }
        Ok(acc)
    }

    /// Absolute x: local `x` plus every ancestor's `x`.
    pub fn draw_x(&self, id: NodeId) -> SceneResult<f64> {
        self.fold_ancestors(id, 0.0, |acc, t| acc + t.x)
    }

    /// Absolute y: local `y` plus every ancestor's `y`.
    pub fn draw_y(&self, id: NodeId) -> SceneResult<f64> {
        self.fold_ancestors(id, 0.0, |acc, t| acc + t.y)
    }

    /// Effective opacity: the product of local and ancestor alphas.
    pub fn draw_alpha(&self, id: NodeId) -> SceneResult<f64> {
        self.fold_ancestors(id, 1.0, |acc, t| acc * t.alpha)
    }

    /// Bounds in root space.
    pub fn absolute_bounds(&self, id: NodeId) -> SceneResult<Rect> {
        let t = self.node(id)?.transform;
        Ok(Rect::new(self.draw_x(id)?, self.draw_y(id)?, t.width, t.height))
    }

    //--- Hit Testing ------------------------------------------------------

    /// Open-interval overlap of the two nodes' local boxes. Symmetric.
    pub fn hit_test_object(&self, a: NodeId, b: NodeId) -> SceneResult<bool> {
        let a = self.node(a)?.bounds();
        let b = self.node(b)?.bounds();
        Ok(a.intersects(&b))
    }

    pub fn hit_test_rect(&self, id: NodeId, rect: &Rect) -> SceneResult<bool> {
        Ok(self.node(id)?.bounds().intersects(rect))
    }

    /// First node in `group` (other than `id`) overlapping `id`.
    pub fn hit_test_group(&self, id: NodeId, group: &[NodeId]) -> SceneResult<Option<NodeId>> {
        let bounds = self.node(id)?.bounds();
        for &other in group {
            if other == id {
                continue;
            }
            if self.node(other)?.bounds().intersects(&bounds) {
                return Ok(Some(other));
            }
        }
        Ok(None)
    }

    //--- Placement --------------------------------------------------------

    /// Centers `id` inside its parent's box. Returns `Ok(false)` if detached.
    pub fn center(&mut self, id: NodeId) -> SceneResult<bool> {
        let node = self.node(id)?;
        let Some(parent) = node.parent.and_then(|p| self.get(p)) else {
            return Ok(false);
        };
        let x = (parent.transform.width - node.transform.width) / 2.0;
        let y = (parent.transform.height - node.transform.height) / 2.0;
        self.set_position(id, x, y)
    }

    /// Detaches `id` from its container, if any.
    pub fn remove(&mut self, id: NodeId) -> SceneResult<bool> {
        match self.node(id)?.parent {
            Some(parent) => Ok(self.remove_child(parent, id)?.is_some()),
            None => Ok(false),
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;
    use std::rc::Rc;

    //--- Test Helpers -----------------------------------------------------

    fn count_events(scene: &mut Scene, id: NodeId, kind: EventKind) -> Rc<Cell<u32>> {
        let counter = Rc::new(Cell::new(0));
        let handle = Rc::clone(&counter);
        scene
            .on(id, kind, move |_, _| handle.set(handle.get() + 1))
            .unwrap();
        counter
    }

    //--- Setters ----------------------------------------------------------

    #[test]
    fn accepted_assignments_emit_events() {
        let mut scene = Scene::new();
        let id = scene.create_display_object(Rect::default());
        let moves = count_events(&mut scene, id, EventKind::Move);
        let resizes = count_events(&mut scene, id, EventKind::Resize);

        assert!(scene.set_position(id, 3.0, 4.0).unwrap());
        assert!(scene.set_size(id, 10.0, 20.0).unwrap());

        assert_eq!(moves.get(), 2);
        assert_eq!(resizes.get(), 2);
        assert_eq!(scene.node(id).unwrap().bounds(), Rect::new(3.0, 4.0, 10.0, 20.0));
    }

    #[test]
    fn non_finite_values_are_ignored() {
        let mut scene = Scene::new();
        let id = scene.create_display_object(Rect::new(1.0, 1.0, 1.0, 1.0));
        let moves = count_events(&mut scene, id, EventKind::Move);

        assert!(!scene.set_x(id, f64::NAN).unwrap());
        assert!(!scene.set_y(id, f64::NEG_INFINITY).unwrap());
        assert_eq!(moves.get(), 0);
        assert_eq!(scene.node(id).unwrap().transform().x, 1.0);
    }

    #[test]
    fn string_width_is_dropped_without_resize() {
        let mut scene = Scene::new();
        let id = scene.create_display_object(Rect::new(0.0, 0.0, 8.0, 8.0));
        let resizes = count_events(&mut scene, id, EventKind::Resize);

        assert!(!scene.assign(id, Property::Width, &json!("abc")).unwrap());
        assert!(!scene.assign(id, Property::Visible, &json!(1)).unwrap());
        assert!(scene.assign(id, Property::Height, &json!(12.5)).unwrap());

        assert_eq!(resizes.get(), 1);
        assert_eq!(scene.node(id).unwrap().transform().width, 8.0);
        assert_eq!(scene.node(id).unwrap().transform().height, 12.5);
    }

    #[test]
    fn alpha_is_clamped() {
        let mut scene = Scene::new();
        let id = scene.create_display_object(Rect::default());

        scene.set_alpha(id, 3.0).unwrap();
        assert_eq!(scene.node(id).unwrap().transform().alpha, 1.0);
        scene.set_alpha(id, -1.0).unwrap();
        assert_eq!(scene.node(id).unwrap().transform().alpha, 0.0);
        assert!(!scene.set_alpha(id, f64::NAN).unwrap());
    }

    #[test]
    fn text_fields_ignore_size_setters() {
        let mut scene = Scene::new();
        let text = scene.create_text("hi", 0.0, 0.0);

        assert!(!scene.set_width(text, 100.0).unwrap());
        assert_eq!(scene.node(text).unwrap().transform().width, 0.0);
        assert_eq!(scene.node(text).unwrap().transform().height, 12.0);
    }

    //--- Resolved Coordinates ---------------------------------------------

    #[test]
    fn draw_values_follow_ancestors() {
        let mut scene = Scene::new();
        let outer = scene.create_container(Rect::new(10.0, 20.0, 100.0, 100.0));
        let inner = scene.create_container(Rect::new(1.0, 2.0, 50.0, 50.0));
        let leaf = scene.create_display_object(Rect::new(3.0, 4.0, 5.0, 5.0));
        scene.add_child(outer, inner).unwrap();
        scene.add_child(inner, leaf).unwrap();
        scene.set_alpha(outer, 0.5).unwrap();
        scene.set_alpha(inner, 0.5).unwrap();
        scene.set_alpha(leaf, 0.8).unwrap();

        assert_eq!(scene.draw_x(leaf).unwrap(), 14.0);
        assert_eq!(scene.draw_y(leaf).unwrap(), 26.0);
        assert!((scene.draw_alpha(leaf).unwrap() - 0.2).abs() < 1e-12);

        scene.remove(inner).unwrap();
        assert_eq!(scene.draw_x(inner).unwrap(), 1.0);
        assert_eq!(scene.draw_alpha(inner).unwrap(), 0.5);
    }

    //--- Hit Testing ------------------------------------------------------

    #[test]
    fn hit_test_is_symmetric_and_open() {
        let mut scene = Scene::new();
        let a = scene.create_display_object(Rect::new(0.0, 0.0, 10.0, 10.0));
        let b = scene.create_display_object(Rect::new(5.0, 5.0, 10.0, 10.0));
        let touching = scene.create_display_object(Rect::new(10.0, 0.0, 10.0, 10.0));

        assert!(scene.hit_test_object(a, b).unwrap());
        assert!(scene.hit_test_object(b, a).unwrap());
        assert!(!scene.hit_test_object(a, touching).unwrap());
        assert!(!scene.hit_test_object(touching, a).unwrap());
    }

    #[test]
    fn hit_test_group_returns_first_overlap() {
        let mut scene = Scene::new();
        let a = scene.create_display_object(Rect::new(0.0, 0.0, 10.0, 10.0));
        let far = scene.create_display_object(Rect::new(50.0, 50.0, 1.0, 1.0));
        let near = scene.create_display_object(Rect::new(2.0, 2.0, 1.0, 1.0));
        let nearer = scene.create_display_object(Rect::new(1.0, 1.0, 1.0, 1.0));

        assert_eq!(scene.hit_test_group(a, &[a, far, near, nearer]).unwrap(), Some(near));
        assert_eq!(scene.hit_test_group(a, &[far]).unwrap(), None);
    }

    #[test]
    fn center_uses_parent_box() {
        let mut scene = Scene::new();
        let parent = scene.create_container(Rect::new(0.0, 0.0, 100.0, 50.0));
        let child = scene.create_display_object(Rect::new(0.0, 0.0, 20.0, 10.0));

        assert!(!scene.center(child).unwrap());
        scene.add_child(parent, child).unwrap();
        assert!(scene.center(child).unwrap());
        assert_eq!(scene.node(child).unwrap().transform().x, 40.0);
        assert_eq!(scene.node(child).unwrap().transform().y, 20.0);
    }
}
