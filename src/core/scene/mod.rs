//=========================================================================
// Scene Graph
//=========================================================================
//
// Arena of display nodes keyed by stable `NodeId`.
//
// Architecture:
//   Scene
//     └─ nodes: HashMap<NodeId, Node>
//          ├─ parent: Option<NodeId>      (lookup key, never owning)
//          └─ children: ChildList         (owned ids, draw order)
//
// Rendering walks top-down from a root; absolute position and opacity
// are resolved bottom-up by following parent keys. Every structural
// mutation goes through `Scene` so a child's parent key and its
// container's child list are updated together.
//
//=========================================================================

//=== Module Declarations =================================================

mod container;
mod display;
mod node;
mod render;

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, warn};

//=== Public API ==========================================================

pub use node::{Drawable, Node, NodeKind, Property, Transform};

use crate::core::asset::ImageHandle;
use crate::core::event::{Event, EventKind};
use crate::core::geometry::Rect;
use crate::core::sprite::Sprite;
use crate::core::text::TextField;
use crate::error::{SceneError, SceneResult};

//=== NodeId ==============================================================

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-wide unique node identity, assigned monotonically at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Rebuilds an id from its raw value (e.g. received from a peer).
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//=== Scene ===============================================================

/// Owner of every node in one scene graph.
///
/// A scene has no implicit root: any container can be rendered as the
/// top of a pass. [`crate::Stage`] pairs a scene with a root container
/// and a frame clock.
pub struct Scene {
    nodes: HashMap<NodeId, Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }

    //--- Construction -----------------------------------------------------

    /// Creates a plain display object: bounds, alpha and events only.
    pub fn create_display_object(&mut self, bounds: Rect) -> NodeId {
        self.insert(Node::new(Self::initial_transform(bounds)))
    }

    /// Creates an empty container.
    pub fn create_container(&mut self, bounds: Rect) -> NodeId {
        self.insert(Node::new(Self::initial_transform(bounds)).with_children())
    }

    /// Creates a sprite drawing `image` into `bounds`.
    ///
    /// Sprites are containers too; their children render above the image.
    pub fn create_sprite(&mut self, image: ImageHandle, bounds: Rect) -> NodeId {
        let node = Node::new(Self::initial_transform(bounds))
            .with_children()
            .with_drawable(Drawable::Image(Sprite::new(image)));
        self.insert(node)
    }

    /// Creates a sprite with named frame sequences.
    pub fn create_animated_sprite(&mut self, image: ImageHandle, bounds: Rect) -> NodeId {
        let node = Node::new(Self::initial_transform(bounds))
            .with_children()
            .with_drawable(Drawable::Image(Sprite::new(image)))
            .with_animation();
        self.insert(node)
    }

    /// Creates an animated sprite with movement helpers.
    pub fn create_entity(&mut self, image: ImageHandle, bounds: Rect) -> NodeId {
        let node = Node::new(Self::initial_transform(bounds))
            .with_children()
            .with_drawable(Drawable::Image(Sprite::new(image)))
            .with_animation()
            .with_motion();
        self.insert(node)
    }

    /// Creates a text label anchored at `(x, y)`.
    pub fn create_text(&mut self, text: impl Into<String>, x: f64, y: f64) -> NodeId {
        let field = TextField::new(text);
        let mut transform = Self::initial_transform(Rect::new(x, y, 0.0, 0.0));
        transform.height = field.line_height();
        let node = Node::new(transform)
            .with_drawable(Drawable::Text(field))
            .with_fixed_size();
        self.insert(node)
    }

    /// Non-finite constructor arguments fall back to zero.
    fn initial_transform(bounds: Rect) -> Transform {
        let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
        Transform::new(
            finite(bounds.x),
            finite(bounds.y),
            finite(bounds.width),
            finite(bounds.height),
        )
    }

    pub(crate) fn insert(&mut self, node: Node) -> NodeId {
        let id = node.id;
        debug!("Created {:?} node {}", node.kind(), id);
        self.nodes.insert(id, node);
        id
    }

    //--- Destruction ------------------------------------------------------

    /// Detaches `id` from its parent and drops it and its whole subtree.
    ///
    /// Returns the number of nodes removed from the arena.
    pub fn destroy(&mut self, id: NodeId) -> SceneResult<usize> {
        self.remove(id)?;

        let mut doomed = vec![id];
        doomed.extend(self.descendants(id)?);

        for victim in &doomed {
            self.nodes.remove(victim);
        }

        debug!("Destroyed node {} ({} nodes released)", id, doomed.len());
        Ok(doomed.len())
    }

    //--- Lookup -----------------------------------------------------------

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node(&self, id: NodeId) -> SceneResult<&Node> {
        self.nodes.get(&id).ok_or(SceneError::UnknownNode(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> SceneResult<&mut Node> {
        self.nodes.get_mut(&id).ok_or(SceneError::UnknownNode(id))
    }

    pub fn kind(&self, id: NodeId) -> SceneResult<NodeKind> {
        self.node(id).map(Node::kind)
    }

    pub fn parent(&self, id: NodeId) -> SceneResult<Option<NodeId>> {
        self.node(id).map(|n| n.parent)
    }

    //--- Events -----------------------------------------------------------

    /// Registers `handler` for `kind` events emitted by `id`.
    pub fn on<F>(&mut self, id: NodeId, kind: EventKind, handler: F) -> SceneResult<()>
    where
        F: Fn(&mut Scene, &Event) + 'static,
    {
        self.node_mut(id)?.emitter.on(kind, handler);
        Ok(())
    }

    pub fn will_trigger(&self, id: NodeId, kind: &EventKind) -> SceneResult<bool> {
        Ok(self.node(id)?.emitter.will_trigger(kind))
    }

    /// Emits `event` from `id`, running its handlers synchronously.
    pub fn emit(&mut self, id: NodeId, event: impl Into<Event>) -> SceneResult<()> {
        let dispatch = self.node(id)?.emitter.prepare(event.into());
        dispatch.run(self);
        Ok(())
    }

    /// Internal emit for nodes that may have been destroyed by a handler.
    pub(crate) fn emit_on(&mut self, id: NodeId, event: Event) {
        match self.nodes.get(&id) {
            Some(node) => {
                let dispatch = node.emitter.prepare(event);
                dispatch.run(self);
            }
            None => warn!("Dropped {} event for missing node {}", event.kind.name(), id),
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene").field("nodes", &self.nodes.len()).finish()
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut scene = Scene::new();
        let a = scene.create_display_object(Rect::default());
        let b = scene.create_display_object(Rect::default());
        assert!(b > a);
        assert_ne!(a, b);
    }

    #[test]
    fn kinds_follow_components() {
        let mut scene = Scene::new();
        let image = ImageHandle::empty();

        let plain = scene.create_display_object(Rect::default());
        let container = scene.create_container(Rect::default());
        let sprite = scene.create_sprite(image.clone(), Rect::default());
        let animated = scene.create_animated_sprite(image.clone(), Rect::default());
        let entity = scene.create_entity(image, Rect::default());
        let text = scene.create_text("hi", 0.0, 0.0);

        assert_eq!(scene.kind(plain).unwrap(), NodeKind::DisplayObject);
        assert_eq!(scene.kind(container).unwrap(), NodeKind::Container);
        assert_eq!(scene.kind(sprite).unwrap(), NodeKind::Sprite);
        assert_eq!(scene.kind(animated).unwrap(), NodeKind::AnimatedSprite);
        assert_eq!(scene.kind(entity).unwrap(), NodeKind::GameEntity);
        assert_eq!(scene.kind(text).unwrap(), NodeKind::TextField);
        assert!(scene.node(sprite).unwrap().is_container());
    }

    #[test]
    fn non_finite_constructor_values_become_zero() {
        let mut scene = Scene::new();
        let id = scene.create_display_object(Rect::new(f64::NAN, 4.0, f64::INFINITY, 2.0));
        let t = *scene.node(id).unwrap().transform();
        assert_eq!((t.x, t.y, t.width, t.height), (0.0, 4.0, 0.0, 2.0));
    }

    #[test]
    fn unknown_node_is_a_hard_error() {
        let mut scene = Scene::new();
        let id = scene.create_display_object(Rect::default());
        scene.destroy(id).unwrap();

        assert_eq!(scene.node(id).unwrap_err(), SceneError::UnknownNode(id));
        assert!(scene.emit(id, EventKind::Move).is_err());
    }

    #[test]
    fn emit_with_no_handlers_is_harmless() {
        let mut scene = Scene::new();
        let id = scene.create_display_object(Rect::default());

        assert!(scene.emit(id, EventKind::custom("nothing")).is_ok());
        assert!(!scene.will_trigger(id, &EventKind::custom("nothing")).unwrap());
    }

    #[test]
    fn handlers_may_emit_nested_events() {
        let mut scene = Scene::new();
        let id = scene.create_display_object(Rect::default());
        let order = Rc::new(std::cell::RefCell::new(Vec::new()));

        let outer = Rc::clone(&order);
        scene
            .on(id, EventKind::custom("outer"), move |scene, event| {
                outer.borrow_mut().push("outer-start");
                let origin = event.emitter.unwrap();
                scene.emit(origin, EventKind::custom("inner")).unwrap();
                outer.borrow_mut().push("outer-end");
            })
            .unwrap();

        let inner = Rc::clone(&order);
        scene
            .on(id, EventKind::custom("inner"), move |_, _| inner.borrow_mut().push("inner"))
            .unwrap();

        scene.emit(id, EventKind::custom("outer")).unwrap();
        assert_eq!(*order.borrow(), vec!["outer-start", "inner", "outer-end"]);
    }

    #[test]
    fn destroy_releases_subtree() {
        let mut scene = Scene::new();
        let root = scene.create_container(Rect::default());
        let branch = scene.create_container(Rect::default());
        let leaf = scene.create_display_object(Rect::default());
        scene.add_child(root, branch).unwrap();
        scene.add_child(branch, leaf).unwrap();

        let removed = Rc::new(Cell::new(0));
        let counter = Rc::clone(&removed);
        scene
            .on(root, EventKind::ChildRemoved, move |_, _| counter.set(counter.get() + 1))
            .unwrap();

        assert_eq!(scene.destroy(branch).unwrap(), 2);
        assert!(!scene.contains(leaf));
        assert_eq!(scene.num_children(root).unwrap(), 0);
        assert_eq!(removed.get(), 1);
    }
}
