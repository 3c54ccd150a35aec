//=========================================================================
// Scene Node
//=========================================================================
//
// A node is a transform plus optional capability components:
//
//   Node
//     ├─ transform   position, size, alpha, visibility
//     ├─ emitter     per-node event handlers
//     ├─ children    ChildList        (containers)
//     ├─ drawable    Sprite | Text    (visuals)
//     ├─ animation   Animation        (animated sprites)
//     └─ motion      Motion           (game entities)
//
// The concrete node kind is derived from which components are present.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::container::ChildList;
use super::{NodeId, Scene};
use crate::core::entity::Motion;
use crate::core::event::EventEmitter;
use crate::core::geometry::Rect;
use crate::core::sprite::{Animation, Sprite};
use crate::core::text::TextField;

//=== Transform ===========================================================

/// Local placement and opacity of a node, relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Local opacity, always within `[0, 1]`.
    pub alpha: f64,
    pub visible: bool,
}

impl Transform {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            alpha: 1.0,
            visible: true,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

//=== NodeKind ============================================================

/// Concrete node kind, derived from the node's components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    DisplayObject,
    Container,
    Sprite,
    AnimatedSprite,
    GameEntity,
    TextField,
}

//=== Drawable ============================================================

/// Visual component drawn during a node's render step.
#[derive(Debug)]
pub enum Drawable {
    Image(Sprite),
    Text(TextField),
}

//=== Property ============================================================

/// Assignable node property, used by dynamic (soft-validated) assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    X,
    Y,
    Width,
    Height,
    Alpha,
    Visible,
}

//=== Node ================================================================

/// A scene-graph node stored in the [`Scene`] arena.
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) transform: Transform,
    pub(crate) parent: Option<NodeId>,
    pub(crate) emitter: EventEmitter<Scene>,
    pub(crate) children: Option<ChildList>,
    pub(crate) drawable: Option<Drawable>,
    pub(crate) animation: Option<Animation>,
    pub(crate) motion: Option<Motion>,
    /// Width/height setters are ignored when set (text fields, stage root).
    pub(crate) fixed_size: bool,
}

impl Node {
    pub(crate) fn new(transform: Transform) -> Self {
        let id = NodeId::next();
        Self {
            id,
            transform,
            parent: None,
            emitter: EventEmitter::for_node(id),
            children: None,
            drawable: None,
            animation: None,
            motion: None,
            fixed_size: false,
        }
    }

    pub(crate) fn with_children(mut self) -> Self {
        self.children = Some(ChildList::default());
        self
    }

    pub(crate) fn with_drawable(mut self, drawable: Drawable) -> Self {
        self.drawable = Some(drawable);
        self
    }

    pub(crate) fn with_animation(mut self) -> Self {
        self.animation = Some(Animation::new());
        self
    }

    pub(crate) fn with_motion(mut self) -> Self {
        self.motion = Some(Motion::default());
        self
    }

    pub(crate) fn with_fixed_size(mut self) -> Self {
        self.fixed_size = true;
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Local bounding box.
    pub fn bounds(&self) -> Rect {
        self.transform.bounds()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_container(&self) -> bool {
        self.children.is_some()
    }

    pub fn kind(&self) -> NodeKind {
        match (&self.drawable, &self.animation, &self.motion) {
            (Some(Drawable::Text(_)), _, _) => NodeKind::TextField,
            (_, _, Some(_)) => NodeKind::GameEntity,
            (_, Some(_), _) => NodeKind::AnimatedSprite,
            (Some(Drawable::Image(_)), _, _) => NodeKind::Sprite,
            _ if self.children.is_some() => NodeKind::Container,
            _ => NodeKind::DisplayObject,
        }
    }

    pub fn sprite(&self) -> Option<&Sprite> {
        match &self.drawable {
            Some(Drawable::Image(sprite)) => Some(sprite),
            _ => None,
        }
    }

    pub(crate) fn sprite_mut(&mut self) -> Option<&mut Sprite> {
        match &mut self.drawable {
            Some(Drawable::Image(sprite)) => Some(sprite),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&TextField> {
        match &self.drawable {
            Some(Drawable::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub(crate) fn text_mut(&mut self) -> Option<&mut TextField> {
        match &mut self.drawable {
            Some(Drawable::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn animation(&self) -> Option<&Animation> {
        self.animation.as_ref()
    }

    pub fn motion(&self) -> Option<&Motion> {
        self.motion.as_ref()
    }

    pub fn emitter(&self) -> &EventEmitter<Scene> {
        &self.emitter
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("transform", &self.transform)
            .field("parent", &self.parent)
            .finish()
    }
}
