//=========================================================================
// Scene Events
//=========================================================================
//
// Event types emitted by scene nodes and the per-node emitter that
// dispatches them.
//
// Flow:
//   Scene::set_x() ──emit(Move)──> EventEmitter ──> handlers(&mut Scene)
//
// Dispatch is synchronous on the calling thread. A handler may emit
// further events, which are dispatched before the outer emit returns.
//
//=========================================================================

//=== Module Declarations =================================================

mod emitter;

//=== Public API ==========================================================

pub use emitter::{Dispatch, EventEmitter, Handler};

use crate::core::scene::NodeId;

//=== EventKind ===========================================================

/// Event type name used to key handler lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `x` or `y` was assigned.
    Move,
    /// `width` or `height` was assigned.
    Resize,
    /// Emitted on a container after a child is attached.
    ChildAdded,
    /// Emitted on a container after a child is detached.
    ChildRemoved,
    /// Emitted on a node after it is attached to a container.
    AddedToStage,
    /// Emitted on a node after it is detached from its container.
    RemovedFromStage,
    /// Start of a node's render step; drawing hooks attach here.
    RenderStart,
    /// End of a node's render step, after its children rendered.
    RenderDone,
    /// A pointer click landed on the node.
    Click,
    /// An animated sprite applied a new frame.
    AnimUpdate,
    /// Application-defined event.
    Custom(String),
}

impl EventKind {
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }

    /// Returns the canonical lower-case event name.
    pub fn name(&self) -> &str {
        match self {
            Self::Move => "move",
            Self::Resize => "resize",
            Self::ChildAdded => "childadded",
            Self::ChildRemoved => "childremoved",
            Self::AddedToStage => "addedtostage",
            Self::RemovedFromStage => "removedfromstage",
            Self::RenderStart => "renderstart",
            Self::RenderDone => "renderdone",
            Self::Click => "click",
            Self::AnimUpdate => "animupdate",
            Self::Custom(name) => name,
        }
    }
}

//=== Event ===============================================================

/// A single emitted event.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    /// Node that emitted the event. Stamped by the emitter on dispatch.
    pub emitter: Option<NodeId>,
    /// Second node involved, if any: the child for `ChildAdded` /
    /// `ChildRemoved`, the container for `AddedToStage` /
    /// `RemovedFromStage`.
    pub related: Option<NodeId>,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            emitter: None,
            related: None,
        }
    }

    pub fn with_related(kind: EventKind, related: NodeId) -> Self {
        Self {
            kind,
            emitter: None,
            related: Some(related),
        }
    }
}

impl From<EventKind> for Event {
    fn from(kind: EventKind) -> Self {
        Self::new(kind)
    }
}

//=========================================================================
// Tests
//=========================================================================
