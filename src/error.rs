//=========================================================================
// Scene Errors
//=========================================================================
//
// Hard failures raised by scene-graph operations.
//
// Two tiers exist in the scene graph:
//   - soft: a mistyped or non-finite property value is dropped silently
//   - hard: a structural contract violation returns `SceneError`
//
// Hard failures are programmer errors. Nothing in the crate retries them.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::scene::NodeId;

//=== SceneError ==========================================================

/// Structural contract violation reported by a scene operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    /// The id does not name a live node in this scene.
    #[error("node {0} does not exist in this scene")]
    UnknownNode(NodeId),

    /// A child operation targeted a node without a child list.
    #[error("node {0} is not a container")]
    NotAContainer(NodeId),

    /// A sprite operation targeted a node without an image.
    #[error("node {0} is not a sprite")]
    NotASprite(NodeId),

    /// An animation operation targeted a node without animation state.
    #[error("node {0} is not an animated sprite")]
    NotAnimated(NodeId),

    /// A movement or registry operation targeted a non-entity.
    #[error("node {0} is not a game entity")]
    NotAnEntity(NodeId),

    /// A text operation targeted a node that is not a text field.
    #[error("node {0} is not a text field")]
    NotAText(NodeId),

    /// Attaching the child would make a node its own ancestor.
    #[error("attaching {child} under {parent} would create a cycle")]
    CyclicAttach { parent: NodeId, child: NodeId },

    /// The frame list handed to `add_animation` is unusable.
    #[error("animation '{name}' is malformed: {reason}")]
    MalformedAnimation { name: String, reason: String },

    /// Scroller world bounds or viewport are out of range.
    #[error("invalid scroller bounds: {0}")]
    InvalidBounds(String),
}

/// Result alias for scene-graph operations.
pub type SceneResult<T> = Result<T, SceneError>;

//=========================================================================
// Tests
//=========================================================================
