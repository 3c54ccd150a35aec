//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use flashfire::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Stage
pub use crate::stage::{Stage, StageBuilder};

// Errors
pub use crate::error::{SceneError, SceneResult};

// Scene graph
pub use crate::core::event::{Event, EventKind};
pub use crate::core::geometry::Rect;
pub use crate::core::scene::{NodeId, NodeKind, Property, Scene, Transform};

// Components
pub use crate::core::entity::{CollisionSource, EntityData, EntityRegistry, Movement};
pub use crate::core::sprite::{Animation, Frame, Sprite};
pub use crate::core::text::TextField;

// World helpers
pub use crate::core::collision::CollisionDetector;
pub use crate::core::map_builder::{build_grid, TileSet};
pub use crate::core::scroller::Scroller;

// Assets and rendering
pub use crate::core::asset::{AssetLoader, ImageCache, ImageHandle};
pub use crate::core::render::{DrawCommand, RecordingSurface, RenderContext, RenderSurface};

// Input
pub use crate::core::input::{InputEvent, KeyCode, KeyState, MouseButton};
pub use crate::platform::{InputProcessor, InputSender};
