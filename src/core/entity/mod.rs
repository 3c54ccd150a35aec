//=========================================================================
// Game Entity
//=========================================================================
//
// Directional movement for animated sprites that carry a `Motion`
// component.
//
// Every move follows one pipeline:
//
//   original ─> step by move_speed ─> collision ─> bounds ─> scroller
//
//   collision (exactly one source per call):
//     Tiles      probe the cell entered, then revert or snap per side
//     Obstacles  first overlapping node, snap flush to its near edge
//     None       skipped
//
// The tentative position is resolved on a `Rect` and written back once,
// so a move emits at most one `Move` event.
//
//=========================================================================

//=== Module Declarations =================================================

mod registry;

//=== External Dependencies ===============================================

use log::trace;
use serde::{Deserialize, Serialize};
use serde_json::Value;

//=== Public API ==========================================================

pub use registry::EntityRegistry;

use crate::core::collision::CollisionDetector;
use crate::core::geometry::Rect;
use crate::core::scene::{NodeId, Scene};
use crate::core::scroller::Scroller;
use crate::error::{SceneError, SceneResult};

//=== Motion ==============================================================

/// Movement and multiplayer identity of a game entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Motion {
    pub(crate) move_speed: f64,
    pub(crate) object_id: u64,
    pub(crate) owner_id: u64,
}

impl Motion {
    pub fn move_speed(&self) -> f64 {
        self.move_speed
    }

    /// Multiplayer object id; 0 means unassigned.
    pub fn object_id(&self) -> u64 {
        self.object_id
    }

    /// Multiplayer owner id; 0 means unassigned.
    pub fn owner_id(&self) -> u64 {
        self.owner_id
    }
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            move_speed: 1.0,
            object_id: 0,
            owner_id: 0,
        }
    }
}

//=== Collision Source ====================================================

/// What a move is resolved against.
#[derive(Debug, Clone, Copy)]
pub enum CollisionSource<'a> {
    None,
    Tiles(&'a CollisionDetector),
    Obstacles(&'a [NodeId]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    fn sign(self) -> f64 {
        match self {
            Direction::Left | Direction::Up => -1.0,
            Direction::Right | Direction::Down => 1.0,
        }
    }
}

//=== Movement ============================================================

/// Outcome of one directional move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Movement {
    /// Tile or obstacle that stopped the move.
    pub blocked_by: Option<NodeId>,
    /// The bounds clamp adjusted the result.
    pub clamped: bool,
    /// The scroller shifted its viewport.
    pub scrolled: bool,
    pub x: f64,
    pub y: f64,
}

//=== EntityData ==========================================================

/// Position and identity snapshot exchanged with a multiplayer peer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityData {
    pub object_id: u64,
    pub owner_id: u64,
    pub node_id: u64,
    pub x: f64,
    pub y: f64,
}

//=== Scene Operations ====================================================

impl Scene {
    pub fn motion(&self, id: NodeId) -> SceneResult<&Motion> {
        self.node(id)?
            .motion
            .as_ref()
            .ok_or(SceneError::NotAnEntity(id))
    }

    pub(crate) fn motion_mut(&mut self, id: NodeId) -> SceneResult<&mut Motion> {
        self.node_mut(id)?
            .motion
            .as_mut()
            .ok_or(SceneError::NotAnEntity(id))
    }

    pub fn move_speed(&self, id: NodeId) -> SceneResult<f64> {
        self.motion(id).map(Motion::move_speed)
    }

    /// Stores `|speed|`. Non-finite values are ignored.
    pub fn set_move_speed(&mut self, id: NodeId, speed: f64) -> SceneResult<bool> {
        let motion = self.motion_mut(id)?;
        if !speed.is_finite() {
            return Ok(false);
        }
        motion.move_speed = speed.abs();
        Ok(true)
    }

    pub fn set_owner_id(&mut self, id: NodeId, owner_id: u64) -> SceneResult<()> {
        self.motion_mut(id)?.owner_id = owner_id;
        Ok(())
    }

    pub fn get_data(&self, id: NodeId) -> SceneResult<EntityData> {
        let motion = self.motion(id)?;
        let t = self.node(id)?.transform();
        Ok(EntityData {
            object_id: motion.object_id,
            owner_id: motion.owner_id,
            node_id: id.raw(),
            x: t.x,
            y: t.y,
        })
    }

    /// Applies `x` / `y` from a peer update. Non-numeric fields are ignored.
    pub fn update_data(&mut self, id: NodeId, data: &Value) -> SceneResult<bool> {
        self.motion(id)?;
        let mut changed = false;
        if let Some(x) = data.get("x").and_then(Value::as_f64) {
            changed |= self.set_x(id, x)?;
        }
        if let Some(y) = data.get("y").and_then(Value::as_f64) {
            changed |= self.set_y(id, y)?;
        }
        Ok(changed)
    }

    //--- Movement ---------------------------------------------------------

    pub fn move_left(
        &mut self,
        id: NodeId,
        collision: CollisionSource<'_>,
        bounds: Option<Rect>,
        scroller: Option<&mut Scroller>,
    ) -> SceneResult<Movement> {
        self.move_entity(id, Direction::Left, collision, bounds, scroller)
    }

    pub fn move_right(
        &mut self,
        id: NodeId,
        collision: CollisionSource<'_>,
        bounds: Option<Rect>,
        scroller: Option<&mut Scroller>,
    ) -> SceneResult<Movement> {
        self.move_entity(id, Direction::Right, collision, bounds, scroller)
    }

    pub fn move_up(
        &mut self,
        id: NodeId,
        collision: CollisionSource<'_>,
        bounds: Option<Rect>,
        scroller: Option<&mut Scroller>,
    ) -> SceneResult<Movement> {
        self.move_entity(id, Direction::Up, collision, bounds, scroller)
    }

    pub fn move_down(
        &mut self,
        id: NodeId,
        collision: CollisionSource<'_>,
        bounds: Option<Rect>,
        scroller: Option<&mut Scroller>,
    ) -> SceneResult<Movement> {
        self.move_entity(id, Direction::Down, collision, bounds, scroller)
    }

    /// Shared pipeline behind the four directional moves.
    pub fn move_entity(
        &mut self,
        id: NodeId,
        direction: Direction,
        collision: CollisionSource<'_>,
        bounds: Option<Rect>,
        scroller: Option<&mut Scroller>,
    ) -> SceneResult<Movement> {
        let speed = self.motion(id)?.move_speed;
        let original = self.node(id)?.bounds();
        let delta = speed * direction.sign();

        let mut r = original;
        if direction.is_horizontal() {
            r.x += delta;
        } else {
            r.y += delta;
        }

        let blocked_by = match collision {
            CollisionSource::None => None,
            CollisionSource::Tiles(detector) => {
                self.resolve_tiles(detector, direction, original, &mut r)
            }
            CollisionSource::Obstacles(candidates) => {
                self.resolve_obstacles(id, candidates, direction, &mut r)?
            }
        };

        let clamped = bounds.is_some_and(|b| clamp_leading_edge(&b, direction, &mut r));

        if direction.is_horizontal() {
            if r.x != original.x {
                self.set_x(id, r.x)?;
            }
        } else if r.y != original.y {
            self.set_y(id, r.y)?;
        }

        // Only an unobstructed step that moved the entity forward drags the camera.
        let advanced = if direction.is_horizontal() {
            (r.x - original.x) * delta > 0.0
        } else {
            (r.y - original.y) * delta > 0.0
        };
        let mut scrolled = false;
        if let Some(scroller) = scroller {
            if blocked_by.is_none() && advanced {
                scrolled = if direction.is_horizontal() {
                    scroller.scroll_x_with(&r, delta)
                } else {
                    scroller.scroll_y_with(&r, delta)
                };
                scroller.update(self)?;
            }
        }

        trace!("Moved {} {:?} to ({}, {})", id, direction, r.x, r.y);
        Ok(Movement {
            blocked_by,
            clamped,
            scrolled,
            x: r.x,
            y: r.y,
        })
    }

    fn resolve_tiles(
        &self,
        detector: &CollisionDetector,
        direction: Direction,
        original: Rect,
        r: &mut Rect,
    ) -> Option<NodeId> {
        let hit = match direction {
            Direction::Left => detector.collision_left(r),
            Direction::Right => detector.collision_right(r),
            Direction::Up => detector.collision_above(r),
            Direction::Down => detector.collision_below(r),
        }?;

        match direction {
            Direction::Left => {
                r.x = self
                    .get(hit)
                    .map_or(original.x, |tile| tile.transform().right());
            }
            Direction::Right => r.x = original.x,
            Direction::Up => r.y = original.y + 1.0,
            Direction::Down => r.y = original.y,
        }
        Some(hit)
    }

    fn resolve_obstacles(
        &self,
        id: NodeId,
        candidates: &[NodeId],
        direction: Direction,
        r: &mut Rect,
    ) -> SceneResult<Option<NodeId>> {
        for &other in candidates {
            if other == id {
                continue;
            }
            let hit = self.node(other)?.bounds();
            if !hit.intersects(r) {
                continue;
            }
            match direction {
                Direction::Left => r.x = hit.right(),
                Direction::Right => r.x = hit.x - r.width,
                Direction::Up => r.y = hit.bottom(),
                Direction::Down => r.y = hit.y - r.height,
            }
            return Ok(Some(other));
        }
        Ok(None)
    }
}

/// Keeps the edge facing `direction` inside `bounds`.
fn clamp_leading_edge(bounds: &Rect, direction: Direction, r: &mut Rect) -> bool {
    match direction {
        Direction::Left if r.x < bounds.x => r.x = bounds.x,
        Direction::Right if r.right() > bounds.right() => r.x = bounds.right() - r.width,
        Direction::Up if r.y < bounds.y => r.y = bounds.y,
        Direction::Down if r.bottom() > bounds.bottom() => r.y = bounds.bottom() - r.height,
        _ => return false,
    }
    true
}

//=========================================================================
// Tests
//=========================================================================
