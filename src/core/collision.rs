//=========================================================================
// Tile Collision Detector
//=========================================================================
//
// Sparse grid of tile occupants keyed by integer `(col, row)`.
//
// Each directional probe picks the cell an entity is entering on that
// side:
//
//   left   (floor(x / ts),        floor(center_y / ts))
//   right  (floor(right / ts),    floor(center_y / ts))
//   above  (floor(center_x / ts), floor(y / ts))
//   below  (floor(center_x / ts), ceil(bottom / ts))
//
// Occupants are stored as plain ids; the detector never owns nodes.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use crate::core::geometry::Rect;
use crate::core::scene::NodeId;

//=== CollisionDetector ===================================================

#[derive(Debug, Clone)]
pub struct CollisionDetector {
    tiles: HashMap<(i64, i64), NodeId>,
    tile_size: f64,
}

impl CollisionDetector {
    /// # Panics
    /// If `tile_size` is not a positive finite number.
    pub fn new(tile_size: f64) -> Self {
        assert!(
            tile_size.is_finite() && tile_size > 0.0,
            "Tile size must be positive"
        );
        Self {
            tiles: HashMap::new(),
            tile_size,
        }
    }

    pub fn tile_size(&self) -> f64 {
        self.tile_size
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Stores `id` at `(col, row)`, returning the previous occupant.
    pub fn store_at(&mut self, col: i64, row: i64, id: NodeId) -> Option<NodeId> {
        self.tiles.insert((col, row), id)
    }

    pub fn tile_at(&self, col: i64, row: i64) -> Option<NodeId> {
        self.tiles.get(&(col, row)).copied()
    }

    /// Grid index containing `coord`.
    pub fn cell_of(&self, coord: f64) -> i64 {
        (coord / self.tile_size).floor() as i64
    }

    fn cell_entering(&self, coord: f64) -> i64 {
        (coord / self.tile_size).ceil() as i64
    }

    pub fn collision_left(&self, r: &Rect) -> Option<NodeId> {
        self.tile_at(self.cell_of(r.x), self.cell_of(r.center_y()))
    }

    pub fn collision_right(&self, r: &Rect) -> Option<NodeId> {
        self.tile_at(self.cell_of(r.right()), self.cell_of(r.center_y()))
    }

    pub fn collision_above(&self, r: &Rect) -> Option<NodeId> {
        self.tile_at(self.cell_of(r.center_x()), self.cell_of(r.y))
    }

    pub fn collision_below(&self, r: &Rect) -> Option<NodeId> {
        self.tile_at(self.cell_of(r.center_x()), self.cell_entering(r.bottom()))
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_overwrites_and_reports_previous() {
        let mut detector = CollisionDetector::new(16.0);
        let a = NodeId::from_raw(1);
        let b = NodeId::from_raw(2);

        assert_eq!(detector.store_at(1, 2, a), None);
        assert_eq!(detector.store_at(1, 2, b), Some(a));
        assert_eq!(detector.tile_at(1, 2), Some(b));
        assert_eq!(detector.tile_at(2, 1), None);
        assert_eq!(detector.len(), 1);
    }

    #[test]
    fn cells_floor_negative_coordinates() {
        let detector = CollisionDetector::new(16.0);
        assert_eq!(detector.cell_of(15.9), 0);
        assert_eq!(detector.cell_of(16.0), 1);
        assert_eq!(detector.cell_of(-0.5), -1);
    }

    #[test]
    fn probes_use_side_specific_cells() {
        let mut detector = CollisionDetector::new(10.0);
        let tile = NodeId::from_raw(7);
        detector.store_at(1, 1, tile);

        // Box spanning x 5..15, y 5..15: center (10, 10).
        let r = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(detector.collision_left(&r), None);
        assert_eq!(detector.collision_right(&r), Some(tile));
        assert_eq!(detector.collision_above(&r), None);
        assert_eq!(detector.collision_below(&r), None);

        // bottom 10.5 -> ceil(1.05) = 2; bottom 10 -> 1.
        detector.store_at(1, 2, tile);
        assert_eq!(detector.collision_below(&Rect::new(5.0, 0.5, 10.0, 10.0)), Some(tile));
    }

    #[test]
    #[should_panic(expected = "Tile size must be positive")]
    fn zero_tile_size_panics() {
        let _ = CollisionDetector::new(0.0);
    }
}
