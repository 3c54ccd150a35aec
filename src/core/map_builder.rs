//=========================================================================
// Map Builder
//=========================================================================
//
// Turns a 2D matrix of tile codes into tile nodes plus a collision grid.
//
// For every cell whose code has a registered constructor:
//   create ─> place at (col * cell, row * cell) ─> store in detector
//          ─> lift tall tiles so their bottom sits on the cell
//          ─> attach to container ─> on_tile(scene, tile, col, row)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::hash::Hash;

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::collision::CollisionDetector;
use crate::core::scene::{NodeId, Scene};
use crate::error::SceneResult;

//=== Tile Types ==========================================================

/// Builds one tile node in the scene and returns its id.
pub type TileConstructor = Box<dyn Fn(&mut Scene) -> NodeId>;

/// Tile code -> constructor table.
pub struct TileSet<K> {
    constructors: HashMap<K, TileConstructor>,
}

impl<K: Eq + Hash> TileSet<K> {
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    pub fn register<F>(&mut self, code: K, constructor: F) -> &mut Self
    where
        F: Fn(&mut Scene) -> NodeId + 'static,
    {
        self.constructors.insert(code, Box::new(constructor));
        self
    }

    pub fn get(&self, code: &K) -> Option<&TileConstructor> {
        self.constructors.get(code)
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl<K: Eq + Hash> Default for TileSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Grid Builder ========================================================

/// Builds the tiles of `matrix` into `container`.
///
/// Rows may be ragged. Codes with no constructor leave the cell empty.
///
/// # Panics
/// If `cell_size` is not a positive finite number.
pub fn build_grid<K, F>(
    scene: &mut Scene,
    matrix: &[Vec<K>],
    tile_types: &TileSet<K>,
    cell_size: f64,
    container: NodeId,
    mut on_tile: F,
) -> SceneResult<CollisionDetector>
where
    K: Eq + Hash,
    F: FnMut(&mut Scene, NodeId, usize, usize),
{
    let mut detector = CollisionDetector::new(cell_size);
    scene.num_children(container)?;

    for (row, cells) in matrix.iter().enumerate() {
        for (col, code) in cells.iter().enumerate() {
            let Some(constructor) = tile_types.get(code) else {
                continue;
            };

            let tile = constructor(scene);
            scene.set_position(tile, col as f64 * cell_size, row as f64 * cell_size)?;
            detector.store_at(col as i64, row as i64, tile);

            let height = scene.node(tile)?.transform().height;
            if height > cell_size {
                let y = scene.node(tile)?.transform().y;
                scene.set_y(tile, y - (height - cell_size))?;
            }

            scene.add_child(container, tile)?;
            on_tile(scene, tile, col, row);
        }
    }

    debug!("Built tile grid with {} tiles", detector.len());
    Ok(detector)
}

//=========================================================================
// Tests
//=========================================================================
