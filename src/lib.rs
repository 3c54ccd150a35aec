//=========================================================================
// Flashfire Library Root
//
// Retained-mode 2D scene graph rendered onto a host drawing surface.
//
// Responsibilities:
// - Expose the scene graph (`core::scene`) and its node components
// - Expose the stage facade (`Stage`) that owns the frame loop
// - Keep host integration (`platform`) behind small, portable types
//
// Typical usage:
// ```
// use flashfire::prelude::*;
//
// let mut stage = Stage::new();
// let image = ImageHandle::loaded("hero.png", 16.0, 16.0);
// let hero = stage
//     .scene_mut()
//     .create_sprite(image, Rect::new(10.0, 10.0, 16.0, 16.0));
// stage.add_child(hero).unwrap();
//
// let mut surface = RecordingSurface::new();
// stage.tick(&mut surface).unwrap();
// assert_eq!(surface.images().count(), 1);
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the scene graph, its components and the render and
// input contracts.
//
pub mod core;
pub mod error;
pub mod prelude;

//--- Host Integration ----------------------------------------------------
//
// `platform` converts winit window events and carries them to the stage
// over a bounded channel.
//
pub mod platform;

//--- Stage ---------------------------------------------------------------

mod stage;

//--- Public Exports ------------------------------------------------------

pub use error::{SceneError, SceneResult};
pub use stage::{Stage, StageBuilder};
