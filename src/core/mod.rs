//=========================================================================
// Core
//=========================================================================
//
// Scene graph and the components assembled into its nodes.
//
// Architecture:
//   scene      arena, nodes, containers, render pass
//     ├─ event     per-node emitters
//     ├─ sprite    image + animation components
//     ├─ text      text component
//     └─ entity    motion component, multiplayer registry
//   collision, scroller, map_builder   world helpers for entities
//   render, asset, input               host-facing contracts
//
//=========================================================================

//=== Module Declarations =================================================

pub mod asset;
pub mod collision;
pub mod entity;
pub mod event;
pub mod geometry;
pub mod input;
pub mod map_builder;
pub mod render;
pub mod scene;
pub mod scroller;
pub mod sprite;
pub mod text;
