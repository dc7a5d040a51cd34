//! Core data structures for semiauto_map
//!
//! This crate provides the plain data shared by the generator and the runtime:
//! - `TileGrid` - A multi-layer tile map (palette source or generation target)
//! - `Grid` - A dense 2D array used for masks, decoration maps and elevation
//! - `tile` - Host autotile id ranges and predicates
//! - `catalog` - Row layout of the palette map
//! - `GenerationOptions` - Per-map configuration snapshot

pub mod catalog;
mod grid;
mod options;
pub mod tile;

pub use grid::{layer, Grid, TileGrid, LAYER_COUNT};
pub use options::{FieldType, GenerationOptions};
