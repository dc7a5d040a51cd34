//! Procedural dungeon and outdoor map generation
//!
//! Turns a hand-drawn layout into a decorated tile map by copying tiles from a
//! palette map. Two archetypes are supported:
//!
//! - **Dungeon**: corner rounding, jagged passage walls, floor / wall / ceiling
//!   classification, shadows, grass, objects and wallpaper.
//! - **Field**: Perlin elevation (shield, terrace or mix), border and cliff
//!   classification, grass, objects and packed tree rows.
//!
//! Every random decision is drawn from one [`SeededRandom`] in a fixed order,
//! so a seed always yields the same map.
//!
//! # Example
//!
//! ```rust
//! use semiauto_map_core::{layer, GenerationOptions, TileGrid};
//! use semiauto_map_generate::generate_map;
//!
//! let mut palette = TileGrid::new(4, 9);
//! palette.set_tile(0, 0, layer::GROUND, 1); // floor
//! palette.set_tile(1, 0, layer::GROUND, 2); // wall
//! palette.set_tile(2, 0, layer::GROUND, 3); // ceiling
//!
//! let mut target = TileGrid::new(12, 10);
//! for y in 1..9 {
//!     for x in 1..11 {
//!         target.set_tile(x, y, layer::GROUND, 1);
//!     }
//! }
//!
//! let generated = generate_map(&palette, &mut target, &GenerationOptions::default(), 1).unwrap();
//! assert_eq!(generated.seed, 1);
//! assert!(target.data[..12 * 10].iter().all(|&t| (1..=3).contains(&t)));
//! ```

pub mod apply;
pub mod catalog;
pub mod classify;
pub mod cliff;
pub mod context;
pub mod corner;
pub mod decorate;
pub mod elevation;
pub mod jitter;
pub mod mask;
pub mod pipeline;
pub mod rng;
pub mod segment;
pub mod shadow;
pub mod trees;

use thiserror::Error;

pub use apply::{ApplyError, MergeMode, NoRender, RenderHook, SourceRect, TileApplier};
pub use catalog::{read_catalog, CatalogCounts};
pub use context::{DecorationMaps, GenerationContext};
pub use pipeline::{generate_map, generate_map_with_hook, Generated, Layout};
pub use rng::SeededRandom;

// Re-export semiauto_map_core
pub use semiauto_map_core;

/// Errors that can occur during a generation run
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Failed to copy palette tiles: {0}")]
    Apply(#[from] ApplyError),
}
