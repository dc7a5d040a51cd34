//! Per-map generation options
//!
//! Options arrive pre-parsed from the host (map note tags, a TOML table, or
//! JSON). Keys use the host's upper-case spelling, e.g. `SEED`, `ADD_GRASS`,
//! `BLOCK_OBJECT_X`, `LIMIT_UNWALKABLE`, `FIELD_TYPE`.

use serde::{Deserialize, Serialize};

/// Outdoor elevation generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Radial noise hills
    Shield,
    /// Horizontal bands rising toward the top of the map
    Terrace,
    /// Terrace bands with shield deviations
    Mix,
}

/// Immutable configuration snapshot for one target map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct GenerationOptions {
    /// Explicit seed. When absent the target map id is used.
    pub seed: Option<u32>,

    // Category switches
    pub add_grass: bool,
    pub add_walkable_object: bool,
    pub add_unwalkable_object: bool,
    pub add_wallpaper: bool,
    pub add_shadow: bool,
    pub add_tree: bool,

    // Region block sizes
    pub block_grass_x: usize,
    pub block_grass_y: usize,
    /// Cells kept clear at the start and end of each grass block
    pub margin_grass: usize,
    pub block_object_x: usize,
    pub block_object_y: usize,
    pub block_wallpaper_x: usize,
    pub block_wallpaper_y: usize,

    // Forbidden region ids
    pub limit_grass: Option<u32>,
    pub limit_walkable: Option<u32>,
    pub limit_unwalkable: Option<u32>,
    pub limit_wallpaper: Option<u32>,
    pub limit_tree: Option<u32>,

    // Outdoor relief
    pub field_type: Option<FieldType>,
    pub shield_relief_x: u32,
    pub shield_relief_y: u32,
    pub shield_depth: u32,
    pub terrace_depth: u32,
    pub terrace_relief_x: u32,
    pub terrace_deform: u32,
    pub tree_density_x: u32,
    pub tree_density_y: u32,
    /// Percentage of the tree noise range that becomes tree candidates
    pub tree_size: u32,

    /// Mirror the left half of a dungeon onto the right half
    pub dungeon_symmetry: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            seed: None,
            add_grass: true,
            add_walkable_object: true,
            add_unwalkable_object: true,
            add_wallpaper: true,
            add_shadow: true,
            add_tree: true,
            block_grass_x: 12,
            block_grass_y: 12,
            margin_grass: 2,
            block_object_x: 7,
            block_object_y: 7,
            block_wallpaper_x: 5,
            block_wallpaper_y: 5,
            limit_grass: None,
            limit_walkable: None,
            limit_unwalkable: Some(1),
            limit_wallpaper: None,
            limit_tree: None,
            field_type: None,
            shield_relief_x: 20,
            shield_relief_y: 20,
            shield_depth: 3,
            terrace_depth: 3,
            terrace_relief_x: 16,
            terrace_deform: 3,
            tree_density_x: 8,
            tree_density_y: 8,
            tree_size: 40,
            dungeon_symmetry: false,
        }
    }
}

impl GenerationOptions {
    /// Seed for a target map: the explicit `SEED` or the map's own id
    pub fn seed_for(&self, map_id: u32) -> u32 {
        self.seed.unwrap_or(map_id)
    }

    /// Whether this map follows the outdoor chain
    pub fn is_field(&self) -> bool {
        self.field_type.is_some()
    }

    /// Set an explicit seed
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Select the outdoor chain with the given generator
    pub fn with_field_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }
}
