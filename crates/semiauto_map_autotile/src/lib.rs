//! Autotile shape resolution
//!
//! Recomputes the shape index of host autotiles from their 8 neighbors.
//! Neighbor flags are packed into a 9-bit mask and resolved through
//! lookup tables built at compile time, one per autotile family.
//!
//! # Example
//!
//! ```rust
//! use semiauto_map_autotile::{classify, shape_from_neighbor_mask, FloorKind};
//! use semiauto_map_core::tile::make_autotile_id;
//!
//! let grass = make_autotile_id(16, 0);
//! assert_eq!(classify(grass), FloorKind::Floor);
//! // Fully surrounded floor resolves to shape 0
//! assert_eq!(shape_from_neighbor_mask(FloorKind::Floor, 0b111_111_111), Some(0));
//! ```

pub mod patterns;
pub mod resolver;

pub use patterns::neighbors;
pub use resolver::{
    classify, neighbor_mask, refresh_autotile, refresh_autotiles, shape_from_neighbor_mask,
    FloorKind,
};

// Re-export semiauto_map_core
pub use semiauto_map_core;
