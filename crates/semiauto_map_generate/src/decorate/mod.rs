//! Region-bucketed decoration placement
//!
//! The grid is cut into fixed-size blocks per category. Each block gets a
//! bounded number of random attempts at finding an eligible cell; a block
//! that runs out of attempts is left bare.
//!
//! Placers read a [`SurfaceMap`] so the same code serves dungeon and field
//! maps. Their output is a [`DecorationMap`] where a non-zero cell holds
//! `variant + 1`.

mod grass;
mod objects;
mod wallpaper;

pub use grass::place_grass;
pub use objects::{footprints_touch, place_objects, separate_unwalkable, ObjectMaps};
pub use wallpaper::{place_wallpaper, WallpaperMaps};

use semiauto_map_core::{layer, Grid, TileGrid};

use crate::mask::{code, Mask};

/// Random attempts per block before giving up
pub const PLACEMENT_ATTEMPTS: usize = 100;

/// What a decoration may stand on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Open floor the author drew
    Floor,
    /// Floor carved out of the boundary
    Edge,
    /// Wall face
    Wall,
    /// Ceiling, cliff base, border or anything else decorations skip
    Blocked,
}

impl Surface {
    pub fn is_walkable(self) -> bool {
        matches!(self, Surface::Floor | Surface::Edge)
    }
}

pub type SurfaceMap = Grid<Surface>;

/// Per-cell `variant + 1`, 0 for empty
pub type DecorationMap = Grid<u32>;

/// Surface view of a classified dungeon
///
/// `drawn` is the mask before wall classification; floor cells still holding
/// the author's open code there are [`Surface::Floor`], carved ones
/// [`Surface::Edge`].
pub fn dungeon_surface(classified: &Mask, drawn: &Mask) -> SurfaceMap {
    let mut surface = Grid::new(classified.width(), classified.height(), Surface::Blocked);
    for y in 0..classified.height() {
        for x in 0..classified.width() {
            let kind = match classified.get(x, y) {
                code::FLOOR | code::OPEN if drawn.get_signed(x as i64, y as i64) == Some(code::OPEN) => {
                    Surface::Floor
                }
                code::FLOOR | code::OPEN => Surface::Edge,
                code::WALL => Surface::Wall,
                _ => Surface::Blocked,
            };
            surface.set(x, y, kind);
        }
    }
    surface
}

/// Cells the decorations are placed on, plus the author's region tags
#[derive(Debug, Clone, Copy)]
pub struct PlacementArea<'a> {
    pub surface: &'a SurfaceMap,
    pub regions: &'a Grid<u32>,
}

impl<'a> PlacementArea<'a> {
    pub fn new(surface: &'a SurfaceMap, regions: &'a Grid<u32>) -> Self {
        debug_assert!(surface.same_extent(regions), "surface and region extents differ");
        Self { surface, regions }
    }

    pub fn width(&self) -> usize {
        self.surface.width()
    }

    pub fn height(&self) -> usize {
        self.surface.height()
    }

    pub fn surface_at(&self, x: usize, y: usize) -> Surface {
        self.surface.get_signed(x as i64, y as i64).unwrap_or(Surface::Blocked)
    }

    /// Whether the cell carries the category's forbidden region id
    pub fn is_forbidden(&self, x: usize, y: usize, limit: Option<u32>) -> bool {
        match limit {
            Some(id) => self.regions.get_signed(x as i64, y as i64) == Some(id),
            None => false,
        }
    }
}

/// Region ids of the target, one per cell
pub fn region_grid(target: &TileGrid) -> Grid<u32> {
    let mut regions = Grid::new(target.width, target.height, 0);
    for y in 0..target.height {
        for x in 0..target.width {
            regions.set(x, y, target.tile(x, y, layer::REGION));
        }
    }
    regions
}

/// Number of blocks needed to cover `extent` cells
pub(crate) fn block_count(extent: usize, block: usize) -> usize {
    extent.div_ceil(block.max(1))
}
