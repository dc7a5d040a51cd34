//! Binary mask construction and the dungeon cell codes

use semiauto_map_core::{Grid, TileGrid};

/// Working surface for the dungeon classification chain
pub type Mask = Grid<i8>;

/// Cell codes used on a dungeon [`Mask`]
pub mod code {
    /// Closed cell (rock) before classification
    pub const EMPTY: i8 = 0;
    /// Open cell drawn by the map author
    pub const OPEN: i8 = 1;
    /// Floor carved or confirmed by a rewrite
    pub const FLOOR: i8 = -1;
    pub const WALL: i8 = -2;
    pub const CEILING: i8 = -3;

    /// Floor in either spelling
    pub fn is_walkable(c: i8) -> bool {
        c == OPEN || c == FLOOR
    }

    /// Wall or ceiling
    pub fn is_solid(c: i8) -> bool {
        c == WALL || c == CEILING
    }
}

/// Collapse the target's tile layers into an open/closed mask
///
/// A cell is open when any layer other than the region layer is non-zero.
pub fn build_mask(target: &TileGrid) -> Mask {
    let mut mask = Grid::new(target.width, target.height, code::EMPTY);
    let layers = 0..target.layer_count().min(semiauto_map_core::layer::REGION);
    for y in 0..target.height {
        for x in 0..target.width {
            if target.column_sum(x, y, layers.clone()) != 0 {
                mask.set(x, y, code::OPEN);
            }
        }
    }
    mask
}

/// Whether `(x, y)` lies on the outermost ring of the mask
pub fn on_outer_ring(mask: &Mask, x: usize, y: usize) -> bool {
    x == 0 || y == 0 || x + 1 >= mask.width() || y + 1 >= mask.height()
}

/// Write a rewrite code into the mask
///
/// Off-grid writes are dropped. Floor is never carved into the outer ring, so
/// a map drawn with a closed border stays closed.
pub fn carve(mask: &mut Mask, x: i64, y: i64, value: i8) {
    if mask.get_signed(x, y).is_none() {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if value == code::FLOOR && on_outer_ring(mask, x, y) {
        return;
    }
    mask.set(x, y, value);
}
