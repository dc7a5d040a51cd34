//! Shape resolution against a [`TileGrid`]

use semiauto_map_core::tile::{
    autotile_kind, is_autotile, is_floor_type_autotile, is_roof, is_same_kind, is_wall, is_water,
    is_waterfall, make_autotile_id,
};
use semiauto_map_core::TileGrid;

use crate::patterns::{neighbors, FLOOR_TABLE, WALL_TABLE, WATERFALL_TABLE};

/// Autotile family of a tile id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorKind {
    /// 47-shape family: ground, water, wall tops
    Floor,
    /// 16-shape family: wall sides and roofs
    Wall,
    /// 4-shape family
    Waterfall,
    /// Static tile, never reshaped
    NotAutotile,
}

/// Classify a center tile into its autotile family
pub fn classify(center_id: u32) -> FloorKind {
    if !is_autotile(center_id) {
        FloorKind::NotAutotile
    } else if is_floor_type_autotile(center_id) {
        FloorKind::Floor
    } else if is_wall(center_id) || is_roof(center_id) {
        FloorKind::Wall
    } else {
        FloorKind::Waterfall
    }
}

/// Apply corner optimization to a floor mask
///
/// A diagonal neighbor only counts when both adjacent edges match.
fn optimize_floor_mask(mask: u16) -> u16 {
    use neighbors::*;

    let mut result = mask;
    if mask & N == 0 {
        result &= !(NW | NE);
    }
    if mask & W == 0 {
        result &= !(NW | SW);
    }
    if mask & E == 0 {
        result &= !(NE | SE);
    }
    if mask & S == 0 {
        result &= !(SW | SE);
    }
    result
}

/// Resolve a shape index from a packed neighbor mask
///
/// Returns `None` for static tiles and for masks no shape represents.
pub fn shape_from_neighbor_mask(kind: FloorKind, mask: u16) -> Option<u8> {
    use neighbors::*;

    let mask = mask & ALL;
    let shape = match kind {
        FloorKind::Floor => FLOOR_TABLE[optimize_floor_mask(mask) as usize],
        FloorKind::Wall => WALL_TABLE[(mask & !CORNERS) as usize],
        FloorKind::Waterfall => WATERFALL_TABLE[(mask & (W | C | E)) as usize],
        FloorKind::NotAutotile => return None,
    };
    u8::try_from(shape).ok()
}

/// Build the packed same-kind mask around `(x, y)` on layer `z`
///
/// Off-grid neighbors count as matching. Waterfalls above or below a water
/// center also count as matching.
pub fn neighbor_mask(grid: &TileGrid, x: usize, y: usize, z: usize) -> u16 {
    let center = grid.tile(x, y, z);
    let mut mask = 0u16;

    for dy in -1i64..=1 {
        for dx in -1i64..=1 {
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            let same = if !grid.contains(nx, ny) {
                true
            } else {
                let tile = grid.tile(nx as usize, ny as usize, z);
                (dy != 0 && is_water(center) && is_waterfall(tile)) || is_same_kind(center, tile)
            };
            mask = (mask << 1) | same as u16;
        }
    }
    mask
}

/// Recompute the shape of a single autotile in place
pub fn refresh_autotile(grid: &mut TileGrid, x: usize, y: usize, z: usize) {
    let center = grid.tile(x, y, z);
    let Some(kind_id) = autotile_kind(center) else {
        return;
    };
    let mask = neighbor_mask(grid, x, y, z);
    if let Some(shape) = shape_from_neighbor_mask(classify(center), mask) {
        grid.set_tile(x, y, z, make_autotile_id(kind_id, shape as u32));
    }
}

/// Recompute the 3x3 neighborhood around `(x, y)` on layer `z`
///
/// Cells are refreshed in row-major order; later cells see earlier results.
pub fn refresh_autotiles(grid: &mut TileGrid, x: usize, y: usize, z: usize) {
    for dy in -1i64..=1 {
        for dx in -1i64..=1 {
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            if grid.contains(nx, ny) {
                refresh_autotile(grid, nx as usize, ny as usize, z);
            }
        }
    }
}
