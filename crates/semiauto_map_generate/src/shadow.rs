//! Wall shadows on the floor east of wall and ceiling cells

use semiauto_map_core::tile::{SHADOW_EAST_HALF, SHADOW_WEST_HALF};
use semiauto_map_core::Grid;

use crate::classify::mirror_axis;
use crate::mask::{code, Mask};

/// Shadow bits per cell; 0 means unshadowed
pub type ShadowMap = Grid<u32>;

/// Mark floor cells whose light-side neighbor is wall or ceiling
///
/// Light comes from the west. With `symmetric`, the right half is the mirror
/// image of the left, so it is scanned outward from the axis against its east
/// neighbor and marked with the east-half shadow bits.
pub fn cast_shadows(mask: &Mask, symmetric: bool) -> ShadowMap {
    let (w, h) = (mask.width(), mask.height());
    let mut shadows = Grid::new(w, h, 0);
    let west_end = if symmetric { mirror_axis(w) } else { w };

    for y in 0..h {
        for x in (1..west_end).rev() {
            if code::is_walkable(mask.get(x, y)) && code::is_solid(mask.get(x - 1, y)) {
                shadows.set(x, y, SHADOW_WEST_HALF);
            }
        }
        if symmetric {
            for x in west_end..w.saturating_sub(1) {
                if code::is_walkable(mask.get(x, y)) && code::is_solid(mask.get(x + 1, y)) {
                    shadows.set(x, y, SHADOW_EAST_HALF);
                }
            }
        }
    }
    shadows
}
