//! Floor / wall / ceiling partition of the dungeon mask

use crate::mask::{code, Mask};

/// Derive the final floor, wall and ceiling partition in place
///
/// Passes, in order:
/// 1. an empty cell directly above a wall becomes wall
/// 2. two empty cells above a floor cell become wall; three stacked walls
///    turn the top one into ceiling
/// 3. the top row becomes wall where floor sits right below it
/// 4. every remaining empty cell becomes ceiling and open cells become floor
///
/// The output holds only floor, wall and ceiling codes, and running it again
/// changes nothing.
pub fn classify_walls(mask: &mut Mask) {
    let (w, h) = (mask.width(), mask.height());

    for x in 0..w {
        for y in 0..h.saturating_sub(1) {
            if mask.get(x, y) == code::EMPTY && mask.get(x, y + 1) == code::WALL {
                mask.set(x, y, code::WALL);
            }
        }
    }

    for x in 0..w {
        for y in 0..h.saturating_sub(2) {
            if mask.get(x, y) == code::EMPTY
                && mask.get(x, y + 1) == code::EMPTY
                && mask.get(x, y + 2) == code::FLOOR
            {
                mask.set(x, y, code::WALL);
                mask.set(x, y + 1, code::WALL);
                // The new walls may complete a stack that starts one row up
                if y > 0 && mask.get(x, y - 1) == code::WALL {
                    mask.set(x, y - 1, code::CEILING);
                }
            }
            if mask.get(x, y) == code::WALL
                && mask.get(x, y + 1) == code::WALL
                && mask.get(x, y + 2) == code::WALL
            {
                mask.set(x, y, code::CEILING);
            }
        }
    }

    if h >= 2 {
        for x in 0..w {
            if mask.get(x, 0) == code::EMPTY && mask.get(x, 1) == code::FLOOR {
                mask.set(x, 0, code::WALL);
            }
        }
    }

    for y in 0..h {
        for x in 0..w {
            match mask.get(x, y) {
                code::EMPTY => mask.set(x, y, code::CEILING),
                code::OPEN => mask.set(x, y, code::FLOOR),
                _ => {}
            }
        }
    }
}

/// Mirror the left half of the mask onto the right half
pub fn mirror_left_half(mask: &mut Mask) {
    let w = mask.width();
    for y in 0..mask.height() {
        for x in w.div_ceil(2)..w {
            let source = mask.get(w - 1 - x, y);
            mask.set(x, y, source);
        }
    }
}

/// First column of the mirrored half
pub fn mirror_axis(width: usize) -> usize {
    width.div_ceil(2)
}
