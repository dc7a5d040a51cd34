//! Grass clumps grown by a short random walk

use semiauto_map_core::{GenerationOptions, Grid};

use super::{block_count, DecorationMap, PlacementArea, PLACEMENT_ATTEMPTS};
use crate::rng::SeededRandom;

const SNAKE_MIN: i64 = 5;
const SNAKE_MAX: i64 = 15;

/// 2x2 stamp with top-left `(x, y)`; every cell must be walkable and allowed
fn fits(area: &PlacementArea, x: usize, y: usize, limit: Option<u32>) -> bool {
    [(x, y), (x + 1, y), (x, y + 1), (x + 1, y + 1)]
        .iter()
        .all(|&(cx, cy)| area.surface_at(cx, cy).is_walkable() && !area.is_forbidden(cx, cy, limit))
}

fn stamp(map: &mut DecorationMap, x: usize, y: usize, value: u32) {
    for (cx, cy) in [(x, y), (x + 1, y), (x, y + 1), (x + 1, y + 1)] {
        map.set(cx, cy, value);
    }
}

/// Keypad direction (1..=9 without 5) to a step
fn keypad_step(direction: i64) -> (i64, i64) {
    let dx = match direction {
        1 | 4 | 7 => -1,
        3 | 6 | 9 => 1,
        _ => 0,
    };
    let dy = match direction {
        1..=3 => 1,
        7..=9 => -1,
        _ => 0,
    };
    (dx, dy)
}

/// Place grass clumps, one attempt series per block
///
/// Half of the blocks (by coin flip) try to seed a 2x2 clump inside the block
/// minus its margin, then walk 5 to 15 random steps from it, stamping a clump
/// at every step that lands on eligible ground.
pub fn place_grass(
    area: &PlacementArea,
    variants: usize,
    options: &GenerationOptions,
    rng: &mut SeededRandom,
) -> DecorationMap {
    let (w, h) = (area.width(), area.height());
    let mut map = Grid::new(w, h, 0);
    if variants == 0 {
        return map;
    }

    let (bx, by) = (options.block_grass_x.max(1), options.block_grass_y.max(1));
    let margin = options.margin_grass as i64;
    let limit = options.limit_grass;

    for j in 0..block_count(h, by) {
        for i in 0..block_count(w, bx) {
            if !rng.coin() {
                continue;
            }
            let variant = rng.next_int(1, variants as i64) as u32;

            for _ in 0..PLACEMENT_ATTEMPTS {
                let x = rng.next_int((i * bx) as i64 + margin, ((i + 1) * bx) as i64 - margin);
                if x < 0 || x as usize + 1 >= w {
                    continue;
                }
                let y = rng.next_int((j * by) as i64 + margin, ((j + 1) * by) as i64 - margin);
                if y < 0 || y as usize + 1 >= h {
                    continue;
                }
                let (mut x, mut y) = (x as usize, y as usize);
                if !fits(area, x, y, limit) {
                    continue;
                }
                stamp(&mut map, x, y, variant);

                let steps = rng.next_int(SNAKE_MIN, SNAKE_MAX);
                for _ in 0..steps {
                    let mut direction = rng.next_int(1, 8);
                    if direction >= 5 {
                        direction += 1;
                    }
                    let (dx, dy) = keypad_step(direction);
                    let (nx, ny) = (x as i64 + dx, y as i64 + dy);
                    if nx < 0 || nx as usize + 1 >= w || ny < 0 || ny as usize + 1 >= h {
                        continue;
                    }
                    x = nx as usize;
                    y = ny as usize;
                    if fits(area, x, y, limit) {
                        stamp(&mut map, x, y, variant);
                    }
                }
                break;
            }
        }
    }
    map
}
