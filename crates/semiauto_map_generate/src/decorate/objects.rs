//! Walkable and unwalkable object placement

use semiauto_map_core::{GenerationOptions, Grid};

use super::{block_count, DecorationMap, PlacementArea, Surface, PLACEMENT_ATTEMPTS};
use crate::catalog::CatalogCounts;
use crate::rng::SeededRandom;

/// Object layers produced by [`place_objects`]
///
/// A 1x2 object is recorded at its top cell and also covers the cell below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMaps {
    pub walkable: DecorationMap,
    pub unwalkable_1x1: DecorationMap,
    pub unwalkable_1x2: DecorationMap,
}

impl ObjectMaps {
    fn empty(w: usize, h: usize) -> Self {
        Self {
            walkable: Grid::new(w, h, 0),
            unwalkable_1x1: Grid::new(w, h, 0),
            unwalkable_1x2: Grid::new(w, h, 0),
        }
    }
}

/// Random cell inside block `(i, j)`, or `None` when it falls off the usable
/// area (the right column and bottom row are never picked)
fn pick_cell(
    rng: &mut SeededRandom,
    (i, j): (usize, usize),
    (bx, by): (usize, usize),
    (w, h): (usize, usize),
) -> Option<(usize, usize)> {
    let x = rng.next_int((i * bx) as i64, ((i + 1) * bx) as i64);
    if x < 0 || x as usize + 1 >= w {
        return None;
    }
    let y = rng.next_int((j * by) as i64, ((j + 1) * by) as i64);
    if y < 0 || y as usize + 1 >= h {
        return None;
    }
    Some((x as usize, y as usize))
}

/// Place walkable objects, then unwalkable ones, then pull touching
/// unwalkable footprints apart
pub fn place_objects(
    area: &PlacementArea,
    counts: &CatalogCounts,
    options: &GenerationOptions,
    rng: &mut SeededRandom,
) -> ObjectMaps {
    let (w, h) = (area.width(), area.height());
    let mut maps = ObjectMaps::empty(w, h);
    let block = (options.block_object_x.max(1), options.block_object_y.max(1));
    let blocks = (block_count(w, block.0), block_count(h, block.1));

    if options.add_walkable_object && counts.walkable != 0 {
        for j in 0..blocks.1 {
            for i in 0..blocks.0 {
                for _ in 0..rng.next_int(1, 1) {
                    let mut chosen = None;
                    for _ in 0..PLACEMENT_ATTEMPTS {
                        let Some((x, y)) = pick_cell(rng, (i, j), block, (w, h)) else {
                            continue;
                        };
                        if area.is_forbidden(x, y, options.limit_walkable) {
                            continue;
                        }
                        if area.surface_at(x, y).is_walkable() {
                            chosen = Some((x, y));
                            break;
                        }
                    }
                    if let Some((x, y)) = chosen {
                        let variant = rng.next_int(1, counts.walkable as i64) as u32;
                        maps.walkable.set(x, y, variant);
                    }
                }
            }
        }
    }

    if options.add_unwalkable_object && counts.has_unwalkable() {
        for j in 0..blocks.1 {
            for i in 0..blocks.0 {
                for _ in 0..rng.next_int(1, 1) {
                    let mut chosen = None;
                    for _ in 0..PLACEMENT_ATTEMPTS {
                        let Some((x, y)) = pick_cell(rng, (i, j), block, (w, h)) else {
                            continue;
                        };
                        if area.is_forbidden(x, y, options.limit_unwalkable) {
                            continue;
                        }
                        // Drawn floor is taken two times in three, carved floor always
                        let accepted = match area.surface_at(x, y) {
                            Surface::Floor => rng.next_int(0, 2) < 2,
                            Surface::Edge => true,
                            _ => false,
                        };
                        if accepted {
                            chosen = Some((x, y));
                            break;
                        }
                    }
                    let Some((x, y)) = chosen else { continue };
                    if y == 0 {
                        continue;
                    }
                    place_unwalkable(&mut maps, counts, (x, y), rng);
                }
            }
        }
        let removed = separate_unwalkable(&mut maps.unwalkable_1x1, &mut maps.unwalkable_1x2, rng);
        if removed > 0 {
            tracing::debug!(removed, "separated touching unwalkable objects");
        }
    }

    maps
}

fn place_unwalkable(maps: &mut ObjectMaps, counts: &CatalogCounts, (x, y): (usize, usize), rng: &mut SeededRandom) {
    let single = match (counts.unwalkable_1x1 != 0, counts.unwalkable_1x2 != 0) {
        (true, false) => true,
        (false, true) => false,
        (true, true) => rng.next_int(0, 4) < 4,
        (false, false) => return,
    };
    if single {
        let variant = rng.next_int(1, counts.unwalkable_1x1 as i64) as u32;
        maps.unwalkable_1x1.set(x, y, variant);
    } else {
        let variant = rng.next_int(1, counts.unwalkable_1x2 as i64) as u32;
        maps.unwalkable_1x2.set(x, y - 1, variant);
    }
}

// ─── Footprints ─────────────────────────────────────────────────────────────

/// One unwalkable object, identified by its anchor cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Footprint {
    Single(usize, usize),
    /// Top cell of a 1x2 object
    Tall(usize, usize),
}

/// Objects covering `(x, y)`
fn occupants(singles: &DecorationMap, talls: &DecorationMap, x: usize, y: usize) -> Vec<Footprint> {
    let mut found = Vec::with_capacity(2);
    if singles.get_signed(x as i64, y as i64).is_some_and(|v| v != 0) {
        found.push(Footprint::Single(x, y));
    }
    if talls.get_signed(x as i64, y as i64).is_some_and(|v| v != 0) {
        found.push(Footprint::Tall(x, y));
    }
    if y > 0 && talls.get_signed(x as i64, y as i64 - 1).is_some_and(|v| v != 0) {
        found.push(Footprint::Tall(x, y - 1));
    }
    found
}

/// First pair of distinct objects that overlap at `(x, y)` or touch it from
/// the east or south
fn touching_pair(
    singles: &DecorationMap,
    talls: &DecorationMap,
    x: usize,
    y: usize,
) -> Option<(Footprint, Footprint)> {
    let here = occupants(singles, talls, x, y);
    if here.is_empty() {
        return None;
    }
    for (a_index, &a) in here.iter().enumerate() {
        if let Some(&b) = here[a_index + 1..].iter().find(|&&b| b != a) {
            return Some((a, b));
        }
    }
    for (nx, ny) in [(x + 1, y), (x, y + 1)] {
        for b in occupants(singles, talls, nx, ny) {
            if let Some(&a) = here.iter().find(|&&a| a != b) {
                return Some((a, b));
            }
        }
    }
    None
}

fn remove(singles: &mut DecorationMap, talls: &mut DecorationMap, footprint: Footprint) {
    match footprint {
        Footprint::Single(x, y) => singles.set(x, y, 0),
        Footprint::Tall(x, y) => talls.set(x, y, 0),
    }
}

/// Remove unwalkable objects until no two touch orthogonally
///
/// Cells are visited in row-major order. Wherever two objects overlap or sit
/// side by side, a coin decides which of the two is dropped. Returns the
/// number of objects removed.
pub fn separate_unwalkable(singles: &mut DecorationMap, talls: &mut DecorationMap, rng: &mut SeededRandom) -> usize {
    let mut removed = 0;
    for y in 0..singles.height() {
        for x in 0..singles.width() {
            while let Some((a, b)) = touching_pair(singles, talls, x, y) {
                let loser = if rng.next_int(0, 1) < 1 { a } else { b };
                remove(singles, talls, loser);
                removed += 1;
            }
        }
    }
    removed
}

/// Whether any two unwalkable objects overlap or are orthogonally adjacent
pub fn footprints_touch(singles: &DecorationMap, talls: &DecorationMap) -> bool {
    (0..singles.height())
        .any(|y| (0..singles.width()).any(|x| touching_pair(singles, talls, x, y).is_some()))
}
