//! Tree clusters on flat outdoor ground
//!
//! A tree covers 2x2 cells and is recorded at its bottom-right cell. Each
//! horizontal run of candidate cells keeps every second cell, so neighboring
//! trees on a row never touch.

use semiauto_map_core::{GenerationOptions, Grid};

use crate::cliff::{cliff_code, CliffMap};
use crate::decorate::DecorationMap;
use crate::elevation::{quantize, salt, sample_noise};
use crate::rng::SeededRandom;

/// Noise levels the `TREE_SIZE` percentage is measured against
const DENSITY_LEVELS: i32 = 100;

/// Offsets of the survivors in a run of `len` candidates
///
/// The run is filled with `0 1` pairs. An odd run gets one extra `0` at a
/// random pair boundary, so exactly `len / 2` cells survive and no two of
/// them are adjacent.
pub fn pack_run(len: usize, rng: &mut SeededRandom) -> Vec<usize> {
    let pairs = len / 2;
    let gap = if len % 2 == 1 {
        rng.next_int(0, pairs as i64) as usize
    } else {
        pairs
    };
    (0..pairs)
        .map(|i| if i < gap { 2 * i + 1 } else { 2 * i + 2 })
        .collect()
}

/// Scatter trees over the flat cells of a classified field
///
/// A cell is a candidate when the tree noise is below `TREE_SIZE`, the whole
/// footprint is flat and outside the `LIMIT_TREE` region, and no tree in the
/// row above overlaps it.
pub fn place_trees(
    codes: &CliffMap,
    regions: &Grid<u32>,
    variants: usize,
    options: &GenerationOptions,
    seed: u32,
    rng: &mut SeededRandom,
) -> DecorationMap {
    let (w, h) = (codes.width(), codes.height());
    let mut trees = Grid::new(w, h, 0);
    if variants == 0 || w < 2 || h < 2 {
        return trees;
    }

    let raw = sample_noise(
        seed.wrapping_add(salt::TREE),
        w,
        h,
        options.tree_density_x,
        options.tree_density_y,
    );
    let density = quantize(&raw, DENSITY_LEVELS);
    let threshold = options.tree_size as i32;

    for y in 1..h {
        let row: Vec<bool> = (0..w)
            .map(|x| {
                if x == 0 || density.get(x, y) >= threshold {
                    return false;
                }
                let footprint = [(x - 1, y - 1), (x, y - 1), (x - 1, y), (x, y)];
                let clear = footprint.iter().all(|&(cx, cy)| {
                    codes.get(cx, cy) == cliff_code::FLAT
                        && options.limit_tree != Some(regions.get(cx, cy))
                });
                let overlaps = (x - 1..=(x + 1).min(w - 1)).any(|cx| trees.get(cx, y - 1) != 0);
                clear && !overlaps
            })
            .collect();

        let mut x = 0;
        while x < w {
            if !row[x] {
                x += 1;
                continue;
            }
            let start = x;
            while x < w && row[x] {
                x += 1;
            }
            for offset in pack_run(x - start, rng) {
                let variant = rng.next_int(1, variants as i64) as u32;
                trees.set(start + offset, y, variant);
            }
        }
    }
    trees
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_field(w: usize, h: usize) -> (CliffMap, Grid<u32>, GenerationOptions) {
        let options = GenerationOptions {
            tree_size: 100,
            ..Default::default()
        };
        (Grid::new(w, h, 0), Grid::new(w, h, 0), options)
    }

    #[test]
    fn test_run_packing_keeps_half() {
        let mut rng = SeededRandom::new(12);
        for len in 1..40 {
            for _ in 0..5 {
                let kept = pack_run(len, &mut rng);
                assert_eq!(kept.len(), len / 2, "run of {len}");
                assert!(kept.iter().all(|&i| i < len));
                assert!(kept.windows(2).all(|p| p[1] - p[0] >= 2), "{kept:?}");
            }
        }
    }

    #[test]
    fn test_even_run_draws_nothing() {
        let mut rng = SeededRandom::new(3);
        assert_eq!(pack_run(6, &mut rng), vec![1, 3, 5]);
        assert_eq!(rng, SeededRandom::new(3));
    }

    #[test]
    fn test_tree_footprints_never_overlap() {
        let (codes, regions, options) = open_field(24, 24);
        let mut rng = SeededRandom::new(5);
        let trees = place_trees(&codes, &regions, 2, &options, 5, &mut rng);

        let survivors: Vec<(usize, usize)> = (0..24)
            .flat_map(|y| (0..24).map(move |x| (x, y)))
            .filter(|&(x, y)| trees.get(x, y) != 0)
            .collect();
        assert!(!survivors.is_empty());
        for (i, &(ax, ay)) in survivors.iter().enumerate() {
            assert!(ax >= 1 && ay >= 1);
            for &(bx, by) in &survivors[i + 1..] {
                assert!(ax.abs_diff(bx) > 1 || ay.abs_diff(by) > 1, "({ax}, {ay}) and ({bx}, {by})");
            }
        }
    }

    #[test]
    fn test_trees_avoid_cliffs_and_limit_region() {
        let (mut codes, mut regions, mut options) = open_field(20, 20);
        for x in 0..20 {
            codes.set(x, 10, -2);
            regions.set(x, 4, 7);
        }
        options.limit_tree = Some(7);
        let mut rng = SeededRandom::new(8);
        let trees = place_trees(&codes, &regions, 1, &options, 8, &mut rng);

        for x in 0..20 {
            for y in [4, 5, 10, 11] {
                assert_eq!(trees.get(x, y), 0, "tree footprint over ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_no_variants_no_trees() {
        let (codes, regions, options) = open_field(10, 10);
        let mut rng = SeededRandom::new(1);
        assert_eq!(place_trees(&codes, &regions, 0, &options, 1, &mut rng).count(0), 100);
    }
}
