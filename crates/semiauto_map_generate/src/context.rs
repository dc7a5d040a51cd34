//! Per-run state threaded through every stage

use semiauto_map_core::{GenerationOptions, Grid, TileGrid};

use crate::catalog::{read_catalog, CatalogCounts};
use crate::decorate::{region_grid, DecorationMap};
use crate::rng::SeededRandom;
use crate::shadow::ShadowMap;

/// What one generation run reads, plus the generator every stage draws from
///
/// Stages take the context by reference and return their own maps; the only
/// state they share is `rng`, which is drawn from in one fixed order.
#[derive(Debug)]
pub struct GenerationContext<'a> {
    pub palette: &'a TileGrid,
    pub options: &'a GenerationOptions,
    pub catalog: CatalogCounts,
    /// Author-placed region ids of the target
    pub regions: Grid<u32>,
    pub seed: u32,
    pub rng: SeededRandom,
}

impl<'a> GenerationContext<'a> {
    /// Prepare a run for `target`, seeded by `SEED` or the target's map id
    pub fn new(palette: &'a TileGrid, target: &TileGrid, options: &'a GenerationOptions, map_id: u32) -> Self {
        let seed = options.seed_for(map_id);
        Self {
            palette,
            options,
            catalog: read_catalog(palette),
            regions: region_grid(target),
            seed,
            rng: SeededRandom::new(seed),
        }
    }

    pub fn width(&self) -> usize {
        self.regions.width()
    }

    pub fn height(&self) -> usize {
        self.regions.height()
    }
}

/// Every decoration produced by a run, waiting to be committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecorationMaps {
    pub grass: DecorationMap,
    pub walkable: DecorationMap,
    pub unwalkable_1x1: DecorationMap,
    pub unwalkable_1x2: DecorationMap,
    pub wallpaper_1x1: DecorationMap,
    pub wallpaper_1x2: DecorationMap,
    pub trees: DecorationMap,
    pub shadow: ShadowMap,
}

impl DecorationMaps {
    pub fn empty(width: usize, height: usize) -> Self {
        let blank = Grid::new(width, height, 0);
        Self {
            grass: blank.clone(),
            walkable: blank.clone(),
            unwalkable_1x1: blank.clone(),
            unwalkable_1x2: blank.clone(),
            wallpaper_1x1: blank.clone(),
            wallpaper_1x2: blank.clone(),
            trees: blank.clone(),
            shadow: blank,
        }
    }

    /// Placed decorations per category, for logging
    pub fn counts(&self) -> [(&'static str, usize); 8] {
        let placed = |map: &DecorationMap| map.values().filter(|&v| v != 0).count();
        [
            ("grass", placed(&self.grass)),
            ("walkable", placed(&self.walkable)),
            ("unwalkable_1x1", placed(&self.unwalkable_1x1)),
            ("unwalkable_1x2", placed(&self.unwalkable_1x2)),
            ("wallpaper_1x1", placed(&self.wallpaper_1x1)),
            ("wallpaper_1x2", placed(&self.wallpaper_1x2)),
            ("trees", placed(&self.trees)),
            ("shadow", placed(&self.shadow)),
        ]
    }
}
