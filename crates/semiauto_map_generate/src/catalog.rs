//! Variant counting over the palette map

use semiauto_map_core::catalog::{self, CatalogBand, CATALOG_LAYERS};
use semiauto_map_core::TileGrid;

/// Number of variants available per decoration category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogCounts {
    pub grass: usize,
    pub walkable: usize,
    pub unwalkable_1x1: usize,
    pub unwalkable_1x2: usize,
    pub wallpaper_1x1: usize,
    pub wallpaper_1x2: usize,
    pub trees: usize,
}

impl CatalogCounts {
    pub fn has_unwalkable(&self) -> bool {
        self.unwalkable_1x1 != 0 || self.unwalkable_1x2 != 0
    }

    pub fn has_wallpaper(&self) -> bool {
        self.wallpaper_1x1 != 0 || self.wallpaper_1x2 != 0
    }
}

/// Count the variants of every category in the palette
pub fn read_catalog(palette: &TileGrid) -> CatalogCounts {
    CatalogCounts {
        grass: count_band(palette, catalog::GRASS),
        walkable: count_band(palette, catalog::WALKABLE_1X1),
        unwalkable_1x1: count_band(palette, catalog::UNWALKABLE_1X1),
        unwalkable_1x2: count_band(palette, catalog::UNWALKABLE_1X2),
        wallpaper_1x1: count_band(palette, catalog::WALLPAPER_1X1),
        wallpaper_1x2: count_band(palette, catalog::WALLPAPER_1X2),
        trees: count_band(palette, catalog::TREE_2X2),
    }
}

/// Count consecutive non-empty variants in a band, stopping at the first empty one
pub fn count_band(palette: &TileGrid, band: CatalogBand) -> usize {
    let mut count = 0;
    loop {
        let column = band.column_of(count);
        if column + band.width > palette.width || band.row + band.height > palette.height {
            break;
        }
        let filled = (column..column + band.width).any(|x| {
            (band.row..band.row + band.height)
                .any(|y| palette.column_sum(x, y, 0..CATALOG_LAYERS) != 0)
        });
        if !filled {
            break;
        }
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use semiauto_map_core::layer;

    fn palette() -> TileGrid {
        TileGrid::new(8, 13)
    }

    #[test]
    fn test_empty_palette_has_no_variants() {
        assert_eq!(read_catalog(&palette()), CatalogCounts::default());
    }

    #[test]
    fn test_counting_stops_at_first_empty_column() {
        let mut p = palette();
        p.set_tile(0, 1, layer::GROUND_UPPER, 2900);
        p.set_tile(1, 1, layer::GROUND_UPPER, 2948);
        // Gap at column 2, column 3 is ignored
        p.set_tile(3, 1, layer::GROUND_UPPER, 2996);

        assert_eq!(read_catalog(&p).grass, 2);
    }

    #[test]
    fn test_any_layer_counts() {
        let mut p = palette();
        p.set_tile(0, 2, layer::UPPER_2, 40);
        p.set_tile(1, 2, layer::SHADOW, 5);

        assert_eq!(read_catalog(&p).walkable, 2);
    }

    #[test]
    fn test_tall_band_reads_both_rows() {
        let mut p = palette();
        p.set_tile(0, 4, layer::UPPER_1, 60);
        // Only the bottom row is drawn for the second variant
        p.set_tile(1, 5, layer::UPPER_1, 68);

        let counts = read_catalog(&p);
        assert_eq!(counts.unwalkable_1x2, 2);
        assert_eq!(counts.unwalkable_1x1, 0);
        assert!(counts.has_unwalkable());
    }

    #[test]
    fn test_trees_are_counted_in_column_pairs() {
        let mut p = palette();
        for x in 0..4 {
            p.set_tile(x, 11, layer::UPPER_1, 100 + x as u32);
        }
        p.set_tile(5, 12, layer::UPPER_1, 200);

        assert_eq!(read_catalog(&p).trees, 3);
    }

    #[test]
    fn test_palette_narrower_than_band_stops_cleanly() {
        let mut p = TileGrid::new(1, 13);
        p.set_tile(0, 11, layer::UPPER_1, 1);
        assert_eq!(read_catalog(&p).trees, 0);
    }
}
