//! Palette map layout
//!
//! The palette is an ordinary map authored by hand. Each decoration category
//! occupies a fixed band of rows; variants are laid out left to right and the
//! first all-empty column ends the band.

/// Row holding floor, wall and ceiling samples
pub const BASE_ROW: usize = 0;
pub const FLOOR_COLUMN: usize = 0;
pub const WALL_COLUMN: usize = 1;
pub const CEILING_COLUMN: usize = 2;

/// Row holding flat ground and the border variants (column = border code)
pub const FIELD_BORDER_ROW: usize = 9;
/// Row holding cliff variants (column = `-code - 1`)
pub const FIELD_CLIFF_ROW: usize = 10;

/// Number of layers inspected when counting variants (region layer excluded)
pub const CATALOG_LAYERS: usize = 6;

/// A band of palette rows holding one decoration category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogBand {
    /// First palette row of the band
    pub row: usize,
    /// Rows per variant (1 or 2)
    pub height: usize,
    /// Columns per variant (1, or 2 for trees)
    pub width: usize,
}

impl CatalogBand {
    /// Palette column of the given zero-based variant
    pub fn column_of(&self, variant: usize) -> usize {
        variant * self.width
    }
}

pub const GRASS: CatalogBand = CatalogBand { row: 1, height: 1, width: 1 };
pub const WALKABLE_1X1: CatalogBand = CatalogBand { row: 2, height: 1, width: 1 };
pub const UNWALKABLE_1X1: CatalogBand = CatalogBand { row: 3, height: 1, width: 1 };
pub const UNWALKABLE_1X2: CatalogBand = CatalogBand { row: 4, height: 2, width: 1 };
pub const WALLPAPER_1X1: CatalogBand = CatalogBand { row: 6, height: 1, width: 1 };
pub const WALLPAPER_1X2: CatalogBand = CatalogBand { row: 7, height: 2, width: 1 };
pub const TREE_2X2: CatalogBand = CatalogBand { row: 11, height: 2, width: 2 };
