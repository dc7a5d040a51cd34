//! Tile grids and dense 2D working arrays

use serde::{Deserialize, Serialize};

/// Number of tile layers stored per cell, including the region layer.
pub const LAYER_COUNT: usize = 6;

/// Layer indices inside a [`TileGrid`].
pub mod layer {
    /// Ground autotiles (floor, wall, ceiling)
    pub const GROUND: usize = 0;
    /// Ground overlay autotiles (grass, moss, puddles)
    pub const GROUND_UPPER: usize = 1;
    /// First upper layer (walkable and unwalkable objects)
    pub const UPPER_1: usize = 2;
    /// Second upper layer
    pub const UPPER_2: usize = 3;
    /// Shadow bits
    pub const SHADOW: usize = 4;
    /// Author-placed region ids
    pub const REGION: usize = 5;
}

/// A multi-layer tile map.
///
/// Tile codes are stored layer-major: `(z * height + y) * width + x`.
/// Zero means empty. Fields not used by the generator are carried in
/// `extra` so a map loaded from JSON is written back unchanged apart
/// from its tile data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u32>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TileGrid {
    /// Create an empty grid with all layers zeroed
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * LAYER_COUNT],
            extra: serde_json::Map::new(),
        }
    }

    /// Number of layers actually present in `data`
    pub fn layer_count(&self) -> usize {
        let plane = self.width * self.height;
        if plane == 0 {
            0
        } else {
            self.data.len() / plane
        }
    }

    /// Check if a signed coordinate lies inside the grid
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn index(&self, x: usize, y: usize, z: usize) -> usize {
        (z * self.height + y) * self.width + x
    }

    /// Get the tile at a position, or 0 when out of range
    pub fn tile(&self, x: usize, y: usize, z: usize) -> u32 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data.get(self.index(x, y, z)).copied().unwrap_or(0)
    }

    /// Set the tile at a position. Out-of-range writes are ignored.
    pub fn set_tile(&mut self, x: usize, y: usize, z: usize, id: u32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.index(x, y, z);
        if let Some(slot) = self.data.get_mut(idx) {
            *slot = id;
        }
    }

    /// Sum of all tile codes in `layers` at a position
    pub fn column_sum(&self, x: usize, y: usize, layers: std::ops::Range<usize>) -> u64 {
        layers.map(|z| self.tile(x, y, z) as u64).sum()
    }

    /// Region id at a position
    pub fn region(&self, x: usize, y: usize) -> u32 {
        self.tile(x, y, layer::REGION)
    }

    /// Copy a rectangle of every layer into a flat `[z][row][col]` vector
    pub fn read_rect(&self, x: usize, y: usize, w: usize, h: usize) -> Vec<u32> {
        let mut out = Vec::with_capacity(w * h * self.layer_count());
        for z in 0..self.layer_count() {
            for row in y..y + h {
                for col in x..x + w {
                    out.push(self.tile(col, row, z));
                }
            }
        }
        out
    }
}

/// A dense row-major 2D array with fixed extents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Copy> Grid<T> {
    /// Create a grid filled with `value`
    pub fn new(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            cells: vec![value; width * height],
        }
    }

    /// Build a grid from nested rows. Every row must have the same length.
    pub fn from_rows(rows: &[Vec<T>]) -> Self {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut cells = Vec::with_capacity(width * height);
        for row in rows {
            debug_assert_eq!(row.len(), width, "ragged rows");
            cells.extend_from_slice(&row[..width.min(row.len())]);
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check if another grid has the same extents
    pub fn same_extent<U>(&self, other: &Grid<U>) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Get the value at a position. Panics when out of range.
    pub fn get(&self, x: usize, y: usize) -> T {
        assert!(x < self.width && y < self.height, "({x}, {y}) out of range");
        self.cells[y * self.width + x]
    }

    /// Get the value at a signed position, or `None` off-grid
    pub fn get_signed(&self, x: i64, y: i64) -> Option<T> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.cells[y as usize * self.width + x as usize])
    }

    /// Set the value at a position. Out-of-range writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = value;
        }
    }

    /// Overwrite every cell
    pub fn fill(&mut self, value: T) {
        self.cells.iter_mut().for_each(|c| *c = value);
    }

    /// Iterate over rows as slices
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Iterate over all cell values in row-major order
    pub fn values(&self) -> impl Iterator<Item = T> + '_ {
        self.cells.iter().copied()
    }

    /// Apply `f` to every cell, producing a new grid of the same extents
    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(|&c| f(c)).collect(),
        }
    }
}

impl<T: Copy + PartialEq> Grid<T> {
    /// Count cells equal to `value`
    pub fn count(&self, value: T) -> usize {
        self.cells.iter().filter(|&&c| c == value).count()
    }
}
