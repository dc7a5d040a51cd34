//! The single writer of the target grid: copies palette rectangles into it.
//!
//! The entry point is [`TileApplier::apply`]. Every generated tile reaches
//! the target through it, cell by cell, under one of four [`MergeMode`]s.

use semiauto_map_autotile::refresh_autotiles;
use semiauto_map_core::tile::is_wall_layer_source;
use semiauto_map_core::{layer, Grid, TileGrid, LAYER_COUNT};
use thiserror::Error;

/// Errors that can occur when copying from the palette
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApplyError {
    #[error("Source rectangle ({x}, {y}) {width}x{height} lies outside the palette")]
    SourceOutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error("Palette has {palette} layers but the target has {target}")]
    LayerMismatch { palette: usize, target: usize },
}

/// How a copied tile combines with what the target already holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Fill empty target cells with non-empty source tiles
    Add,
    /// Overwrite unconditionally
    Change,
    /// Overwrite, then recompute ground autotile shapes around the cell
    Auto,
    /// Overwrite where both sides hold a tile, fill where the target is
    /// empty, then recompute ground autotile shapes
    AutoAdd,
}

impl MergeMode {
    fn copies(self, source: u32, dest: u32) -> bool {
        match self {
            MergeMode::Change | MergeMode::Auto => true,
            MergeMode::Add => source != 0 && dest == 0,
            MergeMode::AutoAdd => dest == 0 || source != 0,
        }
    }

    fn refreshes_autotiles(self) -> bool {
        matches!(self, MergeMode::Auto | MergeMode::AutoAdd)
    }

    fn is_additive(self) -> bool {
        matches!(self, MergeMode::Add | MergeMode::AutoAdd)
    }
}

/// A rectangle of palette cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl SourceRect {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self { x, y, width, height }
    }

    /// A single palette cell
    pub fn cell(x: usize, y: usize) -> Self {
        Self::new(x, y, 1, 1)
    }
}

/// Notified after every copy so a renderer can redraw the touched area
pub trait RenderHook {
    fn tiles_changed(&mut self, _x: i64, _y: i64, _width: usize, _height: usize) {}
}

/// Hook that ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRender;

impl RenderHook for NoRender {}

impl<H: RenderHook + ?Sized> RenderHook for &mut H {
    fn tiles_changed(&mut self, x: i64, y: i64, width: usize, height: usize) {
        (**self).tiles_changed(x, y, width, height);
    }
}

/// Copies palette tiles into a target grid
pub struct TileApplier<'a, H: RenderHook = NoRender> {
    palette: &'a TileGrid,
    hook: H,
}

impl<'a> TileApplier<'a, NoRender> {
    pub fn new(palette: &'a TileGrid) -> Self {
        Self {
            palette,
            hook: NoRender,
        }
    }
}

impl<'a, H: RenderHook> TileApplier<'a, H> {
    pub fn with_hook(palette: &'a TileGrid, hook: H) -> Self {
        Self { palette, hook }
    }

    pub fn palette(&self) -> &TileGrid {
        self.palette
    }

    /// Give back the render hook
    pub fn into_hook(self) -> H {
        self.hook
    }

    /// Copy `source` from the palette to `target` with its top-left at `dest`
    ///
    /// Destination cells off the target are skipped. Per cell and layer:
    /// - the mode decides whether the palette tile is written
    /// - the shadow layer always follows a palette ground tile in the wall range
    /// - in additive modes, an object on the second upper layer also fills an
    ///   empty first upper layer
    /// - auto modes recompute ground autotile shapes around the cell
    pub fn apply(
        &mut self,
        target: &mut TileGrid,
        mode: MergeMode,
        source: SourceRect,
        dest: (i64, i64),
    ) -> Result<(), ApplyError> {
        let palette = self.palette;
        if source.x + source.width > palette.width || source.y + source.height > palette.height {
            return Err(ApplyError::SourceOutOfRange {
                x: source.x,
                y: source.y,
                width: source.width,
                height: source.height,
            });
        }
        if palette.layer_count() != target.layer_count() {
            return Err(ApplyError::LayerMismatch {
                palette: palette.layer_count(),
                target: target.layer_count(),
            });
        }

        for i in 0..source.height {
            let ty = dest.1 + i as i64;
            for j in 0..source.width {
                let tx = dest.0 + j as i64;
                if !target.contains(tx, ty) {
                    continue;
                }
                let (tx, ty) = (tx as usize, ty as usize);
                let (sx, sy) = (source.x + j, source.y + i);
                let wall_source = is_wall_layer_source(palette.tile(sx, sy, layer::GROUND));

                for z in 0..LAYER_COUNT {
                    let from = palette.tile(sx, sy, z);
                    let to = target.tile(tx, ty, z);
                    if mode.copies(from, to) || (z == layer::SHADOW && wall_source) {
                        target.set_tile(tx, ty, z, from);
                    }
                    if mode.refreshes_autotiles() && (z == layer::GROUND || z == layer::GROUND_UPPER) {
                        refresh_autotiles(target, tx, ty, z);
                    }
                }

                if mode.is_additive() {
                    let object = palette.tile(sx, sy, layer::UPPER_2);
                    if object != 0 && target.tile(tx, ty, layer::UPPER_1) == 0 {
                        target.set_tile(tx, ty, layer::UPPER_1, object);
                    }
                }
            }
        }

        self.hook.tiles_changed(dest.0, dest.1, source.width, source.height);
        Ok(())
    }

    /// Write every non-zero cell of `values` directly into layer `z`
    ///
    /// Used for overlays that have no palette counterpart, such as shadow
    /// bits. Returns the number of cells written.
    pub fn overlay(&mut self, target: &mut TileGrid, z: usize, values: &Grid<u32>) -> usize {
        let mut written = 0;
        for y in 0..values.height() {
            for x in 0..values.width() {
                let value = values.get(x, y);
                if value != 0 {
                    target.set_tile(x, y, z, value);
                    written += 1;
                }
            }
        }
        if written > 0 {
            self.hook.tiles_changed(0, 0, values.width(), values.height());
        }
        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semiauto_map_core::tile::{autotile_shape, make_autotile_id, TILE_ID_A2, TILE_ID_A3};

    const GRASS_KIND: u32 = (TILE_ID_A2 - 2048) / 48;

    fn palette() -> TileGrid {
        let mut palette = TileGrid::new(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                palette.set_tile(x, y, layer::GROUND, 100 + (y * 4 + x) as u32);
            }
        }
        palette.set_tile(1, 1, layer::UPPER_1, 7);
        palette
    }

    #[derive(Default)]
    struct Recorder(Vec<(i64, i64, usize, usize)>);

    impl RenderHook for Recorder {
        fn tiles_changed(&mut self, x: i64, y: i64, width: usize, height: usize) {
            self.0.push((x, y, width, height));
        }
    }

    #[test]
    fn test_change_round_trip() {
        let palette = palette();
        let mut target = TileGrid::new(6, 6);
        target.data.iter_mut().for_each(|t| *t = 9);
        let mut applier = TileApplier::new(&palette);

        applier
            .apply(&mut target, MergeMode::Change, SourceRect::new(1, 1, 2, 3), (3, 2))
            .unwrap();

        assert_eq!(
            target.read_rect(3, 2, 2, 3),
            palette.read_rect(1, 1, 2, 3),
            "re-reading the destination yields the source rectangle"
        );
    }

    #[test]
    fn test_add_fills_only_empty_cells() {
        let palette = palette();
        let mut target = TileGrid::new(2, 1);
        target.set_tile(0, 0, layer::GROUND, 55);
        let mut applier = TileApplier::new(&palette);

        applier
            .apply(&mut target, MergeMode::Add, SourceRect::new(1, 1, 2, 1), (0, 0))
            .unwrap();

        assert_eq!(target.tile(0, 0, layer::GROUND), 55, "occupied cell kept");
        assert_eq!(target.tile(0, 0, layer::UPPER_1), 7, "empty layer filled");
        assert_eq!(target.tile(1, 0, layer::GROUND), 106);
    }

    #[test]
    fn test_autoadd_keeps_target_where_source_is_empty() {
        let mut palette = TileGrid::new(1, 1);
        palette.set_tile(0, 0, layer::GROUND_UPPER, 3);
        let mut target = TileGrid::new(1, 1);
        target.set_tile(0, 0, layer::GROUND, 42);
        target.set_tile(0, 0, layer::GROUND_UPPER, 8);

        TileApplier::new(&palette)
            .apply(&mut target, MergeMode::AutoAdd, SourceRect::cell(0, 0), (0, 0))
            .unwrap();

        assert_eq!(target.tile(0, 0, layer::GROUND), 42);
        assert_eq!(target.tile(0, 0, layer::GROUND_UPPER), 3);
    }

    #[test]
    fn test_wall_source_carries_shadow_layer() {
        let mut palette = TileGrid::new(1, 1);
        palette.set_tile(0, 0, layer::GROUND, TILE_ID_A3 + 1);
        let mut target = TileGrid::new(1, 1);
        target.set_tile(0, 0, layer::GROUND, 1);
        target.set_tile(0, 0, layer::SHADOW, 5);

        TileApplier::new(&palette)
            .apply(&mut target, MergeMode::Add, SourceRect::cell(0, 0), (0, 0))
            .unwrap();

        assert_eq!(target.tile(0, 0, layer::GROUND), 1);
        assert_eq!(target.tile(0, 0, layer::SHADOW), 0, "shadow cleared by the wall tile");
    }

    #[test]
    fn test_upper_object_mirrors_into_first_upper_layer() {
        let mut palette = TileGrid::new(1, 1);
        palette.set_tile(0, 0, layer::UPPER_2, 12);
        let mut target = TileGrid::new(1, 1);

        TileApplier::new(&palette)
            .apply(&mut target, MergeMode::Add, SourceRect::cell(0, 0), (0, 0))
            .unwrap();

        assert_eq!(target.tile(0, 0, layer::UPPER_2), 12);
        assert_eq!(target.tile(0, 0, layer::UPPER_1), 12);
    }

    #[test]
    fn test_auto_recomputes_shape() {
        let mut palette = TileGrid::new(1, 1);
        palette.set_tile(0, 0, layer::GROUND, make_autotile_id(GRASS_KIND, 5));

        let mut changed = TileGrid::new(1, 1);
        TileApplier::new(&palette)
            .apply(&mut changed, MergeMode::Change, SourceRect::cell(0, 0), (0, 0))
            .unwrap();
        assert_eq!(autotile_shape(changed.tile(0, 0, layer::GROUND)), Some(5));

        let mut auto = TileGrid::new(1, 1);
        TileApplier::new(&palette)
            .apply(&mut auto, MergeMode::Auto, SourceRect::cell(0, 0), (0, 0))
            .unwrap();
        // Off-grid neighbors count as the same kind, so the tile is fully surrounded
        assert_eq!(autotile_shape(auto.tile(0, 0, layer::GROUND)), Some(0));
    }

    #[test]
    fn test_off_grid_destination_is_skipped() {
        let palette = palette();
        let mut target = TileGrid::new(2, 2);
        let mut applier = TileApplier::with_hook(&palette, Recorder::default());

        applier
            .apply(&mut target, MergeMode::Change, SourceRect::new(0, 0, 2, 2), (-1, 1))
            .unwrap();

        assert_eq!(target.tile(0, 1, layer::GROUND), 101);
        assert_eq!(target.tile(0, 0, layer::GROUND), 0);
        assert_eq!(applier.into_hook().0, vec![(-1, 1, 2, 2)]);
    }

    #[test]
    fn test_overlay_writes_non_zero_cells() {
        let palette = TileGrid::new(1, 1);
        let mut target = TileGrid::new(3, 1);
        target.set_tile(0, 0, layer::SHADOW, 2);
        let mut recorder = Recorder::default();
        let mut applier = TileApplier::with_hook(&palette, &mut recorder);

        let shadows = Grid::from_rows(&[vec![0u32, 5, 10]]);
        assert_eq!(applier.overlay(&mut target, layer::SHADOW, &shadows), 2);

        assert_eq!(target.tile(0, 0, layer::SHADOW), 2, "zero cells leave the target alone");
        assert_eq!(target.tile(1, 0, layer::SHADOW), 5);
        assert_eq!(target.tile(2, 0, layer::SHADOW), 10);
        assert_eq!(recorder.0, vec![(0, 0, 3, 1)]);
    }

    #[test]
    fn test_errors() {
        let palette = palette();
        let mut target = TileGrid::new(2, 2);
        let mut applier = TileApplier::new(&palette);

        assert_eq!(
            applier.apply(&mut target, MergeMode::Add, SourceRect::new(3, 0, 2, 1), (0, 0)),
            Err(ApplyError::SourceOutOfRange { x: 3, y: 0, width: 2, height: 1 })
        );

        target.data.truncate(2 * 2 * 5);
        assert_eq!(
            applier.apply(&mut target, MergeMode::Add, SourceRect::cell(0, 0), (0, 0)),
            Err(ApplyError::LayerMismatch { palette: 6, target: 5 })
        );
    }
}
