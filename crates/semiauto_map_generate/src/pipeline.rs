//! Stage composition for both map archetypes and the final commit

use semiauto_map_core::catalog::{
    self, CatalogBand, BASE_ROW, CEILING_COLUMN, FIELD_BORDER_ROW, FIELD_CLIFF_ROW, FLOOR_COLUMN,
    WALL_COLUMN,
};
use semiauto_map_core::{layer, FieldType, GenerationOptions, Grid, TileGrid};
use tracing::{debug, info, warn};

use crate::apply::{MergeMode, NoRender, RenderHook, SourceRect, TileApplier};
use crate::classify::{classify_walls, mirror_left_half};
use crate::cliff::{classify_cliffs, field_surface, CliffMap};
use crate::context::{DecorationMaps, GenerationContext};
use crate::corner::classify_corners;
use crate::decorate::{dungeon_surface, place_grass, place_objects, place_wallpaper, DecorationMap, PlacementArea, SurfaceMap};
use crate::elevation::{elevation_field, ElevationField};
use crate::jitter::{expand_x, expand_y};
use crate::mask::{build_mask, code, Mask};
use crate::segment::{find_x_segments, find_y_segments};
use crate::shadow::cast_shadows;
use crate::trees::place_trees;
use crate::GenerateError;

/// Intermediate layout a run committed
#[derive(Debug, Clone, PartialEq)]
pub enum Layout {
    /// Floor (-1), wall (-2) and ceiling (-3) codes
    Dungeon { mask: Mask },
    /// Elevation and the border / cliff codes derived from it
    Field { elevation: ElevationField, codes: CliffMap },
}

/// Result of one generation run
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub seed: u32,
    pub layout: Layout,
    pub decorations: DecorationMaps,
}

/// Generate `target` in place from its drawn layout and the palette
///
/// The target's own tiles only serve as the layout (dungeons) or the extent
/// and region tags (fields); every cell is rewritten from the palette.
pub fn generate_map(
    palette: &TileGrid,
    target: &mut TileGrid,
    options: &GenerationOptions,
    map_id: u32,
) -> Result<Generated, GenerateError> {
    generate_map_with_hook(palette, target, options, map_id, NoRender)
}

/// [`generate_map`] with a hook notified after every palette copy
pub fn generate_map_with_hook<H: RenderHook>(
    palette: &TileGrid,
    target: &mut TileGrid,
    options: &GenerationOptions,
    map_id: u32,
    hook: H,
) -> Result<Generated, GenerateError> {
    let mut ctx = GenerationContext::new(palette, target, options, map_id);
    let (w, h) = (ctx.width(), ctx.height());
    if w == 0 || h == 0 {
        warn!(map_id, "target map has no cells; nothing to generate");
        return Ok(Generated {
            seed: ctx.seed,
            layout: Layout::Dungeon { mask: Grid::new(w, h, code::EMPTY) },
            decorations: DecorationMaps::empty(w, h),
        });
    }

    info!(map_id, seed = ctx.seed, width = w, height = h, field = ?options.field_type, "generating map");
    warn_empty_bands(&ctx);

    let mut applier = TileApplier::with_hook(palette, hook);
    let (layout, decorations) = match options.field_type {
        None => {
            let (mask, decorations) = dungeon_chain(&mut ctx, target);
            commit_ground(&mut applier, target, &mask, dungeon_ground_source)?;
            commit_decorations(&mut applier, target, &decorations)?;
            if options.add_shadow {
                applier.overlay(target, layer::SHADOW, &decorations.shadow);
            }
            (Layout::Dungeon { mask }, decorations)
        }
        Some(field_type) => {
            let (elevation, codes, decorations) = field_chain(&mut ctx, field_type);
            commit_ground(&mut applier, target, &codes, field_ground_source)?;
            commit_decorations(&mut applier, target, &decorations)?;
            stamp(
                &mut applier,
                target,
                &decorations.trees,
                catalog::TREE_2X2,
                MergeMode::Add,
                false,
            )?;
            (Layout::Field { elevation, codes }, decorations)
        }
    };

    for (category, placed) in decorations.counts() {
        debug!(category, placed, "decorations");
    }
    info!(map_id, "map generated");

    Ok(Generated {
        seed: ctx.seed,
        layout,
        decorations,
    })
}

fn warn_empty_bands(ctx: &GenerationContext) {
    let options = ctx.options;
    let bands = [
        ("grass", options.add_grass, ctx.catalog.grass != 0),
        ("walkable object", options.add_walkable_object, ctx.catalog.walkable != 0),
        ("unwalkable object", options.add_unwalkable_object, ctx.catalog.has_unwalkable()),
        ("wallpaper", options.add_wallpaper && !options.is_field(), ctx.catalog.has_wallpaper()),
        ("tree", options.add_tree && options.is_field(), ctx.catalog.trees != 0),
    ];
    for (category, enabled, present) in bands {
        if enabled && !present {
            warn!(category, "palette has no variants; category skipped");
        }
    }
}

// ─── Chains ─────────────────────────────────────────────────────────────────

fn dungeon_chain(ctx: &mut GenerationContext, target: &TileGrid) -> (Mask, DecorationMaps) {
    let symmetric = ctx.options.dungeon_symmetry;

    let mut mask = build_mask(target);
    let corners = classify_corners(&mut mask, &mut ctx.rng);
    let x_segments = find_x_segments(&mask);
    let y_segments = find_y_segments(&mask);
    debug!(
        corners,
        x_segments = x_segments.len(),
        y_segments = y_segments.len(),
        "layout scanned"
    );

    expand_x(&mut mask, &x_segments, &mut ctx.rng);
    expand_y(&mut mask, &y_segments, &mut ctx.rng);
    if symmetric {
        mirror_left_half(&mut mask);
    }

    let drawn = mask.clone();
    classify_walls(&mut mask);

    let mut decorations = DecorationMaps::empty(mask.width(), mask.height());
    if ctx.options.add_shadow {
        decorations.shadow = cast_shadows(&mask, symmetric);
    }
    let surface = dungeon_surface(&mask, &drawn);
    decorate(ctx, &surface, &mut decorations, true);
    (mask, decorations)
}

fn field_chain(ctx: &mut GenerationContext, field_type: FieldType) -> (ElevationField, CliffMap, DecorationMaps) {
    let elevation = elevation_field(ctx.width(), ctx.height(), field_type, ctx.options, ctx.seed);
    let codes = classify_cliffs(&elevation);
    let surface = field_surface(&codes);

    let mut decorations = DecorationMaps::empty(ctx.width(), ctx.height());
    decorate(ctx, &surface, &mut decorations, false);
    if ctx.options.add_tree {
        decorations.trees = place_trees(
            &codes,
            &ctx.regions,
            ctx.catalog.trees,
            ctx.options,
            ctx.seed,
            &mut ctx.rng,
        );
    }
    (elevation, codes, decorations)
}

/// Grass, objects and (dungeons only) wallpaper, in that order
fn decorate(ctx: &mut GenerationContext, surface: &SurfaceMap, decorations: &mut DecorationMaps, wallpaper: bool) {
    let options = ctx.options;
    let area = PlacementArea::new(surface, &ctx.regions);

    if options.add_grass {
        decorations.grass = place_grass(&area, ctx.catalog.grass, options, &mut ctx.rng);
    }

    let objects = place_objects(&area, &ctx.catalog, options, &mut ctx.rng);
    decorations.walkable = objects.walkable;
    decorations.unwalkable_1x1 = objects.unwalkable_1x1;
    decorations.unwalkable_1x2 = objects.unwalkable_1x2;

    if wallpaper && options.add_wallpaper {
        let pieces = place_wallpaper(&area, &ctx.catalog, options, &mut ctx.rng);
        decorations.wallpaper_1x1 = pieces.one;
        decorations.wallpaper_1x2 = pieces.two;
    }
}

// ─── Commit ─────────────────────────────────────────────────────────────────

fn dungeon_ground_source(code: i8) -> Option<(usize, usize)> {
    match code {
        code::FLOOR => Some((FLOOR_COLUMN, BASE_ROW)),
        code::WALL => Some((WALL_COLUMN, BASE_ROW)),
        code::CEILING => Some((CEILING_COLUMN, BASE_ROW)),
        _ => None,
    }
}

fn field_ground_source(code: i8) -> Option<(usize, usize)> {
    if code >= 0 {
        Some((code as usize, FIELD_BORDER_ROW))
    } else {
        Some(((-(code as i32) - 1) as usize, FIELD_CLIFF_ROW))
    }
}

/// Paint every cell from its palette ground sample, reshaping autotiles
fn commit_ground<H: RenderHook>(
    applier: &mut TileApplier<H>,
    target: &mut TileGrid,
    codes: &Grid<i8>,
    source_of: fn(i8) -> Option<(usize, usize)>,
) -> Result<(), GenerateError> {
    for y in 0..codes.height() {
        for x in 0..codes.width() {
            if let Some((sx, sy)) = source_of(codes.get(x, y)) {
                applier.apply(target, MergeMode::Auto, SourceRect::cell(sx, sy), (x as i64, y as i64))?;
            }
        }
    }
    Ok(())
}

fn commit_decorations<H: RenderHook>(
    applier: &mut TileApplier<H>,
    target: &mut TileGrid,
    decorations: &DecorationMaps,
) -> Result<(), GenerateError> {
    stamp(applier, target, &decorations.grass, catalog::GRASS, MergeMode::AutoAdd, false)?;
    stamp(applier, target, &decorations.wallpaper_1x1, catalog::WALLPAPER_1X1, MergeMode::Add, true)?;
    stamp(applier, target, &decorations.wallpaper_1x2, catalog::WALLPAPER_1X2, MergeMode::Add, true)?;
    stamp(applier, target, &decorations.walkable, catalog::WALKABLE_1X1, MergeMode::Add, false)?;
    stamp(applier, target, &decorations.unwalkable_1x1, catalog::UNWALKABLE_1X1, MergeMode::Add, false)?;
    stamp(applier, target, &decorations.unwalkable_1x2, catalog::UNWALKABLE_1X2, MergeMode::Add, true)?;
    Ok(())
}

/// Copy the palette variant of every placed decoration
///
/// Decorations are anchored at their top-left cell, except trees which are
/// recorded at their bottom-right cell.
fn stamp<H: RenderHook>(
    applier: &mut TileApplier<H>,
    target: &mut TileGrid,
    map: &DecorationMap,
    band: CatalogBand,
    mode: MergeMode,
    bottom_up: bool,
) -> Result<(), GenerateError> {
    let anchor = if band == catalog::TREE_2X2 {
        (1 - band.width as i64, 1 - band.height as i64)
    } else {
        (0, 0)
    };
    let rows: Vec<usize> = if bottom_up {
        (0..map.height()).rev().collect()
    } else {
        (0..map.height()).collect()
    };

    for y in rows {
        for x in 0..map.width() {
            let variant = map.get(x, y);
            if variant == 0 {
                continue;
            }
            let source = SourceRect::new(
                band.column_of(variant as usize - 1),
                band.row,
                band.width,
                band.height,
            );
            applier.apply(target, mode, source, (x as i64 + anchor.0, y as i64 + anchor.1))?;
        }
    }
    Ok(())
}
