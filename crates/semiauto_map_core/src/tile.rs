//! Host tile-id ranges
//!
//! Tile codes are plain integers. Autotiles occupy `[TILE_ID_A1, TILE_ID_MAX)`
//! in blocks of 48 shapes per kind; everything below `TILE_ID_A1` is a static
//! tile. These predicates are the only place the id layout is interpreted.

pub const TILE_ID_B: u32 = 0;
pub const TILE_ID_C: u32 = 256;
pub const TILE_ID_D: u32 = 512;
pub const TILE_ID_E: u32 = 768;
pub const TILE_ID_A5: u32 = 1536;
pub const TILE_ID_A1: u32 = 2048;
pub const TILE_ID_A2: u32 = 2816;
pub const TILE_ID_A3: u32 = 4352;
pub const TILE_ID_A4: u32 = 5888;
pub const TILE_ID_MAX: u32 = 8192;

/// Shapes per autotile kind
pub const SHAPES_PER_KIND: u32 = 48;

/// Shadow bits covering the west half of a cell
pub const SHADOW_WEST_HALF: u32 = 0b0101;
/// Shadow bits covering the east half of a cell
pub const SHADOW_EAST_HALF: u32 = 0b1010;

pub fn is_autotile(id: u32) -> bool {
    id >= TILE_ID_A1
}

/// Autotile kind, or `None` for static tiles
pub fn autotile_kind(id: u32) -> Option<u32> {
    is_autotile(id).then(|| (id - TILE_ID_A1) / SHAPES_PER_KIND)
}

/// Autotile shape, or `None` for static tiles
pub fn autotile_shape(id: u32) -> Option<u32> {
    is_autotile(id).then(|| (id - TILE_ID_A1) % SHAPES_PER_KIND)
}

pub fn make_autotile_id(kind: u32, shape: u32) -> u32 {
    TILE_ID_A1 + kind * SHAPES_PER_KIND + shape
}

/// Two tiles belong together when they are autotiles of the same kind,
/// or identical static tiles.
pub fn is_same_kind(a: u32, b: u32) -> bool {
    match (autotile_kind(a), autotile_kind(b)) {
        (Some(ka), Some(kb)) => ka == kb,
        _ => a == b,
    }
}

pub fn is_tile_a1(id: u32) -> bool {
    (TILE_ID_A1..TILE_ID_A2).contains(&id)
}

pub fn is_tile_a2(id: u32) -> bool {
    (TILE_ID_A2..TILE_ID_A3).contains(&id)
}

pub fn is_tile_a3(id: u32) -> bool {
    (TILE_ID_A3..TILE_ID_A4).contains(&id)
}

pub fn is_tile_a4(id: u32) -> bool {
    (TILE_ID_A4..TILE_ID_MAX).contains(&id)
}

pub fn is_tile_a5(id: u32) -> bool {
    (TILE_ID_A5..TILE_ID_A1).contains(&id)
}

pub fn is_water(id: u32) -> bool {
    is_tile_a1(id) && !(TILE_ID_A1 + 96..TILE_ID_A1 + 192).contains(&id)
}

pub fn is_waterfall(id: u32) -> bool {
    (TILE_ID_A1 + 192..TILE_ID_A2).contains(&id)
        && autotile_kind(id).is_some_and(|k| k % 2 == 1)
}

pub fn is_roof(id: u32) -> bool {
    is_tile_a3(id) && autotile_kind(id).is_some_and(|k| k % 16 < 8)
}

pub fn is_wall_top(id: u32) -> bool {
    is_tile_a4(id) && autotile_kind(id).is_some_and(|k| k % 16 < 8)
}

pub fn is_wall_side(id: u32) -> bool {
    (is_tile_a3(id) || is_tile_a4(id)) && autotile_kind(id).is_some_and(|k| k % 16 >= 8)
}

pub fn is_wall(id: u32) -> bool {
    is_wall_top(id) || is_wall_side(id)
}

pub fn is_floor_type_autotile(id: u32) -> bool {
    (is_tile_a1(id) && !is_waterfall(id)) || is_tile_a2(id) || is_wall_top(id)
}

/// Ground ids in this range carry their shadow layer with them when copied.
pub fn is_wall_layer_source(id: u32) -> bool {
    id > TILE_ID_A3 - 1 && id < TILE_ID_MAX
}
