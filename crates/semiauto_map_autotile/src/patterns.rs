//! Neighbor patterns for the three autotile families
//!
//! A pattern is a 3x3 same-kind mask packed row-major, most significant bit
//! first: `0bNW_N_NE__W_C_E__SW_S_SE`. The position of a pattern in its list
//! is the shape index.

/// Neighbor direction flags
pub mod neighbors {
    pub const NW: u16 = 1 << 8;
    pub const N: u16 = 1 << 7;
    pub const NE: u16 = 1 << 6;
    pub const W: u16 = 1 << 5;
    pub const C: u16 = 1 << 4;
    pub const E: u16 = 1 << 3;
    pub const SW: u16 = 1 << 2;
    pub const S: u16 = 1 << 1;
    pub const SE: u16 = 1;

    pub const CORNERS: u16 = NW | NE | SW | SE;
    pub const ALL: u16 = 0b111_111_111;
}

/// 47-shape floor family
pub const FLOOR_PATTERNS: [u16; 47] = [
    0b111_111_111, 0b011_111_111, 0b110_111_111, 0b010_111_111,
    0b111_111_110, 0b011_111_110, 0b110_111_110, 0b010_111_110,
    0b111_111_011, 0b011_111_011, 0b110_111_011, 0b010_111_011,
    0b111_111_010, 0b011_111_010, 0b110_111_010, 0b010_111_010,
    0b011_011_011, 0b010_011_011, 0b011_011_010, 0b010_011_010,
    0b000_111_111, 0b000_111_110, 0b000_111_011, 0b000_111_010,
    0b110_110_110, 0b110_110_010, 0b010_110_110, 0b010_110_010,
    0b111_111_000, 0b011_111_000, 0b110_111_000, 0b010_111_000,
    0b010_010_010, 0b000_111_000, 0b000_011_011, 0b000_011_010,
    0b000_110_110, 0b000_110_010, 0b110_110_000, 0b010_110_000,
    0b011_011_000, 0b010_011_000, 0b000_010_010, 0b000_011_000,
    0b010_010_000, 0b000_110_000, 0b000_010_000,
];

/// 16-shape wall and roof family (edges only)
pub const WALL_PATTERNS: [u16; 17] = [
    0b010_111_010, 0b010_011_010, 0b000_111_010, 0b000_011_010,
    0b010_110_010, 0b010_010_010, 0b000_110_010, 0b000_010_010,
    0b010_111_000, 0b010_011_000, 0b000_111_000, 0b000_011_000,
    0b010_110_000, 0b010_010_000, 0b000_110_000, 0b000_010_000,
    0b000_000_000,
];

/// 4-shape waterfall family (horizontal edges only)
pub const WATERFALL_PATTERNS: [u16; 4] = [
    0b000_111_000, 0b000_011_000, 0b000_110_000, 0b000_010_000,
];

/// Mask -> shape lookup; `-1` marks masks no pattern produces
pub type ShapeTable = [i8; 512];

const fn build_table(patterns: &[u16]) -> ShapeTable {
    let mut table = [-1i8; 512];
    let mut i = patterns.len();
    // Walk backwards so the first listed pattern wins on duplicates
    while i > 0 {
        i -= 1;
        table[patterns[i] as usize] = i as i8;
    }
    table
}

pub const FLOOR_TABLE: ShapeTable = build_table(&FLOOR_PATTERNS);
pub const WALL_TABLE: ShapeTable = build_table(&WALL_PATTERNS);
pub const WATERFALL_TABLE: ShapeTable = build_table(&WATERFALL_PATTERNS);
