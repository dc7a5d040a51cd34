//! Border and cliff codes derived from an elevation field
//!
//! Positive codes are lips on the higher side of an ascending step, negative
//! codes are the three rows of cliff face below a descending step:
//!
//! | code | meaning        | code | meaning                |
//! |------|----------------|------|------------------------|
//! | 0    | flat           | 9-12 | inner corner NW/NE/SE/SW |
//! | 1-8  | lip N, NE, E, SE, S, SW, W, NW | 13 | narrow ridge |
//! | -1..-3 | upper face west/middle/east | -4..-6 | cliff base west/middle/east |

use semiauto_map_core::Grid;

use crate::decorate::{Surface, SurfaceMap};
use crate::elevation::ElevationField;

/// Per-cell border or cliff code
pub type CliffMap = Grid<i8>;

pub mod cliff_code {
    pub const FLAT: i8 = 0;
    pub const INNER_NW: i8 = 9;
    pub const INNER_NE: i8 = 10;
    pub const INNER_SE: i8 = 11;
    pub const INNER_SW: i8 = 12;
    pub const RIDGE: i8 = 13;

    pub fn has_north(c: i8) -> bool {
        matches!(c, 1 | 2 | 8)
    }

    pub fn has_south(c: i8) -> bool {
        matches!(c, 4..=6)
    }

    pub fn has_west(c: i8) -> bool {
        matches!(c, 6..=8)
    }

    pub fn has_east(c: i8) -> bool {
        matches!(c, 2..=4)
    }

    pub fn is_cliff(c: i8) -> bool {
        c < 0
    }
}

/// Horizontal position of a cliff cell along its face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliffEnd {
    West,
    Middle,
    East,
}

impl CliffEnd {
    fn offset(self) -> usize {
        match self {
            CliffEnd::West => 0,
            CliffEnd::Middle => 1,
            CliffEnd::East => 2,
        }
    }
}

/// Vertical signal of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum YSignal {
    None,
    North,
    South,
    NorthSouth,
    CliffUpper(CliffEnd),
    CliffBase(CliffEnd),
}

impl YSignal {
    fn row(self) -> usize {
        match self {
            YSignal::None => 0,
            YSignal::North => 1,
            YSignal::South => 2,
            YSignal::NorthSouth => 3,
            YSignal::CliffUpper(end) => 4 + end.offset(),
            YSignal::CliffBase(end) => 7 + end.offset(),
        }
    }

    fn is_cliff(self) -> bool {
        matches!(self, YSignal::CliffUpper(_) | YSignal::CliffBase(_))
    }

    /// Add a border lip; cliffs are kept
    fn with_border(self, border: YSignal) -> YSignal {
        match (self, border) {
            (s, _) if s.is_cliff() => s,
            (YSignal::None, b) => b,
            (s, b) if s == b => s,
            _ => YSignal::NorthSouth,
        }
    }
}

/// X signal bits: lip on the west or east edge
const X_WEST: usize = 0b01;
const X_EAST: usize = 0b10;

/// Y signal row by X signal bits
const CODE_TABLE: [[i8; 4]; 10] = [
    [0, 7, 3, 13],
    [1, 8, 2, 13],
    [5, 6, 4, 13],
    [13, 13, 13, 13],
    [-1, -1, -1, -1],
    [-2, -2, -2, -2],
    [-3, -3, -3, -3],
    [-4, -4, -4, -4],
    [-5, -5, -5, -5],
    [-6, -6, -6, -6],
];

/// Depth of the cliff face below a descending step: upper, upper, base
const FACE_ROWS: usize = 3;

/// Whether column `x` steps down between `y` and `y + 1` from height `top`
///
/// Columns off the grid continue the face.
fn steps_down(field: &ElevationField, x: i64, y: usize, top: i32) -> bool {
    match (field.get_signed(x, y as i64), field.get_signed(x, y as i64 + 1)) {
        (Some(upper), Some(lower)) => upper == top && lower < top,
        (None, _) => true,
        (Some(_), None) => false,
    }
}

fn cliff_end(field: &ElevationField, x: usize, y: usize, top: i32) -> CliffEnd {
    if !steps_down(field, x as i64 - 1, y, top) {
        CliffEnd::West
    } else if !steps_down(field, x as i64 + 1, y, top) {
        CliffEnd::East
    } else {
        CliffEnd::Middle
    }
}

fn y_signals(field: &ElevationField) -> Grid<YSignal> {
    let (w, h) = (field.width(), field.height());
    let mut signals = Grid::new(w, h, YSignal::None);

    for x in 0..w {
        for y in 0..h.saturating_sub(1) {
            let (upper, lower) = (field.get(x, y), field.get(x, y + 1));
            if lower > upper {
                let s = signals.get(x, y + 1).with_border(YSignal::North);
                signals.set(x, y + 1, s);
            } else if upper > lower {
                let s = signals.get(x, y).with_border(YSignal::South);
                signals.set(x, y, s);

                let end = cliff_end(field, x, y, upper);
                for row in 0..FACE_ROWS {
                    let cy = y + 1 + row;
                    if cy >= h || field.get(x, cy) >= upper {
                        break;
                    }
                    let face = if row + 1 < FACE_ROWS {
                        YSignal::CliffUpper(end)
                    } else {
                        YSignal::CliffBase(end)
                    };
                    signals.set(x, cy, face);
                }
            }
        }
    }
    signals
}

fn x_signals(field: &ElevationField) -> Grid<usize> {
    let (w, h) = (field.width(), field.height());
    let mut signals = Grid::new(w, h, 0);
    for y in 0..h {
        for x in 0..w.saturating_sub(1) {
            let (left, right) = (field.get(x, y), field.get(x + 1, y));
            if right > left {
                signals.set(x + 1, y, signals.get(x + 1, y) | X_WEST);
            } else if left > right {
                signals.set(x, y, signals.get(x, y) | X_EAST);
            }
        }
    }
    signals
}

/// Rewrite flat cells that sit in the concave corner of two lips
fn fix_inner_corners(codes: &mut CliffMap) {
    let source = codes.clone();
    let at = |x: usize, y: usize, dx: i64, dy: i64| source.get_signed(x as i64 + dx, y as i64 + dy).unwrap_or(0);

    for y in 0..source.height() {
        for x in 0..source.width() {
            if source.get(x, y) != cliff_code::FLAT {
                continue;
            }
            let (north, south) = (at(x, y, 0, -1), at(x, y, 0, 1));
            let (west, east) = (at(x, y, -1, 0), at(x, y, 1, 0));

            let corner = if cliff_code::has_north(west) && cliff_code::has_west(north) {
                Some(cliff_code::INNER_NW)
            } else if cliff_code::has_north(east) && cliff_code::has_east(north) {
                Some(cliff_code::INNER_NE)
            } else if cliff_code::has_south(east) && cliff_code::has_east(south) {
                Some(cliff_code::INNER_SE)
            } else if cliff_code::has_south(west) && cliff_code::has_west(south) {
                Some(cliff_code::INNER_SW)
            } else {
                None
            };
            if let Some(code) = corner {
                codes.set(x, y, code);
            }
        }
    }
}

/// Classify every cell of an elevation field into a border or cliff code
pub fn classify_cliffs(field: &ElevationField) -> CliffMap {
    let ys = y_signals(field);
    let xs = x_signals(field);

    let mut codes = Grid::new(field.width(), field.height(), cliff_code::FLAT);
    for y in 0..field.height() {
        for x in 0..field.width() {
            codes.set(x, y, CODE_TABLE[ys.get(x, y).row()][xs.get(x, y)]);
        }
    }
    fix_inner_corners(&mut codes);
    codes
}

/// Surface view of a classified field: flat ground, upper faces as wall
pub fn field_surface(codes: &CliffMap) -> SurfaceMap {
    codes.map(|c| match c {
        cliff_code::FLAT => Surface::Floor,
        -3..=-1 => Surface::Wall,
        _ => Surface::Blocked,
    })
}
