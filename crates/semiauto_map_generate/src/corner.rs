//! Corner detection and rounding
//!
//! Eight 5x5 patterns (outer and inner corners in four rotations) are matched
//! against every cell of the open/closed mask. A match rewrites part of the
//! window with floor, wall and ceiling codes so the corner renders chamfered.
//!
//! Patterns are written as text, one string per row:
//! - target: `0` closed, `1` open, `.` any
//! - rewrite: `f` floor, `w` wall, `c` ceiling, `.` keep
//!
//! Targets are packed into two 25-bit masks at compile time, so testing a
//! window is a single comparison.

use crate::mask::{carve, code, Mask};
use crate::rng::SeededRandom;

const SIZE: usize = 5;
const RADIUS: i64 = 2;

/// Packed 5x5 target: `care` marks non-"any" cells, `open` marks cells that must be open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedTarget {
    pub care: u32,
    pub open: u32,
}

/// Rewrite window; `0` keeps the current cell
pub type Rewrite = [[i8; SIZE]; SIZE];

/// One corner shape with its rewrite alternatives
#[derive(Debug, Clone, Copy)]
pub struct CornerPattern {
    pub name: &'static str,
    pub target: PackedTarget,
    /// Outer corners carry three alternatives, inner corners one
    pub rewrites: &'static [Rewrite],
}

const fn bit(row: usize, col: usize) -> u32 {
    1 << (row * SIZE + col)
}

const fn pack_target(rows: [&str; SIZE]) -> PackedTarget {
    let mut care = 0;
    let mut open = 0;
    let mut r = 0;
    while r < SIZE {
        let bytes = rows[r].as_bytes();
        let mut c = 0;
        while c < SIZE {
            match bytes[c] {
                b'0' => care |= bit(r, c),
                b'1' => {
                    care |= bit(r, c);
                    open |= bit(r, c);
                }
                _ => {}
            }
            c += 1;
        }
        r += 1;
    }
    PackedTarget { care, open }
}

const fn rewrite(rows: [&str; SIZE]) -> Rewrite {
    let mut out = [[0i8; SIZE]; SIZE];
    let mut r = 0;
    while r < SIZE {
        let bytes = rows[r].as_bytes();
        let mut c = 0;
        while c < SIZE {
            out[r][c] = match bytes[c] {
                b'f' => code::FLOOR,
                b'w' => code::WALL,
                b'c' => code::CEILING,
                _ => 0,
            };
            c += 1;
        }
        r += 1;
    }
    out
}

// ─── Pattern table ───────────────────────────────────────────────────────────

const Q_OUTER: [Rewrite; 3] = [
    rewrite([".....", ".wwff", ".w...", ".f...", ".f..."]),
    rewrite([".....", ".wwwf", ".w...", ".f...", ".f..."]),
    rewrite([".....", ".cwff", ".w...", ".w...", ".f..."]),
];
const Q_INNER: [Rewrite; 1] = [rewrite([".....", ".....", ".....", "...f.", "....."])];

const Z_OUTER: [Rewrite; 3] = [
    rewrite([".f...", ".f...", ".c...", ".ccff", "....."]),
    rewrite([".f...", ".f...", ".c...", ".cccf", "....."]),
    rewrite([".f...", ".c...", ".c...", ".ccff", "....."]),
];
const Z_INNER: [Rewrite; 1] = [rewrite([".....", "...f.", ".....", ".....", "....."])];

const P_OUTER: [Rewrite; 3] = [
    rewrite([".....", "ffww.", "...w.", "...f.", "...f."]),
    rewrite([".....", "fwww.", "...w.", "...f.", "...f."]),
    rewrite([".....", "ffwc.", "...w.", "...w.", "...f."]),
];
const P_INNER: [Rewrite; 1] = [rewrite([".....", ".....", ".....", ".f...", "....."])];

const M_OUTER: [Rewrite; 3] = [
    rewrite(["...f.", "...f.", "...c.", "ffcc.", "....."]),
    rewrite(["...f.", "...f.", "...c.", "ffcc.", "....."]),
    rewrite(["...f.", "...c.", "...c.", "ffcc.", "....."]),
];
const M_INNER: [Rewrite; 1] = [rewrite([".....", ".f...", ".....", ".....", "....."])];

/// All corner patterns in matching order
pub const CORNER_PATTERNS: [CornerPattern; 8] = [
    CornerPattern {
        name: "q_outer",
        target: pack_target(["..0..", ".000.", "00111", ".011.", "..1.."]),
        rewrites: &Q_OUTER,
    },
    CornerPattern {
        name: "q_inner",
        target: pack_target([".....", ".111.", ".111.", ".110.", "....."]),
        rewrites: &Q_INNER,
    },
    CornerPattern {
        name: "z_outer",
        target: pack_target(["..1..", ".011.", "00111", ".000.", "..0.."]),
        rewrites: &Z_OUTER,
    },
    CornerPattern {
        name: "z_inner",
        target: pack_target([".....", ".110.", ".111.", ".111.", "....."]),
        rewrites: &Z_INNER,
    },
    CornerPattern {
        name: "p_outer",
        target: pack_target(["..0..", ".000.", "11100", ".110.", "..1.."]),
        rewrites: &P_OUTER,
    },
    CornerPattern {
        name: "p_inner",
        target: pack_target([".....", ".111.", ".111.", ".011.", "....."]),
        rewrites: &P_INNER,
    },
    CornerPattern {
        name: "m_outer",
        target: pack_target(["..1..", ".110.", "11100", ".000.", "..0.."]),
        rewrites: &M_OUTER,
    },
    CornerPattern {
        name: "m_inner",
        target: pack_target([".....", ".011.", ".111.", ".111.", "....."]),
        rewrites: &M_INNER,
    },
];

// ─── Matching ────────────────────────────────────────────────────────────────

/// Snapshot of the 5x5 window around a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Window {
    /// In-grid cells
    inside: u32,
    /// In-grid cells holding 0 or 1
    binary: u32,
    /// In-grid cells holding 1
    open: u32,
}

fn read_window(mask: &Mask, cx: usize, cy: usize) -> Window {
    let mut window = Window { inside: 0, binary: 0, open: 0 };
    for r in 0..SIZE {
        for c in 0..SIZE {
            let x = cx as i64 + c as i64 - RADIUS;
            let y = cy as i64 + r as i64 - RADIUS;
            let Some(cell) = mask.get_signed(x, y) else {
                continue;
            };
            let b = bit(r, c);
            window.inside |= b;
            if cell == code::EMPTY || cell == code::OPEN {
                window.binary |= b;
            }
            if cell == code::OPEN {
                window.open |= b;
            }
        }
    }
    window
}

impl PackedTarget {
    /// Off-grid positions are skipped; every other cared position must match exactly
    fn matches(&self, window: &Window) -> bool {
        let required = self.care & window.inside;
        required & !window.binary == 0 && (window.open ^ self.open) & required == 0
    }
}

fn apply_rewrite(mask: &mut Mask, cx: usize, cy: usize, rewrite: &Rewrite) {
    for (r, row) in rewrite.iter().enumerate() {
        for (c, &value) in row.iter().enumerate() {
            if value == 0 {
                continue;
            }
            carve(mask, cx as i64 + c as i64 - RADIUS, cy as i64 + r as i64 - RADIUS, value);
        }
    }
}

/// Match every pattern at every cell and apply rewrites in place
///
/// Single forward pass, row-major; patterns are tried in [`CORNER_PATTERNS`]
/// order and later checks see earlier rewrites. Returns the number of matches.
pub fn classify_corners(mask: &mut Mask, rng: &mut SeededRandom) -> usize {
    let mut matches = 0;
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            for pattern in &CORNER_PATTERNS {
                let window = read_window(mask, x, y);
                if !pattern.target.matches(&window) {
                    continue;
                }
                let choice = if pattern.rewrites.len() > 1 {
                    (rng.next_int(1, pattern.rewrites.len() as i64) - 1) as usize
                } else {
                    0
                };
                apply_rewrite(mask, x, y, &pattern.rewrites[choice]);
                matches += 1;
            }
        }
    }
    matches
}
