//! Straight boundary runs between open and closed cells

use crate::mask::{code, Mask};

/// Which side of the boundary the closed cells sit on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Closed above, open below; the run lies on the closed row
    North,
    /// Open above, closed below; the run lies on the closed row
    South,
    /// Closed left, open right; the run lies on the closed column
    West,
    /// Open left, closed right; the run lies on the closed column
    East,
}

impl Direction {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }
}

/// One straight run of boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassageSegment {
    pub x: usize,
    pub y: usize,
    pub length: usize,
    pub direction: Direction,
    /// The cell before the run on the scanned line is open
    pub start_side_closed: bool,
    /// The cell after the run on the scanned line is open
    pub end_side_closed: bool,
}

/// How a pair of cells across the boundary line relates
fn is_flip(a: i8, b: i8) -> bool {
    (a == code::EMPTY && b == code::OPEN) || (a == code::OPEN && b == code::EMPTY)
}

fn agrees(a: i8, b: i8) -> bool {
    (a != code::EMPTY && b != code::EMPTY) || (a == code::EMPTY && b == code::EMPTY)
}

struct Run {
    start: usize,
    fixed: usize,
    length: usize,
    direction: Direction,
    start_side_closed: bool,
}

/// Scan one boundary line
///
/// `pair(i)` returns the two cells across the boundary at position `i` of the
/// line; `line(i)` returns the cell on the scanned side used for the end flags.
fn scan_line(
    len: usize,
    pair: impl Fn(usize) -> (i8, i8),
    line: impl Fn(usize) -> i8,
    start_of: impl Fn(usize, i8) -> (usize, Direction),
    build: impl Fn(&Run, bool) -> PassageSegment,
    out: &mut Vec<PassageSegment>,
) {
    let mut run: Option<Run> = None;
    for i in 0..len {
        let (a, b) = pair(i);
        if let Some(current) = run.as_mut() {
            if agrees(a, b) {
                out.push(build(current, line(i) != code::EMPTY));
                run = None;
            } else {
                current.length += 1;
            }
            continue;
        }
        if is_flip(a, b) {
            let (fixed, direction) = start_of(i, a);
            run = Some(Run {
                start: i,
                fixed,
                length: 1,
                direction,
                start_side_closed: i > 0 && line(i - 1) != code::EMPTY,
            });
        }
    }
    // Runs reaching the end of the line are open at that end
    if let Some(current) = run {
        out.push(build(&current, false));
    }
}

/// Find north/south-facing runs by comparing each row to the row below
pub fn find_x_segments(mask: &Mask) -> Vec<PassageSegment> {
    let mut out = Vec::new();
    let (w, h) = (mask.width(), mask.height());
    for y in 0..h.saturating_sub(1) {
        scan_line(
            w,
            |x| (mask.get(x, y), mask.get(x, y + 1)),
            |x| mask.get(x, y),
            |_, upper| {
                if upper == code::EMPTY {
                    (y, Direction::North)
                } else {
                    (y + 1, Direction::South)
                }
            },
            |run, end_side_closed| PassageSegment {
                x: run.start,
                y: run.fixed,
                length: run.length,
                direction: run.direction,
                start_side_closed: run.start_side_closed,
                end_side_closed,
            },
            &mut out,
        );
    }
    out
}

/// Find west/east-facing runs by comparing each column to the column on its right
pub fn find_y_segments(mask: &Mask) -> Vec<PassageSegment> {
    let mut out = Vec::new();
    let (w, h) = (mask.width(), mask.height());
    for x in 0..w.saturating_sub(1) {
        scan_line(
            h,
            |y| (mask.get(x, y), mask.get(x + 1, y)),
            |y| mask.get(x, y),
            |_, left| {
                if left == code::EMPTY {
                    (x, Direction::West)
                } else {
                    (x + 1, Direction::East)
                }
            },
            |run, end_side_closed| PassageSegment {
                x: run.fixed,
                y: run.start,
                length: run.length,
                direction: run.direction,
                start_side_closed: run.start_side_closed,
                end_side_closed,
            },
            &mut out,
        );
    }
    out
}
