//! Rough edges for straight boundary runs
//!
//! Each segment rolls a roughness level from a length-indexed weight table,
//! then its run is redistributed into alternating floor and face slots.

use crate::mask::{carve, code, Mask};
use crate::rng::SeededRandom;
use crate::segment::{Direction, PassageSegment};

/// Weights over roughness levels 0..=5, indexed by `length - 1`
pub type LevelTable = [[u8; 6]];

pub const X_LEVEL_WEIGHTS: [[u8; 6]; 32] = [
    [100, 0, 0, 0, 0, 0],
    [100, 0, 0, 0, 0, 0],
    [100, 0, 0, 0, 0, 0],
    [0, 100, 0, 0, 0, 0],
    [0, 100, 0, 0, 0, 0],
    [0, 100, 0, 0, 0, 0],
    [0, 100, 0, 0, 0, 0],
    [0, 90, 10, 0, 0, 0],
    [0, 80, 20, 0, 0, 0],
    [0, 70, 30, 0, 0, 0],
    [0, 60, 40, 0, 0, 0],
    [0, 50, 50, 0, 0, 0],
    [0, 40, 60, 0, 0, 0],
    [0, 30, 70, 0, 0, 0],
    [0, 20, 80, 0, 0, 0],
    [0, 10, 80, 10, 0, 0],
    [0, 0, 80, 20, 0, 0],
    [0, 0, 70, 30, 0, 0],
    [0, 0, 60, 40, 0, 0],
    [0, 0, 50, 50, 0, 0],
    [0, 0, 40, 60, 0, 0],
    [0, 0, 30, 70, 0, 0],
    [0, 0, 20, 80, 0, 0],
    [0, 0, 10, 80, 10, 0],
    [0, 0, 0, 80, 20, 0],
    [0, 0, 0, 70, 30, 0],
    [0, 0, 0, 60, 40, 0],
    [0, 0, 0, 50, 50, 0],
    [0, 0, 0, 40, 60, 0],
    [0, 0, 0, 30, 70, 0],
    [0, 0, 0, 20, 80, 0],
    [0, 0, 0, 10, 80, 10],
];

pub const Y_LEVEL_WEIGHTS: [[u8; 6]; 34] = [
    [100, 0, 0, 0, 0, 0],
    [100, 0, 0, 0, 0, 0],
    [100, 0, 0, 0, 0, 0],
    [0, 100, 0, 0, 0, 0],
    [0, 100, 0, 0, 0, 0],
    [0, 100, 0, 0, 0, 0],
    [0, 100, 0, 0, 0, 0],
    [0, 100, 0, 0, 0, 0],
    [0, 100, 0, 0, 0, 0],
    [0, 90, 10, 0, 0, 0],
    [0, 80, 20, 0, 0, 0],
    [0, 70, 30, 0, 0, 0],
    [0, 60, 40, 0, 0, 0],
    [0, 50, 50, 0, 0, 0],
    [0, 40, 60, 0, 0, 0],
    [0, 30, 70, 0, 0, 0],
    [0, 20, 80, 0, 0, 0],
    [0, 10, 80, 10, 0, 0],
    [0, 0, 80, 20, 0, 0],
    [0, 0, 70, 30, 0, 0],
    [0, 0, 60, 40, 0, 0],
    [0, 0, 50, 50, 0, 0],
    [0, 0, 40, 60, 0, 0],
    [0, 0, 30, 70, 0, 0],
    [0, 0, 20, 80, 0, 0],
    [0, 0, 10, 80, 10, 0],
    [0, 0, 0, 80, 20, 0],
    [0, 0, 0, 70, 30, 0],
    [0, 0, 0, 60, 40, 0],
    [0, 0, 0, 50, 50, 0],
    [0, 0, 0, 40, 60, 0],
    [0, 0, 0, 30, 70, 0],
    [0, 0, 0, 20, 80, 0],
    [0, 0, 0, 10, 80, 10],
];

/// Slot layout for one roughness level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Cells the base lengths and end caps already account for
    pub rand_base: i64,
    /// Code written for each slot
    pub types: Vec<i8>,
    /// Cells per slot
    pub lengths: Vec<usize>,
}

fn base_lengths(level: usize) -> Vec<usize> {
    if level == 0 {
        return vec![1];
    }
    let slots = 2 * level + 1;
    let mut lengths = vec![2; slots];
    lengths[0] = 0;
    lengths[slots - 1] = 0;
    lengths
}

/// Template for a north/south run; `face` is the code of the protruding slots
pub fn x_template(level: usize, face: i8) -> Template {
    if level == 0 {
        return Template { rand_base: 1, types: vec![face], lengths: base_lengths(0) };
    }
    let types = (0..2 * level + 1)
        .map(|i| if i % 2 == 0 { code::FLOOR } else { face })
        .collect();
    Template { rand_base: 4 * level as i64, types, lengths: base_lengths(level) }
}

/// Template for a west/east run: floor, ceiling and wall bands cut to full depth
pub fn y_template(level: usize) -> Template {
    if level == 0 {
        return Template { rand_base: 1, types: vec![code::FLOOR], lengths: base_lengths(0) };
    }
    let mut types = Vec::with_capacity(3 * level + 1);
    for _ in 0..level {
        types.extend_from_slice(&[code::FLOOR, code::CEILING, code::WALL]);
    }
    types.push(code::FLOOR);
    Template { rand_base: 6 * level as i64, types, lengths: base_lengths(level) }
}

/// Roulette over the weight row for this length
pub fn roll_level(table: &LevelTable, length: usize, rng: &mut SeededRandom) -> usize {
    let row = &table[length.saturating_sub(1).min(table.len() - 1)];
    let mut roll = rng.next_int(0, 99);
    for (level, &weight) in row.iter().enumerate() {
        roll -= weight as i64;
        if roll < 0 {
            return level;
        }
    }
    row.len() - 1
}

/// Spread the remaining cells of a run over the interior slots
fn distribute(template: &mut Template, segment: &PassageSegment, rng: &mut SeededRandom) {
    let last = template.lengths.len() - 1;
    let mut min = 1;
    let mut max = last as i64 - 1;
    let mut repeat = segment.length as i64 - template.rand_base + 2;
    // A closed end is capped with one floor cell, paid for out of the spare cells
    if segment.start_side_closed && repeat > 0 {
        repeat -= 1;
        template.lengths[0] = 1;
        min = 0;
    }
    if segment.end_side_closed && repeat > 0 {
        repeat -= 1;
        template.lengths[last] = 1;
        max += 1;
    }
    for _ in 0..repeat {
        let slot = rng.next_int(min, max) as usize;
        template.lengths[slot] += 1;
    }
}

/// Slot layout for a north/south segment
pub fn x_layout(segment: &PassageSegment, rng: &mut SeededRandom) -> Template {
    let face = if segment.direction == Direction::South { code::CEILING } else { code::WALL };
    let level = roll_level(&X_LEVEL_WEIGHTS, segment.length, rng);
    let mut template = x_template(level, face);
    if segment.length < 4 {
        // Too short to roughen: the whole run goes into the first slot
        template.lengths[0] = segment.length;
    } else {
        distribute(&mut template, segment, rng);
    }
    template
}

/// Slot layout for a west/east segment, with the depth fillers already inserted
pub fn y_layout(segment: &PassageSegment, rng: &mut SeededRandom) -> Template {
    let level = roll_level(&Y_LEVEL_WEIGHTS, segment.length, rng);
    let mut template = y_template(level);
    match segment.length {
        0..=3 => {
            let extra = (segment.length as i64 - template.rand_base).max(0) as usize;
            template.lengths[0] += extra;
        }
        4 => {}
        5 => {
            if rng.coin() {
                template.lengths[0] += 1;
            } else {
                template.lengths[2] += 1;
            }
        }
        _ => distribute(&mut template, segment, rng),
    }

    // Interleave two-cell fillers; an open end widens its last band instead
    if template.lengths.len() >= 2 {
        let last = template.lengths.len() - 2;
        let mut n = last as i64;
        while n >= 0 {
            let i = n as usize;
            if i == last && !segment.end_side_closed {
                template.lengths[last] += 2;
            } else {
                template.lengths.insert(i + 1, 2);
            }
            n -= 2;
        }
    }
    template
}

fn write_run(mask: &mut Mask, segment: &PassageSegment, template: &Template, along_x: bool) {
    let (mut x, mut y) = (segment.x as i64, segment.y as i64);
    for (&value, &count) in template.types.iter().zip(&template.lengths) {
        for _ in 0..count {
            carve(mask, x, y, value);
            if along_x {
                x += 1;
            } else {
                y += 1;
            }
        }
    }
}

/// Roughen every north/south segment in order
pub fn expand_x(mask: &mut Mask, segments: &[PassageSegment], rng: &mut SeededRandom) {
    for segment in segments {
        let template = x_layout(segment, rng);
        write_run(mask, segment, &template, true);
    }
}

/// Roughen every west/east segment in order
pub fn expand_y(mask: &mut Mask, segments: &[PassageSegment], rng: &mut SeededRandom) {
    for segment in segments {
        let template = y_layout(segment, rng);
        write_run(mask, segment, &template, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semiauto_map_core::Grid;

    fn segment(length: usize, direction: Direction, start: bool, end: bool) -> PassageSegment {
        PassageSegment {
            x: 1,
            y: 1,
            length,
            direction,
            start_side_closed: start,
            end_side_closed: end,
        }
    }

    #[test]
    fn test_templates() {
        let t = x_template(2, code::WALL);
        assert_eq!(t.types, vec![-1, -2, -1, -2, -1]);
        assert_eq!(t.lengths, vec![0, 2, 2, 2, 0]);
        assert_eq!(t.rand_base, 8);

        let t = y_template(1);
        assert_eq!(t.types, vec![-1, -3, -2, -1]);
        assert_eq!(t.lengths, vec![0, 2, 0]);
        assert_eq!(t.rand_base, 6);

        assert_eq!(x_template(0, code::CEILING).types, vec![-3]);
    }

    #[test]
    fn test_weight_rows_sum_to_100() {
        for row in X_LEVEL_WEIGHTS.iter().chain(Y_LEVEL_WEIGHTS.iter()) {
            assert_eq!(row.iter().map(|&w| w as u32).sum::<u32>(), 100);
        }
    }

    #[test]
    fn test_long_runs_clamp_to_last_row() {
        let mut rng = SeededRandom::new(5);
        for _ in 0..50 {
            let level = roll_level(&X_LEVEL_WEIGHTS, 500, &mut rng);
            assert!((3..=5).contains(&level));
        }
    }

    #[test]
    fn test_x_layout_preserves_length() {
        let mut rng = SeededRandom::new(9);
        for length in 1..40 {
            for (start, end) in [(false, false), (true, false), (false, true), (true, true)] {
                let s = segment(length, Direction::North, start, end);
                let t = x_layout(&s, &mut rng);
                assert_eq!(t.lengths.iter().sum::<usize>(), length, "length {length}");
                assert_eq!(t.types.len(), t.lengths.len());
            }
        }
    }

    #[test]
    fn test_y_layout_preserves_length() {
        let mut rng = SeededRandom::new(11);
        for length in 1..40 {
            for (start, end) in [(false, false), (true, false), (false, true), (true, true)] {
                let s = segment(length, Direction::West, start, end);
                let t = y_layout(&s, &mut rng);
                assert_eq!(t.lengths.iter().sum::<usize>(), length, "length {length}");
                assert!(t.lengths.len() <= t.types.len());
            }
        }
    }

    #[test]
    fn test_closed_ends_are_capped_with_floor() {
        let mut rng = SeededRandom::new(2);
        let s = segment(12, Direction::North, true, true);
        let t = x_layout(&s, &mut rng);
        assert!(t.lengths[0] >= 1);
        assert!(*t.lengths.last().unwrap_or(&0) >= 1);
    }

    #[test]
    fn test_single_cell_north_run_stays_wall() {
        let mut mask = Grid::new(3, 3, code::OPEN);
        mask.set(1, 1, code::EMPTY);
        let mut rng = SeededRandom::new(1);
        expand_x(&mut mask, &[segment(1, Direction::North, true, true)], &mut rng);

        assert_eq!(mask.get(1, 1), code::WALL);
        assert_eq!(mask.get(2, 1), code::OPEN, "nothing past the run is touched");
    }
}
