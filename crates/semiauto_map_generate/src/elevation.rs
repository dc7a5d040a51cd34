//! Integer elevation fields for outdoor maps
//!
//! Every generator starts from Perlin noise sampled on the cell grid, min-max
//! normalized and floored into a fixed number of levels. Thin runs left by
//! the quantization are then erased along rows and columns.

use noise::{NoiseFn, Perlin, Seedable};
use semiauto_map_core::{FieldType, GenerationOptions, Grid};

/// Discrete height per cell
pub type ElevationField = Grid<i32>;

/// Offsets keeping the noise fields of one run independent
pub mod salt {
    pub const SHIELD: u32 = 0x0000_0000;
    pub const DEFORM: u32 = 0x9E37_79B9;
    pub const TREE: u32 = 0x7F4A_7C15;
}

/// Depth of the shield field blended into mix maps, recentered on zero
const MIX_SHIELD_DEPTH: i32 = 3;

/// Direction a smoothing pass walks in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Runs along a row
    X,
    /// Runs along a column
    Y,
}

/// Perlin noise sampled at `(x / relief_x, y / relief_y)` for every cell
pub fn sample_noise(seed: u32, width: usize, height: usize, relief_x: u32, relief_y: u32) -> Grid<f64> {
    let noise = Perlin::new(1).set_seed(seed);
    let (rx, ry) = (relief_x.max(1) as f64, relief_y.max(1) as f64);
    let mut field = Grid::new(width, height, 0.0);
    for y in 0..height {
        for x in 0..width {
            field.set(x, y, noise.get([x as f64 / rx, y as f64 / ry, 0.5]));
        }
    }
    field
}

/// Min-max normalize into integer levels `0..levels`
///
/// A flat input (or `levels <= 0`) yields an all-zero field.
pub fn quantize(values: &Grid<f64>, levels: i32) -> ElevationField {
    let (min, max) = values
        .values()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let range = max - min;
    if levels <= 0 || !range.is_finite() || range <= f64::EPSILON {
        return values.map(|_| 0);
    }
    values.map(|v| {
        let level = ((v - min) / range * levels as f64).floor() as i32;
        level.clamp(0, levels - 1)
    })
}

// ─── Smoothing ──────────────────────────────────────────────────────────────

/// Fill every run shorter than `min_len` whose two neighbors are equal
///
/// After a fill the scan resumes at the start of the merged run, so a fill
/// can enable another one further left.
fn erase_line(line: &mut [i32], min_len: usize) {
    let mut start = 0;
    while start < line.len() {
        let value = line[start];
        let end = start + line[start..].iter().take_while(|&&v| v == value).count();
        if start > 0 && end < line.len() && end - start < min_len && line[start - 1] == line[end] {
            let fill = line[end];
            line[start..end].fill(fill);
            let mut back = start - 1;
            while back > 0 && line[back - 1] == fill {
                back -= 1;
            }
            start = back;
            continue;
        }
        start = end;
    }
}

/// Replace runs shorter than `min_len` bounded by equal values on both sides
pub fn erase_thin_runs(field: &mut ElevationField, axis: Axis, min_len: usize) {
    let (w, h) = (field.width(), field.height());
    match axis {
        Axis::X => {
            for y in 0..h {
                let mut line: Vec<i32> = (0..w).map(|x| field.get(x, y)).collect();
                erase_line(&mut line, min_len);
                for (x, v) in line.into_iter().enumerate() {
                    field.set(x, y, v);
                }
            }
        }
        Axis::Y => {
            for x in 0..w {
                let mut line: Vec<i32> = (0..h).map(|y| field.get(x, y)).collect();
                erase_line(&mut line, min_len);
                for (y, v) in line.into_iter().enumerate() {
                    field.set(x, y, v);
                }
            }
        }
    }
}

// ─── Generators ─────────────────────────────────────────────────────────────

/// Noise hills with `depth` levels
pub fn shield_field(width: usize, height: usize, relief_x: u32, relief_y: u32, depth: i32, seed: u32) -> ElevationField {
    let raw = sample_noise(seed.wrapping_add(salt::SHIELD), width, height, relief_x, relief_y);
    let mut field = quantize(&raw, depth);
    erase_thin_runs(&mut field, Axis::Y, 2);
    erase_thin_runs(&mut field, Axis::X, 2);
    field
}

/// Band level of row `y`, highest at the top
fn band_level(y: usize, height: usize, depth: i32) -> i32 {
    depth - 1 - (y * depth.max(0) as usize / height.max(1)) as i32
}

/// Horizontal bands with their lower edges pushed up by deform noise
pub fn terrace_field(width: usize, height: usize, depth: i32, relief_x: u32, deform: i32, seed: u32) -> ElevationField {
    let mut field = Grid::new(width, height, 0);
    for y in 0..height {
        for x in 0..width {
            field.set(x, y, band_level(y, height, depth));
        }
    }

    let raw = sample_noise(seed.wrapping_add(salt::DEFORM), width, height, relief_x, relief_x);
    let push = quantize(&raw, deform);

    let mut band_start = 0;
    for b in 1..height {
        let lower = band_level(b, height, depth);
        if lower == band_level(b - 1, height, depth) {
            continue;
        }
        for x in 0..width {
            let rise = push.get(x, b).max(0) as usize;
            for y in b.saturating_sub(rise).max(band_start)..b {
                field.set(x, y, lower);
            }
        }
        band_start = b;
    }

    erase_thin_runs(&mut field, Axis::X, 2);
    field
}

/// Terrace bands with the shield deviations that cover a whole band run
pub fn mix_field(
    width: usize,
    height: usize,
    options: &GenerationOptions,
    seed: u32,
) -> ElevationField {
    let shield = shield_field(
        width,
        height,
        options.shield_relief_x,
        options.shield_relief_y,
        MIX_SHIELD_DEPTH,
        seed,
    );
    let mut field = terrace_field(
        width,
        height,
        options.terrace_depth as i32,
        options.terrace_relief_x,
        options.terrace_deform as i32,
        seed,
    );

    for x in 0..width {
        let mut start = 0;
        while start < height {
            let band = field.get(x, start);
            let end = start + (start..height).take_while(|&y| field.get(x, y) == band).count();
            let first = shield.get(x, start);
            let delta = if (start..end).all(|y| shield.get(x, y) == first) {
                first - 1
            } else {
                0
            };
            for y in start..end {
                field.set(x, y, (band + delta).max(0));
            }
            start = end;
        }
    }

    erase_thin_runs(&mut field, Axis::Y, 5);
    erase_thin_runs(&mut field, Axis::X, 3);
    erase_thin_runs(&mut field, Axis::Y, 2);
    erase_thin_runs(&mut field, Axis::X, 2);
    field
}

/// Elevation for the configured field type
pub fn elevation_field(width: usize, height: usize, field_type: FieldType, options: &GenerationOptions, seed: u32) -> ElevationField {
    match field_type {
        FieldType::Shield => shield_field(
            width,
            height,
            options.shield_relief_x,
            options.shield_relief_y,
            options.shield_depth as i32,
            seed,
        ),
        FieldType::Terrace => terrace_field(
            width,
            height,
            options.terrace_depth as i32,
            options.terrace_relief_x,
            options.terrace_deform as i32,
            seed,
        ),
        FieldType::Mix => mix_field(width, height, options, seed),
    }
}
