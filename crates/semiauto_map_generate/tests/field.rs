//! Cross-stage outdoor scenarios

use semiauto_map_core::catalog::{FIELD_BORDER_ROW, FIELD_CLIFF_ROW, TREE_2X2};
use semiauto_map_core::{layer, FieldType, GenerationOptions, TileGrid};
use semiauto_map_generate::elevation::shield_field;
use semiauto_map_generate::{generate_map, Layout};

const BORDER_BASE: u32 = 100;
const CLIFF_BASE: u32 = 200;
const TREE_BASE: u32 = 300;

/// Palette with field ground rows, one grass variant and two tree variants
fn field_palette() -> TileGrid {
    let mut palette = TileGrid::new(14, 13);
    for c in 0..14 {
        palette.set_tile(c, FIELD_BORDER_ROW, layer::GROUND, BORDER_BASE + c as u32);
    }
    for c in 0..6 {
        palette.set_tile(c, FIELD_CLIFF_ROW, layer::GROUND, CLIFF_BASE + c as u32);
    }
    palette.set_tile(0, 1, layer::GROUND_UPPER, 10);
    for variant in 1..=2u32 {
        let column = TREE_2X2.column_of(variant as usize - 1);
        for dy in 0..2 {
            for dx in 0..2 {
                let id = TREE_BASE + 10 * variant + (dy * 2 + dx) as u32;
                palette.set_tile(column + dx, TREE_2X2.row + dy, layer::UPPER_1, id);
            }
        }
    }
    palette
}

fn expected_ground(code: i8) -> u32 {
    if code >= 0 {
        BORDER_BASE + code as u32
    } else {
        CLIFF_BASE + (-(code as i32) - 1) as u32
    }
}

#[test]
fn shield_scenario_levels() {
    let field = shield_field(64, 64, 20, 20, 4, 7);
    assert!(field.values().all(|v| (0..4).contains(&v)));

    let mut levels: Vec<i32> = field.values().collect();
    levels.sort_unstable();
    levels.dedup();
    assert!(levels.len() >= 2, "levels present: {levels:?}");
}

#[test]
fn every_field_type_paints_its_codes() {
    for field_type in [FieldType::Shield, FieldType::Terrace, FieldType::Mix] {
        let palette = field_palette();
        let mut target = TileGrid::new(48, 40);
        let options = GenerationOptions::default().with_field_type(field_type);
        let generated = generate_map(&palette, &mut target, &options, 11).unwrap();

        let Layout::Field { codes, elevation } = &generated.layout else {
            panic!("field layout expected");
        };
        assert!(elevation.values().all(|v| v >= 0), "{field_type:?}");
        for y in 0..40 {
            for x in 0..48 {
                let code = codes.get(x, y);
                assert!((-6..=13).contains(&code), "{field_type:?} code {code}");
                assert_eq!(
                    target.tile(x, y, layer::GROUND),
                    expected_ground(code),
                    "{field_type:?} ground at ({x}, {y})"
                );
            }
        }
    }
}

#[test]
fn terrace_has_cliffs() {
    let palette = field_palette();
    let mut target = TileGrid::new(40, 60);
    let options = GenerationOptions {
        terrace_depth: 4,
        ..GenerationOptions::default().with_field_type(FieldType::Terrace)
    };
    let generated = generate_map(&palette, &mut target, &options, 2).unwrap();
    let Layout::Field { codes, .. } = &generated.layout else {
        panic!("field layout expected");
    };

    assert!(codes.values().any(|c| c < 0), "descending bands produce cliff faces");
    assert!(codes.values().any(|c| c > 0), "with borders along their lips");
}

#[test]
fn trees_are_painted_on_flat_ground() {
    let palette = field_palette();
    let mut target = TileGrid::new(40, 40);
    let options = GenerationOptions {
        tree_size: 60,
        add_grass: false,
        ..GenerationOptions::default().with_field_type(FieldType::Shield)
    };
    let generated = generate_map(&palette, &mut target, &options, 5).unwrap();
    let Layout::Field { codes, .. } = &generated.layout else {
        panic!("field layout expected");
    };
    let trees = &generated.decorations.trees;

    let mut placed = 0;
    for y in 0..40 {
        for x in 0..40 {
            let variant = trees.get(x, y);
            if variant == 0 {
                continue;
            }
            placed += 1;
            assert!((1..=2).contains(&variant));
            for (cx, cy) in [(x - 1, y - 1), (x, y - 1), (x - 1, y), (x, y)] {
                assert_eq!(codes.get(cx, cy), 0, "tree at ({x}, {y}) over a border");
            }
            assert_eq!(
                target.tile(x - 1, y - 1, layer::UPPER_1),
                TREE_BASE + 10 * variant,
                "top-left tile of the tree at ({x}, {y})"
            );
            assert_eq!(target.tile(x, y, layer::UPPER_1), TREE_BASE + 10 * variant + 3);
        }
    }
    assert!(placed > 0);
}
