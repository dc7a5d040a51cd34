//! End-to-end runs over a map data directory

use std::path::Path;

use semiauto_map_core::{layer, GenerationOptions, TileGrid};
use semiauto_map_generate::generate_map;
use semiauto_map_runtime::{
    map_file_name, DirectoryProvider, GenerationQueue, JsonFileSink, OutputSink, RunnerConfig,
};
use serde_json::Value;

const MAP_INFOS: &str = r#"[null,
{"id":1,"expanded":true,"name":"Palette","order":1,"parentId":0,"scrollX":0,"scrollY":0},
{"id":2,"expanded":false,"name":"Town","order":2,"parentId":0,"scrollX":0,"scrollY":0},
{"id":3,"expanded":false,"name":"Cave B1","order":3,"parentId":1,"scrollX":0,"scrollY":0},
null,
{"id":5,"expanded":false,"name":"Inn","order":5,"parentId":2,"scrollX":0,"scrollY":0},
{"id":6,"expanded":false,"name":"Cave B2","order":6,"parentId":1,"scrollX":0,"scrollY":0}]"#;

fn palette() -> TileGrid {
    let mut palette = TileGrid::new(4, 9);
    palette.set_tile(0, 0, layer::GROUND, 2816);
    palette.set_tile(1, 0, layer::GROUND, 6752);
    palette.set_tile(2, 0, layer::GROUND, 6368);
    palette.extra.insert("note".to_string(), Value::from(""));
    palette
}

fn cave(note: &str) -> TileGrid {
    let mut target = TileGrid::new(16, 12);
    for y in 2..10 {
        for x in 2..14 {
            target.set_tile(x, y, layer::GROUND, 2816);
        }
    }
    target.extra.insert("note".to_string(), Value::from(note));
    target.extra.insert("displayName".to_string(), Value::from("Cave"));
    target
}

fn write_map(dir: &Path, id: u32, grid: &TileGrid) {
    std::fs::write(dir.join(map_file_name(id)), serde_json::to_string(grid).unwrap()).unwrap();
}

fn read_map(path: &Path) -> TileGrid {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn data_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("MapInfos.json"), MAP_INFOS).unwrap();
    write_map(dir.path(), 1, &palette());
    write_map(dir.path(), 3, &cave("<SEED:9> <ADD_SHADOW:false>"));
    write_map(dir.path(), 6, &cave(""));
    dir
}

#[test]
fn generates_every_child_of_a_palette() {
    let dir = data_dir();
    let config = RunnerConfig {
        palette_ids: vec![1],
        data_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    let provider = DirectoryProvider::new(&config.data_dir);
    let sink = OutputSink::from_config(&config);
    let mut queue = GenerationQueue::new(config, provider, sink);

    assert_eq!(queue.run_to_completion().unwrap(), vec![3, 6]);
    assert!(dir.path().join("_Map003.json").exists());
    assert!(dir.path().join("_Map006.json").exists());
    assert!(!dir.path().join("_Map005.json").exists(), "map 5 hangs under a non-palette map");
    assert_eq!(read_map(&dir.path().join("Map003.json")), cave("<SEED:9> <ADD_SHADOW:false>"));
}

#[test]
fn output_matches_a_direct_run_with_note_options() {
    let dir = data_dir();
    let config = RunnerConfig {
        palette_ids: vec![1],
        data_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    let provider = DirectoryProvider::new(&config.data_dir);
    let mut queue = GenerationQueue::new(config, provider, JsonFileSink::new(dir.path(), "_Map{id}.json"));
    queue.run_to_completion().unwrap();

    let mut expected = cave("<SEED:9> <ADD_SHADOW:false>");
    let options = GenerationOptions {
        add_shadow: false,
        ..GenerationOptions::default().with_seed(9)
    };
    generate_map(&palette(), &mut expected, &options, 3).unwrap();

    let written = read_map(&dir.path().join("_Map003.json"));
    assert_eq!(written, expected);
    assert_eq!(written.extra.get("displayName"), Some(&Value::from("Cave")), "host fields survive");
    assert!(
        (0..16).all(|x| (0..12).all(|y| written.tile(x, y, layer::SHADOW) == 0)),
        "ADD_SHADOW:false from the note"
    );
}

#[test]
fn missing_target_does_not_stop_the_queue() {
    let dir = data_dir();
    std::fs::remove_file(dir.path().join("Map003.json")).unwrap();
    let config = RunnerConfig {
        palette_ids: vec![1],
        data_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    let provider = DirectoryProvider::new(&config.data_dir);
    let sink = OutputSink::from_config(&config);
    let mut queue = GenerationQueue::new(config, provider, sink);
    queue.start();

    let mut errors = 0;
    loop {
        match queue.poll() {
            Ok(semiauto_map_runtime::GenerationState::Done) => break,
            Ok(_) => {}
            Err(_) => errors += 1,
        }
    }
    assert_eq!(errors, 1);
    assert_eq!(queue.created(), &[6]);
}
