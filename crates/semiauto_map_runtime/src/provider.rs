//! Request/poll access to map data
//!
//! A host loader issues a request and reports the data on a later tick. The
//! queue never blocks on a provider; it polls again until the data is ready.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use semiauto_map_core::{TileGrid, LAYER_COUNT};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::RuntimeError;

/// One entry of `MapInfos.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapInfo {
    pub id: u32,
    /// Id of the map this one is nested under, 0 for a top-level map
    #[serde(default)]
    pub parent_id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub order: u32,
}

/// Source of the map list and of map grids
///
/// `request_*` starts a load; the matching poll returns `Ok(None)` while the
/// load is still pending. A grid is handed out once per request.
pub trait GridProvider {
    fn request_map_infos(&mut self);

    fn map_infos(&mut self) -> Result<Option<Vec<MapInfo>>, RuntimeError>;

    fn request_grid(&mut self, map_id: u32);

    fn take_grid(&mut self, map_id: u32) -> Result<Option<TileGrid>, RuntimeError>;
}

/// File name of a map inside the data directory
pub fn map_file_name(map_id: u32) -> String {
    format!("Map{map_id:03}.json")
}

/// Provider reading `MapInfos.json` and `MapNNN.json` from a directory
///
/// Files are read when polled, so a request is always ready on the next poll.
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    dir: PathBuf,
    infos_requested: bool,
    requested: HashSet<u32>,
}

impl DirectoryProvider {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            infos_requested: false,
            requested: HashSet::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read and validate one map file
    pub fn load_grid(&self, map_id: u32) -> Result<TileGrid, RuntimeError> {
        let path = self.dir.join(map_file_name(map_id));
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(RuntimeError::MissingMap(map_id)),
            Err(e) => return Err(e.into()),
        };
        let grid: TileGrid = serde_json::from_slice(&bytes)?;

        let expected = grid.width * grid.height * LAYER_COUNT;
        if grid.data.len() != expected {
            return Err(RuntimeError::InvalidFormat(format!(
                "{} holds {} tiles, expected {}x{}x{} = {}",
                path.display(),
                grid.data.len(),
                grid.width,
                grid.height,
                LAYER_COUNT,
                expected
            )));
        }
        debug!(map_id, width = grid.width, height = grid.height, "Loaded map");
        Ok(grid)
    }

    /// Read `MapInfos.json`, skipping the null slots the host leaves for deleted maps
    pub fn load_map_infos(&self) -> Result<Vec<MapInfo>, RuntimeError> {
        let text = std::fs::read_to_string(self.dir.join("MapInfos.json"))?;
        let slots: Vec<Option<MapInfo>> = serde_json::from_str(&text)?;
        Ok(slots.into_iter().flatten().collect())
    }
}

impl GridProvider for DirectoryProvider {
    fn request_map_infos(&mut self) {
        self.infos_requested = true;
    }

    fn map_infos(&mut self) -> Result<Option<Vec<MapInfo>>, RuntimeError> {
        if !self.infos_requested {
            return Ok(None);
        }
        self.infos_requested = false;
        self.load_map_infos().map(Some)
    }

    fn request_grid(&mut self, map_id: u32) {
        self.requested.insert(map_id);
    }

    fn take_grid(&mut self, map_id: u32) -> Result<Option<TileGrid>, RuntimeError> {
        if !self.requested.remove(&map_id) {
            return Ok(None);
        }
        self.load_grid(map_id).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, text: &str) {
        std::fs::write(dir.join(name), text).unwrap();
    }

    #[test]
    fn test_map_file_name() {
        assert_eq!(map_file_name(3), "Map003.json");
        assert_eq!(map_file_name(120), "Map120.json");
    }

    #[test]
    fn test_map_infos_skip_null_slots() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "MapInfos.json",
            r#"[null,
{"id":1,"expanded":false,"name":"Palette","order":1,"parentId":0,"scrollX":0,"scrollY":0},
null,
{"id":3,"expanded":false,"name":"Cave","order":2,"parentId":1,"scrollX":0,"scrollY":0}]"#,
        );

        let mut provider = DirectoryProvider::new(dir.path());
        assert_eq!(provider.map_infos().unwrap(), None, "nothing was requested");

        provider.request_map_infos();
        let infos = provider.map_infos().unwrap().unwrap();
        assert_eq!(infos.len(), 2);
        assert_eq!(infos[1].id, 3);
        assert_eq!(infos[1].parent_id, 1);
        assert_eq!(infos[1].name, "Cave");
    }

    #[test]
    fn test_grid_is_handed_out_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut grid = TileGrid::new(2, 1);
        grid.extra.insert("note".to_string(), serde_json::Value::from("<SEED:4>"));
        write(dir.path(), "Map007.json", &serde_json::to_string(&grid).unwrap());

        let mut provider = DirectoryProvider::new(dir.path());
        provider.request_grid(7);
        assert_eq!(provider.take_grid(7).unwrap(), Some(grid));
        assert_eq!(provider.take_grid(7).unwrap(), None);
    }

    #[test]
    fn test_missing_map() {
        let dir = tempfile::tempdir().unwrap();
        let mut provider = DirectoryProvider::new(dir.path());
        provider.request_grid(9);
        assert!(matches!(provider.take_grid(9), Err(RuntimeError::MissingMap(9))));
    }

    #[test]
    fn test_short_data_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "Map002.json", r#"{"width":2,"height":2,"data":[0,0,0]}"#);

        let provider = DirectoryProvider::new(dir.path());
        assert!(matches!(provider.load_grid(2), Err(RuntimeError::InvalidFormat(_))));
    }
}
