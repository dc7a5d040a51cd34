//! Destinations for finished maps

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use semiauto_map_core::TileGrid;
use tracing::info;

use crate::config::{output_name, RunnerConfig};
use crate::RuntimeError;

/// Receives every generated grid
pub trait PersistenceSink {
    fn save(&mut self, map_id: u32, grid: &TileGrid) -> Result<(), RuntimeError>;
}

/// Writes `_MapNNN.json` next to the source maps
///
/// The host is expected to swap the output in for `MapNNN.json` itself, so a
/// run never overwrites its own input.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    dir: PathBuf,
    pattern: String,
}

impl JsonFileSink {
    pub fn new(dir: impl AsRef<Path>, pattern: impl Into<String>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            pattern: pattern.into(),
        }
    }

    /// Full path a map is written to
    pub fn path_for(&self, map_id: u32) -> PathBuf {
        self.dir.join(output_name(&self.pattern, map_id))
    }
}

impl PersistenceSink for JsonFileSink {
    fn save(&mut self, map_id: u32, grid: &TileGrid) -> Result<(), RuntimeError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(map_id);
        std::fs::write(&path, serde_json::to_string(grid)?)?;
        info!("Wrote {}", path.display());
        Ok(())
    }
}

/// Logs each grid as text instead of persisting it
#[derive(Debug, Clone, Default)]
pub struct DiagnosticSink {
    /// Text of the most recent dump
    pub last_dump: Option<String>,
}

impl PersistenceSink for DiagnosticSink {
    fn save(&mut self, map_id: u32, grid: &TileGrid) -> Result<(), RuntimeError> {
        let text = format_grid(grid);
        info!("Map{map_id:03}\n{text}");
        self.last_dump = Some(text);
        Ok(())
    }
}

/// Sink picked from the runner config
#[derive(Debug, Clone)]
pub enum OutputSink {
    Json(JsonFileSink),
    Diagnostic(DiagnosticSink),
}

impl OutputSink {
    pub fn from_config(config: &RunnerConfig) -> Self {
        if config.diagnostic {
            Self::Diagnostic(DiagnosticSink::default())
        } else {
            Self::Json(JsonFileSink::new(&config.data_dir, config.output_pattern.clone()))
        }
    }
}

impl PersistenceSink for OutputSink {
    fn save(&mut self, map_id: u32, grid: &TileGrid) -> Result<(), RuntimeError> {
        match self {
            Self::Json(sink) => sink.save(map_id, grid),
            Self::Diagnostic(sink) => sink.save(map_id, grid),
        }
    }
}

/// Render every layer as rows of right-aligned tile ids
pub fn format_grid(grid: &TileGrid) -> String {
    let mut out = String::new();
    for z in 0..grid.layer_count() {
        let cell_width = (0..grid.height)
            .flat_map(|y| (0..grid.width).map(move |x| (x, y)))
            .map(|(x, y)| grid.tile(x, y, z).to_string().len())
            .max()
            .unwrap_or(1);

        let _ = writeln!(out, "layer {z}");
        for y in 0..grid.height {
            let row: Vec<String> = (0..grid.width)
                .map(|x| format!("{:>cell_width$}", grid.tile(x, y, z)))
                .collect();
            let _ = writeln!(out, "{}", row.join(" "));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use semiauto_map_core::layer;

    #[test]
    fn test_format_grid_right_aligns() {
        let mut grid = TileGrid::new(3, 2);
        grid.set_tile(1, 0, layer::GROUND, 2816);
        grid.set_tile(2, 1, layer::GROUND, 7);

        let text = format_grid(&grid);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "layer 0");
        assert_eq!(lines[1], "   0 2816    0");
        assert_eq!(lines[2], "   0    0    7");
        assert_eq!(lines[3], "layer 1");
        assert_eq!(lines[4], "0 0 0");
        assert_eq!(lines.len(), 6 * 3);
    }

    #[test]
    fn test_json_sink_writes_output_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonFileSink::new(dir.path().join("out"), "_Map{id}.json");
        let grid = TileGrid::new(2, 2);

        sink.save(5, &grid).unwrap();

        let path = dir.path().join("out").join("_Map005.json");
        assert_eq!(sink.path_for(5), path);
        let read: TileGrid = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(read, grid);
    }

    #[test]
    fn test_diagnostic_sink_keeps_dump() {
        let mut sink = OutputSink::from_config(&RunnerConfig {
            diagnostic: true,
            ..Default::default()
        });
        sink.save(1, &TileGrid::new(1, 1)).unwrap();

        let OutputSink::Diagnostic(diagnostic) = sink else {
            panic!("diagnostic sink expected");
        };
        assert_eq!(diagnostic.last_dump.as_deref(), Some(format_grid(&TileGrid::new(1, 1)).as_str()));
    }
}
