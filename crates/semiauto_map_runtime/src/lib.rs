//! Host-facing driver for semiauto_map
//!
//! Finds every map whose parent is a palette map, generates them one at a time
//! and hands each finished grid to a sink:
//! - `RunnerConfig` - TOML settings and per-map option resolution
//! - `GridProvider` / `DirectoryProvider` - Request/poll access to map JSON files
//! - `PersistenceSink` / `JsonFileSink` / `DiagnosticSink` - Where finished maps go
//! - `GenerationQueue` - The FIFO state machine a host polls once per tick
//!
//! With the `bevy` feature, [`SemiAutoMapPlugin`] polls the queue from `Update`.
//!
//! # Example
//!
//! ```rust,no_run
//! use semiauto_map_runtime::{DirectoryProvider, GenerationQueue, OutputSink, RunnerConfig};
//!
//! let config = RunnerConfig::load("semiauto_map.toml")?;
//! let provider = DirectoryProvider::new(&config.data_dir);
//! let sink = OutputSink::from_config(&config);
//!
//! let mut queue = GenerationQueue::new(config, provider, sink);
//! let created = queue.run_to_completion()?;
//! println!("{} maps created", created.len());
//! # Ok::<(), semiauto_map_runtime::RuntimeError>(())
//! ```

pub mod config;
pub mod provider;
pub mod queue;
pub mod sink;

#[cfg(feature = "bevy")]
pub mod plugin;

use thiserror::Error;

pub use config::{output_name, parse_note_tags, RunnerConfig};
pub use provider::{map_file_name, DirectoryProvider, GridProvider, MapInfo};
pub use queue::{GenerationQueue, GenerationState, QueuedMap};
pub use sink::{format_grid, DiagnosticSink, JsonFileSink, OutputSink, PersistenceSink};

#[cfg(feature = "bevy")]
pub use plugin::{ActiveQueue, AdvanceGenerationEvent, SemiAutoMapPlugin, StartGenerationEvent};

// Re-export the generator and its data types
pub use semiauto_map_generate;
pub use semiauto_map_core;

use semiauto_map_generate::GenerateError;

/// Errors raised while loading, generating or saving maps
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to parse config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Generation failed: {0}")]
    Generate(#[from] GenerateError),
    #[error("Map{0:03} not found")]
    MissingMap(u32),
    #[error("Invalid map format: {0}")]
    InvalidFormat(String),
}
