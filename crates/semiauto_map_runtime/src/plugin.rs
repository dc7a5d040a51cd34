//! Bevy integration
//!
//! The plugin keeps a [`GenerationQueue`] as a resource and polls it once per
//! `Update`, so a long queue never blocks a frame on more than one map.
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use semiauto_map_runtime::{RunnerConfig, SemiAutoMapPlugin, StartGenerationEvent};
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(SemiAutoMapPlugin::new(RunnerConfig::default()))
//!         .add_systems(Startup, |mut start: MessageWriter<StartGenerationEvent>| {
//!             start.write(StartGenerationEvent);
//!         })
//!         .run();
//! }
//! ```

use bevy::prelude::*;

use crate::config::RunnerConfig;
use crate::provider::DirectoryProvider;
use crate::queue::{GenerationQueue, GenerationState};
use crate::sink::OutputSink;

/// Message that starts a generation run
#[derive(Message, Debug, Clone, Copy)]
pub struct StartGenerationEvent;

/// Message that releases the hold after a map in diagnostic mode
#[derive(Message, Debug, Clone, Copy)]
pub struct AdvanceGenerationEvent;

/// Queue reading and writing the configured data directory
#[derive(Resource)]
pub struct ActiveQueue(pub GenerationQueue<DirectoryProvider, OutputSink>);

impl ActiveQueue {
    pub fn state(&self) -> GenerationState {
        self.0.state()
    }
}

/// Plugin driving map generation from the Bevy schedule
pub struct SemiAutoMapPlugin {
    pub config: RunnerConfig,
}

impl SemiAutoMapPlugin {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }
}

impl Plugin for SemiAutoMapPlugin {
    fn build(&self, app: &mut App) {
        let provider = DirectoryProvider::new(&self.config.data_dir);
        let sink = OutputSink::from_config(&self.config);
        app.insert_resource(ActiveQueue(GenerationQueue::new(self.config.clone(), provider, sink)))
            .init_resource::<Messages<StartGenerationEvent>>()
            .init_resource::<Messages<AdvanceGenerationEvent>>()
            .add_systems(Update, (handle_generation_messages, poll_generation).chain());
    }
}

/// System to start or advance the queue
fn handle_generation_messages(
    mut start: MessageReader<StartGenerationEvent>,
    mut advance: MessageReader<AdvanceGenerationEvent>,
    mut queue: ResMut<ActiveQueue>,
) {
    if start.read().count() > 0 {
        queue.0.start();
    }
    if advance.read().count() > 0 {
        queue.0.advance();
    }
}

/// System to make one queue transition per frame
fn poll_generation(mut queue: ResMut<ActiveQueue>) {
    if let Err(e) = queue.0.poll() {
        error!("Map generation failed: {e}");
    }
}
