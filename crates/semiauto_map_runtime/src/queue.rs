//! FIFO generation queue driven by host polling
//!
//! ```text
//! Idle ──start──▶ AwaitingMapInfo ──▶ AwaitingGridPair ──▶ Generating ──▶ Done
//!                                            ▲                  │
//!                                            └──── next map ────┘
//! ```
//!
//! Each [`GenerationQueue::poll`] makes at most one transition. Maps are
//! generated strictly one after another. In diagnostic mode the queue holds
//! after each map until [`GenerationQueue::advance`] is called.

use std::collections::VecDeque;

use semiauto_map_core::TileGrid;
use semiauto_map_generate::generate_map;
use tracing::{debug, info, warn};

use crate::config::RunnerConfig;
use crate::provider::{GridProvider, MapInfo};
use crate::sink::PersistenceSink;
use crate::RuntimeError;

/// Where the queue currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    /// Not started
    Idle,
    /// Waiting for the map list
    AwaitingMapInfo,
    /// Waiting for the front map and its palette
    AwaitingGridPair,
    /// Both grids loaded; the next poll generates and saves
    Generating,
    /// Every queued map was processed
    Done,
}

/// A target map and the palette map it hangs under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueuedMap {
    pub target: u32,
    pub palette: u32,
}

/// Generates every child map of the configured palette maps
pub struct GenerationQueue<P, S> {
    config: RunnerConfig,
    provider: P,
    sink: S,
    state: GenerationState,
    queue: VecDeque<QueuedMap>,
    palette: Option<TileGrid>,
    target: Option<TileGrid>,
    held: bool,
    created: Vec<u32>,
}

impl<P: GridProvider, S: PersistenceSink> GenerationQueue<P, S> {
    pub fn new(config: RunnerConfig, provider: P, sink: S) -> Self {
        Self {
            config,
            provider,
            sink,
            state: GenerationState::Idle,
            queue: VecDeque::new(),
            palette: None,
            target: None,
            held: false,
            created: Vec::new(),
        }
    }

    pub fn state(&self) -> GenerationState {
        self.state
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Maps still waiting, front first
    pub fn pending(&self) -> impl Iterator<Item = &QueuedMap> {
        self.queue.iter()
    }

    /// Ids of the maps saved so far, in order
    pub fn created(&self) -> &[u32] {
        &self.created
    }

    /// Whether the queue waits for [`advance`](Self::advance) before the next map
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Request the map list. Ignored while a run is in progress.
    pub fn start(&mut self) {
        if !matches!(self.state, GenerationState::Idle | GenerationState::Done) {
            warn!("Generation already running");
            return;
        }
        self.queue.clear();
        self.created.clear();
        self.palette = None;
        self.target = None;
        self.held = false;
        self.provider.request_map_infos();
        self.state = GenerationState::AwaitingMapInfo;
        info!("Loading map infos");
    }

    /// Release a hold placed after a map in diagnostic mode
    pub fn advance(&mut self) {
        if self.held {
            self.held = false;
            self.request_front();
        }
    }

    /// Make at most one transition
    ///
    /// A map that fails to load or generate is dropped from the queue before
    /// its error is returned, so polling again continues with the next map.
    /// A failed map list returns the queue to `Idle`.
    pub fn poll(&mut self) -> Result<GenerationState, RuntimeError> {
        match self.state {
            GenerationState::Idle | GenerationState::Done => {}
            GenerationState::AwaitingMapInfo => {
                match self.provider.map_infos() {
                    Ok(Some(infos)) => {
                        self.enqueue(&infos);
                        self.request_front();
                    }
                    Ok(None) => {}
                    Err(e) => {
                        self.state = GenerationState::Idle;
                        return Err(e);
                    }
                }
            }
            GenerationState::AwaitingGridPair => {
                if !self.held {
                    if let Err(e) = self.collect_grids() {
                        self.queue.pop_front();
                        self.next_map();
                        return Err(e);
                    }
                }
            }
            GenerationState::Generating => {
                let result = self.generate_front();
                self.next_map();
                result?;
            }
        }
        Ok(self.state)
    }

    /// Poll until done, advancing through every hold
    ///
    /// Spins while the provider reports pending data.
    pub fn run_to_completion(&mut self) -> Result<Vec<u32>, RuntimeError> {
        if self.state == GenerationState::Idle {
            self.start();
        }
        while self.poll()? != GenerationState::Done {
            self.advance();
        }
        Ok(self.created.clone())
    }

    fn enqueue(&mut self, infos: &[MapInfo]) {
        for info in infos {
            if self.config.is_palette(info.parent_id) {
                self.queue.push_back(QueuedMap {
                    target: info.id,
                    palette: info.parent_id,
                });
            }
        }
        info!("{} target maps queued", self.queue.len());
    }

    fn request_front(&mut self) {
        match self.queue.front().copied() {
            Some(next) => {
                self.provider.request_grid(next.target);
                self.provider.request_grid(next.palette);
                self.state = GenerationState::AwaitingGridPair;
            }
            None => {
                self.state = GenerationState::Done;
                info!("All maps created ({})", self.created.len());
            }
        }
    }

    fn collect_grids(&mut self) -> Result<(), RuntimeError> {
        let Some(next) = self.queue.front().copied() else {
            self.state = GenerationState::Done;
            return Ok(());
        };
        if self.target.is_none() {
            self.target = self.provider.take_grid(next.target)?;
        }
        if self.palette.is_none() {
            self.palette = self.provider.take_grid(next.palette)?;
        }
        if self.target.is_some() && self.palette.is_some() {
            self.state = GenerationState::Generating;
        }
        Ok(())
    }

    fn generate_front(&mut self) -> Result<(), RuntimeError> {
        let (Some(current), Some(palette), Some(mut target)) =
            (self.queue.pop_front(), self.palette.take(), self.target.take())
        else {
            return Err(RuntimeError::InvalidFormat("generation started without both grids".to_string()));
        };

        info!("Create _Map{:03} from palette Map{:03}", current.target, current.palette);
        let options = self.config.options_for(current.target, &target)?;
        debug!(?options, "Resolved options");

        generate_map(&palette, &mut target, &options, current.target)?;
        self.sink.save(current.target, &target)?;
        self.created.push(current.target);
        info!("Map{:03} OK!", current.target);
        Ok(())
    }

    fn next_map(&mut self) {
        self.palette = None;
        self.target = None;
        if self.config.diagnostic && !self.queue.is_empty() {
            self.held = true;
            self.state = GenerationState::AwaitingGridPair;
        } else {
            self.request_front();
        }
    }
}
