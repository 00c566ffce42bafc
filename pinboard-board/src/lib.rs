//! Pinboard Board - the masonry board session.
//!
//! This crate ties the pieces together:
//! - Readiness tracking (arrival order of item sources)
//! - Layout control (column count, board width, repacking)
//! - Configuration (JSON, validated)
//!
//! A [`Board`] owns all of its state. Item sources report through a channel
//! of `SourceEvent`s, and the board consumes them on a single thread, so
//! readiness bookkeeping and packing never race.

pub mod config;
pub mod controller;
pub mod readiness;

mod error;

pub use config::BoardConfig;
pub use controller::{Layout, LayoutController, PlacedCard};
pub use error::{BoardError, ConfigError};
pub use readiness::{ItemHandle, LoadProgress, ReadinessTracker, ReadyItem};

use std::sync::Arc;

use crossbeam_channel::{Receiver, TryRecvError};
use pinboard_api::{ItemSource, Rank, SourceEvent};
use pinboard_loader::{LoaderPool, SourceResolver};

/// A board session: configuration, arrivals, and the current layout.
#[derive(Debug)]
pub struct Board {
    tracker: ReadinessTracker,
    controller: LayoutController,
}

impl Board {
    /// Create an empty board from a validated config.
    pub fn new(config: BoardConfig) -> Result<Self, BoardError> {
        config.validate()?;
        Ok(Self {
            tracker: ReadinessTracker::new(),
            controller: LayoutController::new(config),
        })
    }

    /// Create a board and register every source, in order.
    pub fn with_sources<I>(config: BoardConfig, sources: I) -> Result<Self, BoardError>
    where
        I: IntoIterator,
        I::Item: Into<ItemSource>,
    {
        let mut board = Self::new(config)?;
        for source in sources {
            board.register(source.into())?;
        }
        Ok(board)
    }

    /// Register an item. Only allowed before the first event is handled.
    pub fn register(&mut self, source: ItemSource) -> Result<ItemHandle, BoardError> {
        self.tracker.register(source)
    }

    /// Start one loader worker per registered item.
    ///
    /// The returned receiver yields each item's terminal event in the order
    /// the sources finish; feed it to [`Board::drain`] or
    /// [`Board::run_until_complete`].
    pub fn spawn_loaders(&self, resolver: Arc<dyn SourceResolver>) -> (LoaderPool, Receiver<SourceEvent>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        let sources = self
            .tracker
            .sources()
            .map(|(id, source)| (id, source.clone()));
        let pool = LoaderPool::spawn_all(sources, resolver, tx);
        (pool, rx)
    }

    /// Apply one source event.
    ///
    /// The item gets the next arrival rank. When it is the last one to
    /// arrive, the board is packed.
    pub fn handle_event(&mut self, event: SourceEvent) -> Result<Rank, BoardError> {
        let id = event.id;
        let marked = match self.tracker.handle(id) {
            Some(handle) => self.tracker.mark_ready(handle, &event.outcome, self.controller.config()),
            None => Err(BoardError::UnknownItem(id)),
        };
        let rank = marked.inspect_err(|e| tracing::warn!(%id, "ignoring source event: {}", e))?;

        if self.tracker.is_complete() {
            self.controller.repack(&self.tracker);
        }
        Ok(rank)
    }

    /// Apply every event already waiting on the channel without blocking.
    ///
    /// Rejected events are logged and skipped. Returns how many were applied.
    pub fn drain(&mut self, events: &Receiver<SourceEvent>) -> usize {
        let mut applied = 0;
        loop {
            match events.try_recv() {
                Ok(event) => {
                    if self.handle_event(event).is_ok() {
                        applied += 1;
                    }
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        self.pack_if_unpacked();
        applied
    }

    /// Block on the channel until every item has arrived.
    ///
    /// Returns false if the channel closed first, which means some source
    /// never reported and the board stays unpacked.
    pub fn run_until_complete(&mut self, events: &Receiver<SourceEvent>) -> bool {
        while !self.tracker.is_complete() {
            match events.recv() {
                Ok(event) => {
                    // Already logged by handle_event.
                    let _ = self.handle_event(event);
                }
                Err(_) => {
                    let progress = self.tracker.progress();
                    tracing::warn!(
                        ready = progress.ready,
                        total = progress.total,
                        "event channel closed before all items arrived"
                    );
                    return false;
                }
            }
        }
        self.pack_if_unpacked();
        true
    }

    /// A board with nothing registered is complete before any event
    /// arrives; give it its (empty) layout.
    fn pack_if_unpacked(&mut self) {
        if self.tracker.is_complete() && self.controller.placements().is_none() {
            self.controller.repack(&self.tracker);
        }
    }

    /// Switch the column count. Counts below one become one.
    ///
    /// While items are still loading this only records the new count.
    pub fn reconfigure(&mut self, columns: i64) -> Option<&Layout> {
        self.controller.reconfigure(columns, &self.tracker);
        self.controller.placements()
    }

    /// Derive the column count from a new board width.
    pub fn resize(&mut self, width: f32) -> Option<&Layout> {
        self.controller.on_board_resized(width, &self.tracker);
        self.controller.placements()
    }

    /// The current layout. `None` until every item has arrived.
    pub fn layout(&self) -> Option<&Layout> {
        self.controller.placements()
    }

    /// Placed cards in arrival order. Empty until every item has arrived.
    pub fn cards(&self) -> impl Iterator<Item = &PlacedCard> {
        self.layout().into_iter().flat_map(|layout| layout.cards.values())
    }

    pub fn is_complete(&self) -> bool {
        self.tracker.is_complete()
    }

    pub fn progress(&self) -> LoadProgress {
        self.tracker.progress()
    }

    pub fn config(&self) -> &BoardConfig {
        self.controller.config()
    }

    pub fn column_count(&self) -> usize {
        self.controller.column_count()
    }

    pub fn board_width(&self) -> f32 {
        self.controller.board_width()
    }

    /// Column counts a presentation layer should offer for switching.
    ///
    /// Advisory only: [`Board::reconfigure`] accepts any count.
    pub fn column_choices(&self) -> &[u32] {
        &self.config().column_choices
    }

    pub fn tracker(&self) -> &ReadinessTracker {
        &self.tracker
    }

    /// The current layout as JSON, for a presentation layer.
    pub fn layout_json(&self) -> Option<Result<String, serde_json::Error>> {
        self.layout().map(serde_json::to_string)
    }
}
