//! Loader workers - one thread per item source.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender;
use pinboard_api::{ItemId, ItemSource, SourceEvent};

use crate::resolver::SourceResolver;

/// A worker resolving a single item source.
pub struct Loader {
    id: ItemId,
    handle: Option<JoinHandle<()>>,
}

impl Loader {
    /// Spawn a worker that resolves `source` and sends exactly one event.
    ///
    /// A failed resolution is reported as `SourceOutcome::Failed`; it is
    /// never retried.
    pub fn spawn(
        id: ItemId,
        source: ItemSource,
        resolver: Arc<dyn SourceResolver>,
        events: Sender<SourceEvent>,
    ) -> Self {
        let handle = thread::spawn(move || {
            let event = match resolver.resolve(&source) {
                Ok(natural) => SourceEvent::ready(id, natural),
                Err(e) => {
                    tracing::warn!(%id, locator = %source.locator, "source unavailable: {}", e);
                    SourceEvent::failed(id, e.to_string())
                }
            };

            // The board may already be gone; nothing left to report to.
            if events.send(event).is_err() {
                tracing::debug!(%id, "board dropped before source resolved");
            }
        });

        Self {
            id,
            handle: Some(handle),
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Wait for the worker to finish.
    pub fn join(mut self) -> thread::Result<()> {
        match self.handle.take() {
            Some(handle) => handle.join(),
            None => Ok(()),
        }
    }
}

/// All workers started for a board.
#[derive(Default)]
pub struct LoaderPool {
    loaders: Vec<Loader>,
}

impl LoaderPool {
    /// Start one worker per `(id, source)` pair.
    pub fn spawn_all<I>(sources: I, resolver: Arc<dyn SourceResolver>, events: Sender<SourceEvent>) -> Self
    where
        I: IntoIterator<Item = (ItemId, ItemSource)>,
    {
        let loaders: Vec<Loader> = sources
            .into_iter()
            .map(|(id, source)| Loader::spawn(id, source, Arc::clone(&resolver), events.clone()))
            .collect();

        tracing::debug!(workers = loaders.len(), "loader pool started");
        Self { loaders }
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }

    /// Wait for every worker. Returns the ids of workers that panicked.
    pub fn join_all(self) -> Vec<ItemId> {
        let mut panicked = Vec::new();
        for loader in self.loaders {
            let id = loader.id();
            if loader.join().is_err() {
                tracing::warn!(%id, "loader worker panicked");
                panicked.push(id);
            }
        }
        panicked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::FixedResolver;
    use pinboard_api::{Size, SourceOutcome};

    #[test]
    fn test_each_source_emits_one_event() {
        let resolver = Arc::new(
            FixedResolver::new()
                .with("a", Size::new(10.0, 20.0))
                .with("b", Size::new(30.0, 40.0)),
        );
        let (tx, rx) = crossbeam_channel::unbounded();

        let sources = vec![
            (ItemId(0), ItemSource::new("a")),
            (ItemId(1), ItemSource::new("b")),
            (ItemId(2), ItemSource::new("missing")),
        ];
        let pool = LoaderPool::spawn_all(sources, resolver, tx);
        assert_eq!(pool.len(), 3);
        assert!(pool.join_all().is_empty());

        let mut events: Vec<SourceEvent> = rx.try_iter().collect();
        events.sort_by_key(|e| e.id);
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], SourceEvent::ready(ItemId(0), Size::new(10.0, 20.0)));
        assert_eq!(events[1], SourceEvent::ready(ItemId(1), Size::new(30.0, 40.0)));
        assert!(matches!(events[2].outcome, SourceOutcome::Failed { .. }));
    }

    #[test]
    fn test_dropped_receiver_does_not_panic() {
        let resolver = Arc::new(FixedResolver::new().with("a", Size::new(1.0, 1.0)));
        let (tx, rx) = crossbeam_channel::unbounded();
        drop(rx);

        let loader = Loader::spawn(ItemId(0), ItemSource::new("a"), resolver, tx);
        assert!(loader.join().is_ok());
    }
}
