//! Readiness tracking - records the order in which item sources resolve.
//!
//! Items are registered up front. Each one is later marked ready exactly
//! once, success or failure, and receives the next arrival rank. The set is
//! complete when every registered item has arrived.

use pinboard_api::{ItemId, ItemSource, ItemStatus, Orientation, Rank, Size, SourceOutcome};
use serde::Serialize;

use crate::config::BoardConfig;
use crate::error::BoardError;

/// Handle returned by [`ReadinessTracker::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemHandle(ItemId);

impl ItemHandle {
    pub fn id(&self) -> ItemId {
        self.0
    }
}

/// An item whose source has resolved, with its size fixed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadyItem {
    pub id: ItemId,
    pub rank: Rank,
    pub status: ItemStatus,
    /// Dimensions reported by the source (the placeholder's, if it failed).
    pub natural: Size,
    /// Rendered image size.
    pub render: Size,
    pub orientation: Orientation,
    /// Image height floored at the minimum, plus caption.
    pub displayed_height: f32,
    /// Card box including padding and border; its height is what gets packed.
    pub outer: Size,
}

/// How many items have arrived out of how many were registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadProgress {
    pub ready: usize,
    pub total: usize,
}

impl LoadProgress {
    pub fn is_complete(&self) -> bool {
        self.ready == self.total
    }
}

#[derive(Debug)]
struct Entry {
    source: ItemSource,
    rank: Option<Rank>,
}

/// Collects items in arrival order.
#[derive(Debug, Default)]
pub struct ReadinessTracker {
    /// Registered items, indexed by `ItemId`.
    entries: Vec<Entry>,
    /// Ready items, indexed by rank.
    arrivals: Vec<ReadyItem>,
}

impl ReadinessTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item before any readiness signal has been delivered.
    pub fn register(&mut self, source: ItemSource) -> Result<ItemHandle, BoardError> {
        if !self.arrivals.is_empty() {
            return Err(BoardError::RegistrationClosed);
        }
        let id = ItemId(self.entries.len() as u32);
        self.entries.push(Entry { source, rank: None });
        Ok(ItemHandle(id))
    }

    /// Look up the handle for a registered id.
    pub fn handle(&self, id: ItemId) -> Option<ItemHandle> {
        ((id.0 as usize) < self.entries.len()).then_some(ItemHandle(id))
    }

    pub fn source(&self, handle: ItemHandle) -> &ItemSource {
        &self.entries[handle.0.0 as usize].source
    }

    /// Every registered item with its source, in registration order.
    pub fn sources(&self) -> impl Iterator<Item = (ItemId, &ItemSource)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (ItemId(index as u32), &entry.source))
    }

    /// Record that an item's source resolved and assign its arrival rank.
    ///
    /// A failed source still gets a rank; it is sized from the configured
    /// placeholder. Marking the same item twice fails without changing state.
    pub fn mark_ready(
        &mut self,
        handle: ItemHandle,
        outcome: &SourceOutcome,
        config: &BoardConfig,
    ) -> Result<Rank, BoardError> {
        let id = handle.id();
        let entry = self
            .entries
            .get_mut(id.0 as usize)
            .ok_or(BoardError::UnknownItem(id))?;
        if entry.rank.is_some() {
            return Err(BoardError::DuplicateReadiness(id));
        }

        let rank = Rank(self.arrivals.len() as u32);
        entry.rank = Some(rank);

        let card = config.size_card(&entry.source, outcome);
        let status = if outcome.is_failure() {
            ItemStatus::Unavailable
        } else {
            ItemStatus::Loaded
        };

        self.arrivals.push(ReadyItem {
            id,
            rank,
            status,
            natural: card.natural,
            render: card.sized.render,
            orientation: card.sized.orientation,
            displayed_height: card.sized.displayed_height,
            outer: card.outer,
        });

        tracing::debug!(%id, rank = rank.0, ?status, "item ready");
        Ok(rank)
    }

    pub fn rank_of(&self, handle: ItemHandle) -> Option<Rank> {
        self.entries.get(handle.0.0 as usize).and_then(|entry| entry.rank)
    }

    /// True once every registered item has been marked ready.
    pub fn is_complete(&self) -> bool {
        self.arrivals.len() == self.entries.len()
    }

    pub fn progress(&self) -> LoadProgress {
        LoadProgress {
            ready: self.arrivals.len(),
            total: self.entries.len(),
        }
    }

    /// Ready items sorted by rank.
    pub fn ordered_ready_items(&self) -> &[ReadyItem] {
        &self.arrivals
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
