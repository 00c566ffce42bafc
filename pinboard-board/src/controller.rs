//! Layout controller - owns the column configuration and the last layout.
//!
//! Any change of column count or board width triggers a full repack from
//! the tracker's ordered items. Packing only happens once every item has
//! arrived; a change made while items are still loading is remembered and
//! applied when the last one arrives.

use indexmap::IndexMap;
use pinboard_api::{ItemId, ItemStatus, Orientation, Placement, Rank, Size};
use pinboard_layout::{board_width, columns_for_width, ColumnPacker};
use serde::Serialize;

use crate::config::BoardConfig;
use crate::readiness::ReadinessTracker;

/// A card with its final position, ready for drawing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedCard {
    pub id: ItemId,
    pub rank: Rank,
    pub status: ItemStatus,
    pub placement: Placement,
    /// Rendered image size.
    pub render: Size,
    pub orientation: Orientation,
    /// Card box including padding and border.
    pub outer: Size,
}

/// The packed board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub column_count: usize,
    /// Board width the columns were derived from.
    pub width: f32,
    /// Height of the occupied area.
    pub height: f32,
    /// Cards in arrival order.
    pub cards: IndexMap<ItemId, PlacedCard>,
}

impl Layout {
    pub fn placement(&self, id: ItemId) -> Option<Placement> {
        self.cards.get(&id).map(|card| card.placement)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[derive(Debug)]
pub struct LayoutController {
    config: BoardConfig,
    column_count: usize,
    board_width: f32,
    layout: Option<Layout>,
}

impl LayoutController {
    /// Create a controller. The configured column count is clamped to one.
    pub fn new(mut config: BoardConfig) -> Self {
        let column_count = clamp_columns(config.columns);
        config.columns = saturating_i64(column_count);
        let board_width = board_width(column_count, config.card_width(), config.margin);

        Self {
            config,
            column_count,
            board_width,
            layout: None,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    pub fn board_width(&self) -> f32 {
        self.board_width
    }

    /// Switch to `requested` columns and resize the board to fit them.
    ///
    /// Counts below one become one. Returns true if a new layout was packed.
    pub fn reconfigure(&mut self, requested: i64, tracker: &ReadinessTracker) -> bool {
        let column_count = clamp_columns(requested);
        self.config.columns = saturating_i64(column_count);
        self.column_count = column_count;
        self.board_width = board_width(column_count, self.config.card_width(), self.config.margin);

        tracing::debug!(columns = column_count, width = self.board_width, "board reconfigured");
        self.repack(tracker)
    }

    /// Derive the column count from a new board width.
    ///
    /// The board width becomes the width of the derived columns, which may
    /// be narrower than `new_width`. Returns true if a new layout was packed.
    pub fn on_board_resized(&mut self, new_width: f32, tracker: &ReadinessTracker) -> bool {
        self.column_count = columns_for_width(new_width, self.config.card_width(), self.config.margin);
        self.config.columns = saturating_i64(self.column_count);
        self.board_width = board_width(self.column_count, self.config.card_width(), self.config.margin);

        tracing::debug!(
            columns = self.column_count,
            requested = new_width,
            width = self.board_width,
            "board resized"
        );
        self.repack(tracker)
    }

    /// Pack every ready item from scratch, if all of them have arrived.
    ///
    /// While loading is incomplete this is a no-op and any earlier layout
    /// stays as it was.
    pub fn repack(&mut self, tracker: &ReadinessTracker) -> bool {
        if !tracker.is_complete() {
            let progress = tracker.progress();
            tracing::debug!(ready = progress.ready, total = progress.total, "repack deferred until loading completes");
            return false;
        }

        let items = tracker.ordered_ready_items();
        let packer = ColumnPacker::new(self.column_count, self.config.card_width(), self.config.margin);
        let packing = packer.pack(items.iter().map(|item| (item.id, item.outer.height)));

        let cards = items
            .iter()
            .filter_map(|item| {
                let placement = *packing.placements.get(&item.id)?;
                let card = PlacedCard {
                    id: item.id,
                    rank: item.rank,
                    status: item.status,
                    placement,
                    render: item.render,
                    orientation: item.orientation,
                    outer: item.outer,
                };
                Some((item.id, card))
            })
            .collect();

        let layout = Layout {
            column_count: self.column_count,
            width: self.board_width,
            height: packing.height(),
            cards,
        };
        tracing::info!(
            cards = layout.len(),
            columns = layout.column_count,
            height = layout.height,
            "board packed"
        );
        self.layout = Some(layout);
        true
    }

    /// The last packed layout, if any.
    pub fn placements(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }
}

fn clamp_columns(requested: i64) -> usize {
    if requested < 1 {
        tracing::warn!(requested, "invalid column count, using 1");
        1
    } else {
        usize::try_from(requested).unwrap_or(usize::MAX)
    }
}

fn saturating_i64(column_count: usize) -> i64 {
    i64::try_from(column_count).unwrap_or(i64::MAX)
}
