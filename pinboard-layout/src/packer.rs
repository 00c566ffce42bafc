//! Column packer - greedy masonry placement.
//!
//! Items are placed one at a time, in arrival order, into whichever column
//! currently has the smallest bottom edge. Ties go to the leftmost column.
//! Every pack starts from empty columns; nothing is patched incrementally.

use indexmap::IndexMap;
use pinboard_api::{ItemId, Placement};

// =========================================================================
// Board geometry
// =========================================================================

/// Number of columns that fit in `board_width`.
///
/// Never less than one, including for zero, negative, or NaN widths.
pub fn columns_for_width(board_width: f32, column_width: f32, margin: f32) -> usize {
    let pitch = column_width + margin;
    if pitch.is_nan() || pitch <= 0.0 {
        return 1;
    }
    let fit = (board_width / pitch).floor();
    if fit >= 1.0 { fit as usize } else { 1 }
}

/// Width of a board holding `column_count` columns, with a margin on both
/// outer edges and between every pair of columns.
pub fn board_width(column_count: usize, column_width: f32, margin: f32) -> f32 {
    let columns = column_count.max(1) as f32;
    columns * column_width + margin * (columns + 1.0)
}

// =========================================================================
// Column state
// =========================================================================

/// Bottom edge of every column during a single packing pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnState {
    bottoms: Vec<f32>,
}

impl ColumnState {
    /// Empty columns. `column_count` must be at least one.
    pub fn new(column_count: usize) -> Self {
        debug_assert!(column_count >= 1, "packing needs at least one column");
        Self {
            bottoms: vec![0.0; column_count],
        }
    }

    /// The column with the smallest bottom, leftmost among ties.
    pub fn shortest(&self) -> usize {
        let mut best = 0;
        for (column, &bottom) in self.bottoms.iter().enumerate().skip(1) {
            if bottom < self.bottoms[best] {
                best = column;
            }
        }
        best
    }

    /// Append an item of `height` to `column`, followed by `margin`.
    pub fn push(&mut self, column: usize, height: f32, margin: f32) {
        self.bottoms[column] += height + margin;
    }

    pub fn bottoms(&self) -> &[f32] {
        &self.bottoms
    }

    /// Largest column bottom (zero for untouched columns).
    pub fn max_bottom(&self) -> f32 {
        self.bottoms.iter().copied().fold(0.0, f32::max)
    }
}

// =========================================================================
// ColumnPacker
// =========================================================================

/// Greedy masonry packer for cards of a shared width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnPacker {
    column_count: usize,
    /// Outer width shared by every card; the column pitch is this plus margin.
    column_width: f32,
    margin: f32,
}

/// Result of one packing pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Packing {
    /// Placements in arrival order.
    pub placements: IndexMap<ItemId, Placement>,
    /// Final state of the columns in use (bottoms include the trailing
    /// margin). Empty columns past the last item are not tracked.
    pub columns: ColumnState,
    margin: f32,
}

impl Packing {
    /// Height of the occupied area, including the top margin.
    pub fn height(&self) -> f32 {
        if self.placements.is_empty() {
            0.0
        } else {
            self.margin + self.columns.max_bottom()
        }
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

impl ColumnPacker {
    /// Create a packer. A column count of zero is treated as one.
    pub fn new(column_count: usize, column_width: f32, margin: f32) -> Self {
        Self {
            column_count: column_count.max(1),
            column_width,
            margin,
        }
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Pack `(id, height)` pairs given in arrival order.
    ///
    /// Same input order and configuration always yields identical placements.
    /// Only the first `min(column_count, items)` columns are tracked: with
    /// leftmost tie-breaking, n items never reach a column at index n or
    /// beyond, so the remaining columns would stay empty.
    pub fn pack<I>(&self, items: I) -> Packing
    where
        I: IntoIterator<Item = (ItemId, f32)>,
    {
        let items: Vec<(ItemId, f32)> = items.into_iter().collect();
        let mut columns = ColumnState::new(self.column_count.min(items.len()).max(1));
        let mut placements = IndexMap::with_capacity(items.len());

        for (id, height) in items {
            let column = columns.shortest();
            let placement = Placement {
                column,
                x: self.margin + column as f32 * (self.column_width + self.margin),
                y: self.margin + columns.bottoms()[column],
            };
            columns.push(column, height, self.margin);

            let previous = placements.insert(id, placement);
            debug_assert!(previous.is_none(), "{id} packed twice");
        }

        tracing::trace!(
            items = placements.len(),
            columns = self.column_count,
            "column pack finished"
        );

        Packing {
            placements,
            columns,
            margin: self.margin,
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
