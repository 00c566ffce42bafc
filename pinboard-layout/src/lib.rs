//! Pinboard Layout - card sizing and masonry column packing.
//!
//! Both halves are pure functions of their inputs:
//! - [`sizer`] turns natural image dimensions into rendered card sizes.
//! - [`packer`] assigns each card a column and offset, in arrival order.
//!
//! # Architecture
//!
//! ```text
//! natural size -> SizingRules::size -> CardChrome::outer_height -> ColumnPacker::pack
//! ```

pub mod packer;
pub mod sizer;

pub use packer::{board_width, columns_for_width, ColumnPacker, ColumnState, Packing};
pub use sizer::{size, CardChrome, SizedItem, SizingRules};
