//! Pinboard API - Shared types for the masonry board.
//!
//! Everything that crosses a crate boundary lives here: item identity,
//! geometry, and the terminal events emitted by item sources.

mod event;
mod geometry;
mod item;

pub use event::*;
pub use geometry::*;
pub use item::*;
