//! Pinboard Loader - resolves item sources on worker threads.
//!
//! Every source gets its own worker. Each worker emits exactly one terminal
//! `SourceEvent` onto the board's channel and exits, so the order events
//! arrive in is the order the sources finished.

pub mod resolver;
pub mod worker;

pub use resolver::{FixedResolver, ImageFileResolver, SourceError, SourceResolver};
pub use worker::{Loader, LoaderPool};
