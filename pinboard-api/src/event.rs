//! Terminal events emitted by item sources to the board.

use serde::{Deserialize, Serialize};

use crate::{ItemId, Size};

/// The single terminal event an item source produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceEvent {
    pub id: ItemId,
    pub outcome: SourceOutcome,
}

impl SourceEvent {
    pub fn ready(id: ItemId, natural: Size) -> Self {
        Self {
            id,
            outcome: SourceOutcome::Ready { natural },
        }
    }

    pub fn failed(id: ItemId, reason: impl Into<String>) -> Self {
        Self {
            id,
            outcome: SourceOutcome::Failed {
                reason: reason.into(),
            },
        }
    }
}

/// How an item source resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SourceOutcome {
    /// The source loaded and reported its natural dimensions.
    Ready { natural: Size },

    /// The source could not be resolved (network, format, missing file).
    Failed { reason: String },
}

impl SourceOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}
