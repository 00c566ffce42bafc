//! Item identity and source descriptors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a card: its registration index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Arrival rank: the 0-based order in which an item became ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rank(pub u32);

/// Where a card's content comes from.
///
/// The locator is opaque to the board; only a `SourceResolver` interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSource {
    /// URI or file path of the card image.
    pub locator: String,
    /// Height of the caption strip under the image. Falls back to the
    /// board's default caption height when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption_height: Option<f32>,
}

impl ItemSource {
    pub fn new(locator: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            caption_height: None,
        }
    }

    /// Override the caption height for this card.
    pub fn with_caption_height(mut self, height: f32) -> Self {
        self.caption_height = Some(height);
        self
    }
}

impl From<&str> for ItemSource {
    fn from(locator: &str) -> Self {
        Self::new(locator)
    }
}

/// Whether an item's source resolved or was replaced by a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ItemStatus {
    #[default]
    Loaded,
    /// The source failed; the card renders a placeholder.
    Unavailable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_json_omits_missing_caption() {
        let json = serde_json::to_string(&ItemSource::new("a.png")).unwrap();
        assert_eq!(json, r#"{"locator":"a.png"}"#);

        let parsed: ItemSource =
            serde_json::from_str(r#"{"locator":"b.png","caption_height":12.0}"#).unwrap();
        assert_eq!(parsed, ItemSource::new("b.png").with_caption_height(12.0));
    }

    #[test]
    fn test_item_id_display() {
        assert_eq!(ItemId(7).to_string(), "item#7");
    }
}
