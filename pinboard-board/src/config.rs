//! Board configuration.

use std::fs;
use std::path::Path;

use pinboard_api::{ItemSource, Size, SourceOutcome};
use pinboard_layout::{CardChrome, SizedItem, SizingRules};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Board-wide card constraints and column settings.
///
/// Missing JSON fields take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Requested column count. Values below one are clamped to one.
    pub columns: i64,
    /// Fixed content width of every card.
    pub item_width: f32,
    pub min_item_height: f32,
    pub max_item_height: f32,
    /// Gap between cards and around the board edge.
    pub margin: f32,
    pub padding: f32,
    pub border: f32,
    /// Caption strip height for cards that don't specify their own.
    pub caption_height: f32,
    /// Natural size assumed for cards whose source failed.
    pub placeholder: Size,
    /// Column counts offered to the user.
    pub column_choices: Vec<u32>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            columns: 10,
            item_width: 55.0,
            min_item_height: 45.0,
            max_item_height: 165.0,
            margin: 5.0,
            padding: 0.0,
            border: 0.0,
            caption_height: 0.0,
            placeholder: Size::new(55.0, 45.0),
            column_choices: (4..=10).collect(),
        }
    }
}

impl BoardConfig {
    /// Defaults plus the card chrome of the classic board: 5px padding,
    /// a 1px border, and a two-line caption.
    pub fn classic() -> Self {
        Self {
            padding: 5.0,
            border: 1.0,
            caption_height: 32.0,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Check the card constraints. The column count is not checked; it is
    /// clamped when applied.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lengths = [
            ("item_width", self.item_width),
            ("min_item_height", self.min_item_height),
            ("max_item_height", self.max_item_height),
            ("margin", self.margin),
            ("padding", self.padding),
            ("border", self.border),
            ("caption_height", self.caption_height),
            ("placeholder.width", self.placeholder.width),
            ("placeholder.height", self.placeholder.height),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if self.item_width == 0.0 {
            return Err(ConfigError::Invalid("item_width must be positive".into()));
        }
        if self.min_item_height > self.max_item_height {
            return Err(ConfigError::Invalid(format!(
                "min_item_height {} exceeds max_item_height {}",
                self.min_item_height, self.max_item_height
            )));
        }
        if self.column_choices.contains(&0) {
            return Err(ConfigError::Invalid("column_choices must be positive".into()));
        }
        Ok(())
    }

    /// Outer width of every card, which is also the column width.
    pub fn card_width(&self) -> f32 {
        self.chrome().outer_width(self.item_width)
    }

    pub fn chrome(&self) -> CardChrome {
        CardChrome {
            padding: self.padding,
            border: self.border,
        }
    }

    pub fn sizing_rules(&self) -> SizingRules {
        SizingRules {
            fixed_width: self.item_width,
            min_height: self.min_item_height,
            max_height: self.max_item_height,
        }
    }

    /// Size a card from how its source resolved.
    ///
    /// Failed sources are sized from the placeholder exactly like a loaded
    /// image of that size would be.
    pub(crate) fn size_card(&self, source: &ItemSource, outcome: &SourceOutcome) -> CardSize {
        let natural = match outcome {
            SourceOutcome::Ready { natural } => *natural,
            SourceOutcome::Failed { .. } => self.placeholder,
        };
        let caption = source.caption_height.unwrap_or(self.caption_height);
        let sized = self.sizing_rules().size(natural, caption);

        CardSize {
            natural,
            sized,
            outer: Size::new(self.card_width(), self.chrome().outer_height(&sized)),
        }
    }
}

/// Everything sizing decides about one card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CardSize {
    pub natural: Size,
    pub sized: SizedItem,
    pub outer: Size,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let config = BoardConfig::from_json("{}").unwrap();
        assert_eq!(config, BoardConfig::default());
        assert_eq!(config.column_choices, vec![4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_partial_json_overrides() {
        let config = BoardConfig::from_json(r#"{"columns": 3, "margin": 8}"#).unwrap();
        assert_eq!(config.columns, 3);
        assert_eq!(config.margin, 8.0);
        assert_eq!(config.item_width, 55.0);
    }

    #[test]
    fn test_rejects_inverted_height_bounds() {
        let err = BoardConfig::from_json(r#"{"min_item_height": 200}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "got {err:?}");
    }

    #[test]
    fn test_rejects_negative_lengths() {
        let err = BoardConfig::from_json(r#"{"margin": -1}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = BoardConfig::from_json("{columns:").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");
        fs::write(&path, r#"{"columns": 6}"#).unwrap();
        assert_eq!(BoardConfig::load(&path).unwrap().columns, 6);

        let err = BoardConfig::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_classic_card_width() {
        // 55 content + 2 * 5 padding + 2 * 1 border
        assert_eq!(BoardConfig::classic().card_width(), 67.0);
        assert_eq!(BoardConfig::default().card_width(), 55.0);
    }

    #[test]
    fn test_failed_source_uses_placeholder() {
        let config = BoardConfig::default();
        let source = ItemSource::new("gone.jpg");
        let card = config.size_card(&source, &SourceOutcome::Failed { reason: "404".into() });
        assert_eq!(card.natural, config.placeholder);
        assert_eq!(card.sized.displayed_height, 45.0);
    }

    #[test]
    fn test_caption_override() {
        let config = BoardConfig::classic();
        let source = ItemSource::new("a.png").with_caption_height(10.0);
        let ready = SourceOutcome::Ready { natural: Size::new(55.0, 100.0) };
        let card = config.size_card(&source, &ready);
        assert_eq!(card.sized.displayed_height, 110.0);
        assert_eq!(card.outer, Size::new(67.0, 122.0));
    }
}
