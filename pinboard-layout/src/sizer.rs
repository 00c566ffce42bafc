//! Card sizing - natural image dimensions to rendered card dimensions.
//!
//! Cards have a fixed width. Wide images are scaled down to that width,
//! tall images are capped at a maximum height, and every card is at least
//! the minimum height. The caption strip under the image is added last.

use pinboard_api::{Orientation, Size};

/// Fit natural dimensions into a card.
///
/// Returns `(render_width, render_height, orientation)`. Images wider than
/// `fixed_width` are scaled so their width is exactly `fixed_width`, keeping
/// the aspect ratio. Portrait images then have their height capped at
/// `max_height`; the width is left as is.
///
/// This only sizes the image. The minimum card height and the caption are
/// applied on top by [`SizingRules::size`], which yields the displayed height.
pub fn size(natural_width: f32, natural_height: f32, fixed_width: f32, max_height: f32) -> (f32, f32, Orientation) {
    let (mut width, mut height) = (natural_width, natural_height);

    if width > fixed_width {
        height = height * fixed_width / width;
        width = fixed_width;
    }

    let orientation = Orientation::of(width, height);
    if orientation == Orientation::Portrait {
        height = height.min(max_height);
    }

    (width, height, orientation)
}

/// The constraints every card on a board is sized against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingRules {
    pub fixed_width: f32,
    pub min_height: f32,
    pub max_height: f32,
}

/// A card after sizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizedItem {
    /// Rendered image size.
    pub render: Size,
    pub orientation: Orientation,
    /// Image height floored at the minimum, plus the caption.
    pub displayed_height: f32,
}

impl SizingRules {
    /// Size a card from its natural dimensions and caption height.
    pub fn size(&self, natural: Size, caption_height: f32) -> SizedItem {
        let (width, height, orientation) = size(natural.width, natural.height, self.fixed_width, self.max_height);

        SizedItem {
            render: Size::new(width, height),
            orientation,
            displayed_height: height.max(self.min_height) + caption_height,
        }
    }
}

/// Padding and border drawn around every card.
///
/// Both are applied on all four sides, so the outer box grows by twice
/// their sum in each dimension.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CardChrome {
    pub padding: f32,
    pub border: f32,
}

impl CardChrome {
    #[inline]
    fn inset(&self) -> f32 {
        2.0 * (self.padding + self.border)
    }

    /// Outer width of a card whose content is `fixed_width` wide.
    pub fn outer_width(&self, fixed_width: f32) -> f32 {
        fixed_width + self.inset()
    }

    /// Outer height of a sized card. This is what the packer stacks.
    pub fn outer_height(&self, item: &SizedItem) -> f32 {
        item.displayed_height + self.inset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: SizingRules = SizingRules {
        fixed_width: 55.0,
        min_height: 45.0,
        max_height: 165.0,
    };

    #[test]
    fn test_wide_image_scales_to_fixed_width() {
        let (w, h, o) = size(110.0, 40.0, 55.0, 165.0);
        assert_eq!((w, h), (55.0, 20.0));
        assert_eq!(o, Orientation::Landscape);
    }

    #[test]
    fn test_narrow_image_keeps_natural_size() {
        let (w, h, o) = size(40.0, 30.0, 55.0, 165.0);
        assert_eq!((w, h), (40.0, 30.0));
        assert_eq!(o, Orientation::Landscape);
    }

    #[test]
    fn test_tall_portrait_caps_height_not_width() {
        // 100x1000 scales to 55x550, then the height is capped directly.
        let (w, h, o) = size(100.0, 1000.0, 55.0, 165.0);
        assert_eq!(o, Orientation::Portrait);
        assert_eq!(w, 55.0);
        assert_eq!(h, 165.0);
    }

    #[test]
    fn test_square_is_portrait() {
        let (_, h, o) = size(200.0, 200.0, 55.0, 165.0);
        assert_eq!(o, Orientation::Portrait);
        assert_eq!(h, 55.0);
    }

    #[test]
    fn test_landscape_is_not_capped() {
        // Landscape after scaling can never exceed the width, but an unscaled
        // one may still exceed max_height when max_height < fixed_width.
        let (_, h, o) = size(50.0, 40.0, 55.0, 30.0);
        assert_eq!(o, Orientation::Landscape);
        assert_eq!(h, 40.0);
    }

    #[test]
    fn test_displayed_height_floors_and_adds_caption() {
        let short = RULES.size(Size::new(110.0, 40.0), 0.0);
        assert_eq!(short.render, Size::new(55.0, 20.0));
        assert_eq!(short.displayed_height, 45.0);

        let captioned = RULES.size(Size::new(55.0, 100.0), 16.0);
        assert_eq!(captioned.displayed_height, 116.0);

        // The floor lifts the card, never the image.
        let (_, h, _) = size(110.0, 40.0, 55.0, 165.0);
        assert_eq!(h, short.render.height);
        assert!(short.displayed_height > h);
    }

    #[test]
    fn test_sizing_is_idempotent() {
        let first = RULES.size(Size::new(321.0, 987.0), 8.0);
        let second = RULES.size(Size::new(321.0, 987.0), 8.0);
        assert_eq!(first, second);

        // Sizing an already-sized image changes nothing.
        let again = RULES.size(first.render, 8.0);
        assert_eq!(again.render, first.render);
    }

    #[test]
    fn test_chrome_outer_box() {
        let chrome = CardChrome { padding: 5.0, border: 1.0 };
        let item = RULES.size(Size::new(55.0, 100.0), 0.0);
        assert_eq!(chrome.outer_width(55.0), 67.0);
        assert_eq!(chrome.outer_height(&item), 112.0);
        assert_eq!(CardChrome::default().outer_height(&item), 100.0);
    }
}
