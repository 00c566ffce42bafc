//! Geometry shared by the sizer, the packer, and presentation.

use serde::{Deserialize, Serialize};

/// A width/height pair in board units (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self { width, height }
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }
}

/// Portrait or landscape, as decided after width scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Landscape only when strictly wider than tall.
    pub fn of(width: f32, height: f32) -> Self {
        if width > height {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }
}

/// Where a card sits on the board. Top-left corner plus its column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub column: usize,
    pub x: f32,
    pub y: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_ties_are_portrait() {
        assert_eq!(Orientation::of(10.0, 10.0), Orientation::Portrait);
        assert_eq!(Orientation::of(10.0, 9.0), Orientation::Landscape);
        assert_eq!(Orientation::of(9.0, 10.0), Orientation::Portrait);
    }

    #[test]
    fn test_size_from_pixel_dims() {
        assert_eq!(Size::from((640u32, 480u32)), Size::new(640.0, 480.0));
    }
}
