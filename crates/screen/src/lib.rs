//! Screen module for Chopping
//!
//! Provides virtual desktop geometry and region screenshots.

pub mod desktop;
pub mod frame;
pub mod grab;

pub use desktop::VirtualDesktop;
pub use frame::FrameData;
pub use grab::{GdiScreen, ScreenSource};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenError {
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    Windows(#[from] windows::core::Error),

    #[error("GDI error: {0}")]
    Gdi(String),

    #[error("Invalid screen region")]
    InvalidRegion,

    #[error("Screen capture is not supported on this platform")]
    NotSupported,
}

pub type ScreenResult<T> = Result<T, ScreenError>;

/// Rectangle in virtual desktop pixels, `right > left` and `bottom > top`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenRegion {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

impl ScreenRegion {
    /// Build a region from two opposite corners in any order.
    ///
    /// Returns `None` when the corners share an x or a y coordinate.
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Option<Self> {
        let region = Self {
            left: x1.min(x2),
            top: y1.min(y2),
            right: x1.max(x2),
            bottom: y1.max(y2),
        };

        if region.right > region.left && region.bottom > region.top {
            Some(region)
        } else {
            None
        }
    }

    pub fn left(&self) -> i32 {
        self.left
    }

    pub fn top(&self) -> i32 {
        self.top
    }

    pub fn right(&self) -> i32 {
        self.right
    }

    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    pub fn width(&self) -> u32 {
        (self.right - self.left) as u32
    }

    pub fn height(&self) -> u32 {
        (self.bottom - self.top) as u32
    }
}

impl std::fmt::Display for ScreenRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {}, {})", self.left, self.top, self.right, self.bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners_are_normalized() {
        let region = ScreenRegion::from_corners(300, 40, 100, 200).unwrap();
        assert_eq!(region.left(), 100);
        assert_eq!(region.top(), 40);
        assert_eq!(region.right(), 300);
        assert_eq!(region.bottom(), 200);
        assert_eq!(region.width(), 200);
        assert_eq!(region.height(), 160);
    }

    #[test]
    fn test_degenerate_corners_rejected() {
        assert!(ScreenRegion::from_corners(10, 10, 10, 50).is_none());
        assert!(ScreenRegion::from_corners(10, 10, 50, 10).is_none());
        assert!(ScreenRegion::from_corners(7, 7, 7, 7).is_none());
    }

    #[test]
    fn test_negative_coordinates() {
        let region = ScreenRegion::from_corners(-1910, -5, -1800, 100).unwrap();
        assert_eq!(region.left(), -1910);
        assert_eq!(region.width(), 110);
        assert_eq!(region.height(), 105);
    }

    #[test]
    fn test_display() {
        let region = ScreenRegion::from_corners(1, 2, 3, 4).unwrap();
        assert_eq!(region.to_string(), "(1, 2, 3, 4)");
    }
}
