//! Overlay module for Chopping
//!
//! Provides the full-screen selection overlay and its drag logic.

pub mod render;
pub mod selection;
pub mod window;

pub use selection::DragSelection;
pub use window::OverlayWindow;

use screen::{ScreenError, ScreenRegion};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OverlayError {
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    Windows(#[from] windows::core::Error),

    #[error("Screen error: {0}")]
    Screen(#[from] ScreenError),

    #[error("Overlay is not supported on this platform")]
    NotSupported,
}

pub type OverlayResult<T> = Result<T, OverlayError>;

/// Why a session ended without a region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// Escape pressed
    Escape,
    /// Rectangle with no width or height
    Degenerate,
    /// Overlay closed by the system
    Closed,
}

/// Selection outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// User selected a region
    Region(ScreenRegion),
    /// User cancelled
    Cancelled(CancelReason),
}

/// Source of one selection outcome per call
pub trait RegionSelector {
    fn select(&mut self) -> OverlayResult<SelectionOutcome>;
}
