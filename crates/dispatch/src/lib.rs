//! Capture dispatch for Chopping
//!
//! Takes a selected region through screenshot, persistence, QR decoding,
//! the OCR fallback and the clipboard, and reports one [`CaptureResult`].

pub mod clipboard;
pub mod dispatcher;

pub use clipboard::{ClipboardSink, SystemClipboard};
pub use dispatcher::{DispatchConfig, Dispatcher};

use export::ExportError;
use overlay::OverlayError;
use recognize::RecognizeError;
use screen::{ScreenError, ScreenRegion};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Screen error: {0}")]
    Screen(#[from] ScreenError),

    #[error("Overlay error: {0}")]
    Overlay(#[from] OverlayError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Recognition error: {0}")]
    Recognize(#[from] RecognizeError),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Capture session aborted: {0}")]
    Aborted(String),
}

pub type DispatchResult<T> = Result<T, DispatchError>;

/// Where the recognized text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    /// QR/bar code payload
    Code,
    /// OCR output
    Ocr,
}

/// Outcome of one capture session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureResult {
    success: bool,
    region: Option<ScreenRegion>,
    image_path: Option<PathBuf>,
    text: Option<String>,
    source: Option<TextSource>,
}

impl CaptureResult {
    /// Session ended without a region; nothing was captured
    pub fn cancelled() -> Self {
        Self {
            success: false,
            region: None,
            image_path: None,
            text: None,
            source: None,
        }
    }

    pub fn recognized(
        region: ScreenRegion,
        image_path: PathBuf,
        text: String,
        source: TextSource,
    ) -> Self {
        Self {
            success: true,
            region: Some(region),
            image_path: Some(image_path),
            text: Some(text),
            source: Some(source),
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn region(&self) -> Option<&ScreenRegion> {
        self.region.as_ref()
    }

    pub fn image_path(&self) -> Option<&Path> {
        self.image_path.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn source(&self) -> Option<TextSource> {
        self.source
    }
}
