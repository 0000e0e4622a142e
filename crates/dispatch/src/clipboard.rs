//! System clipboard

use crate::{DispatchError, DispatchResult};

/// Receives the recognized text of each capture
pub trait ClipboardSink: Send {
    fn set_text(&mut self, text: &str) -> DispatchResult<()>;
}

/// Clipboard backed by arboard
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> DispatchResult<()> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| DispatchError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| DispatchError::Clipboard(e.to_string()))?;

        log::debug!("Copied {} chars to clipboard", text.chars().count());
        Ok(())
    }
}
