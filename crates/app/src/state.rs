//! State machine for Chopping

use dispatch::{CaptureResult, DispatchResult};

/// Application state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Ready for a new selection
    Idle,
    /// Overlay visible, session in progress
    Selecting,
    /// Last session produced a capture
    Captured(CaptureResult),
    /// Last session was cancelled
    NotTaken,
    /// Last session failed
    Failed(String),
}

impl AppState {
    /// Get display text for current state
    pub fn display_text(&self) -> String {
        match self {
            AppState::Idle => "Select the area to analyze".to_string(),
            AppState::Selecting => "Selecting area...".to_string(),
            AppState::Captured(result) => match result.source() {
                Some(dispatch::TextSource::Code) => "QR/bar code detected".to_string(),
                _ => "Text found".to_string(),
            },
            AppState::NotTaken => "Capture not taken, try again".to_string(),
            AppState::Failed(msg) => format!("Capture failed: {}", msg),
        }
    }

    /// Check if a new selection may start
    pub fn can_draw(&self) -> bool {
        !matches!(self, AppState::Selecting)
    }

    pub fn capture(&self) -> Option<&CaptureResult> {
        match self {
            AppState::Captured(result) => Some(result),
            _ => None,
        }
    }
}

/// State machine transitions
pub struct StateMachine {
    state: AppState,
}

impl StateMachine {
    /// Create a new state machine
    pub fn new() -> Self {
        Self {
            state: AppState::Idle,
        }
    }

    /// Get current state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Transition to selecting state
    pub fn start_selecting(&mut self) -> bool {
        if self.state.can_draw() {
            self.state = AppState::Selecting;
            true
        } else {
            false
        }
    }

    /// Session ended, store its outcome
    pub fn finish(&mut self, result: DispatchResult<CaptureResult>) -> bool {
        if !matches!(self.state, AppState::Selecting) {
            return false;
        }

        self.state = match result {
            Ok(capture) if capture.success() => AppState::Captured(capture),
            Ok(_) => AppState::NotTaken,
            Err(e) => AppState::Failed(e.to_string()),
        };
        true
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dispatch::{DispatchError, TextSource};
    use recognize::RecognizeError;
    use screen::ScreenRegion;
    use std::path::PathBuf;

    fn captured(source: TextSource) -> CaptureResult {
        CaptureResult::recognized(
            ScreenRegion::from_corners(0, 0, 20, 20).unwrap(),
            PathBuf::from("capture.png"),
            "HELLO".to_string(),
            source,
        )
    }

    #[test]
    fn test_one_session_at_a_time() {
        let mut machine = StateMachine::new();
        assert!(machine.start_selecting());
        assert!(!machine.start_selecting());
        assert_eq!(machine.state(), &AppState::Selecting);
    }

    #[test]
    fn test_finish_with_capture() {
        let mut machine = StateMachine::new();
        machine.start_selecting();
        assert!(machine.finish(Ok(captured(TextSource::Code))));
        assert_eq!(machine.state().display_text(), "QR/bar code detected");
        assert_eq!(machine.state().capture().and_then(|c| c.text()), Some("HELLO"));

        // A new session may start from a finished one
        assert!(machine.start_selecting());
        assert!(machine.finish(Ok(captured(TextSource::Ocr))));
        assert_eq!(machine.state().display_text(), "Text found");
    }

    #[test]
    fn test_finish_cancelled() {
        let mut machine = StateMachine::new();
        machine.start_selecting();
        machine.finish(Ok(CaptureResult::cancelled()));
        assert_eq!(machine.state(), &AppState::NotTaken);
        assert_eq!(machine.state().display_text(), "Capture not taken, try again");
    }

    #[test]
    fn test_finish_failed() {
        let mut machine = StateMachine::new();
        machine.start_selecting();
        machine.finish(Err(DispatchError::Recognize(RecognizeError::OcrUnavailable(
            "tesseract not found".into(),
        ))));
        assert!(matches!(machine.state(), AppState::Failed(msg) if msg.contains("tesseract")));
    }

    #[test]
    fn test_finish_without_session_is_ignored() {
        let mut machine = StateMachine::new();
        assert!(!machine.finish(Ok(CaptureResult::cancelled())));
        assert_eq!(machine.state(), &AppState::Idle);
    }
}
