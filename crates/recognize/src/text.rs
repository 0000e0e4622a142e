//! OCR text cleanup and link detection

/// How raw OCR output is tidied before it is shown and copied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrimMode {
    /// Collapse every whitespace run to one space, trim both ends
    #[default]
    Normalized,
    /// Output of earlier releases: newlines become spaces, one pass of
    /// double-space replacement, then the last character is dropped
    Legacy,
}

/// Clean raw OCR output into a single line
pub fn clean_ocr_text(raw: &str, mode: TrimMode) -> String {
    match mode {
        TrimMode::Normalized => raw.split_whitespace().collect::<Vec<_>>().join(" "),
        TrimMode::Legacy => {
            let mut text = raw.replace('\n', " ").replace("  ", " ");
            text.pop();
            text
        }
    }
}

const LINK_PREFIXES: [&str; 3] = ["http://", "https://", "www."];

/// Whether recognized text should be offered as a clickable link
pub fn is_link(text: &str) -> bool {
    let text = text.trim();
    LINK_PREFIXES.iter().any(|prefix| text.starts_with(prefix))
}

/// URL to open for link text, `www.` addresses get an https scheme
pub fn link_target(text: &str) -> Option<String> {
    if !is_link(text) {
        return None;
    }

    let text = text.trim();
    if text.starts_with("www.") {
        Some(format!("https://{}", text))
    } else {
        Some(text.to_string())
    }
}
