//! Recognition module for Chopping
//!
//! QR decoding, OCR and the text helpers shared by both.

pub mod ocr;
pub mod qr;
pub mod text;

pub use ocr::{OcrConfig, TesseractOcr, TextRecognizer};
pub use qr::{CodeDecoder, QrConfig, QrDecoder};
pub use text::{clean_ocr_text, is_link, link_target, TrimMode};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecognizeError {
    #[error("OCR engine unavailable: {0}")]
    OcrUnavailable(String),

    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("Code decoding failed: {0}")]
    Decode(String),
}

pub type RecognizeResult<T> = Result<T, RecognizeError>;
