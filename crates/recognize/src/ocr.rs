//! OCR (Optical Character Recognition) using rusty-tesseract

use crate::{RecognizeError, RecognizeResult};
use image::RgbaImage;
use std::collections::HashMap;

/// Extracts raw text from an image
pub trait TextRecognizer: Send {
    fn recognize(&self, image: &RgbaImage) -> RecognizeResult<String>;
}

/// Tesseract settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrConfig {
    pub lang: String,
    /// Page segmentation mode. 11 finds sparse text in any layout.
    pub psm: i32,
    /// Engine mode. 3 lets tesseract pick.
    pub oem: i32,
    pub dpi: Option<i32>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            lang: "eng".to_string(),
            psm: 11,
            oem: 3,
            dpi: None,
        }
    }
}

/// OCR through the system tesseract installation
#[derive(Debug, Clone, Default)]
pub struct TesseractOcr {
    config: OcrConfig,
}

impl TesseractOcr {
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }

    /// Check that the tesseract executable can be run
    pub fn ensure_available() -> RecognizeResult<String> {
        rusty_tesseract::get_tesseract_version()
            .map_err(|e| RecognizeError::OcrUnavailable(e.to_string()))
    }

    fn args(&self) -> rusty_tesseract::Args {
        rusty_tesseract::Args {
            lang: self.config.lang.clone(),
            config_variables: HashMap::new(),
            dpi: self.config.dpi,
            psm: Some(self.config.psm),
            oem: Some(self.config.oem),
        }
    }
}

impl TextRecognizer for TesseractOcr {
    fn recognize(&self, img: &RgbaImage) -> RecognizeResult<String> {
        use rusty_tesseract::Image;

        let version = Self::ensure_available()?;
        log::info!(
            "Running OCR (tesseract {}) on {}x{} image",
            version.trim(),
            img.width(),
            img.height()
        );

        let dynamic_img = image::DynamicImage::ImageRgba8(img.clone());
        let tess_img = Image::from_dynamic_image(&dynamic_img)
            .map_err(|e| RecognizeError::Ocr(format!("Failed to create tesseract image: {}", e)))?;

        rusty_tesseract::image_to_string(&tess_img, &self.args())
            .map_err(|e| RecognizeError::Ocr(format!("Tesseract OCR failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_sparse_text() {
        let args = TesseractOcr::default().args();
        assert_eq!(args.lang, "eng");
        assert_eq!(args.psm, Some(11));
        assert_eq!(args.oem, Some(3));
        assert_eq!(args.dpi, None);
        assert!(args.config_variables.is_empty());
    }

    #[test]
    fn test_custom_config() {
        let ocr = TesseractOcr::new(OcrConfig {
            lang: "spa".to_string(),
            psm: 6,
            oem: 1,
            dpi: Some(300),
        });
        let args = ocr.args();
        assert_eq!(args.lang, "spa");
        assert_eq!(args.psm, Some(6));
        assert_eq!(args.dpi, Some(300));
    }
}
