//! QR code decoding using rqrr

use crate::{RecognizeError, RecognizeResult};
use image::RgbaImage;

/// Decodes machine-readable codes from an image
pub trait CodeDecoder: Send {
    /// Every payload found, in detection order. Empty when nothing decodes.
    fn decode(&self, image: &RgbaImage) -> RecognizeResult<Vec<String>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrConfig {
    /// Downsample so the longest side is at most this many pixels (0 = never)
    pub max_dim: u32,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self { max_dim: 0 }
    }
}

/// QR-only decoder
#[derive(Debug, Clone, Default)]
pub struct QrDecoder {
    config: QrConfig,
}

impl QrDecoder {
    pub fn new(config: QrConfig) -> Self {
        Self { config }
    }

    fn prepare_gray(&self, img: &RgbaImage) -> image::GrayImage {
        let (w, h) = img.dimensions();
        let max_dim = self.config.max_dim;

        if max_dim > 0 && (w > max_dim || h > max_dim) {
            let factor = w.max(h) as f32 / max_dim as f32;
            let new_w = ((w as f32 / factor) as u32).max(1);
            let new_h = ((h as f32 / factor) as u32).max(1);
            let resized =
                image::imageops::resize(img, new_w, new_h, image::imageops::FilterType::Nearest);
            image::DynamicImage::ImageRgba8(resized).to_luma8()
        } else {
            image::DynamicImage::ImageRgba8(img.clone()).to_luma8()
        }
    }
}

impl CodeDecoder for QrDecoder {
    fn decode(&self, img: &RgbaImage) -> RecognizeResult<Vec<String>> {
        use rqrr::PreparedImage;

        if img.width() == 0 || img.height() == 0 {
            return Err(RecognizeError::Decode("empty image".into()));
        }

        let mut prepared = PreparedImage::prepare(self.prepare_gray(img));
        let grids = prepared.detect_grids();
        log::debug!("Found {} QR candidate(s)", grids.len());

        let mut payloads = Vec::new();
        let mut last_error = None;
        for grid in grids {
            match grid.decode() {
                Ok((_, content)) => payloads.push(content),
                Err(e) => last_error = Some(e),
            }
        }

        // Grids were found but none decoded
        if payloads.is_empty() {
            if let Some(e) = last_error {
                return Err(RecognizeError::Decode(format!("{:?}", e)));
            }
        }

        Ok(payloads)
    }
}
