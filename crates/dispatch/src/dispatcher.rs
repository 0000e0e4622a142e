//! Capture session pipeline

use crate::{CaptureResult, ClipboardSink, DispatchResult, SystemClipboard, TextSource};
use export::{CaptureStore, ExportError};
use image::RgbaImage;
use overlay::{RegionSelector, SelectionOutcome};
use recognize::{
    clean_ocr_text, CodeDecoder, OcrConfig, QrConfig, QrDecoder, TesseractOcr, TextRecognizer,
    TrimMode,
};
use screen::{GdiScreen, ScreenRegion, ScreenSource};
use std::path::Path;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Pause between overlay teardown and the screenshot, so the overlay
    /// never ends up in the capture
    pub settle_delay: Duration,
    pub trim: TrimMode,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(100),
            trim: TrimMode::Normalized,
        }
    }
}

/// Runs capture sessions. Holds no state between sessions.
pub struct Dispatcher {
    screen: Box<dyn ScreenSource>,
    decoder: Box<dyn CodeDecoder>,
    recognizer: Box<dyn TextRecognizer>,
    clipboard: Box<dyn ClipboardSink>,
    store: CaptureStore,
    config: DispatchConfig,
}

impl Dispatcher {
    pub fn new(
        screen: Box<dyn ScreenSource>,
        decoder: Box<dyn CodeDecoder>,
        recognizer: Box<dyn TextRecognizer>,
        clipboard: Box<dyn ClipboardSink>,
        store: CaptureStore,
        config: DispatchConfig,
    ) -> Self {
        Self {
            screen,
            decoder,
            recognizer,
            clipboard,
            store,
            config,
        }
    }

    /// Dispatcher wired to the real screen, decoders and clipboard
    pub fn system(
        store: CaptureStore,
        config: DispatchConfig,
        qr: QrConfig,
        ocr: OcrConfig,
    ) -> Self {
        Self::new(
            Box::new(GdiScreen::new()),
            Box::new(QrDecoder::new(qr)),
            Box::new(TesseractOcr::new(ocr)),
            Box::new(SystemClipboard),
            store,
            config,
        )
    }

    /// Run one full session: selection, then capture unless cancelled
    pub fn run_session(
        &mut self,
        selector: &mut dyn RegionSelector,
    ) -> DispatchResult<CaptureResult> {
        let outcome = selector.select()?;
        self.complete(outcome)
    }

    /// Finish a session whose selection has already ended
    pub fn complete(&mut self, outcome: SelectionOutcome) -> DispatchResult<CaptureResult> {
        match outcome {
            SelectionOutcome::Region(region) => self.dispatch(region),
            SelectionOutcome::Cancelled(reason) => {
                log::warn!("Capture not taken ({:?})", reason);
                Ok(CaptureResult::cancelled())
            }
        }
    }

    /// Capture `region`, save it, then decode a code or fall back to OCR
    pub fn dispatch(&mut self, region: ScreenRegion) -> DispatchResult<CaptureResult> {
        if !self.config.settle_delay.is_zero() {
            thread::sleep(self.config.settle_delay);
        }

        log::info!("Capturing region {}", region);
        let image = self.screen.grab(&region)?;

        let stamp = chrono::Local::now().naive_local();
        let path = self.store.save(&image, &stamp)?;
        let saved = load_png(&path)?;

        let (text, source) = match self.decode_code(&saved) {
            Some(payload) => {
                log::info!("QR detected: {}", payload);
                (payload, TextSource::Code)
            }
            None => {
                let raw = self.recognizer.recognize(&saved)?;
                let text = clean_ocr_text(&raw, self.config.trim);
                log::info!("Text found: {}", text);
                (text, TextSource::Ocr)
            }
        };

        // Capture and text are still reported when the clipboard is busy
        if let Err(e) = self.clipboard.set_text(&text) {
            log::warn!("Text not copied: {}", e);
        }

        Ok(CaptureResult::recognized(region, path, text, source))
    }

    /// First decoded payload; decoder errors count as no code found
    fn decode_code(&self, image: &RgbaImage) -> Option<String> {
        match self.decoder.decode(image) {
            Ok(payloads) => {
                if payloads.is_empty() {
                    log::info!("No QR code is detected");
                }
                payloads.into_iter().next()
            }
            Err(e) => {
                log::warn!("Error reading QR code: {}", e);
                None
            }
        }
    }
}

fn load_png(path: &Path) -> Result<RgbaImage, ExportError> {
    Ok(image::open(path)?.to_rgba8())
}
