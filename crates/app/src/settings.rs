//! Optional user settings, `chopping.json` next to the captures directory

use anyhow::{Context, Result};
use dispatch::DispatchConfig;
use recognize::{OcrConfig, QrConfig, TrimMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const SETTINGS_FILE: &str = "chopping.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSettings {
    pub lang: String,
    pub psm: i32,
    pub oem: i32,
    pub dpi: Option<i32>,
}

impl Default for OcrSettings {
    fn default() -> Self {
        let config = OcrConfig::default();
        Self {
            lang: config.lang,
            psm: config.psm,
            oem: config.oem,
            dpi: config.dpi,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrSettings {
    pub max_dim: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureSettings {
    pub settle_delay_ms: u64,
    pub legacy_trim: bool,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            settle_delay_ms: DispatchConfig::default().settle_delay.as_millis() as u64,
            legacy_trim: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ocr: OcrSettings,
    pub qr: QrSettings,
    pub capture: CaptureSettings,
}

impl Settings {
    /// Read settings, falling back to defaults when the file is missing or
    /// cannot be parsed
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        match serde_json::from_str(&contents) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                log::warn!("Ignoring invalid settings in {}: {}", path.display(), e);
                Ok(Self::default())
            }
        }
    }

    pub fn ocr_config(&self) -> OcrConfig {
        OcrConfig {
            lang: self.ocr.lang.clone(),
            psm: self.ocr.psm,
            oem: self.ocr.oem,
            dpi: self.ocr.dpi,
        }
    }

    pub fn qr_config(&self) -> QrConfig {
        QrConfig {
            max_dim: self.qr.max_dim,
        }
    }

    pub fn dispatch_config(&self) -> DispatchConfig {
        DispatchConfig {
            settle_delay: Duration::from_millis(self.capture.settle_delay_ms),
            trim: if self.capture.legacy_trim {
                TrimMode::Legacy
            } else {
                TrimMode::Normalized
            },
        }
    }
}
