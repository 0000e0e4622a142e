//! Capture directory and file naming

use crate::{ExportError, ExportResult};
use chrono::NaiveDateTime;
use image::RgbaImage;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name, relative to the program location
pub const CAPTURES_DIR: &str = "captures";

/// `capture<YYYY-MM-DD HH_MM_SS>.png`
pub fn capture_file_name(stamp: &NaiveDateTime) -> String {
    format!("capture{}.png", stamp.format("%Y-%m-%d %H_%M_%S"))
}

/// Resolve the captures directory for the running executable.
///
/// A packaged build keeps captures next to the executable. A build run from
/// a cargo `target/<profile>` tree keeps them at the workspace root instead,
/// so rebuilding or `cargo clean` never touches them. Only the profile
/// directory and its two parents are checked for `target`.
pub fn resolve_captures_dir(exe: &Path) -> ExportResult<PathBuf> {
    let exe_dir = exe.parent().ok_or(ExportError::NoLocation)?;

    let base = exe_dir
        .ancestors()
        .take(3)
        .find(|dir| dir.file_name().map_or(false, |name| name == "target"))
        .and_then(Path::parent)
        .unwrap_or(exe_dir);

    Ok(base.join(CAPTURES_DIR))
}

/// Captures directory, single writer
#[derive(Debug, Clone)]
pub struct CaptureStore {
    dir: PathBuf,
}

impl CaptureStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Store located next to the current executable
    pub fn for_current_exe() -> ExportResult<Self> {
        let exe = std::env::current_exe()?;
        Ok(Self::new(resolve_captures_dir(&exe)?))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the directory if absent
    pub fn ensure_dir(&self) -> ExportResult<()> {
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    /// Path for a capture taken at `stamp` that does not exist yet.
    ///
    /// Names only resolve to the second; a second capture within the same
    /// second gets a `_1`, `_2`, ... suffix.
    pub fn next_path(&self, stamp: &NaiveDateTime) -> PathBuf {
        let name = capture_file_name(stamp);
        let path = self.dir.join(&name);
        if !path.exists() {
            return path;
        }

        let stem = name.trim_end_matches(".png");
        (1u32..)
            .map(|n| self.dir.join(format!("{}_{}.png", stem, n)))
            .find(|p| !p.exists())
            .unwrap_or(path)
    }

    /// Save an image as PNG and return its path
    pub fn save(&self, image: &RgbaImage, stamp: &NaiveDateTime) -> ExportResult<PathBuf> {
        self.ensure_dir()?;

        let path = self.next_path(stamp);
        image.save_with_format(&path, image::ImageFormat::Png)?;

        log::info!("Capture saved to {}", path.display());
        Ok(path)
    }
}
