//! Export module for Chopping
//!
//! Persists captured regions as timestamped PNG files.

mod store;

pub use store::{capture_file_name, resolve_captures_dir, CaptureStore, CAPTURES_DIR};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Cannot locate the program directory")]
    NoLocation,
}

pub type ExportResult<T> = Result<T, ExportError>;
