//! Texture asset materialization
//!
//! Turns source image assets into files under the output directory's
//! `textures/` folder, either by direct copy or by re-encoding to PNG.

mod materializer;

pub use materializer::FileMaterializer;

use std::path::PathBuf;
use thiserror::Error;

/// Texture materialization errors
#[derive(Error, Debug)]
pub enum MaterializeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("asset path has no usable file name: {0}")]
    BadAssetPath(PathBuf),
}

pub type MaterializeResult<T> = Result<T, MaterializeError>;
