//! Image backend trait and shared types.
//!
//! The album only needs one fact about a photo's pixels before layout: its
//! natural size. [`ImageBackend::identify`] provides it. The production
//! implementation is [`RustBackend`](super::rust_backend::RustBackend).

use crate::types::Dimensions;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Trait for image backends.
///
/// `Sync` so probing can fan out across rayon workers.
pub trait ImageBackend: Sync {
    /// Get image dimensions without decoding the pixels.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;
}
