//! Pre-layout image probing.
//!
//! Reads every photo's natural size up front so the layout step itself stays
//! synchronous and deterministic. A photo whose file cannot be identified is
//! marked [`ImageProbe::Unavailable`]; layout then reserves the same frame
//! and fills it with a placeholder. Remote references (`http://`, `https://`)
//! are left `Unknown` and laid out optimistically.

use super::backend::ImageBackend;
use super::rust_backend::supported_input_extensions;
use crate::types::{ImageProbe, PhotoRecord};
use rayon::prelude::*;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Counts of probe outcomes for one album.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeSummary {
    pub resolved: usize,
    pub unavailable: usize,
    pub skipped: usize,
}

impl fmt::Display for ProbeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} resolved, {} unavailable, {} remote",
            self.resolved, self.unavailable, self.skipped
        )
    }
}

fn is_remote(image_ref: &str) -> bool {
    image_ref.starts_with("http://") || image_ref.starts_with("https://")
}

/// Map an `image_ref` to a file under `root`.
///
/// Leading slashes are stripped so `/uploads/a.jpg` stays inside the root.
pub fn resolve_image_path(root: &Path, image_ref: &str) -> PathBuf {
    root.join(image_ref.trim_start_matches('/'))
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            supported_input_extensions()
                .iter()
                .any(|s| s.eq_ignore_ascii_case(ext))
        })
}

fn probe_one(backend: &impl ImageBackend, photo: &PhotoRecord, root: &Path) -> ImageProbe {
    if is_remote(&photo.image_ref) {
        return ImageProbe::Unknown;
    }
    let path = resolve_image_path(root, &photo.image_ref);
    if !has_supported_extension(&path) {
        warn!(
            photo = %photo.id,
            path = %path.display(),
            "unsupported image type, using placeholder"
        );
        return ImageProbe::Unavailable;
    }
    match backend.identify(&path) {
        Ok(dims) => ImageProbe::Resolved(dims),
        Err(e) => {
            warn!(photo = %photo.id, error = %e, "image unavailable, using placeholder");
            ImageProbe::Unavailable
        }
    }
}

/// Probe every photo in parallel, returning updated copies in input order.
///
/// Never fails: per-photo errors become `Unavailable`.
pub fn probe_images(
    backend: &impl ImageBackend,
    photos: &[PhotoRecord],
    root: &Path,
) -> (Vec<PhotoRecord>, ProbeSummary) {
    let probed: Vec<PhotoRecord> = photos
        .par_iter()
        .map(|photo| PhotoRecord {
            image: probe_one(backend, photo, root),
            ..photo.clone()
        })
        .collect();

    let mut summary = ProbeSummary::default();
    for photo in &probed {
        match photo.image {
            ImageProbe::Resolved(_) => summary.resolved += 1,
            ImageProbe::Unavailable => summary.unavailable += 1,
            ImageProbe::Unknown => summary.skipped += 1,
        }
    }
    debug!(%summary, "probed images");
    (probed, summary)
}
