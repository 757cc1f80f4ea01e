//! Shared types passed between the collection provider, the image prober,
//! the layout engine and the renderer.
//!
//! Everything here is plain data and serializes to JSON, so a photo list can
//! be exported by the web backend and fed to the CLI unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of an uploaded photo.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoId(pub String);

impl PhotoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PhotoId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Natural pixel size of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height, or `None` for a degenerate size.
    pub fn aspect_ratio(self) -> Option<f64> {
        if self.width == 0 || self.height == 0 {
            None
        } else {
            Some(self.width as f64 / self.height as f64)
        }
    }
}

/// What is known about a photo's pixel data at layout time.
///
/// Layout never waits on image loading: `Unknown` lays the slot out with a
/// default aspect ratio, and `Unavailable` reserves the same box for a
/// placeholder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "dimensions")]
pub enum ImageProbe {
    #[default]
    Unknown,
    Resolved(Dimensions),
    Unavailable,
}

/// One uploaded photo and its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub id: PhotoId,
    /// Opaque reference (URL or relative path) the renderer resolves to pixels.
    pub image_ref: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date_taken: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(default)]
    pub image: ImageProbe,
}

/// Per-album formatting choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlbumOptions {
    /// Cover title. Must not be blank.
    pub title: String,
    /// Cover subtitle, drawn beneath the title when present and non-empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub include_photo_titles: bool,
    pub include_photo_descriptions: bool,
    pub include_date_taken: bool,
}

impl AlbumOptions {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Subtitle if present and not just whitespace.
    pub fn effective_subtitle(&self) -> Option<&str> {
        self.subtitle
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

impl Default for AlbumOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            subtitle: None,
            include_photo_titles: true,
            include_photo_descriptions: true,
            include_date_taken: true,
        }
    }
}
