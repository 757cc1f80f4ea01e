//! Photo collection provider.
//!
//! Loads a user's photo list and narrows it to an album selection. The layout
//! engine never filters or reorders; everything that decides *which* photos
//! go into an album happens here, and input order is always preserved.
//!
//! ## Filters
//!
//! | Filter | Keeps photos… | Default album title |
//! |---|---|---|
//! | `all` | every photo | `My Album` |
//! | `month:2023-06` | taken in June 2023 (UTC) | `My Album - June 2023` |
//! | `tag:beach` | tagged exactly `beach` | `My Album - beach` |
//! | `event:Wedding` | whose event is exactly `Wedding` | `My Album - Wedding` |

use crate::types::{PhotoId, PhotoRecord};
use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid filter '{0}': expected all, month:YYYY-MM, tag:NAME or event:NAME")]
    InvalidFilter(String),
}

/// Read a JSON array of photo records.
pub fn load_photos(path: &Path) -> Result<Vec<PhotoRecord>, CollectionError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Which photos of a collection go into an album.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PhotoFilter {
    #[default]
    All,
    Month { year: i32, month: u32 },
    Tag(String),
    Event(String),
}

impl PhotoFilter {
    pub fn matches(&self, photo: &PhotoRecord) -> bool {
        match self {
            PhotoFilter::All => true,
            PhotoFilter::Month { year, month } => {
                photo.date_taken.year() == *year && photo.date_taken.month() == *month
            }
            PhotoFilter::Tag(tag) => photo.tags.iter().any(|t| t == tag),
            PhotoFilter::Event(event) => photo.event.as_deref() == Some(event.as_str()),
        }
    }

    /// Cover title suggested for an album built with this filter.
    pub fn default_title(&self) -> String {
        match self {
            PhotoFilter::All => "My Album".to_string(),
            PhotoFilter::Month { year, month } => {
                match NaiveDate::from_ymd_opt(*year, *month, 1) {
                    Some(first) => format!("My Album - {}", first.format("%B %Y")),
                    None => "My Album".to_string(),
                }
            }
            PhotoFilter::Tag(name) | PhotoFilter::Event(name) => format!("My Album - {name}"),
        }
    }
}

impl FromStr for PhotoFilter {
    type Err = CollectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CollectionError::InvalidFilter(s.to_string());
        if s == "all" {
            return Ok(PhotoFilter::All);
        }
        let (kind, value) = s.split_once(':').ok_or_else(invalid)?;
        if value.is_empty() {
            return Err(invalid());
        }
        match kind {
            "month" => {
                let (year, month) = value.split_once('-').ok_or_else(invalid)?;
                let year: i32 = year.parse().map_err(|_| invalid())?;
                let month: u32 = month.parse().map_err(|_| invalid())?;
                if !(1..=12).contains(&month) {
                    return Err(invalid());
                }
                Ok(PhotoFilter::Month { year, month })
            }
            "tag" => Ok(PhotoFilter::Tag(value.to_string())),
            "event" => Ok(PhotoFilter::Event(value.to_string())),
            _ => Err(invalid()),
        }
    }
}

/// Photos matching `filter`, in collection order.
pub fn select(photos: &[PhotoRecord], filter: &PhotoFilter) -> Vec<PhotoRecord> {
    photos.iter().filter(|p| filter.matches(p)).cloned().collect()
}

/// Photos whose ids are in `ids`, in collection order (not selection order).
pub fn select_ids(photos: &[PhotoRecord], ids: &[PhotoId]) -> Vec<PhotoRecord> {
    let wanted: HashSet<&PhotoId> = ids.iter().collect();
    photos
        .iter()
        .filter(|p| wanted.contains(&p.id))
        .cloned()
        .collect()
}

/// Every tag in the collection, in first-seen order.
pub fn distinct_tags(photos: &[PhotoRecord]) -> Vec<&str> {
    let mut seen = HashSet::new();
    photos
        .iter()
        .flat_map(|p| p.tags.iter())
        .map(String::as_str)
        .filter(|t| seen.insert(*t))
        .collect()
}

/// Every event in the collection, in first-seen order.
pub fn distinct_events(photos: &[PhotoRecord]) -> Vec<&str> {
    let mut seen = HashSet::new();
    photos
        .iter()
        .filter_map(|p| p.event.as_deref())
        .filter(|e| seen.insert(*e))
        .collect()
}
