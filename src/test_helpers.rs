//! Shared test utilities: photo builders and plan lookups.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let photos = numbered_photos(3);
//! let plan = plan_album_at(&photos, &AlbumOptions::new("Trip"), PageGeometry::A4, sample_date())?;
//! assert_eq!(plan_ids(&plan), vec!["p1", "p2", "p3"]);
//! ```

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::layout::LayoutPlan;
use crate::types::{PhotoId, PhotoRecord};

// =========================================================================
// Dates
// =========================================================================

/// The date every builder stamps on photos and covers: June 10, 2023.
pub fn sample_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 6, 10).unwrap()
}

/// Noon UTC on the given day.
pub fn taken(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

// =========================================================================
// Photo builders
// =========================================================================

/// A photo with no title or description, taken on [`sample_date`].
pub fn photo(id: &str) -> PhotoRecord {
    PhotoRecord {
        id: PhotoId::from(id),
        image_ref: format!("uploads/{id}.jpg"),
        title: String::new(),
        description: String::new(),
        date_taken: taken(2023, 6, 10),
        tags: Vec::new(),
        event: None,
        image: Default::default(),
    }
}

pub fn photo_with_text(id: &str, title: &str, description: &str) -> PhotoRecord {
    PhotoRecord {
        title: title.to_string(),
        description: description.to_string(),
        ..photo(id)
    }
}

/// A photo with a date, tags and an optional event, for collection filters.
pub fn tagged_photo(
    id: &str,
    date_taken: DateTime<Utc>,
    tags: &[&str],
    event: Option<&str>,
) -> PhotoRecord {
    PhotoRecord {
        date_taken,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        event: event.map(String::from),
        ..photo(id)
    }
}

/// `p1` … `pN`.
pub fn numbered_photos(n: usize) -> Vec<PhotoRecord> {
    (1..=n).map(|i| photo(&format!("p{i}"))).collect()
}

// =========================================================================
// Plan lookups
// =========================================================================

/// Photo ids in album order, as plain strings.
pub fn plan_ids(plan: &LayoutPlan) -> Vec<&str> {
    plan.photo_ids().into_iter().map(PhotoId::as_str).collect()
}
