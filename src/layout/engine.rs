//! Album pagination and placement.
//!
//! An album is one cover page followed by content pages holding two photos
//! each, the first in the top band and the second in the bottom band. An odd
//! photo count leaves the last page with a single top-band slot.
//!
//! Every slot in a band gets the same image frame. The frame depends only on
//! the page geometry and [`LayoutSettings`], never on the photo, so the page
//! count and every frame are known before any pixels are fetched. The photo
//! is then fitted inside the frame, or the frame becomes a placeholder when
//! the image is known to be unavailable.
//!
//! ```text
//! ┌──────────── width ────────────┐
//! │ margin                        │
//! │   ┌── frame (top band) ────┐  │
//! │   │      fitted image      │  │
//! │   └────────────────────────┘  │
//! │   Title            (text_gap) │
//! │   Taken: June 10, 2023        │
//! │   description lines…          │
//! ├ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ┤  height / 2 (± band_gap)
//! │   ┌── frame (bottom band) ─┐  │
//! │   …                           │
//! └───────────────────────────────┘
//! ```

use super::geometry::{PageGeometry, Rect, center_top, fit_within};
use super::plan::{
    Align, Band, ContentPage, CoverPage, ImageFill, LayoutPlan, Page, PhotoSlot, Rgb, StyledLine,
    TextBlock, TextKind, TextLine, TextStyle,
};
use super::text::{AverageGlyphWidth, TextMeasure, clip_lines, format_long_date, wrap_text};
use crate::types::{AlbumOptions, ImageProbe, PhotoId, PhotoRecord};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

/// Photos per content page.
pub const PHOTOS_PER_PAGE: usize = 2;

pub const PLACEHOLDER_LABEL: &str = "Image not available";

const COVER_BACKGROUND: Rgb = Rgb(40, 116, 166);
const COVER_TITLE_PT: f64 = 30.0;
const COVER_SUBTITLE_PT: f64 = 16.0;
const COVER_FOOTER_PT: f64 = 12.0;
/// Title sits this far above the vertical centre, subtitle below it.
const COVER_TITLE_RISE: f64 = 20.0;
const COVER_SUBTITLE_DROP: f64 = 10.0;
const COVER_FOOTER_INSET: f64 = 20.0;

const PLACEHOLDER_FILL: Rgb = Rgb(200, 200, 200);
const PLACEHOLDER_TEXT: Rgb = Rgb(100, 100, 100);
const PLACEHOLDER_PT: f64 = 10.0;

const PHOTO_TITLE_PT: f64 = 12.0;
const CAPTION_PT: f64 = 10.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Invalid album options: {0}")]
    InvalidOptions(String),
    #[error("Photo {0} appears more than once in the album")]
    DuplicatePhotoId(PhotoId),
}

/// Tunable vertical rhythm of content pages.
///
/// Loaded from the `[layout]` section of `album.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutSettings {
    /// Image frame height as a fraction of the page height.
    pub image_fraction: f64,
    /// Distance between the page middle and each band edge.
    pub band_gap: f64,
    /// Space between the image frame and the first caption baseline.
    pub text_gap: f64,
    /// Advance after the title line.
    pub title_advance: f64,
    /// Advance after the "Taken:" line.
    pub date_advance: f64,
    /// Baseline distance between description lines.
    pub description_line_height: f64,
    /// Aspect ratio `[width, height]` assumed for photos of unknown size.
    pub default_aspect_ratio: [u32; 2],
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            // 70 mm on A4
            image_fraction: 70.0 / 297.0,
            band_gap: 10.0,
            text_gap: 5.0,
            title_advance: 6.0,
            date_advance: 5.0,
            description_line_height: 4.5,
            default_aspect_ratio: [4, 3],
        }
    }
}

impl LayoutSettings {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.image_fraction > 0.0 && self.image_fraction <= 1.0) {
            return Err(format!(
                "layout.image_fraction must be in (0, 1], got {}",
                self.image_fraction
            ));
        }
        for (name, value) in [
            ("band_gap", self.band_gap),
            ("text_gap", self.text_gap),
            ("title_advance", self.title_advance),
            ("date_advance", self.date_advance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("layout.{name} must be a non-negative number, got {value}"));
            }
        }
        if !self.description_line_height.is_finite() || self.description_line_height <= 0.0 {
            return Err(format!(
                "layout.description_line_height must be positive, got {}",
                self.description_line_height
            ));
        }
        if self.default_aspect_ratio[0] == 0 || self.default_aspect_ratio[1] == 0 {
            return Err("layout.default_aspect_ratio values must be non-zero".into());
        }
        Ok(())
    }

    /// Vertical space kept below every frame for a title, a date and one
    /// description line.
    pub fn text_reserve(&self) -> f64 {
        self.text_gap + self.title_advance + self.date_advance + self.description_line_height
    }

    fn default_aspect(&self) -> f64 {
        self.default_aspect_ratio[0] as f64 / self.default_aspect_ratio[1] as f64
    }
}

/// Number of pages an album of `photo_count` photos occupies, cover included.
pub fn page_count(photo_count: usize) -> usize {
    1 + photo_count.div_ceil(PHOTOS_PER_PAGE)
}

/// Plan an album with default settings, stamping the cover with today's date.
pub fn plan_album(
    photos: &[PhotoRecord],
    options: &AlbumOptions,
    geometry: PageGeometry,
) -> Result<LayoutPlan, LayoutError> {
    plan_album_at(photos, options, geometry, Local::now().date_naive())
}

/// Plan an album with default settings and an explicit cover date.
///
/// Fully deterministic: identical inputs give identical plans.
pub fn plan_album_at(
    photos: &[PhotoRecord],
    options: &AlbumOptions,
    geometry: PageGeometry,
    generated_on: NaiveDate,
) -> Result<LayoutPlan, LayoutError> {
    AlbumLayout::new(geometry, LayoutSettings::default())?.plan(photos, options, generated_on)
}

/// Validated page geometry plus the measurements derived from it.
///
/// Holds no mutable state; one instance can plan any number of albums,
/// from any number of threads.
#[derive(Debug, Clone)]
pub struct AlbumLayout<M = AverageGlyphWidth> {
    geometry: PageGeometry,
    settings: LayoutSettings,
    measure: M,
    band_height: f64,
    frame_height: f64,
}

impl AlbumLayout<AverageGlyphWidth> {
    pub fn new(geometry: PageGeometry, settings: LayoutSettings) -> Result<Self, LayoutError> {
        Self::with_measure(geometry, settings, AverageGlyphWidth::default())
    }
}

impl<M: TextMeasure> AlbumLayout<M> {
    /// Build a layout that wraps descriptions with a custom [`TextMeasure`].
    pub fn with_measure(
        geometry: PageGeometry,
        settings: LayoutSettings,
        measure: M,
    ) -> Result<Self, LayoutError> {
        geometry.validate().map_err(LayoutError::InvalidOptions)?;
        settings.validate().map_err(LayoutError::InvalidOptions)?;

        let band_height = geometry.height / 2.0 - geometry.margin - settings.band_gap;
        let frame_height =
            (settings.image_fraction * geometry.height).min(band_height - settings.text_reserve());
        if frame_height <= 0.0 {
            return Err(LayoutError::InvalidOptions(format!(
                "page height {} is too short for an image and its captions",
                geometry.height
            )));
        }

        Ok(Self {
            geometry,
            settings,
            measure,
            band_height,
            frame_height,
        })
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// Plan the whole album.
    ///
    /// Options are validated before the photo list is looked at. Photo
    /// content never causes an error.
    pub fn plan(
        &self,
        photos: &[PhotoRecord],
        options: &AlbumOptions,
        generated_on: NaiveDate,
    ) -> Result<LayoutPlan, LayoutError> {
        if options.title.trim().is_empty() {
            return Err(LayoutError::InvalidOptions("album title must not be empty".into()));
        }

        let mut seen = HashSet::with_capacity(photos.len());
        for photo in photos {
            if !seen.insert(&photo.id) {
                return Err(LayoutError::DuplicatePhotoId(photo.id.clone()));
            }
        }

        let mut pages = Vec::with_capacity(page_count(photos.len()));
        pages.push(Page::Cover(self.cover(options, generated_on)));
        for (index, group) in photos.chunks(PHOTOS_PER_PAGE).enumerate() {
            // Cover is page 1
            pages.push(Page::Content(self.content_page(index + 2, group, options)));
        }

        let plan = LayoutPlan {
            geometry: self.geometry,
            pages,
        };
        debug!(
            photos = photos.len(),
            pages = plan.page_count(),
            placeholders = plan.placeholder_count(),
            "album planned"
        );
        Ok(plan)
    }

    /// Lay out the cover page.
    pub fn cover(&self, options: &AlbumOptions, generated_on: NaiveDate) -> CoverPage {
        let center_x = self.geometry.center_x();
        let center_y = self.geometry.height / 2.0;
        let centered = |text: &str, y: f64, size_pt: f64| StyledLine {
            style: TextStyle {
                size_pt,
                bold: false,
                color: Rgb::WHITE,
            },
            line: TextLine {
                text: text.to_string(),
                x: center_x,
                y,
                align: Align::Center,
            },
        };

        CoverPage {
            number: 1,
            background: COVER_BACKGROUND,
            title: centered(
                options.title.trim(),
                center_y - COVER_TITLE_RISE,
                COVER_TITLE_PT,
            ),
            subtitle: options
                .effective_subtitle()
                .map(|s| centered(s, center_y + COVER_SUBTITLE_DROP, COVER_SUBTITLE_PT)),
            footer: centered(
                &format!("Generated on {}", format_long_date(generated_on)),
                self.geometry.height - COVER_FOOTER_INSET,
                COVER_FOOTER_PT,
            ),
        }
    }

    /// Lay out one content page from a group of at most two photos.
    ///
    /// Pages are independent of each other, so a caller may plan and render
    /// them one at a time.
    pub fn content_page(
        &self,
        number: usize,
        group: &[PhotoRecord],
        options: &AlbumOptions,
    ) -> ContentPage {
        let slots = group
            .iter()
            .take(PHOTOS_PER_PAGE)
            .zip([Band::Top, Band::Bottom])
            .map(|(photo, band)| self.slot(photo, band, options))
            .collect();
        ContentPage { number, slots }
    }

    /// Top edge of a band.
    pub fn band_top(&self, band: Band) -> f64 {
        match band {
            Band::Top => self.geometry.margin,
            Band::Bottom => self.geometry.height / 2.0 + self.settings.band_gap,
        }
    }

    /// Lowest baseline a caption line in this band may use.
    pub fn band_bottom(&self, band: Band) -> f64 {
        self.band_top(band) + self.band_height
    }

    /// The image frame for a band.
    pub fn frame(&self, band: Band) -> Rect {
        Rect::new(
            self.geometry.margin,
            self.band_top(band),
            self.geometry.content_width(),
            self.frame_height,
        )
    }

    /// Lay out one photo in a band.
    pub fn slot(&self, photo: &PhotoRecord, band: Band, options: &AlbumOptions) -> PhotoSlot {
        let frame = self.frame(band);
        PhotoSlot {
            photo: photo.clone(),
            band,
            frame,
            image: self.image_fill(&frame, photo.image),
            text: self.captions(photo, band, &frame, options),
        }
    }

    fn image_fill(&self, frame: &Rect, probe: ImageProbe) -> ImageFill {
        let aspect = match probe {
            ImageProbe::Unavailable => return placeholder(frame),
            ImageProbe::Resolved(dims) => dims
                .aspect_ratio()
                .unwrap_or_else(|| self.settings.default_aspect()),
            ImageProbe::Unknown => self.settings.default_aspect(),
        };
        let size = fit_within(aspect, (frame.width, frame.height));
        ImageFill::Photo {
            rect: center_top(frame, size),
        }
    }

    fn captions(
        &self,
        photo: &PhotoRecord,
        band: Band,
        frame: &Rect,
        options: &AlbumOptions,
    ) -> Vec<TextBlock> {
        let x = self.geometry.margin;
        let line = |text: String, y: f64| TextLine {
            text,
            x,
            y,
            align: Align::Left,
        };
        let mut y = frame.bottom() + self.settings.text_gap;
        let mut blocks = Vec::new();

        let title = photo.title.trim();
        if options.include_photo_titles && !title.is_empty() {
            blocks.push(TextBlock {
                kind: TextKind::Title,
                style: TextStyle {
                    size_pt: PHOTO_TITLE_PT,
                    bold: true,
                    color: Rgb::BLACK,
                },
                lines: vec![line(title.to_string(), y)],
            });
            y += self.settings.title_advance;
        }

        if options.include_date_taken {
            let taken = format_long_date(photo.date_taken.date_naive());
            blocks.push(TextBlock {
                kind: TextKind::DateTaken,
                style: caption_style(),
                lines: vec![line(format!("Taken: {taken}"), y)],
            });
            y += self.settings.date_advance;
        }

        if options.include_photo_descriptions {
            let wrapped = wrap_text(
                &photo.description,
                self.geometry.content_width(),
                CAPTION_PT,
                &self.measure,
            );
            let room = self.band_bottom(band) - y;
            let max_lines = if room < 0.0 {
                0
            } else {
                // Baselines that fit after the first one; compared as f64 so a
                // tiny line height cannot overflow the count
                let extra = (room / self.settings.description_line_height + 1e-9).floor();
                if extra >= wrapped.len() as f64 {
                    wrapped.len()
                } else {
                    extra as usize + 1
                }
            };
            let lines: Vec<TextLine> = clip_lines(
                wrapped,
                max_lines,
                self.geometry.content_width(),
                CAPTION_PT,
                &self.measure,
            )
                .into_iter()
                .enumerate()
                .map(|(i, text)| line(text, y + i as f64 * self.settings.description_line_height))
                .collect();
            if !lines.is_empty() {
                blocks.push(TextBlock {
                    kind: TextKind::Description,
                    style: caption_style(),
                    lines,
                });
            }
        }

        blocks
    }
}

/// Placeholder covering the whole frame.
///
/// Also used by renderers when an image planned as available fails to load.
pub fn placeholder(frame: &Rect) -> ImageFill {
    let (cx, cy) = frame.center();
    ImageFill::Placeholder {
        fill: PLACEHOLDER_FILL,
        style: TextStyle {
            size_pt: PLACEHOLDER_PT,
            bold: false,
            color: PLACEHOLDER_TEXT,
        },
        label: TextLine {
            text: PLACEHOLDER_LABEL.to_string(),
            x: cx,
            y: cy,
            align: Align::Center,
        },
    }
}

fn caption_style() -> TextStyle {
    TextStyle {
        size_pt: CAPTION_PT,
        bold: false,
        color: Rgb::BLACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{numbered_photos, photo, photo_with_text, plan_ids, sample_date};
    use crate::types::Dimensions;

    fn a4() -> AlbumLayout {
        AlbumLayout::new(PageGeometry::A4, LayoutSettings::default()).unwrap()
    }

    fn plan_a4(photos: &[PhotoRecord], title: &str) -> Result<LayoutPlan, LayoutError> {
        plan_album_at(photos, &AlbumOptions::new(title), PageGeometry::A4, sample_date())
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    // =========================================================================
    // Pagination tests
    // =========================================================================

    #[test]
    fn page_count_formula() {
        assert_eq!(page_count(0), 1);
        assert_eq!(page_count(1), 2);
        assert_eq!(page_count(2), 2);
        assert_eq!(page_count(3), 3);
        assert_eq!(page_count(10), 6);
    }

    #[test]
    fn empty_album_is_cover_only() {
        let plan = plan_a4(&[], "Empty").unwrap();
        assert_eq!(plan.page_count(), 1);
        assert!(matches!(plan.pages[0], Page::Cover(_)));
    }

    #[test]
    fn page_numbers_increase() {
        let plan = plan_a4(&numbered_photos(5), "Five").unwrap();
        let numbers: Vec<usize> = plan.pages.iter().map(Page::number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }

    #[test]
    fn bands_alternate_within_page() {
        let plan = plan_a4(&numbered_photos(3), "Three").unwrap();
        let bands: Vec<Band> = plan.slots().map(|s| s.band).collect();
        assert_eq!(bands, vec![Band::Top, Band::Bottom, Band::Top]);
        assert_eq!(plan_ids(&plan), vec!["p1", "p2", "p3"]);
    }

    #[test]
    fn content_page_ignores_extra_photos() {
        let layout = a4();
        let group = vec![photo("a"), photo("b"), photo("c")];
        let page = layout.content_page(2, &group, &AlbumOptions::new("x"));
        assert_eq!(page.slots.len(), 2);
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn empty_title_is_invalid() {
        let err = plan_a4(&[photo("a")], "").unwrap_err();
        assert!(matches!(err, LayoutError::InvalidOptions(_)));
    }

    #[test]
    fn blank_title_is_invalid() {
        let err = plan_a4(&[], "   ").unwrap_err();
        assert!(matches!(err, LayoutError::InvalidOptions(_)));
    }

    #[test]
    fn title_checked_before_photos() {
        // Duplicate ids would also fail, but the title error comes first
        let photos = vec![photo("a"), photo("a")];
        let err = plan_a4(&photos, "").unwrap_err();
        assert!(matches!(err, LayoutError::InvalidOptions(_)));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let photos = vec![photo("a"), photo("b"), photo("a")];
        let err = plan_a4(&photos, "Dupes").unwrap_err();
        assert_eq!(err, LayoutError::DuplicatePhotoId(PhotoId::from("a")));
    }

    #[test]
    fn degenerate_geometry_rejected() {
        for geometry in [
            PageGeometry {
                width: 0.0,
                ..PageGeometry::A4
            },
            PageGeometry {
                height: -1.0,
                ..PageGeometry::A4
            },
            PageGeometry {
                margin: 0.0,
                ..PageGeometry::A4
            },
            PageGeometry {
                margin: 105.0,
                ..PageGeometry::A4
            },
        ] {
            let err = plan_album_at(&[], &AlbumOptions::new("x"), geometry, sample_date())
                .unwrap_err();
            assert!(matches!(err, LayoutError::InvalidOptions(_)), "{geometry:?}");
        }
    }

    #[test]
    fn too_short_page_rejected() {
        // Band height 60/2 - 5 - 10 = 15 < text reserve of 20.5
        let geometry = PageGeometry {
            width: 210.0,
            height: 60.0,
            margin: 5.0,
        };
        let err = AlbumLayout::new(geometry, LayoutSettings::default()).unwrap_err();
        assert!(err.to_string().contains("too short"));
    }

    #[test]
    fn invalid_settings_rejected() {
        let settings = LayoutSettings {
            image_fraction: 0.0,
            ..LayoutSettings::default()
        };
        assert!(AlbumLayout::new(PageGeometry::A4, settings).is_err());

        let settings = LayoutSettings {
            default_aspect_ratio: [0, 3],
            ..LayoutSettings::default()
        };
        assert!(AlbumLayout::new(PageGeometry::A4, settings).is_err());
    }

    // =========================================================================
    // Frame and image placement tests
    // =========================================================================

    #[test]
    fn a4_frames_match_classic_layout() {
        let layout = a4();
        let top = layout.frame(Band::Top);
        assert!(approx(top.x, 15.0));
        assert!(approx(top.y, 15.0));
        assert!(approx(top.width, 180.0));
        assert!(approx(top.height, 70.0));

        let bottom = layout.frame(Band::Bottom);
        assert!(approx(bottom.y, 297.0 / 2.0 + 10.0));
        assert!(approx(bottom.height, top.height));
    }

    #[test]
    fn frame_leaves_room_for_three_caption_lines() {
        let layout = a4();
        for band in [Band::Top, Band::Bottom] {
            let frame = layout.frame(band);
            assert!(
                frame.bottom() + layout.settings().text_reserve() <= layout.band_bottom(band) + 1e-9
            );
        }
        assert!(layout.band_bottom(Band::Top) < layout.band_top(Band::Bottom));
        assert!(layout.band_bottom(Band::Bottom) <= 297.0 - 15.0 + 1e-9);
    }

    #[test]
    fn portrait_photo_is_height_bound_and_centered() {
        let layout = a4();
        let mut p = photo("tall");
        p.image = ImageProbe::Resolved(Dimensions::new(300, 400));
        let slot = layout.slot(&p, Band::Top, &AlbumOptions::new("x"));

        let ImageFill::Photo { rect } = slot.image else {
            panic!("expected photo fill");
        };
        assert!(approx(rect.height, slot.frame.height));
        assert!(approx(rect.width, slot.frame.height * 0.75));
        assert!(approx(rect.center().0, slot.frame.center().0));
        assert!(slot.frame.contains(&rect));
    }

    #[test]
    fn panorama_is_width_bound() {
        let layout = a4();
        let mut p = photo("wide");
        p.image = ImageProbe::Resolved(Dimensions::new(6000, 1000));
        let slot = layout.slot(&p, Band::Bottom, &AlbumOptions::new("x"));

        let ImageFill::Photo { rect } = slot.image else {
            panic!("expected photo fill");
        };
        assert!(approx(rect.width, 180.0));
        assert!(approx(rect.height, 30.0));
        assert!(approx(rect.y, slot.frame.y));
    }

    #[test]
    fn unknown_size_uses_default_aspect() {
        let layout = a4();
        let slot = layout.slot(&photo("u"), Band::Top, &AlbumOptions::new("x"));
        let ImageFill::Photo { rect } = slot.image else {
            panic!("expected photo fill");
        };
        assert!(approx(rect.width / rect.height, 4.0 / 3.0));
    }

    #[test]
    fn zero_sized_probe_falls_back_to_default_aspect() {
        let layout = a4();
        let mut p = photo("z");
        p.image = ImageProbe::Resolved(Dimensions::new(0, 0));
        let slot = layout.slot(&p, Band::Top, &AlbumOptions::new("x"));
        assert_eq!(slot.image, layout.slot(&photo("u"), Band::Top, &AlbumOptions::new("x")).image);
    }

    #[test]
    fn unavailable_image_keeps_frame_and_uses_placeholder() {
        let layout = a4();
        let mut missing = photo("m");
        missing.image = ImageProbe::Unavailable;
        let options = AlbumOptions::new("x");

        let slot = layout.slot(&missing, Band::Bottom, &options);
        let unknown = layout.slot(&photo("u"), Band::Bottom, &options);
        assert_eq!(slot.frame, unknown.frame);
        assert_eq!(slot.text, unknown.text);

        let ImageFill::Placeholder { label, fill, .. } = &slot.image else {
            panic!("expected placeholder");
        };
        assert_eq!(label.text, PLACEHOLDER_LABEL);
        assert_eq!(*fill, PLACEHOLDER_FILL);
        assert_eq!((label.x, label.y), slot.frame.center());
    }

    // =========================================================================
    // Caption tests
    // =========================================================================

    #[test]
    fn captions_in_fixed_order() {
        let layout = a4();
        let p = photo_with_text("c", "Sunset", "Over the bay.");
        let slot = layout.slot(&p, Band::Top, &AlbumOptions::new("x"));

        let kinds: Vec<TextKind> = slot.text.iter().map(|b| b.kind).collect();
        assert_eq!(kinds, vec![TextKind::Title, TextKind::DateTaken, TextKind::Description]);
        assert!(slot.text[0].style.bold);
        assert_eq!(slot.text[0].lines[0].text, "Sunset");
        assert_eq!(slot.text[1].lines[0].text, "Taken: June 10, 2023");
        assert_eq!(slot.text[2].lines[0].text, "Over the bay.");
    }

    #[test]
    fn caption_baselines_stack_below_frame() {
        let layout = a4();
        let p = photo_with_text("c", "Sunset", "Over the bay.");
        let slot = layout.slot(&p, Band::Top, &AlbumOptions::new("x"));

        let first = slot.frame.bottom() + 5.0;
        assert!(approx(slot.text[0].lines[0].y, first));
        assert!(approx(slot.text[1].lines[0].y, first + 6.0));
        assert!(approx(slot.text[2].lines[0].y, first + 11.0));
        assert!(slot.text.iter().flat_map(|b| &b.lines).all(|l| l.x == 15.0));
    }

    #[test]
    fn omitted_blocks_leave_no_gap() {
        let layout = a4();
        let p = photo_with_text("c", "", "Only words.");
        let options = AlbumOptions {
            include_date_taken: false,
            ..AlbumOptions::new("x")
        };
        let slot = layout.slot(&p, Band::Top, &options);

        assert_eq!(slot.text.len(), 1);
        assert_eq!(slot.text[0].kind, TextKind::Description);
        assert!(approx(slot.text[0].lines[0].y, slot.frame.bottom() + 5.0));
    }

    #[test]
    fn disabled_captions_yield_no_blocks() {
        let layout = a4();
        let p = photo_with_text("c", "Sunset", "Over the bay.");
        let options = AlbumOptions {
            include_photo_titles: false,
            include_photo_descriptions: false,
            include_date_taken: false,
            ..AlbumOptions::new("x")
        };
        let bare = layout.slot(&p, Band::Top, &options);
        let full = layout.slot(&p, Band::Top, &AlbumOptions::new("x"));

        assert!(bare.text.is_empty());
        assert_eq!(bare.frame, full.frame);
        assert_eq!(bare.image, full.image);
    }

    #[test]
    fn long_description_wraps_and_stays_in_band() {
        let layout = a4();
        let words = "lorem ipsum dolor sit amet ".repeat(200);
        let p = photo_with_text("c", "Long", &words);
        let slot = layout.slot(&p, Band::Top, &AlbumOptions::new("x"));

        let description = slot.text.last().unwrap();
        assert_eq!(description.kind, TextKind::Description);
        assert!(description.lines.len() > 1);
        let last = description.lines.last().unwrap();
        assert!(last.y <= layout.band_bottom(Band::Top) + 1e-9);
        assert!(last.text.ends_with('…'));

        let measure = AverageGlyphWidth::default();
        for line in &description.lines {
            let width = measure.width(&line.text, CAPTION_PT);
            assert!(width <= layout.geometry().content_width(), "too wide: {}", line.text);
        }
    }

    #[test]
    fn tiny_description_line_height_keeps_every_line() {
        let settings = LayoutSettings {
            description_line_height: 1e-20,
            ..LayoutSettings::default()
        };
        let layout = AlbumLayout::new(PageGeometry::A4, settings).unwrap();
        let words = "lorem ipsum dolor sit amet ".repeat(40);
        let p = photo_with_text("c", "Dense", &words);

        let plan = layout.plan(&[p], &AlbumOptions::new("x"), sample_date()).unwrap();
        let slot = plan.slots().next().unwrap();
        let description = slot.text.last().unwrap();
        assert_eq!(description.kind, TextKind::Description);

        let wrapped = wrap_text(&words, 180.0, CAPTION_PT, &AverageGlyphWidth::default());
        assert_eq!(description.lines.len(), wrapped.len());
        assert!(!description.lines.last().unwrap().text.ends_with('…'));
    }

    // =========================================================================
    // Cover tests
    // =========================================================================

    #[test]
    fn cover_positions() {
        let layout = a4();
        let options = AlbumOptions::new("Summer 2023").with_subtitle("Lake house");
        let cover = layout.cover(&options, sample_date());

        assert_eq!(cover.background, COVER_BACKGROUND);
        assert_eq!(cover.title.line.text, "Summer 2023");
        assert!(approx(cover.title.line.x, 105.0));
        assert!(approx(cover.title.line.y, 148.5 - 20.0));
        let subtitle = cover.subtitle.unwrap();
        assert!(approx(subtitle.line.y, 148.5 + 10.0));
        assert!(subtitle.style.size_pt < cover.title.style.size_pt);
        assert_eq!(cover.footer.line.text, "Generated on June 10, 2023");
        assert!(approx(cover.footer.line.y, 277.0));
    }

    #[test]
    fn cover_without_subtitle() {
        let cover = a4().cover(&AlbumOptions::new("Solo"), sample_date());
        assert!(cover.subtitle.is_none());
    }
}
