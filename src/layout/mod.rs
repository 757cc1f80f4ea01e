//! Album layout engine.
//!
//! Turns an ordered photo list into a [`LayoutPlan`]: a cover page followed by
//! two-photo content pages with every element positioned. Layout is a pure
//! function of its inputs and does no I/O, so it is unit testable without a
//! renderer and safe to call from many threads at once.
//!
//! The module is split into:
//! - **Geometry**: page validation, rectangles, dual-constraint image fit
//! - **Text**: date formatting, width estimation, word wrap
//! - **Plan**: the output data structures
//! - **Engine**: pagination and placement ([`AlbumLayout`], [`plan_album`])

mod engine;
pub mod geometry;
pub mod plan;
pub mod text;

pub use engine::{
    AlbumLayout, LayoutError, LayoutSettings, PHOTOS_PER_PAGE, PLACEHOLDER_LABEL, page_count,
    placeholder, plan_album, plan_album_at,
};
pub use geometry::{PageGeometry, Rect};
pub use plan::{
    Align, Band, ContentPage, CoverPage, ImageFill, LayoutPlan, Page, PhotoSlot, Rgb, StyledLine,
    TextBlock, TextKind, TextLine, TextStyle,
};
pub use text::{AverageGlyphWidth, TextMeasure};
