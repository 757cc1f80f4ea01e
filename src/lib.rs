//! # PhotoChronicle
//!
//! Album layout engine for printable photo books. Given an ordered list of
//! photos and a few album options, it decides what goes on each page and
//! where: a cover page, then content pages holding two photos each, every
//! image fitted into a fixed frame and captioned underneath.
//!
//! # Architecture: Probe, Plan, Render
//!
//! ```text
//! 1. Probe    photos.json  →  photos with natural sizes   (file I/O, parallel)
//! 2. Plan     photos       →  LayoutPlan                  (pure, deterministic)
//! 3. Render   LayoutPlan   →  album.html                  (one sheet per page)
//! ```
//!
//! Only the first stage touches image files. Planning is a pure function of
//! the photo list, the options, the page geometry and the cover date, so two
//! calls with the same inputs give equal plans, and many albums can be planned
//! at once from different threads.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Photo records, album options, probed image sizes |
//! | [`layout`] | Pagination, image fitting, caption placement, the [`layout::LayoutPlan`] |
//! | [`imaging`] | Natural-size probing through the `image` crate |
//! | [`collection`] | Loading a photo list and selecting photos by month, tag or event |
//! | [`render`] | Printable HTML rendering of a plan using Maud |
//! | [`config`] | `album.toml` loading, stock defaults, validation |
//! | [`output`] | CLI output formatting |
//!
//! # Units
//!
//! All geometry is in millimetres with the origin at the top-left of the page
//! and y growing downward. Font sizes are in points. Text lines carry their
//! baseline y.
//!
//! # Missing Images
//!
//! A photo whose image cannot be read still gets its slot. The frame is
//! reserved exactly as for a readable image and filled with a grey
//! "Image not available" placeholder, so one bad file never shifts the rest
//! of the album.

pub mod collection;
pub mod config;
pub mod imaging;
pub mod layout;
pub mod output;
pub mod render;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
