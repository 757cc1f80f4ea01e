//! The layout plan: a renderer-agnostic description of every album page.
//!
//! A plan is plain data. It carries absolute coordinates for each element so
//! a renderer only has to paint, never measure or decide.

use super::geometry::{PageGeometry, Rect};
use crate::types::{PhotoId, PhotoRecord};
use serde::{Deserialize, Serialize};

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// `#rrggbb` notation.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub size_pt: f64,
    pub bold: bool,
    pub color: Rgb,
}

/// A single line of text anchored at its baseline.
///
/// For `Align::Center`, `x` is the horizontal centre of the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub align: Align,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    Title,
    DateTaken,
    Description,
}

/// One caption block under a photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub kind: TextKind,
    pub style: TextStyle,
    pub lines: Vec<TextLine>,
}

/// A centred line on the cover together with its style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledLine {
    pub style: TextStyle,
    pub line: TextLine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverPage {
    pub number: usize,
    pub background: Rgb,
    pub title: StyledLine,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<StyledLine>,
    pub footer: StyledLine,
}

/// Vertical half of a content page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Top,
    Bottom,
}

/// What to paint inside a slot's image frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ImageFill {
    /// The photo scaled to `rect`, which lies inside the frame.
    Photo { rect: Rect },
    /// A flat box covering the frame with a centred label.
    Placeholder {
        fill: Rgb,
        style: TextStyle,
        label: TextLine,
    },
}

impl ImageFill {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ImageFill::Placeholder { .. })
    }
}

/// One photo's placement on a content page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoSlot {
    pub photo: PhotoRecord,
    pub band: Band,
    /// Box reserved for the image. Identical for every slot in the same band,
    /// whatever the photo's size or availability.
    pub frame: Rect,
    pub image: ImageFill,
    /// Caption blocks in drawing order; empty when all captions are disabled.
    pub text: Vec<TextBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPage {
    pub number: usize,
    pub slots: Vec<PhotoSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Page {
    Cover(CoverPage),
    Content(ContentPage),
}

impl Page {
    pub fn number(&self) -> usize {
        match self {
            Page::Cover(cover) => cover.number,
            Page::Content(content) => content.number,
        }
    }
}

/// Complete album layout: the cover first, then content pages in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPlan {
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
}

impl LayoutPlan {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn cover(&self) -> Option<&CoverPage> {
        match self.pages.first() {
            Some(Page::Cover(cover)) => Some(cover),
            _ => None,
        }
    }

    pub fn content_pages(&self) -> impl Iterator<Item = &ContentPage> {
        self.pages.iter().filter_map(|page| match page {
            Page::Content(content) => Some(content),
            Page::Cover(_) => None,
        })
    }

    /// Every slot in page then band order.
    pub fn slots(&self) -> impl Iterator<Item = &PhotoSlot> {
        self.content_pages().flat_map(|page| page.slots.iter())
    }

    /// Photo ids in the order they appear in the album.
    pub fn photo_ids(&self) -> Vec<&PhotoId> {
        self.slots().map(|slot| &slot.photo.id).collect()
    }

    pub fn placeholder_count(&self) -> usize {
        self.slots().filter(|slot| slot.image.is_placeholder()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_hex() {
        assert_eq!(Rgb(40, 116, 166).to_hex(), "#2874a6");
        assert_eq!(Rgb::WHITE.to_hex(), "#ffffff");
    }

    #[test]
    fn page_json_is_tagged() {
        let page = Page::Content(ContentPage {
            number: 2,
            slots: Vec::new(),
        });
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["type"], "content");
        assert_eq!(json["number"], 2);
    }

    #[test]
    fn empty_plan_has_no_cover() {
        let plan = LayoutPlan {
            geometry: PageGeometry::A4,
            pages: Vec::new(),
        };
        assert!(plan.cover().is_none());
        assert_eq!(plan.slots().count(), 0);
    }
}
