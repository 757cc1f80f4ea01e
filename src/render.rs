//! Printable HTML rendering of a [`LayoutPlan`].
//!
//! Each plan page becomes one fixed-size `<section>` with every element
//! absolutely positioned in millimetres, and a CSS `@page` rule of the same
//! size. Printing the document from a browser ("Save as PDF") yields the
//! album with one plan page per sheet.
//!
//! The renderer adds no layout decisions of its own. The one thing it does
//! resolve is pixel data: each slot's `image_ref` goes through an
//! [`ImageResolver`]. A slot planned as a photo whose reference does not
//! resolve is drawn as the placeholder, in the same frame.

use crate::imaging::resolve_image_path;
use crate::layout::text::PT_TO_MM;
use crate::layout::{
    Align, CoverPage, ContentPage, ImageFill, LayoutPlan, Page, PhotoSlot, Rect, StyledLine,
    TextLine, TextStyle, placeholder,
};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::path::{Path, PathBuf};

/// Fraction of the font size between the top of a line box and its baseline.
const ASCENT: f64 = 0.8;

/// Turns an `image_ref` into a URL the document can load.
pub trait ImageResolver {
    /// `None` when the image cannot be loaded; the slot gets a placeholder.
    fn resolve(&self, image_ref: &str) -> Option<String>;
}

/// Resolves refs to files under a root directory, keeping remote URLs as is.
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImageResolver for PathResolver {
    fn resolve(&self, image_ref: &str) -> Option<String> {
        if image_ref.starts_with("http://") || image_ref.starts_with("https://") {
            return Some(image_ref.to_string());
        }
        let path = resolve_image_path(&self.root, image_ref);
        path.is_file().then(|| path.to_string_lossy().into_owned())
    }
}

/// Render the whole album as a standalone HTML document.
pub fn render_album(plan: &LayoutPlan, title: &str, resolver: &impl ImageResolver) -> Markup {
    let css = page_css(plan);
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                @for page in &plan.pages {
                    (render_page(plan, page, resolver))
                }
            }
        }
    }
}

/// Render a single page. Pages are independent, so a caller can stream them.
pub fn render_page(plan: &LayoutPlan, page: &Page, resolver: &impl ImageResolver) -> Markup {
    let size = format!(
        "width: {}; height: {};",
        mm(plan.geometry.width),
        mm(plan.geometry.height)
    );
    match page {
        Page::Cover(cover) => render_cover(cover, &size),
        Page::Content(content) => render_content(content, &size, resolver),
    }
}

fn render_cover(cover: &CoverPage, size: &str) -> Markup {
    let style = format!("{size} background: {};", cover.background.to_hex());
    html! {
        section.page.cover data-page=(cover.number) style=(style) {
            (styled_line(&cover.title))
            @if let Some(subtitle) = &cover.subtitle {
                (styled_line(subtitle))
            }
            (styled_line(&cover.footer))
        }
    }
}

fn render_content(content: &ContentPage, size: &str, resolver: &impl ImageResolver) -> Markup {
    html! {
        section.page.content data-page=(content.number) style=(size) {
            @for slot in &content.slots {
                (render_slot(slot, resolver))
            }
        }
    }
}

fn render_slot(slot: &PhotoSlot, resolver: &impl ImageResolver) -> Markup {
    let fill = match &slot.image {
        ImageFill::Photo { rect } => match resolver.resolve(&slot.photo.image_ref) {
            Some(src) => html! {
                img.photo src=(src) alt=(slot.photo.title) style=(rect_css(rect));
            },
            None => render_fill(&placeholder(&slot.frame), &slot.frame),
        },
        fill @ ImageFill::Placeholder { .. } => render_fill(fill, &slot.frame),
    };
    html! {
        div.slot data-photo=(slot.photo.id.as_str()) {
            (fill)
            @for block in &slot.text {
                @for line in &block.lines {
                    (text_line(line, &block.style))
                }
            }
        }
    }
}

fn render_fill(fill: &ImageFill, frame: &Rect) -> Markup {
    match fill {
        ImageFill::Placeholder { fill, style, label } => html! {
            div.placeholder style=(format!("{} background: {};", rect_css(frame), fill.to_hex())) {}
            (text_line(label, style))
        },
        ImageFill::Photo { .. } => html! {},
    }
}

fn styled_line(styled: &StyledLine) -> Markup {
    text_line(&styled.line, &styled.style)
}

/// Position a line so its baseline lands on `line.y`.
fn text_line(line: &TextLine, style: &TextStyle) -> Markup {
    let top = line.y - style.size_pt * PT_TO_MM * ASCENT;
    let align = match line.align {
        Align::Left => "",
        Align::Center => " transform: translateX(-50%);",
    };
    let css = format!(
        "left: {}; top: {}; font-size: {}pt; font-weight: {}; color: {};{align}",
        mm(line.x),
        mm(top),
        style.size_pt,
        if style.bold { "bold" } else { "normal" },
        style.color.to_hex(),
    );
    html! {
        span.text style=(css) { (line.text) }
    }
}

fn rect_css(rect: &Rect) -> String {
    format!(
        "left: {}; top: {}; width: {}; height: {};",
        mm(rect.x),
        mm(rect.y),
        mm(rect.width),
        mm(rect.height)
    )
}

fn mm(value: f64) -> String {
    format!("{value:.2}mm")
}

fn page_css(plan: &LayoutPlan) -> String {
    format!(
        r#"@page {{ size: {w} {h}; margin: 0; }}
* {{ box-sizing: border-box; }}
body {{ margin: 0; font-family: Helvetica, Arial, sans-serif; }}
.page {{ position: relative; overflow: hidden; background: #ffffff; break-after: page; }}
.page > *, .slot > * {{ position: absolute; }}
.text {{ line-height: 1; white-space: nowrap; }}
.photo {{ object-fit: contain; }}"#,
        w = mm(plan.geometry.width),
        h = mm(plan.geometry.height),
    )
}
