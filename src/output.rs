//! CLI output formatting.
//!
//! Output is **information-centric**: each page is shown by its page number
//! and what is on it, with image references as secondary, indented context.
//!
//! ```text
//! Album: Summer (3 photos, 3 pages)
//! 001 Cover: Summer
//!     Subtitle: At the lake
//! 002 Content
//!     Top: Dunes
//!         Source: uploads/p1.jpg
//!     Bottom: (p2)
//!         Source: uploads/p2.jpg
//!         Image: placeholder
//! 003 Content
//!     Top: Sunset
//!         Source: uploads/p3.jpg
//! ```
//!
//! `plan --json` prints nothing but the plan: probe counts for that command
//! go to the log instead of stdout.
//!
//! Each command has a `format_*` function returning `Vec<String>` and a
//! `print_*` wrapper that writes to stdout. Format functions are pure.

use crate::collection::{distinct_events, distinct_tags};
use crate::imaging::ProbeSummary;
use crate::layout::{Band, ImageFill, LayoutPlan, Page, PhotoSlot};
use crate::types::PhotoRecord;
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based page number as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn band_label(band: Band) -> &'static str {
    match band {
        Band::Top => "Top",
        Band::Bottom => "Bottom",
    }
}

/// Untitled photos are shown by id in parens: the id is their identity.
fn slot_header(slot: &PhotoSlot) -> String {
    let label = band_label(slot.band);
    if slot.photo.title.trim().is_empty() {
        format!("{}{}: ({})", indent(1), label, slot.photo.id)
    } else {
        format!("{}{}: {}", indent(1), label, slot.photo.title)
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Plan
// ============================================================================

/// Page-by-page inventory of a plan.
pub fn format_plan_output(plan: &LayoutPlan) -> Vec<String> {
    let mut lines = Vec::new();
    let photos = plan.slots().count();
    let title = plan
        .cover()
        .map(|c| c.title.line.text.as_str())
        .unwrap_or_default();
    lines.push(format!(
        "Album: {} ({}, {})",
        title,
        plural(photos, "photo"),
        plural(plan.page_count(), "page")
    ));

    for page in &plan.pages {
        match page {
            Page::Cover(cover) => {
                lines.push(format!(
                    "{} Cover: {}",
                    format_index(cover.number),
                    cover.title.line.text
                ));
                if let Some(subtitle) = &cover.subtitle {
                    lines.push(format!("{}Subtitle: {}", indent(1), subtitle.line.text));
                }
            }
            Page::Content(content) => {
                lines.push(format!("{} Content", format_index(content.number)));
                for slot in &content.slots {
                    lines.push(slot_header(slot));
                    lines.push(format!("{}Source: {}", indent(2), slot.photo.image_ref));
                    if let ImageFill::Placeholder { .. } = slot.image {
                        lines.push(format!("{}Image: placeholder", indent(2)));
                    }
                }
            }
        }
    }
    lines
}

pub fn print_plan_output(plan: &LayoutPlan) {
    for line in format_plan_output(plan) {
        println!("{}", line);
    }
}

// ============================================================================
// Probe
// ============================================================================

pub fn format_probe_output(summary: &ProbeSummary, root: &Path) -> Vec<String> {
    vec![
        format!("Images under {}", root.display()),
        format!("{}{}", indent(1), summary),
    ]
}

pub fn print_probe_output(summary: &ProbeSummary, root: &Path) {
    for line in format_probe_output(summary, root) {
        println!("{}", line);
    }
}

// ============================================================================
// Render / check summaries
// ============================================================================

pub fn format_render_output(plan: &LayoutPlan, out: &Path) -> Vec<String> {
    let mut lines = vec![format!(
        "Rendered {} → {}",
        plural(plan.page_count(), "page"),
        out.display()
    )];
    let placeholders = plan.placeholder_count();
    if placeholders > 0 {
        lines.push(format!(
            "{}{} drawn as placeholder",
            indent(1),
            plural(placeholders, "image")
        ));
    }
    lines
}

pub fn print_render_output(plan: &LayoutPlan, out: &Path) {
    for line in format_render_output(plan, out) {
        println!("{}", line);
    }
}

/// Checked config path, then the verdict.
pub fn format_check_output(plan: &LayoutPlan, config_path: &Path) -> Vec<String> {
    vec![
        format!("==> Checking {}", config_path.display()),
        format!(
            "Album is valid: {}, {}",
            plural(plan.slots().count(), "photo"),
            plural(plan.page_count(), "page")
        ),
    ]
}

pub fn print_check_output(plan: &LayoutPlan, config_path: &Path) {
    for line in format_check_output(plan, config_path) {
        println!("{}", line);
    }
}

// ============================================================================
// Filters
// ============================================================================

/// Filter values available in a collection, ready to pass to `--filter`.
///
/// ```text
/// Tags
///     tag:beach
///     tag:family
/// Events
///     event:Wedding
/// ```
pub fn format_filters_output(photos: &[PhotoRecord]) -> Vec<String> {
    let mut lines = Vec::new();
    for (heading, prefix, values) in [
        ("Tags", "tag", distinct_tags(photos)),
        ("Events", "event", distinct_events(photos)),
    ] {
        lines.push(heading.to_string());
        if values.is_empty() {
            lines.push(format!("{}(none)", indent(1)));
        }
        for value in values {
            lines.push(format!("{}{}:{}", indent(1), prefix, value));
        }
    }
    lines
}

pub fn print_filters_output(photos: &[PhotoRecord]) {
    for line in format_filters_output(photos) {
        println!("{}", line);
    }
}
