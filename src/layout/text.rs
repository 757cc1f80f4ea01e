//! Text helpers for slot captions: date formatting, width estimation and
//! greedy word wrapping.

use chrono::NaiveDate;

/// Millimetres per typographic point.
pub const PT_TO_MM: f64 = 25.4 / 72.0;

/// Appended to the last visible line when a description is cut short.
pub const ELLIPSIS: char = '…';

/// Format a date in locale-independent long form, e.g. "June 10, 2023".
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Estimates the printed width of a run of text.
///
/// The layout engine only needs widths to decide where description lines
/// break; a renderer with real font metrics can plug in its own measure.
pub trait TextMeasure {
    /// Width in millimetres of `text` set at `size_pt`.
    fn width(&self, text: &str, size_pt: f64) -> f64;
}

/// Every glyph is a fixed fraction of the em.
///
/// 0.5 em is close to the mean advance of Helvetica for mixed-case prose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AverageGlyphWidth {
    pub em_fraction: f64,
}

impl Default for AverageGlyphWidth {
    fn default() -> Self {
        Self { em_fraction: 0.5 }
    }
}

impl TextMeasure for AverageGlyphWidth {
    fn width(&self, text: &str, size_pt: f64) -> f64 {
        text.chars().count() as f64 * size_pt * PT_TO_MM * self.em_fraction
    }
}

/// Greedy word wrap to `max_width` millimetres.
///
/// Explicit newlines start a new line. Words wider than a whole line are
/// broken between characters. Always returns at least one line for non-empty
/// input, and no lines for blank input.
pub fn wrap_text(
    text: &str,
    max_width: f64,
    size_pt: f64,
    measure: &impl TextMeasure,
) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if measure.width(&candidate, size_pt) <= max_width {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if measure.width(word, size_pt) <= max_width {
                current = word.to_string();
            } else {
                let mut pieces = break_word(word, max_width, size_pt, measure);
                // Last piece stays open so following words can join it
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }
        lines.push(current);
    }
    lines
}

/// Split one overlong word into chunks that each fit the line.
fn break_word(
    word: &str,
    max_width: f64,
    size_pt: f64,
    measure: &impl TextMeasure,
) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    for c in word.chars() {
        current.push(c);
        if measure.width(&current, size_pt) > max_width && current.chars().count() > 1 {
            current.pop();
            pieces.push(std::mem::take(&mut current));
            current.push(c);
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Keep at most `max_lines`, marking the cut with an ellipsis.
///
/// The marked line still fits `max_width`: trailing characters are dropped
/// until the line plus the ellipsis is no wider than the original limit.
pub fn clip_lines(
    mut lines: Vec<String>,
    max_lines: usize,
    max_width: f64,
    size_pt: f64,
    measure: &impl TextMeasure,
) -> Vec<String> {
    if lines.len() <= max_lines {
        return lines;
    }
    lines.truncate(max_lines);
    if let Some(last) = lines.last_mut() {
        loop {
            let trimmed = last.trim_end().len();
            last.truncate(trimmed);
            let marked = format!("{last}{ELLIPSIS}");
            if last.is_empty() || measure.width(&marked, size_pt) <= max_width {
                *last = marked;
                break;
            }
            last.pop();
        }
    }
    lines
}
