//! Pure geometry for album pages.
//!
//! All lengths are millimetres, origin at the top-left corner of the page,
//! `y` growing downwards. Nothing here touches images or text.

use serde::{Deserialize, Serialize};

/// Page size and uniform margin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl PageGeometry {
    /// A4 portrait with a 15 mm margin.
    pub const A4: PageGeometry = PageGeometry {
        width: 210.0,
        height: 297.0,
        margin: 15.0,
    };

    /// Check that the page leaves a drawing area.
    ///
    /// Returns a human-readable reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("margin", self.margin),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("page {name} must be a positive number, got {value}"));
            }
        }
        if self.margin >= self.width / 2.0 {
            return Err(format!(
                "margin {} leaves no drawing width on a {} wide page",
                self.margin, self.width
            ));
        }
        if self.margin >= self.height / 2.0 {
            return Err(format!(
                "margin {} leaves no drawing height on a {} tall page",
                self.margin, self.height
            ));
        }
        Ok(())
    }

    /// Width between the left and right margins.
    pub fn content_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    pub fn center_x(&self) -> f64 {
        self.width / 2.0
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether `other` lies inside `self`, allowing for float noise.
    pub fn contains(&self, other: &Rect) -> bool {
        const EPS: f64 = 1e-9;
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.right() <= self.right() + EPS
            && other.bottom() <= self.bottom() + EPS
    }
}

/// Largest size with the given aspect ratio that fits inside `max`.
///
/// Starts from the full width; if the derived height overflows, re-derives
/// from the height bound instead. Never crops, never distorts.
///
/// # Arguments
/// * `aspect` - Source width / height (must be positive)
/// * `max` - Bounding box as (width, height)
///
/// # Returns
/// * `(width, height)` of the scaled image
pub fn fit_within(aspect: f64, max: (f64, f64)) -> (f64, f64) {
    let (max_w, max_h) = max;

    let mut width = max_w;
    let mut height = width / aspect;

    if height > max_h {
        height = max_h;
        width = height * aspect;
    }

    (width, height)
}

/// Place an `(width, height)` image at the top of `frame`, centred horizontally.
pub fn center_top(frame: &Rect, size: (f64, f64)) -> Rect {
    let (w, h) = size;
    Rect::new(frame.x + (frame.width - w) / 2.0, frame.y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // =========================================================================
    // PageGeometry tests
    // =========================================================================

    #[test]
    fn a4_is_valid() {
        assert!(PageGeometry::A4.validate().is_ok());
        assert_eq!(PageGeometry::A4.content_width(), 180.0);
    }

    #[test]
    fn zero_width_rejected() {
        let page = PageGeometry {
            width: 0.0,
            ..PageGeometry::A4
        };
        let err = page.validate().unwrap_err();
        assert!(err.contains("width"));
    }

    #[test]
    fn negative_margin_rejected() {
        let page = PageGeometry {
            margin: -1.0,
            ..PageGeometry::A4
        };
        assert!(page.validate().is_err());
    }

    #[test]
    fn zero_margin_rejected() {
        let page = PageGeometry {
            margin: 0.0,
            ..PageGeometry::A4
        };
        assert!(page.validate().is_err());
    }

    #[test]
    fn nan_height_rejected() {
        let page = PageGeometry {
            height: f64::NAN,
            ..PageGeometry::A4
        };
        assert!(page.validate().is_err());
    }

    #[test]
    fn margin_at_half_width_rejected() {
        let page = PageGeometry {
            width: 100.0,
            height: 300.0,
            margin: 50.0,
        };
        let err = page.validate().unwrap_err();
        assert!(err.contains("drawing width"));
    }

    #[test]
    fn margin_just_under_half_width_ok() {
        let page = PageGeometry {
            width: 100.0,
            height: 300.0,
            margin: 49.9,
        };
        assert!(page.validate().is_ok());
    }

    #[test]
    fn margin_at_half_height_rejected() {
        let page = PageGeometry {
            width: 300.0,
            height: 100.0,
            margin: 50.0,
        };
        let err = page.validate().unwrap_err();
        assert!(err.contains("drawing height"));
    }

    // =========================================================================
    // fit_within tests
    // =========================================================================

    #[test]
    fn fit_wide_image_is_width_bound() {
        // 4:1 into 180x70 → 180x45
        let (w, h) = fit_within(4.0, (180.0, 70.0));
        assert!(approx(w, 180.0));
        assert!(approx(h, 45.0));
    }

    #[test]
    fn fit_tall_image_is_height_bound() {
        // 3:4 portrait into 180x70 → 52.5x70
        let (w, h) = fit_within(0.75, (180.0, 70.0));
        assert!(approx(w, 52.5));
        assert!(approx(h, 70.0));
    }

    #[test]
    fn fit_exact_aspect_fills_box() {
        let (w, h) = fit_within(2.0, (100.0, 50.0));
        assert!(approx(w, 100.0));
        assert!(approx(h, 50.0));
    }

    #[test]
    fn fit_preserves_aspect_ratio() {
        for aspect in [0.2, 0.5, 1.0, 4.0 / 3.0, 16.0 / 9.0, 5.0] {
            let (w, h) = fit_within(aspect, (180.0, 70.0));
            assert!((w / h - aspect).abs() < 1e-9, "aspect {aspect} drifted");
            assert!(w <= 180.0 + 1e-9 && h <= 70.0 + 1e-9);
        }
    }

    // =========================================================================
    // Rect tests
    // =========================================================================

    #[test]
    fn center_top_centers_horizontally() {
        let frame = Rect::new(15.0, 15.0, 180.0, 70.0);
        let placed = center_top(&frame, (52.5, 70.0));
        assert!(approx(placed.x, 15.0 + (180.0 - 52.5) / 2.0));
        assert!(approx(placed.y, 15.0));
        assert!(frame.contains(&placed));
    }

    #[test]
    fn contains_rejects_overflow() {
        let frame = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!frame.contains(&Rect::new(5.0, 5.0, 6.0, 1.0)));
        assert!(frame.contains(&Rect::new(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn rect_edges_and_center() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), (25.0, 40.0));
    }
}
