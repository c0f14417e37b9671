//! Text measurement.
//!
//! Layout never touches font files itself. It asks a [`FontMetrics`]
//! provider for two things: how wide a string is, and how tall a font's
//! lines are. The browser crate supplies a provider backed by a real font;
//! [`ApproximateFontMetrics`] is used in tests and when no font is loaded.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::Serialize;
use strum_macros::{Display, EnumString};

/// [CSS Fonts § 2.2 'font-weight'](https://www.w3.org/TR/css-fonts-4/#font-weight-prop)
///
/// Only the two weights a font provider is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// `normal`, `400`, and anything unrecognised.
    #[default]
    Normal,
    /// `bold`, `bolder` and numeric weights of 600 and up.
    Bold,
}

impl FontWeight {
    /// Read a resolved `font-weight` value.
    #[must_use]
    pub fn from_css(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("bolder") {
            return FontWeight::Bold;
        }
        if let Ok(weight) = value.parse::<Self>() {
            return weight;
        }
        match value.parse::<u16>() {
            Ok(n) if n >= 600 => FontWeight::Bold,
            _ => FontWeight::Normal,
        }
    }
}

/// [CSS Fonts § 2.3 'font-style'](https://www.w3.org/TR/css-fonts-4/#font-style-prop)
///
/// Named after the provider's style key rather than the CSS keyword: CSS
/// `normal` is `Roman`, everything else is `Italic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum FontSlant {
    /// Upright.
    #[default]
    Roman,
    /// `italic`, `oblique`, or any other non-`normal` value.
    Italic,
}

impl FontSlant {
    /// Read a resolved `font-style` value.
    #[must_use]
    pub fn from_css(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("normal") {
            FontSlant::Roman
        } else {
            FontSlant::Italic
        }
    }
}

/// Identifies one font face at one size.
///
/// `size` is in points, the provider's unit: layout converts CSS pixels with
/// a fixed 0.75 factor before building a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FontKey {
    /// Size in points.
    pub size: u32,
    /// Weight.
    pub weight: FontWeight,
    /// Slant.
    pub slant: FontSlant,
}

impl FontKey {
    /// Create a key.
    #[must_use]
    pub const fn new(size: u32, weight: FontWeight, slant: FontSlant) -> Self {
        Self {
            size,
            weight,
            slant,
        }
    }
}

/// Vertical metrics of a font, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineMetrics {
    /// Distance from the baseline to the top of the tallest glyph.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the lowest glyph,
    /// as a positive number.
    pub descent: f32,
    /// Recommended distance between successive baselines.
    pub line_height: f32,
}

/// The text measurement capability layout depends on.
pub trait FontMetrics {
    /// Advance width of `text` set in `font`, in pixels.
    fn measure_width(&self, text: &str, font: &FontKey) -> f32;

    /// Vertical metrics of `font`.
    fn line_metrics(&self, font: &FontKey) -> LineMetrics;
}

impl<M: FontMetrics + ?Sized> FontMetrics for &M {
    fn measure_width(&self, text: &str, font: &FontKey) -> f32 {
        (**self).measure_width(text, font)
    }

    fn line_metrics(&self, font: &FontKey) -> LineMetrics {
        (**self).line_metrics(font)
    }
}

impl<M: FontMetrics + ?Sized> FontMetrics for Box<M> {
    fn measure_width(&self, text: &str, font: &FontKey) -> f32 {
        (**self).measure_width(text, font)
    }

    fn line_metrics(&self, font: &FontKey) -> LineMetrics {
        (**self).line_metrics(font)
    }
}

/// Approximate font metrics using fixed ratios.
///
/// [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
///
/// "CSS assumes that every font has font metrics that specify a
/// characteristic height above the baseline and a depth below it."
///
/// Implementation note: Without access to actual font data, every glyph is
/// half an em wide, the ascent is three quarters of an em and the descent
/// one quarter. All three ratios are exact in binary floating point, so
/// positions computed from them are reproducible in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateFontMetrics;

impl ApproximateFontMetrics {
    /// Advance of one glyph, as a fraction of the font size.
    pub const CHAR_WIDTH_RATIO: f32 = 0.5;
    /// Ascent as a fraction of the font size.
    pub const ASCENT_RATIO: f32 = 0.75;
    /// Descent as a fraction of the font size.
    pub const DESCENT_RATIO: f32 = 0.25;
}

impl FontMetrics for ApproximateFontMetrics {
    #[allow(clippy::cast_precision_loss)]
    fn measure_width(&self, text: &str, font: &FontKey) -> f32 {
        text.chars().count() as f32 * font.size as f32 * Self::CHAR_WIDTH_RATIO
    }

    fn line_metrics(&self, font: &FontKey) -> LineMetrics {
        #[allow(clippy::cast_precision_loss)]
        let size = font.size as f32;
        let ascent = size * Self::ASCENT_RATIO;
        let descent = size * Self::DESCENT_RATIO;
        LineMetrics {
            ascent,
            descent,
            line_height: ascent + descent,
        }
    }
}

/// Memoizes [`FontMetrics::line_metrics`] per [`FontKey`].
///
/// Layout asks for the metrics of every word it places, and a real
/// provider has to go to the font file for each answer. The cache lives as
/// long as the provider value, and uses a `RefCell` because the pipeline
/// runs on one thread.
#[derive(Debug, Default)]
pub struct CachedFontMetrics<M> {
    inner: M,
    line_metrics: RefCell<HashMap<FontKey, LineMetrics>>,
}

impl<M: FontMetrics> CachedFontMetrics<M> {
    /// Wrap a provider.
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            line_metrics: RefCell::new(HashMap::new()),
        }
    }

    /// The wrapped provider.
    #[must_use]
    pub const fn inner(&self) -> &M {
        &self.inner
    }

    /// Number of distinct fonts seen so far.
    #[must_use]
    pub fn cached_fonts(&self) -> usize {
        self.line_metrics.borrow().len()
    }
}

impl<M: FontMetrics> FontMetrics for CachedFontMetrics<M> {
    fn measure_width(&self, text: &str, font: &FontKey) -> f32 {
        self.inner.measure_width(text, font)
    }

    fn line_metrics(&self, font: &FontKey) -> LineMetrics {
        if let Some(metrics) = self.line_metrics.borrow().get(font) {
            return *metrics;
        }
        let metrics = self.inner.line_metrics(font);
        let _ = self.line_metrics.borrow_mut().insert(*font, metrics);
        metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingMetrics {
        calls: Cell<usize>,
    }

    impl FontMetrics for CountingMetrics {
        fn measure_width(&self, text: &str, font: &FontKey) -> f32 {
            ApproximateFontMetrics.measure_width(text, font)
        }

        fn line_metrics(&self, font: &FontKey) -> LineMetrics {
            self.calls.set(self.calls.get() + 1);
            ApproximateFontMetrics.line_metrics(font)
        }
    }

    #[test]
    fn test_cache_hits_inner_provider_once_per_key() {
        let cached = CachedFontMetrics::new(CountingMetrics { calls: Cell::new(0) });
        let regular = FontKey::new(12, FontWeight::Normal, FontSlant::Roman);
        let bold = FontKey::new(12, FontWeight::Bold, FontSlant::Roman);

        let first = cached.line_metrics(&regular);
        assert_eq!(cached.line_metrics(&regular), first);
        let _ = cached.line_metrics(&bold);

        assert_eq!(cached.inner().calls.get(), 2);
        assert_eq!(cached.cached_fonts(), 2);
    }

    #[test]
    fn test_approximate_metrics() {
        let font = FontKey::new(12, FontWeight::Normal, FontSlant::Roman);
        assert_eq!(ApproximateFontMetrics.measure_width("Hi", &font), 12.0);
        let m = ApproximateFontMetrics.line_metrics(&font);
        assert_eq!((m.ascent, m.descent, m.line_height), (9.0, 3.0, 12.0));
    }

    #[test]
    fn test_weight_and_slant_keywords() {
        assert_eq!(FontWeight::from_css("bold"), FontWeight::Bold);
        assert_eq!(FontWeight::from_css("BOLD"), FontWeight::Bold);
        assert_eq!(FontWeight::from_css("700"), FontWeight::Bold);
        assert_eq!(FontWeight::from_css("400"), FontWeight::Normal);
        assert_eq!(FontWeight::from_css("heavy"), FontWeight::Normal);
        assert_eq!(FontSlant::from_css("normal"), FontSlant::Roman);
        assert_eq!(FontSlant::from_css("italic"), FontSlant::Italic);
        assert_eq!(FontSlant::from_css("oblique"), FontSlant::Italic);
        assert_eq!(FontWeight::Bold.to_string(), "bold");
        assert_eq!(FontSlant::Roman.to_string(), "roman");
    }
}
