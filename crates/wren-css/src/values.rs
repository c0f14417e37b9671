//! Property value helpers.
//!
//! Values are kept as the strings the style sheet gave us. These helpers
//! interpret them at the point of use and never fail: anything that cannot
//! be read falls back to a fixed default.

/// The size used when nothing else applies.
pub const DEFAULT_FONT_SIZE_PX: f32 = 16.0;

/// The `font-size` value roots inherit.
pub const DEFAULT_FONT_SIZE: &str = "16px";

/// [CSS Fonts § 2.5 'font-size'](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
///
/// "<absolute-size> ... xx-small | x-small | small | medium | large |
/// x-large | xx-large"
const ABSOLUTE_SIZES: [(&str, f32); 7] = [
    ("xx-small", 9.0),
    ("x-small", 10.0),
    ("small", 12.0),
    ("medium", 16.0),
    ("large", 18.0),
    ("x-large", 24.0),
    ("xx-large", 32.0),
];

/// Read a `font-size` value as CSS pixels.
///
/// Understands the absolute keywords, `px`, `pt` (4/3 px), `em` and `%`
/// (both against the 16px default) and bare numbers (taken as pixels).
/// Anything else is [`DEFAULT_FONT_SIZE_PX`].
///
/// The cascade has already turned percentages into pixels against the
/// parent, so the `%` case here only sees values that never went through
/// it.
#[must_use]
pub fn font_size_px(value: &str) -> f32 {
    let value = value.trim().to_ascii_lowercase();

    if let Some(&(_, px)) = ABSOLUTE_SIZES.iter().find(|(name, _)| *name == value) {
        return px;
    }

    let parsed = if let Some(px) = value.strip_suffix("px") {
        px.parse::<f32>().ok()
    } else if let Some(pt) = value.strip_suffix("pt") {
        pt.parse::<f32>().ok().map(|pt| pt * 4.0 / 3.0)
    } else if let Some(em) = value.strip_suffix("em") {
        em.parse::<f32>().ok().map(|em| em * DEFAULT_FONT_SIZE_PX)
    } else if let Some(pct) = value.strip_suffix('%') {
        pct.parse::<f32>()
            .ok()
            .map(|pct| pct / 100.0 * DEFAULT_FONT_SIZE_PX)
    } else {
        value.parse::<f32>().ok()
    };

    parsed
        .filter(|px| px.is_finite())
        .unwrap_or(DEFAULT_FONT_SIZE_PX)
}

/// The number in front of a trailing `%`, if the value is a percentage.
///
/// Returns `Some(None)` for something that looks like a percentage but
/// whose number cannot be read.
#[must_use]
pub fn percentage(value: &str) -> Option<Option<f32>> {
    let number = value.trim().strip_suffix('%')?;
    Some(number.parse::<f32>().ok().filter(|n| n.is_finite()))
}

/// `background-color` with no value, or `transparent`, paints nothing.
#[must_use]
pub fn is_transparent(color: Option<&str>) -> bool {
    color.is_none_or(|c| c.trim().eq_ignore_ascii_case("transparent"))
}
