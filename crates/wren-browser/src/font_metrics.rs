//! Font metrics backed by fontdue for accurate text measurement during layout.
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "CSS assumes that every font has font metrics that specify a
//! characteristic height above the baseline and a depth below it."

use std::path::Path;

use fontdue::{Font, FontSettings};
use wren_css::{
    ApproximateFontMetrics, FontKey, FontMetrics, FontSlant, FontWeight, LineMetrics,
};

/// Layout hands out sizes in points; fontdue wants pixels.
const PT_TO_PX: f32 = 4.0 / 3.0;

/// Common system font paths to search for a default (regular) font.
const FONT_SEARCH_PATHS: &[&str] = &[
    // macOS
    "/System/Library/Fonts/Helvetica.ttc",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// System font paths for bold variants.
const FONT_BOLD_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// System font paths for italic variants.
const FONT_ITALIC_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Italic.ttf",
    "/Library/Fonts/Arial Italic.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Italic.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansOblique.ttf",
    "C:\\Windows\\Fonts\\ariali.ttf",
];

/// System font paths for bold-italic variants.
const FONT_BOLD_ITALIC_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Bold Italic.ttf",
    "/Library/Fonts/Arial Bold Italic.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-BoldItalic.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBoldOblique.ttf",
    "C:\\Windows\\Fonts\\arialbi.ttf",
];

/// Errors produced while loading a font file.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// The file could not be read.
    #[error("failed to read font '{path}': {source}")]
    Io {
        /// The path that was read.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// fontdue rejected the data.
    #[error("failed to parse font '{path}': {reason}")]
    Parse {
        /// The path that was read.
        path: String,
        /// fontdue's explanation.
        reason: &'static str,
    },
}

/// Font metrics implementation backed by fontdue's per-glyph metrics.
///
/// Holds up to four faces. A key whose face is missing falls back to the
/// closest loaded one (bold-italic to bold, then italic, then regular).
///
/// Uses `Font::metrics()` rather than `Font::rasterize()`, so no bitmaps
/// are generated when only measurements are needed.
pub struct FontdueFontMetrics {
    regular: Font,
    bold: Option<Font>,
    italic: Option<Font>,
    bold_italic: Option<Font>,
}

impl FontdueFontMetrics {
    /// Use a single face for every weight and slant.
    #[must_use]
    pub const fn new(regular: Font) -> Self {
        Self {
            regular,
            bold: None,
            italic: None,
            bold_italic: None,
        }
    }

    /// Load one font file and use it for every weight and slant.
    ///
    /// # Errors
    ///
    /// Returns a [`FontError`] if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FontError> {
        load_font(path.as_ref()).map(Self::new)
    }

    /// Search the usual system locations for a regular face and whichever
    /// bold and italic variants exist. Returns `None` if no regular face is
    /// found.
    #[must_use]
    pub fn load_system() -> Option<Self> {
        let Some(regular) = load_font_from_paths(FONT_SEARCH_PATHS, "regular") else {
            log::warn!(target: "wren", "no system font found; searched {FONT_SEARCH_PATHS:?}");
            return None;
        };
        Some(Self {
            regular,
            bold: load_font_from_paths(FONT_BOLD_SEARCH_PATHS, "bold"),
            italic: load_font_from_paths(FONT_ITALIC_SEARCH_PATHS, "italic"),
            bold_italic: load_font_from_paths(FONT_BOLD_ITALIC_SEARCH_PATHS, "bold-italic"),
        })
    }

    /// The face used for `font`.
    fn face(&self, font: &FontKey) -> &Font {
        let variant = match (font.weight, font.slant) {
            (FontWeight::Normal, FontSlant::Roman) => None,
            (FontWeight::Bold, FontSlant::Roman) => self.bold.as_ref(),
            (FontWeight::Normal, FontSlant::Italic) => self.italic.as_ref(),
            (FontWeight::Bold, FontSlant::Italic) => self
                .bold_italic
                .as_ref()
                .or(self.bold.as_ref())
                .or(self.italic.as_ref()),
        };
        variant.unwrap_or(&self.regular)
    }
}

impl FontMetrics for FontdueFontMetrics {
    fn measure_width(&self, text: &str, font: &FontKey) -> f32 {
        let face = self.face(font);
        #[allow(clippy::cast_precision_loss)]
        let px = font.size as f32 * PT_TO_PX;
        text.chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| face.metrics(ch, px).advance_width)
            .sum()
    }

    fn line_metrics(&self, font: &FontKey) -> LineMetrics {
        #[allow(clippy::cast_precision_loss)]
        let px = font.size as f32 * PT_TO_PX;
        match self.face(font).horizontal_line_metrics(px) {
            Some(metrics) => LineMetrics {
                ascent: metrics.ascent,
                // fontdue reports the descent below the baseline as negative.
                descent: -metrics.descent,
                line_height: metrics.new_line_size,
            },
            None => ApproximateFontMetrics.line_metrics(font),
        }
    }
}

fn load_font(path: &Path) -> Result<Font, FontError> {
    let display = path.display().to_string();
    let data = std::fs::read(path).map_err(|source| FontError::Io {
        path: display.clone(),
        source,
    })?;
    Font::from_bytes(data, FontSettings::default()).map_err(|reason| FontError::Parse {
        path: display,
        reason,
    })
}

/// Try to load a font from a list of filesystem paths.
fn load_font_from_paths(paths: &[&str], label: &str) -> Option<Font> {
    paths.iter().find_map(|path| match load_font(Path::new(path)) {
        Ok(font) => {
            log::debug!(target: "wren", "loaded {label} font: {path}");
            Some(font)
        }
        Err(_) => None,
    })
}
