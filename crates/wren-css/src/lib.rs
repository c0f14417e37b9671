//! Style sheet parsing, cascade, layout and painting for the Wren engine.
//!
//! # Scope
//!
//! This crate implements:
//! - **Style sheet parser** ([§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing))
//!   - Rules made of a selector and a declaration block
//!   - Inline `style` attribute declarations
//!   - Error recovery by skipping to the next `;` or `}`
//!
//! - **Selectors** ([Selectors Level 4](https://www.w3.org/TR/selectors-4/))
//!   - Type selectors and the descendant combinator
//!
//! - **Cascade** ([CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/))
//!   - Ordering by the number of type selectors, then source order
//!   - Inline style above every rule
//!   - Inheritance of font and color properties
//!   - Percentage font sizes
//!
//! - **Layout** ([CSS 2.1 § 9 Visual formatting model](https://www.w3.org/TR/CSS2/visuren.html))
//!   - Block stacking and inline line breaking
//!   - Shared baselines, superscripts and centered title headings
//!
//! - **Paint** ([CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html))
//!   - Background rectangles and text commands in painting order
//!
//! # Not Yet Implemented
//!
//! - Class, ID and attribute selectors
//! - Shorthand properties and multi-word values
//! - Any layout property other than font and color

/// Cascade resolution per [CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/).
pub mod cascade;
/// Block and inline layout per [CSS 2.1 § 9](https://www.w3.org/TR/CSS2/visuren.html).
pub mod layout;
/// Display list and painting per [CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html).
pub mod paint;
/// Style sheet parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
pub mod parser;
/// Selector matching per [Selectors Level 4](https://www.w3.org/TR/selectors-4/).
pub mod selector;
/// The default style sheet applied before author styles.
pub mod ua_stylesheet;
/// Property value helpers.
pub mod values;

pub use cascade::{apply, compute_styles};
pub use layout::{
    ApproximateFontMetrics, BoxType, CachedFontMetrics, FontKey, FontMetrics, FontSlant,
    FontWeight, LayoutBox, LayoutConfig, LayoutMode, LineMetrics, TextRun, layout,
    layout_with_config,
};
pub use paint::{DisplayCommand, DisplayList, Painter};
pub use parser::{CSSParser, ParseError, StyleRule, parse_declarations, serialize_declarations};
pub use selector::Selector;

/// Parse a whole style sheet into its rules, in source order.
///
/// Malformed rules are skipped; this never fails.
#[must_use]
pub fn parse_stylesheet(css: &str) -> Vec<StyleRule> {
    CSSParser::new(css).parse()
}
