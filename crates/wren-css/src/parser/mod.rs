//! Style sheet parser module.

/// Character-level style sheet parser.
pub mod css_parser;

pub use css_parser::{CSSParser, ParseError, StyleRule, parse_declarations, serialize_declarations};
