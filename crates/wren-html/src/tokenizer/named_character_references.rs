//! Named character reference lookup table.
//!
//! [§ 13.5 Named character references](https://html.spec.whatwg.org/multipage/named-characters.html)
//!
//! The full table defines 2,231 entities. We keep the handful that show up
//! in hand-written pages; anything else is left in the text as written.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Maps entity names (without the leading `&` and trailing `;`) to their
/// replacement strings.
static NAMED_ENTITIES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("amp", "&"),
        ("lt", "<"),
        ("gt", ">"),
        ("quot", "\""),
        ("apos", "'"),
        ("nbsp", "\u{00A0}"),
        ("shy", "\u{00AD}"),
        ("copy", "\u{00A9}"),
        ("reg", "\u{00AE}"),
        ("trade", "\u{2122}"),
        ("mdash", "\u{2014}"),
        ("ndash", "\u{2013}"),
        ("hellip", "\u{2026}"),
        ("bull", "\u{2022}"),
        ("middot", "\u{00B7}"),
        ("lsquo", "\u{2018}"),
        ("rsquo", "\u{2019}"),
        ("ldquo", "\u{201C}"),
        ("rdquo", "\u{201D}"),
        ("laquo", "\u{00AB}"),
        ("raquo", "\u{00BB}"),
        ("times", "\u{00D7}"),
        ("divide", "\u{00F7}"),
        ("deg", "\u{00B0}"),
        ("para", "\u{00B6}"),
        ("sect", "\u{00A7}"),
    ])
});

/// Look up a named character reference.
///
/// The `name` should include neither the leading `&` nor the trailing `;`.
///
/// # Example
/// ```
/// use wren_html::tokenizer::named_character_references::lookup_entity;
///
/// assert_eq!(lookup_entity("amp"), Some("&"));
/// assert_eq!(lookup_entity("xyz"), None);
/// ```
#[must_use]
pub fn lookup_entity(name: &str) -> Option<&'static str> {
    NAMED_ENTITIES.get(name).copied()
}
