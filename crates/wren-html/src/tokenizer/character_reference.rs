//! Character reference decoding for text runs.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//!
//! Only the terminated forms are recognized: `&name;`, `&#NNN;` and
//! `&#xHHH;`. An ampersand that does not start one of these is kept as a
//! literal `&`.

use super::named_character_references::lookup_entity;

/// Longest reference body we try to match before giving up.
const MAX_REFERENCE_LEN: usize = 10;

/// Replace character references in `text` with the characters they name.
#[must_use]
pub fn decode_character_references(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];

        let decoded = after
            .find(';')
            .filter(|&end| end > 0 && end <= MAX_REFERENCE_LEN)
            .and_then(|end| resolve_reference(&after[..end]).map(|s| (s, end)));

        match decoded {
            Some((replacement, end)) => {
                out.push_str(&replacement);
                rest = &after[end + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Resolve the body of a reference (between `&` and `;`).
fn resolve_reference(body: &str) -> Option<String> {
    let Some(number) = body.strip_prefix('#') else {
        return lookup_entity(body).map(str::to_string);
    };

    // [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
    // "If the number is 0x00 ... or greater than 0x10FFFF ... set the
    // character reference code to 0xFFFD."
    let code = match number.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => number.parse::<u32>().ok()?,
    };
    let c = if code == 0 {
        char::REPLACEMENT_CHARACTER
    } else {
        char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
    };
    Some(c.to_string())
}
