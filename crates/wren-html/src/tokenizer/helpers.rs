//! Helper functions for the markup tokenizer.
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to")
//! - Input handling ("Consume the next input character")
//! - Token emission, including turning a buffered tag body into a tag token

use super::character_reference::decode_character_references;
use super::core::{HTMLTokenizer, TokenizerState};
use super::token::{Attribute, Token};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Switch to the X state"
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Consume the next input character"
    ///
    /// Returns the character at the current position and advances the position.
    /// Returns None if we've reached the end of input.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input[self.current_pos..].chars().next()?;
        self.current_pos += c.len_utf8();
        Some(c)
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HTMLTokenizer {
    pub(super) fn emit_token(&mut self, token: Token) {
        self.token_stream.push(token);
    }

    /// Emit the buffered text (if any) as a single text token.
    pub(super) fn emit_text(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let raw = std::mem::take(&mut self.buffer);
        let data = decode_character_references(&raw);
        self.emit_token(Token::Text { data });
    }

    /// Emit the buffered tag body as a tag or declaration token.
    ///
    /// An empty body (`<>`) produces nothing.
    pub(super) fn emit_tag(&mut self) {
        let body = std::mem::take(&mut self.buffer);
        if let Some(token) = tag_token(&body) {
            self.emit_token(token);
        }
    }
}

/// Build a token from the text between `<` and `>`.
fn tag_token(body: &str) -> Option<Token> {
    let trimmed = body.trim();

    // `<!DOCTYPE html>`, `<!-- ... -->`
    if let Some(data) = trimmed.strip_prefix('!') {
        return Some(Token::Declaration {
            data: data.to_string(),
        });
    }

    let (trimmed, self_closing) = match trimmed.strip_suffix('/') {
        Some(rest) if !rest.is_empty() => (rest, true),
        _ => (trimmed, false),
    };

    let (name, attributes) = parse_tag_body(trimmed);
    if let Some(end_name) = name.strip_prefix('/') {
        if end_name.is_empty() {
            return None;
        }
        return Some(Token::EndTag {
            name: end_name.to_string(),
        });
    }
    if name.is_empty() {
        return None;
    }

    Some(Token::StartTag {
        name,
        self_closing,
        attributes,
    })
}

/// Split a tag body into its case-folded name and its attributes.
///
/// Values may be double-quoted, single-quoted (in which case they may hold
/// spaces and `=`), unquoted (ending at whitespace) or missing entirely. A
/// quoted value with no closing quote runs to the end of the tag.
#[must_use]
pub fn parse_tag_body(text: &str) -> (String, Vec<Attribute>) {
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;

    let skip_whitespace = |i: &mut usize| {
        while *i < chars.len() && chars[*i].is_whitespace() {
            *i += 1;
        }
    };

    skip_whitespace(&mut i);
    let name_start = i;
    while i < chars.len() && !chars[i].is_whitespace() {
        i += 1;
    }
    let name: String = chars[name_start..i].iter().collect::<String>().to_lowercase();

    let mut attributes = Vec::new();
    loop {
        skip_whitespace(&mut i);
        if i >= chars.len() {
            break;
        }

        let attr_start = i;
        while i < chars.len() && chars[i] != '=' && !chars[i].is_whitespace() {
            i += 1;
        }
        if i == attr_start {
            // A stray `=` with no name in front of it.
            break;
        }
        let attr_name = chars[attr_start..i].iter().collect::<String>().to_lowercase();

        skip_whitespace(&mut i);
        if i >= chars.len() || chars[i] != '=' {
            attributes.push(Attribute::new(attr_name, String::new()));
            continue;
        }
        i += 1;
        skip_whitespace(&mut i);

        let value: String = match chars.get(i) {
            None => String::new(),
            Some(&quote @ ('"' | '\'')) => {
                i += 1;
                let value_start = i;
                while i < chars.len() && chars[i] != quote {
                    i += 1;
                }
                let value = chars[value_start..i].iter().collect();
                if i < chars.len() {
                    i += 1;
                }
                value
            }
            Some(_) => {
                let value_start = i;
                while i < chars.len() && !chars[i].is_whitespace() {
                    i += 1;
                }
                chars[value_start..i].iter().collect()
            }
        };
        attributes.push(Attribute::new(attr_name, value));
    }

    (name, attributes)
}
