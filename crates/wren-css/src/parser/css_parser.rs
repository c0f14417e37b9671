//! Style sheet parser.
//!
//! A recursive-descent parser over a flat character buffer with an integer
//! cursor. It understands exactly one grammar:
//!
//! ```text
//! sheet       := rule*
//! rule        := selector '{' body '}'
//! selector    := word (whitespace word)*
//! body        := (pair (';' | '}' | EOF))*
//! pair        := word ':' word
//! word        := [alphanumeric # - . %]+
//! ```
//!
//! Every step returns a [`ParseError`] on failure, and the two loops
//! ([`CSSParser::body`] and [`CSSParser::parse`]) recover by skipping to the
//! next `;` or `}`. Malformed input therefore costs a declaration or a rule,
//! never the whole sheet.

use std::fmt::Write as _;

use wren_common::warning::warn_once;
use wren_dom::StyleMap;

use crate::selector::Selector;

/// Why a parsing step failed. Carries the cursor position (in characters)
/// where the failure was noticed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A word (selector, property or value) was expected but nothing matched.
    #[error("expected a word at offset {0}")]
    ExpectedWord(usize),

    /// A specific delimiter was expected.
    #[error("expected '{expected}' at offset {position}")]
    ExpectedLiteral {
        /// The delimiter that was expected.
        expected: char,
        /// Where it was expected.
        position: usize,
    },

    /// A `property: value` pair was followed by something other than `;`,
    /// `}` or the end of input.
    #[error("declaration ending at offset {0} is not terminated")]
    UnterminatedDeclaration(usize),
}

/// One rule of a style sheet: a selector and the declarations it applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    /// Which nodes the rule applies to.
    pub selector: Selector,
    /// Case-folded property names to values. Later duplicates have
    /// already overwritten earlier ones.
    pub declarations: StyleMap,
}

/// Style sheet parser.
pub struct CSSParser {
    input: Vec<char>,
    position: usize,
}

impl CSSParser {
    /// Create a parser over raw style sheet text.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self {
            input: raw.chars().collect(),
            position: 0,
        }
    }

    fn current(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Skip any whitespace.
    pub fn whitespace(&mut self) {
        while self.current().is_some_and(char::is_whitespace) {
            self.position += 1;
        }
    }

    /// Consume a maximal run of alphanumerics and `#-.%`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::ExpectedWord`] if no character was consumed.
    pub fn word(&mut self) -> Result<String, ParseError> {
        let start = self.position;
        while self
            .current()
            .is_some_and(|c| c.is_alphanumeric() || matches!(c, '#' | '-' | '.' | '%'))
        {
            self.position += 1;
        }
        if self.position == start {
            return Err(ParseError::ExpectedWord(start));
        }
        Ok(self.input[start..self.position].iter().collect())
    }

    /// Consume exactly `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::ExpectedLiteral`] if the next character differs
    /// or the input is exhausted.
    pub fn literal(&mut self, expected: char) -> Result<(), ParseError> {
        if self.current() != Some(expected) {
            return Err(ParseError::ExpectedLiteral {
                expected,
                position: self.position,
            });
        }
        self.position += 1;
        Ok(())
    }

    /// Advance until one of `stops` is under the cursor and return it, without
    /// consuming it. Returns `None` (with the cursor at the end) if none is
    /// found.
    pub fn ignore_until(&mut self, stops: &[char]) -> Option<char> {
        while let Some(c) = self.current() {
            if stops.contains(&c) {
                return Some(c);
            }
            self.position += 1;
        }
        None
    }

    /// `property : value`, with the property case-folded.
    ///
    /// # Errors
    ///
    /// Fails if either word is missing or the `:` is absent.
    pub fn pair(&mut self) -> Result<(String, String), ParseError> {
        self.whitespace();
        let property = self.word()?;
        self.whitespace();
        self.literal(':')?;
        self.whitespace();
        let value = self.word()?;
        Ok((property.to_lowercase(), value))
    }

    /// A pair that is properly terminated. The `;` is consumed; a `}` is
    /// left for the caller.
    fn declaration(&mut self) -> Result<(String, String), ParseError> {
        let pair = self.pair()?;
        self.whitespace();
        match self.current() {
            Some(';') => {
                self.position += 1;
                self.whitespace();
                Ok(pair)
            }
            Some('}') | None => Ok(pair),
            Some(_) => Err(ParseError::UnterminatedDeclaration(self.position)),
        }
    }

    /// Read declarations up to (not including) the closing `}`.
    ///
    /// A malformed declaration is skipped up to the next `;` (parsing
    /// resumes after it) or `}` (parsing stops). Later duplicates overwrite
    /// earlier ones.
    pub fn body(&mut self) -> StyleMap {
        let mut declarations = StyleMap::new();
        self.whitespace();

        while !self.at_end() && self.current() != Some('}') {
            match self.declaration() {
                Ok((property, value)) => {
                    let _ = declarations.insert(property, value);
                }
                Err(err) => {
                    log::debug!(target: "wren::css", "dropped declaration: {err}");
                    match self.ignore_until(&[';', '}']) {
                        Some(';') => {
                            self.position += 1;
                            self.whitespace();
                        }
                        _ => break,
                    }
                }
            }
        }

        declarations
    }

    /// A tag selector, followed by any number of descendant tag selectors,
    /// up to the `{`.
    ///
    /// # Errors
    ///
    /// Fails if a selector part is not a word (for example `a > b` or `a, b`).
    pub fn selector(&mut self) -> Result<Selector, ParseError> {
        let mut selector = Selector::Tag(self.word()?.to_lowercase());
        self.whitespace();

        while !self.at_end() && self.current() != Some('{') {
            let tag = self.word()?.to_lowercase();
            selector = Selector::Descendant(Box::new(selector), Box::new(Selector::Tag(tag)));
            self.whitespace();
        }

        Ok(selector)
    }

    fn rule(&mut self) -> Result<StyleRule, ParseError> {
        self.whitespace();
        let selector = self.selector()?;
        self.literal('{')?;
        self.whitespace();
        let declarations = self.body();
        self.literal('}')?;
        Ok(StyleRule {
            selector,
            declarations,
        })
    }

    /// Parse the whole sheet, in source order.
    ///
    /// A rule that fails to parse is skipped up to and including the next
    /// `}`. Parsing stops at the end of input or when no `}` remains.
    #[must_use]
    pub fn parse(mut self) -> Vec<StyleRule> {
        let mut rules = Vec::new();

        while !self.at_end() {
            match self.rule() {
                Ok(rule) => rules.push(rule),
                Err(err) => {
                    // Trailing whitespace ends in a failed selector too.
                    if self.at_end() && err == ParseError::ExpectedWord(self.position) {
                        break;
                    }
                    warn_once("CSS", &format!("skipped malformed rule: {err}"));
                    if self.ignore_until(&['}']).is_none() {
                        break;
                    }
                    self.position += 1;
                    self.whitespace();
                }
            }
        }

        rules
    }
}

/// Parse a standalone declaration body, as found in a `style` attribute.
///
/// # Example
/// ```
/// let decls = wren_css::parse_declarations("color: blue; COLOR: red");
/// assert_eq!(decls.get("color").map(String::as_str), Some("red"));
/// ```
#[must_use]
pub fn parse_declarations(raw: &str) -> StyleMap {
    CSSParser::new(raw).body()
}

/// Render declarations as `property: value;` pairs, sorted by property.
#[must_use]
pub fn serialize_declarations(declarations: &StyleMap) -> String {
    let mut properties: Vec<(&String, &String)> = declarations.iter().collect();
    properties.sort();

    let mut out = String::new();
    for (property, value) in properties {
        if !out.is_empty() {
            out.push(' ');
        }
        let _ = write!(out, "{property}: {value};");
    }
    out
}
