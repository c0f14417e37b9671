//! Markup tokenizer module.
//!
//! Loosely follows [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard, reduced to the two states the
//! engine needs.

/// Character reference decoding for text runs.
pub mod character_reference;
/// Helper methods for tokenizer state transitions and token emission.
pub mod helpers;
/// Named character reference lookup table.
pub mod named_character_references;
/// Token types produced by the tokenizer.
pub mod token;
/// Tokenizer state machine implementation.
pub mod core;

pub use self::core::{HTMLTokenizer, TokenizerState};
pub use token::{Attribute, Token};
