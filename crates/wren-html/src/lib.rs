//! Markup tokenizer and tree builder for the Wren layout engine.
//!
//! # Scope
//!
//! This crate implements a forgiving reading of HTML:
//! - **Tokenizer**: splits input into text runs, start tags (with quoted,
//!   unquoted and valueless attributes), end tags and `<!...>` declarations.
//! - **Tree builder**: a stack of unfinished elements with implicit `html`,
//!   `head` and `body` insertion and a fixed set of void elements.
//!
//! Malformed input never fails. An unterminated tag degrades to text,
//! stray end tags are ignored and missing structure is synthesized.
//!
//! # Not Implemented
//!
//! - Insertion modes and the adoption agency algorithm
//! - Raw text elements (`<script>` and `<style>` bodies are scanned for tags
//!   like any other text)
//! - Most named character references

/// Tree construction from tokens.
pub mod parser;
/// Markup tokenizer for converting input into tokens.
pub mod tokenizer;

pub use parser::{HTMLParser, ParseIssue, parse, print_tree, tree_to_string};
pub use tokenizer::{Attribute, HTMLTokenizer, Token};
