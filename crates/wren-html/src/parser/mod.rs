//! Tree construction from the token stream.

/// Tree builder implementation.
pub mod core;

pub use self::core::{
    HEAD_ELEMENTS, HTMLParser, ParseIssue, VOID_ELEMENTS, parse, print_tree, tree_to_string,
};
