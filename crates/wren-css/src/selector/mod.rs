//! Selector matching
//!
//! Only two kinds of selector exist: a tag name, and a descendant
//! combination of two selectors. See
//! [Selectors Level 4 § 5.1](https://www.w3.org/TR/selectors-4/#type-selectors) and
//! [§ 16.1](https://www.w3.org/TR/selectors-4/#descendant-combinators).

use core::fmt;

use wren_dom::{DomTree, NodeId};

/// A parsed selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    /// "A type selector is the name of a document language element type,
    /// and represents an instance of that element type in the document tree."
    ///
    /// Holds the case-folded tag name.
    Tag(String),

    /// [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
    /// "A descendant combinator is whitespace that separates two compound
    /// selectors. A selector of the form A B represents an element B that is
    /// an arbitrary descendant of some ancestor element A."
    ///
    /// The first field is the ancestor, the second the descendant.
    Descendant(Box<Selector>, Box<Selector>),
}

impl Selector {
    /// Cascade weight: the number of tag selectors this selector contains.
    #[must_use]
    pub fn priority(&self) -> u32 {
        match self {
            Selector::Tag(_) => 1,
            Selector::Descendant(ancestor, descendant) => {
                ancestor.priority() + descendant.priority()
            }
        }
    }

    /// Does this selector match `node`?
    ///
    /// Text nodes never match. A descendant selector matches when its
    /// descendant part matches `node` and its ancestor part matches any
    /// proper ancestor of `node`.
    #[must_use]
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        match self {
            Selector::Tag(tag) => tree.tag_name(node) == Some(tag.as_str()),
            Selector::Descendant(ancestor, descendant) => {
                descendant.matches(tree, node)
                    && tree
                        .ancestors(node)
                        .any(|candidate| ancestor.matches(tree, candidate))
            }
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Tag(tag) => write!(f, "{tag}"),
            Selector::Descendant(ancestor, descendant) => write!(f, "{ancestor} {descendant}"),
        }
    }
}
