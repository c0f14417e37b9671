//! Cascade resolution
//!
//! Assigns every node of the tree its resolved property map, written in place
//! on the node. Loosely follows
//! [CSS Cascading and Inheritance Level 4](https://www.w3.org/TR/css-cascade-4/)
//! with a much smaller model: rules are ranked by [`Selector::priority`]
//! alone, and only four properties inherit.
//!
//! [`Selector::priority`]: crate::selector::Selector::priority

use wren_common::warning::warn_once;
use wren_dom::{DomTree, NodeId, StyleMap};

use crate::parser::{StyleRule, parse_declarations};
use crate::ua_stylesheet::ua_rules;
use crate::values::{DEFAULT_FONT_SIZE, font_size_px, percentage};

/// [§ 7.1 Inherited Properties](https://www.w3.org/TR/css-cascade-4/#inherited-property)
/// "Some properties are inherited from an ancestor element to its descendants."
///
/// The properties copied from the parent's resolved map, with the value the
/// root starts from.
pub const INHERITED_PROPERTIES: [(&str, &str); 4] = [
    ("font-size", DEFAULT_FONT_SIZE),
    ("font-style", "normal"),
    ("font-weight", "normal"),
    ("color", "black"),
];

/// Resolve styles for the whole tree.
///
/// [§ 6.4 Cascade Sorting Order](https://www.w3.org/TR/css-cascade-4/#cascade-sort)
///
/// Rules are stably sorted by ascending priority, so more specific rules are
/// applied later and win, and rules of equal priority keep their order in
/// `rules` (the later one wins). Each node, parents before children:
///
/// 1. starts from the inherited properties of its parent (or the fixed
///    defaults at the root),
/// 2. applies every matching rule in sorted order,
/// 3. applies its `style` attribute, which always wins,
/// 4. turns a percentage `font-size` into pixels against the parent's
///    resolved size.
pub fn apply(tree: &mut DomTree, rules: &[StyleRule]) {
    let mut sorted: Vec<&StyleRule> = rules.iter().collect();
    sorted.sort_by_key(|rule| rule.selector.priority());

    if tree.is_empty() {
        return;
    }

    // Pre-order, so a parent is always resolved before its children read it.
    let order: Vec<NodeId> = tree.descendants(tree.root()).collect();
    for id in order {
        let style = resolve_node(tree, id, &sorted);
        tree.set_style(id, style);
    }
}

/// Resolve styles with the default rules in front of `author_rules`.
pub fn compute_styles(tree: &mut DomTree, author_rules: &[StyleRule]) {
    let rules: Vec<StyleRule> = ua_rules().iter().chain(author_rules).cloned().collect();
    log::debug!(
        target: "wren::css",
        "cascade: {} default + {} author rules over {} nodes",
        ua_rules().len(),
        author_rules.len(),
        tree.len()
    );
    apply(tree, &rules);
}

fn resolve_node(tree: &DomTree, id: NodeId, rules: &[&StyleRule]) -> StyleMap {
    let parent_style = tree.parent(id).and_then(|parent| tree.style(parent));
    let mut style = StyleMap::new();

    // STEP 1: inherit.
    for (property, default) in INHERITED_PROPERTIES {
        let value = parent_style
            .and_then(|s| s.get(property))
            .map_or(default, String::as_str);
        let _ = style.insert(property.to_string(), value.to_string());
    }

    // STEP 2: matching rules, least specific first.
    for rule in rules.iter().filter(|rule| rule.selector.matches(tree, id)) {
        for (property, value) in &rule.declarations {
            let _ = style.insert(property.clone(), value.clone());
        }
    }

    // STEP 3: the `style` attribute.
    if let Some(inline) = tree.as_element(id).and_then(|e| e.attr("style")) {
        style.extend(parse_declarations(inline));
    }

    // STEP 4: percentage font sizes.
    if let Some(pct) = style.get("font-size").and_then(|v| percentage(v)) {
        let parent_px = parent_style
            .and_then(|s| s.get("font-size"))
            .map_or_else(|| font_size_px(DEFAULT_FONT_SIZE), |v| font_size_px(v));
        let resolved = match pct {
            Some(pct) => format!("{}px", pct / 100.0 * parent_px),
            None => {
                warn_once("CSS", "unreadable percentage font-size; using the default");
                DEFAULT_FONT_SIZE.to_string()
            }
        };
        let _ = style.insert("font-size".to_string(), resolved);
    }

    style
}
