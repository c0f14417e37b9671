//! Integration tests for cascade resolution.

use quickcheck_macros::quickcheck;
use wren_css::{apply, compute_styles, parse_stylesheet};
use wren_dom::{DomTree, NodeId};
use wren_html::parse;

/// Parse markup and resolve it against `css` alone, without default rules.
fn styled(html: &str, css: &str) -> DomTree {
    let mut tree = parse(html);
    apply(&mut tree, &parse_stylesheet(css));
    tree
}

/// Parse markup and resolve it against the default rules plus `css`.
fn styled_with_defaults(html: &str, css: &str) -> DomTree {
    let mut tree = parse(html);
    compute_styles(&mut tree, &parse_stylesheet(css));
    tree
}

fn find(tree: &DomTree, tag: &str) -> NodeId {
    tree.find_element(tree.root(), tag)
        .unwrap_or_else(|| panic!("no <{tag}> in tree"))
}

fn first_text(tree: &DomTree, under: NodeId) -> NodeId {
    tree.descendants(under)
        .find(|&id| tree.as_text(id).is_some())
        .expect("no text")
}

fn prop<'a>(tree: &'a DomTree, id: NodeId, property: &str) -> Option<&'a str> {
    tree.style_value(id, property)
}

#[test]
fn test_defaults_without_rules() {
    let tree = styled("<p>Hi</p>", "");
    let p = find(&tree, "p");
    for id in [tree.root(), p, first_text(&tree, p)] {
        assert_eq!(prop(&tree, id, "color"), Some("black"));
        assert_eq!(prop(&tree, id, "font-size"), Some("16px"));
        assert_eq!(prop(&tree, id, "font-style"), Some("normal"));
        assert_eq!(prop(&tree, id, "font-weight"), Some("normal"));
        assert_eq!(prop(&tree, id, "background-color"), None);
    }
}

#[test]
fn test_inline_style_beats_rules() {
    let tree = styled(r#"<p style="color: blue">x</p>"#, "p { color: red; }");
    let p = find(&tree, "p");
    assert_eq!(prop(&tree, p, "color"), Some("blue"));
    assert_eq!(prop(&tree, first_text(&tree, p), "color"), Some("blue"));
}

#[test]
fn test_higher_priority_wins_regardless_of_order() {
    let css_forward = "p { color: red; } div p { color: green; }";
    let css_backward = "div p { color: green; } p { color: red; }";
    for css in [css_forward, css_backward] {
        let tree = styled("<div><p>x</p></div>", css);
        assert_eq!(prop(&tree, find(&tree, "p"), "color"), Some("green"), "{css}");
    }
}

#[test]
fn test_equal_priority_later_rule_wins() {
    let tree = styled("<p>x</p>", "p { color: red; } p { color: blue; }");
    assert_eq!(prop(&tree, find(&tree, "p"), "color"), Some("blue"));
}

#[test]
fn test_author_rule_beats_default_of_same_priority() {
    let tree = styled_with_defaults("<b>x</b><i>y</i>", "b { font-weight: normal; }");
    assert_eq!(prop(&tree, find(&tree, "b"), "font-weight"), Some("normal"));
    assert_eq!(prop(&tree, find(&tree, "i"), "font-style"), Some("italic"));
}

#[test]
fn test_default_rules() {
    let tree = styled_with_defaults("<p><a>link</a> <strong>bold</strong></p><pre>code</pre>", "");
    let a = find(&tree, "a");
    assert_eq!(prop(&tree, first_text(&tree, a), "color"), Some("blue"));
    assert_eq!(prop(&tree, find(&tree, "strong"), "font-weight"), Some("bold"));
    assert_eq!(prop(&tree, find(&tree, "pre"), "background-color"), Some("gray"));
}

#[test]
fn test_inherited_properties_flow_down() {
    let tree = styled("<div><p><span>deep</span></p></div>", "div { color: green; font-style: italic; }");
    let span = find(&tree, "span");
    assert_eq!(prop(&tree, span, "color"), Some("green"));
    assert_eq!(prop(&tree, first_text(&tree, span), "font-style"), Some("italic"));
}

#[test]
fn test_other_properties_do_not_inherit() {
    let tree = styled("<div><p>x</p></div>", "div { background-color: red; }");
    assert_eq!(prop(&tree, find(&tree, "div"), "background-color"), Some("red"));
    assert_eq!(prop(&tree, find(&tree, "p"), "background-color"), None);
}

#[test]
fn test_percentage_font_size_uses_parent() {
    let tree = styled(
        r#"<div style="font-size: 200%"><p style="font-size: 50%">x</p></div>"#,
        "",
    );
    assert_eq!(prop(&tree, find(&tree, "div"), "font-size"), Some("32px"));
    let p = find(&tree, "p");
    assert_eq!(prop(&tree, p, "font-size"), Some("16px"));
    assert_eq!(prop(&tree, first_text(&tree, p), "font-size"), Some("16px"));
}

#[test]
fn test_percentage_of_keyword_parent() {
    let tree = styled("<div><p>x</p></div>", "div { font-size: large; } p { font-size: 50%; }");
    assert_eq!(prop(&tree, find(&tree, "p"), "font-size"), Some("9px"));
}

#[test]
fn test_unreadable_percentage_falls_back() {
    let tree = styled(r#"<p style="font-size: big%">x</p>"#, "");
    assert_eq!(prop(&tree, find(&tree, "p"), "font-size"), Some("16px"));
}

#[test]
fn test_every_node_is_resolved() {
    let tree = styled("<title>t</title><p>a <b>b</b></p>", "");
    for id in tree.descendants(tree.root()) {
        assert!(prop(&tree, id, "font-size").is_some(), "node {id:?} unstyled");
    }
}

#[test]
fn test_empty_tree_is_a_no_op() {
    let mut tree = DomTree::new();
    apply(&mut tree, &parse_stylesheet("p { color: red; }"));
    assert!(tree.is_empty());
}

const SELECTORS: [&str; 5] = ["p", "div", "div p", "body p", "html"];
const COLORS: [&str; 4] = ["red", "green", "blue", "black"];

#[quickcheck]
fn prop_cascade_is_deterministic(rules: Vec<(u8, u8)>) -> bool {
    let css: String = rules
        .iter()
        .map(|&(s, c)| {
            format!(
                "{} {{ color: {}; }}\n",
                SELECTORS[s as usize % SELECTORS.len()],
                COLORS[c as usize % COLORS.len()]
            )
        })
        .collect();
    let rules = parse_stylesheet(&css);

    let markup = "<div><p>a</p></div><p style=\"font-size: 150%\">b</p>";
    let mut first = parse(markup);
    let mut second = parse(markup);
    apply(&mut first, &rules);
    apply(&mut second, &rules);

    (0..first.len()).all(|i| first.style(NodeId(i)) == second.style(NodeId(i)))
}
