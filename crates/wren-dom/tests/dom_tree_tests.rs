//! Tests for arena tree construction, traversal and style storage.

use wren_dom::{AttributesMap, DomTree, ElementData, NodeId, NodeType, StyleMap};

/// Helper to create an element node and return its `NodeId`.
fn alloc_element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.alloc(NodeType::Element(ElementData::new(tag, AttributesMap::new())))
}

/// html > body > (p > "Hi", "tail")
fn sample_tree() -> (DomTree, [NodeId; 5]) {
    let mut tree = DomTree::new();
    let html = alloc_element(&mut tree, "html");
    let body = alloc_element(&mut tree, "body");
    let p = alloc_element(&mut tree, "p");
    let hi = tree.alloc(NodeType::Text("Hi".to_string()));
    let tail = tree.alloc(NodeType::Text(" tail".to_string()));
    tree.append_child(html, body);
    tree.append_child(p, hi);
    tree.append_child(body, p);
    tree.append_child(body, tail);
    (tree, [html, body, p, hi, tail])
}

#[test]
fn test_first_node_is_root() {
    let (tree, [html, ..]) = sample_tree();
    assert_eq!(tree.root(), html);
    assert_eq!(tree.tag_name(tree.root()), Some("html"));
    assert_eq!(tree.parent(html), None);
}

#[test]
fn test_append_child_records_parent() {
    let (tree, [html, body, p, hi, _]) = sample_tree();
    assert_eq!(tree.parent(body), Some(html));
    assert_eq!(tree.parent(p), Some(body));
    assert_eq!(tree.parent(hi), Some(p));
    assert_eq!(tree.children(body).len(), 2);
}

#[test]
fn test_ancestors_walk_to_root() {
    let (tree, [html, body, p, hi, _]) = sample_tree();
    let ancestors: Vec<NodeId> = tree.ancestors(hi).collect();
    assert_eq!(ancestors, vec![p, body, html]);
    assert_eq!(tree.ancestors(html).count(), 0);
}

#[test]
fn test_descendants_are_preorder() {
    let (tree, [html, body, p, hi, tail]) = sample_tree();
    let order: Vec<NodeId> = tree.descendants(html).collect();
    assert_eq!(order, vec![html, body, p, hi, tail]);
}

#[test]
fn test_text_content_and_find() {
    let (tree, [html, _, p, _, _]) = sample_tree();
    assert_eq!(tree.text_content(html), "Hi tail");
    assert_eq!(tree.find_element(html, "p"), Some(p));
    assert_eq!(tree.find_element(html, "div"), None);
}

#[test]
fn test_as_element_and_as_text() {
    let (tree, [_, body, _, hi, _]) = sample_tree();
    assert!(tree.as_element(body).is_some());
    assert!(tree.as_text(body).is_none());
    assert_eq!(tree.as_text(hi), Some("Hi"));
    assert!(tree.as_element(hi).is_none());
}

#[test]
fn test_style_starts_empty_and_can_be_set() {
    let (mut tree, [_, _, p, _, _]) = sample_tree();
    assert!(tree.style(p).is_some_and(StyleMap::is_empty));

    let mut style = StyleMap::new();
    let _ = style.insert("color".to_string(), "red".to_string());
    tree.set_style(p, style);
    assert_eq!(tree.style_value(p, "color"), Some("red"));
    assert_eq!(tree.style_value(p, "background-color"), None);
}

#[test]
fn test_missing_node_lookups_are_empty() {
    let tree = DomTree::new();
    assert!(tree.is_empty());
    assert!(tree.children(NodeId(7)).is_empty());
    assert_eq!(tree.descendants(NodeId::ROOT).count(), 0);
}

#[test]
fn test_element_attr() {
    let mut attrs = AttributesMap::new();
    let _ = attrs.insert("class".to_string(), "title".to_string());
    let data = ElementData::new("h1", attrs);
    assert_eq!(data.attr("class"), Some("title"));
    assert_eq!(data.attr("id"), None);
}
