//! Integration tests for the tree builder.

use quickcheck_macros::quickcheck;
use wren_dom::{DomTree, NodeId, NodeType};
use wren_html::{HTMLParser, HTMLTokenizer, parse, tree_to_string};

/// Tag names of the element children of `id`
fn child_tags(tree: &DomTree, id: NodeId) -> Vec<&str> {
    tree.children(id)
        .iter()
        .filter_map(|&c| tree.tag_name(c))
        .collect()
}

/// Helper to get element by tag name (first match, depth-first)
fn find(tree: &DomTree, tag: &str) -> NodeId {
    tree.find_element(tree.root(), tag)
        .unwrap_or_else(|| panic!("no <{tag}> in tree"))
}

/// Number of nodes with no parent
fn root_count(tree: &DomTree) -> usize {
    (0..tree.len())
        .filter(|&i| tree.parent(NodeId(i)).is_none())
        .count()
}

#[test]
fn test_paragraph_gets_html_and_body() {
    let tree = parse("<p>Hi</p>");
    let html = tree.root();
    assert_eq!(tree.tag_name(html), Some("html"));
    assert_eq!(child_tags(&tree, html), vec!["body"]);

    let body = find(&tree, "body");
    assert_eq!(child_tags(&tree, body), vec!["p"]);

    let p = find(&tree, "p");
    let children = tree.children(p);
    assert_eq!(children.len(), 1);
    assert_eq!(tree.as_text(children[0]), Some("Hi"));
}

#[test]
fn test_full_document_structure() {
    let tree = parse("<!DOCTYPE html><html><head></head><body></body></html>");
    assert_eq!(child_tags(&tree, tree.root()), vec!["head", "body"]);
    assert_eq!(root_count(&tree), 1);
}

#[test]
fn test_head_content_opens_head() {
    let tree = parse("<title>T</title><p>x</p>");
    assert_eq!(child_tags(&tree, tree.root()), vec!["head", "body"]);
    let head = find(&tree, "head");
    assert_eq!(child_tags(&tree, head), vec!["title"]);
    assert_eq!(tree.text_content(head), "T");
}

#[test]
fn test_body_content_closes_implied_head() {
    let tree = parse(r#"<link rel="stylesheet" href="a.css"><meta charset=utf-8>Text"#);
    let head = find(&tree, "head");
    assert_eq!(child_tags(&tree, head), vec!["link", "meta"]);
    let body = find(&tree, "body");
    assert_eq!(tree.text_content(body), "Text");
}

#[test]
fn test_void_elements_are_not_containers() {
    let tree = parse("<p>a<br>b<img src=x.png>c</p>");
    let p = find(&tree, "p");
    assert_eq!(tree.children(p).len(), 5);
    let br = find(&tree, "br");
    assert!(tree.children(br).is_empty());
    assert_eq!(tree.parent(br), Some(p));
}

#[test]
fn test_whitespace_only_text_is_dropped() {
    let tree = parse("<body>\n  <p>x</p>\n</body>");
    let body = find(&tree, "body");
    assert_eq!(tree.children(body).len(), 1);
}

#[test]
fn test_comments_and_doctype_are_discarded() {
    let tree = parse("<!doctype html><!-- hidden --><p>shown</p>");
    assert_eq!(tree.text_content(tree.root()), "shown");
}

#[test]
fn test_end_tag_closes_current_element_regardless_of_name() {
    let tree = parse("<div><b>bold</div>after");
    let div = find(&tree, "div");
    let b = find(&tree, "b");
    assert_eq!(tree.parent(b), Some(div));
    // `</div>` closed the `b`, so the trailing text is still inside `div`.
    assert_eq!(tree.text_content(div), "boldafter");
}

#[test]
fn test_unclosed_elements_are_attached_at_finish() {
    let tree = parse("<ul><li>one<li>two");
    let ul = find(&tree, "ul");
    let first = find(&tree, "li");
    assert_eq!(tree.parent(first), Some(ul));
    assert_eq!(tree.text_content(ul), "onetwo");
    assert_eq!(root_count(&tree), 1);
}

#[test]
fn test_extra_end_tags_never_pop_the_root() {
    let tree = parse("</p></div></body></html></html>after");
    assert_eq!(tree.tag_name(tree.root()), Some("html"));
    assert_eq!(root_count(&tree), 1);
    assert_eq!(tree.text_content(tree.root()), "after");
}

#[test]
fn test_attributes_are_stored_last_wins() {
    let tree = parse(r#"<h1 class="title" CLASS=other id=x>T</h1>"#);
    let h1 = tree.as_element(find(&tree, "h1")).unwrap();
    assert_eq!(h1.attr("class"), Some("other"));
    assert_eq!(h1.attr("id"), Some("x"));
}

#[test]
fn test_empty_input_synthesizes_skeleton() {
    let tree = parse("");
    assert_eq!(tree.tag_name(tree.root()), Some("html"));
    assert_eq!(child_tags(&tree, tree.root()), vec!["body"]);
}

#[test]
fn test_self_closing_non_void_still_opens() {
    let tree = parse("<div/>inside");
    let div = find(&tree, "div");
    assert_eq!(tree.text_content(div), "inside");
}

#[test]
fn test_text_node_parent_links() {
    let tree = parse("<p>Hi</p>");
    let p = find(&tree, "p");
    let text = tree.children(p)[0];
    assert!(matches!(
        tree.get(text).map(|n| &n.node_type),
        Some(NodeType::Text(s)) if s == "Hi"
    ));
    let chain: Vec<&str> = tree
        .ancestors(text)
        .filter_map(|id| tree.tag_name(id))
        .collect();
    assert_eq!(chain, vec!["p", "body", "html"]);
}

#[test]
fn test_repairs_are_reported() {
    let mut tokenizer = HTMLTokenizer::new("<div><b>x</div></span>".to_string());
    tokenizer.run();
    let (tree, issues) = HTMLParser::new(tokenizer.into_tokens()).run_with_issues();
    assert_eq!(root_count(&tree), 1);
    assert!(issues.iter().any(|i| i.message == "</div> closed <b>"));
    assert!(issues.iter().any(|i| i.message == "</span> closed <div>"));
}

#[test]
fn test_tree_dump() {
    let tree = parse(r#"<p class=a>Hi</p>"#);
    let dump = tree_to_string(&tree, tree.root(), 0);
    assert_eq!(dump, "<html>\n  <body>\n    <p class=\"a\">\n      \"Hi\"\n");
}

#[test]
fn test_deeply_nested_elements() {
    const DEPTH: usize = 10_000;
    let html = format!("{}deep{}", "<div>".repeat(DEPTH), "</div>".repeat(DEPTH));
    let tree = parse(&html);

    let text = (0..tree.len())
        .map(NodeId)
        .find(|&id| tree.as_text(id).is_some())
        .expect("text node");
    // Every div, then body, then html.
    assert_eq!(tree.ancestors(text).count(), DEPTH + 2);
    assert_eq!(root_count(&tree), 1);

    let dump = tree_to_string(&tree, tree.root(), 0);
    assert_eq!(dump.lines().count(), DEPTH + 3);
    assert!(dump.ends_with(&format!("{}\"deep\"\n", "  ".repeat(DEPTH + 2))));
}

#[quickcheck]
fn prop_always_one_html_root(input: String) -> bool {
    let tree = parse(&input);
    tree.tag_name(tree.root()) == Some("html")
        && tree.parent(tree.root()).is_none()
        && root_count(&tree) == 1
}

#[quickcheck]
fn prop_one_root_for_tag_soup(pieces: Vec<u8>) -> bool {
    const PIECES: [&str; 12] = [
        "<p>", "</p>", "<div>", "</div>", "<br>", "text", "<head>", "</html>", "<title>", "<",
        ">", "<!-- c -->",
    ];
    let input: String = pieces
        .iter()
        .map(|&b| PIECES[usize::from(b) % PIECES.len()])
        .collect();
    let tree = parse(&input);
    tree.tag_name(tree.root()) == Some("html") && root_count(&tree) == 1
}
