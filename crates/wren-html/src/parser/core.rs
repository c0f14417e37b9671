use wren_common::warning::warn_once;
use wren_dom::{AttributesMap, DomTree, ElementData, NodeId, NodeType};

use crate::tokenizer::Token;

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements: area, base, br, col, embed, hr, img, input, link, meta,
/// source, track, wbr"
///
/// These are attached to the current element as soon as they are seen and
/// never become the current element themselves. `param` is kept for older
/// pages.
pub const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements that belong in `head`. Seeing one of these while only `html` is
/// open opens an implied `head` instead of an implied `body`.
pub const HEAD_ELEMENTS: [&str; 9] = [
    "base", "basefont", "bgsound", "noscript", "link", "meta", "title", "style", "script",
];

/// A tree-construction problem that was repaired rather than reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Human readable description of what was repaired.
    pub message: String,
    /// Index into the token stream where this issue was encountered.
    pub token_index: usize,
}

/// The item being fed to implicit tag insertion.
#[derive(Debug, Clone, Copy)]
enum Incoming<'a> {
    Text,
    Start(&'a str),
    End(&'a str),
}

/// Shape of the stack of open elements, as far as implicit tag insertion
/// cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Skeleton {
    Empty,
    Html,
    HtmlHead,
    Complete,
}

/// Builds a [`DomTree`] from a stream of tokens.
///
/// Tree construction keeps a stack of *unfinished* elements. A start tag
/// pushes, an end tag pops the top and attaches it to the element beneath.
/// End tags are not matched against the element they close: `</b>` closes
/// whatever is on top. Missing `html`, `head` and `body` elements are
/// synthesized before each item, so the result always has a single `html`
/// root.
pub struct HTMLParser {
    /// [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    ///
    /// Stores `NodeId`s into the arena. Elements are only attached to their
    /// parent when popped, so children keep the order in which they finished.
    stack_of_open_elements: Vec<NodeId>,

    tree: DomTree,

    /// Input tokens from the tokenizer.
    tokens: Vec<Token>,

    /// Current position in token stream.
    token_index: usize,

    /// Repairs made while building the tree.
    issues: Vec<ParseIssue>,
}

impl HTMLParser {
    /// Create a new parser from a token stream.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            stack_of_open_elements: Vec::new(),
            tree: DomTree::new(),
            tokens,
            token_index: 0,
            issues: Vec::new(),
        }
    }

    /// Run the parser and return the DOM tree.
    ///
    /// The root of the returned tree is at [`NodeId::ROOT`] and is always an
    /// `html` element.
    #[must_use]
    pub fn run(self) -> DomTree {
        self.run_with_issues().0
    }

    /// Run the parser and return both the `DomTree` and any repairs made.
    #[must_use]
    pub fn run_with_issues(mut self) -> (DomTree, Vec<ParseIssue>) {
        let tokens = std::mem::take(&mut self.tokens);
        for (index, token) in tokens.iter().enumerate() {
            self.token_index = index;
            self.process_token(token);
        }
        self.finish();
        let issues = std::mem::take(&mut self.issues);
        (self.tree, issues)
    }

    fn process_token(&mut self, token: &Token) {
        match token {
            Token::Text { data } => self.add_text(data),
            Token::StartTag {
                name, attributes, ..
            } => {
                let attrs: AttributesMap = attributes
                    .iter()
                    .map(|a| (a.name.clone(), a.value.clone()))
                    .collect();
                self.implicit_tags(Incoming::Start(name));
                self.insert_element(name, attrs);
            }
            Token::EndTag { name } => {
                self.implicit_tags(Incoming::End(name));
                self.close_element(name);
            }
            // Comments and doctypes never make it into the tree.
            Token::Declaration { .. } | Token::EndOfFile => {}
        }
    }

    /// Record a repair.
    fn parse_warning(&mut self, message: &str) {
        warn_once("HTML Parser", message);
        self.issues.push(ParseIssue {
            message: message.to_string(),
            token_index: self.token_index,
        });
    }

    fn current_node(&self) -> Option<NodeId> {
        self.stack_of_open_elements.last().copied()
    }

    /// Which of the skeleton shapes the stack of open elements is in.
    ///
    /// Only the bottom two entries are inspected, so this is constant time
    /// however deep the document is nested.
    fn skeleton(&self) -> Skeleton {
        let tag = |id: &NodeId| self.tree.tag_name(*id);
        match self.stack_of_open_elements.as_slice() {
            [] => Skeleton::Empty,
            [root] if tag(root) == Some("html") => Skeleton::Html,
            [root, head] if tag(root) == Some("html") && tag(head) == Some("head") => {
                Skeleton::HtmlHead
            }
            _ => Skeleton::Complete,
        }
    }

    /// Append a text node to the current element. Whitespace-only runs are
    /// dropped.
    fn add_text(&mut self, text: &str) {
        if text.chars().all(char::is_whitespace) {
            return;
        }
        self.implicit_tags(Incoming::Text);
        let Some(parent) = self.current_node() else {
            return;
        };
        let id = self.tree.alloc(NodeType::Text(text.to_string()));
        self.tree.append_child(parent, id);
    }

    /// Create an element for a start tag. Void elements are attached right
    /// away; everything else becomes the new current element.
    fn insert_element(&mut self, tag: &str, attrs: AttributesMap) {
        let id = self.tree.alloc(NodeType::Element(ElementData::new(tag, attrs)));
        if VOID_ELEMENTS.contains(&tag)
            && let Some(parent) = self.current_node()
        {
            self.tree.append_child(parent, id);
        } else {
            self.stack_of_open_elements.push(id);
        }
    }

    /// Pop the current element and attach it to the one beneath. The last
    /// open element is never popped here; [`Self::finish`] returns it.
    fn close_element(&mut self, tag: &str) {
        if self.stack_of_open_elements.len() <= 1 {
            // `</html>` always lands here in a well-formed page.
            if tag != "html" {
                self.parse_warning(&format!("ignored </{tag}> with no open element to close"));
            }
            return;
        }
        let Some(node) = self.stack_of_open_elements.pop() else {
            return;
        };
        if let Some(open) = self.tree.tag_name(node)
            && open != tag
        {
            let message = format!("</{tag}> closed <{open}>");
            self.parse_warning(&message);
        }
        if let Some(parent) = self.current_node() {
            self.tree.append_child(parent, node);
        }
    }

    /// Synthesize the structural elements the incoming item needs.
    ///
    /// Repeats until nothing more is needed:
    /// - nothing open and the item is not `<html>`: open `html`;
    /// - only `html` open and the item is not `<head>`, `<body>` or
    ///   `</html>`: open `head` for head content, `body` for anything else;
    /// - `html` and `head` open and the item is neither `</head>` nor head
    ///   content: close `head`.
    fn implicit_tags(&mut self, incoming: Incoming<'_>) {
        loop {
            match (self.skeleton(), incoming) {
                (Skeleton::Empty, Incoming::Start("html"))
                | (Skeleton::Html, Incoming::Start("head" | "body") | Incoming::End("html"))
                | (Skeleton::HtmlHead, Incoming::End("head"))
                | (Skeleton::Complete, _) => break,
                (Skeleton::HtmlHead, Incoming::Start(tag)) if HEAD_ELEMENTS.contains(&tag) => break,
                (Skeleton::Empty, _) => self.synthesize("html"),
                (Skeleton::Html, Incoming::Start(tag)) if HEAD_ELEMENTS.contains(&tag) => {
                    self.synthesize("head");
                }
                (Skeleton::Html, _) => self.synthesize("body"),
                (Skeleton::HtmlHead, _) => self.close_element("head"),
            }
        }
    }

    fn synthesize(&mut self, tag: &str) {
        log::debug!(target: "wren::html", "implied <{tag}> at token {}", self.token_index);
        self.insert_element(tag, AttributesMap::new());
    }

    /// Complete the tree once the token stream is exhausted.
    ///
    /// If nothing was ever opened the skeleton is synthesized now; then every
    /// unfinished element is attached to the one beneath it.
    fn finish(&mut self) {
        if self.stack_of_open_elements.is_empty() {
            self.implicit_tags(Incoming::Text);
        }
        while self.stack_of_open_elements.len() > 1 {
            if let Some(node) = self.stack_of_open_elements.pop()
                && let Some(parent) = self.current_node()
            {
                self.tree.append_child(parent, node);
            }
        }
        self.stack_of_open_elements.clear();
    }
}

/// Parse raw markup into a document tree.
///
/// Never fails: malformed markup is repaired and the returned tree always
/// has exactly one `html` root at [`NodeId::ROOT`].
///
/// # Example
/// ```
/// let tree = wren_html::parse("<p>Hi</p>");
/// assert_eq!(tree.tag_name(tree.root()), Some("html"));
/// ```
#[must_use]
pub fn parse(raw: &str) -> DomTree {
    let mut tokenizer = crate::tokenizer::HTMLTokenizer::new(raw.to_string());
    tokenizer.run();
    HTMLParser::new(tokenizer.into_tokens()).run()
}

/// Print a tree for debugging.
///
/// Elements print as `<tag attr="value">`, text as a quoted string, each
/// level indented by two spaces.
pub fn print_tree(tree: &DomTree, id: NodeId, indent: usize) {
    print!("{}", tree_to_string(tree, id, indent));
}

/// Render the same dump as [`print_tree`] into a string.
#[must_use]
pub fn tree_to_string(tree: &DomTree, id: NodeId, indent: usize) -> String {
    let mut out = String::new();
    write_tree(tree, id, indent, &mut out);
    out
}

fn write_tree(tree: &DomTree, id: NodeId, indent: usize, out: &mut String) {
    let mut pending = vec![(id, indent)];
    while let Some((id, indent)) = pending.pop() {
        let Some(node) = tree.get(id) else {
            continue;
        };
        let prefix = "  ".repeat(indent);
        match &node.node_type {
            NodeType::Element(data) => {
                if data.attrs.is_empty() {
                    out.push_str(&format!("{prefix}<{}>\n", data.tag_name));
                } else {
                    let mut attrs: Vec<String> = data
                        .attrs
                        .iter()
                        .map(|(k, v)| {
                            if v.is_empty() {
                                k.clone()
                            } else {
                                format!("{k}=\"{v}\"")
                            }
                        })
                        .collect();
                    attrs.sort();
                    out.push_str(&format!("{prefix}<{} {}>\n", data.tag_name, attrs.join(" ")));
                }
            }
            NodeType::Text(data) => {
                out.push_str(&format!("{prefix}{data:?}\n"));
            }
        }
        pending.extend(tree.children(id).iter().rev().map(|&child| (child, indent + 1)));
    }
}
