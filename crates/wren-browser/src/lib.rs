//! High-level document API for the Wren engine.
//!
//! # Scope
//!
//! This crate provides:
//! - **Document Loading** - fetch a page from a path, `file://`, `data:` or
//!   `http(s)://` URL
//! - **Linked Style Sheets** - discover `<link rel="stylesheet">`, resolve
//!   and fetch them
//! - **Pipeline** - markup parsing, cascade, layout and paint in one call
//! - **Font Metrics** - text measurement backed by real font files
//!
//! # Not Yet Implemented
//!
//! - `<style>` elements and `@import`
//! - Caching of fetched resources between loads

pub mod font_metrics;

pub use wren_css as css;
pub use wren_dom as dom;
pub use wren_html as html;

use wren_common::net::{FetchError, fetch_text};
use wren_common::url::resolve_url;
use wren_common::warning::{clear_warnings, warn_once};
use wren_css::{
    DisplayList, FontMetrics, LayoutBox, LayoutConfig, Painter, StyleRule, compute_styles,
    layout_with_config, parse_stylesheet,
};
use wren_dom::DomTree;
use wren_html::{HTMLParser, HTMLTokenizer, ParseIssue};

/// A fully loaded, styled, laid out and painted document.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    /// Original markup.
    pub html_source: String,

    /// Where the markup came from, if it was loaded rather than given.
    pub url: Option<String>,

    /// The styled document tree.
    pub tree: DomTree,

    /// Repairs the markup parser had to make.
    pub parse_issues: Vec<ParseIssue>,

    /// Resolved URLs of the linked style sheets that loaded.
    pub stylesheets: Vec<String>,

    /// Rules from the linked style sheets, in document order. The default
    /// rules are not included.
    pub rules: Vec<StyleRule>,

    /// Viewport and margins used for the current geometry.
    pub config: LayoutConfig,

    /// The geometry tree.
    pub layout: LayoutBox,

    /// Paint commands for the geometry tree.
    pub display_list: DisplayList,
}

impl LoadedDocument {
    /// Lay the document out again at a new viewport width and repaint it.
    ///
    /// The tree and its resolved styles are reused as they are.
    pub fn relayout(&mut self, viewport_width: f32, metrics: &dyn FontMetrics) {
        self.config.viewport_width = viewport_width;
        self.layout = layout_with_config(&self.tree, &self.config, metrics);
        self.display_list = Painter::new(&self.tree).paint(&self.layout);
    }

    /// Total height of the laid out content, including the top margin.
    #[must_use]
    pub fn content_height(&self) -> f32 {
        self.layout.bottom()
    }
}

/// Error type for document loading.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The document itself could not be fetched.
    #[error("failed to load '{url}': {source}")]
    Fetch {
        /// The location that was requested.
        url: String,
        /// Why the fetch failed.
        #[source]
        source: FetchError,
    },
}

/// Load a document from a path or URL and run the whole pipeline.
///
/// Linked style sheets are resolved against `url`. A sheet that fails to
/// load is skipped with a warning; only a failure to fetch the document
/// itself is an error.
///
/// # Errors
///
/// Returns [`LoadError::Fetch`] if the document cannot be fetched.
pub fn load_document(
    url: &str,
    config: &LayoutConfig,
    metrics: &dyn FontMetrics,
) -> Result<LoadedDocument, LoadError> {
    clear_warnings();
    let html_source = fetch_text(url).map_err(|source| LoadError::Fetch {
        url: url.to_string(),
        source,
    })?;
    log::debug!(target: "wren", "fetched {url}: {} bytes", html_source.len());

    let mut document = parse_document(&html_source, Some(url), config, metrics);
    document.url = Some(url.to_string());
    Ok(document)
}

/// Run the pipeline over markup that is already in memory.
///
/// Without a `base_url`, relative style sheet links are resolved as
/// filesystem paths relative to the working directory.
#[must_use]
pub fn parse_document(
    html: &str,
    base_url: Option<&str>,
    config: &LayoutConfig,
    metrics: &dyn FontMetrics,
) -> LoadedDocument {
    let mut tokenizer = HTMLTokenizer::new(html.to_string());
    tokenizer.run();
    let (mut tree, parse_issues) = HTMLParser::new(tokenizer.into_tokens()).run_with_issues();

    let (rules, stylesheets) = load_stylesheets(&tree, base_url);
    compute_styles(&mut tree, &rules);

    let layout = layout_with_config(&tree, config, metrics);
    let display_list = Painter::new(&tree).paint(&layout);

    LoadedDocument {
        html_source: html.to_string(),
        url: None,
        tree,
        parse_issues,
        stylesheets,
        rules,
        config: *config,
        layout,
        display_list,
    }
}

/// [§ 4.2.4 The link element](https://html.spec.whatwg.org/multipage/semantics.html#the-link-element)
///
/// The `href` of every `<link>` whose `rel` contains the `stylesheet`
/// keyword, in document order.
#[must_use]
pub fn collect_stylesheet_links(tree: &DomTree) -> Vec<String> {
    if tree.is_empty() {
        return Vec::new();
    }
    tree.descendants(tree.root())
        .filter_map(|id| tree.as_element(id))
        .filter(|element| element.tag_name == "link")
        .filter(|element| {
            element.attr("rel").is_some_and(|rel| {
                rel.split_ascii_whitespace()
                    .any(|keyword| keyword.eq_ignore_ascii_case("stylesheet"))
            })
        })
        .filter_map(|element| element.attr("href"))
        .map(str::to_string)
        .collect()
}

/// Fetch and parse every linked style sheet.
///
/// Returns the rules of all sheets that loaded, concatenated in document
/// order, and the resolved URLs they came from.
#[must_use]
pub fn load_stylesheets(tree: &DomTree, base_url: Option<&str>) -> (Vec<StyleRule>, Vec<String>) {
    let mut rules = Vec::new();
    let mut loaded = Vec::new();

    for href in collect_stylesheet_links(tree) {
        let url = resolve_url(&href, base_url);
        match fetch_text(&url) {
            Ok(css) => {
                let sheet = parse_stylesheet(&css);
                log::debug!(target: "wren", "stylesheet {url}: {} rules", sheet.len());
                rules.extend(sheet);
                loaded.push(url);
            }
            Err(err) => warn_once("Loader", &format!("skipped stylesheet '{url}': {err}")),
        }
    }

    (rules, loaded)
}
