//! Layout Engine
//!
//! Turns a styled document tree into a geometry tree of [`LayoutBox`]es.
//!
//! # Model
//!
//! - The **document box** sits inside fixed margins and wraps exactly one
//!   block, the one for the document root.
//! - A **block** either stacks one child block per document child
//!   ([`LayoutMode::Block`]) or flows the text of its whole subtree into
//!   lines ([`LayoutMode::Inline`]).
//! - A **line** holds the text runs placed on it.
//!
//! Positions are absolute. They are computed top-down (a child is placed
//! only after its parent's `x`, `y` and `width` are known), heights
//! bottom-up (a block's height is known only after all its children are
//! laid out).
//!
//! # Module Structure
//!
//! - [`layout_box`] - Box types and block layout
//! - [`inline`] - Line breaking and the inline formatting state
//! - [`metrics`] - The text measurement capability

pub mod inline;
pub mod layout_box;
pub mod metrics;

pub use inline::{InlineState, TextAlign};
pub use layout_box::{BoxType, LayoutBox, LayoutMode, TextRun};
pub use metrics::{
    ApproximateFontMetrics, CachedFontMetrics, FontKey, FontMetrics, FontSlant, FontWeight,
    LineMetrics,
};

use serde::{Deserialize, Serialize};
use wren_dom::{DomTree, NodeId};

/// [HTML Living Standard § 15.3.3 Flow content](https://html.spec.whatwg.org/multipage/rendering.html#flow-content-3)
///
/// An element with any child in this set lays its children out as blocks.
pub const BLOCK_ELEMENTS: [&str; 37] = [
    "html", "body", "article", "section", "nav", "aside", "h1", "h2", "h3", "h4", "h5", "h6",
    "hgroup", "header", "footer", "address", "p", "hr", "pre", "blockquote", "ol", "ul", "menu",
    "li", "dl", "dt", "dd", "figure", "figcaption", "main", "div", "table", "form", "fieldset",
    "legend", "details", "summary",
];

/// Viewport and spacing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width of the viewport in pixels.
    pub viewport_width: f32,
    /// Horizontal margin on each side of the document box.
    pub h_step: f32,
    /// Top margin of the document box, and the extra space after a
    /// paragraph or a title heading.
    pub v_step: f32,
}

impl LayoutConfig {
    /// Horizontal margin.
    pub const HSTEP: f32 = 13.0;
    /// Vertical step.
    pub const VSTEP: f32 = 18.0;
    /// Default viewport width.
    pub const WIDTH: f32 = 1200.0;

    /// The default margins at the given viewport width.
    #[must_use]
    pub fn with_width(viewport_width: f32) -> Self {
        Self {
            viewport_width,
            ..Self::default()
        }
    }

    /// Width available to content: the viewport minus both side margins.
    #[must_use]
    pub fn content_width(&self) -> f32 {
        self.viewport_width - 2.0 * self.h_step
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            viewport_width: Self::WIDTH,
            h_step: Self::HSTEP,
            v_step: Self::VSTEP,
        }
    }
}

/// Lay out a styled tree at the given viewport width with the default
/// margins. Returns the document box.
///
/// The tree must have gone through the cascade; nodes with no resolved
/// style are measured with the default font.
pub fn layout(tree: &DomTree, viewport_width: f32, metrics: &dyn FontMetrics) -> LayoutBox {
    layout_with_config(tree, &LayoutConfig::with_width(viewport_width), metrics)
}

/// Lay out a styled tree with explicit margins.
pub fn layout_with_config(
    tree: &DomTree,
    config: &LayoutConfig,
    metrics: &dyn FontMetrics,
) -> LayoutBox {
    let root = tree.root();
    let x = config.h_step;
    let y = config.v_step;
    let width = config.content_width();

    let context = layout_box::LayoutContext {
        tree,
        metrics,
        v_step: config.v_step,
    };
    let child = context.layout_block(root, x, y, width);
    log::debug!(
        target: "wren::layout",
        "layout at width {}: document height {}",
        config.viewport_width,
        child.height
    );

    LayoutBox {
        box_type: BoxType::Document,
        x,
        y,
        width,
        height: child.height,
        children: vec![child],
        node: root,
    }
}

/// Decide how a node's box arranges its content.
///
/// Text is always inline. An element is a block container if any of its
/// element children is in [`BLOCK_ELEMENTS`], inline if it has any
/// children at all, and an (empty) block otherwise.
#[must_use]
pub fn layout_mode(tree: &DomTree, node: NodeId) -> LayoutMode {
    if tree.as_text(node).is_some() {
        return LayoutMode::Inline;
    }
    let children = tree.children(node);
    let has_block_child = children
        .iter()
        .filter_map(|&child| tree.tag_name(child))
        .any(|tag| BLOCK_ELEMENTS.contains(&tag));
    if has_block_child || children.is_empty() {
        LayoutMode::Block
    } else {
        LayoutMode::Inline
    }
}
