//! Layout box types and block layout.
//!
//! [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)

use std::fmt::Write as _;

use serde::{Serialize, Serializer};
use strum_macros::{Display, EnumString};
use wren_dom::{DomTree, NodeId};

use super::inline::InlineState;
use super::layout_mode;
use super::metrics::{FontKey, FontMetrics};

/// How a block arranges what is inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// [§ 9.4.1 Block formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#block-formatting)
    ///
    /// "In a block formatting context, boxes are laid out one after the
    /// other, vertically, beginning at the top of a containing block."
    Block,
    /// [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
    ///
    /// "In an inline formatting context, boxes are laid out horizontally,
    /// one after the other, beginning at the top of a containing block."
    Inline,
}

/// A single word placed on a line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    /// The word, without surrounding whitespace.
    pub word: String,
    /// The face and point size it was measured with.
    pub font: FontKey,
    /// Whether the word sits inside `<sup>`.
    pub superscript: bool,
}

/// The kind of a [`LayoutBox`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BoxType {
    /// The outermost box. Has exactly one `Block` child.
    Document,
    /// A box for one document node. Holds blocks or lines, never both.
    Block {
        /// Block or inline content.
        mode: LayoutMode,
    },
    /// One line of an inline block. Holds only text runs.
    Line,
    /// A word.
    Text(TextRun),
}

impl BoxType {
    /// The word of a text run.
    #[must_use]
    pub fn word(&self) -> Option<&str> {
        match self {
            BoxType::Text(run) => Some(&run.word),
            _ => None,
        }
    }
}

/// A node of the geometry tree. All coordinates are absolute pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutBox {
    /// Kind and kind-specific payload.
    #[serde(flatten)]
    pub box_type: BoxType,
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
    /// Child boxes in paint order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<LayoutBox>,
    /// The document node this box was generated for. Lines point at the
    /// block's node, text runs at their text node.
    #[serde(serialize_with = "serialize_node_id")]
    pub node: NodeId,
}

fn serialize_node_id<S: Serializer>(node: &NodeId, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(node.0 as u64)
}

impl LayoutBox {
    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// This box and every box below it, in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &LayoutBox> + '_ {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.children.iter().rev());
            Some(next)
        })
    }

    /// All lines in the subtree, top to bottom.
    pub fn lines(&self) -> impl Iterator<Item = &LayoutBox> + '_ {
        self.iter().filter(|b| b.box_type == BoxType::Line)
    }

    /// All text runs in the subtree, in reading order.
    pub fn text_runs(&self) -> impl Iterator<Item = (&LayoutBox, &TextRun)> + '_ {
        self.iter().filter_map(|b| match &b.box_type {
            BoxType::Text(run) => Some((b, run)),
            _ => None,
        })
    }

    /// Print the geometry tree, one box per line, for debugging.
    pub fn dump(&self, depth: usize) {
        print!("{}", self.dump_to_string(depth));
    }

    /// The text [`LayoutBox::dump`] prints.
    #[must_use]
    pub fn dump_to_string(&self, depth: usize) -> String {
        let mut out = String::new();
        self.write_dump(depth, &mut out);
        out
    }

    fn write_dump(&self, depth: usize, out: &mut String) {
        let mut pending = vec![(self, depth)];
        while let Some((layout_box, depth)) = pending.pop() {
            let indent = "  ".repeat(depth);
            let label = match &layout_box.box_type {
                BoxType::Document => "Document".to_string(),
                BoxType::Block { mode } => format!("Block({mode})"),
                BoxType::Line => "Line".to_string(),
                BoxType::Text(run) => format!("Text({:?})", run.word),
            };
            let _ = writeln!(
                out,
                "{indent}{label} x={} y={} w={} h={}",
                layout_box.x, layout_box.y, layout_box.width, layout_box.height
            );
            pending.extend(layout_box.children.iter().rev().map(|child| (child, depth + 1)));
        }
    }
}

impl Drop for LayoutBox {
    /// Frees the subtree without recursing, so deeply nested documents
    /// cannot exhaust the stack.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut child) = pending.pop() {
            pending.append(&mut child.children);
        }
    }
}

/// Inputs shared by every box of one layout pass.
pub(crate) struct LayoutContext<'a> {
    pub(crate) tree: &'a DomTree,
    pub(crate) metrics: &'a dyn FontMetrics,
    pub(crate) v_step: f32,
}

/// A block whose children are still being laid out.
struct OpenBlock {
    node: NodeId,
    mode: LayoutMode,
    y: f32,
    height: f32,
    children: Vec<LayoutBox>,
    /// Index of the next document child to lay out.
    next: usize,
}

impl OpenBlock {
    /// The next document child of a block-mode box, if any remain.
    fn next_child(&mut self, tree: &DomTree) -> Option<NodeId> {
        if self.mode != LayoutMode::Block {
            return None;
        }
        let child = tree.children(self.node).get(self.next).copied()?;
        self.next += 1;
        Some(child)
    }

    /// Stack a finished child below the ones already placed.
    fn adopt(&mut self, child: LayoutBox) {
        self.height += child.height;
        self.children.push(child);
    }

    fn into_box(self, x: f32, width: f32) -> LayoutBox {
        LayoutBox {
            box_type: BoxType::Block { mode: self.mode },
            x,
            y: self.y,
            width,
            height: self.height,
            children: self.children,
            node: self.node,
        }
    }
}

impl LayoutContext<'_> {
    /// Lay out the box for `node` with its top-left corner at (`x`, `y`).
    ///
    /// Block children are stacked: each starts where the previous one
    /// ended, and the block is exactly as tall as all of them together.
    /// Inline content is handed to an [`InlineState`].
    ///
    /// Open blocks are kept on an explicit stack rather than the call
    /// stack, so nesting depth is bounded only by memory.
    pub(crate) fn layout_block(&self, node: NodeId, x: f32, y: f32, width: f32) -> LayoutBox {
        let mut current = self.open_block(node, x, y, width);
        let mut ancestors: Vec<OpenBlock> = Vec::new();

        loop {
            if let Some(child) = current.next_child(self.tree) {
                let child_block = self.open_block(child, x, current.y + current.height, width);
                ancestors.push(std::mem::replace(&mut current, child_block));
                continue;
            }

            match ancestors.pop() {
                Some(parent) => {
                    let finished = std::mem::replace(&mut current, parent);
                    current.adopt(finished.into_box(x, width));
                }
                None => return current.into_box(x, width),
            }
        }
    }

    /// Start the box for `node`. Inline content is laid out in full right
    /// away; block content is filled in by [`Self::layout_block`].
    fn open_block(&self, node: NodeId, x: f32, y: f32, width: f32) -> OpenBlock {
        let mode = layout_mode(self.tree, node);
        let (children, height) = match mode {
            LayoutMode::Block => (Vec::with_capacity(self.tree.children(node).len()), 0.0),
            LayoutMode::Inline => {
                let mut state = InlineState::new(node, x, y, width);
                state.walk(self, node);
                state.flush();
                let height = state.cursor_y;
                (state.into_lines(), height)
            }
        };

        OpenBlock {
            node,
            mode,
            y,
            height,
            children,
            next: 0,
        }
    }
}
