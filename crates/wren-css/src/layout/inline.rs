//! Inline layout and line breaking.
//!
//! [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
//!
//! "In an inline formatting context, boxes are laid out horizontally, one
//! after the other, beginning at the top of a containing block."
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! An inline block walks its whole subtree once. Words are measured and
//! appended to a pending line; when the next word would overflow, the
//! pending line is flushed: a shared baseline is chosen, every word gets
//! its final position, and a `Line` box is emitted.

use serde::Serialize;
use strum_macros::{Display, EnumString};
use wren_dom::{DomTree, NodeId};

use super::layout_box::{BoxType, LayoutBox, LayoutContext, TextRun};
use super::metrics::{FontKey, FontSlant, FontWeight, LineMetrics};
use crate::values::{DEFAULT_FONT_SIZE_PX, font_size_px};

/// Points per CSS pixel.
const PX_TO_PT: f32 = 0.75;

/// Leading applied above the tallest ascent and below the deepest descent.
const LEADING: f32 = 1.25;

/// Superscripts are scaled down by this factor...
const SUPERSCRIPT_SCALE: f32 = 0.6;

/// ...but never below this many points.
const MIN_SUPERSCRIPT_SIZE: u32 = 8;

/// [§ 16.2 Alignment: the 'text-align' property](https://www.w3.org/TR/CSS2/text.html#alignment-prop)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// "Inline-level content is aligned to the line left edge."
    #[default]
    Left,
    /// "Inline-level content is centered within the line box."
    Center,
}

/// A measured word waiting for its line to be flushed.
#[derive(Debug, Clone)]
struct PendingWord {
    /// Offset from the left edge of the block.
    rel_x: f32,
    run: TextRun,
    width: f32,
    metrics: LineMetrics,
    node: NodeId,
}

/// A step of the document-order walk over an inline block.
#[derive(Debug, Clone, Copy)]
enum Visit<'a> {
    Enter(NodeId),
    Leave(&'a str),
}

/// Everything an inline block tracks while walking its subtree.
///
/// Cursors are relative to the block's top-left corner; the boxes produced
/// by [`InlineState::flush`] carry absolute coordinates.
#[derive(Debug, Clone)]
pub struct InlineState {
    /// The node of the block being laid out.
    block: NodeId,
    origin_x: f32,
    origin_y: f32,
    width: f32,

    /// Where the next word starts on the current line.
    pub cursor_x: f32,
    /// Top of the current line.
    pub cursor_y: f32,
    /// Alignment applied at the next flush.
    pub align: TextAlign,
    /// Inside `<sup>`.
    pub superscript: bool,
    /// Inside `<h1 class="title">`.
    pub in_title: bool,

    line: Vec<PendingWord>,
    lines: Vec<LayoutBox>,
}

impl InlineState {
    /// Start an empty line at the top-left of a block.
    #[must_use]
    pub fn new(block: NodeId, x: f32, y: f32, width: f32) -> Self {
        Self {
            block,
            origin_x: x,
            origin_y: y,
            width,
            cursor_x: 0.0,
            cursor_y: 0.0,
            align: TextAlign::Left,
            superscript: false,
            in_title: false,
            line: Vec::new(),
            lines: Vec::new(),
        }
    }

    /// The lines flushed so far.
    #[must_use]
    pub fn into_lines(self) -> Vec<LayoutBox> {
        self.lines
    }

    /// Walk `node` and its descendants in document order, opening each
    /// element before its children and closing it after them.
    pub(crate) fn walk(&mut self, ctx: &LayoutContext<'_>, node: NodeId) {
        let mut pending = vec![Visit::Enter(node)];
        while let Some(visit) = pending.pop() {
            let node = match visit {
                Visit::Enter(node) => node,
                Visit::Leave(tag) => {
                    self.close_tag(ctx, tag);
                    continue;
                }
            };

            if let Some(text) = ctx.tree.as_text(node) {
                for word in text.split_whitespace() {
                    self.word(ctx, node, word);
                }
                continue;
            }

            let Some(element) = ctx.tree.as_element(node) else {
                continue;
            };
            let tag = element.tag_name.as_str();
            self.open_tag(tag, element.attr("class") == Some("title"));

            pending.push(Visit::Leave(tag));
            pending.extend(ctx.tree.children(node).iter().rev().map(|&child| Visit::Enter(child)));
        }
    }

    fn open_tag(&mut self, tag: &str, is_title: bool) {
        match tag {
            "h1" if is_title => {
                self.align = TextAlign::Center;
                self.in_title = true;
                self.flush();
            }
            "sup" => self.superscript = true,
            "br" => self.flush(),
            _ => {}
        }
    }

    fn close_tag(&mut self, ctx: &LayoutContext<'_>, tag: &str) {
        match tag {
            "h1" if self.in_title => {
                self.flush();
                self.align = TextAlign::Left;
                self.in_title = false;
                self.cursor_y += ctx.v_step;
            }
            "sup" => self.superscript = false,
            "p" => {
                self.flush();
                self.cursor_y += ctx.v_step;
            }
            _ => {}
        }
    }

    /// Measure a word and append it to the current line, flushing first if
    /// it would not fit.
    ///
    /// A word wider than the block still goes on a line of its own.
    fn word(&mut self, ctx: &LayoutContext<'_>, node: NodeId, word: &str) {
        let font = self.font_for(ctx.tree, node);
        let width = ctx.metrics.measure_width(word, &font);

        if self.cursor_x + width > self.width {
            self.flush();
        }

        self.line.push(PendingWord {
            rel_x: self.cursor_x,
            run: TextRun {
                word: word.to_string(),
                font,
                superscript: self.superscript,
            },
            width,
            metrics: ctx.metrics.line_metrics(&font),
            node,
        });
        self.cursor_x += width + ctx.metrics.measure_width(" ", &font);
    }

    /// The font a word of `node` is set in, given the current state.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn font_for(&self, tree: &DomTree, node: NodeId) -> FontKey {
        let px = tree
            .style_value(node, "font-size")
            .map_or(DEFAULT_FONT_SIZE_PX, font_size_px);
        // Truncation toward zero; saturating casts keep junk sizes at 0.
        let mut size = (px * PX_TO_PT) as u32;
        if self.superscript {
            size = MIN_SUPERSCRIPT_SIZE.max((size as f32 * SUPERSCRIPT_SCALE) as u32);
        }

        let weight = tree
            .style_value(node, "font-weight")
            .map_or(FontWeight::Normal, FontWeight::from_css);
        let slant = tree
            .style_value(node, "font-style")
            .map_or(FontSlant::Roman, FontSlant::from_css);

        FontKey::new(size, weight, slant)
    }

    /// Close the current line.
    ///
    /// STEP 1: The baseline sits 1.25 times the tallest ascent below the
    /// line top. Only normal words count; a line of superscripts alone uses
    /// theirs.
    ///
    /// STEP 2: A centered line is shifted right by half the unused width.
    ///
    /// STEP 3: A normal word hangs from the baseline by its own ascent. A
    /// superscript's top is aligned with the top of the tallest normal word.
    ///
    /// STEP 4: The next line starts 1.25 times the deepest descent below
    /// the baseline.
    pub fn flush(&mut self) {
        let (Some(first), Some(last)) = (self.line.first(), self.line.last()) else {
            return;
        };

        // STEP 1
        let max_normal_ascent = self
            .line
            .iter()
            .filter(|w| !w.run.superscript)
            .map(|w| w.metrics.ascent)
            .reduce(f32::max);
        let max_ascent = max_normal_ascent.unwrap_or_else(|| {
            self.line
                .iter()
                .map(|w| w.metrics.ascent)
                .fold(0.0, f32::max)
        });
        let baseline = self.cursor_y + LEADING * max_ascent;
        let max_descent = self
            .line
            .iter()
            .map(|w| w.metrics.descent)
            .fold(0.0, f32::max);

        // STEP 2
        let offset = match self.align {
            TextAlign::Left => 0.0,
            TextAlign::Center => {
                let line_width = last.rel_x + last.width - first.rel_x;
                (self.width - line_width) / 2.0
            }
        };

        // STEP 3
        let mut runs = Vec::with_capacity(self.line.len());
        for pending in self.line.drain(..) {
            let top = match max_normal_ascent {
                Some(normal_ascent) if pending.run.superscript => baseline - normal_ascent,
                _ => baseline - pending.metrics.ascent,
            };
            runs.push(LayoutBox {
                x: self.origin_x + offset + pending.rel_x,
                y: self.origin_y + top,
                width: pending.width,
                height: pending.metrics.line_height,
                children: Vec::new(),
                node: pending.node,
                box_type: BoxType::Text(pending.run),
            });
        }

        // STEP 4
        let line_top = self.cursor_y;
        self.cursor_y = baseline + LEADING * max_descent;
        self.cursor_x = 0.0;

        log::trace!(
            target: "wren::layout",
            "line of {} words at y={}",
            runs.len(),
            self.origin_y + line_top
        );

        self.lines.push(LayoutBox {
            box_type: BoxType::Line,
            x: self.origin_x,
            y: self.origin_y + line_top,
            width: self.width,
            height: self.cursor_y - line_top,
            children: runs,
            node: self.block,
        });
    }
}
