//! Painter - generates display list from layout tree
//!
//! [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
//!
//! The painter walks the layout tree and generates drawing commands in the
//! correct painting order (back to front).

use wren_dom::DomTree;

use crate::layout::{BoxType, LayoutBox};
use crate::values::is_transparent;

use super::{DisplayCommand, DisplayList};

/// Text color when a node has none resolved.
const DEFAULT_COLOR: &str = "black";

/// Painter that generates a display list from a layout tree.
///
/// Colors are read from the resolved styles stored on the tree the
/// geometry was built from.
pub struct Painter<'a> {
    tree: &'a DomTree,
}

impl<'a> Painter<'a> {
    /// Create a new painter over a styled tree.
    #[must_use]
    pub fn new(tree: &'a DomTree) -> Self {
        Self { tree }
    }

    /// Paint a layout tree and return the display list.
    ///
    /// A box's own commands always come before its children's.
    #[must_use]
    pub fn paint(&self, layout: &LayoutBox) -> DisplayList {
        let mut display_list = DisplayList::new();
        for layout_box in layout.iter() {
            self.paint_box(layout_box, &mut display_list);
        }
        log::debug!(
            target: "wren::paint",
            "painted {} commands",
            display_list.len()
        );
        display_list
    }

    /// [CSS 2.1 Appendix E.2](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
    ///
    /// 1. Background color
    /// 2. Descendants, in tree order
    ///
    /// Only the box itself is painted here; [`Self::paint`] visits the
    /// descendants in pre-order.
    fn paint_box(&self, layout_box: &LayoutBox, display_list: &mut DisplayList) {
        match &layout_box.box_type {
            BoxType::Block { .. } => {
                let background = self.tree.style_value(layout_box.node, "background-color");
                if let Some(color) = background
                    && !is_transparent(background)
                {
                    display_list.push(DisplayCommand::FillRect {
                        x: layout_box.x,
                        y: layout_box.y,
                        width: layout_box.width,
                        height: layout_box.height,
                        color: color.to_string(),
                    });
                }
            }
            BoxType::Text(run) => {
                let color = self
                    .tree
                    .style_value(layout_box.node, "color")
                    .unwrap_or(DEFAULT_COLOR);
                display_list.push(DisplayCommand::DrawText {
                    x: layout_box.x,
                    y: layout_box.y,
                    text: run.word.clone(),
                    font: run.font,
                    color: color.to_string(),
                    line_height: layout_box.height,
                });
            }
            BoxType::Document | BoxType::Line => {}
        }
    }
}
