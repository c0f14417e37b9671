//! Display List - a sequence of drawing commands
//!
//! [CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html)
//!
//! Commands are stored back to front: an element's background is always
//! listed before the text inside it.

use core::fmt;

use serde::Serialize;

use crate::layout::FontKey;

/// A single drawing command.
///
/// [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command")]
pub enum DisplayCommand {
    /// Fill a rectangle with a solid color.
    ///
    /// Used for backgrounds.
    FillRect {
        /// X coordinate of the rectangle's top-left corner.
        x: f32,
        /// Y coordinate of the rectangle's top-left corner.
        y: f32,
        /// Width of the rectangle in pixels.
        width: f32,
        /// Height of the rectangle in pixels.
        height: f32,
        /// Fill color, as written in the style sheet.
        color: String,
    },

    /// Draw a word with its top-left corner at a position.
    DrawText {
        /// X coordinate of the text's left edge.
        x: f32,
        /// Y coordinate of the text's top edge.
        y: f32,
        /// The word to draw.
        text: String,
        /// Face and point size.
        font: FontKey,
        /// Text color, as written in the style sheet.
        color: String,
        /// Line height of `font`; the text is drawn within `y..y + line_height`.
        line_height: f32,
    },
}

impl DisplayCommand {
    /// Top of the area the command draws into.
    #[must_use]
    pub fn top(&self) -> f32 {
        match self {
            DisplayCommand::FillRect { y, .. } | DisplayCommand::DrawText { y, .. } => *y,
        }
    }

    /// Bottom of the area the command draws into.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        match self {
            DisplayCommand::FillRect { y, height, .. } => y + height,
            DisplayCommand::DrawText { y, line_height, .. } => y + line_height,
        }
    }

    /// Whether any part of the command falls inside the vertical window
    /// `scroll..=scroll + height`.
    #[must_use]
    pub fn intersects(&self, scroll: f32, height: f32) -> bool {
        !(self.top() > scroll + height || self.bottom() < scroll)
    }
}

impl fmt::Display for DisplayCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayCommand::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => write!(f, "FillRect({x}, {y}, {width}x{height}, {color})"),
            DisplayCommand::DrawText {
                x,
                y,
                text,
                font,
                color,
                ..
            } => write!(
                f,
                "DrawText({x}, {y}, {text:?}, {}pt {} {}, {color})",
                font.size, font.weight, font.slant
            ),
        }
    }
}

/// A list of display commands in painting order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DisplayList {
    commands: Vec<DisplayCommand>,
}

impl DisplayList {
    /// Create an empty display list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Add a command to the end of the list.
    pub fn push(&mut self, command: DisplayCommand) {
        self.commands.push(command);
    }

    /// Get all commands in painting order.
    #[must_use]
    pub fn commands(&self) -> &[DisplayCommand] {
        &self.commands
    }

    /// Number of commands.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the list has no commands.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterate over the commands in painting order.
    pub fn iter(&self) -> std::slice::Iter<'_, DisplayCommand> {
        self.commands.iter()
    }

    /// The commands a viewer scrolled to `scroll` with a window `height`
    /// pixels tall has to draw. Commands entirely above or below the window
    /// are skipped.
    pub fn visible(&self, scroll: f32, height: f32) -> impl Iterator<Item = &DisplayCommand> + '_ {
        self.commands
            .iter()
            .filter(move |command| command.intersects(scroll, height))
    }
}

impl<'a> IntoIterator for &'a DisplayList {
    type Item = &'a DisplayCommand;
    type IntoIter = std::slice::Iter<'a, DisplayCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}
