//! Painting
//!
//! [CSS 2.1 Appendix E - Elaborate description of Stacking Contexts](https://www.w3.org/TR/CSS2/zindex.html)
//!
//! Converts a geometry tree into a display list of drawing commands. The
//! display list can then be executed by any backend.
//!
//! ```text
//! Style → Layout → Paint → Draw
//!                    ↓
//!              DisplayList
//! ```

mod display_list;
mod painter;

pub use display_list::{DisplayCommand, DisplayList};
pub use painter::Painter;
