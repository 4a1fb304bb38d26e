//! Text layout and page flow.
//!
//! [`wrap_lines`] / [`wrap_text`] implement greedy word wrapping measured with
//! the document's [`FontMetrics`](crate::FontMetrics); [`PageFlowState`] owns
//! the current page and vertical cursor and starts new pages when content
//! would run past the bottom margin.

mod flow;
mod margins;
mod text;

pub use flow::*;
pub use margins::*;
pub use text::*;
