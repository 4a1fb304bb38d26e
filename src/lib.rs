//! Renders exam question sets as paginated A4 PDF documents.
//!
//! One question list can be rendered as a student paper, a teacher paper
//! with solutions, a standalone answer key or a cognitive analytics report,
//! with bilingual and compact modifiers layered on student and teacher
//! papers:
//!
//! ```no_run
//! use assessment_pdf::{render, ExamMetadata, Question, RenderOptions};
//!
//! let questions: Vec<Question> = serde_json::from_str(r#"[
//!     {"id": "q1", "text": "State Newton's first law.", "marks": 2}
//! ]"#).unwrap();
//! let metadata = ExamMetadata::new("Physics", "10", "CBSE");
//! let pdf = render(&questions, &metadata, "teacher", &RenderOptions::default()).unwrap();
//! std::fs::write("physics-teacher.pdf", pdf).unwrap();
//! ```

mod analytics;
pub use analytics::*;

mod colour;
pub use colour::*;

pub(crate) mod content;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod info;
pub use info::*;

mod labels;
pub use labels::*;

/// Utility functions and structures to layout text on pages and flow it
/// across page breaks
pub mod layout;

mod model;
pub use model::*;

mod options;
pub use options::*;

mod page;
pub use page::*;

mod pagesize;
pub use pagesize::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod render;
pub use render::{render, render_json, Renderer, AUTHOR};

mod sanitize;
pub use sanitize::*;

mod sections;
pub use sections::*;

mod units;
pub use units::*;

mod variant;
pub use variant::*;

/// Re-export PDF-writer, mostly so [Rect]s can be converted into its types
pub use pdf_writer;
