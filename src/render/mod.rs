//! Document assembly.
//!
//! A render call walks a fixed sequence of stages, each appending pages
//! through one shared [`PageFlowState`]:
//!
//! `cover → [instructions] → body → [summary] → stamp`
//!
//! The body is the question pages for student and teacher papers, the
//! detailed answer key, or the analytics report. Which stages run and what
//! they show is decided once, up front, by [`resolve_visibility`].

mod cover;
mod instructions;
mod questions;
mod report;
mod stamp;
mod summary;

use crate::document::Document;
use crate::font::{FontRole, FontSet};
use crate::info::Info;
use crate::labels::Labels;
use crate::layout::PageFlowState;
use crate::model::{ExamMetadata, Question};
use crate::options::RenderOptions;
use crate::page::SpanFont;
use crate::sections::{group_by_section, Sections};
use crate::units::Pt;
use crate::variant::{resolve_visibility, DocumentVariant, Variant, VisibilityFlags};
use crate::RenderError;
use chrono::{DateTime, FixedOffset};
use tracing::info;

/// Author recorded in every generated document's info dictionary
pub const AUTHOR: &str = "A4AI Test Generator";

/// Renders exam papers. A renderer holds only configuration, so one can be
/// shared between threads and used for any number of calls.
#[derive(Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
    fonts: FontSet,
    created_at: Option<DateTime<FixedOffset>>,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Renderer {
        Renderer {
            options,
            ..Renderer::default()
        }
    }

    /// Draw with `fonts` instead of the standard PDF fonts
    pub fn with_fonts(mut self, fonts: FontSet) -> Renderer {
        self.fonts = fonts;
        self
    }

    /// Record a creation date in the document info. Without one, rendering
    /// the same input twice gives identical bytes.
    pub fn created_at(mut self, date: DateTime<FixedOffset>) -> Renderer {
        self.created_at = Some(date);
        self
    }

    /// Lay out the whole document without serializing it
    pub fn assemble(
        &self,
        questions: &[Question],
        metadata: &ExamMetadata,
        variant: DocumentVariant,
    ) -> Result<Document, RenderError> {
        info!(
            %variant,
            questions = questions.len(),
            subject = %metadata.subject,
            "rendering exam document"
        );

        let labels = self.options.labels(&self.fonts);
        let ctx = Context::new(questions, metadata, variant, &self.options, labels);
        let mut document = Document::new(self.fonts.clone());
        document.set_info(self.info(metadata, variant));

        let mut flow = PageFlowState::start(&mut document);
        cover::draw(&ctx, &mut document, &flow);

        if ctx.flags.instructions {
            flow.new_page(&mut document);
            instructions::draw(&ctx, &mut document, &mut flow);
        }
        if ctx.flags.questions {
            questions::draw_questions(&ctx, &mut document, &mut flow);
        }
        if ctx.flags.answer_key {
            questions::draw_answer_key(&ctx, &mut document, &mut flow);
        }
        if ctx.flags.report {
            report::draw(&ctx, &mut document, &mut flow);
        }
        if ctx.flags.summary {
            summary::draw(&ctx, &mut document, &mut flow);
        }
        stamp::stamp_pages(&ctx, &mut document);

        info!(%variant, pages = document.page_count(), "exam document assembled");
        Ok(document)
    }

    /// Lay out and serialize the document as PDF bytes
    pub fn render(
        &self,
        questions: &[Question],
        metadata: &ExamMetadata,
        variant: DocumentVariant,
    ) -> Result<Vec<u8>, RenderError> {
        self.assemble(questions, metadata, variant)?.to_bytes()
    }

    fn info(&self, metadata: &ExamMetadata, variant: DocumentVariant) -> Info {
        let subject = metadata.subject.as_str();
        let (title, mut keywords) = match variant.variant {
            Variant::Student => ("Student Test Paper", vec!["student", "test paper"]),
            Variant::Teacher => ("Teacher Copy", vec!["teacher", "solutions", "answer key"]),
            Variant::AnswerKey => ("Answer Key", vec!["answer key"]),
            Variant::CognitiveReport => ("Cognitive Analysis Report", vec!["cognitive", "analysis"]),
        };
        if variant.modifiers.bilingual {
            keywords.push("bilingual");
        }
        if variant.modifiers.compact {
            keywords.push("compact");
        }
        keywords.push(subject);

        let mut info = Info::new();
        info.title(format!("{subject} - {title}"))
            .author(AUTHOR)
            .subject(format!(
                "Class {} {} {}",
                metadata.class_level, metadata.board, subject
            ))
            .keywords(&keywords);
        if let Some(date) = self.created_at {
            info.creation_date(date);
        }
        info
    }
}

/// Render `questions` as the variant named by `variant` (for example
/// `"teacher"` or `"student+bilingual"`) with the standard PDF fonts
pub fn render(
    questions: &[Question],
    metadata: &ExamMetadata,
    variant: &str,
    options: &RenderOptions,
) -> Result<Vec<u8>, RenderError> {
    let variant: DocumentVariant = variant.parse()?;
    Renderer::new(options.clone()).render(questions, metadata, variant)
}

/// Like [render], taking the question list, metadata and options as the JSON
/// the question bank produces
pub fn render_json(
    questions: &str,
    metadata: &str,
    variant: &str,
    options: &str,
) -> Result<Vec<u8>, RenderError> {
    let options = RenderOptions::from_json(options)?;
    let variant: DocumentVariant = variant.parse()?;
    let questions: Vec<Question> =
        serde_json::from_str(questions).map_err(RenderError::InvalidInput)?;
    let metadata: ExamMetadata =
        serde_json::from_str(metadata).map_err(RenderError::InvalidInput)?;
    Renderer::new(options).render(&questions, &metadata, variant)
}

/// Font sizes and gaps for the question pages, after the font-size option
/// and compact mode are applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Typography {
    scale: f32,
    spacing: f32,
}

impl Typography {
    fn new(flags: &VisibilityFlags) -> Typography {
        Typography {
            scale: flags.font_scale.factor(),
            spacing: flags.spacing(),
        }
    }

    pub fn regular(&self, size: f32) -> SpanFont {
        regular(size * self.scale)
    }

    pub fn bold(&self, size: f32) -> SpanFont {
        bold(size * self.scale)
    }

    /// A vertical gap, shrunk in compact mode
    pub fn gap(&self, gap: f32) -> Pt {
        Pt(gap * self.spacing)
    }
}

pub(crate) fn regular(size: f32) -> SpanFont {
    SpanFont {
        role: FontRole::Regular,
        size: Pt(size),
    }
}

pub(crate) fn bold(size: f32) -> SpanFont {
    SpanFont {
        role: FontRole::Bold,
        size: Pt(size),
    }
}

pub(crate) fn serif(size: f32) -> SpanFont {
    SpanFont {
        role: FontRole::Serif,
        size: Pt(size),
    }
}

/// Everything the stages share during one render call
pub(crate) struct Context<'a> {
    pub variant: DocumentVariant,
    pub flags: VisibilityFlags,
    pub labels: &'static Labels,
    pub typography: Typography,
    pub metadata: &'a ExamMetadata,
    pub questions: &'a [Question],
    pub sections: Sections<'a>,
}

impl<'a> Context<'a> {
    fn new(
        questions: &'a [Question],
        metadata: &'a ExamMetadata,
        variant: DocumentVariant,
        options: &RenderOptions,
        labels: &'static Labels,
    ) -> Context<'a> {
        let flags = resolve_visibility(variant, options);
        Context {
            variant,
            typography: Typography::new(&flags),
            flags,
            labels,
            metadata,
            questions,
            sections: group_by_section(questions),
        }
    }
}
