//! Document variants and the visibility rules they imply.

use crate::options::{FontScale, RenderOptions};
use crate::RenderError;
use std::fmt;
use std::str::FromStr;

/// The kind of document being produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Student,
    Teacher,
    AnswerKey,
    CognitiveReport,
}

impl Variant {
    pub fn name(self) -> &'static str {
        match self {
            Variant::Student => "student",
            Variant::Teacher => "teacher",
            Variant::AnswerKey => "answer-key",
            Variant::CognitiveReport => "cognitive-report",
        }
    }

    /// Whether the bilingual and compact modifiers can be layered on top
    pub fn accepts_modifiers(self) -> bool {
        matches!(self, Variant::Student | Variant::Teacher)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A presentation layer on top of a student or teacher paper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Bilingual,
    Compact,
}

impl Modifier {
    pub fn name(self) -> &'static str {
        match self {
            Modifier::Bilingual => "bilingual",
            Modifier::Compact => "compact",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub bilingual: bool,
    pub compact: bool,
}

/// A base variant plus its modifiers, e.g. `teacher+compact`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentVariant {
    pub variant: Variant,
    pub modifiers: Modifiers,
}

impl DocumentVariant {
    pub fn new(variant: Variant) -> DocumentVariant {
        DocumentVariant {
            variant,
            modifiers: Modifiers::default(),
        }
    }

    pub fn bilingual(mut self) -> Result<DocumentVariant, RenderError> {
        self.apply(Modifier::Bilingual)?;
        Ok(self)
    }

    pub fn compact(mut self) -> Result<DocumentVariant, RenderError> {
        self.apply(Modifier::Compact)?;
        Ok(self)
    }

    fn apply(&mut self, modifier: Modifier) -> Result<(), RenderError> {
        if !self.variant.accepts_modifiers() {
            return Err(RenderError::UnsupportedModifier {
                modifier: modifier.name(),
                variant: self.variant.name(),
            });
        }
        match modifier {
            Modifier::Bilingual => self.modifiers.bilingual = true,
            Modifier::Compact => self.modifiers.compact = true,
        }
        Ok(())
    }
}

impl From<Variant> for DocumentVariant {
    fn from(variant: Variant) -> Self {
        DocumentVariant::new(variant)
    }
}

impl FromStr for DocumentVariant {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        let mut parts = normalized.split('+').map(str::trim);
        let base = parts.next().unwrap_or_default();

        let mut variant = match base {
            "student" => DocumentVariant::new(Variant::Student),
            "teacher" => DocumentVariant::new(Variant::Teacher),
            "answer-key" | "answerkey" => DocumentVariant::new(Variant::AnswerKey),
            "cognitive-report" | "cognitive" | "report" => {
                DocumentVariant::new(Variant::CognitiveReport)
            }
            // bare modifiers pick the base they have always been used with
            "bilingual" => DocumentVariant::new(Variant::Student).bilingual()?,
            "compact" | "compact-review" => DocumentVariant::new(Variant::Teacher).compact()?,
            _ => return Err(RenderError::UnknownVariant(s.to_string())),
        };

        for modifier in parts {
            variant = match modifier {
                "bilingual" => variant.bilingual()?,
                "compact" => variant.compact()?,
                _ => return Err(RenderError::UnknownVariant(s.to_string())),
            };
        }
        Ok(variant)
    }
}

impl fmt::Display for DocumentVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.variant)?;
        if self.modifiers.bilingual {
            f.write_str("+bilingual")?;
        }
        if self.modifiers.compact {
            f.write_str("+compact")?;
        }
        Ok(())
    }
}

/// Everything the assembler needs to know about what to show, resolved once
/// per render call.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityFlags {
    pub instructions: bool,
    /// Render the per-question pages (stems and options)
    pub questions: bool,
    pub solutions: bool,
    pub answers: bool,
    pub cognitive: bool,
    pub difficulty: bool,
    pub topics: bool,
    /// Ruled lines under free-response questions
    pub answer_space: bool,
    pub cognitive_legend: bool,
    pub answer_key: bool,
    pub summary: bool,
    pub report: bool,
    pub marks_distribution: bool,
    pub translations: bool,
    pub compact: bool,
    pub font_scale: FontScale,
    pub watermark: Option<String>,
    pub placeholder_box: bool,
}

impl VisibilityFlags {
    /// Multiplier applied to vertical gaps between blocks
    pub fn spacing(&self) -> f32 {
        if self.compact {
            0.6
        } else {
            1.0
        }
    }
}

/// Resolve the visibility rules for a variant with the caller's options
pub fn resolve_visibility(variant: DocumentVariant, options: &RenderOptions) -> VisibilityFlags {
    let compact = variant.modifiers.compact || options.compact_mode();
    let font_scale = if compact {
        options.font_size().min(FontScale::Small)
    } else {
        options.font_size()
    };

    let base = VisibilityFlags {
        instructions: false,
        questions: false,
        solutions: false,
        answers: false,
        cognitive: false,
        difficulty: false,
        topics: false,
        answer_space: false,
        cognitive_legend: false,
        answer_key: false,
        summary: false,
        report: false,
        marks_distribution: options.show_marks_distribution(),
        translations: variant.modifiers.bilingual,
        compact,
        font_scale,
        watermark: options.watermark_text().map(str::to_string),
        placeholder_box: options.include_qr_placeholder(),
    };

    match variant.variant {
        Variant::Student => VisibilityFlags {
            instructions: options.include_instructions(),
            questions: true,
            difficulty: options.show_difficulty_badges == Some(true),
            answer_space: true,
            ..base
        },
        Variant::Teacher => VisibilityFlags {
            instructions: options.include_instructions(),
            questions: true,
            solutions: true,
            answers: true,
            cognitive: options.include_cognitive_level(),
            difficulty: options.show_difficulty_badges(),
            topics: options.show_topic_tags(),
            cognitive_legend: options.include_cognitive_level(),
            summary: true,
            ..base
        },
        Variant::AnswerKey => VisibilityFlags {
            solutions: true,
            answers: true,
            answer_key: true,
            summary: true,
            ..base
        },
        Variant::CognitiveReport => VisibilityFlags {
            report: true,
            ..base
        },
    }
}
