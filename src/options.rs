//! Render configuration.
//!
//! Every flag is optional; unset flags take the documented default. A flag
//! set to a value the renderer cannot honour is a configuration error and
//! fails the whole render call.

use crate::font::FontSet;
use crate::labels::Labels;
use crate::RenderError;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Hindi,
}

/// Overall text size of the question pages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontScale {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontScale {
    pub fn factor(self) -> f32 {
        match self {
            FontScale::Small => 0.9,
            FontScale::Medium => 1.0,
            FontScale::Large => 1.2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    /// Default: on. Never shown on student papers.
    pub include_cognitive_level: Option<bool>,
    /// Default: on for teacher papers; student papers only show difficulty
    /// when this is explicitly set to `true`.
    pub show_difficulty_badges: Option<bool>,
    /// Default: off. Draws the machine-readable mark placeholder box on every page.
    #[serde(rename = "includeQRPlaceholder", alias = "includeQRCode")]
    pub include_qr_placeholder: Option<bool>,
    pub watermark_text: Option<String>,
    /// Default: on (teacher-side variants only)
    pub show_topic_tags: Option<bool>,
    /// Default: off
    pub compact_mode: Option<bool>,
    pub language: Option<Language>,
    pub font_size: Option<FontScale>,
    /// Default: on
    pub show_marks_distribution: Option<bool>,
    /// Default: on
    pub include_instructions: Option<bool>,
}

impl RenderOptions {
    /// Parse options from the JSON record the caller supplies
    pub fn from_json(json: &str) -> Result<RenderOptions, RenderError> {
        serde_json::from_str(json).map_err(RenderError::InvalidOptions)
    }

    pub fn include_cognitive_level(&self) -> bool {
        self.include_cognitive_level.unwrap_or(true)
    }

    pub fn show_difficulty_badges(&self) -> bool {
        self.show_difficulty_badges.unwrap_or(true)
    }

    pub fn include_qr_placeholder(&self) -> bool {
        self.include_qr_placeholder.unwrap_or(false)
    }

    /// The configured watermark, ignoring blank strings
    pub fn watermark_text(&self) -> Option<&str> {
        self.watermark_text
            .as_deref()
            .map(str::trim)
            .filter(|w| !w.is_empty())
    }

    pub fn show_topic_tags(&self) -> bool {
        self.show_topic_tags.unwrap_or(true)
    }

    pub fn compact_mode(&self) -> bool {
        self.compact_mode.unwrap_or(false)
    }

    pub fn language(&self) -> Language {
        self.language.unwrap_or_default()
    }

    pub fn font_size(&self) -> FontScale {
        self.font_size.unwrap_or_default()
    }

    pub fn show_marks_distribution(&self) -> bool {
        self.show_marks_distribution.unwrap_or(true)
    }

    pub fn include_instructions(&self) -> bool {
        self.include_instructions.unwrap_or(true)
    }

    /// Fixed wording for the chosen language. When `fonts` cannot draw every
    /// label of that language the English labels are used instead.
    pub fn labels(&self, fonts: &FontSet) -> &'static Labels {
        let language = self.language();
        let labels = Labels::for_language(language);
        if fonts.covers(&labels.coverage_sample()) {
            return labels;
        }
        warn!(?language, "fonts cannot draw the labels for this language, using English");
        Labels::for_language(Language::English)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_flags_use_defaults() {
        let options = RenderOptions::from_json("{}").unwrap();
        assert!(options.include_cognitive_level());
        assert!(options.show_difficulty_badges());
        assert!(!options.include_qr_placeholder());
        assert!(options.watermark_text().is_none());
        assert!(options.show_topic_tags());
        assert!(!options.compact_mode());
        assert_eq!(options.language(), Language::English);
        assert_eq!(options.font_size(), FontScale::Medium);
        assert!(options.show_marks_distribution());
        assert!(options.include_instructions());
    }

    #[test]
    fn reads_camel_case_flags() {
        let options = RenderOptions::from_json(
            r#"{
                "includeCognitiveLevel": false,
                "includeQRCode": true,
                "watermarkText": "  CONFIDENTIAL ",
                "fontSize": "large",
                "compactMode": true
            }"#,
        )
        .unwrap();
        assert!(!options.include_cognitive_level());
        assert!(options.include_qr_placeholder());
        assert_eq!(options.watermark_text(), Some("CONFIDENTIAL"));
        assert_eq!(options.font_size(), FontScale::Large);
        assert!(options.compact_mode());
    }

    #[test]
    fn unsupported_values_are_configuration_errors() {
        let err = RenderOptions::from_json(r#"{"fontSize": "huge"}"#).unwrap_err();
        assert!(err.is_configuration());
        let err = RenderOptions::from_json(r#"{"compactMode": "yes"}"#).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn hindi_labels_fall_back_to_english_with_standard_fonts() {
        let options = RenderOptions {
            language: Some(Language::Hindi),
            ..RenderOptions::default()
        };
        let labels = options.labels(&FontSet::standard());
        assert_eq!(labels.page_of(1, 2), "Page 1 of 2");
        let labels = RenderOptions::default().labels(&FontSet::standard());
        assert_eq!(labels.page_of(3, 4), "Page 3 of 4");
    }
}
