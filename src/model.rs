//! The exam content a render call consumes.
//!
//! Records deserialize from the camelCase JSON the question bank produces.
//! Question fields are lenient: an unknown difficulty or cognitive level
//! falls back to the documented default, and a null or mistyped content
//! field reads as absent, instead of rejecting the whole paper.

use crate::sanitize::sanitize;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Section label used for questions that do not name one
pub const DEFAULT_SECTION: &str = "A";
/// Time limit printed on the cover when the exam does not set one
pub const DEFAULT_TIME_LIMIT: &str = "3 hours";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamMetadata {
    pub subject: String,
    #[serde(alias = "classNum", alias = "class")]
    pub class_level: String,
    pub board: String,
    #[serde(default)]
    pub institute: Option<String>,
    #[serde(default)]
    pub exam_title: Option<String>,
    #[serde(default)]
    pub exam_date: Option<String>,
    #[serde(default)]
    pub teacher_name: Option<String>,
    #[serde(default)]
    pub time_limit: Option<String>,
    /// Free text; the first three lines are appended to the instructions
    #[serde(default)]
    pub notes: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl ExamMetadata {
    pub fn new<S: Into<String>>(subject: S, class_level: S, board: S) -> ExamMetadata {
        ExamMetadata {
            subject: subject.into(),
            class_level: class_level.into(),
            board: board.into(),
            ..ExamMetadata::default()
        }
    }

    pub fn title(&self) -> String {
        present(&self.exam_title)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} Examination", self.subject))
    }

    pub fn time_limit(&self) -> &str {
        present(&self.time_limit).unwrap_or(DEFAULT_TIME_LIMIT)
    }

    pub fn institute(&self) -> Option<&str> {
        present(&self.institute)
    }

    pub fn exam_date(&self) -> Option<&str> {
        present(&self.exam_date)
    }

    pub fn teacher_name(&self) -> Option<&str> {
        present(&self.teacher_name)
    }

    /// At most three non-empty lines of the exam notes
    pub fn note_lines(&self) -> Vec<&str> {
        self.notes
            .as_deref()
            .unwrap_or_default()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .take(3)
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", rename_all = "kebab-case")]
pub enum QuestionType {
    MultipleChoice,
    #[default]
    FreeResponse,
}

impl From<Option<String>> for QuestionType {
    fn from(value: Option<String>) -> Self {
        let normalised: String = value
            .unwrap_or_default()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalised.as_str() {
            "mcq" | "multiplechoice" => QuestionType::MultipleChoice,
            _ => QuestionType::FreeResponse,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Option<String>", rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl From<Option<String>> for Difficulty {
    fn from(value: Option<String>) -> Self {
        match value.unwrap_or_default().trim().to_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Option<String>", rename_all = "lowercase")]
pub enum CognitiveLevel {
    Recall,
    #[default]
    Understand,
    Apply,
    Analyze,
}

impl From<Option<String>> for CognitiveLevel {
    fn from(value: Option<String>) -> Self {
        match value.unwrap_or_default().trim().to_lowercase().as_str() {
            "recall" | "remember" => CognitiveLevel::Recall,
            "apply" => CognitiveLevel::Apply,
            "analyze" | "analyse" => CognitiveLevel::Analyze,
            _ => CognitiveLevel::Understand,
        }
    }
}

impl fmt::Display for CognitiveLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CognitiveLevel::Recall => "recall",
            CognitiveLevel::Understand => "understand",
            CognitiveLevel::Apply => "apply",
            CognitiveLevel::Analyze => "analyze",
        })
    }
}

/// The correct answer, either spelled out or as a position in the options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    Index(usize),
    Text(String),
}

/// Field deserializers that never fail on a malformed value
mod lenient {
    use super::CorrectAnswer;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn scalar_text(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(optional_text(d)?.unwrap_or_default())
    }

    pub fn optional_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(Option::<Value>::deserialize(d)?.and_then(scalar_text))
    }

    /// Non-array values read as no options; non-text items are skipped
    pub fn options<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::Array(items)) => items.into_iter().filter_map(scalar_text).collect(),
            _ => Vec::new(),
        })
    }

    /// Negative or non-numeric marks read as unset
    pub fn marks<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::Number(n)) => n
                .as_f64()
                .filter(|m| m.is_finite() && *m >= 0.0)
                .map(|m| m.round() as u32),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        })
    }

    /// Non-negative integers are option indices, strings are spelled-out
    /// answers, anything else is no answer
    pub fn answer<'de, D: Deserializer<'de>>(d: D) -> Result<Option<CorrectAnswer>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|i| usize::try_from(i).ok())
                .map(CorrectAnswer::Index),
            Some(Value::String(s)) => Some(CorrectAnswer::Text(s)),
            _ => None,
        })
    }
}

/// Secondary-language rendering of a question, used by bilingual papers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    #[serde(default, alias = "stem", deserialize_with = "lenient::optional_text")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient::options")]
    pub options: Vec<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub solution: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(default, alias = "stem", deserialize_with = "lenient::text")]
    pub text: String,
    #[serde(default, rename = "type")]
    pub kind: QuestionType,
    #[serde(default, deserialize_with = "lenient::options")]
    pub options: Vec<String>,
    #[serde(default, alias = "correctAnswer", deserialize_with = "lenient::answer")]
    pub answer: Option<CorrectAnswer>,
    #[serde(default, alias = "explanation", deserialize_with = "lenient::optional_text")]
    pub solution: Option<String>,
    #[serde(default, deserialize_with = "lenient::marks")]
    pub marks: Option<u32>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub section: Option<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub cognitive: CognitiveLevel,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub topic: Option<String>,
    #[serde(default)]
    pub translation: Option<Translation>,
}

/// Letter used to label the option at `index`: `A`, `B`, ... `Z`, then `27`, `28`, ...
pub fn option_label(index: usize) -> String {
    if index < 26 {
        char::from(b'A' + index as u8).to_string()
    } else {
        (index + 1).to_string()
    }
}

impl Question {
    pub fn is_multiple_choice(&self) -> bool {
        self.kind == QuestionType::MultipleChoice
    }

    /// Marks awarded, 1 when the question does not say
    pub fn marks(&self) -> u32 {
        self.marks.unwrap_or(1)
    }

    pub fn section(&self) -> &str {
        self.section
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SECTION)
    }

    /// Sanitized solution text, if there is any
    pub fn solution_text(&self) -> Option<String> {
        self.solution
            .as_deref()
            .map(sanitize)
            .filter(|s| !s.is_empty())
    }

    /// Sanitized answer text. Index answers resolve to `"{letter}. {option}"`;
    /// an index past the end of the options, or a blank answer, gives `None`.
    pub fn answer_text(&self) -> Option<String> {
        match self.answer.as_ref()? {
            CorrectAnswer::Text(text) => Some(sanitize(text)).filter(|s| !s.is_empty()),
            CorrectAnswer::Index(index) => self
                .options
                .get(*index)
                .map(|option| format!("{}. {}", option_label(*index), sanitize(option))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_defaults() {
        let q: Question = serde_json::from_str(r#"{"id": "q1", "text": "What is 2+2?"}"#).unwrap();
        assert_eq!(q.kind, QuestionType::FreeResponse);
        assert_eq!(q.marks(), 1);
        assert_eq!(q.section(), "A");
        assert_eq!(q.difficulty, Difficulty::Medium);
        assert_eq!(q.cognitive, CognitiveLevel::Understand);
        assert!(q.answer_text().is_none());
    }

    #[test]
    fn accepts_question_bank_aliases() {
        let q: Question = serde_json::from_str(
            r#"{
                "stem": "Pick one",
                "type": "MCQ",
                "options": ["3", "4"],
                "answer": 1,
                "marks": 2,
                "section": "B",
                "difficulty": "HARD",
                "cognitive": "apply"
            }"#,
        )
        .unwrap();
        assert!(q.is_multiple_choice());
        assert_eq!(q.text, "Pick one");
        assert_eq!(q.answer_text().as_deref(), Some("B. 4"));
        assert_eq!(q.marks(), 2);
        assert_eq!(q.difficulty, Difficulty::Hard);
        assert_eq!(q.cognitive, CognitiveLevel::Apply);
    }

    #[test]
    fn unknown_or_null_tags_fall_back() {
        let q: Question = serde_json::from_str(
            r#"{"text": "x", "difficulty": "brutal", "cognitive": null, "type": "multiple-choice"}"#,
        )
        .unwrap();
        assert_eq!(q.difficulty, Difficulty::Medium);
        assert_eq!(q.cognitive, CognitiveLevel::Understand);
        assert!(q.is_multiple_choice());
    }

    #[test]
    fn malformed_content_fields_read_as_absent() {
        let q: Question = serde_json::from_str(
            r#"{"text": null, "options": null, "answer": -1, "solution": 42,
                "marks": "3", "section": ["B"], "topic": {}}"#,
        )
        .unwrap();
        assert_eq!(q.text, "");
        assert!(q.options.is_empty());
        assert!(q.answer.is_none());
        assert_eq!(q.solution.as_deref(), Some("42"));
        assert_eq!(q.marks, Some(3));
        assert_eq!(q.section(), "A");
        assert!(q.topic.is_none());

        let q: Question = serde_json::from_str(
            r#"{"type": "mcq", "options": ["x", 7, null], "answer": 1.5, "marks": -2}"#,
        )
        .unwrap();
        assert_eq!(q.options, vec!["x", "7"]);
        assert!(q.answer_text().is_none());
        assert_eq!(q.marks(), 1);
    }

    #[test]
    fn zero_marks_are_kept() {
        let q = Question {
            marks: Some(0),
            ..Question::default()
        };
        assert_eq!(q.marks(), 0);
    }

    #[test]
    fn blank_section_is_the_default_section() {
        let q = Question {
            section: Some("  ".into()),
            ..Question::default()
        };
        assert_eq!(q.section(), "A");
    }

    #[test]
    fn answers_are_sanitized() {
        let q = Question {
            answer: Some(CorrectAnswer::Text(" √2 ".into())),
            ..Question::default()
        };
        assert_eq!(q.answer_text().as_deref(), Some("sqrt2"));

        let out_of_range = Question {
            answer: Some(CorrectAnswer::Index(4)),
            options: vec!["a".into()],
            ..Question::default()
        };
        assert!(out_of_range.answer_text().is_none());
    }

    #[test]
    fn option_labels() {
        assert_eq!(option_label(0), "A");
        assert_eq!(option_label(3), "D");
        assert_eq!(option_label(25), "Z");
        assert_eq!(option_label(26), "27");
    }

    #[test]
    fn metadata_defaults() {
        let meta: ExamMetadata = serde_json::from_str(
            r#"{"subject": "Physics", "classNum": "10", "board": "CBSE", "notes": "a\n\nb\nc\nd"}"#,
        )
        .unwrap();
        assert_eq!(meta.class_level, "10");
        assert_eq!(meta.title(), "Physics Examination");
        assert_eq!(meta.time_limit(), "3 hours");
        assert_eq!(meta.note_lines(), vec!["a", "b", "c"]);
        assert!(meta.institute().is_none());
    }
}
