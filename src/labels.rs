//! Fixed wording printed on every document, per language.

use crate::model::{CognitiveLevel, Difficulty};
use crate::options::Language;
use crate::variant::{DocumentVariant, Variant};

/// Every fixed string a document can print. Question content is never
/// translated here; bilingual papers take their second language from the
/// questions themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub language: Language,
    pub general_instructions: &'static str,
    pub base_instructions: [&'static str; 4],
    pub teacher_instructions: [&'static str; 2],
    pub student_instructions: [&'static str; 2],
    pub legend_heading: &'static str,
    pub legend: [&'static str; 4],
    pub solution: &'static str,
    pub answer: &'static str,
    pub solution_missing: &'static str,
    pub answer_missing: &'static str,
    pub options_missing: &'static str,
    pub section_heading: &'static str,
    pub section: &'static str,
    pub question: &'static str,
    pub marks: &'static str,
    pub cognitive: &'static str,
    pub difficulty: &'static str,
    pub topic: &'static str,
    pub detailed_answer_key: &'static str,
    pub answer_key_summary: &'static str,
    pub report_title: &'static str,
    pub cognitive_distribution: &'static str,
    pub difficulty_distribution: &'static str,
    pub marks_distribution: &'static str,
    pub questions: &'static str,
    pub total_questions: &'static str,
    pub class: &'static str,
    pub subject: &'static str,
    pub board: &'static str,
    pub total_marks: &'static str,
    pub time: &'static str,
    pub date: &'static str,
    pub teacher: &'static str,
    badges: [&'static str; 4],
    bilingual_suffix: &'static str,
    compact_suffix: &'static str,
    cognitive_names: [&'static str; 4],
    difficulty_names: [&'static str; 3],
}

pub const ENGLISH: Labels = Labels {
    language: Language::English,
    general_instructions: "General Instructions",
    base_instructions: [
        "1. All questions are compulsory.",
        "2. Read each question carefully before attempting.",
        "3. Marks for each question are indicated against it.",
        "4. Maintain neat and clean presentation.",
    ],
    teacher_instructions: [
        "5. Solutions are provided for reference.",
        "6. Use professional judgment while evaluating answers.",
    ],
    student_instructions: [
        "5. Write your answers in the space provided.",
        "6. For MCQ questions, choose the correct option.",
    ],
    legend_heading: "Cognitive Level Legend:",
    legend: [
        "Recall: Remember facts and basic concepts",
        "Understand: Explain ideas and concepts",
        "Apply: Use knowledge in new situations",
        "Analyze: Draw connections among ideas",
    ],
    solution: "Solution:",
    answer: "Answer:",
    solution_missing: "Solution not provided",
    answer_missing: "No answer provided",
    options_missing: "Options not provided",
    section_heading: "SECTION",
    section: "Section",
    question: "Q",
    marks: "marks",
    cognitive: "Cognitive",
    difficulty: "Difficulty",
    topic: "Topic",
    detailed_answer_key: "Detailed Answer Key",
    answer_key_summary: "Answer Key Summary",
    report_title: "Cognitive Level Analysis Report",
    cognitive_distribution: "Cognitive Level Distribution:",
    difficulty_distribution: "Difficulty Distribution:",
    marks_distribution: "Marks Distribution:",
    questions: "questions",
    total_questions: "Total Questions",
    class: "Class",
    subject: "Subject",
    board: "Board",
    total_marks: "Total Marks",
    time: "Time",
    date: "Date",
    teacher: "Teacher",
    badges: ["STUDENT COPY", "TEACHER COPY", "ANSWER KEY", "COGNITIVE REPORT"],
    bilingual_suffix: " (BILINGUAL)",
    compact_suffix: " (COMPACT)",
    cognitive_names: ["recall", "understand", "apply", "analyze"],
    difficulty_names: ["easy", "medium", "hard"],
};

pub const HINDI: Labels = Labels {
    language: Language::Hindi,
    general_instructions: "सामान्य निर्देश",
    base_instructions: [
        "1. सभी प्रश्न अनिवार्य हैं।",
        "2. प्रत्येक प्रश्न को ध्यान से पढ़ें।",
        "3. प्रत्येक प्रश्न के अंक उसके सामने दिए गए हैं।",
        "4. उत्तर साफ़ और स्पष्ट लिखें।",
    ],
    teacher_instructions: [
        "5. संदर्भ के लिए हल दिए गए हैं।",
        "6. उत्तरों का मूल्यांकन करते समय विवेक का प्रयोग करें।",
    ],
    student_instructions: [
        "5. अपने उत्तर दिए गए स्थान में लिखें।",
        "6. बहुविकल्पीय प्रश्नों के लिए सही विकल्प चुनें।",
    ],
    legend_heading: "संज्ञानात्मक स्तर सूचक:",
    legend: [
        "स्मरण: तथ्यों और मूल अवधारणाओं को याद रखना",
        "बोध: विचारों और अवधारणाओं की व्याख्या",
        "अनुप्रयोग: नई परिस्थितियों में ज्ञान का उपयोग",
        "विश्लेषण: विचारों के बीच संबंध स्थापित करना",
    ],
    solution: "हल:",
    answer: "उत्तर:",
    solution_missing: "हल उपलब्ध नहीं",
    answer_missing: "कोई उत्तर नहीं दिया गया",
    options_missing: "विकल्प उपलब्ध नहीं",
    section_heading: "खंड",
    section: "खंड",
    question: "प्र",
    marks: "अंक",
    cognitive: "संज्ञानात्मक",
    difficulty: "कठिनाई",
    topic: "विषय-वस्तु",
    detailed_answer_key: "विस्तृत उत्तर कुंजी",
    answer_key_summary: "उत्तर कुंजी सारांश",
    report_title: "संज्ञानात्मक स्तर विश्लेषण रिपोर्ट",
    cognitive_distribution: "संज्ञानात्मक स्तर वितरण:",
    difficulty_distribution: "कठिनाई वितरण:",
    marks_distribution: "अंक वितरण:",
    questions: "प्रश्न",
    total_questions: "कुल प्रश्न",
    class: "कक्षा",
    subject: "विषय",
    board: "बोर्ड",
    total_marks: "कुल अंक",
    time: "समय",
    date: "दिनांक",
    teacher: "शिक्षक",
    badges: ["छात्र प्रति", "शिक्षक प्रति", "उत्तर कुंजी", "संज्ञानात्मक रिपोर्ट"],
    bilingual_suffix: " (द्विभाषी)",
    compact_suffix: " (संक्षिप्त)",
    cognitive_names: ["स्मरण", "बोध", "अनुप्रयोग", "विश्लेषण"],
    difficulty_names: ["सरल", "मध्यम", "कठिन"],
};

impl Labels {
    pub fn for_language(language: Language) -> &'static Labels {
        match language {
            Language::English => &ENGLISH,
            Language::Hindi => &HINDI,
        }
    }

    /// Text that exercises every script the labels are written in, used to
    /// check that a font set can draw them
    pub fn coverage_sample(&self) -> String {
        [
            self.general_instructions,
            self.solution,
            self.section_heading,
            self.marks,
            self.badges[0],
        ]
        .join(" ")
    }

    /// `Page {i} of {total}`, 1-based
    pub fn page_of(&self, index: usize, total: usize) -> String {
        match self.language {
            Language::English => format!("Page {index} of {total}"),
            Language::Hindi => format!("पृष्ठ {index} / {total}"),
        }
    }

    pub fn badge(&self, variant: DocumentVariant) -> String {
        let mut badge = self.badges[match variant.variant {
            Variant::Student => 0,
            Variant::Teacher => 1,
            Variant::AnswerKey => 2,
            Variant::CognitiveReport => 3,
        }]
        .to_string();
        if variant.modifiers.bilingual {
            badge.push_str(self.bilingual_suffix);
        }
        if variant.modifiers.compact {
            badge.push_str(self.compact_suffix);
        }
        badge
    }

    pub fn cognitive_name(&self, level: CognitiveLevel) -> &'static str {
        self.cognitive_names[match level {
            CognitiveLevel::Recall => 0,
            CognitiveLevel::Understand => 1,
            CognitiveLevel::Apply => 2,
            CognitiveLevel::Analyze => 3,
        }]
    }

    pub fn difficulty_name(&self, difficulty: Difficulty) -> &'static str {
        self.difficulty_names[match difficulty {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }]
    }

    pub fn section_heading(&self, label: &str) -> String {
        format!("{} {label}", self.section_heading)
    }

    /// `Section {label}:` as used on answer key and summary pages
    pub fn section_title(&self, label: &str) -> String {
        format!("{} {label}:", self.section)
    }

    /// `Section {label}: {marks} marks`
    pub fn section_marks(&self, label: &str, marks: u64) -> String {
        format!("{} {label}: {marks} {}", self.section, self.marks)
    }

    pub fn question_number(&self, number: usize) -> String {
        format!("{}{number}.", self.question)
    }

    pub fn answer_line(&self, answer: &str) -> String {
        format!("{} {answer}", self.answer)
    }

    pub fn class_line(&self, class_level: &str, subject: &str, board: &str) -> String {
        format!(
            "{}: {class_level} | {}: {subject} | {}: {board}",
            self.class, self.subject, self.board
        )
    }

    pub fn marks_line(&self, total: u64, time: &str) -> String {
        format!("{}: {total} | {}: {time}", self.total_marks, self.time)
    }

    /// `Date: … | Teacher: …` with whichever parts are present, or `None`
    pub fn date_line(&self, date: Option<&str>, teacher: Option<&str>) -> Option<String> {
        let parts: Vec<String> = [(self.date, date), (self.teacher, teacher)]
            .into_iter()
            .filter_map(|(label, value)| value.map(|v| format!("{label}: {v}")))
            .collect();
        (!parts.is_empty()).then(|| parts.join(" | "))
    }

    /// `{TAG}: {count} questions ({pct:.1}%)`
    pub fn tag_line(&self, tag: &str, count: usize, percent: f32) -> String {
        format!(
            "{}: {count} {} ({percent:.1}%)",
            tag.to_uppercase(),
            self.questions
        )
    }
}
