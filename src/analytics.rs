//! Tag distributions and marks totals for reports and cover pages.

use crate::model::{CognitiveLevel, Difficulty, Question};
use crate::sections::Sections;
use std::fmt;

/// A closed set of labels every question carries exactly one of
pub trait Tag: Copy + Eq + fmt::Display + 'static {
    /// Every tag, in the order reports list them
    const ALL: &'static [Self];

    fn of(question: &Question) -> Self;
}

impl Tag for CognitiveLevel {
    const ALL: &'static [Self] = &[
        CognitiveLevel::Recall,
        CognitiveLevel::Understand,
        CognitiveLevel::Apply,
        CognitiveLevel::Analyze,
    ];

    fn of(question: &Question) -> Self {
        question.cognitive
    }
}

impl Tag for Difficulty {
    const ALL: &'static [Self] = &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    fn of(question: &Question) -> Self {
        question.difficulty
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TagShare<T> {
    pub tag: T,
    pub count: usize,
    /// `100 * count / total`, or 0 when there are no questions
    pub percent: f32,
}

/// How questions are spread over the values of one tag
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution<T> {
    pub total: usize,
    pub shares: Vec<TagShare<T>>,
}

impl<T: Tag> Distribution<T> {
    pub fn share(&self, tag: T) -> Option<&TagShare<T>> {
        self.shares.iter().find(|s| s.tag == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TagShare<T>> {
        self.shares.iter()
    }
}

/// Counts every tag value over `questions`; every tag appears in the result,
/// including those with no questions.
pub fn distribution<T: Tag>(questions: &[Question]) -> Distribution<T> {
    let total = questions.len();
    let shares = T::ALL
        .iter()
        .map(|&tag| {
            let count = questions.iter().filter(|q| T::of(q) == tag).count();
            let percent = if total == 0 {
                0.0
            } else {
                100.0 * count as f32 / total as f32
            };
            TagShare { tag, count, percent }
        })
        .collect();
    Distribution { total, shares }
}

/// Marks per section label, in section order
pub fn marks_by_section(sections: &Sections<'_>) -> Vec<(String, u64)> {
    sections
        .iter()
        .map(|s| (s.label.clone(), s.total_marks()))
        .collect()
}

/// Sum of marks over all questions, counting unset marks as 1
pub fn total_marks(questions: &[Question]) -> u64 {
    questions.iter().map(|q| u64::from(q.marks())).sum()
}
