//! Grouping questions into labelled sections with stable local numbering.

use crate::model::Question;
use crate::sanitize::sanitize;

/// One labelled section and its questions, in input order
#[derive(Debug, Clone, PartialEq)]
pub struct Section<'q> {
    pub label: String,
    pub questions: Vec<&'q Question>,
}

impl<'q> Section<'q> {
    /// Questions paired with their local `Q{n}` number, starting at 1
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &'q Question)> + '_ {
        self.questions.iter().enumerate().map(|(i, &q)| (i + 1, q))
    }

    pub fn total_marks(&self) -> u64 {
        self.questions.iter().map(|q| u64::from(q.marks())).sum()
    }
}

/// Sections ordered by the first appearance of their label
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sections<'q> {
    sections: Vec<Section<'q>>,
}

impl<'q> Sections<'q> {
    pub fn iter(&self) -> std::slice::Iter<'_, Section<'q>> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<&Section<'q>> {
        self.sections.iter().find(|s| s.label == label)
    }

    pub fn total_marks(&self) -> u64 {
        self.sections.iter().map(Section::total_marks).sum()
    }
}

impl<'a, 'q> IntoIterator for &'a Sections<'q> {
    type Item = &'a Section<'q>;
    type IntoIter = std::slice::Iter<'a, Section<'q>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

/// Buckets `questions` by their sanitized section label (`"A"` when unset)
/// in a single pass. Labels keep the order they were first seen in and questions keep
/// their input order inside a bucket, so every page that numbers questions
/// agrees on the numbers.
pub fn group_by_section(questions: &[Question]) -> Sections<'_> {
    let mut sections: Vec<Section<'_>> = Vec::new();
    for question in questions {
        let label = sanitize(question.section());
        match sections.iter_mut().find(|s| s.label == label) {
            Some(section) => section.questions.push(question),
            None => sections.push(Section {
                label,
                questions: vec![question],
            }),
        }
    }
    Sections { sections }
}
