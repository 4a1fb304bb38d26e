use super::{bold, regular, Context};
use crate::colour::colours;
use crate::document::Document;
use crate::layout::PageFlowState;
use crate::units::Pt;

/// One line per question with just its answer, on a fresh page. Flows onto
/// further pages for long papers and is never left blank.
pub(super) fn draw(ctx: &Context<'_>, document: &mut Document, flow: &mut PageFlowState) {
    let labels = ctx.labels;
    flow.new_page(document);
    flow.line(
        document,
        labels.answer_key_summary,
        Pt(50.0),
        bold(16.0),
        colours::DEEP_BLUE,
    );
    flow.advance(Pt(30.0));

    if ctx.sections.is_empty() {
        flow.line(document, labels.answer_missing, Pt(70.0), regular(10.0), colours::MUTED);
        flow.advance(Pt(15.0));
        return;
    }

    let low_water = flow.bottom() + Pt(30.0);
    for section in ctx.sections.iter() {
        flow.ensure_room(document, low_water);
        flow.line(
            document,
            labels.section_title(&section.label),
            Pt(50.0),
            bold(12.0),
            colours::BLACK,
        );
        flow.advance(Pt(20.0));

        for (number, question) in section.numbered() {
            let answer = question
                .answer_text()
                .unwrap_or_else(|| labels.answer_missing.to_string());
            flow.wrap(
                document,
                &format!("{} {answer}", labels.question_number(number)),
                Pt(70.0),
                regular(10.0),
                colours::BLACK,
                Pt(465.0),
            );
            flow.advance(Pt(3.0));
        }
        flow.advance(Pt(10.0));
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{CorrectAnswer, ExamMetadata, Question};
    use crate::render::Renderer;
    use crate::variant::Variant;

    #[test]
    fn summary_follows_the_question_pages() {
        let questions: Vec<Question> = (1..=3)
            .map(|i| Question {
                text: format!("question {i}"),
                answer: (i != 2).then(|| CorrectAnswer::Text(format!("answer {i}"))),
                ..Question::default()
            })
            .collect();
        let document = Renderer::default()
            .assemble(
                &questions,
                &ExamMetadata::new("Maths", "8", "ICSE"),
                Variant::Teacher.into(),
            )
            .unwrap();
        let last = document.page(document.page_count() - 1).unwrap().text();
        assert!(last.starts_with(
            "Answer Key Summary\nSection A:\nQ1. answer 1\nQ2. No answer provided\nQ3. answer 3"
        ));
    }

    #[test]
    fn summary_is_never_blank() {
        let document = Renderer::default()
            .assemble(
                &[],
                &ExamMetadata::new("Maths", "8", "ICSE"),
                Variant::AnswerKey.into(),
            )
            .unwrap();
        let last = document.page(document.page_count() - 1).unwrap().text();
        assert!(last.contains("Answer Key Summary\nNo answer provided"));
    }
}
