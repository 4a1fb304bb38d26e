use super::{bold, regular, Context};
use crate::colour::{colours, Colour};
use crate::document::Document;
use crate::layout::{line_advance, PageFlowState};
use crate::model::{option_label, Question};
use crate::page::{LineLayout, PageContents, SpanFont};
use crate::sanitize::sanitize;
use crate::units::Pt;
use tracing::{debug, warn};

const STEM_X: Pt = Pt(60.0);
const OPTION_X: Pt = Pt(70.0);
const TRANSLATED_OPTION_X: Pt = Pt(82.0);
const TEXT_WIDTH: Pt = Pt(500.0);
const OPTION_WIDTH: Pt = Pt(480.0);
const RULE_START: Pt = Pt(60.0);
const RULE_END: Pt = Pt(535.0);

/// Cursor position below which a question starts on a fresh page; teacher
/// questions need more room because the solution follows the stem
fn question_low_water(ctx: &Context<'_>, flow: &PageFlowState) -> Pt {
    let reserve = if ctx.flags.solutions { 140.0 } else { 90.0 };
    flow.bottom() + ctx.typography.gap(reserve)
}

fn section_step(ctx: &Context<'_>) -> Pt {
    ctx.typography.gap(25.0)
}

/// One page-flow of sections and their questions, starting on a fresh page
pub(super) fn draw_questions(ctx: &Context<'_>, document: &mut Document, flow: &mut PageFlowState) {
    flow.new_page(document);
    let question_low_water = question_low_water(ctx, flow);
    // a header never ends up alone at the bottom of a page
    let section_low_water = question_low_water + section_step(ctx);
    let heading_colour = if ctx.flags.solutions {
        colours::NAVY
    } else {
        colours::BLACK
    };
    let question_gap = ctx.typography.gap(if ctx.flags.solutions { 20.0 } else { 25.0 });

    for section in ctx.sections.iter() {
        debug!(section = %section.label, questions = section.questions.len(), "laying out section");
        flow.ensure_room(document, section_low_water);
        flow.line(
            document,
            ctx.labels.section_heading(&section.label),
            Pt(50.0),
            ctx.typography.bold(12.0),
            heading_colour,
        );
        flow.advance(section_step(ctx));

        for (number, question) in section.numbered() {
            flow.ensure_room(document, question_low_water);
            draw_question(ctx, document, flow, number, question);
            flow.advance(question_gap);
        }
    }
}

fn meta_line(ctx: &Context<'_>, number: usize, question: &Question) -> String {
    let labels = ctx.labels;
    let mut parts = vec![format!(
        "{} ({} {})",
        labels.question_number(number),
        question.marks(),
        labels.marks
    )];
    if ctx.flags.cognitive {
        parts.push(format!(
            "{}: {}",
            labels.cognitive,
            labels.cognitive_name(question.cognitive)
        ));
    }
    if ctx.flags.difficulty {
        parts.push(format!(
            "{}: {}",
            labels.difficulty,
            labels.difficulty_name(question.difficulty)
        ));
    }
    if ctx.flags.topics {
        if let Some(topic) = question.topic.as_deref().map(sanitize).filter(|t| !t.is_empty()) {
            parts.push(format!("{}: {topic}", labels.topic));
        }
    }
    parts.join(" | ")
}

/// Wraps `text` from the cursor and leaves `gap` below the last line
#[allow(clippy::too_many_arguments)]
fn block(
    document: &mut Document,
    flow: &mut PageFlowState,
    text: &str,
    x: Pt,
    font: SpanFont,
    colour: Colour,
    max_width: Pt,
    gap: Pt,
) {
    flow.wrap(document, text, x, font, colour, max_width);
    flow.advance(gap);
}

fn translation_of(ctx: &Context<'_>, text: Option<&String>) -> Option<String> {
    if !ctx.flags.translations {
        return None;
    }
    text.map(|t| sanitize(t)).filter(|t| !t.is_empty())
}

fn draw_question(
    ctx: &Context<'_>,
    document: &mut Document,
    flow: &mut PageFlowState,
    number: usize,
    question: &Question,
) {
    let t = &ctx.typography;
    let labels = ctx.labels;
    let translation = question.translation.as_ref();

    flow.line(
        document,
        meta_line(ctx, number, question),
        Pt(50.0),
        t.bold(10.0),
        colours::SLATE,
    );
    flow.advance(t.gap(20.0));

    let stem = sanitize(&question.text);
    if stem.is_empty() {
        warn!(question = %question.id, "question has no text");
    }
    flow.wrap(document, &stem, STEM_X, t.regular(10.0), colours::BLACK, TEXT_WIDTH);
    if let Some(text) = translation_of(ctx, translation.and_then(|tr| tr.text.as_ref())) {
        flow.wrap(document, &text, STEM_X, t.regular(10.0), colours::TRANSLATION, TEXT_WIDTH);
    }

    if question.is_multiple_choice() {
        draw_options(ctx, document, flow, question);
    }

    if ctx.flags.answer_space && !question.is_multiple_choice() {
        draw_answer_lines(ctx, document, flow, question);
    }

    if ctx.flags.solutions {
        flow.advance(t.gap(15.0));
        flow.line(
            document,
            labels.solution,
            Pt(50.0),
            t.bold(10.0),
            colours::SOLUTION_GREEN,
        );
        flow.advance(t.gap(15.0));

        let solution = question
            .solution_text()
            .unwrap_or_else(|| labels.solution_missing.to_string());
        flow.wrap(document, &solution, STEM_X, t.regular(9.0), colours::BLACK, TEXT_WIDTH);
        if let Some(text) = translation_of(ctx, translation.and_then(|tr| tr.solution.as_ref())) {
            flow.wrap(document, &text, STEM_X, t.regular(9.0), colours::TRANSLATION, TEXT_WIDTH);
        }
    }

    if ctx.flags.answers {
        if let Some(answer) = question.answer_text() {
            flow.advance(t.gap(10.0));
            block(
                document,
                flow,
                &labels.answer_line(&answer),
                STEM_X,
                t.bold(9.0),
                colours::ANSWER_RED,
                TEXT_WIDTH,
                t.gap(15.0) - line_advance(t.bold(9.0).size),
            );
        }
    }
}

fn draw_options(
    ctx: &Context<'_>,
    document: &mut Document,
    flow: &mut PageFlowState,
    question: &Question,
) {
    let t = &ctx.typography;
    let font = t.regular(9.0);
    let gap = t.gap(4.0);
    flow.advance(t.gap(10.0));

    if question.options.is_empty() {
        warn!(question = %question.id, "multiple-choice question has no options");
        block(
            document,
            flow,
            ctx.labels.options_missing,
            OPTION_X,
            font,
            colours::MUTED,
            OPTION_WIDTH,
            gap,
        );
        return;
    }

    let translated = question
        .translation
        .as_ref()
        .map(|tr| tr.options.as_slice())
        .unwrap_or_default();
    for (index, option) in question.options.iter().enumerate() {
        let text = format!("{}. {}", option_label(index), sanitize(option));
        match translation_of(ctx, translated.get(index)) {
            Some(translation) => {
                flow.wrap(document, &text, OPTION_X, font, colours::BLACK, OPTION_WIDTH);
                block(
                    document,
                    flow,
                    &translation,
                    TRANSLATED_OPTION_X,
                    font,
                    colours::TRANSLATION,
                    OPTION_WIDTH - Pt(12.0),
                    gap,
                );
            }
            None => block(
                document,
                flow,
                &text,
                OPTION_X,
                font,
                colours::BLACK,
                OPTION_WIDTH,
                gap,
            ),
        }
    }
}

/// Ruled lines a student writes the answer on, more for questions worth more
fn draw_answer_lines(
    ctx: &Context<'_>,
    document: &mut Document,
    flow: &mut PageFlowState,
    question: &Question,
) {
    let mut count = question.marks().clamp(2, 6);
    if ctx.flags.compact {
        count = (count + 1) / 2;
    }
    let pitch = ctx.typography.gap(20.0);

    for _ in 0..count {
        if flow.cursor_y() - pitch < flow.bottom() {
            flow.new_page(document);
        }
        flow.advance(pitch);
        let y = flow.cursor_y();
        flow.draw(
            document,
            PageContents::Line(LineLayout {
                from: (RULE_START, y),
                to: (RULE_END, y),
                colour: colours::RULE,
                width: Pt(0.5),
            }),
        );
    }
    flow.advance(ctx.typography.gap(10.0));
}

/// The answer-key body: every question's answer and solution, grouped by
/// section, without the question text
pub(super) fn draw_answer_key(ctx: &Context<'_>, document: &mut Document, flow: &mut PageFlowState) {
    let labels = ctx.labels;
    flow.new_page(document);
    flow.line(
        document,
        labels.detailed_answer_key,
        Pt(50.0),
        bold(16.0),
        colours::ANSWER_KEY_GREEN,
    );
    flow.advance(Pt(40.0));

    let low_water = flow.bottom() + Pt(40.0);
    for section in ctx.sections.iter() {
        debug!(section = %section.label, "laying out answer key section");
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
            let line = format!("{} {answer}", labels.question_number(number));
            block(
                document,
                flow,
                &line,
                OPTION_X,
                regular(10.0),
                colours::BLACK,
                Pt(465.0),
                Pt(3.0),
            );
            if let Some(solution) = question.solution_text() {
                block(
                    document,
                    flow,
                    &solution,
                    Pt(85.0),
                    regular(9.0),
                    colours::MUTED,
                    Pt(450.0),
                    Pt(4.0),
                );
            }
        }
        flow.advance(Pt(10.0));
    }
}
