use super::{bold, regular, Context};
use crate::analytics::{distribution, marks_by_section, total_marks, Distribution, Tag};
use crate::colour::colours;
use crate::document::Document;
use crate::layout::PageFlowState;
use crate::model::{CognitiveLevel, Difficulty};
use crate::page::{PageContents, RectLayout};
use crate::rect::Rect;
use crate::units::Pt;

const BAR_X: Pt = Pt(330.0);
const BAR_WIDTH: Pt = Pt(200.0);
const BAR_HEIGHT: Pt = Pt(8.0);

/// The analytics narrative: cognitive and difficulty distributions with
/// proportional bars, totals and marks per section
pub(super) fn draw(ctx: &Context<'_>, document: &mut Document, flow: &mut PageFlowState) {
    let labels = ctx.labels;
    flow.new_page(document);
    flow.line(document, labels.report_title, Pt(50.0), bold(16.0), colours::DEEP_BLUE);
    flow.advance(Pt(30.0));

    flow.line(
        document,
        labels.cognitive_distribution,
        Pt(50.0),
        bold(12.0),
        colours::BLACK,
    );
    flow.advance(Pt(20.0));
    let cognitive = distribution::<CognitiveLevel>(ctx.questions);
    draw_distribution(ctx, document, flow, &cognitive, |level| {
        labels.cognitive_name(level)
    });
    flow.advance(Pt(20.0));

    flow.line(
        document,
        labels.difficulty_distribution,
        Pt(50.0),
        bold(12.0),
        colours::BLACK,
    );
    flow.advance(Pt(20.0));
    let difficulty = distribution::<Difficulty>(ctx.questions);
    draw_distribution(ctx, document, flow, &difficulty, |d| {
        labels.difficulty_name(d)
    });
    flow.advance(Pt(20.0));

    let totals = format!(
        "{}: {} | {}: {}",
        labels.total_questions,
        ctx.questions.len(),
        labels.total_marks,
        total_marks(ctx.questions)
    );
    flow.line(document, totals, Pt(50.0), bold(11.0), colours::BLACK);
    flow.advance(Pt(25.0));

    let marks = marks_by_section(&ctx.sections);
    if !marks.is_empty() {
        flow.line(document, labels.marks_distribution, Pt(50.0), bold(12.0), colours::BLACK);
        flow.advance(Pt(20.0));
        for (label, marks) in marks {
            flow.line(
                document,
                labels.section_marks(&label, marks),
                Pt(70.0),
                regular(10.0),
                colours::BLACK,
            );
            flow.advance(Pt(15.0));
        }
    }
}

fn draw_distribution<T: Tag>(
    ctx: &Context<'_>,
    document: &mut Document,
    flow: &mut PageFlowState,
    distribution: &Distribution<T>,
    name: impl Fn(T) -> &'static str,
) {
    for share in distribution.iter() {
        let line = ctx.labels.tag_line(name(share.tag), share.count, share.percent);
        flow.line(document, line, Pt(70.0), regular(10.0), colours::BLACK);

        let y = flow.cursor_y() - Pt(1.0);
        flow.draw(
            document,
            PageContents::Rect(RectLayout {
                rect: Rect::from_origin(BAR_X, y, BAR_WIDTH, BAR_HEIGHT),
                fill: None,
                stroke: Some((colours::FAINT, Pt(0.5))),
                opacity: None,
            }),
        );
        if share.count > 0 {
            flow.draw(
                document,
                PageContents::Rect(RectLayout {
                    rect: Rect::from_origin(
                        BAR_X,
                        y,
                        BAR_WIDTH * (share.percent / 100.0),
                        BAR_HEIGHT,
                    ),
                    fill: Some(colours::BAR_FILL),
                    stroke: None,
                    opacity: None,
                }),
            );
        }
        flow.advance(Pt(15.0));
    }
}
