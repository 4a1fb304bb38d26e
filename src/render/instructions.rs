use super::{bold, regular, Context};
use crate::colour::colours;
use crate::document::Document;
use crate::layout::PageFlowState;
use crate::pagesize::A4;
use crate::sanitize::sanitize;
use crate::units::Pt;
use crate::variant::Variant;

/// General instructions, the exam notes and (for teachers) the cognitive
/// level legend, drawn from the top of the flow's current page.
pub(super) fn draw(ctx: &Context<'_>, document: &mut Document, flow: &mut PageFlowState) {
    let labels = ctx.labels;

    flow.line(
        document,
        labels.general_instructions,
        Pt(50.0),
        bold(14.0),
        colours::DEEP_BLUE,
    );
    flow.advance(Pt(30.0));

    let variant_lines = match ctx.variant.variant {
        Variant::Teacher => labels.teacher_instructions,
        _ => labels.student_instructions,
    };
    for line in labels.base_instructions.iter().chain(variant_lines.iter()) {
        flow.line(document, *line, Pt(60.0), regular(10.0), colours::BLACK);
        flow.advance(Pt(20.0));
    }

    let width = A4.0 - Pt(120.0);
    for note in ctx.metadata.note_lines() {
        flow.wrap(document, &sanitize(note), Pt(60.0), regular(10.0), colours::BLACK, width);
        flow.advance(Pt(8.0));
    }

    if ctx.flags.cognitive_legend {
        flow.advance(Pt(30.0));
        flow.line(document, labels.legend_heading, Pt(50.0), bold(11.0), colours::BLACK);
        flow.advance(Pt(20.0));
        for line in labels.legend {
            flow.line(document, line, Pt(60.0), regular(9.0), colours::BLACK);
            flow.advance(Pt(15.0));
        }
    }
}
