use super::{bold, regular, serif, Context};
use crate::colour::colours;
use crate::document::Document;
use crate::layout::{centered_x, wrap_text, PageFlowState};
use crate::page::RectLayout;
use crate::rect::Rect;
use crate::sanitize::sanitize;
use crate::units::Pt;
use crate::variant::Variant;
use crate::FontMetrics;

const BADGE_MIN_WIDTH: Pt = Pt(120.0);

/// Draws the cover on the flow's current page. The cover is laid out at
/// fixed positions and never spills onto another page.
pub(super) fn draw(ctx: &Context<'_>, document: &mut Document, flow: &PageFlowState) {
    let labels = ctx.labels;
    let metadata = ctx.metadata;
    let (page, fonts) = document.page_and_fonts(flow.page());
    let (width, height) = (page.width(), page.height());

    page.add_rect(RectLayout {
        rect: Rect::from_origin(Pt(30.0), Pt(30.0), width - Pt(60.0), height - Pt(60.0)),
        fill: None,
        stroke: Some((colours::NAVY, Pt(2.0))),
        opacity: None,
    });

    let mut y = height - Pt(100.0);

    if let Some(institute) = metadata.institute() {
        let text = sanitize(institute).to_uppercase();
        let font = bold(16.0);
        let x = centered_x(fonts, &text, font, width);
        page.draw_text(text, font, colours::NAVY, x, y);
        y -= Pt(40.0);
    }

    let title = sanitize(&metadata.title());
    let font = serif(14.0);
    let x = centered_x(fonts, &title, font, width);
    page.draw_text(title, font, colours::BLACK, x, y);
    y -= Pt(60.0);

    let class_line = labels.class_line(
        &sanitize(&metadata.class_level),
        &sanitize(&metadata.subject),
        &sanitize(&metadata.board),
    );
    let font = regular(12.0);
    let x = centered_x(fonts, &class_line, font, width);
    page.draw_text(class_line, font, colours::BLACK, x, y);
    y -= Pt(30.0);

    let badge = labels.badge(ctx.variant);
    let font = bold(12.0);
    let badge_width =
        (fonts.width_of(&badge, font.role, font.size) + Pt(20.0)).max(BADGE_MIN_WIDTH);
    page.add_rect(RectLayout {
        rect: Rect::from_origin(
            (width - badge_width) / 2.0,
            y - Pt(10.0),
            badge_width,
            Pt(30.0),
        ),
        fill: Some(match ctx.variant.variant {
            Variant::Student => colours::STUDENT_BADGE,
            _ => colours::TEACHER_BADGE,
        }),
        stroke: Some((colours::BADGE_BORDER, Pt(1.0))),
        opacity: None,
    });
    let x = centered_x(fonts, &badge, font, width);
    page.draw_text(badge, font, colours::NAVY, x, y);
    y -= Pt(60.0);

    if ctx.flags.marks_distribution && !ctx.sections.is_empty() {
        let font = bold(11.0);
        page.draw_text(labels.marks_distribution, font, colours::BLACK, Pt(50.0), y);
        y -= Pt(18.0);

        let breakdown = ctx
            .sections
            .iter()
            .map(|s| labels.section_marks(&s.label, s.total_marks()))
            .collect::<Vec<_>>()
            .join(" | ");
        wrap_text(
            page,
            fonts,
            &breakdown,
            Pt(60.0),
            y,
            regular(10.0),
            colours::SLATE,
            width - Pt(120.0),
        );
    }

    if let Some(line) = labels.date_line(
        metadata.exam_date().map(sanitize).as_deref(),
        metadata.teacher_name().map(sanitize).as_deref(),
    ) {
        page.draw_text(line, regular(10.0), colours::MUTED, Pt(50.0), Pt(120.0));
    }

    let marks_line =
        labels.marks_line(ctx.sections.total_marks(), &sanitize(metadata.time_limit()));
    let font = bold(11.0);
    let x = centered_x(fonts, &marks_line, font, width);
    page.draw_text(marks_line, font, colours::BLACK, x, Pt(90.0));
}
