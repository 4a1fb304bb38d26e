use super::{regular, Context};
use crate::colour::colours;
use crate::document::Document;
use crate::font::FontMetrics;
use crate::page::{RectLayout, SpanLayout};
use crate::rect::Rect;
use crate::sanitize::sanitize;
use crate::units::Pt;

const WATERMARK_OPACITY: f32 = 0.3;
/// Page numbers end this far from the right page edge, clear of the box
const PAGE_NUMBER_INSET: Pt = Pt(60.0);

/// Final pass over every page once the page count is known: page numbers,
/// the watermark label and the placeholder box
pub(super) fn stamp_pages(ctx: &Context<'_>, document: &mut Document) {
    let total = document.page_count();
    let flags = &ctx.flags;
    let draw_box = flags.watermark.is_some() || flags.placeholder_box;
    let font = regular(8.0);
    let numbers: Vec<(String, Pt)> = (1..=total)
        .map(|i| {
            let label = ctx.labels.page_of(i, total);
            let label_width = document.fonts().width_of(&label, font.role, font.size);
            (label, label_width)
        })
        .collect();

    for (page, (label, label_width)) in document.pages_mut().zip(numbers) {
        let width = page.width();
        let x = width - PAGE_NUMBER_INSET - label_width;
        page.draw_text(label, font, colours::MUTED, x, Pt(30.0));

        if let Some(watermark) = &flags.watermark {
            page.add_span(SpanLayout {
                text: sanitize(watermark),
                font: regular(8.0),
                colour: colours::FAINT,
                coords: (width - Pt(150.0), Pt(15.0)),
                opacity: Some(WATERMARK_OPACITY),
            });
        }
        if draw_box {
            page.add_rect(RectLayout {
                rect: Rect::from_origin(width - Pt(50.0), Pt(10.0), Pt(40.0), Pt(40.0)),
                fill: None,
                stroke: Some((colours::FAINT, Pt(1.0))),
                opacity: Some(WATERMARK_OPACITY),
            });
        }
    }
}
