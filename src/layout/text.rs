use crate::colour::Colour;
use crate::font::FontMetrics;
use crate::page::*;
use crate::units::Pt;

/// Vertical distance between two wrapped lines of the same size
pub fn line_advance(size: Pt) -> Pt {
    size + Pt(2.0)
}

/// Breaks `text` into lines no wider than `max_width`, greedily packing
/// whole words.
///
/// Words are separated by any run of whitespace and re-joined with a single
/// space. A word is never split: one that is wider than `max_width` on its
/// own becomes a line by itself, so the function always terminates and never
/// drops text.
pub fn wrap_lines<M: FontMetrics + ?Sized>(
    metrics: &M,
    text: &str,
    font: SpanFont,
    max_width: Pt,
) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }

        let candidate = format!("{line} {word}");
        if metrics.width_of(&candidate, font.role, font.size) <= max_width {
            line = candidate;
        } else {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Wraps `text` and draws it on `page` with the first baseline at
/// `(x, y_start)`.
///
/// Returns the baseline immediately below the last drawn line
/// (`y_last - size - 2`), so further content can be chained without
/// re-measuring. When there is nothing to draw, `y_start` is returned.
#[allow(clippy::too_many_arguments)]
pub fn wrap_text<M: FontMetrics + ?Sized>(
    page: &mut Page,
    metrics: &M,
    text: &str,
    x: Pt,
    y_start: Pt,
    font: SpanFont,
    colour: Colour,
    max_width: Pt,
) -> Pt {
    let mut y = y_start;
    for line in wrap_lines(metrics, text, font, max_width) {
        page.draw_text(line, font, colour, x, y);
        y -= line_advance(font.size);
    }
    y
}

/// The x coordinate that horizontally centres `text` on a page of `page_width`
pub fn centered_x<M: FontMetrics + ?Sized>(
    metrics: &M,
    text: &str,
    font: SpanFont,
    page_width: Pt,
) -> Pt {
    (page_width - metrics.width_of(text, font.role, font.size)) / 2.0
}
