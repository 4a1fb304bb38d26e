//! Conversion of page draw operations into PDF content stream operators.

use crate::colour::Colour;
use crate::font::FontSet;
use crate::page::{LineLayout, Page, PageContents, RectLayout, SpanLayout};
use std::io::Write;

/// The distinct constant-alpha values used anywhere in a document. Each one
/// becomes an `ExtGState` resource named `/GS{index}`.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Opacities(Vec<f32>);

impl Opacities {
    pub(crate) fn collect<'a, I: IntoIterator<Item = &'a Page>>(pages: I) -> Opacities {
        let mut values: Vec<f32> = Vec::new();
        for page in pages {
            for alpha in page.contents.iter().filter_map(PageContents::opacity) {
                if !values.iter().any(|v| v.to_bits() == alpha.to_bits()) {
                    values.push(alpha);
                }
            }
        }
        Opacities(values)
    }

    pub(crate) fn index_of(&self, alpha: f32) -> Option<usize> {
        self.0.iter().position(|v| v.to_bits() == alpha.to_bits())
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.0.iter().copied().enumerate()
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }
}

/// Renders page contents to an (uncompressed) PDF content stream.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(
    contents: &[PageContents],
    fonts: &FontSet,
    opacities: &Opacities,
) -> Result<Vec<u8>, std::io::Error> {
    let mut content: Vec<u8> = Vec::default();

    for page_content in contents.iter() {
        write!(&mut content, "q\n")?;
        if let Some(index) = page_content.opacity().and_then(|a| opacities.index_of(a)) {
            write!(&mut content, "/GS{index} gs\n")?;
        }
        match page_content {
            PageContents::Text(span) => render_span(&mut content, span, fonts)?,
            PageContents::Rect(rect) => render_rect(&mut content, rect)?,
            PageContents::Line(line) => render_line(&mut content, line)?,
        }
        write!(&mut content, "Q\n")?;
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_span(
    content: &mut Vec<u8>,
    span: &SpanLayout,
    fonts: &FontSet,
) -> Result<(), std::io::Error> {
    let mut encoded = String::with_capacity(span.text.len() * 4);
    fonts.encode(span.font.role, &span.text, &mut encoded);

    write!(content, "/F{} {} Tf\n", span.font.role.index(), span.font.size)?;
    write_colour(content, span.colour, false)?;
    write!(content, "BT\n")?;
    write!(content, "{} {} Td\n", span.coords.0, span.coords.1)?;
    write!(content, "<{encoded}> Tj\n")?;
    write!(content, "ET\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_rect(content: &mut Vec<u8>, rect: &RectLayout) -> Result<(), std::io::Error> {
    if let Some(fill) = rect.fill {
        write_colour(content, fill, false)?;
    }
    if let Some((stroke, width)) = rect.stroke {
        write_colour(content, stroke, true)?;
        write!(content, "{width} w\n")?;
    }
    write!(
        content,
        "{} {} {} {} re\n",
        rect.rect.x1,
        rect.rect.y1,
        rect.rect.width(),
        rect.rect.height()
    )?;
    let op = match (rect.fill.is_some(), rect.stroke.is_some()) {
        (true, true) => "B",
        (true, false) => "f",
        (false, true) => "S",
        // an outline-less, fill-less box only ends the path
        (false, false) => "n",
    };
    write!(content, "{op}\n")
}

#[allow(clippy::write_with_newline)]
fn render_line(content: &mut Vec<u8>, line: &LineLayout) -> Result<(), std::io::Error> {
    write_colour(content, line.colour, true)?;
    write!(content, "{} w\n", line.width)?;
    write!(content, "{} {} m\n", line.from.0, line.from.1)?;
    write!(content, "{} {} l\n", line.to.0, line.to.1)?;
    write!(content, "S\n")
}

#[allow(clippy::write_with_newline)]
fn write_colour(content: &mut Vec<u8>, colour: Colour, stroking: bool) -> Result<(), std::io::Error> {
    match (colour, stroking) {
        (Colour::RGB { r, g, b }, false) => write!(content, "{r} {g} {b} rg\n"),
        (Colour::RGB { r, g, b }, true) => write!(content, "{r} {g} {b} RG\n"),
        (Colour::Grey { g }, false) => write!(content, "{g} g\n"),
        (Colour::Grey { g }, true) => write!(content, "{g} G\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colours;
    use crate::font::FontRole;
    use crate::page::SpanFont;
    use crate::pagesize::A4;
    use crate::rect::Rect;
    use crate::units::Pt;

    fn render(page: &Page) -> String {
        let opacities = Opacities::collect([page]);
        let bytes = render_contents(&page.contents, &FontSet::standard(), &opacities).unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn text_is_positioned_and_hex_encoded() {
        let mut page = Page::new(A4, None);
        page.draw_text(
            "Q1",
            SpanFont {
                role: FontRole::Bold,
                size: Pt(10.0),
            },
            colours::SLATE,
            Pt(50.0),
            Pt(800.0),
        );
        let stream = render(&page);
        assert!(stream.contains("/F1 10 Tf\n"));
        assert!(stream.contains("0.3 g\n"));
        assert!(stream.contains("50 800 Td\n"));
        assert!(stream.contains("<5131> Tj\n"));
    }

    #[test]
    fn translucent_content_uses_a_graphics_state() {
        let mut page = Page::new(A4, None);
        page.add_rect(RectLayout {
            rect: Rect::from_origin(Pt(545.0), Pt(10.0), Pt(40.0), Pt(40.0)),
            fill: None,
            stroke: Some((colours::FAINT, Pt(1.0))),
            opacity: Some(0.3),
        });
        page.add_rect(RectLayout {
            rect: Rect::from_origin(Pt(0.0), Pt(0.0), Pt(10.0), Pt(10.0)),
            fill: Some(colours::BAR_FILL),
            stroke: None,
            opacity: None,
        });
        let opacities = Opacities::collect([&page]);
        assert_eq!(opacities.len(), 1);
        let stream = render(&page);
        assert!(stream.contains("/GS0 gs\n"));
        assert!(stream.contains("545 10 40 40 re\nS\n"));
        assert!(stream.contains(" re\nf\n"));
        assert_eq!(stream.matches("gs\n").count(), 1);
    }

    #[test]
    fn lines_are_stroked() {
        let mut page = Page::new(A4, None);
        page.add_line(LineLayout {
            from: (Pt(60.0), Pt(500.0)),
            to: (Pt(560.0), Pt(500.0)),
            colour: colours::RULE,
            width: Pt(0.5),
        });
        let stream = render(&page);
        assert!(stream.contains("0.75 G\n0.5 w\n60 500 m\n560 500 l\nS\n"));
    }
}
