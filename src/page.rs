use crate::colour::Colour;
use crate::content::{render_contents, Opacities};
use crate::font::{FontRole, FontSet};
use crate::layout::Margins;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::*;
use crate::RenderError;
use pdf_writer::{Filter, Finish, Name, Pdf, Ref};

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub role: FontRole,
    pub size: Pt,
}

/// A single run of text drawn at an absolute baseline position
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub coords: (Pt, Pt),
    /// Constant alpha in `0.0..1.0`; `None` draws fully opaque
    pub opacity: Option<f32>,
}

/// A rectangle that can be filled, stroked, or both
#[derive(Clone, PartialEq, Debug)]
pub struct RectLayout {
    pub rect: Rect,
    pub fill: Option<Colour>,
    pub stroke: Option<(Colour, Pt)>,
    pub opacity: Option<f32>,
}

/// A straight stroked line
#[derive(Clone, PartialEq, Debug)]
pub struct LineLayout {
    pub from: (Pt, Pt),
    pub to: (Pt, Pt),
    pub colour: Colour,
    pub width: Pt,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(SpanLayout),
    Rect(RectLayout),
    Line(LineLayout),
}

impl PageContents {
    pub(crate) fn opacity(&self) -> Option<f32> {
        match self {
            PageContents::Text(span) => span.opacity,
            PageContents::Rect(rect) => rect.opacity,
            PageContents::Line(_) => None,
        }
    }
}

/// A single fixed-size page and the absolutely positioned draw operations on it
#[derive(Clone, Debug)]
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    /// Draw operations, in painting order
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(size: PageSize, margins: Option<Margins>) -> Page {
        let (width, height) = size;
        let margins = margins.unwrap_or_else(Margins::empty);
        Page {
            media_box: Rect {
                x1: Pt(0.0),
                y1: Pt(0.0),
                x2: width,
                y2: height,
            },
            content_box: Rect {
                x1: margins.left,
                y1: margins.bottom,
                x2: width - margins.right,
                y2: height - margins.top,
            },
            contents: Vec::default(),
        }
    }

    pub fn width(&self) -> Pt {
        self.media_box.width()
    }

    pub fn height(&self) -> Pt {
        self.media_box.height()
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.contents.push(PageContents::Text(span));
    }

    pub fn add_rect(&mut self, rect: RectLayout) {
        self.contents.push(PageContents::Rect(rect));
    }

    pub fn add_line(&mut self, line: LineLayout) {
        self.contents.push(PageContents::Line(line));
    }

    /// Draw `text` with its baseline starting at `(x, y)`
    pub fn draw_text<S: Into<String>>(
        &mut self,
        text: S,
        font: SpanFont,
        colour: Colour,
        x: Pt,
        y: Pt,
    ) {
        self.add_span(SpanLayout {
            text: text.into(),
            font,
            colour,
            coords: (x, y),
            opacity: None,
        });
    }

    /// All text spans on the page, in drawing order
    pub fn spans(&self) -> impl Iterator<Item = &SpanLayout> {
        self.contents.iter().filter_map(|c| match c {
            PageContents::Text(span) => Some(span),
            _ => None,
        })
    }

    /// The page's text, one span per line, in drawing order
    pub fn text(&self) -> String {
        self.spans()
            .map(|span| span.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.spans().any(|span| span.text.contains(needle))
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &FontSet,
        opacities: &Opacities,
        writer: &mut Pdf,
    ) -> Result<(), RenderError> {
        let id = refs.get(RefType::Page(page_index))?;
        let parent = refs.get(RefType::PageTree)?;
        let font_refs: Vec<Ref> = FontRole::ALL
            .iter()
            .map(|role| refs.get(RefType::Font(role.index())))
            .collect::<Result<_, _>>()?;
        let state_refs: Vec<Ref> = (0..opacities.len())
            .map(|i| refs.get(RefType::GraphicsState(i)))
            .collect::<Result<_, _>>()?;
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(parent);
        page.contents(content_id);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (i, font_ref) in font_refs.into_iter().enumerate() {
            resource_fonts.pair(Name(format!("F{i}").as_bytes()), font_ref);
        }
        resource_fonts.finish();
        if !state_refs.is_empty() {
            let mut states = resources.ext_g_states();
            for (i, state_ref) in state_refs.into_iter().enumerate() {
                states.pair(Name(format!("GS{i}").as_bytes()), state_ref);
            }
            states.finish();
        }
        resources.finish();
        page.finish();

        let rendered = render_contents(&self.contents, fonts, opacities)?;
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(rendered.as_slice(), 6);
        writer
            .stream(content_id, compressed.as_slice())
            .filter(Filter::FlateDecode);
        Ok(())
    }
}
