use crate::colour::Colour;
use crate::document::Document;
use crate::layout::{line_advance, wrap_lines, Margins};
use crate::page::*;
use crate::pagesize::A4;
use crate::units::Pt;
use id_arena::Id;
use tracing::debug;

/// The page currently being filled and the baseline the next block will be
/// drawn at.
///
/// The assembler owns exactly one flow state per render call and threads it
/// through every drawing step by `&mut`, so there is never more than one
/// cursor for a document.
#[derive(Debug, Clone)]
pub struct PageFlowState {
    page: Id<Page>,
    cursor_y: Pt,
    top: Pt,
    bottom: Pt,
}

fn exam_page() -> Page {
    Page::new(A4, Some(Margins::exam_paper()))
}

impl PageFlowState {
    /// Allocate a fresh page at the end of `document` and start flowing on it
    pub fn start(document: &mut Document) -> PageFlowState {
        let page = exam_page();
        let (top, bottom) = (page.content_box.y2, page.content_box.y1);
        let id = document.add_page(page);
        debug!(page = document.page_count(), "started page flow");
        PageFlowState {
            page: id,
            cursor_y: top,
            top,
            bottom,
        }
    }

    pub fn page(&self) -> Id<Page> {
        self.page
    }

    pub fn cursor_y(&self) -> Pt {
        self.cursor_y
    }

    /// The baseline a fresh page starts at
    pub fn top(&self) -> Pt {
        self.top
    }

    /// Lowest baseline any flowed line may be drawn at
    pub fn bottom(&self) -> Pt {
        self.bottom
    }

    /// Move the cursor down the page by `by`
    pub fn advance(&mut self, by: Pt) {
        self.cursor_y -= by;
    }

    /// Unconditionally continue on a new page, resetting the cursor to the top
    pub fn new_page(&mut self, document: &mut Document) -> Id<Page> {
        self.page = document.add_page(exam_page());
        self.cursor_y = self.top;
        debug!(page = document.page_count(), "allocated page");
        self.page
    }

    /// Makes sure that at least down to `min_remaining` is free on the current
    /// page: if the cursor is already below that low-water mark, a new page is
    /// started. Returns the page and cursor to draw at.
    pub fn ensure_room(&mut self, document: &mut Document, min_remaining: Pt) -> (Id<Page>, Pt) {
        if self.cursor_y < min_remaining {
            self.new_page(document);
        }
        (self.page, self.cursor_y)
    }

    /// Draws a single line of text at the cursor, breaking to a new page first
    /// if the cursor has run into the bottom margin. The cursor is not moved.
    pub fn line<S: Into<String>>(
        &mut self,
        document: &mut Document,
        text: S,
        x: Pt,
        font: SpanFont,
        colour: Colour,
    ) {
        if self.cursor_y < self.bottom {
            self.new_page(document);
        }
        let (page, _) = document.page_and_fonts(self.page);
        page.draw_text(text, font, colour, x, self.cursor_y);
    }

    /// Wraps `text` to `max_width` and draws it line by line from the cursor,
    /// continuing on new pages as the bottom margin is reached. Afterwards the
    /// cursor sits one line advance below the last drawn line.
    pub fn wrap(
        &mut self,
        document: &mut Document,
        text: &str,
        x: Pt,
        font: SpanFont,
        colour: Colour,
        max_width: Pt,
    ) {
        let lines = wrap_lines(document.fonts(), text, font, max_width);
        for line in lines {
            self.line(document, line, x, font, colour);
            self.advance(line_advance(font.size));
        }
    }

    /// Adds an arbitrary draw operation to the current page
    pub fn draw(&mut self, document: &mut Document, contents: PageContents) {
        let (page, _) = document.page_and_fonts(self.page);
        page.contents.push(contents);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colours;
    use crate::font::{FontRole, FontSet};

    const BODY: SpanFont = SpanFont {
        role: FontRole::Regular,
        size: Pt(10.0),
    };

    #[test]
    fn starts_at_the_top_of_an_a4_page() {
        let mut doc = Document::new(FontSet::standard());
        let flow = PageFlowState::start(&mut doc);
        assert_eq!(doc.page_count(), 1);
        assert!((flow.cursor_y().0 - 800.0).abs() < 1e-3);
        assert!((flow.bottom().0 - 60.0).abs() < 1e-3);
        let page = doc.page(0).unwrap();
        assert_eq!((page.width(), page.height()), A4);
    }

    #[test]
    fn ensure_room_keeps_the_page_while_above_the_mark() {
        let mut doc = Document::new(FontSet::standard());
        let mut flow = PageFlowState::start(&mut doc);
        flow.advance(Pt(500.0));
        let first = flow.page();
        let (page, y) = flow.ensure_room(&mut doc, Pt(200.0));
        assert_eq!(page, first);
        assert_eq!(y, flow.cursor_y());
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn ensure_room_breaks_below_the_mark() {
        let mut doc = Document::new(FontSet::standard());
        let mut flow = PageFlowState::start(&mut doc);
        flow.advance(Pt(650.0));
        let first = flow.page();
        let (page, y) = flow.ensure_room(&mut doc, Pt(200.0));
        assert_ne!(page, first);
        assert_eq!(y, flow.top());
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.index_of_page(page), Some(1));
    }

    #[test]
    fn wrapped_text_continues_on_new_pages() {
        let mut doc = Document::new(FontSet::standard());
        let mut flow = PageFlowState::start(&mut doc);
        let text = lipsum::lipsum(2000);
        flow.wrap(&mut doc, &text, Pt(60.0), BODY, colours::BLACK, Pt(500.0));
        assert!(doc.page_count() > 1);
        for page in doc.pages() {
            for span in page.spans() {
                assert!(span.coords.1 >= flow.bottom());
                assert!(span.coords.1 <= flow.top());
            }
        }
        let drawn: Vec<String> = doc
            .pages()
            .flat_map(|p| p.spans().map(|s| s.text.clone()))
            .collect();
        assert_eq!(
            drawn.join(" ").split(' ').collect::<Vec<_>>(),
            text.split_whitespace().collect::<Vec<_>>()
        );
    }

    #[test]
    fn line_does_not_move_the_cursor() {
        let mut doc = Document::new(FontSet::standard());
        let mut flow = PageFlowState::start(&mut doc);
        let before = flow.cursor_y();
        flow.line(&mut doc, "SECTION A", Pt(50.0), BODY, colours::NAVY);
        assert_eq!(flow.cursor_y(), before);
        assert!(doc.page(0).unwrap().contains_text("SECTION A"));
    }
}
