use crate::{
    content::Opacities,
    font::FontSet,
    info::Info,
    page::Page,
    refs::{ObjectReferences, RefType},
    RenderError,
};
use id_arena::{Arena, Id};
use pdf_writer::{Pdf, Ref};
use std::io::Write;

/// A finished (or in-assembly) paginated document. The renderer hands out
/// documents read-only: pages are added and drawn on only while a render call
/// is assembling them, then serialized with [Document::write] or
/// [Document::to_bytes].
pub struct Document {
    info: Option<Info>,
    pages: Arena<Page>,
    page_order: Vec<Id<Page>>,
    fonts: FontSet,
}

impl Document {
    pub fn new(fonts: FontSet) -> Document {
        Document {
            info: None,
            pages: Arena::new(),
            page_order: Vec::new(),
            fonts,
        }
    }

    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub(crate) fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    pub fn info(&self) -> Option<&Info> {
        self.info.as_ref()
    }

    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    /// Add a page to the end of the document, returning its id
    pub(crate) fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    /// Mutable access to a page together with the font set, so callers can
    /// measure and draw in one go
    pub(crate) fn page_and_fonts(&mut self, id: Id<Page>) -> (&mut Page, &FontSet) {
        (&mut self.pages[id], &self.fonts)
    }

    /// Get the 0-based index of a page given its ID
    pub fn index_of_page(&self, page: Id<Page>) -> Option<usize> {
        self.page_order.iter().position(|&p| p == page)
    }

    pub fn page_count(&self) -> usize {
        self.page_order.len()
    }

    /// The page at a 0-based position in the document
    pub fn page(&self, index: usize) -> Option<&Page> {
        self.page_order.get(index).map(|&id| &self.pages[id])
    }

    /// Pages in document order
    pub fn pages(&self) -> impl Iterator<Item = &Page> + '_ {
        self.page_order.iter().map(move |&id| &self.pages[id])
    }

    /// Pages in document order. Pages are only ever appended, so arena order
    /// is document order.
    pub(crate) fn pages_mut(&mut self) -> impl Iterator<Item = &mut Page> + '_ {
        self.pages.iter_mut().map(|(_, page)| page)
    }

    /// Every page's text, pages separated by blank lines
    pub fn text(&self) -> String {
        self.pages()
            .map(Page::text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Serialize the document as PDF into `w`. The whole file is generated in
    /// memory first, then written in one go.
    pub fn write<W: Write>(&self, mut w: W) -> Result<(), RenderError> {
        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = &self.info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..self.page_order.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        self.fonts.write(&mut refs, &mut writer);

        let opacities = Opacities::collect(self.pages());
        for (i, alpha) in opacities.iter() {
            let id = refs.gen(RefType::GraphicsState(i));
            writer
                .ext_graphics(id)
                .non_stroking_alpha(alpha)
                .stroking_alpha(alpha);
        }

        for (page_index, page) in self.pages().enumerate() {
            page.write(&mut refs, page_index, &self.fonts, &opacities, &mut writer)?;
        }

        writer.catalog(catalog_id).pages(page_tree_id);

        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, RenderError> {
        let mut bytes: Vec<u8> = Vec::new();
        self.write(&mut bytes)?;
        Ok(bytes)
    }
}
