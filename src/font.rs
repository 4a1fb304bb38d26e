//! Fonts and the font metrics used by every layout decision.
//!
//! A document is rendered with a [`FontSet`], which is either the PDF
//! standard-14 fonts (no font program is embedded, widths come from the
//! [`MetricsStrategy::Approximate`] model) or three embedded TrueType /
//! OpenType faces (widths come from the faces' own advance tables). A font set
//! is never mixed, so a single document is measured with a single strategy.

use crate::{
    refs::{ObjectReferences, RefType},
    RenderError, Pt,
};
use owned_ttf_parser::{AsFaceRef, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Str,
};
use std::{collections::BTreeMap, fmt::Write as _, sync::Arc};

/// Average advance of a glyph, as a fraction of the font size, used when no
/// font tables are available
pub const APPROXIMATE_ADVANCE: f32 = 0.6;

/// The three typefaces an exam document draws with
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontRole {
    Regular,
    Bold,
    /// Used for the exam title on the cover page
    Serif,
}

impl FontRole {
    pub const ALL: [FontRole; 3] = [FontRole::Regular, FontRole::Bold, FontRole::Serif];

    /// Index of the role in the page resource dictionary (`/F0`, `/F1`, ...)
    pub fn index(self) -> usize {
        match self {
            FontRole::Regular => 0,
            FontRole::Bold => 1,
            FontRole::Serif => 2,
        }
    }

    fn standard_name(self) -> &'static str {
        match self {
            FontRole::Regular => "Helvetica",
            FontRole::Bold => "Helvetica-Bold",
            FontRole::Serif => "Times-Roman",
        }
    }
}

/// How text widths are obtained for a document
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MetricsStrategy {
    /// Per-glyph horizontal advances read from embedded font tables
    GlyphAdvance,
    /// `chars * size * 0.6`, a monospace approximation of the standard fonts
    Approximate,
}

/// Anything that can tell the layout engine how wide a run of text is
pub trait FontMetrics {
    fn width_of(&self, text: &str, role: FontRole, size: Pt) -> Pt;
}

/// The documented fallback width model
pub fn approximate_width(text: &str, size: Pt) -> Pt {
    size * (text.chars().count() as f32 * APPROXIMATE_ADVANCE)
}

/// A parsed TrueType or OpenType font that will be embedded in its entirety
/// in the generated PDF.
pub struct EmbeddedFont {
    face: OwnedFace,
}

impl EmbeddedFont {
    /// Parse a font from raw bytes, returning an error if it is not a font
    pub fn load(bytes: Vec<u8>) -> Result<EmbeddedFont, RenderError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(EmbeddedFont { face })
    }

    fn name_entry(&self, id: u16) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// Full name of the face, or a generic name for faces without a name table
    pub fn name(&self) -> String {
        self.name_entry(owned_ttf_parser::name_id::FULL_NAME)
            .unwrap_or_else(|| "EmbeddedFont".to_string())
    }

    pub fn family(&self) -> String {
        self.name_entry(owned_ttf_parser::name_id::FAMILY)
            .unwrap_or_else(|| self.name())
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face.as_face_ref().glyph_index(ch).map(|gid| gid.0)
    }

    /// Glyph used for characters the face does not cover; `.notdef` as a last resort
    fn fallback_glyph_id(&self) -> u16 {
        self.glyph_id('\u{FFFD}')
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    fn units_per_em(&self) -> f32 {
        self.face.as_face_ref().units_per_em() as f32
    }

    /// Width of `text` at `size` from the face's advance table. Characters
    /// the face lacks are measured as the glyph that will actually be drawn.
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        let face = self.face.as_face_ref();
        let scaling = size / self.units_per_em();
        text.chars()
            .map(|ch| self.glyph_id(ch).unwrap_or_else(|| self.fallback_glyph_id()))
            .map(|gid| {
                scaling
                    * face
                        .glyph_hor_advance(owned_ttf_parser::GlyphId(gid))
                        .unwrap_or_default() as f32
            })
            .sum()
    }

    fn is_covered(&self, ch: char) -> bool {
        self.glyph_id(ch).is_some()
    }

    /// glyph id -> the first unicode character that maps onto it
    fn glyph_chars(&self) -> BTreeMap<u16, char> {
        let mut map: BTreeMap<u16, char> = BTreeMap::new();
        let Some(cmap) = self.face.as_face_ref().tables().cmap else {
            return map;
        };
        for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
            subtable.codepoints(|codepoint| {
                let Ok(ch) = char::try_from(codepoint) else {
                    return;
                };
                if let Some(gid) = subtable.glyph_index(codepoint).filter(|gid| gid.0 > 0) {
                    map.entry(gid.0).or_insert(ch);
                }
            });
        }
        map
    }

    fn encode(&self, text: &str, out: &mut String) {
        for ch in text.chars() {
            let gid = self.glyph_id(ch).unwrap_or_else(|| self.fallback_glyph_id());
            let _ = write!(out, "{gid:04x}");
        }
    }

    fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        let font_id = refs.gen(RefType::Font(font_index));
        let cid_font_id = refs.gen(RefType::CidFont(font_index));
        let descriptor_id = refs.gen(RefType::FontDescriptor(font_index));
        let data_id = refs.gen(RefType::FontData(font_index));
        let to_unicode_id = refs.gen(RefType::ToUnicode(font_index));

        let face = self.face.as_face_ref();
        let scaling = 1000.0 / self.units_per_em();
        let base_font = format!("F{font_index}");
        let glyph_chars = self.glyph_chars();

        writer
            .type0_font(font_id)
            .base_font(Name(base_font.as_bytes()))
            .encoding_predefined(Name(b"Identity-H"))
            .descendant_font(cid_font_id)
            .to_unicode(to_unicode_id);

        let advances: Vec<(u16, f32)> = glyph_chars
            .keys()
            .map(|&gid| {
                let advance = face
                    .glyph_hor_advance(owned_ttf_parser::GlyphId(gid))
                    .unwrap_or_default();
                (gid, advance as f32 * scaling)
            })
            .collect();

        let mut cid_font = writer.cid_font(cid_font_id);
        cid_font
            .subtype(CidFontType::Type2)
            .base_font(Name(base_font.as_bytes()))
            .system_info(SystemInfo {
                registry: Str(b"Adobe"),
                ordering: Str(b"Identity"),
                supplement: 0,
            })
            .font_descriptor(descriptor_id)
            .cid_to_gid_map_predefined(Name(b"Identity"));
        let mut widths = cid_font.widths();
        // one W array entry per run of consecutive glyph ids
        let mut run_start: Option<u16> = None;
        let mut run: Vec<f32> = Vec::new();
        let mut previous: u16 = 0;
        for &(gid, width) in advances.iter() {
            if run_start.is_some() && gid != previous.wrapping_add(1) {
                widths.consecutive(run_start.unwrap_or_default(), run.drain(..));
                run_start = None;
            }
            if run_start.is_none() {
                run_start = Some(gid);
            }
            run.push(width);
            previous = gid;
        }
        if let Some(start) = run_start {
            widths.consecutive(start, run.drain(..));
        }
        widths.finish();
        cid_font.default_width(1000.0);
        cid_font.finish();

        let bbox = face.global_bounding_box();
        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }
        let name = self.name();
        let family = self.family();
        let ascent = face.ascender() as f32 * scaling;
        let mut descriptor = writer.font_descriptor(descriptor_id);
        descriptor
            .name(Name(name.as_bytes()))
            .family(Str(family.as_bytes()))
            .flags(flags)
            .bbox(pdf_writer::Rect::new(
                bbox.x_min as f32 * scaling,
                bbox.y_min as f32 * scaling,
                bbox.x_max as f32 * scaling,
                bbox.y_max as f32 * scaling,
            ))
            .italic_angle(0.0)
            .ascent(ascent)
            .descent(face.descender() as f32 * scaling)
            .cap_height(
                face.capital_height()
                    .map(|h| h as f32 * scaling)
                    .unwrap_or(ascent),
            )
            .stem_v(80.0)
            .font_file2(data_id);
        descriptor.finish();

        writer
            .stream(data_id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        let cmap = to_unicode_cmap(&glyph_chars);
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(cmap.as_bytes(), 6);
        writer
            .stream(to_unicode_id, compressed.as_slice())
            .filter(Filter::FlateDecode);
    }
}

/// Build a ToUnicode CMap so that text drawn with glyph ids can still be
/// searched and copied out of the PDF
fn to_unicode_cmap(glyph_chars: &BTreeMap<u16, char>) -> String {
    let mut map = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n",
    );

    // bfchar blocks hold at most 100 entries
    let entries: Vec<(&u16, &char)> = glyph_chars.iter().collect();
    for block in entries.chunks(100) {
        let _ = writeln!(map, "{} beginbfchar", block.len());
        for (gid, ch) in block {
            let mut units = [0u16; 2];
            let encoded: String = ch
                .encode_utf16(&mut units)
                .iter()
                .map(|unit| format!("{unit:04x}"))
                .collect();
            let _ = writeln!(map, "<{gid:04x}> <{encoded}>");
        }
        map.push_str("endbfchar\n");
    }

    map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");
    map
}

/// Map a character onto a WinAnsiEncoding byte, the encoding the standard
/// fonts are written with. Characters outside the code page become `?`.
fn win_ansi_byte(ch: char) -> u8 {
    match ch {
        ' '..='~' => ch as u8,
        '\u{A0}'..='\u{FF}' => ch as u32 as u8,
        '€' => 0x80,
        '…' => 0x85,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        _ => b'?',
    }
}

/// The fonts a document is drawn with. Cheap to clone: embedded faces are
/// shared between clones.
#[derive(Clone)]
pub enum FontSet {
    /// Helvetica, Helvetica-Bold and Times-Roman, referenced by name
    Standard,
    /// Caller supplied faces, embedded into the PDF
    Embedded {
        regular: Arc<EmbeddedFont>,
        bold: Arc<EmbeddedFont>,
        serif: Arc<EmbeddedFont>,
    },
}

impl Default for FontSet {
    fn default() -> Self {
        FontSet::Standard
    }
}

impl FontSet {
    pub fn standard() -> FontSet {
        FontSet::Standard
    }

    /// Embed caller supplied faces. Missing bold / serif faces reuse the
    /// regular face.
    pub fn embedded(
        regular: EmbeddedFont,
        bold: Option<EmbeddedFont>,
        serif: Option<EmbeddedFont>,
    ) -> FontSet {
        let regular = Arc::new(regular);
        let bold = bold.map(Arc::new).unwrap_or_else(|| regular.clone());
        let serif = serif.map(Arc::new).unwrap_or_else(|| regular.clone());
        FontSet::Embedded {
            regular,
            bold,
            serif,
        }
    }

    pub fn strategy(&self) -> MetricsStrategy {
        match self {
            FontSet::Standard => MetricsStrategy::Approximate,
            FontSet::Embedded { .. } => MetricsStrategy::GlyphAdvance,
        }
    }

    fn face(&self, role: FontRole) -> Option<&EmbeddedFont> {
        match self {
            FontSet::Standard => None,
            FontSet::Embedded {
                regular,
                bold,
                serif,
            } => Some(match role {
                FontRole::Regular => regular,
                FontRole::Bold => bold,
                FontRole::Serif => serif,
            }),
        }
    }

    /// Whether every character of `sample` can be drawn with the regular face
    pub fn covers(&self, sample: &str) -> bool {
        match self.face(FontRole::Regular) {
            None => sample
                .chars()
                .all(|ch| ch.is_whitespace() || ch == '?' || win_ansi_byte(ch) != b'?'),
            Some(face) => sample.chars().all(|ch| ch.is_whitespace() || face.is_covered(ch)),
        }
    }

    /// Append the hex string operand for `text` drawn in `role` (without
    /// the surrounding angle brackets)
    pub(crate) fn encode(&self, role: FontRole, text: &str, out: &mut String) {
        match self.face(role) {
            None => {
                for ch in text.chars() {
                    let _ = write!(out, "{:02x}", win_ansi_byte(ch));
                }
            }
            Some(face) => face.encode(text, out),
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        for role in FontRole::ALL {
            match self.face(role) {
                None => {
                    let id = refs.gen(RefType::Font(role.index()));
                    writer
                        .type1_font(id)
                        .base_font(Name(role.standard_name().as_bytes()))
                        .encoding_predefined(Name(b"WinAnsiEncoding"));
                }
                Some(face) => face.write(refs, role.index(), writer),
            }
        }
    }
}

impl FontMetrics for FontSet {
    fn width_of(&self, text: &str, role: FontRole, size: Pt) -> Pt {
        match self.face(role) {
            None => approximate_width(text, size),
            Some(face) => face.width_of_text(text, size),
        }
    }
}
