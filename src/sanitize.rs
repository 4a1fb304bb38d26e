//! Glyph normalisation for user supplied text.
//!
//! Question banks are full of typographic and mathematical symbols that the
//! standard PDF fonts cannot draw. Everything that reaches the layout engine
//! goes through [`sanitize`] first so that measurement and drawing only ever
//! see glyphs the font is known to have.

/// Replace arrows, maths operators and curly quotes with ASCII equivalents
/// and trim surrounding whitespace.
///
/// The function is total and idempotent: every replacement is plain ASCII,
/// which is never rewritten again.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '→' | '⟶' | '➝' | '➔' | '⇒' | '⟹' => out.push_str("->"),
            '←' | '⟵' | '⇐' | '⟸' => out.push_str("<-"),
            '↔' | '⇄' | '⇆' | '⇌' | '⇋' => out.push_str("<->"),
            '√' => out.push_str("sqrt"),
            '×' | '✕' | '✖' => out.push('x'),
            '÷' => out.push('/'),
            'π' => out.push_str("pi"),
            '“' | '”' => out.push('"'),
            '‘' | '’' => out.push('\''),
            other => out.push(other),
        }
    }
    out.trim().to_string()
}
