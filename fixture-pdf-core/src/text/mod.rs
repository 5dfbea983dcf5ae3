mod encoding;
mod font;

pub use encoding::{escape_literal, TextEncoding};
pub use font::Font;

use std::collections::BTreeSet;

/// Accumulates text-showing operators for one page.
///
/// Each `write` emits a self-contained `BT ... ET` object, so the order of
/// calls is the order glyphs land in the content stream and in any text
/// extracted from it.
#[derive(Clone, Debug)]
pub struct TextContext {
    operations: String,
    current_font: Font,
    font_size: f64,
    position: (f64, f64),
    used_fonts: BTreeSet<Font>,
}

impl Default for TextContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TextContext {
    pub fn new() -> Self {
        Self {
            operations: String::new(),
            current_font: Font::Helvetica,
            font_size: 12.0,
            position: (0.0, 0.0),
            used_fonts: BTreeSet::new(),
        }
    }

    pub fn set_font(&mut self, font: Font, size: f64) -> &mut Self {
        self.current_font = font;
        self.font_size = size;
        self
    }

    pub fn at(&mut self, x: f64, y: f64) -> &mut Self {
        self.position = (x, y);
        self
    }

    pub fn font(&self) -> Font {
        self.current_font
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    pub fn write(&mut self, text: &str) -> &mut Self {
        let encoded = TextEncoding::WinAnsiEncoding.encode(text);
        let (x, y) = self.position;

        self.operations.push_str("BT\n");
        self.operations.push_str(&format!(
            "/{} {} Tf\n",
            self.current_font.pdf_name(),
            self.font_size
        ));
        self.operations.push_str(&format!("{x:.2} {y:.2} Td\n"));
        self.operations.push('(');
        self.operations.push_str(&escape_literal(&encoded));
        self.operations.push_str(") Tj\n");
        self.operations.push_str("ET\n");

        self.used_fonts.insert(self.current_font);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn used_fonts(&self) -> &BTreeSet<Font> {
        &self.used_fonts
    }

    pub(crate) fn operations(&self) -> &[u8] {
        self.operations.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_is_empty() {
        let ctx = TextContext::new();
        assert!(ctx.is_empty());
        assert_eq!(ctx.font(), Font::Helvetica);
        assert_eq!(ctx.font_size(), 12.0);
        assert!(ctx.used_fonts().is_empty());
    }

    #[test]
    fn test_write_emits_text_object() {
        let mut ctx = TextContext::new();
        ctx.set_font(Font::HelveticaBold, 16.0)
            .at(50.0, 742.0)
            .write("Employee Warning Letter");

        let ops = String::from_utf8(ctx.operations().to_vec()).unwrap();
        assert_eq!(
            ops,
            "BT\n/Helvetica-Bold 16 Tf\n50.00 742.00 Td\n(Employee Warning Letter) Tj\nET\n"
        );
    }

    #[test]
    fn test_write_escapes_and_encodes() {
        let mut ctx = TextContext::new();
        ctx.at(50.0, 100.0).write("• (a)");

        let ops = String::from_utf8(ctx.operations().to_vec()).unwrap();
        assert!(ops.contains("(\\225 \\(a\\)) Tj"));
    }

    #[test]
    fn test_empty_string_still_written() {
        let mut ctx = TextContext::new();
        ctx.at(50.0, 100.0).write("");
        assert!(!ctx.is_empty());
        assert!(String::from_utf8_lossy(ctx.operations()).contains("() Tj"));
    }

    #[test]
    fn test_used_fonts_tracked() {
        let mut ctx = TextContext::new();
        ctx.set_font(Font::Helvetica, 10.0).write("a");
        ctx.set_font(Font::HelveticaBold, 12.0).write("b");
        ctx.set_font(Font::Helvetica, 10.0).write("c");
        // Setting a font without drawing does not count as use
        ctx.set_font(Font::Courier, 10.0);

        let fonts: Vec<Font> = ctx.used_fonts().iter().copied().collect();
        assert_eq!(fonts, vec![Font::Helvetica, Font::HelveticaBold]);
    }
}
