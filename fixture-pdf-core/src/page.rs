use crate::text::{Font, TextContext};
use std::collections::BTreeSet;

/// A single page in a PDF document.
///
/// Pages have a size (width and height in points) and a text context that
/// collects the page's content stream.
///
/// # Example
///
/// ```rust
/// use fixture_pdf::{Font, Page};
///
/// let mut page = Page::letter();
/// page.text()
///     .set_font(Font::Helvetica, 10.0)
///     .at(50.0, 712.0)
///     .write("Acme Corporation");
/// ```
#[derive(Clone, Debug)]
pub struct Page {
    width: f64,
    height: f64,
    text_context: TextContext,
}

impl Page {
    /// Creates a new page with the specified width and height in points.
    ///
    /// Points are 1/72 of an inch.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            text_context: TextContext::new(),
        }
    }

    /// Creates a new A4 page (595 x 842 points).
    pub fn a4() -> Self {
        Self::new(595.0, 842.0)
    }

    /// Creates a new US Letter page (612 x 792 points).
    pub fn letter() -> Self {
        Self::new(612.0, 792.0)
    }

    /// Returns a mutable reference to the text context for adding text.
    pub fn text(&mut self) -> &mut TextContext {
        &mut self.text_context
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn is_blank(&self) -> bool {
        self.text_context.is_empty()
    }

    pub fn used_fonts(&self) -> &BTreeSet<Font> {
        self.text_context.used_fonts()
    }

    pub(crate) fn generate_content(&self) -> Vec<u8> {
        self.text_context.operations().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_sizes() {
        let letter = Page::letter();
        assert_eq!(letter.width(), 612.0);
        assert_eq!(letter.height(), 792.0);

        let a4 = Page::a4();
        assert_eq!(a4.width(), 595.0);
        assert_eq!(a4.height(), 842.0);
    }

    #[test]
    fn test_blank_until_written() {
        let mut page = Page::letter();
        assert!(page.is_blank());
        assert!(page.generate_content().is_empty());

        page.text().at(50.0, 50.0).write("HR Department");
        assert!(!page.is_blank());
        assert!(page.used_fonts().contains(&Font::Helvetica));
        assert!(String::from_utf8_lossy(&page.generate_content()).contains("(HR Department) Tj"));
    }
}
