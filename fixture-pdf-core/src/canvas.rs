//! Canvas-style drawing on top of [`Document`] and [`Page`].
//!
//! A [`Canvas`] always has a current page. Text is placed at absolute
//! coordinates with [`Canvas::draw_string`]; [`Canvas::show_page`] closes the
//! current page and opens a fresh one with the graphics state reset.

use crate::document::Document;
use crate::error::{PdfError, Result};
use crate::page::Page;
use crate::text::Font;
use crate::writer::WriterConfig;
use std::path::Path;
use tracing::debug;

/// Font selected on a fresh page.
pub const INITIAL_FONT: (Font, f64) = (Font::Helvetica, 12.0);

pub struct Canvas {
    document: Document,
    current: Page,
    width: f64,
    height: f64,
    font: Font,
    font_size: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            document: Document::new(),
            current: Page::new(width, height),
            width,
            height,
            font: INITIAL_FONT.0,
            font_size: INITIAL_FONT.1,
        }
    }

    /// A canvas of US Letter pages (612 x 792 points).
    pub fn letter() -> Self {
        let page = Page::letter();
        Self::new(page.width(), page.height())
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn font(&self) -> (Font, f64) {
        (self.font, self.font_size)
    }

    /// Selects the font for subsequent `draw_string` calls. The size must be
    /// finite and positive.
    pub fn set_font(&mut self, font: Font, size: f64) -> Result<()> {
        if !size.is_finite() || size <= 0.0 {
            return Err(PdfError::InvalidStructure(format!(
                "font size {size} is not a positive finite number"
            )));
        }

        self.font = font;
        self.font_size = size;
        Ok(())
    }

    /// Draws `text` with its baseline starting at (`x`, `y`).
    pub fn draw_string(&mut self, x: f64, y: f64, text: &str) -> Result<()> {
        if !x.is_finite() || !y.is_finite() {
            return Err(PdfError::InvalidStructure(format!(
                "text position ({x}, {y}) is not finite"
            )));
        }

        self.current
            .text()
            .set_font(self.font, self.font_size)
            .at(x, y)
            .write(text);
        Ok(())
    }

    /// Finishes the current page and starts a new one.
    pub fn show_page(&mut self) {
        let finished = std::mem::replace(&mut self.current, Page::new(self.width, self.height));
        self.document.add_page(finished);
        (self.font, self.font_size) = INITIAL_FONT;
        debug!(pages = self.document.page_count(), "page finished");
    }

    /// Number of pages including the one currently being drawn.
    pub fn page_count(&self) -> usize {
        self.document.page_count() + 1
    }

    /// Closes the canvas. A trailing page that was never drawn on is dropped
    /// unless it would leave the document empty.
    pub fn finish(mut self) -> Document {
        if !self.current.is_blank() || self.document.page_count() == 0 {
            self.document.add_page(self.current);
        }
        self.document
    }

    pub fn save(self, path: impl AsRef<Path>, config: WriterConfig) -> Result<Document> {
        let mut document = self.finish();
        document.set_writer_config(config);
        document.save(path)?;
        Ok(document)
    }
}
