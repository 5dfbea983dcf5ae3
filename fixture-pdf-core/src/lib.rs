//! # fixture-pdf
//!
//! Generates the fixed "employee warning letter" PDF used as a fixture when
//! testing document upload and text-extraction pipelines.
//!
//! The crate carries just enough of a PDF writer for that job: standard
//! Type 1 fonts with WinAnsi text, one content stream per page, and a
//! classic cross-reference table. Text is written as real text operators, so
//! the result is selectable and extractable.
//!
//! ## Quick Start
//!
//! ```rust
//! use fixture_pdf::{WarningLetter, WriterConfig};
//! use chrono::NaiveDate;
//!
//! # fn main() -> fixture_pdf::Result<()> {
//! let letter = WarningLetter::new(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
//! let document = letter.render(WriterConfig::default())?;
//!
//! let mut buffer = Vec::new();
//! document.write(&mut buffer)?;
//! assert!(buffer.starts_with(b"%PDF-1.7"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Drawing on a canvas
//!
//! ```rust
//! use fixture_pdf::{Canvas, Font};
//!
//! # fn main() -> fixture_pdf::Result<()> {
//! let mut canvas = Canvas::letter();
//! canvas.set_font(Font::HelveticaBold, 16.0)?;
//! canvas.draw_string(50.0, canvas.height() - 50.0, "Employee Warning Letter")?;
//! canvas.show_page();
//! let document = canvas.finish();
//! assert_eq!(document.page_count(), 1);
//! # Ok(())
//! # }
//! ```

pub mod canvas;
pub mod document;
pub mod error;
pub mod letter;
pub mod objects;
pub mod page;
pub mod text;
pub mod writer;

pub use canvas::Canvas;
pub use document::{Document, DocumentMetadata};
pub use error::{PdfError, Result};
pub use letter::{BodyLayout, WarningLetter, DEFAULT_FILENAME};
pub use page::Page;
pub use text::{Font, TextContext};
pub use writer::{PdfWriter, WriterConfig};

/// Current version of fixture-pdf
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
