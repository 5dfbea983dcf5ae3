use crate::error::Result;
use crate::page::Page;
use crate::writer::{PdfWriter, WriterConfig};
use chrono::{DateTime, Utc};
use std::path::Path;

/// A PDF document that can contain multiple pages and metadata.
///
/// # Example
///
/// ```rust
/// use fixture_pdf::{Document, Page};
///
/// let mut doc = Document::new();
/// doc.set_title("Employee Warning Letter");
/// doc.add_page(Page::letter());
///
/// let mut buffer = Vec::new();
/// doc.write(&mut buffer).unwrap();
/// assert!(buffer.starts_with(b"%PDF-"));
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) pages: Vec<Page>,
    pub(crate) metadata: DocumentMetadata,
    pub(crate) config: WriterConfig,
}

/// Metadata for a PDF document.
#[derive(Debug, Clone)]
pub struct DocumentMetadata {
    /// Document title
    pub title: Option<String>,
    /// Document author
    pub author: Option<String>,
    /// Document subject
    pub subject: Option<String>,
    /// Software that created the original document
    pub creator: Option<String>,
    /// Software that produced the PDF
    pub producer: Option<String>,
    /// Date and time the document was created
    pub creation_date: Option<DateTime<Utc>>,
    /// Date and time the document was last modified
    pub modification_date: Option<DateTime<Utc>>,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            title: None,
            author: None,
            subject: None,
            creator: Some("fixture_pdf".to_string()),
            producer: Some(format!("fixture_pdf v{}", env!("CARGO_PKG_VERSION"))),
            creation_date: Some(now),
            modification_date: Some(now),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a new empty PDF document.
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            metadata: DocumentMetadata::default(),
            config: WriterConfig::default(),
        }
    }

    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.metadata.title = Some(title.into());
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        self.metadata.author = Some(author.into());
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.metadata.subject = Some(subject.into());
    }

    /// Pins both creation and modification dates, for byte-stable output.
    pub fn set_dates(&mut self, date: DateTime<Utc>) {
        self.metadata.creation_date = Some(date);
        self.metadata.modification_date = Some(date);
    }

    pub fn set_writer_config(&mut self, config: WriterConfig) {
        self.config = config;
    }

    /// Saves the document to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the document has no pages or the file cannot be
    /// created or written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = PdfWriter::create(path, self.config.clone())?;
        writer.write_document(self)?;
        Ok(())
    }

    /// Writes the document to a buffer.
    pub fn write(&self, buffer: &mut Vec<u8>) -> Result<()> {
        let mut writer = PdfWriter::with_config(buffer, self.config.clone());
        writer.write_document(self)?;
        Ok(())
    }
}
