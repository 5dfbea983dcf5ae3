use crate::document::Document;
use crate::error::{PdfError, Result};
use crate::objects::{Dictionary, Object, ObjectId, Stream};
use crate::page::Page;
use crate::text::{escape_literal, TextEncoding};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// Options controlling how a document is serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterConfig {
    /// Flate-compress page content streams. Turning this off leaves the
    /// text operators readable in the raw file.
    pub compress: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            compress: cfg!(feature = "compression"),
        }
    }
}

impl WriterConfig {
    pub fn uncompressed() -> Self {
        Self { compress: false }
    }
}

/// Serializes a [`Document`] as a classic (non-incremental) PDF file with a
/// cross-reference table.
///
/// Object numbers are assigned in file order: catalog, page tree, then a
/// page object and its content stream for every page, then the Info
/// dictionary.
pub struct PdfWriter<W: Write> {
    writer: W,
    config: WriterConfig,
    xref_positions: BTreeMap<ObjectId, u64>,
    current_position: u64,
}

impl PdfWriter<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>, config: WriterConfig) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "creating output file");
        let file = File::create(path)?;
        Ok(Self::with_config(BufWriter::new(file), config))
    }
}

impl<W: Write> PdfWriter<W> {
    pub fn with_config(writer: W, config: WriterConfig) -> Self {
        Self {
            writer,
            config,
            xref_positions: BTreeMap::new(),
            current_position: 0,
        }
    }

    pub fn write_document(&mut self, document: &Document) -> Result<()> {
        if document.pages.is_empty() {
            return Err(PdfError::EmptyDocument);
        }

        self.write_header()?;

        let catalog_id = ObjectId::new(1, 0);
        let pages_id = ObjectId::new(2, 0);
        self.write_catalog(catalog_id, pages_id)?;
        self.write_pages(pages_id, &document.pages)?;

        let info_id = ObjectId::new(3 + document.pages.len() as u32 * 2, 0);
        self.write_info(info_id, document)?;

        let xref_position = self.current_position;
        self.write_xref()?;
        self.write_trailer(catalog_id, info_id, xref_position)?;

        self.writer.flush()?;
        info!(
            pages = document.pages.len(),
            bytes = self.current_position,
            compressed = self.config.compress,
            "PDF written"
        );
        Ok(())
    }

    fn write_header(&mut self) -> Result<()> {
        self.write_bytes(b"%PDF-1.7\n")?;
        // Binary comment so transfer tools treat the file as binary
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])?;
        Ok(())
    }

    fn write_catalog(&mut self, catalog_id: ObjectId, pages_id: ObjectId) -> Result<()> {
        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::name("Catalog"));
        catalog.set("Pages", pages_id);

        self.write_object(catalog_id, &Object::Dictionary(catalog))
    }

    fn write_pages(&mut self, pages_id: ObjectId, pages: &[Page]) -> Result<()> {
        let page_ids: Vec<(ObjectId, ObjectId)> = (0..pages.len() as u32)
            .map(|i| (ObjectId::new(3 + i * 2, 0), ObjectId::new(4 + i * 2, 0)))
            .collect();

        let mut pages_dict = Dictionary::new();
        pages_dict.set("Type", Object::name("Pages"));
        pages_dict.set("Count", pages.len() as i64);
        pages_dict.set(
            "Kids",
            page_ids
                .iter()
                .map(|(page_id, _)| Object::Reference(*page_id))
                .collect::<Vec<_>>(),
        );
        self.write_object(pages_id, &Object::Dictionary(pages_dict))?;

        for (page, (page_id, content_id)) in pages.iter().zip(page_ids) {
            self.write_page(page_id, pages_id, content_id, page)?;
            self.write_page_content(content_id, page)?;
        }

        Ok(())
    }

    fn write_page(
        &mut self,
        page_id: ObjectId,
        parent_id: ObjectId,
        content_id: ObjectId,
        page: &Page,
    ) -> Result<()> {
        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::name("Page"));
        page_dict.set("Parent", parent_id);
        page_dict.set(
            "MediaBox",
            vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(page.width()),
                Object::Real(page.height()),
            ],
        );
        page_dict.set("Contents", content_id);

        // Only fonts the page draws with are listed
        let mut font_dict = Dictionary::new();
        for font in page.used_fonts() {
            let mut font_entry = Dictionary::new();
            font_entry.set("Type", Object::name("Font"));
            font_entry.set("Subtype", Object::name("Type1"));
            font_entry.set("BaseFont", Object::name(font.pdf_name()));
            if !font.is_symbolic() {
                font_entry.set(
                    "Encoding",
                    Object::name(TextEncoding::WinAnsiEncoding.pdf_name()),
                );
            }
            font_dict.set(font.pdf_name(), font_entry);
        }

        let mut resources = Dictionary::new();
        resources.set("Font", font_dict);
        page_dict.set("Resources", resources);

        self.write_object(page_id, &Object::Dictionary(page_dict))
    }

    fn write_page_content(&mut self, content_id: ObjectId, page: &Page) -> Result<()> {
        #[allow(unused_mut)]
        let mut stream = Stream::new(page.generate_content());

        if self.config.compress {
            #[cfg(feature = "compression")]
            stream.compress_flate()?;

            #[cfg(not(feature = "compression"))]
            debug!("compression requested but the `compression` feature is disabled");
        }

        self.write_object(content_id, &stream.into_object())
    }

    fn write_info(&mut self, info_id: ObjectId, document: &Document) -> Result<()> {
        let metadata = &document.metadata;
        let mut info_dict = Dictionary::new();

        let text_fields = [
            ("Title", &metadata.title),
            ("Author", &metadata.author),
            ("Subject", &metadata.subject),
            ("Creator", &metadata.creator),
            ("Producer", &metadata.producer),
        ];
        for (key, value) in text_fields {
            if let Some(value) = value {
                info_dict.set(key, value.as_str());
            }
        }

        if let Some(creation_date) = metadata.creation_date {
            info_dict.set("CreationDate", format_pdf_date(creation_date));
        }
        if let Some(mod_date) = metadata.modification_date {
            info_dict.set("ModDate", format_pdf_date(mod_date));
        }

        self.write_object(info_id, &Object::Dictionary(info_dict))
    }

    fn write_object(&mut self, id: ObjectId, object: &Object) -> Result<()> {
        self.xref_positions.insert(id, self.current_position);

        let header = format!("{} {} obj\n", id.number(), id.generation());
        self.write_bytes(header.as_bytes())?;
        self.write_object_value(object)?;
        self.write_bytes(b"\nendobj\n")?;
        Ok(())
    }

    fn write_object_value(&mut self, object: &Object) -> Result<()> {
        match object {
            Object::Null => self.write_bytes(b"null")?,
            Object::Boolean(b) => self.write_bytes(if *b { b"true" } else { b"false" })?,
            Object::Integer(i) => self.write_bytes(i.to_string().as_bytes())?,
            Object::Real(f) => self.write_bytes(format_real(*f).as_bytes())?,
            Object::String(s) => self.write_bytes(format_text_string(s).as_bytes())?,
            Object::Name(n) => {
                self.write_bytes(b"/")?;
                self.write_bytes(n.as_bytes())?;
            }
            Object::Array(arr) => {
                self.write_bytes(b"[")?;
                for (i, obj) in arr.iter().enumerate() {
                    if i > 0 {
                        self.write_bytes(b" ")?;
                    }
                    self.write_object_value(obj)?;
                }
                self.write_bytes(b"]")?;
            }
            Object::Dictionary(dict) => {
                self.write_bytes(b"<<")?;
                for (key, value) in dict.entries() {
                    self.write_bytes(b"\n/")?;
                    self.write_bytes(key.as_bytes())?;
                    self.write_bytes(b" ")?;
                    self.write_object_value(value)?;
                }
                self.write_bytes(b"\n>>")?;
            }
            Object::Stream(dict, data) => {
                self.write_object_value(&Object::Dictionary(dict.clone()))?;
                self.write_bytes(b"\nstream\n")?;
                self.write_bytes(data)?;
                self.write_bytes(b"\nendstream")?;
            }
            Object::Reference(id) => self.write_bytes(id.to_string().as_bytes())?,
        }
        Ok(())
    }

    fn write_xref(&mut self) -> Result<()> {
        let max_obj_num = self
            .xref_positions
            .keys()
            .map(|id| id.number())
            .max()
            .unwrap_or(0);

        self.write_bytes(b"xref\n")?;
        self.write_bytes(format!("0 {}\n", max_obj_num + 1).as_bytes())?;
        self.write_bytes(b"0000000000 65535 f \n")?;

        for obj_num in 1..=max_obj_num {
            let entry = match self.xref_positions.get(&ObjectId::new(obj_num, 0)) {
                Some(position) => format!("{position:010} 00000 n \n"),
                None => "0000000000 00000 f \n".to_string(),
            };
            self.write_bytes(entry.as_bytes())?;
        }

        Ok(())
    }

    fn write_trailer(
        &mut self,
        catalog_id: ObjectId,
        info_id: ObjectId,
        xref_position: u64,
    ) -> Result<()> {
        let max_obj_num = self
            .xref_positions
            .keys()
            .map(|id| id.number())
            .max()
            .unwrap_or(0);

        let mut trailer = Dictionary::new();
        trailer.set("Size", (max_obj_num + 1) as i64);
        trailer.set("Root", catalog_id);
        trailer.set("Info", info_id);

        self.write_bytes(b"trailer\n")?;
        self.write_object_value(&Object::Dictionary(trailer))?;
        self.write_bytes(b"\nstartxref\n")?;
        self.write_bytes(xref_position.to_string().as_bytes())?;
        self.write_bytes(b"\n%%EOF\n")?;

        Ok(())
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.current_position += data.len() as u64;
        Ok(())
    }
}

/// Formats a text string for dictionaries such as Info. Text that is
/// ASCII or Latin-1 reads the same in PDFDocEncoding and goes out as a
/// literal; anything else is written as UTF-16BE with a byte order mark.
fn format_text_string(text: &str) -> String {
    let is_latin1 = text
        .chars()
        .all(|ch| (ch as u32) < 0x80 || (0xA0..=0xFF).contains(&(ch as u32)));

    if is_latin1 {
        let bytes: Vec<u8> = text.chars().map(|ch| ch as u8).collect();
        format!("({})", escape_literal(&bytes))
    } else {
        let mut hex = String::from("<FEFF");
        for unit in text.encode_utf16() {
            hex.push_str(&format!("{unit:04X}"));
        }
        hex.push('>');
        hex
    }
}

fn format_real(value: f64) -> String {
    let formatted = format!("{value:.6}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Format a DateTime as a PDF date string (D:YYYYMMDDHHmmSSOHH'mm)
pub fn format_pdf_date(date: DateTime<Utc>) -> String {
    format!("{}+00'00", date.format("D:%Y%m%d%H%M%S"))
}
