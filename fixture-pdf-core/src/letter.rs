//! The employee warning letter fixture.
//!
//! Every string and coordinate here is fixed; the only input is the date
//! printed under the company address. Downstream extraction tests match on
//! these exact strings, so they must not be reflowed or reworded.

use crate::canvas::Canvas;
use crate::document::Document;
use crate::error::Result;
use crate::text::Font;
use crate::writer::WriterConfig;
use chrono::{Local, NaiveDate, NaiveTime};
use std::path::Path;
use tracing::{debug, info};

pub const DEFAULT_FILENAME: &str = "test_warning_letter.pdf";

pub const TITLE: &str = "Employee Warning Letter";
pub const SUBJECT: &str = "RE: Written Warning - Safety Protocol Violation";

pub const LEFT_MARGIN: f64 = 50.0;
pub const BOTTOM_MARGIN: f64 = 50.0;
pub const LEADING: f64 = 15.0;

/// Header lines in Helvetica 10, as (distance below the top edge, text).
const COMPANY_LINES: [(f64, &str); 3] = [
    (80.0, "Acme Corporation"),
    (95.0, "123 Business Street"),
    (110.0, "San Francisco, CA 94105"),
];
const DATE_OFFSET: f64 = 140.0;
const RECIPIENT_LINES: [(f64, &str); 3] = [
    (170.0, "To: John Doe"),
    (185.0, "Employee ID: 12345"),
    (200.0, "Department: Operations"),
];
const TITLE_OFFSET: f64 = 50.0;
const SUBJECT_OFFSET: f64 = 230.0;
const BODY_OFFSET: f64 = 260.0;

pub const BODY: [&str; 26] = [
    "Dear Mr. Doe,",
    "",
    "This letter serves as a written warning regarding your violation of company",
    "safety protocols.",
    "",
    "On [Date], you were observed not wearing the required Personal Protective",
    "Equipment (PPE) while working in the chemical handling area. This constitutes",
    "a serious violation of our safety policies and California Occupational Safety",
    "and Health Administration (Cal/OSHA) regulations.",
    "",
    "Specifically, you violated:",
    "• Cal. Lab. Code § 6400 - General duty to provide safe workplace",
    "• Cal. Code Regs. Tit. 8 § 3380 - Personal Protective Equipment requirements",
    "",
    "This is your first written warning. Future violations may result in further",
    "disciplinary action, up to and including termination.",
    "",
    "You are required to:",
    "1. Review the company safety manual",
    "2. Complete additional safety training",
    "3. Sign this acknowledgment",
    "",
    "Please contact HR if you have any questions.",
    "",
    "Sincerely,",
    "HR Department",
];

/// Where and how a run of body lines is laid out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyLayout {
    pub x: f64,
    /// Baseline of the first line.
    pub start_y: f64,
    pub leading: f64,
    /// A line whose baseline would fall below this starts a new page.
    pub bottom_margin: f64,
    /// Baseline of the first line on a continuation page.
    pub top_reset: f64,
    pub font: Font,
    pub size: f64,
}

impl BodyLayout {
    /// The letter body layout for a page of the given height.
    pub fn for_page_height(height: f64) -> Self {
        Self {
            x: LEFT_MARGIN,
            start_y: height - BODY_OFFSET,
            leading: LEADING,
            bottom_margin: BOTTOM_MARGIN,
            top_reset: height - TITLE_OFFSET,
            font: Font::Helvetica,
            size: 10.0,
        }
    }
}

/// Draws `lines` top to bottom, breaking onto a new page whenever the
/// cursor has dropped below the bottom margin. Blank lines still advance
/// the cursor.
///
/// A new page resets the canvas to its initial font, so the layout font is
/// selected again after every break.
///
/// Returns the number of page breaks taken.
pub fn flow_lines(canvas: &mut Canvas, lines: &[&str], layout: &BodyLayout) -> Result<usize> {
    canvas.set_font(layout.font, layout.size)?;
    let mut cursor = layout.start_y;
    let mut breaks = 0;

    for line in lines {
        if cursor < layout.bottom_margin {
            canvas.show_page();
            canvas.set_font(layout.font, layout.size)?;
            cursor = layout.top_reset;
            breaks += 1;
            debug!(page = canvas.page_count(), "body continued on new page");
        }
        canvas.draw_string(layout.x, cursor, line)?;
        cursor -= layout.leading;
    }

    Ok(breaks)
}

/// The warning letter, dated `date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarningLetter {
    date: NaiveDate,
}

impl WarningLetter {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Dated with the current local date.
    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The date line, e.g. `Date: October 18, 2026`.
    pub fn date_line(&self) -> String {
        format!("Date: {}", self.date.format("%B %d, %Y"))
    }

    /// Issues every drawing call of the letter onto `canvas`.
    pub fn draw(&self, canvas: &mut Canvas) -> Result<()> {
        let height = canvas.height();

        canvas.set_font(Font::HelveticaBold, 16.0)?;
        canvas.draw_string(LEFT_MARGIN, height - TITLE_OFFSET, TITLE)?;

        canvas.set_font(Font::Helvetica, 10.0)?;
        for (offset, line) in COMPANY_LINES {
            canvas.draw_string(LEFT_MARGIN, height - offset, line)?;
        }
        canvas.draw_string(LEFT_MARGIN, height - DATE_OFFSET, &self.date_line())?;
        for (offset, line) in RECIPIENT_LINES {
            canvas.draw_string(LEFT_MARGIN, height - offset, line)?;
        }

        canvas.set_font(Font::HelveticaBold, 12.0)?;
        canvas.draw_string(LEFT_MARGIN, height - SUBJECT_OFFSET, SUBJECT)?;

        flow_lines(canvas, &BODY, &BodyLayout::for_page_height(height))?;
        Ok(())
    }

    /// Builds the finished document. Metadata dates are pinned to midnight
    /// UTC of the letter date, so a given date always yields the same bytes.
    pub fn render(&self, config: WriterConfig) -> Result<Document> {
        let mut canvas = Canvas::letter();
        self.draw(&mut canvas)?;

        let mut document = canvas.finish();
        document.set_title(TITLE);
        document.set_subject(SUBJECT);
        document.set_author("HR Department");
        document.set_dates(self.date.and_time(NaiveTime::MIN).and_utc());
        document.set_writer_config(config);
        Ok(document)
    }

    pub fn save(&self, path: impl AsRef<Path>, config: WriterConfig) -> Result<Document> {
        let path = path.as_ref();
        let document = self.render(config)?;
        document.save(path)?;
        info!(
            path = %path.display(),
            pages = document.page_count(),
            date = %self.date,
            "warning letter saved"
        );
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter() -> WarningLetter {
        WarningLetter::new(NaiveDate::from_ymd_opt(2026, 10, 8).unwrap())
    }

    fn page_text(doc: &Document, index: usize) -> String {
        String::from_utf8_lossy(&doc.pages()[index].generate_content()).into_owned()
    }

    #[test]
    fn test_date_line_is_zero_padded() {
        assert_eq!(letter().date_line(), "Date: October 08, 2026");
    }

    #[test]
    fn test_letter_fits_on_one_page() {
        let doc = letter().render(WriterConfig::uncompressed()).unwrap();
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn test_header_coordinates() {
        let doc = letter().render(WriterConfig::uncompressed()).unwrap();
        let content = page_text(&doc, 0);

        let expected = [
            "/Helvetica-Bold 16 Tf\n50.00 742.00 Td\n(Employee Warning Letter) Tj",
            "/Helvetica 10 Tf\n50.00 712.00 Td\n(Acme Corporation) Tj",
            "/Helvetica 10 Tf\n50.00 697.00 Td\n(123 Business Street) Tj",
            "/Helvetica 10 Tf\n50.00 682.00 Td\n(San Francisco, CA 94105) Tj",
            "/Helvetica 10 Tf\n50.00 652.00 Td\n(Date: October 08, 2026) Tj",
            "/Helvetica 10 Tf\n50.00 622.00 Td\n(To: John Doe) Tj",
            "/Helvetica 10 Tf\n50.00 607.00 Td\n(Employee ID: 12345) Tj",
            "/Helvetica 10 Tf\n50.00 592.00 Td\n(Department: Operations) Tj",
            "/Helvetica-Bold 12 Tf\n50.00 562.00 Td\n(RE: Written Warning - Safety Protocol Violation) Tj",
        ];
        for fragment in expected {
            assert!(content.contains(fragment), "missing: {fragment}");
        }
    }

    #[test]
    fn test_body_lines_in_order() {
        let doc = letter().render(WriterConfig::uncompressed()).unwrap();
        let content = page_text(&doc, 0);

        assert!(content.contains("50.00 532.00 Td\n(Dear Mr. Doe,) Tj"));
        assert!(content.contains("50.00 157.00 Td\n(HR Department) Tj"));
        assert!(content.contains("(\\225 Cal. Lab. Code \\247 6400 - General duty to provide safe workplace) Tj"));
        assert!(content.contains("(Equipment \\(PPE\\) while working in the chemical handling area. This constitutes) Tj"));

        let first = content.find("(Dear Mr. Doe,)").unwrap();
        let middle = content.find("(You are required to:)").unwrap();
        let last = content.find("(HR Department)").unwrap();
        assert!(first < middle && middle < last);

        // Title, 3 company lines, date, 3 recipient lines, subject, body
        assert_eq!(content.matches(" Tj\n").count(), 9 + BODY.len());
    }

    #[test]
    fn test_flow_lines_breaks_pages() {
        let mut canvas = Canvas::letter();
        let layout = BodyLayout {
            start_y: 100.0,
            ..BodyLayout::for_page_height(792.0)
        };
        let lines = ["one", "two", "three", "four", "five"];

        // 100, 85, 70, 55, then 40 < 50 breaks
        let breaks = flow_lines(&mut canvas, &lines, &layout).unwrap();
        assert_eq!(breaks, 1);

        let doc = canvas.finish();
        assert_eq!(doc.page_count(), 2);
        let second = page_text(&doc, 1);
        assert!(second.contains("/Helvetica 10 Tf\n50.00 742.00 Td\n(five) Tj"));
        assert!(!page_text(&doc, 0).contains("(five)"));
    }

    #[test]
    fn test_flow_lines_checks_before_drawing() {
        let mut canvas = Canvas::letter();
        let layout = BodyLayout {
            start_y: 49.0,
            ..BodyLayout::for_page_height(792.0)
        };

        let breaks = flow_lines(&mut canvas, &["late"], &layout).unwrap();
        assert_eq!(breaks, 1);

        let doc = canvas.finish();
        assert_eq!(doc.page_count(), 2);
        assert!(doc.pages()[0].is_blank());
    }

    #[test]
    fn test_flow_lines_margin_is_inclusive() {
        let mut canvas = Canvas::letter();
        let layout = BodyLayout {
            start_y: 50.0,
            ..BodyLayout::for_page_height(792.0)
        };

        assert_eq!(flow_lines(&mut canvas, &["edge"], &layout).unwrap(), 0);
    }

    #[test]
    fn test_render_is_deterministic_per_date() {
        let config = WriterConfig::uncompressed();
        let mut first = Vec::new();
        let mut second = Vec::new();
        letter().render(config.clone()).unwrap().write(&mut first).unwrap();
        letter().render(config).unwrap().write(&mut second).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_metadata() {
        let doc = letter().render(WriterConfig::default()).unwrap();
        let meta = doc.metadata();
        assert_eq!(meta.title.as_deref(), Some(TITLE));
        assert_eq!(meta.subject.as_deref(), Some(SUBJECT));
        assert_eq!(
            meta.creation_date.map(|d| d.date_naive()),
            Some(letter().date())
        );
    }
}
