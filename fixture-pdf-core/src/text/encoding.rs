use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    WinAnsiEncoding,
}

impl TextEncoding {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            TextEncoding::WinAnsiEncoding => "WinAnsiEncoding",
        }
    }

    /// Encodes `text` as single-byte codes. Characters outside the encoding
    /// become `?`.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            TextEncoding::WinAnsiEncoding => text.chars().map(win_ansi_byte).collect(),
        }
    }
}

fn win_ansi_byte(ch: char) -> u8 {
    match ch as u32 {
        0x00..=0x7F => ch as u8,
        0xA0..=0xFF => ch as u8,
        0x20AC => 0x80, // Euro sign
        0x201A => 0x82, // Single low quotation mark
        0x0192 => 0x83, // Latin small letter f with hook
        0x201E => 0x84, // Double low quotation mark
        0x2026 => 0x85, // Horizontal ellipsis
        0x2020 => 0x86, // Dagger
        0x2021 => 0x87, // Double dagger
        0x02C6 => 0x88, // Circumflex accent
        0x2030 => 0x89, // Per mille sign
        0x0160 => 0x8A, // Latin capital letter S with caron
        0x2039 => 0x8B, // Single left angle quotation mark
        0x0152 => 0x8C, // Latin capital ligature OE
        0x017D => 0x8E, // Latin capital letter Z with caron
        0x2018 => 0x91, // Left single quotation mark
        0x2019 => 0x92, // Right single quotation mark
        0x201C => 0x93, // Left double quotation mark
        0x201D => 0x94, // Right double quotation mark
        0x2022 => 0x95, // Bullet
        0x2013 => 0x96, // En dash
        0x2014 => 0x97, // Em dash
        0x02DC => 0x98, // Small tilde
        0x2122 => 0x99, // Trade mark sign
        0x0161 => 0x9A, // Latin small letter s with caron
        0x203A => 0x9B, // Single right angle quotation mark
        0x0153 => 0x9C, // Latin small ligature oe
        0x017E => 0x9E, // Latin small letter z with caron
        0x0178 => 0x9F, // Latin capital letter Y with diaeresis
        _ => b'?',
    }
}

/// Renders encoded bytes as the body of a PDF literal string (without the
/// surrounding parentheses).
pub fn escape_literal(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &byte in bytes {
        match byte {
            b'(' => out.push_str("\\("),
            b')' => out.push_str("\\)"),
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            0x20..=0x7E => out.push(byte as char),
            // Writing to a String cannot fail
            _ => {
                let _ = write!(out, "\\{byte:03o}");
            }
        }
    }
    out
}
