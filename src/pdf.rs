//! A minimal PDF 1.4 writer for plain text reports.
//!
//! Output is one or more A4 pages of 10pt Courier using the built-in
//! `WinAnsiEncoding`, so no font has to be embedded. Characters the encoding
//! cannot represent are written as `?`.

use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::error::Result;

const PAGE_WIDTH: u32 = 595;
const PAGE_HEIGHT: u32 = 842;
const MARGIN_LEFT: u32 = 50;
const TITLE_Y: u32 = 800;
const FIRST_LINE_Y: u32 = 780;
const BOTTOM_Y: u32 = 40;
const LEADING: u32 = 14;
const FONT_SIZE: u32 = 10;
/// Courier advances 0.6em per glyph.
const MAX_COLUMNS: usize = ((PAGE_WIDTH - 2 * MARGIN_LEFT) * 10 / (FONT_SIZE * 6)) as usize;

const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const FONT_ID: usize = 3;

/// Number of body lines that fit on one page.
pub const LINES_PER_PAGE: usize = ((FIRST_LINE_Y - BOTTOM_Y) / LEADING + 1) as usize;

/// Collects a title and body lines, then lays them out as a PDF document.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    title: String,
    lines: Vec<String>,
}

impl PdfWriter {
    pub fn new(title: impl Into<String>) -> Self {
        PdfWriter {
            title: title.into(),
            lines: Vec::new(),
        }
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Adds each line of `text` as a separate body line.
    pub fn push_text(&mut self, text: &str) {
        self.lines.extend(text.lines().map(str::to_owned));
    }

    pub fn page_count(&self) -> usize {
        self.lines.len().div_ceil(LINES_PER_PAGE).max(1)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut truncated = 0usize;
        let mut objects: Vec<Vec<u8>> = Vec::new();

        let pages: Vec<&[String]> = if self.lines.is_empty() {
            vec![&self.lines[..]]
        } else {
            self.lines.chunks(LINES_PER_PAGE).collect()
        };
        // Objects 1-3 are fixed; each page adds a page object and its contents.
        let page_ids: Vec<usize> = (0..pages.len()).map(|n| FONT_ID + 1 + 2 * n).collect();

        objects.push(
            format!("<< /Type /Catalog /Pages {PAGES_ID} 0 R >>\n").into_bytes(),
        );
        let kids = page_ids
            .iter()
            .map(|id| format!("{id} 0 R"))
            .collect::<Vec<_>>()
            .join(" ");
        objects.push(
            format!("<< /Type /Pages /Kids [{}] /Count {} >>\n", kids, pages.len()).into_bytes(),
        );
        objects.push(
            b"<< /Type /Font /Subtype /Type1 /BaseFont /Courier /Encoding /WinAnsiEncoding >>\n"
                .to_vec(),
        );

        for (page, page_id) in pages.iter().zip(&page_ids) {
            let contents_id = page_id + 1;
            objects.push(
                format!(
                    "<< /Type /Page /Parent {PAGES_ID} 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
                     /Resources << /Font << /F1 {FONT_ID} 0 R >> >> /Contents {contents_id} 0 R >>\n"
                )
                .into_bytes(),
            );

            let mut stream = Vec::with_capacity(4096);
            stream.extend_from_slice(format!("BT\n/F1 {FONT_SIZE} Tf\n").as_bytes());
            text_at(&mut stream, TITLE_Y, &self.title, &mut truncated);
            let mut y = FIRST_LINE_Y;
            for line in page.iter() {
                text_at(&mut stream, y, line, &mut truncated);
                y = y.saturating_sub(LEADING);
            }
            stream.extend_from_slice(b"ET\n");

            let mut contents = format!("<< /Length {} >>\nstream\n", stream.len()).into_bytes();
            contents.extend_from_slice(&stream);
            contents.extend_from_slice(b"\nendstream\n");
            objects.push(contents);
        }

        if truncated > 0 {
            warn!("{} line(s) longer than {} columns were cut", truncated, MAX_COLUMNS);
        }
        assemble(&objects)
    }

    pub fn write_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_bytes())?;
        info!("wrote {} page PDF to {}", self.page_count(), path.display());
        Ok(())
    }
}

fn text_at(stream: &mut Vec<u8>, y: u32, text: &str, truncated: &mut usize) {
    let mut encoded = encode_win_ansi(text);
    if encoded.len() > MAX_COLUMNS {
        encoded.truncate(MAX_COLUMNS);
        *truncated += 1;
    }
    stream.extend_from_slice(format!("1 0 0 1 {MARGIN_LEFT} {y} Tm (").as_bytes());
    stream.extend_from_slice(&escape(&encoded));
    stream.extend_from_slice(b") Tj\n");
}

/// Serializes numbered objects followed by the xref table and trailer.
fn assemble(objects: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Vec::with_capacity(8192);
    out.extend_from_slice(b"%PDF-1.4\n");

    let mut offsets = Vec::with_capacity(objects.len());
    for (n, data) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", n + 1).as_bytes());
        out.extend_from_slice(data);
        out.extend_from_slice(b"endobj\n");
    }

    let xref = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root {CATALOG_ID} 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref
        )
        .as_bytes(),
    );
    out
}

/// Escapes the bytes that are special inside a PDF literal string.
fn escape(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len() + 8);
    for &b in bytes {
        match b {
            b'(' | b')' | b'\\' => {
                out.push(b'\\');
                out.push(b);
            }
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\t' => out.extend_from_slice(b"\\t"),
            _ => out.push(b),
        }
    }
    out
}

/// Maps text to WinAnsi (Windows-1252) bytes.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7E}' | '\t' => c as u8,
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
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
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(b"a(b)c\\d"), b"a\\(b\\)c\\\\d".to_vec());
        assert_eq!(escape(b"\t"), b"\\t".to_vec());
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("José"), vec![b'J', b'o', b's', 0xE9]);
        assert_eq!(encode_win_ansi("–€"), vec![0x96, 0x80]);
        assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
    }

    #[test]
    fn test_single_page_structure() {
        let mut pdf = PdfWriter::new("Report (draft)");
        pdf.push_text("Size: 3\nCapacity: 4");
        let bytes = pdf.to_bytes();

        assert!(bytes.starts_with(b"%PDF-1.4\n"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        assert_eq!(pdf.page_count(), 1);
        assert!(contains(&bytes, b"/Kids [4 0 R] /Count 1"));
        assert!(contains(&bytes, b"(Report \\(draft\\)) Tj"));
        assert!(contains(&bytes, b"1 0 0 1 50 780 Tm (Size: 3) Tj"));
        assert!(contains(&bytes, b"1 0 0 1 50 766 Tm (Capacity: 4) Tj"));
        assert!(contains(&bytes, b"/Size 6 /Root 1 0 R"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let mut pdf = PdfWriter::new("t");
        pdf.push_line("line");
        let bytes = pdf.to_bytes();
        let text = String::from_utf8_lossy(&bytes);

        let xref_at = text.rfind("startxref\n").unwrap() + "startxref\n".len();
        let xref: usize = text[xref_at..].lines().next().unwrap().parse().unwrap();
        assert!(text[xref..].starts_with("xref\n0 6\n"));

        let entries: Vec<usize> = text[xref..]
            .lines()
            .skip(3)
            .take(5)
            .map(|l| l[..10].parse().unwrap())
            .collect();
        for (n, offset) in entries.iter().enumerate() {
            assert!(text[*offset..].starts_with(&format!("{} 0 obj\n", n + 1)));
        }
    }

    #[test]
    fn test_paginates_long_reports() {
        let mut pdf = PdfWriter::new("t");
        for i in 0..(LINES_PER_PAGE * 2 + 1) {
            pdf.push_line(format!("line {i}"));
        }
        let bytes = pdf.to_bytes();
        assert_eq!(pdf.page_count(), 3);
        assert!(contains(&bytes, b"/Kids [4 0 R 6 0 R 8 0 R] /Count 3"));
        assert!(contains(&bytes, format!("(line {}) Tj", LINES_PER_PAGE * 2).as_bytes()));
    }

    #[test]
    fn test_empty_body_still_one_page() {
        let pdf = PdfWriter::new("only a title");
        assert_eq!(pdf.page_count(), 1);
        assert!(contains(&pdf.to_bytes(), b"/Count 1"));
    }

    #[test]
    fn test_long_lines_are_cut() {
        let mut pdf = PdfWriter::new("t");
        pdf.push_line("x".repeat(MAX_COLUMNS + 10));
        let bytes = pdf.to_bytes();
        let expected = format!("({}) Tj", "x".repeat(MAX_COLUMNS));
        assert!(contains(&bytes, expected.as_bytes()));
    }

    #[test]
    fn test_write_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        let mut pdf = PdfWriter::new("t");
        pdf.push_line("hello");
        pdf.write_to_path(&path).unwrap();
        assert_eq!(fs::read(&path).unwrap(), pdf.to_bytes());
    }
}
