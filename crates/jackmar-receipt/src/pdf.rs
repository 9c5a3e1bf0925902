//! # PDF Writer
//!
//! Serializes a laid-out [`Document`] as a PDF 1.4 file using the two
//! standard Helvetica faces, so no font data is embedded.
//!
//! ## Object Layout
//! ```text
//!  1        Catalog   → 2
//!  2        Pages     → Kids [page objects]
//!  3        Font F1   Helvetica       (WinAnsiEncoding)
//!  4        Font F2   Helvetica-Bold  (WinAnsiEncoding)
//!  5 + 2i   Page i    → content 6 + 2i
//!  6 + 2i   Content stream of page i
//!  last     Info      /Title /Producer
//!  xref, trailer, startxref, %%EOF
//! ```

use std::fmt::Write as _;

use crate::layout::{Document, DrawOp, Rgb};
use crate::metrics::{Font, MM_PER_PT};

const FIRST_PAGE_OBJECT: usize = 5;

/// Renders `doc` to PDF bytes.
pub fn render_pdf(doc: &Document) -> Vec<u8> {
    let page_count = doc.pages.len();
    let info_object = FIRST_PAGE_OBJECT + 2 * page_count;
    let width_pt = doc.width_mm / MM_PER_PT;
    let height_pt = doc.height_mm / MM_PER_PT;

    let mut out = ObjectWriter::new();

    let kids: Vec<String> = (0..page_count)
        .map(|i| format!("{} 0 R", page_object(i)))
        .collect();

    out.object(1, "<< /Type /Catalog /Pages 2 0 R >>");
    out.object(
        2,
        &format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            page_count
        ),
    );
    for (id, font) in [(3, Font::Regular), (4, Font::Bold)] {
        out.object(
            id,
            &format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                font.base_font()
            ),
        );
    }

    for (i, page) in doc.pages.iter().enumerate() {
        let content_id = page_object(i) + 1;
        out.object(
            page_object(i),
            &format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
                num(width_pt),
                num(height_pt),
                content_id
            ),
        );

        let mut content = String::new();
        for op in &page.ops {
            write_op(&mut content, op, doc.height_mm);
        }
        // Escaping keeps content streams pure ASCII.
        out.stream(content_id, content.as_bytes());
    }

    out.object(
        info_object,
        &format!(
            "<< /Title ({}) /Producer (jackmar-receipt) >>",
            escape_literal(&doc.title)
        ),
    );

    out.finish(info_object)
}

fn page_object(index: usize) -> usize {
    FIRST_PAGE_OBJECT + 2 * index
}

/// Appends the content-stream operators for one draw op.
fn write_op(content: &mut String, op: &DrawOp, page_height_mm: f32) {
    // `write!` into a String cannot fail.
    let _ = match op {
        DrawOp::Text {
            x,
            y,
            size_pt,
            font,
            color,
            text,
        } => writeln!(
            content,
            "BT /{} {} Tf {} rg {} {} Td ({}) Tj ET",
            font.resource_name(),
            num(*size_pt),
            rgb(*color),
            num(x / MM_PER_PT),
            num((page_height_mm - y) / MM_PER_PT),
            escape_literal(text)
        ),
        DrawOp::FillRect {
            x,
            y,
            width,
            height,
            color,
        } => writeln!(
            content,
            "{} rg {} {} {} {} re f",
            rgb(*color),
            num(x / MM_PER_PT),
            num((page_height_mm - y - height) / MM_PER_PT),
            num(width / MM_PER_PT),
            num(height / MM_PER_PT)
        ),
        DrawOp::StrokeRect {
            x,
            y,
            width,
            height,
            color,
            line_width,
        } => writeln!(
            content,
            "{} RG {} w {} {} {} {} re S",
            rgb(*color),
            num(line_width / MM_PER_PT),
            num(x / MM_PER_PT),
            num((page_height_mm - y - height) / MM_PER_PT),
            num(width / MM_PER_PT),
            num(height / MM_PER_PT)
        ),
    };
}

fn num(value: f32) -> String {
    format!("{:.2}", value)
}

fn rgb(Rgb(r, g, b): Rgb) -> String {
    format!(
        "{} {} {}",
        num(f32::from(r) / 255.0),
        num(f32::from(g) / 255.0),
        num(f32::from(b) / 255.0)
    )
}

/// Escapes a string for a PDF literal `( … )`.
///
/// Latin-1 characters are written as octal escapes (WinAnsi shares those
/// code points); anything else becomes `?`.
fn escape_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '(' | ')' | '\\' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            ' '..='~' => escaped.push(ch),
            '\u{A0}'..='\u{FF}' => {
                let _ = write!(escaped, "\\{:03o}", ch as u32);
            }
            _ => escaped.push('?'),
        }
    }
    escaped
}

/// Tracks byte offsets of numbered objects for the xref table.
struct ObjectWriter {
    buf: Vec<u8>,
    offsets: Vec<(usize, usize)>,
}

impl ObjectWriter {
    fn new() -> Self {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        ObjectWriter {
            buf,
            offsets: Vec::new(),
        }
    }

    fn object(&mut self, id: usize, body: &str) {
        self.offsets.push((id, self.buf.len()));
        self.buf
            .extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", id, body).as_bytes());
    }

    fn stream(&mut self, id: usize, data: &[u8]) {
        self.offsets.push((id, self.buf.len()));
        self.buf.extend_from_slice(
            format!("{} 0 obj\n<< /Length {} >>\nstream\n", id, data.len()).as_bytes(),
        );
        self.buf.extend_from_slice(data);
        self.buf.extend_from_slice(b"\nendstream\nendobj\n");
    }

    fn finish(mut self, info_object: usize) -> Vec<u8> {
        self.offsets.sort_unstable();
        let size = self.offsets.len() + 1;
        let xref_offset = self.buf.len();

        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", size);
        for (_, offset) in &self.offsets {
            let _ = write!(xref, "{:010} 00000 n \n", offset);
        }
        let _ = write!(
            xref,
            "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            size, info_object, xref_offset
        );

        self.buf.extend_from_slice(xref.as_bytes());
        self.buf
    }
}
