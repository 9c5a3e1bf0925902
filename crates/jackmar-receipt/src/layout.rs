//! # Receipt Layout
//!
//! Places the receipt on A4 pages as a list of drawing operations.
//!
//! All coordinates are millimetres measured from the **top-left** corner of
//! the page; text `y` is the baseline. The PDF writer flips them into PDF
//! user space.
//!
//! ## Page Plan
//! ```text
//!   y=20  Jackmar Trading (20pt)
//!   y=30  Order Receipt
//!   y=40  Date: 10/18/2026
//!   y=50  ┌ header row ────────────────────────┐   orange fill, white bold text
//!         │ body rows ...                      │
//!         └────────────────────────────────────┘ = final_y
//!         (page break: new page, header row repeated at TOP_MARGIN)
//!   final_y+20  Grand Total: $…  (14pt)
//!   final_y+30  Thank you for your business!
//!   final_y+35  For any inquiries, …
//! ```

use crate::metrics::{fit_text, text_width_mm, Font, MM_PER_PT};
use crate::receipt::{Receipt, COLUMNS};

/// A4 width in millimetres.
pub const PAGE_WIDTH_MM: f32 = 210.0;
/// A4 height in millimetres.
pub const PAGE_HEIGHT_MM: f32 = 297.0;

const CENTER_X: f32 = PAGE_WIDTH_MM / 2.0;
const MARGIN_X: f32 = 14.0;
const TOP_MARGIN: f32 = 15.0;
const BOTTOM_MARGIN: f32 = 15.0;
const TABLE_START_Y: f32 = 50.0;
const ROW_HEIGHT: f32 = 8.0;
const CELL_PADDING: f32 = 1.8;
const CELL_FONT_PT: f32 = 10.0;
/// Space the grand total and footer need below the table.
const TRAILER_HEIGHT: f32 = 35.0;
/// Share of the table width given to each column.
const COLUMN_SHARES: [f32; 4] = [0.4, 0.2, 0.2, 0.2];

const HEADER_FILL: Rgb = Rgb(245, 164, 37);
const WHITE: Rgb = Rgb(255, 255, 255);
const BODY_TEXT: Rgb = Rgb(20, 20, 20);
const GRID_LINE: Rgb = Rgb(200, 200, 200);
const BLACK: Rgb = Rgb(0, 0, 0);

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// One drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Text with its left edge at `x` and baseline at `y`.
    Text {
        x: f32,
        y: f32,
        size_pt: f32,
        font: Font,
        color: Rgb,
        text: String,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
        line_width: f32,
    },
}

/// A single page's operations, in painting order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Every string drawn on this page.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// A laid-out document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    pub width_mm: f32,
    pub height_mm: f32,
    pub pages: Vec<Page>,
}

/// Lays out a receipt across as many pages as its rows need.
pub fn layout_receipt(receipt: &Receipt) -> Document {
    let mut writer = PageWriter::new();

    writer.centered(&receipt.branding.store_name, 20.0, 20.0, Font::Regular, BLACK);
    writer.centered(&receipt.branding.title, 30.0, 12.0, Font::Regular, BLACK);
    writer.centered(&receipt.date_line(), 40.0, 12.0, Font::Regular, BLACK);

    let columns = column_bounds();
    let mut y = TABLE_START_Y;

    let headings = COLUMNS.map(String::from);
    writer.row(&columns, y, &headings, RowStyle::Header);
    y += ROW_HEIGHT;

    for row in &receipt.rows {
        if y + ROW_HEIGHT > PAGE_HEIGHT_MM - BOTTOM_MARGIN {
            writer.new_page();
            y = TOP_MARGIN;
            writer.row(&columns, y, &headings, RowStyle::Header);
            y += ROW_HEIGHT;
        }
        writer.row(&columns, y, &row.cells(), RowStyle::Body);
        y += ROW_HEIGHT;
    }

    let mut final_y = y;
    if final_y + TRAILER_HEIGHT > PAGE_HEIGHT_MM - BOTTOM_MARGIN {
        writer.new_page();
        final_y = TOP_MARGIN;
    }

    writer.centered(&receipt.grand_total_line(), final_y + 20.0, 14.0, Font::Regular, BLACK);
    writer.centered(&receipt.branding.thank_you, final_y + 30.0, 10.0, Font::Regular, BLACK);
    writer.centered(&receipt.branding.contact_line(), final_y + 35.0, 10.0, Font::Regular, BLACK);

    Document {
        title: receipt.document_title(),
        width_mm: PAGE_WIDTH_MM,
        height_mm: PAGE_HEIGHT_MM,
        pages: writer.finish(),
    }
}

/// (left x, width) of each column.
fn column_bounds() -> [(f32, f32); 4] {
    let table_width = PAGE_WIDTH_MM - 2.0 * MARGIN_X;
    let mut x = MARGIN_X;
    COLUMN_SHARES.map(|share| {
        let width = table_width * share;
        let bounds = (x, width);
        x += width;
        bounds
    })
}

#[derive(Debug, Clone, Copy)]
enum RowStyle {
    Header,
    Body,
}

struct PageWriter {
    pages: Vec<Page>,
}

impl PageWriter {
    fn new() -> Self {
        PageWriter {
            pages: vec![Page::default()],
        }
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    fn centered(&mut self, text: &str, baseline: f32, size_pt: f32, font: Font, color: Rgb) {
        self.centered_in(text, CENTER_X, baseline, size_pt, font, color);
    }

    fn centered_in(&mut self, text: &str, center_x: f32, baseline: f32, size_pt: f32, font: Font, color: Rgb) {
        let width = text_width_mm(text, font, size_pt);
        self.push(DrawOp::Text {
            x: center_x - width / 2.0,
            y: baseline,
            size_pt,
            font,
            color,
            text: text.to_string(),
        });
    }

    fn row(&mut self, columns: &[(f32, f32); 4], top: f32, cells: &[String; 4], style: RowStyle) {
        let (font, text_color) = match style {
            RowStyle::Header => (Font::Bold, WHITE),
            RowStyle::Body => (Font::Regular, BODY_TEXT),
        };

        if let RowStyle::Header = style {
            let (left, _) = columns[0];
            let (last_left, last_width) = columns[3];
            self.push(DrawOp::FillRect {
                x: left,
                y: top,
                width: last_left + last_width - left,
                height: ROW_HEIGHT,
                color: HEADER_FILL,
            });
        }

        // Vertically centre the cap height inside the row.
        let baseline = top + ROW_HEIGHT / 2.0 + CELL_FONT_PT * MM_PER_PT * 0.35;

        for (&(left, width), cell) in columns.iter().zip(cells.iter()) {
            self.push(DrawOp::StrokeRect {
                x: left,
                y: top,
                width,
                height: ROW_HEIGHT,
                color: GRID_LINE,
                line_width: 0.1,
            });
            let text = fit_text(cell, font, CELL_FONT_PT, width - 2.0 * CELL_PADDING);
            self.centered_in(&text, left + width / 2.0, baseline, CELL_FONT_PT, font, text_color);
        }
    }

    fn finish(self) -> Vec<Page> {
        self.pages
    }
}
