//! Tables that continue across page boundaries.
//!
//! The header band is repeated at the top of every continuation page and the
//! alternating row fill restarts from the first variant each time the header
//! is drawn, so striping is per page rather than per table.
//!
//! ## Example
//!
//! ```rust
//! use report_core::layout::{render_table, Align, Canvas, ColumnSpec, PageSetup, TableRow, TableStyle};
//!
//! let columns = vec![
//!     ColumnSpec::new("Item", 400.0, Align::Left),
//!     ColumnSpec::new("Total", 112.0, Align::Right),
//! ];
//! let rows: Vec<TableRow> = (0..100)
//!     .map(|i| TableRow::new(vec![format!("Item {i}"), format!("{i}.00")]))
//!     .collect();
//!
//! let mut canvas = Canvas::new(PageSetup::default());
//! let layout = render_table(&mut canvas, &columns, &rows, None, &TableStyle::default());
//! assert!(layout.header_draws > 1);
//! assert_eq!(layout.rows_per_page.iter().sum::<usize>(), 100);
//! ```

use serde::{Deserialize, Serialize};

use super::canvas::Canvas;
use super::document::{Align, DrawOp, Stroke, TextStyle};
use super::metrics::fit_width;
use super::{palette, Color};

/// One column: header label, width in points, alignment of its cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub label: String,
    pub width: f64,
    pub align: Align,
}

impl ColumnSpec {
    pub fn new(label: impl Into<String>, width: f64, align: Align) -> Self {
        ColumnSpec {
            label: label.into(),
            width,
            align,
        }
    }
}

/// Cell texts for one row, one per column. Missing cells render empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<String>,
}

impl TableRow {
    pub fn new(cells: Vec<String>) -> Self {
        TableRow { cells }
    }
}

/// Band heights, fonts and fills.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableStyle {
    pub header_height: f64,
    pub row_height: f64,
    pub cell_padding: f64,
    pub font_size: f64,
    pub header_fill: Color,
    pub header_text: Color,
    /// Even / odd row fills, counted from the last header
    pub row_fills: [Color; 2],
    pub total_fill: Color,
    pub rule: Stroke,
}

impl Default for TableStyle {
    fn default() -> Self {
        TableStyle {
            header_height: 22.0,
            row_height: 18.0,
            cell_padding: 4.0,
            font_size: 9.0,
            header_fill: palette::PRIMARY,
            header_text: palette::WHITE,
            row_fills: [palette::ROW_PRIMARY, palette::ROW_ALTERNATE],
            total_fill: palette::TOTAL_FILL,
            rule: Stroke::new(0.5, palette::RULE),
        }
    }
}

/// Where a table ended up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableLayout {
    /// Page indices the table touched, in order
    pub pages: Vec<usize>,
    /// Data rows placed on each entry of `pages`
    pub rows_per_page: Vec<usize>,
    /// Times the header band was drawn (1 + continuation pages)
    pub header_draws: usize,
    /// Page index of the total row, when one was given
    pub total_row_page: Option<usize>,
}

/// Left edge of each column relative to the table origin.
pub fn column_offsets(columns: &[ColumnSpec]) -> Vec<f64> {
    columns
        .iter()
        .scan(0.0, |acc, col| {
            let x = *acc;
            *acc += col.width;
            Some(x)
        })
        .collect()
}

pub fn table_width(columns: &[ColumnSpec]) -> f64 {
    columns.iter().map(|c| c.width).sum()
}

/// Draw a table at the cursor, breaking pages as needed.
///
/// The header is kept with at least one row. On every page break the header
/// is redrawn first and the stripe index resets. The optional total row is
/// subject to the same page-break check as data rows.
pub fn render_table(
    canvas: &mut Canvas,
    columns: &[ColumnSpec],
    rows: &[TableRow],
    total: Option<&TableRow>,
    style: &TableStyle,
) -> TableLayout {
    let origin = canvas.left();
    let offsets = column_offsets(columns);
    let width = table_width(columns);

    let first_block = style.header_height
        + if rows.is_empty() && total.is_none() { 0.0 } else { style.row_height };
    canvas.ensure_space(first_block);

    let mut layout = TableLayout::default();
    draw_header(canvas, columns, &offsets, origin, width, style);
    layout.header_draws += 1;
    layout.pages.push(canvas.page_index());
    layout.rows_per_page.push(0);

    let mut stripe = 0usize;

    for row in rows {
        if canvas.ensure_space(style.row_height) {
            draw_header(canvas, columns, &offsets, origin, width, style);
            layout.header_draws += 1;
            layout.pages.push(canvas.page_index());
            layout.rows_per_page.push(0);
            stripe = 0;
        }

        let fill = style.row_fills[stripe % 2];
        let text_style = TextStyle::body().with_size(style.font_size);
        draw_row(canvas, columns, &offsets, origin, width, row, fill, text_style, style);
        stripe += 1;
        if let Some(count) = layout.rows_per_page.last_mut() {
            *count += 1;
        }
    }

    if let Some(total) = total {
        if canvas.ensure_space(style.row_height) {
            draw_header(canvas, columns, &offsets, origin, width, style);
            layout.header_draws += 1;
            layout.pages.push(canvas.page_index());
            layout.rows_per_page.push(0);
        }
        let text_style = TextStyle::body().with_size(style.font_size).bold();
        draw_row(canvas, columns, &offsets, origin, width, total, style.total_fill, text_style, style);
        layout.total_row_page = Some(canvas.page_index());
    }

    let (y, rule) = (canvas.y(), style.rule);
    canvas.line(origin, y, origin + width, y, rule);

    layout
}

fn draw_header(
    canvas: &mut Canvas,
    columns: &[ColumnSpec],
    offsets: &[f64],
    origin: f64,
    width: f64,
    style: &TableStyle,
) {
    let y = canvas.y();
    canvas.rect(origin, y, width, style.header_height, Some(style.header_fill), None);

    let text_style = TextStyle::body()
        .with_size(style.font_size)
        .bold()
        .with_color(style.header_text);
    for (col, x) in columns.iter().zip(offsets) {
        push_cell(canvas, origin + x, y, col, style.header_height, &col.label, text_style, style);
    }
    canvas.advance(style.header_height);
}

#[allow(clippy::too_many_arguments)]
fn draw_row(
    canvas: &mut Canvas,
    columns: &[ColumnSpec],
    offsets: &[f64],
    origin: f64,
    width: f64,
    row: &TableRow,
    fill: Color,
    text_style: TextStyle,
    style: &TableStyle,
) {
    let y = canvas.y();
    canvas.rect(origin, y, width, style.row_height, Some(fill), None);

    for (i, (col, x)) in columns.iter().zip(offsets).enumerate() {
        let text = row.cells.get(i).map(String::as_str).unwrap_or("");
        if !text.is_empty() {
            push_cell(canvas, origin + x, y, col, style.row_height, text, text_style, style);
        }
    }
    canvas.advance(style.row_height);
}

#[allow(clippy::too_many_arguments)]
fn push_cell(
    canvas: &mut Canvas,
    x: f64,
    y: f64,
    col: &ColumnSpec,
    height: f64,
    text: &str,
    text_style: TextStyle,
    style: &TableStyle,
) {
    let inner = (col.width - 2.0 * style.cell_padding).max(0.0);
    canvas.draw(DrawOp::Cell {
        x,
        y,
        width: col.width,
        height,
        padding: style.cell_padding,
        text: fit_width(text, inner, text_style.size),
        style: text_style,
        align: col.align,
    });
}
