//! # PDF Encoding
//!
//! Converts a laid-out [`RenderedDocument`] into PDF bytes using Typst.
//!
//! Layout is already final when a document reaches this module, so the
//! generated Typst source does no flowing of its own: every draw operation
//! becomes one absolutely placed element on a zero-margin page, one Typst
//! page per document page.
//!
//! Fonts come from `typst-assets` and are parsed once per process.
//!
//! ## Example
//!
//! ```rust,no_run
//! use report_core::layout::{Canvas, PageSetup, TextStyle};
//! use report_core::pdf::render_pdf;
//!
//! let mut canvas = Canvas::new(PageSetup::default());
//! canvas.text_line("Hello", TextStyle::body());
//! let pdf = render_pdf(&canvas.finish("demo")).unwrap();
//! assert!(pdf.starts_with(b"%PDF"));
//! ```

use std::fmt::Write as _;

use chrono::{Datelike, Utc};
use log::debug;
use once_cell::sync::Lazy;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::errors::{ReportError, ReportResult};
use crate::layout::{Align, Color, DrawOp, RenderedDocument, Stroke, TextStyle};
use crate::stream::{ChunkSink, DocumentEncoder, VecSink};

/// Face every report is set in; widths in `layout::metrics` assume it.
pub const FONT_FAMILY: &str = "DejaVu Sans Mono";

static FONTS: Lazy<Vec<Font>> = Lazy::new(|| {
    let fonts: Vec<Font> = typst_assets::fonts()
        .flat_map(|data| Font::iter(Bytes::new(data)))
        .collect();
    debug!("loaded {} embedded font faces", fonts.len());
    fonts
});

static FONT_BOOK: Lazy<LazyHash<FontBook>> = Lazy::new(|| LazyHash::new(FontBook::from_fonts(FONTS.iter())));

/// A Typst world holding one in-memory source and the embedded fonts.
struct ReportWorld {
    main: Source,
    library: LazyHash<Library>,
}

impl ReportWorld {
    fn new(source: String) -> Self {
        ReportWorld {
            main: Source::detached(source),
            library: LazyHash::new(Library::default()),
        }
    }
}

impl World for ReportWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &FONT_BOOK
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        FONTS.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(now.year(), now.month() as u8, now.day() as u8)
    }
}

/// Encodes documents as PDF through Typst.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypstPdfEncoder;

impl DocumentEncoder for TypstPdfEncoder {
    fn encode(&self, document: &RenderedDocument, sink: &mut dyn ChunkSink) -> ReportResult<()> {
        let bytes = compile_pdf(document)?;
        sink.emit(&bytes)
    }
}

/// Encode a document to PDF bytes synchronously.
pub fn render_pdf(document: &RenderedDocument) -> ReportResult<Vec<u8>> {
    let mut sink = VecSink::default();
    TypstPdfEncoder.encode(document, &mut sink)?;
    Ok(sink.into_inner())
}

fn compile_pdf(document: &RenderedDocument) -> ReportResult<Vec<u8>> {
    let world = ReportWorld::new(to_typst_source(document));

    let warned = typst::compile(&world);
    let compiled = warned.output.map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        ReportError::stream_failure(format!("Typst compilation failed: {}", messages.join("; ")))
    })?;

    typst_pdf::pdf(&compiled, &PdfOptions::default()).map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        ReportError::stream_failure(format!("PDF rendering failed: {}", messages.join("; ")))
    })
}

/// Typst markup placing every operation of `document` at its coordinates.
pub fn to_typst_source(document: &RenderedDocument) -> String {
    let setup = document.setup();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "#set page(width: {}, height: {}, margin: 0pt)",
        pt(setup.width),
        pt(setup.height)
    );
    let _ = writeln!(out, "#set text(font: \"{FONT_FAMILY}\", size: 10pt)");
    let _ = writeln!(out, "#set document(title: {})", string_literal(document.title()));

    for (i, page) in document.pages().iter().enumerate() {
        if i > 0 {
            out.push_str("#pagebreak()\n");
        }
        for op in &page.ops {
            out.push_str(&place(op));
            out.push('\n');
        }
    }
    out
}

fn place(op: &DrawOp) -> String {
    match op {
        DrawOp::Text {
            x,
            y,
            width,
            text,
            style,
            align,
        } => format!(
            "#place(top + left, dx: {}, dy: {}, box(width: {}, height: {}, align({} + horizon, {})))",
            pt(*x),
            pt(*y),
            pt(*width),
            pt(style.line_height()),
            align_name(*align),
            text_call(text, style)
        ),
        DrawOp::Cell {
            x,
            y,
            width,
            height,
            padding,
            text,
            style,
            align,
        } => format!(
            "#place(top + left, dx: {}, dy: {}, box(width: {}, height: {}, inset: (x: {}), align({} + horizon, {})))",
            pt(*x),
            pt(*y),
            pt(*width),
            pt(*height),
            pt(*padding),
            align_name(*align),
            text_call(text, style)
        ),
        DrawOp::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
        } => format!(
            "#place(top + left, dx: {}, dy: {}, rect(width: {}, height: {}, fill: {}, stroke: {}))",
            pt(*x),
            pt(*y),
            pt(*width),
            pt(*height),
            fill.map(|c| color(&c)).unwrap_or_else(|| "none".to_string()),
            stroke.map(|s| stroke_spec(&s)).unwrap_or_else(|| "none".to_string())
        ),
        DrawOp::Line { x1, y1, x2, y2, stroke } => format!(
            "#place(top + left, dx: {}, dy: {}, line(start: (0pt, 0pt), end: ({}, {}), stroke: {}))",
            pt(*x1),
            pt(*y1),
            pt(x2 - x1),
            pt(y2 - y1),
            stroke_spec(stroke)
        ),
    }
}

fn text_call(text: &str, style: &TextStyle) -> String {
    format!(
        "text(size: {}, weight: \"{}\", style: \"{}\", fill: {}, {})",
        pt(style.size),
        if style.bold { "bold" } else { "regular" },
        if style.italic { "italic" } else { "normal" },
        color(&style.color),
        string_literal(text)
    )
}

fn align_name(align: Align) -> &'static str {
    match align {
        Align::Left => "left",
        Align::Center => "center",
        Align::Right => "right",
    }
}

fn pt(value: f64) -> String {
    format!("{value:.2}pt")
}

fn color(color: &Color) -> String {
    format!("rgb(\"{}\")", color.hex())
}

fn stroke_spec(stroke: &Stroke) -> String {
    format!("{} + {}", pt(stroke.width), color(&stroke.color))
}

/// Typst string literal; text is passed as a string so no markup applies.
fn string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
