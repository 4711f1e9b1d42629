//! A4 invoice rendering with printpdf.
//!
//! printpdf draws glyphs in the order it receives them, so every label must
//! already be shaped and in visual order. `layout` takes care of that.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use super::layout::InvoiceLayout;
use super::{GeneratedDocument, Invoice, InvoiceRenderer, RenderError};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 12.0;
const LINE_HEIGHT_MM: f32 = 7.0;
const ENTRY_GAP_MM: f32 = 2.0;
const CHARS_PER_LINE: usize = 80;
// Rough average glyph advance, in em, used to centre the title.
const AVERAGE_ADVANCE_EM: f32 = 0.5;
const PT_TO_MM: f32 = 0.352_778;

pub struct PdfInvoiceRenderer {
    font_path: PathBuf,
}

impl PdfInvoiceRenderer {
    pub fn new(font_path: impl Into<PathBuf>) -> Self {
        Self {
            font_path: font_path.into(),
        }
    }

    /// Embed the configured TrueType font, or fall back to Helvetica when the
    /// file is missing. A file that exists but cannot be parsed is an error.
    fn load_font(&self, doc: &PdfDocumentReference) -> Result<IndirectFontRef, RenderError> {
        match File::open(&self.font_path) {
            Ok(file) => doc
                .add_external_font(BufReader::new(file))
                .map_err(|e| RenderError::Font {
                    path: self.font_path.display().to_string(),
                    message: e.to_string(),
                }),
            Err(e) => {
                log::warn!(
                    "Invoice font {} unavailable ({}), falling back to Helvetica; Arabic text will not render",
                    self.font_path.display(),
                    e
                );
                doc.add_builtin_font(BuiltinFont::Helvetica)
                    .map_err(|e| RenderError::Pdf(e.to_string()))
            }
        }
    }
}

/// Tracks the current layer and vertical position, opening pages as needed.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    font: &'a IndirectFontRef,
    layer: PdfLayerReference,
    y: f32,
    pages: usize,
}

impl<'a> PageWriter<'a> {
    fn ensure_room(&mut self, height: f32) {
        if self.y - height >= MARGIN_MM {
            return;
        }
        self.pages += 1;
        let (page, layer) = self.doc.add_page(
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            format!("Layer {}", self.pages),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT_MM - MARGIN_MM;
    }

    fn write_line(&mut self, text: &str, size: f32, x: f32) {
        self.ensure_room(LINE_HEIGHT_MM);
        self.y -= LINE_HEIGHT_MM;
        self.layer.use_text(text, size, Mm(x), Mm(self.y), self.font);
    }

    fn write_centred(&mut self, text: &str, size: f32) {
        let width = text.chars().count() as f32 * size * AVERAGE_ADVANCE_EM * PT_TO_MM;
        let x = ((PAGE_WIDTH_MM - width) / 2.0).max(MARGIN_MM);
        self.write_line(text, size, x);
    }

    fn skip(&mut self, height: f32) {
        self.y -= height;
    }
}

impl InvoiceRenderer for PdfInvoiceRenderer {
    fn render(&self, invoice: &Invoice) -> Result<GeneratedDocument, RenderError> {
        let layout = InvoiceLayout::build(invoice, CHARS_PER_LINE);

        let (doc, page, layer) = PdfDocument::new(
            layout.title.as_str(),
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Layer 1",
        );
        let font = self.load_font(&doc)?;

        {
            let mut writer = PageWriter {
                doc: &doc,
                font: &font,
                layer: doc.get_page(page).get_layer(layer),
                y: PAGE_HEIGHT_MM - MARGIN_MM,
                pages: 1,
            };

            writer.write_centred(&layout.title, TITLE_SIZE);
            writer.skip(LINE_HEIGHT_MM);
            for line in &layout.header {
                writer.write_line(line, BODY_SIZE, MARGIN_MM);
            }
            writer.skip(ENTRY_GAP_MM);

            for entry in &layout.entries {
                // Keep a wrapped entry on one page when it fits.
                writer.ensure_room(entry.len() as f32 * LINE_HEIGHT_MM);
                for line in entry {
                    writer.write_line(line, BODY_SIZE, MARGIN_MM);
                }
                writer.skip(ENTRY_GAP_MM);
            }

            writer.skip(ENTRY_GAP_MM);
            writer.write_line(&layout.total, BODY_SIZE, MARGIN_MM);
        }

        let pdf = doc
            .save_to_bytes()
            .map_err(|e| RenderError::Pdf(e.to_string()))?;

        log::debug!("Rendered invoice {} ({} bytes)", invoice.number, pdf.len());
        Ok(GeneratedDocument {
            pdf,
            issued_on: invoice.issued_on,
        })
    }
}
