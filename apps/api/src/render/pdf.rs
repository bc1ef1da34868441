//! Paginated PDF export using the embedded DejaVu Sans faces.

use printpdf::{
    Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Rgb,
};

use super::font_metrics::{Face, FontMetrics};
use super::preview::{build_preview, EntryBlock, Link, PreviewDocument, PreviewItem};
use super::{PdfConfig, PADDING_MM};
use crate::errors::AppError;
use crate::models::resume::Profile;

const MM_PER_PT: f32 = 25.4 / 72.0;
const LINE_HEIGHT: f32 = 1.35;

const DARK: (u8, u8, u8) = (0x2d, 0x37, 0x48);
const MEDIUM: (u8, u8, u8) = (0x4a, 0x55, 0x68);
const BLUE: (u8, u8, u8) = (0x31, 0x82, 0xce);

#[derive(Debug, Clone, Copy)]
struct Style {
    size_pt: f32,
    face: Face,
    color: (u8, u8, u8),
}

const NAME: Style = Style { size_pt: 24.0, face: Face::Bold, color: DARK };
const TITLE: Style = Style { size_pt: 14.0, face: Face::Bold, color: BLUE };
const CONTACT: Style = Style { size_pt: 9.5, face: Face::Regular, color: MEDIUM };
const LINK: Style = Style { size_pt: 9.5, face: Face::Regular, color: BLUE };
const HEADING: Style = Style { size_pt: 13.0, face: Face::Bold, color: DARK };
const ENTRY_TITLE: Style = Style { size_pt: 11.0, face: Face::Bold, color: DARK };
const DETAIL: Style = Style { size_pt: 9.5, face: Face::Regular, color: MEDIUM };
const BODY: Style = Style { size_pt: 10.0, face: Face::Regular, color: MEDIUM };

#[derive(Debug, Clone, Copy, PartialEq)]
enum Align {
    Left,
    Center,
}

fn render_err(e: printpdf::Error) -> AppError {
    AppError::Render(format!("{e:?}"))
}

/// Lays out the profile on as many pages as it needs and returns the PDF bytes.
pub fn render_pdf(profile: &Profile, config: &PdfConfig) -> Result<Vec<u8>, AppError> {
    let doc = build_preview(profile);
    let mut writer = PdfWriter::new(&doc.full_name, config)?;
    write_document(&mut writer, &doc)?;
    writer.finish()
}

fn write_document(w: &mut PdfWriter, doc: &PreviewDocument) -> Result<(), AppError> {
    w.text(&doc.full_name, NAME, Align::Center)?;
    w.text(&doc.job_title, TITLE, Align::Center)?;
    if !doc.contacts.is_empty() {
        w.text(&doc.contacts.join("   "), CONTACT, Align::Center)?;
    }
    if !doc.links.is_empty() {
        w.text(&link_line(&doc.links), LINK, Align::Center)?;
    }
    w.gap(6.0);

    for section in &doc.sections {
        w.keep_together(HEADING, 2);
        w.text(section.title, HEADING, Align::Left)?;
        w.gap(1.5);
        for item in &section.items {
            write_item(w, item)?;
        }
        w.gap(4.0);
    }
    Ok(())
}

fn link_line(links: &[Link]) -> String {
    links
        .iter()
        .map(|l| format!("{}: {}", l.label, l.url))
        .collect::<Vec<_>>()
        .join("   ")
}

fn write_item(w: &mut PdfWriter, item: &PreviewItem) -> Result<(), AppError> {
    match item {
        PreviewItem::Paragraph(body) => w.text(body, BODY, Align::Left),
        PreviewItem::Entry(entry) => write_entry(w, entry),
        PreviewItem::Meter { label, level, .. } => {
            w.text(&format!("{label} ({level})"), BODY, Align::Left)
        }
    }
}

fn write_entry(w: &mut PdfWriter, entry: &EntryBlock) -> Result<(), AppError> {
    w.keep_together(ENTRY_TITLE, 2);
    w.text(&entry.title, ENTRY_TITLE, Align::Left)?;
    if let Some(subtitle) = &entry.subtitle {
        w.text(subtitle, DETAIL, Align::Left)?;
    }
    if let Some(period) = &entry.period {
        w.text(period, DETAIL, Align::Left)?;
    }
    if !entry.links.is_empty() {
        w.text(&link_line(&entry.links), LINK, Align::Left)?;
    }
    for bullet in entry.bullets.iter().filter(|b| !b.trim().is_empty()) {
        w.text(&format!("- {bullet}"), BODY, Align::Left)?;
    }
    if let Some(body) = &entry.body {
        w.text(body, BODY, Align::Left)?;
    }
    w.gap(2.5);
    Ok(())
}

struct PdfWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    metrics: FontMetrics,
    page_w: f32,
    page_h: f32,
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
    /// Top of the next line, in mm from the page bottom.
    cursor: f32,
    scale: f32,
    pages: usize,
}

impl PdfWriter {
    fn new(title: &str, config: &PdfConfig) -> Result<Self, AppError> {
        let (page_w, page_h) = config.page_size.dimensions_mm();
        let (doc, page, layer) = PdfDocument::new(title, Mm(page_w), Mm(page_h), "Layer 1");
        let regular = doc
            .add_external_font(Face::Regular.ttf_bytes())
            .map_err(render_err)?;
        let bold = doc
            .add_external_font(Face::Bold.ttf_bytes())
            .map_err(render_err)?;
        let metrics = FontMetrics::load()
            .map_err(|e| AppError::Render(format!("embedded font is unreadable: {e}")))?;
        let layer = doc.get_page(page).get_layer(layer);

        let inset = config.margin_mm.max(0.0) + PADDING_MM;
        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            metrics,
            page_w,
            page_h,
            left: inset,
            right: page_w - inset,
            top: page_h - inset,
            bottom: inset,
            cursor: page_h - inset,
            scale: if config.scale > 0.0 { config.scale } else { 1.0 },
            pages: 1,
        })
    }

    fn size(&self, style: Style) -> f32 {
        style.size_pt * self.scale
    }

    fn line_height_mm(&self, style: Style) -> f32 {
        self.size(style) * LINE_HEIGHT * MM_PER_PT
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(self.page_w), Mm(self.page_h), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor = self.top;
        self.pages += 1;
    }

    /// Starts a new page unless `lines` lines of `style` still fit.
    fn keep_together(&mut self, style: Style, lines: usize) {
        let needed = self.line_height_mm(style) * lines as f32;
        if self.cursor - needed < self.bottom && self.cursor < self.top {
            self.new_page();
        }
    }

    fn gap(&mut self, mm: f32) {
        self.cursor -= mm * self.scale;
    }

    /// Writes `content` word-wrapped to the text column, breaking pages as needed.
    ///
    /// Text the face has no glyph for is an error rather than a blank gap.
    fn text(&mut self, content: &str, style: Style, align: Align) -> Result<(), AppError> {
        if let Some(c) = self.metrics.unsupported_char(content, style.face) {
            return Err(AppError::Render(format!(
                "no glyph for {c:?} (U+{:04X}) in the PDF font",
                u32::from(c)
            )));
        }
        let size = self.size(style);
        let width_mm = self.right - self.left;
        let max_em = width_mm / (size * MM_PER_PT);
        let line_h = self.line_height_mm(style);
        let font = match style.face {
            Face::Regular => self.regular.clone(),
            Face::Bold => self.bold.clone(),
        };
        let (r, g, b) = style.color;
        let color = Color::Rgb(Rgb::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            None,
        ));

        for paragraph in content.split('\n') {
            for line in self.metrics.wrap(paragraph, max_em, style.face) {
                if self.cursor - line_h < self.bottom && self.cursor < self.top {
                    self.new_page();
                }
                let x = match align {
                    Align::Left => self.left,
                    Align::Center => {
                        let line_w = self.metrics.measure_str(&line, style.face) * size * MM_PER_PT;
                        self.left + ((width_mm - line_w) / 2.0).max(0.0)
                    }
                };
                // Baseline sits roughly one font size below the top of the line box.
                let baseline = self.cursor - size * MM_PER_PT;
                self.layer.set_fill_color(color.clone());
                self.layer.use_text(line, size, Mm(x), Mm(baseline), &font);
                self.cursor -= line_h;
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<Vec<u8>, AppError> {
        self.doc.save_to_bytes().map_err(render_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::Experience;

    #[test]
    fn test_renders_pdf_bytes() {
        let profile = Profile {
            full_name: "Ada Lovelace".into(),
            summary: "Analyst.".into(),
            ..Default::default()
        };
        let bytes = render_pdf(&profile, &PdfConfig::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_long_resume_spills_onto_more_pages() {
        let exp = Experience {
            company: "Acme".into(),
            role: "Engineer".into(),
            start_date: "2020".into(),
            description: "Built things that mattered to people.\n".repeat(12),
            ..Default::default()
        };
        let profile = Profile {
            experiences: vec![exp; 12],
            ..Default::default()
        };
        let config = PdfConfig::default();
        let doc = build_preview(&profile);
        let mut writer = PdfWriter::new(&doc.full_name, &config).unwrap();
        write_document(&mut writer, &doc).unwrap();
        assert!(writer.pages > 1);
        assert!(writer.cursor >= writer.bottom - 10.0);
        assert!(writer.finish().unwrap().starts_with(b"%PDF-"));
    }

    fn cyrillic_profile() -> Profile {
        Profile {
            full_name: "Рухшод Алиев".into(),
            summary: "Ўзбек тили".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_cyrillic_text_is_laid_out() {
        let profile = cyrillic_profile();
        let config = PdfConfig::default();
        let doc = build_preview(&profile);
        let mut writer = PdfWriter::new(&doc.full_name, &config).unwrap();
        let start = writer.cursor;
        write_document(&mut writer, &doc).unwrap();
        assert!(writer.cursor < start);
        assert!(writer.finish().unwrap().starts_with(b"%PDF-"));
        assert!(render_pdf(&profile, &config).is_ok());
    }

    #[test]
    fn test_text_without_glyphs_fails_instead_of_blanking() {
        let profile = Profile {
            summary: "漢字".into(),
            ..cyrillic_profile()
        };
        let err = render_pdf(&profile, &PdfConfig::default()).unwrap_err();
        assert!(matches!(err, AppError::Render(msg) if msg.contains("U+6F22")));
    }

    #[test]
    fn test_letter_with_margin_and_scale() {
        let config = PdfConfig {
            page_size: crate::render::PageSize::Letter,
            margin_mm: 10.0,
            scale: 1.5,
        };
        let writer = PdfWriter::new("x", &config).unwrap();
        assert!((writer.left - 25.0).abs() < 1e-4);
        assert!((writer.page_w - 215.9).abs() < 1e-4);
        assert!((writer.size(BODY) - 15.0).abs() < 1e-4);
    }
}
