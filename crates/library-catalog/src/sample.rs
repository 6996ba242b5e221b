//! Sample book generation for trying out the reader without real documents

use crate::types::{CatalogError, Result};
use printpdf::*;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct SampleBookOptions {
    pub library_name: String,
    pub title: String,
    pub page_count: usize,
    pub page_width_mm: f32,
    pub page_height_mm: f32,
}

impl Default for SampleBookOptions {
    fn default() -> Self {
        Self {
            library_name: "Islamic Library - Test Book".to_string(),
            title: "Tafsir Ibn Kathir".to_string(),
            page_count: 10,
            page_width_mm: 210.0,
            page_height_mm: 297.0,
        }
    }
}

const FEATURE_LINES: &[&str] = &[
    "This is a sample PDF file for testing the PDF reader.",
    "The reader supports:",
    "- Page navigation (Previous/Next)",
    "- Zoom in/out",
    "- Dark mode",
    "- Fullscreen mode",
    "- Download functionality",
    "- Keyboard shortcuts",
    "- Last page memory",
    "",
    "Keyboard Shortcuts:",
    "- Arrow Left/Right: Navigate pages",
    "- +/- : Zoom in/out",
    "- ESC: Close reader",
];

const FOOTER_LINES: &[&str] = &[
    "Islamic Library - Free & Ad-Free",
    "Sadaqah Jariyah - May Allah reward you",
];

pub async fn generate_sample_book(
    options: &SampleBookOptions,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    let options = options.clone();
    let output_path = output_path.as_ref().to_owned();

    // PDF generation is CPU-bound, spawn blocking
    let bytes = tokio::task::spawn_blocking(move || sample_book_bytes(&options)).await??;

    if let Some(parent) = output_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&output_path, bytes).await?;

    Ok(())
}

pub fn sample_book_bytes(options: &SampleBookOptions) -> Result<Vec<u8>> {
    if options.page_count == 0 {
        return Err(CatalogError::Config(
            "Sample book needs at least one page".to_string(),
        ));
    }

    let mut doc = PdfDocument::new(&options.title);
    let width = options.page_width_mm;
    let height = options.page_height_mm;

    let mut pages = Vec::with_capacity(options.page_count);
    for page_num in 1..=options.page_count {
        let mut ops = Vec::new();

        let header = TextStyle::new(BuiltinFont::HelveticaBold, 24.0);
        let subtitle = TextStyle::new(BuiltinFont::Helvetica, 18.0);
        let page_label = TextStyle::new(BuiltinFont::HelveticaBold, 48.0);
        let body = TextStyle::new(BuiltinFont::Helvetica, 12.0);
        let footer = TextStyle::new(BuiltinFont::HelveticaOblique, 10.0);

        centered_text(&mut ops, &options.library_name, &header, width, height - 30.0);
        centered_text(&mut ops, &options.title, &subtitle, width, height - 50.0);
        centered_text(&mut ops, &format!("Page {}", page_num), &page_label, width, height / 2.0);

        let mut y = height / 2.0 - 30.0;
        for line in FEATURE_LINES {
            text_at(&mut ops, line, &body, 30.0, y);
            y -= 6.0;
        }

        centered_text(&mut ops, FOOTER_LINES[0], &footer, width, 20.0);
        centered_text(&mut ops, FOOTER_LINES[1], &footer, width, 15.0);

        pages.push(PdfPage::new(Mm(width), Mm(height), ops));
    }

    doc.pages = pages;

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);

    Ok(bytes)
}

#[derive(Clone)]
struct TextStyle {
    font: BuiltinFont,
    size_pt: f32,
}

impl TextStyle {
    fn new(font: BuiltinFont, size_pt: f32) -> Self {
        Self { font, size_pt }
    }
}

/// Center using an average Helvetica glyph width of half the font size
fn centered_text(ops: &mut Vec<Op>, text: &str, style: &TextStyle, page_width_mm: f32, y_mm: f32) {
    let text_width_mm = text.chars().count() as f32 * style.size_pt * 0.5 * 0.352778;
    let x_mm = ((page_width_mm - text_width_mm) / 2.0).max(0.0);
    text_at(ops, text, style, x_mm, y_mm);
}

fn text_at(ops: &mut Vec<Op>, text: &str, style: &TextStyle, x_mm: f32, y_mm: f32) {
    if text.is_empty() {
        return;
    }

    ops.push(Op::StartTextSection);
    ops.push(Op::SetTextCursor {
        pos: Point {
            x: Mm(x_mm).into_pt(),
            y: Mm(y_mm).into_pt(),
        },
    });
    ops.push(Op::SetFontSizeBuiltinFont {
        font: style.font.clone(),
        size: Pt(style.size_pt),
    });
    ops.push(Op::WriteTextBuiltinFont {
        items: vec![TextItem::Text(text.to_string())],
        font: style.font.clone(),
    });
    ops.push(Op::EndTextSection);
}
