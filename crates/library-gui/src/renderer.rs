use reader_runtime::{DocumentRenderer, ReaderError, RenderedPage, Result};
use std::path::Path;

#[cfg(feature = "pdf-viewer")]
use pdfium_render::prelude::*;

/// Initialize Pdfium, trying the vendored library first, then falling back to system
#[cfg(feature = "pdf-viewer")]
fn init_pdfium() -> std::result::Result<Pdfium, PdfiumError> {
    // Relative to the workspace root, where cargo runs the binary from
    let vendor_path = std::env::current_dir()
        .ok()
        .map(|dir| dir.join("vendor/pdfium/lib"))
        .filter(|dir| dir.exists());

    if let Some(vendor_path) = vendor_path {
        if let Ok(binding) =
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&vendor_path))
        {
            return Ok(Pdfium::new(binding));
        }
    }

    Pdfium::bind_to_system_library().map(Pdfium::new)
}

/// Renders pages with PDFium. Each call binds and opens the document afresh.
#[cfg(feature = "pdf-viewer")]
#[derive(Debug, Default)]
pub struct PdfiumRenderer;

#[cfg(feature = "pdf-viewer")]
impl DocumentRenderer for PdfiumRenderer {
    fn page_count(&self, path: &Path) -> Result<u32> {
        let load = |e: PdfiumError| ReaderError::Load(e.to_string());

        let pdfium = init_pdfium().map_err(load)?;
        let document = pdfium.load_pdf_from_file(path, None).map_err(load)?;
        Ok(document.pages().len() as u32)
    }

    fn render_page(&self, path: &Path, page_index: u32, scale: f32) -> Result<RenderedPage> {
        let render = |e: PdfiumError| ReaderError::Render(e.to_string());

        let index = u16::try_from(page_index)
            .map_err(|_| ReaderError::Render(format!("Page index {} too large", page_index)))?;

        let pdfium = init_pdfium().map_err(render)?;
        let document = pdfium.load_pdf_from_file(path, None).map_err(render)?;
        let page = document.pages().get(index).map_err(render)?;

        let config = PdfRenderConfig::new().scale_page_by_factor(scale);
        let bitmap = page.render_with_config(&config).map_err(render)?;

        Ok(RenderedPage {
            rgba_data: bitmap.as_rgba_bytes().to_vec(),
            width: bitmap.width() as usize,
            height: bitmap.height() as usize,
        })
    }
}

/// Stand-in when the crate is built without `pdf-viewer`
#[cfg(not(feature = "pdf-viewer"))]
#[derive(Debug, Default)]
pub struct PdfiumRenderer;

#[cfg(not(feature = "pdf-viewer"))]
impl DocumentRenderer for PdfiumRenderer {
    fn page_count(&self, _path: &Path) -> Result<u32> {
        Err(ReaderError::Load(
            "PDF viewing not available (pdf-viewer feature disabled)".to_string(),
        ))
    }

    fn render_page(&self, _path: &Path, _page_index: u32, _scale: f32) -> Result<RenderedPage> {
        Err(ReaderError::Render(
            "PDF viewing not available (pdf-viewer feature disabled)".to_string(),
        ))
    }
}
