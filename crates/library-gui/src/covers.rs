use eframe::egui;
use library_catalog::{Book, BookId, Catalog};
use std::collections::HashMap;

const COVER_WIDTH: u32 = 160;
const COVER_HEIGHT: u32 = 220;

/// Cover textures, loaded the first time a card is drawn.
///
/// Missing or unreadable covers are remembered as `None` so they are tried once.
#[derive(Default)]
pub struct CoverCache {
    textures: HashMap<BookId, Option<egui::TextureHandle>>,
}

impl CoverCache {
    pub fn get(
        &mut self,
        ctx: &egui::Context,
        catalog: &Catalog,
        book: &Book,
    ) -> Option<&egui::TextureHandle> {
        self.textures
            .entry(book.id)
            .or_insert_with(|| load_cover(ctx, catalog, book))
            .as_ref()
    }
}

fn load_cover(ctx: &egui::Context, catalog: &Catalog, book: &Book) -> Option<egui::TextureHandle> {
    let path = catalog.cover_path(book)?;
    let image = match image::open(&path) {
        Ok(image) => image.thumbnail(COVER_WIDTH, COVER_HEIGHT).to_rgba8(),
        Err(e) => {
            log::debug!("No cover for book {} ({}): {}", book.id, path.display(), e);
            return None;
        }
    };

    let size = [image.width() as usize, image.height() as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
    Some(ctx.load_texture(
        format!("cover_{}", book.id),
        color_image,
        egui::TextureOptions::default(),
    ))
}
