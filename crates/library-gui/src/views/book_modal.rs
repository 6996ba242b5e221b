use super::UiEvent;
use eframe::egui;
use library_catalog::{Book, StarRating, group_thousands};

pub fn show_book_modal(
    ctx: &egui::Context,
    book: &Book,
    cover: Option<&egui::TextureHandle>,
    favorite: bool,
    events: &mut Vec<UiEvent>,
) {
    let mut open = true;
    egui::Window::new(&book.title)
        .id(egui::Id::new(("book_modal", book.id)))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .default_width(440.0)
        .show(ctx, |ui| {
            if let Some(cover) = cover {
                ui.vertical_centered(|ui| {
                    ui.image((cover.id(), cover.size_vec2()));
                });
                ui.add_space(8.0);
            }

            egui::Grid::new("book_details").num_columns(2).show(ui, |ui| {
                row(ui, "المؤلف", &book.author);
                row(ui, "التصنيف", &book.category_name);
                row(ui, "عدد الصفحات", &book.pages.to_string());
                row(ui, "سنة النشر", &book.publish_year.to_string());
                row(ui, "الناشر", &book.publisher);
                row(
                    ui,
                    "التقييم",
                    &format!("{} {:.1}", StarRating::from_rating(book.rating).symbols(), book.rating),
                );
                row(ui, "التحميلات", &group_thousands(book.downloads));
                row(ui, "اللغة", "العربية");
            });

            if !book.description.is_empty() {
                ui.separator();
                ui.label(&book.description);
            }

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("📖 اقرأ الآن").clicked() {
                    events.push(UiEvent::CloseBookModal);
                    events.push(UiEvent::ReadBook(book.id));
                }
                if ui.button("⬇ تحميل").clicked() {
                    events.push(UiEvent::DownloadBook(book.id));
                }
                let heart = if favorite { "♥ في المفضلة" } else { "♡ أضف للمفضلة" };
                if ui.button(heart).clicked() {
                    events.push(UiEvent::ToggleFavorite(book.id));
                }
            });
        });

    if !open {
        events.push(UiEvent::CloseBookModal);
    }
}

fn row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.strong(label);
    ui.label(value);
    ui.end_row();
}
