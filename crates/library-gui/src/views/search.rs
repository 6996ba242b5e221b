use super::UiEvent;
use eframe::egui;
use library_catalog::Catalog;

#[derive(Default)]
pub struct SearchOverlay {
    pub open: bool,
    pub query: String,
    focus_pending: bool,
}

impl SearchOverlay {
    pub fn open(&mut self) {
        self.open = true;
        self.focus_pending = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

/// Search box with live title/author suggestions
pub fn show_search_overlay(
    ctx: &egui::Context,
    overlay: &mut SearchOverlay,
    catalog: &Catalog,
    suggestion_limit: usize,
    events: &mut Vec<UiEvent>,
) {
    if !overlay.open {
        return;
    }

    let mut open = true;
    egui::Window::new("🔍 بحث")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 80.0))
        .default_width(420.0)
        .show(ctx, |ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut overlay.query)
                    .hint_text("ابحث عن كتاب، مؤلف، أو موضوع...")
                    .desired_width(f32::INFINITY),
            );
            if overlay.focus_pending {
                response.request_focus();
                overlay.focus_pending = false;
            }

            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if submitted || ui.button("بحث").clicked() {
                events.push(UiEvent::RunSearch(overlay.query.clone()));
            }

            let suggestions = catalog.suggestions(&overlay.query, suggestion_limit);
            if !suggestions.is_empty() {
                ui.separator();
                for book in suggestions {
                    let label = format!("📖 {} · {}", book.title, book.author);
                    if ui.selectable_label(false, label).clicked() {
                        events.push(UiEvent::CloseSearch);
                        events.push(UiEvent::SelectBook(book.id));
                    }
                }
            }
        });

    if !open {
        events.push(UiEvent::CloseSearch);
    }
}
