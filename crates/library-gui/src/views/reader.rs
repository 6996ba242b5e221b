use super::UiEvent;
use eframe::egui;
use reader_runtime::{ReaderAction, ReaderSnapshot, RenderedPage};
use std::sync::Arc;

/// Texture for the last rendered page, rebuilt when the page or theme changes
#[derive(Default)]
pub struct PageView {
    texture: Option<egui::TextureHandle>,
    page: Option<Arc<RenderedPage>>,
    dark: bool,
    dirty: bool,
}

impl PageView {
    pub fn set_page(&mut self, page: Arc<RenderedPage>) {
        self.page = Some(page);
        self.dirty = true;
    }

    pub fn clear(&mut self) {
        self.texture = None;
        self.page = None;
        self.dirty = false;
    }

    fn texture(&mut self, ctx: &egui::Context, dark: bool) -> Option<&egui::TextureHandle> {
        if self.dark != dark {
            self.dark = dark;
            self.dirty = true;
        }

        if self.dirty {
            self.dirty = false;
            if let Some(page) = &self.page {
                let image = page_image(page, dark);
                match &mut self.texture {
                    Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
                    None => {
                        self.texture =
                            Some(ctx.load_texture("reader_page", image, egui::TextureOptions::LINEAR));
                    }
                }
            }
        }

        self.texture.as_ref()
    }
}

/// Dark mode shows the page with inverted colors
fn page_image(page: &RenderedPage, dark: bool) -> egui::ColorImage {
    let size = [page.width, page.height];
    if !dark {
        return egui::ColorImage::from_rgba_unmultiplied(size, &page.rgba_data);
    }

    let inverted: Vec<u8> = page
        .rgba_data
        .chunks_exact(4)
        .flat_map(|px| [255 - px[0], 255 - px[1], 255 - px[2], px[3]])
        .collect();
    egui::ColorImage::from_rgba_unmultiplied(size, &inverted)
}

pub fn show_reader(
    ui: &mut egui::Ui,
    snapshot: &ReaderSnapshot,
    page_input: &mut String,
    page_view: &mut PageView,
    events: &mut Vec<UiEvent>,
) {
    let mut action = |action: ReaderAction| events.push(UiEvent::Reader(action));

    ui.horizontal(|ui| {
        if ui.button("✕").on_hover_text("إغلاق (Esc)").clicked() {
            action(ReaderAction::Close);
        }
        ui.strong(&snapshot.title);
        ui.separator();

        if ui
            .add_enabled(snapshot.can_go_forward, egui::Button::new("← التالي"))
            .clicked()
        {
            action(ReaderAction::NextPage);
        }

        let input = ui.add_enabled(
            !snapshot.loading,
            egui::TextEdit::singleline(page_input).desired_width(40.0),
        );
        if input.lost_focus() && *page_input != snapshot.current_page.to_string() {
            action(ReaderAction::JumpTo(page_input.clone()));
        }
        match snapshot.total_pages {
            Some(total) => ui.label(format!("/ {}", total)),
            None => ui.label("/ …"),
        };

        if ui
            .add_enabled(snapshot.can_go_back, egui::Button::new("السابق →"))
            .clicked()
        {
            action(ReaderAction::PreviousPage);
        }

        ui.separator();
        if ui.button("−").on_hover_text("تصغير").clicked() {
            action(ReaderAction::ZoomOut);
        }
        ui.label(format!("{}%", snapshot.zoom_percent));
        if ui.button("+").on_hover_text("تكبير").clicked() {
            action(ReaderAction::ZoomIn);
        }

        ui.separator();
        let theme = if snapshot.dark_mode { "☀" } else { "🌙" };
        if ui.button(theme).on_hover_text("الوضع الليلي").clicked() {
            action(ReaderAction::ToggleDarkMode);
        }
        if ui.button("⛶").on_hover_text("ملء الشاشة").clicked() {
            action(ReaderAction::ToggleFullscreen);
        }
        if ui.button("⬇").on_hover_text("تحميل").clicked() {
            action(ReaderAction::Download);
        }

        if snapshot.rendering {
            ui.spinner();
        }
    });

    ui.add(egui::ProgressBar::new(snapshot.progress).desired_height(4.0));
    ui.separator();

    let background = if snapshot.dark_mode {
        egui::Color32::from_gray(24)
    } else {
        ui.visuals().extreme_bg_color
    };

    egui::Frame::new().fill(background).show(ui, |ui| {
        ui.set_min_size(ui.available_size());

        if snapshot.loading {
            ui.centered_and_justified(|ui| {
                ui.spinner();
                ui.label("جاري تحميل الكتاب...");
            });
            return;
        }

        match page_view.texture(ui.ctx(), snapshot.dark_mode) {
            Some(texture) => {
                let size = texture.size_vec2();
                let id = texture.id();
                egui::ScrollArea::both().id_salt("reader_page").show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.image((id, size));
                    });
                });
            }
            None => {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_mode_inverts_color_but_not_alpha() {
        let page = RenderedPage {
            rgba_data: vec![255, 200, 0, 128],
            width: 1,
            height: 1,
        };

        let light = page_image(&page, false);
        let dark = page_image(&page, true);
        assert_eq!(light.size, [1, 1]);
        assert_eq!(
            dark.pixels[0],
            egui::Color32::from_rgba_unmultiplied(0, 55, 255, 128)
        );
    }
}
