use crate::logger::AppLogger;
use eframe::egui;
use log::Level;

pub fn show_log_panel(ctx: &egui::Context, logger: &AppLogger, open: &mut bool) {
    if !*open {
        return;
    }

    egui::TopBottomPanel::bottom("log_panel")
        .resizable(true)
        .default_height(160.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong("📋 Log");
                if ui.button("Clear").clicked() {
                    logger.clear();
                }
                if ui.button("Hide").clicked() {
                    *open = false;
                }
            });
            ui.separator();

            egui::ScrollArea::vertical()
                .stick_to_bottom(true)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for entry in logger.entries() {
                        let color = match entry.level {
                            Level::Error => egui::Color32::from_rgb(231, 76, 60),
                            Level::Warn => egui::Color32::from_rgb(243, 156, 18),
                            _ => ui.visuals().text_color(),
                        };
                        ui.colored_label(
                            color,
                            format!(
                                "{} {:<5} [{}] {}",
                                entry.timestamp.format("%H:%M:%S"),
                                entry.level,
                                entry.target,
                                entry.message
                            ),
                        );
                    }
                });
        });
}
