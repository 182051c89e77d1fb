use eframe::egui;

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(37, 99, 235);
const ERROR_FILL: egui::Color32 = egui::Color32::from_rgb(111, 53, 53);
const ERROR_STROKE: egui::Color32 = egui::Color32::from_rgb(175, 96, 96);

pub fn apply(ctx: &egui::Context) {
    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(10.0, 4.0);
        style.visuals.selection.bg_fill = ACCENT;
    });
}

/// Inline error strip; returns true when the user dismissed it.
pub fn error_banner(ui: &mut egui::Ui, message: &str, dismissible: bool) -> bool {
    let mut dismissed = false;
    egui::Frame::NONE
        .fill(ERROR_FILL)
        .stroke(egui::Stroke::new(1.0, ERROR_STROKE))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
                if dismissible {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        dismissed = ui.button("Dismiss").clicked();
                    });
                }
            });
        });
    dismissed
}
