use client_core::Route;
use eframe::egui;

use crate::ui::theme;

const FEATURES: [(&str, &str); 3] = [
    (
        "AI Vision Analysis",
        "Extract vitals straight from bedside monitor feeds.",
    ),
    (
        "Live Monitoring",
        "Follow every admitted patient in real time from one screen.",
    ),
    (
        "Patient Dashboards",
        "Drill into a single patient's record and current bed.",
    ),
];

pub fn show_landing(ctx: &egui::Context) -> Option<Route> {
    let mut navigate_to = None;

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(48.0);
                ui.label(
                    egui::RichText::new("Tele-Sanjeevani")
                        .size(40.0)
                        .strong()
                        .color(theme::ACCENT),
                );
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new(
                        "Revolutionizing critical care with real-time AI monitoring, instant vital extraction, and seamless patient management infrastructure.",
                    )
                    .size(16.0),
                );
                ui.add_space(20.0);
                if ui
                    .add(egui::Button::new(
                        egui::RichText::new("View patient records").size(16.0),
                    ))
                    .clicked()
                {
                    navigate_to = Some(Route::PatientRecords);
                }
                ui.add_space(36.0);
            });

            ui.horizontal_wrapped(|ui| {
                for (title, blurb) in FEATURES {
                    egui::Frame::group(ui.style()).show(ui, |ui| {
                        ui.set_width(260.0);
                        ui.label(egui::RichText::new(title).strong().size(16.0));
                        ui.weak(blurb);
                    });
                }
            });

            ui.add_space(36.0);
            ui.vertical_centered(|ui| {
                ui.separator();
                ui.weak("2025 Tele-Sanjeevani");
                ui.weak("Empowering Healthcare with Artificial Intelligence");
            });
        });
    });

    navigate_to
}
