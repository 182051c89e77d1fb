//! Monitoring dashboard for a single patient, reached from a card's Monitor button.

use client_core::{view::admission_date_label, PatientListController, Route};
use eframe::egui;
use shared::domain::PatientId;

use crate::controller::events::ViewId;
use crate::ui::theme;

pub struct DashboardView {
    pub id: ViewId,
    pub patient_id: PatientId,
    pub patients: PatientListController,
}

impl DashboardView {
    pub fn new(id: ViewId, patient_id: PatientId) -> Self {
        Self {
            id,
            patient_id,
            patients: PatientListController::new(),
        }
    }

    pub fn show(&mut self, ctx: &egui::Context) -> Option<Route> {
        let mut navigate_to = None;

        egui::TopBottomPanel::top("dashboard_header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.button("Back to records").clicked() {
                    navigate_to = Some(Route::PatientRecords);
                }
                ui.heading(format!("Patient #{} monitor", self.patient_id));
            });
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(reason) = self.patients.last_error() {
                theme::error_banner(ui, &format!("Could not load patient: {reason}"), false);
                ui.add_space(8.0);
            }

            if self.patients.is_loading() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.weak("Loading patient...");
                });
                return;
            }

            let Some(record) = self.patients.find(self.patient_id) else {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.heading("Patient not found");
                    ui.weak(format!(
                        "No patient with ID #{} is currently admitted.",
                        self.patient_id
                    ));
                });
                return;
            };

            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.label(
                    egui::RichText::new(record.patient_name.as_str())
                        .size(22.0)
                        .strong(),
                );
                ui.add_space(6.0);
                egui::Grid::new("patient_details")
                    .num_columns(2)
                    .spacing([16.0, 6.0])
                    .show(ui, |ui| {
                        detail_row(ui, "Age", &format!("{} yrs", record.age));
                        detail_row(ui, "Gender", &record.gender);
                        detail_row(ui, "Diagnosis", &record.diagnosis);
                        detail_row(ui, "Admitted", &admission_date_label(record));
                        let bed = record
                            .bed_id
                            .map(|bed_id| format!("Bed #{bed_id}"))
                            .unwrap_or_else(|| "Unassigned".to_string());
                        detail_row(ui, "Bed", &bed);
                    });
            });
        });

        navigate_to
    }
}

fn detail_row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.weak(label);
    ui.label(value);
    ui.end_row();
}
