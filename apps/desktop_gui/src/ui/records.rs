//! Patient records page: search, result count, card grid and mutation dialogs.

use client_core::{
    view::{ListBody, PatientCard, PatientListView, SEARCH_PLACEHOLDER},
    PatientListController, Route,
};
use eframe::egui;
use shared::{domain::PatientId, protocol::NewPatient};

use crate::controller::events::ViewId;
use crate::ui::dialogs::{
    show_add_patient_dialog, show_delete_dialog, AddPatientForm, DialogOutcome, PendingDelete,
};
use crate::ui::theme;

const CARD_WIDTH: f32 = 300.0;
const SKELETON_CARD_HEIGHT: f32 = 170.0;

pub enum RecordsAction {
    Navigate(Route),
    Create(NewPatient),
    Delete {
        patient_id: PatientId,
        patient_name: String,
    },
}

enum CardAction {
    Monitor(Route),
    Delete(PatientId, String),
}

pub struct RecordsView {
    pub id: ViewId,
    pub patients: PatientListController,
    search_input: String,
    pub add_form: Option<AddPatientForm>,
    pub pending_delete: Option<PendingDelete>,
}

impl RecordsView {
    pub fn new(id: ViewId) -> Self {
        Self {
            id,
            patients: PatientListController::new(),
            search_input: String::new(),
            add_form: None,
            pending_delete: None,
        }
    }

    /// Reopens whichever dialog has a submission in flight with `message` as its error.
    pub fn mutation_rejected(&mut self, message: &str) {
        if let Some(form) = self.add_form.as_mut().filter(|form| form.submitting) {
            form.submitting = false;
            form.error = Some(message.to_string());
        }
        if let Some(pending) = self.pending_delete.as_mut().filter(|p| p.submitting) {
            pending.submitting = false;
            pending.error = Some(message.to_string());
        }
    }

    pub fn show(&mut self, ctx: &egui::Context) -> Vec<RecordsAction> {
        let mut actions = Vec::new();

        egui::TopBottomPanel::top("records_header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Patient Records");
                ui.weak("Manage and monitor all admitted patients");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Add patient").clicked() && self.add_form.is_none() {
                        self.add_form = Some(AddPatientForm::default());
                    }
                    if ui.button("Back to Home").clicked() {
                        actions.push(RecordsAction::Navigate(Route::Landing));
                    }
                });
            });
            ui.add_space(6.0);
        });

        let mut card_actions = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            let search = ui.add(
                egui::TextEdit::singleline(&mut self.search_input)
                    .hint_text(SEARCH_PLACEHOLDER)
                    .desired_width(360.0),
            );
            if search.changed() {
                self.patients.set_search_text(self.search_input.clone());
            }

            let view = PatientListView::from_controller(&self.patients);
            ui.weak(view.result_count_label());
            if let Some(reason) = &view.error_banner {
                theme::error_banner(ui, &format!("Could not refresh patients: {reason}"), false);
            }
            ui.add_space(8.0);

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| match &view.body {
                    ListBody::Skeleton { placeholders } => show_skeleton(ui, *placeholders),
                    ListBody::Empty(empty) => {
                        ui.vertical_centered(|ui| {
                            ui.add_space(40.0);
                            ui.heading(empty.title);
                            ui.weak(empty.hint);
                            if empty.offers_add && ui.button("Add patient").clicked() {
                                self.add_form.get_or_insert_with(AddPatientForm::default);
                            }
                        });
                    }
                    ListBody::Cards(cards) => {
                        ui.horizontal_wrapped(|ui| {
                            for card in cards {
                                show_card(ui, card, &mut card_actions);
                            }
                        });
                    }
                });
        });

        for action in card_actions {
            match action {
                CardAction::Monitor(route) => actions.push(RecordsAction::Navigate(route)),
                CardAction::Delete(patient_id, patient_name) => {
                    self.pending_delete = Some(PendingDelete::new(patient_id, patient_name));
                }
            }
        }

        self.show_dialogs(ctx, &mut actions);
        actions
    }

    fn show_dialogs(&mut self, ctx: &egui::Context, actions: &mut Vec<RecordsAction>) {
        if let Some(form) = self.add_form.as_mut() {
            match show_add_patient_dialog(ctx, form) {
                DialogOutcome::Submit => match form.to_new_patient() {
                    Ok(patient) => {
                        form.submitting = true;
                        form.error = None;
                        actions.push(RecordsAction::Create(patient));
                    }
                    Err(message) => form.error = Some(message),
                },
                DialogOutcome::Cancel => self.add_form = None,
                DialogOutcome::Open => {}
            }
        }

        if let Some(pending) = self.pending_delete.as_mut() {
            match show_delete_dialog(ctx, pending) {
                DialogOutcome::Submit => {
                    pending.submitting = true;
                    pending.error = None;
                    actions.push(RecordsAction::Delete {
                        patient_id: pending.patient_id,
                        patient_name: pending.patient_name.clone(),
                    });
                }
                DialogOutcome::Cancel => self.pending_delete = None,
                DialogOutcome::Open => {}
            }
        }
    }
}

fn show_skeleton(ui: &mut egui::Ui, placeholders: usize) {
    ui.horizontal_wrapped(|ui| {
        for _ in 0..placeholders {
            let (rect, _) = ui.allocate_exact_size(
                egui::vec2(CARD_WIDTH, SKELETON_CARD_HEIGHT),
                egui::Sense::hover(),
            );
            let fill = ui.visuals().faint_bg_color;
            ui.painter().rect_filled(rect, 12.0, fill);
        }
    });
    ui.ctx().request_repaint();
}

fn show_card(ui: &mut egui::Ui, card: &PatientCard, actions: &mut Vec<CardAction>) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(CARD_WIDTH);
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(card.initial.as_str())
                    .size(24.0)
                    .strong()
                    .color(theme::ACCENT),
            );
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(card.name.as_str()).size(16.0).strong());
                ui.horizontal_wrapped(|ui| {
                    ui.weak(card.id_label.as_str());
                    if let Some(bed) = &card.bed_label {
                        ui.colored_label(theme::ACCENT, bed.as_str());
                    }
                    ui.weak(card.gender.as_str());
                    ui.weak(card.age_label.as_str());
                });
            });
        });
        ui.separator();
        ui.label(egui::RichText::new("DIAGNOSIS").small().weak());
        ui.label(card.diagnosis.as_str());
        ui.weak(card.admitted_label.as_str());
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            if ui.button("Monitor").clicked() {
                actions.push(CardAction::Monitor(card.monitor_route));
            }
            if ui.button("Delete").clicked() {
                actions.push(CardAction::Delete(card.patient_id, card.name.clone()));
            }
        });
    });
}
