//! Add-patient and delete-confirmation dialogs.

use eframe::egui;
use shared::{
    domain::{BedId, PatientId},
    protocol::NewPatient,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    Open,
    Submit,
    Cancel,
}

#[derive(Debug, Clone, Default)]
pub struct AddPatientForm {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub diagnosis: String,
    pub admission_date: String,
    pub bed_id: String,
    pub error: Option<String>,
    pub submitting: bool,
}

impl AddPatientForm {
    pub fn to_new_patient(&self) -> Result<NewPatient, String> {
        let age = self
            .age
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("Age must be a whole number, got '{}'", self.age.trim()))?;
        let bed_id = match self.bed_id.trim() {
            "" => None,
            raw => Some(BedId(raw.parse::<i64>().map_err(|_| {
                format!("Bed must be a number or left empty, got '{raw}'")
            })?)),
        };

        let patient = NewPatient {
            patient_name: self.name.clone(),
            age,
            gender: self.gender.clone(),
            diagnosis: self.diagnosis.clone(),
            admission_date: self.admission_date.clone(),
            bed_id,
        }
        .normalized();
        patient.validate().map_err(|err| err.message)?;
        Ok(patient)
    }
}

pub fn show_add_patient_dialog(ctx: &egui::Context, form: &mut AddPatientForm) -> DialogOutcome {
    let mut open = true;
    let mut outcome = DialogOutcome::Open;

    egui::Window::new("Add patient")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            egui::Grid::new("add_patient_form")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    form_row(ui, "Name", &mut form.name, "Asha Rao");
                    form_row(ui, "Age", &mut form.age, "34");
                    form_row(ui, "Gender", &mut form.gender, "F");
                    form_row(ui, "Diagnosis", &mut form.diagnosis, "Pneumonia");
                    form_row(ui, "Admitted", &mut form.admission_date, "YYYY-MM-DD");
                    form_row(ui, "Bed", &mut form.bed_id, "optional");
                });

            if let Some(error) = &form.error {
                ui.colored_label(ui.visuals().error_fg_color, error.as_str());
            }

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let label = if form.submitting { "Saving..." } else { "Add patient" };
                if ui
                    .add_enabled(!form.submitting, egui::Button::new(label))
                    .clicked()
                {
                    outcome = DialogOutcome::Submit;
                }
                if ui.button("Cancel").clicked() {
                    outcome = DialogOutcome::Cancel;
                }
                if form.submitting {
                    ui.spinner();
                }
            });
        });

    if !open {
        DialogOutcome::Cancel
    } else {
        outcome
    }
}

fn form_row(ui: &mut egui::Ui, label: &str, value: &mut String, hint: &str) {
    ui.label(label);
    ui.add(egui::TextEdit::singleline(value).hint_text(hint));
    ui.end_row();
}

#[derive(Debug, Clone)]
pub struct PendingDelete {
    pub patient_id: PatientId,
    pub patient_name: String,
    pub error: Option<String>,
    pub submitting: bool,
}

impl PendingDelete {
    pub fn new(patient_id: PatientId, patient_name: impl Into<String>) -> Self {
        Self {
            patient_id,
            patient_name: patient_name.into(),
            error: None,
            submitting: false,
        }
    }
}

pub fn show_delete_dialog(ctx: &egui::Context, pending: &mut PendingDelete) -> DialogOutcome {
    let mut open = true;
    let mut outcome = DialogOutcome::Open;

    egui::Window::new("Delete patient")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(format!(
                "Remove {} (ID #{}) from the system? This cannot be undone.",
                pending.patient_name, pending.patient_id
            ));
            if let Some(error) = &pending.error {
                ui.colored_label(ui.visuals().error_fg_color, error.as_str());
            }
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let delete = egui::Button::new(
                    egui::RichText::new("Delete").color(ui.visuals().error_fg_color),
                );
                if ui.add_enabled(!pending.submitting, delete).clicked() {
                    outcome = DialogOutcome::Submit;
                }
                if ui.button("Cancel").clicked() {
                    outcome = DialogOutcome::Cancel;
                }
                if pending.submitting {
                    ui.spinner();
                }
            });
        });

    if !open {
        DialogOutcome::Cancel
    } else {
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> AddPatientForm {
        AddPatientForm {
            name: " Asha Rao ".to_string(),
            age: "34".to_string(),
            gender: "F".to_string(),
            diagnosis: "Pneumonia".to_string(),
            admission_date: "2025-01-02".to_string(),
            bed_id: " 5 ".to_string(),
            ..AddPatientForm::default()
        }
    }

    #[test]
    fn builds_trimmed_request_from_form() {
        let patient = filled_form().to_new_patient().expect("valid form");

        assert_eq!(patient.patient_name, "Asha Rao");
        assert_eq!(patient.age, 34);
        assert_eq!(patient.bed_id, Some(BedId(5)));
    }

    #[test]
    fn empty_bed_means_unassigned() {
        let mut form = filled_form();
        form.bed_id = "  ".to_string();

        assert_eq!(form.to_new_patient().expect("valid form").bed_id, None);
    }

    #[test]
    fn rejects_non_numeric_age_and_bed() {
        let mut form = filled_form();
        form.age = "thirty".to_string();
        assert!(form.to_new_patient().expect_err("age").contains("Age"));

        let mut form = filled_form();
        form.bed_id = "A4".to_string();
        assert!(form.to_new_patient().expect_err("bed").contains("Bed"));
    }

    #[test]
    fn surfaces_record_validation_messages() {
        let mut form = filled_form();
        form.admission_date = "tomorrow".to_string();

        assert!(form
            .to_new_patient()
            .expect_err("date")
            .contains("YYYY-MM-DD"));
    }
}
