//! Render model for the patient list page, independent of any UI toolkit.

use shared::{domain::PatientId, protocol::PatientRecord};

use crate::{controller::PatientListController, routes::Route};

pub const SKELETON_CARD_COUNT: usize = 6;
pub const SEARCH_PLACEHOLDER: &str = "Search by name, ID, or diagnosis...";
const ADMISSION_DATE_FORMAT: &str = "%d %b %Y";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientListView {
    pub result_count: usize,
    pub body: ListBody,
    pub error_banner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListBody {
    Skeleton { placeholders: usize },
    Empty(EmptyState),
    Cards(Vec<PatientCard>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub title: &'static str,
    pub hint: &'static str,
    pub offers_add: bool,
}

impl Default for EmptyState {
    fn default() -> Self {
        Self {
            title: "No patients found",
            hint: "Try adjusting your search terms or add a new patient to the system.",
            offers_add: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientCard {
    pub patient_id: PatientId,
    pub initial: String,
    pub name: String,
    pub id_label: String,
    pub bed_label: Option<String>,
    pub gender: String,
    pub age_label: String,
    pub diagnosis: String,
    pub admitted_label: String,
    pub monitor_route: Route,
}

impl PatientCard {
    pub fn from_record(record: &PatientRecord) -> Self {
        Self {
            patient_id: record.patient_id,
            initial: record
                .patient_name
                .chars()
                .next()
                .map(String::from)
                .unwrap_or_default(),
            name: record.patient_name.clone(),
            id_label: format!("ID: #{}", record.patient_id),
            bed_label: record.bed_id.map(|bed_id| format!("Bed #{bed_id}")),
            gender: record.gender.clone(),
            age_label: format!("{} yrs", record.age),
            diagnosis: record.diagnosis.clone(),
            admitted_label: format!("Admitted: {}", admission_date_label(record)),
            monitor_route: Route::dashboard(record.patient_id),
        }
    }
}

/// Display form of the admission date; unparseable values are shown verbatim.
pub fn admission_date_label(record: &PatientRecord) -> String {
    match record.admission_date() {
        Some(date) => date.format(ADMISSION_DATE_FORMAT).to_string(),
        None => record.admission_date.clone(),
    }
}

impl PatientListView {
    pub fn from_controller(controller: &PatientListController) -> Self {
        let body = if controller.is_loading() {
            ListBody::Skeleton {
                placeholders: SKELETON_CARD_COUNT,
            }
        } else if controller.filtered_records().is_empty() {
            ListBody::Empty(EmptyState::default())
        } else {
            ListBody::Cards(
                controller
                    .filtered_records()
                    .iter()
                    .map(PatientCard::from_record)
                    .collect(),
            )
        };

        Self {
            result_count: controller.result_count(),
            body,
            error_banner: controller.last_error().map(str::to_string),
        }
    }

    pub fn result_count_label(&self) -> String {
        format!("{} patients found", self.result_count)
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
