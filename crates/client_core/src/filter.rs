//! Search predicate for the patient list.

use shared::protocol::PatientRecord;

/// `needle` must already be lowercase.
pub fn matches_search(record: &PatientRecord, needle: &str) -> bool {
    needle.is_empty()
        || record.patient_name.to_lowercase().contains(needle)
        || record.patient_id.0.to_string().contains(needle)
        || record.diagnosis.to_lowercase().contains(needle)
}

pub fn filter_records(records: &[PatientRecord], search_text: &str) -> Vec<PatientRecord> {
    let needle = search_text.to_lowercase();
    if needle.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|record| matches_search(record, &needle))
        .cloned()
        .collect()
}
