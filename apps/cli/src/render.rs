//! Plain-text rendering of the patient list view for the terminal.

use std::fmt::Write as _;

use client_core::view::{admission_date_label, ListBody, PatientCard, PatientListView};
use shared::protocol::PatientRecord;

pub fn render_list(view: &PatientListView) -> String {
    let mut out = String::new();
    if let Some(banner) = &view.error_banner {
        let _ = writeln!(out, "! Could not refresh patients: {banner}");
    }
    let _ = writeln!(out, "{}", view.result_count_label());

    match &view.body {
        ListBody::Skeleton { placeholders } => {
            for _ in 0..*placeholders {
                let _ = writeln!(out, "  ...");
            }
        }
        ListBody::Empty(empty) => {
            let _ = writeln!(out, "{}", empty.title);
            let _ = writeln!(out, "{}", empty.hint);
            if empty.offers_add {
                let _ = writeln!(out, "Add one with: patient-records add --name ...");
            }
        }
        ListBody::Cards(cards) => {
            for card in cards {
                render_card(&mut out, card);
            }
        }
    }
    out
}

fn render_card(out: &mut String, card: &PatientCard) {
    let mut tags = vec![card.id_label.clone()];
    tags.extend(card.bed_label.clone());
    tags.push(card.gender.clone());
    tags.push(card.age_label.clone());

    let _ = writeln!(out);
    let _ = writeln!(out, "[{}] {}", card.initial, card.name);
    let _ = writeln!(out, "    {}", tags.join(" • "));
    let _ = writeln!(out, "    Diagnosis: {}", card.diagnosis);
    let _ = writeln!(out, "    {}", card.admitted_label);
    let _ = writeln!(out, "    Monitor: {}", card.monitor_route);
}

pub fn render_detail(record: &PatientRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (ID #{})", record.patient_name, record.patient_id);
    let _ = writeln!(out, "  Age:       {}", record.age);
    let _ = writeln!(out, "  Gender:    {}", record.gender);
    let _ = writeln!(out, "  Diagnosis: {}", record.diagnosis);
    let _ = writeln!(out, "  Admitted:  {}", admission_date_label(record));
    let bed = record
        .bed_id
        .map(|bed_id| format!("#{bed_id}"))
        .unwrap_or_else(|| "unassigned".to_string());
    let _ = writeln!(out, "  Bed:       {bed}");
    out
}
