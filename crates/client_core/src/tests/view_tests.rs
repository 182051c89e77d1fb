use super::*;
use shared::domain::BedId;

use crate::error::ClientError;

fn asha() -> PatientRecord {
    PatientRecord {
        patient_id: PatientId(1),
        patient_name: "asha Rao".to_string(),
        age: 34,
        gender: "F".to_string(),
        diagnosis: "Pneumonia".to_string(),
        admission_date: "2025-01-02".to_string(),
        bed_id: Some(BedId(5)),
    }
}

fn loaded_with(records: Vec<PatientRecord>) -> PatientListController {
    let mut controller = PatientListController::new();
    let token = controller.begin_refresh();
    controller.complete_refresh::<ClientError>(token, Ok(records));
    controller
}

#[test]
fn loading_shows_skeletons_and_zero_count() {
    let view = PatientListView::from_controller(&PatientListController::new());

    assert_eq!(
        view.body,
        ListBody::Skeleton {
            placeholders: SKELETON_CARD_COUNT
        }
    );
    assert_eq!(view.result_count, 0);
    assert_eq!(view.result_count_label(), "0 patients found");
    assert_eq!(view.error_banner, None);
}

#[test]
fn empty_backend_list_offers_add_entry_point() {
    let view = PatientListView::from_controller(&loaded_with(Vec::new()));

    match view.body {
        ListBody::Empty(empty) => {
            assert_eq!(empty.title, "No patients found");
            assert!(empty.offers_add);
        }
        other => panic!("expected empty state, got {other:?}"),
    }
}

#[test]
fn search_without_matches_shows_empty_state() {
    let mut controller = loaded_with(vec![asha()]);
    controller.set_search_text("99");

    let view = PatientListView::from_controller(&controller);

    assert!(matches!(view.body, ListBody::Empty(_)));
    assert_eq!(view.result_count, 0);
}

#[test]
fn card_carries_labels_and_monitor_route() {
    let view = PatientListView::from_controller(&loaded_with(vec![asha()]));

    let ListBody::Cards(cards) = view.body else {
        panic!("expected cards");
    };
    let card = &cards[0];
    assert_eq!(card.initial, "a");
    assert_eq!(card.id_label, "ID: #1");
    assert_eq!(card.bed_label.as_deref(), Some("Bed #5"));
    assert_eq!(card.age_label, "34 yrs");
    assert_eq!(card.admitted_label, "Admitted: 02 Jan 2025");
    assert_eq!(card.monitor_route.path(), "/dashboard?patientId=1");
    assert_eq!(view.result_count, 1);
}

#[test]
fn unassigned_bed_has_no_label_and_odd_dates_pass_through() {
    let mut record = asha();
    record.bed_id = None;
    record.admission_date = "unknown".to_string();

    let card = PatientCard::from_record(&record);

    assert_eq!(card.bed_label, None);
    assert_eq!(card.admitted_label, "Admitted: unknown");
}

#[test]
fn initial_keeps_the_first_character_as_entered() {
    let mut record = asha();
    record.patient_name = "ravi kumar".to_string();

    let card = PatientCard::from_record(&record);

    assert_eq!(card.initial, "r");
    assert_eq!(card.name, "ravi kumar");
}

#[test]
fn result_count_label_never_singularizes() {
    let mut controller = loaded_with(vec![asha()]);
    assert_eq!(
        PatientListView::from_controller(&controller).result_count_label(),
        "1 patients found"
    );

    controller.set_search_text("nobody");
    assert_eq!(
        PatientListView::from_controller(&controller).result_count_label(),
        "0 patients found"
    );
}

#[test]
fn failed_refresh_keeps_cards_and_adds_banner() {
    let mut controller = loaded_with(vec![asha()]);
    let token = controller.begin_refresh();
    controller.complete_refresh(
        token,
        Err(ClientError::Decode("expected a list".to_string())),
    );

    let view = PatientListView::from_controller(&controller);

    assert!(matches!(view.body, ListBody::Cards(ref cards) if cards.len() == 1));
    assert_eq!(view.result_count_label(), "1 patients found");
    assert!(view
        .error_banner
        .is_some_and(|banner| banner.contains("expected a list")));
}
