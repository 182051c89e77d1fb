use client_core::{ClientError, RefreshToken};
use crossbeam_channel::{bounded, Receiver, Sender};
use shared::{
    domain::{BedId, PatientId},
    error::ErrorCode,
    protocol::PatientRecord,
};

use super::*;
use crate::backend_bridge::runtime::startup_failure_event;
use crate::ui::dialogs::AddPatientForm;

struct Harness {
    app: PatientRecordsApp,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
}

fn harness(route: Route) -> Harness {
    let (cmd_tx, cmd_rx) = bounded(16);
    let (ui_tx, ui_rx) = bounded(16);
    let app = PatientRecordsApp::new(cmd_tx, ui_rx, "http://localhost:3000".to_string(), route);
    Harness { app, cmd_rx, ui_tx }
}

fn patient(id: i64, name: &str) -> PatientRecord {
    PatientRecord {
        patient_id: PatientId(id),
        patient_name: name.to_string(),
        age: 40,
        gender: "M".to_string(),
        diagnosis: "Sepsis".to_string(),
        admission_date: "2025-03-04".to_string(),
        bed_id: Some(BedId(id)),
    }
}

fn expect_fetch(cmd_rx: &Receiver<BackendCommand>) -> (ViewId, RefreshToken) {
    match cmd_rx.try_recv() {
        Ok(BackendCommand::FetchPatients { view, token }) => (view, token),
        Ok(other) => panic!("expected fetch, got {}", other.name()),
        Err(err) => panic!("expected fetch, queue empty: {err}"),
    }
}

fn records(app: &mut PatientRecordsApp) -> &mut RecordsView {
    match &mut app.screen {
        Screen::Records(view) => view,
        _ => panic!("records screen not mounted"),
    }
}

#[test]
fn landing_mounts_without_fetching() {
    let h = harness(Route::Landing);

    assert!(matches!(h.app.screen, Screen::Landing));
    assert!(h.cmd_rx.try_recv().is_err());
}

#[test]
fn mounting_records_fetches_once_and_applies_result() {
    let mut h = harness(Route::PatientRecords);
    let (view, token) = expect_fetch(&h.cmd_rx);
    assert!(h.cmd_rx.try_recv().is_err());
    assert!(records(&mut h.app).patients.is_loading());

    h.ui_tx
        .try_send(UiEvent::PatientsFetched {
            view,
            token,
            result: Ok(vec![patient(1, "Asha"), patient(2, "Ravi")]),
        })
        .expect("queue event");
    h.app.process_ui_events();

    let patients = &records(&mut h.app).patients;
    assert!(!patients.is_loading());
    assert_eq!(patients.result_count(), 2);
    assert_eq!(h.app.status, "Loaded 2 patients");
}

#[test]
fn results_for_an_unmounted_view_are_dropped() {
    let mut h = harness(Route::PatientRecords);
    let (old_view, old_token) = expect_fetch(&h.cmd_rx);

    h.app.navigate(Route::Landing);
    h.app.navigate(Route::PatientRecords);
    let (new_view, _) = expect_fetch(&h.cmd_rx);
    assert_ne!(old_view, new_view);

    h.ui_tx
        .try_send(UiEvent::PatientsFetched {
            view: old_view,
            token: old_token,
            result: Ok(vec![patient(9, "Stale")]),
        })
        .expect("queue event");
    h.app.process_ui_events();

    let patients = &records(&mut h.app).patients;
    assert!(patients.is_loading());
    assert!(patients.all_records().is_empty());
}

#[test]
fn mutation_refresh_request_issues_exactly_one_fetch() {
    let mut h = harness(Route::PatientRecords);
    let (view, token) = expect_fetch(&h.cmd_rx);
    h.ui_tx
        .try_send(UiEvent::PatientsFetched {
            view,
            token,
            result: Ok(vec![patient(1, "Asha")]),
        })
        .expect("queue event");
    h.app.process_ui_events();

    let handle = records(&mut h.app).patients.refresh_handle();
    assert!(handle.request());
    h.app.poll_refresh_requests();
    h.app.poll_refresh_requests();

    let (refetch_view, _) = expect_fetch(&h.cmd_rx);
    assert_eq!(refetch_view, view);
    assert!(h.cmd_rx.try_recv().is_err());
}

#[test]
fn failed_refresh_keeps_records_and_reports_status() {
    let mut h = harness(Route::PatientRecords);
    let (view, token) = expect_fetch(&h.cmd_rx);
    h.ui_tx
        .try_send(UiEvent::PatientsFetched {
            view,
            token,
            result: Ok(vec![patient(1, "Asha")]),
        })
        .expect("queue event");
    h.app.process_ui_events();

    h.app.request_refresh();
    let (view, token) = expect_fetch(&h.cmd_rx);
    h.ui_tx
        .try_send(UiEvent::PatientsFetched {
            view,
            token,
            result: Err("request to patients backend failed: connection refused".to_string()),
        })
        .expect("queue event");
    h.app.process_ui_events();

    let patients = &records(&mut h.app).patients;
    assert_eq!(patients.all_records().len(), 1);
    assert!(patients.last_error().is_some());
    assert!(h.app.status.contains("unreachable"));
}

#[test]
fn created_event_closes_add_dialog() {
    let mut h = harness(Route::PatientRecords);
    records(&mut h.app).add_form = Some(AddPatientForm {
        submitting: true,
        ..AddPatientForm::default()
    });

    h.ui_tx
        .try_send(UiEvent::PatientCreated {
            patient_name: "Asha".to_string(),
        })
        .expect("queue event");
    h.app.process_ui_events();

    assert!(records(&mut h.app).add_form.is_none());
    assert_eq!(h.app.status, "Added Asha");
}

#[test]
fn failed_create_reopens_form_with_error() {
    let mut h = harness(Route::PatientRecords);
    records(&mut h.app).add_form = Some(AddPatientForm {
        submitting: true,
        ..AddPatientForm::default()
    });

    h.ui_tx
        .try_send(UiEvent::Error(UiError::from_client_error(
            UiErrorContext::AddPatient,
            &ClientError::Status {
                status: 422,
                code: Some(ErrorCode::Validation),
                message: "bed 5 is occupied".to_string(),
            },
        )))
        .expect("queue event");
    h.app.process_ui_events();

    let form = records(&mut h.app).add_form.as_ref().expect("form still open");
    assert!(!form.submitting);
    assert!(form
        .error
        .as_deref()
        .is_some_and(|e| e.starts_with("Check the form") && e.contains("bed 5")));
    assert!(h.app.status_banner.is_none());
}

#[test]
fn dashboard_mounts_its_own_list() {
    let h = harness(Route::dashboard(PatientId(3)));

    let (view, _) = expect_fetch(&h.cmd_rx);
    match &h.app.screen {
        Screen::Dashboard(dashboard) => {
            assert_eq!(dashboard.id, view);
            assert_eq!(dashboard.patient_id, PatientId(3));
        }
        _ => panic!("dashboard not mounted"),
    }
}

#[test]
fn unqueued_fetch_raises_status_banner() {
    let (cmd_tx, cmd_rx) = bounded(16);
    let (_ui_tx, ui_rx) = bounded::<UiEvent>(16);
    drop(cmd_rx);

    let app = PatientRecordsApp::new(
        cmd_tx,
        ui_rx,
        "http://localhost:3000".to_string(),
        Route::PatientRecords,
    );

    assert!(app
        .status_banner
        .as_deref()
        .is_some_and(|banner| banner.starts_with("Backend unreachable")));
}

#[test]
fn dead_worker_does_not_leave_records_loading() {
    let (cmd_tx, cmd_rx) = bounded(16);
    let (_ui_tx, ui_rx) = bounded::<UiEvent>(16);
    drop(cmd_rx);

    let mut app = PatientRecordsApp::new(
        cmd_tx,
        ui_rx,
        "http://localhost:3000".to_string(),
        Route::PatientRecords,
    );
    app.process_ui_events();

    let patients = &records(&mut app).patients;
    assert!(!patients.is_loading());
    assert!(patients
        .last_error()
        .is_some_and(|reason| reason.contains("disconnected")));
}

#[test]
fn worker_startup_failure_answers_initial_fetch() {
    let mut h = harness(Route::PatientRecords);
    let cmd = h.cmd_rx.try_recv().expect("initial fetch queued");

    h.ui_tx
        .try_send(startup_failure_event(
            cmd,
            "backend worker startup failure: bad tls",
        ))
        .expect("queue event");
    h.app.process_ui_events();

    let patients = &records(&mut h.app).patients;
    assert!(!patients.is_loading());
    assert!(patients
        .last_error()
        .is_some_and(|reason| reason.contains("bad tls")));
}

#[test]
fn full_queue_keeps_in_flight_fetch_current() {
    let (cmd_tx, cmd_rx) = bounded(1);
    let (ui_tx, ui_rx) = bounded(16);
    let mut app = PatientRecordsApp::new(
        cmd_tx,
        ui_rx,
        "http://localhost:3000".to_string(),
        Route::PatientRecords,
    );

    assert!(records(&mut app).patients.refresh_handle().request());
    app.poll_refresh_requests();
    let (view, token) = expect_fetch(&cmd_rx);
    assert!(cmd_rx.try_recv().is_err());

    ui_tx
        .try_send(UiEvent::PatientsFetched {
            view,
            token,
            result: Ok(vec![patient(1, "Asha")]),
        })
        .expect("queue event");
    app.process_ui_events();

    let patients = &records(&mut app).patients;
    assert!(!patients.is_loading());
    assert_eq!(patients.result_count(), 1);
}
