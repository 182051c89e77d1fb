//! Backend worker: owns the tokio runtime and the patients client, serves UI commands.

use std::{sync::Arc, thread};

use client_core::{apply_mutation, ClientSettings, PatientMutation, PatientsApi, PatientsClient};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: ClientSettings) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let reason = format!("backend worker startup failure: failed to build runtime: {err}");
                reject_commands(&cmd_rx, &ui_tx, &reason);
                return;
            }
        };

        let client = match PatientsClient::from_settings(&settings) {
            Ok(client) => Arc::new(client),
            Err(err) => {
                tracing::error!("failed to build patients client: {err}");
                let reason = format!("backend worker startup failure: {err}");
                reject_commands(&cmd_rx, &ui_tx, &reason);
                return;
            }
        };

        runtime.block_on(serve_commands(cmd_rx, ui_tx, client));
    });
}

/// Reports the startup failure, then answers every command with it until the UI hangs up.
fn reject_commands(cmd_rx: &Receiver<BackendCommand>, ui_tx: &Sender<UiEvent>, reason: &str) {
    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
        UiErrorContext::BackendStartup,
        reason,
    )));
    for cmd in cmd_rx.iter() {
        let _ = ui_tx.try_send(startup_failure_event(cmd, reason));
    }
}

pub(crate) fn startup_failure_event(cmd: BackendCommand, reason: &str) -> UiEvent {
    match cmd {
        BackendCommand::FetchPatients { view, token } => UiEvent::PatientsFetched {
            view,
            token,
            result: Err(reason.to_string()),
        },
        BackendCommand::CreatePatient { .. } => {
            UiEvent::Error(UiError::from_message(UiErrorContext::AddPatient, reason))
        }
        BackendCommand::DeletePatient { .. } => {
            UiEvent::Error(UiError::from_message(UiErrorContext::DeletePatient, reason))
        }
    }
}

async fn serve_commands(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    client: Arc<PatientsClient>,
) {
    tracing::info!(server_url = client.server_url(), "backend worker ready");
    let _ = ui_tx.try_send(UiEvent::Info(format!(
        "Connected to {}",
        client.server_url()
    )));

    while let Ok(cmd) = cmd_rx.recv() {
        let client = Arc::clone(&client);
        let ui_tx = ui_tx.clone();
        // One task per command; overlapping fetches race and the list
        // controller keeps only the newest token.
        tokio::spawn(async move {
            let event = handle_command(client.as_ref(), cmd).await;
            let _ = ui_tx.try_send(event);
        });
    }
    tracing::info!("ui command channel closed; backend worker exiting");
}

async fn handle_command(client: &PatientsClient, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::FetchPatients { view, token } => UiEvent::PatientsFetched {
            view,
            token,
            result: client.list_patients().await.map_err(|err| err.to_string()),
        },
        BackendCommand::CreatePatient {
            patient,
            on_complete,
        } => {
            let patient_name = patient.patient_name.trim().to_string();
            match apply_mutation(client, &PatientMutation::Create(patient), &on_complete).await {
                Ok(()) => UiEvent::PatientCreated { patient_name },
                Err(err) => UiEvent::Error(UiError::from_client_error(
                    UiErrorContext::AddPatient,
                    &err,
                )),
            }
        }
        BackendCommand::DeletePatient {
            patient_id,
            patient_name,
            on_complete,
        } => {
            let mutation = PatientMutation::Delete { patient_id };
            match apply_mutation(client, &mutation, &on_complete).await {
                Ok(()) => UiEvent::PatientDeleted {
                    patient_id,
                    patient_name,
                },
                Err(err) => UiEvent::Error(UiError::from_client_error(
                    UiErrorContext::DeletePatient,
                    &err,
                )),
            }
        }
    }
}
