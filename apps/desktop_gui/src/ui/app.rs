use std::time::Duration;

use client_core::{PatientListController, RefreshOutcome, Route};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{
    classify_fetch_failure, UiError, UiErrorContext, UiEvent, ViewId,
};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::dashboard::DashboardView;
use crate::ui::landing::show_landing;
use crate::ui::records::{RecordsAction, RecordsView};
use crate::ui::theme;

pub enum Screen {
    Landing,
    Records(RecordsView),
    Dashboard(DashboardView),
}

/// The mounted list controller, if the current screen has one.
fn mounted_list(screen: &mut Screen) -> Option<(ViewId, &mut PatientListController)> {
    match screen {
        Screen::Landing => None,
        Screen::Records(view) => Some((view.id, &mut view.patients)),
        Screen::Dashboard(view) => Some((view.id, &mut view.patients)),
    }
}

pub struct PatientRecordsApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    server_url: String,
    route: Route,
    screen: Screen,
    next_view_id: u64,
    status: String,
    status_banner: Option<String>,
}

impl PatientRecordsApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        server_url: String,
        initial_route: Route,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            server_url,
            route: Route::Landing,
            screen: Screen::Landing,
            next_view_id: 0,
            status: "Starting...".to_string(),
            status_banner: None,
        };
        app.navigate(initial_route);
        app
    }

    /// Unmounts the current view and mounts the one for `route`, starting its initial fetch.
    pub fn navigate(&mut self, route: Route) {
        tracing::debug!(%route, "navigating");
        self.next_view_id += 1;
        let id = ViewId(self.next_view_id);
        self.screen = match route {
            Route::Landing => Screen::Landing,
            Route::PatientRecords => Screen::Records(RecordsView::new(id)),
            Route::Dashboard { patient_id } => Screen::Dashboard(DashboardView::new(id, patient_id)),
        };
        self.route = route;
        self.status_banner = None;
        self.request_refresh();
    }

    fn request_refresh(&mut self) {
        if let Some((view, patients)) = mounted_list(&mut self.screen) {
            let token = patients.begin_refresh();
            let queued = dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::FetchPatients { view, token },
                &mut self.status,
            );
            if !queued {
                patients.retract_refresh(token, &self.status);
                let err = UiError::from_message(UiErrorContext::General, self.status.clone());
                self.status_banner = Some(err.user_message());
            }
        }
    }

    /// Issues one fetch when a mutation dialog asked the mounted view to refresh.
    pub fn poll_refresh_requests(&mut self) {
        let requested = mounted_list(&mut self.screen)
            .is_some_and(|(_, patients)| patients.take_refresh_requests());
        if requested {
            self.request_refresh();
        }
    }

    pub fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => self.status = message,
            UiEvent::PatientsFetched {
                view,
                token,
                result,
            } => {
                let Some((mounted, patients)) = mounted_list(&mut self.screen) else {
                    tracing::debug!(?view, "dropping patients for unmounted view");
                    return;
                };
                if mounted != view {
                    tracing::debug!(?view, ?mounted, "dropping patients for unmounted view");
                    return;
                }
                match patients.complete_refresh(token, result) {
                    RefreshOutcome::Applied => {
                        self.status = format!("Loaded {} patients", patients.all_records().len());
                    }
                    RefreshOutcome::Failed => {
                        if let Some(reason) = patients.last_error() {
                            self.status = classify_fetch_failure(reason);
                        }
                    }
                    RefreshOutcome::Stale => {}
                }
            }
            UiEvent::PatientCreated { patient_name } => {
                self.status = format!("Added {patient_name}");
                if let Screen::Records(records) = &mut self.screen {
                    records.add_form = None;
                }
            }
            UiEvent::PatientDeleted {
                patient_id,
                patient_name,
            } => {
                self.status = format!("Deleted {patient_name} (ID #{patient_id})");
                if let Screen::Records(records) = &mut self.screen {
                    records.pending_delete = None;
                }
            }
            UiEvent::Error(err) => {
                let message = err.user_message();
                tracing::warn!(context = ?err.context(), "{}", err.message());
                match (err.context(), &mut self.screen) {
                    (
                        UiErrorContext::AddPatient | UiErrorContext::DeletePatient,
                        Screen::Records(records),
                    ) => {
                        records.mutation_rejected(&message);
                    }
                    _ => self.status_banner = Some(message.clone()),
                }
                self.status = message;
            }
        }
    }

    fn handle_records_actions(&mut self, actions: Vec<RecordsAction>) -> Option<Route> {
        let mut navigate_to = None;
        for action in actions {
            let Screen::Records(records) = &mut self.screen else {
                break;
            };
            let cmd = match action {
                RecordsAction::Navigate(route) => {
                    navigate_to = Some(route);
                    continue;
                }
                RecordsAction::Create(patient) => BackendCommand::CreatePatient {
                    patient,
                    on_complete: records.patients.refresh_handle(),
                },
                RecordsAction::Delete {
                    patient_id,
                    patient_name,
                } => BackendCommand::DeletePatient {
                    patient_id,
                    patient_name,
                    on_complete: records.patients.refresh_handle(),
                },
            };
            if !dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
                records.mutation_rejected(&self.status);
            }
        }
        navigate_to
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            if let Some(banner) = self.status_banner.clone() {
                if theme::error_banner(ui, &banner, true) {
                    self.status_banner = None;
                }
            }
            ui.horizontal(|ui| {
                ui.weak(self.server_url.as_str());
                ui.weak(self.route.path());
                ui.separator();
                ui.label(self.status.as_str());
            });
        });
    }
}

impl eframe::App for PatientRecordsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.poll_refresh_requests();
        self.show_status_bar(ctx);

        let navigate_to = match &mut self.screen {
            Screen::Landing => show_landing(ctx),
            Screen::Records(records) => {
                let actions = records.show(ctx);
                self.handle_records_actions(actions)
            }
            Screen::Dashboard(dashboard) => dashboard.show(ctx),
        };
        if let Some(route) = navigate_to {
            self.navigate(route);
        }

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
