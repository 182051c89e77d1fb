//! Patient list state: the fetched records, the search text and the derived filtered view.

use std::fmt::Display;

use shared::{domain::PatientId, protocol::PatientRecord};
use tracing::{debug, error, info, warn};

use crate::{
    filter::filter_records,
    refresh::{RefreshHandle, RefreshRequests},
    PatientsApi,
};

/// Identifies one issued refresh. Later tokens compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefreshToken(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// No fetch has completed yet.
    Loading,
    Loaded,
    /// The latest fetch failed; the previous records stay visible.
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    Failed,
    /// A newer refresh was issued before this one resolved.
    Stale,
}

#[derive(Debug)]
pub struct PatientListController {
    all_records: Vec<PatientRecord>,
    filtered_records: Vec<PatientRecord>,
    search_text: String,
    load_state: LoadState,
    last_issued: u64,
    refresh_requests: RefreshRequests,
}

impl PatientListController {
    pub fn new() -> Self {
        Self {
            all_records: Vec::new(),
            filtered_records: Vec::new(),
            search_text: String::new(),
            load_state: LoadState::Loading,
            last_issued: 0,
            refresh_requests: RefreshRequests::new(),
        }
    }

    pub fn all_records(&self) -> &[PatientRecord] {
        &self.all_records
    }

    pub fn filtered_records(&self) -> &[PatientRecord] {
        &self.filtered_records
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    pub fn last_error(&self) -> Option<&str> {
        match &self.load_state {
            LoadState::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    /// Count shown next to the search box; zero until a fetch has completed.
    pub fn result_count(&self) -> usize {
        if self.is_loading() {
            0
        } else {
            self.filtered_records.len()
        }
    }

    pub fn find(&self, patient_id: PatientId) -> Option<&PatientRecord> {
        self.all_records
            .iter()
            .find(|record| record.patient_id == patient_id)
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.recompute_filtered();
    }

    pub fn refresh_handle(&self) -> RefreshHandle {
        self.refresh_requests.handle()
    }

    /// True when at least one refresh was requested through a handle since the last call.
    pub fn take_refresh_requests(&mut self) -> bool {
        self.refresh_requests.drain() > 0
    }

    pub fn begin_refresh(&mut self) -> RefreshToken {
        self.last_issued += 1;
        debug!(token = self.last_issued, "issued patient list refresh");
        RefreshToken(self.last_issued)
    }

    /// Takes back the latest token when its fetch could not be started.
    ///
    /// The previously issued token becomes current again so a fetch already in
    /// flight still applies. With nothing else outstanding the list leaves
    /// `Loading` for `Failed(reason)`.
    pub fn retract_refresh<E: Display>(
        &mut self,
        token: RefreshToken,
        reason: E,
    ) -> RefreshOutcome {
        if token.0 != self.last_issued {
            debug!(
                token = token.0,
                latest = self.last_issued,
                "ignoring retraction of superseded refresh"
            );
            return RefreshOutcome::Stale;
        }

        self.last_issued -= 1;
        warn!(token = token.0, error = %reason, "patient list refresh could not be started");
        if self.is_loading() && self.last_issued > 0 {
            // The initial fetch is still outstanding and will end loading.
            return RefreshOutcome::Failed;
        }
        self.load_state = LoadState::Failed(reason.to_string());
        RefreshOutcome::Failed
    }

    /// Applies the result of the refresh identified by `token`.
    ///
    /// Only the most recently issued token is applied; a failure never touches the records.
    pub fn complete_refresh<E: Display>(
        &mut self,
        token: RefreshToken,
        result: Result<Vec<PatientRecord>, E>,
    ) -> RefreshOutcome {
        if token.0 != self.last_issued {
            debug!(
                token = token.0,
                latest = self.last_issued,
                "dropping stale patient list result"
            );
            return RefreshOutcome::Stale;
        }

        match result {
            Ok(records) => {
                self.all_records = records;
                self.load_state = LoadState::Loaded;
                self.recompute_filtered();
                info!(
                    count = self.all_records.len(),
                    visible = self.filtered_records.len(),
                    "patient list refreshed"
                );
                RefreshOutcome::Applied
            }
            Err(err) => {
                error!(error = %err, "error fetching patients");
                self.load_state = LoadState::Failed(err.to_string());
                RefreshOutcome::Failed
            }
        }
    }

    pub async fn refresh<A: PatientsApi + ?Sized>(&mut self, api: &A) -> RefreshOutcome {
        let token = self.begin_refresh();
        let result = api.list_patients().await;
        self.complete_refresh(token, result)
    }

    /// Refreshes once if any handle asked for it, however many requests are queued.
    pub async fn refresh_if_requested<A: PatientsApi + ?Sized>(
        &mut self,
        api: &A,
    ) -> Option<RefreshOutcome> {
        if self.take_refresh_requests() {
            Some(self.refresh(api).await)
        } else {
            None
        }
    }

    fn recompute_filtered(&mut self) {
        self.filtered_records = filter_records(&self.all_records, &self.search_text);
    }
}

impl Default for PatientListController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
