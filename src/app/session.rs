//! An owning handle over one directory session.

use std::sync::{Arc, Mutex};

use super::commands;
use super::helpers::lock_state;
use super::proxy::EventProxy;
use super::state::SessionState;
use super::view_model::{generate_ui_state, UiState};
use crate::config::AppConfig;
use crate::core::{CategoryRegistry, ProfessionalSource};

/// Bundles the shared state with its subscriber and data source.
///
/// Dropping the handle tears the session down, so results still in flight are
/// never applied to a page that is gone.
pub struct DirectorySession<P: EventProxy, S: ProfessionalSource> {
    state: Arc<Mutex<SessionState>>,
    proxy: P,
    source: Arc<S>,
}

impl<P: EventProxy, S: ProfessionalSource> DirectorySession<P, S> {
    pub fn new(config: AppConfig, proxy: P, source: Arc<S>) -> Self {
        Self::from_state(SessionState::new(config), proxy, source)
    }

    pub fn with_registry(
        config: AppConfig,
        registry: CategoryRegistry,
        proxy: P,
        source: Arc<S>,
    ) -> Self {
        Self::from_state(SessionState::with_registry(config, registry), proxy, source)
    }

    fn from_state(state: SessionState, proxy: P, source: Arc<S>) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            proxy,
            source,
        }
    }

    pub fn initialize(&self) {
        commands::initialize(self.proxy.clone(), self.state.clone(), self.source.clone());
    }

    pub fn select_category(&self, slug: &str) {
        commands::select_category(slug, self.proxy.clone(), self.state.clone());
    }

    pub fn select_all(&self) {
        commands::select_all(self.proxy.clone(), self.state.clone());
    }

    pub fn clear_category(&self) {
        commands::clear_category(self.proxy.clone(), self.state.clone());
    }

    pub fn set_search_term(&self, term: &str) {
        commands::set_search_term(
            term,
            self.proxy.clone(),
            self.state.clone(),
            self.source.clone(),
        );
    }

    pub fn set_location_term(&self, term: &str) {
        commands::set_location_term(
            term,
            self.proxy.clone(),
            self.state.clone(),
            self.source.clone(),
        );
    }

    pub fn retry(&self) {
        commands::retry(self.proxy.clone(), self.state.clone(), self.source.clone());
    }

    pub fn dismiss_error(&self) {
        commands::dismiss_error(self.proxy.clone(), self.state.clone());
    }

    pub fn teardown(&self) {
        commands::teardown(self.state.clone());
    }

    /// Dispatches a JSON command, see `app::handle_ipc_message`.
    pub fn handle_message(&self, message: &str) {
        super::handle_ipc_message(
            message,
            self.proxy.clone(),
            self.state.clone(),
            self.source.clone(),
        );
    }

    /// The current view model, without sending it anywhere.
    pub fn snapshot(&self) -> UiState {
        generate_ui_state(&lock_state(&self.state))
    }

    pub fn state(&self) -> Arc<Mutex<SessionState>> {
        self.state.clone()
    }
}

impl<P: EventProxy, S: ProfessionalSource> Drop for DirectorySession<P, S> {
    fn drop(&mut self) {
        lock_state(&self.state).teardown();
    }
}
