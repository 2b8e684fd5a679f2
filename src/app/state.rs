//! Defines the central, mutable state of a directory session.

use crate::config::AppConfig;
use crate::core::{CategoryFilter, CategoryRegistry, FetchError, FetchFilters, Professional};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::task::JoinHandle;

/// Which list the session is showing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "slug", rename_all = "camelCase")]
pub enum View {
    /// Initial state: a short preview of the list plus the category tiles.
    Browsing,
    /// The whole list, unfiltered by category.
    AllSelected,
    /// The subset matching one category.
    CategorySelected(String),
}

impl View {
    /// `None` while browsing, otherwise the category the view is filtered by.
    pub fn active_category(&self) -> Option<CategoryFilter> {
        match self {
            View::Browsing => None,
            View::AllSelected => Some(CategoryFilter::All),
            View::CategorySelected(slug) => Some(CategoryFilter::Slug(slug.clone())),
        }
    }

    pub fn is_category_view(&self) -> bool {
        !matches!(self, View::Browsing)
    }
}

/// Holds the complete, mutable state of one directory page.
///
/// Wrapped in an `Arc<Mutex<...>>` and shared between the command handlers and the
/// fetch tasks. Locks are held only for short synchronous sections.
pub struct SessionState {
    pub config: AppConfig,
    pub registry: CategoryRegistry,
    /// The last successfully fetched list. Only ever replaced wholesale.
    pub full_list: Vec<Professional>,
    /// Derived from `full_list` and `view` by `filtering::apply_filters`.
    pub visible_list: Vec<Professional>,
    pub view: View,
    pub search_term: String,
    pub location_term: String,
    /// `true` while a fetch is in flight. The previous list stays visible.
    pub loading: bool,
    /// The last fetch failure, cleared by the next success or by dismissal.
    pub error: Option<FetchError>,
    /// Incremented each time a fetch is initiated; a result is only applied if
    /// its token still equals this value.
    pub fetch_generation: u64,
    /// The filters of the most recently initiated fetch, replayed by `retry`.
    pub last_request: Option<FetchFilters>,
    pub last_fetched_at: Option<DateTime<Utc>>,
    /// A pending debounced refetch, aborted when a newer term arrives.
    pub debounce_task: Option<JoinHandle<()>>,
    /// Incremented by every debounced schedule; a waking task that no longer
    /// holds the latest number does nothing.
    pub debounce_seq: u64,
    /// Set by `teardown`; no result is applied afterwards.
    pub is_torn_down: bool,
}

impl SessionState {
    pub fn new(config: AppConfig) -> Self {
        let registry = CategoryRegistry::for_profession(config.profession);
        Self::with_registry(config, registry)
    }

    /// For pages with a custom category table.
    pub fn with_registry(config: AppConfig, registry: CategoryRegistry) -> Self {
        Self {
            config,
            registry,
            full_list: Vec::new(),
            visible_list: Vec::new(),
            view: View::Browsing,
            search_term: String::new(),
            location_term: String::new(),
            loading: false,
            error: None,
            fetch_generation: 0,
            last_request: None,
            last_fetched_at: None,
            debounce_task: None,
            debounce_seq: 0,
            is_torn_down: false,
        }
    }

    /// The filters a fetch issued right now would use.
    pub fn current_filters(&self) -> FetchFilters {
        FetchFilters::new(self.search_term.clone(), self.location_term.clone())
    }

    /// Marks a new fetch as started and returns its generation token.
    pub fn begin_fetch(&mut self, filters: FetchFilters) -> u64 {
        self.fetch_generation += 1;
        self.loading = true;
        self.last_request = Some(filters);
        self.fetch_generation
    }

    /// `true` if a fetch started with `token` may still write to the state.
    pub fn accepts(&self, token: u64) -> bool {
        !self.is_torn_down && token == self.fetch_generation
    }

    /// Aborts a pending debounced refetch, if any.
    pub fn cancel_pending_debounce(&mut self) {
        if let Some(handle) = self.debounce_task.take() {
            tracing::debug!("Aborting pending debounced fetch.");
            handle.abort();
        }
    }

    /// Stops all further state updates from in-flight work.
    pub fn teardown(&mut self) {
        tracing::info!("Tearing down directory session.");
        self.cancel_pending_debounce();
        self.is_torn_down = true;
        self.loading = false;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
