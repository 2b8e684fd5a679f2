//! Contains the transition handlers of a directory session.
//!
//! Each function corresponds to one user action. Category transitions are purely
//! local; term changes and retries go through the fetch tasks in `tasks`.

use super::filtering::{self, normalize_term};
use super::helpers::{lock_state, with_state_and_notify};
use super::proxy::EventProxy;
use super::state::{SessionState, View};
use super::tasks::{schedule_debounced_fetch, start_fetch, start_fetch_with};
use crate::core::{CategoryFilter, ProfessionalSource};
use std::sync::{Arc, Mutex};

/// Loads the initial list without waiting for the debounce delay.
pub fn initialize<P: EventProxy, S: ProfessionalSource>(
    proxy: P,
    state: Arc<Mutex<SessionState>>,
    source: Arc<S>,
) {
    tracing::info!("Initializing directory session.");
    start_fetch(proxy, state, source);
}

/// Shows every professional matching `slug`. `"all"` is treated as `select_all`.
pub fn select_category<P: EventProxy>(slug: &str, proxy: P, state: Arc<Mutex<SessionState>>) {
    let filter = CategoryFilter::parse(slug);
    with_state_and_notify(&state, &proxy, |s| {
        s.view = match filter {
            CategoryFilter::All => View::AllSelected,
            CategoryFilter::Slug(slug) => {
                if s.registry.get(&slug).is_none() {
                    tracing::warn!("Selected unknown category '{}'", slug);
                }
                View::CategorySelected(slug)
            }
        };
        tracing::info!("View changed to {:?}", s.view);
        filtering::apply_filters(s);
    });
}

/// Shows the whole list, unfiltered by category.
pub fn select_all<P: EventProxy>(proxy: P, state: Arc<Mutex<SessionState>>) {
    with_state_and_notify(&state, &proxy, |s| {
        s.view = View::AllSelected;
        filtering::apply_filters(s);
    });
}

/// "Back to all professionals": returns to the preview with category tiles.
pub fn clear_category<P: EventProxy>(proxy: P, state: Arc<Mutex<SessionState>>) {
    with_state_and_notify(&state, &proxy, |s| {
        s.view = View::Browsing;
        filtering::apply_filters(s);
    });
}

/// Stores the new search term and schedules a debounced refetch.
pub fn set_search_term<P: EventProxy, S: ProfessionalSource>(
    term: &str,
    proxy: P,
    state: Arc<Mutex<SessionState>>,
    source: Arc<S>,
) {
    update_term(term, TermKind::Search, proxy, state, source);
}

/// Stores the new location term and schedules a debounced refetch.
pub fn set_location_term<P: EventProxy, S: ProfessionalSource>(
    term: &str,
    proxy: P,
    state: Arc<Mutex<SessionState>>,
    source: Arc<S>,
) {
    update_term(term, TermKind::Location, proxy, state, source);
}

#[derive(Debug, Clone, Copy)]
enum TermKind {
    Search,
    Location,
}

fn update_term<P: EventProxy, S: ProfessionalSource>(
    term: &str,
    kind: TermKind,
    proxy: P,
    state: Arc<Mutex<SessionState>>,
    source: Arc<S>,
) {
    let normalized = normalize_term(term);
    let changed = {
        let mut state_guard = lock_state(&state);
        if state_guard.is_torn_down {
            return;
        }
        let slot = match kind {
            TermKind::Search => &mut state_guard.search_term,
            TermKind::Location => &mut state_guard.location_term,
        };
        if *slot == normalized {
            false
        } else {
            *slot = normalized;
            true
        }
    };

    if changed {
        tracing::debug!("{:?} term changed, scheduling refetch.", kind);
        schedule_debounced_fetch(proxy, state, source);
    }
}

/// Re-issues the last request with the same terms, immediately.
pub fn retry<P: EventProxy, S: ProfessionalSource>(
    proxy: P,
    state: Arc<Mutex<SessionState>>,
    source: Arc<S>,
) {
    let filters = {
        let state_guard = lock_state(&state);
        state_guard
            .last_request
            .clone()
            .unwrap_or_else(|| state_guard.current_filters())
    };
    tracing::info!("Retrying fetch with {:?}", filters);
    start_fetch_with(filters, proxy, state, source);
}

/// Hides the error banner. The list is left as it is.
pub fn dismiss_error<P: EventProxy>(proxy: P, state: Arc<Mutex<SessionState>>) {
    with_state_and_notify(&state, &proxy, |s| {
        s.error = None;
    });
}

/// Stops applying results from in-flight requests. No event is sent.
pub fn teardown(state: Arc<Mutex<SessionState>>) {
    lock_state(&state).teardown();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::events::UserEvent;
    use crate::app::view_model::UiState;
    use crate::config::AppConfig;
    use crate::core::{FetchError, FetchFilters, Professional};
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::mpsc;

    /// A source that always answers with the same list, recording each request.
    struct FixedSource {
        list: Vec<Professional>,
        calls: Mutex<Vec<FetchFilters>>,
    }

    #[async_trait]
    impl ProfessionalSource for FixedSource {
        async fn fetch_professionals(
            &self,
            filters: &FetchFilters,
        ) -> Result<Vec<Professional>, FetchError> {
            self.calls.lock().unwrap().push(filters.clone());
            Ok(self.list.clone())
        }
    }

    struct TestHarness {
        state: Arc<Mutex<SessionState>>,
        proxy: mpsc::UnboundedSender<UserEvent>,
        event_rx: mpsc::UnboundedReceiver<UserEvent>,
        source: Arc<FixedSource>,
    }

    impl TestHarness {
        fn new(list: Vec<Professional>) -> Self {
            let (proxy, event_rx) = mpsc::unbounded_channel();
            let config = AppConfig {
                debounce_ms: 20,
                ..Default::default()
            };
            let mut state = SessionState::new(config);
            state.full_list = list.clone();
            filtering::apply_filters(&mut state);
            Self {
                state: Arc::new(Mutex::new(state)),
                proxy,
                event_rx,
                source: Arc::new(FixedSource {
                    list,
                    calls: Mutex::new(Vec::new()),
                }),
            }
        }

        async fn get_last_state_update(&mut self) -> Option<Box<UiState>> {
            let mut last_update = None;
            let timeout = tokio::time::sleep(Duration::from_millis(300));
            tokio::pin!(timeout);
            loop {
                tokio::select! {
                    event = self.event_rx.recv() => {
                        match event {
                            Some(UserEvent::StateUpdate(ui_state)) => last_update = Some(ui_state),
                            Some(_) => {}
                            None => break,
                        }
                    },
                    _ = &mut timeout => { break; }
                }
            }
            last_update
        }

        fn call_count(&self) -> usize {
            self.source.calls.lock().unwrap().len()
        }
    }

    fn directory() -> Vec<Professional> {
        vec![
            Professional::new("1", "Jean Bois").with_metier("1", "Ébéniste"),
            Professional::new("2", "Marc Pierre").with_metier("2", "Tailleur de pierre"),
            Professional::new("3", "Lise").with_specialty("Potier"),
        ]
    }

    #[tokio::test]
    async fn test_select_category_filters_visible_list() {
        let mut harness = TestHarness::new(directory());
        select_category("bois", harness.proxy.clone(), harness.state.clone());

        let ui = harness.get_last_state_update().await.unwrap();
        assert!(ui.is_category_view);
        assert_eq!(ui.visible_count, 1);
        assert_eq!(ui.visible_list[0].name, "Jean Bois");
    }

    #[tokio::test]
    async fn test_select_category_twice_is_idempotent() {
        let harness = TestHarness::new(directory());
        select_category("ceramique", harness.proxy.clone(), harness.state.clone());
        let once = harness.state.lock().unwrap().visible_list.clone();
        select_category("ceramique", harness.proxy.clone(), harness.state.clone());
        let twice = harness.state.lock().unwrap().visible_list.clone();
        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn test_select_category_all_means_all_selected() {
        let harness = TestHarness::new(directory());
        select_category("all", harness.proxy.clone(), harness.state.clone());
        let state = harness.state.lock().unwrap();
        assert_eq!(state.view, View::AllSelected);
        assert_eq!(state.visible_list.len(), 3);
    }

    #[tokio::test]
    async fn test_clear_category_returns_to_browsing() {
        let mut harness = TestHarness::new(directory());
        select_all(harness.proxy.clone(), harness.state.clone());
        clear_category(harness.proxy.clone(), harness.state.clone());

        let ui = harness.get_last_state_update().await.unwrap();
        assert!(!ui.is_category_view);
        assert!(ui.active_category.is_none());
    }

    #[tokio::test]
    async fn test_search_burst_is_debounced_into_one_request() {
        let harness = TestHarness::new(directory());
        for term in ["é", "éb", "ébé", "ébéniste"] {
            set_search_term(
                term,
                harness.proxy.clone(),
                harness.state.clone(),
                harness.source.clone(),
            );
        }
        tokio::time::sleep(Duration::from_millis(200)).await;

        let calls = harness.source.calls.lock().unwrap().clone();
        assert_eq!(calls, vec![FetchFilters::new("ébéniste", "")]);
    }

    #[tokio::test]
    async fn test_whitespace_only_change_does_not_refetch() {
        let harness = TestHarness::new(directory());
        set_location_term(
            "Lyon",
            harness.proxy.clone(),
            harness.state.clone(),
            harness.source.clone(),
        );
        tokio::time::sleep(Duration::from_millis(100)).await;
        set_location_term(
            " Lyon  ",
            harness.proxy.clone(),
            harness.state.clone(),
            harness.source.clone(),
        );
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(harness.call_count(), 1);
    }

    #[tokio::test]
    async fn test_commands_after_teardown_are_ignored() {
        let mut harness = TestHarness::new(directory());
        teardown(harness.state.clone());

        select_all(harness.proxy.clone(), harness.state.clone());
        set_search_term(
            "bois",
            harness.proxy.clone(),
            harness.state.clone(),
            harness.source.clone(),
        );
        initialize(harness.proxy.clone(), harness.state.clone(), harness.source.clone());

        assert!(harness.get_last_state_update().await.is_none());
        assert_eq!(harness.call_count(), 0);
        assert_eq!(harness.state.lock().unwrap().view, View::Browsing);
    }

    #[tokio::test]
    async fn test_dismiss_error_keeps_list() {
        let mut harness = TestHarness::new(directory());
        harness.state.lock().unwrap().error = Some(FetchError::server("Erreur serveur"));
        dismiss_error(harness.proxy.clone(), harness.state.clone());

        let ui = harness.get_last_state_update().await.unwrap();
        assert!(ui.error.is_none());
        assert_eq!(ui.total_count, 3);
    }
}
