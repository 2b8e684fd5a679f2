//! Background fetches of the professional list.
//!
//! Every fetch takes a generation token when it starts. Its result is only applied
//! if no newer fetch started in the meantime and the session is still alive, so a
//! slow stale response can never overwrite fresher data.

use chrono::Utc;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

use super::filtering::apply_filters;
use super::helpers::{lock_state, notify};
use super::proxy::EventProxy;
use super::state::SessionState;

use crate::core::{FetchFilters, ProfessionalSource};

/// Starts a fetch right away with the session's current search and location terms.
pub fn start_fetch<P: EventProxy, S: ProfessionalSource>(
    proxy: P,
    state: Arc<Mutex<SessionState>>,
    source: Arc<S>,
) -> Option<JoinHandle<()>> {
    let filters = lock_state(&state).current_filters();
    start_fetch_with(filters, proxy, state, source)
}

/// Starts a fetch with explicit filters. Returns `None` on a torn down session.
pub fn start_fetch_with<P: EventProxy, S: ProfessionalSource>(
    filters: FetchFilters,
    proxy: P,
    state: Arc<Mutex<SessionState>>,
    source: Arc<S>,
) -> Option<JoinHandle<()>> {
    let mut state_guard = lock_state(&state);
    if state_guard.is_torn_down {
        tracing::warn!("Not starting a fetch on a torn down session.");
        return None;
    }
    Some(launch_fetch(&mut state_guard, filters, proxy, state.clone(), source))
}

/// Waits for the configured quiet period, then fetches.
///
/// Each call supersedes the previous one, so a burst of keystrokes yields one request.
/// The pending task is aborted, and it also checks its sequence number under the
/// lock after waking, since an abort arriving after the sleep has no effect.
pub fn schedule_debounced_fetch<P: EventProxy, S: ProfessionalSource>(
    proxy: P,
    state: Arc<Mutex<SessionState>>,
    source: Arc<S>,
) {
    let mut state_guard = lock_state(&state);
    if state_guard.is_torn_down {
        return;
    }
    state_guard.cancel_pending_debounce();
    state_guard.debounce_seq += 1;
    let seq = state_guard.debounce_seq;

    let delay = Duration::from_millis(state_guard.config.debounce_ms);
    let state_clone = state.clone();
    let handle = tokio::spawn(async move {
        tokio::time::sleep(delay).await;

        let mut state_guard = lock_state(&state_clone);
        if state_guard.is_torn_down || state_guard.debounce_seq != seq {
            tracing::debug!("Debounced fetch #{} superseded, skipping.", seq);
            return;
        }
        state_guard.debounce_task = None;
        let filters = state_guard.current_filters();
        launch_fetch(&mut state_guard, filters, proxy, state_clone.clone(), source);
    });
    state_guard.debounce_task = Some(handle);
}

/// Marks the fetch as started on the locked state, publishes the loading
/// state and spawns the request.
fn launch_fetch<P: EventProxy, S: ProfessionalSource>(
    state_guard: &mut SessionState,
    filters: FetchFilters,
    proxy: P,
    state: Arc<Mutex<SessionState>>,
    source: Arc<S>,
) -> JoinHandle<()> {
    let token = state_guard.begin_fetch(filters.clone());
    notify(state_guard, &proxy);

    tracing::info!(
        "Starting fetch #{} (search='{}', location='{}')",
        token,
        filters.search,
        filters.location
    );
    tokio::spawn(async move {
        fetch_task(filters, token, proxy, state, source).await;
    })
}

async fn fetch_task<P: EventProxy, S: ProfessionalSource>(
    filters: FetchFilters,
    token: u64,
    proxy: P,
    state: Arc<Mutex<SessionState>>,
    source: Arc<S>,
) {
    let result = source.fetch_professionals(&filters).await;

    let mut state_guard = lock_state(&state);
    if !state_guard.accepts(token) {
        tracing::warn!(
            "Discarding response of fetch #{} (current is #{}, torn down: {}).",
            token,
            state_guard.fetch_generation,
            state_guard.is_torn_down
        );
        return;
    }

    match result {
        Ok(professionals) => {
            tracing::info!(
                "Fetch #{} complete: {} professionals.",
                token,
                professionals.len()
            );
            state_guard.full_list = professionals;
            state_guard.error = None;
            state_guard.last_fetched_at = Some(Utc::now());
        }
        Err(e) => {
            tracing::error!("Fetch #{} failed: {}", token, e);
            state_guard.error = Some(e);
        }
    }
    state_guard.loading = false;
    apply_filters(&mut state_guard);
    notify(&state_guard, &proxy);
}
