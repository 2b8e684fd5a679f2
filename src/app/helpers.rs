//! Contains helper functions to reduce boilerplate code in other `app` modules.

use std::sync::{Arc, Mutex, MutexGuard};

use super::events::UserEvent;
use super::proxy::EventProxy;
use super::state::SessionState;
use super::view_model::generate_ui_state;

/// Locks the session state, recovering the data if a previous holder panicked.
pub fn lock_state(state: &Arc<Mutex<SessionState>>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(|poisoned| {
        tracing::warn!("Session state mutex was poisoned, recovering.");
        poisoned.into_inner()
    })
}

/// Sends the current `UiState` of an already locked session.
pub fn notify<P: EventProxy>(state: &SessionState, proxy: &P) {
    let ui_state = generate_ui_state(state);
    proxy.send_event(UserEvent::StateUpdate(Box::new(ui_state)));
}

/// A helper function that locks the `SessionState`, performs a mutation,
/// and then automatically sends a `StateUpdate` event to the UI.
///
/// Does nothing once the session has been torn down.
pub fn with_state_and_notify<F, P: EventProxy>(
    state: &Arc<Mutex<SessionState>>,
    proxy: &P,
    update_fn: F,
) where
    F: FnOnce(&mut SessionState),
{
    let mut state_guard = lock_state(state);
    if state_guard.is_torn_down {
        tracing::warn!("Ignoring command on a torn down session.");
        return;
    }

    update_fn(&mut state_guard);
    notify(&state_guard, proxy);
}
