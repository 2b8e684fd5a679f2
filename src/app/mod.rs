//! The stateful side of the engine: session state, transitions, fetch tasks and
//! the view model handed to the rendering layer.

pub mod commands;
pub mod events;
pub mod filtering;
pub mod helpers;
pub mod proxy;
pub mod session;
pub mod state;
pub mod tasks;
pub mod view_model;

use std::sync::{Arc, Mutex};

use crate::core::ProfessionalSource;
use events::{IpcMessage, UserEvent};
use proxy::EventProxy;
use state::SessionState;

/// Parses a JSON command from the rendering layer and dispatches it.
///
/// Malformed messages and unknown commands are answered with `UserEvent::ShowError`.
pub fn handle_ipc_message<P: EventProxy, S: ProfessionalSource>(
    message: &str,
    proxy: P,
    state: Arc<Mutex<SessionState>>,
    source: Arc<S>,
) {
    let msg = match serde_json::from_str::<IpcMessage>(message) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::warn!("Failed to parse IPC message: {}", e);
            proxy.send_event(UserEvent::ShowError(format!("Invalid message: {e}")));
            return;
        }
    };

    tracing::debug!("IPC command received: {}", msg.command);
    match msg.command.as_str() {
        "initialize" => commands::initialize(proxy, state, source),
        "selectCategory" => match msg.payload.as_str() {
            Some(slug) => commands::select_category(slug, proxy, state),
            None => reject_payload(&msg, &proxy),
        },
        "selectAll" => commands::select_all(proxy, state),
        "clearCategory" => commands::clear_category(proxy, state),
        "setSearchTerm" => match msg.payload.as_str() {
            Some(term) => commands::set_search_term(term, proxy, state, source),
            None => reject_payload(&msg, &proxy),
        },
        "setLocationTerm" => match msg.payload.as_str() {
            Some(term) => commands::set_location_term(term, proxy, state, source),
            None => reject_payload(&msg, &proxy),
        },
        "retry" => commands::retry(proxy, state, source),
        "dismissError" => commands::dismiss_error(proxy, state),
        "teardown" => commands::teardown(state),
        unknown => {
            tracing::warn!("Unknown IPC command: {}", unknown);
            proxy.send_event(UserEvent::ShowError(format!("Unknown command: {unknown}")));
        }
    }
}

fn reject_payload<P: EventProxy>(msg: &IpcMessage, proxy: &P) {
    tracing::warn!(
        "Failed to deserialize string payload for '{}': {:?}",
        msg.command,
        msg.payload
    );
    proxy.send_event(UserEvent::ShowError(format!(
        "Invalid payload for {}",
        msg.command
    )));
}
