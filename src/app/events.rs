//! Defines the event and message structures exchanged with the rendering layer.

use serde::Deserialize;

use super::view_model::UiState;

/// Events published by the session to its subscribers.
#[derive(Debug)]
pub enum UserEvent {
    /// A complete state update to re-render the directory.
    StateUpdate(Box<UiState>),
    /// A problem with a command itself (unknown command, bad payload).
    /// Fetch failures travel inside `UiState::error` instead.
    ShowError(String),
}

/// A command received from the rendering layer,
/// e.g. `{"command": "selectCategory", "payload": "bois"}`.
#[derive(Deserialize, Debug)]
pub struct IpcMessage {
    /// The name of the command to execute.
    pub command: String,
    /// The payload associated with the command, as a JSON value.
    #[serde(default)]
    pub payload: serde_json::Value,
}
