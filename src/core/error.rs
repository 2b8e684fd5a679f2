//! Defines the custom error types for the `core` module.

use thiserror::Error;

/// Failure of a single listing request.
///
/// Both variants are recoverable: the session keeps its last list and offers a retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never reached the backend (DNS, connect, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered, but with `success: false`, a non-2xx status or an
    /// unreadable body. `message` is shown to the user as is.
    #[error("{message}")]
    Server {
        status: Option<u16>,
        message: String,
    },
}

impl FetchError {
    pub fn server(message: impl Into<String>) -> Self {
        FetchError::Server {
            status: None,
            message: message.into(),
        }
    }

    /// The text displayed in the error banner.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Network(_) => {
                "Impossible de joindre le serveur. Vérifiez votre connexion.".to_string()
            }
            FetchError::Server { message, .. } => message.clone(),
        }
    }
}

/// Errors raised by `send()` or `text()`. Status codes never arrive here: they are
/// mapped from the response in `HttpProfessionalSource::fetch_professionals`.
impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Server {
                status: None,
                message: format!("Malformed response: {e}"),
            }
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

/// Rejects category tables that would make slug lookup or matching ambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Duplicate category slug: {0}")]
    DuplicateSlug(String),

    #[error("Category '{0}' has no keywords")]
    EmptyKeywords(String),

    #[error("Unknown profession type: {0}")]
    UnknownProfession(String),
}
