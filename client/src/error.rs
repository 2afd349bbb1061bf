//! Unified error handling for the client.

use thiserror::Error;

/// Application error type.
///
/// Remote failures carry the fixed per-operation message the view layer
/// displays verbatim ("Failed to fetch albums", "Failed to create album",
/// ...). Nothing here is fatal: every variant degrades to an inline message
/// and leaves the session usable.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with something other than the operation's one
    /// documented success status.
    #[error("{message}")]
    RemoteCall { message: &'static str, status: u16 },

    /// Network-level failure, no usable response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Client-side validation failed; the request never reached the network.
    #[error(transparent)]
    Validation(#[from] shutter_core::Error),

    /// This session does not hold the management capability.
    #[error("management actions are not permitted for this session")]
    Forbidden,

    /// Local state file could not be read or written.
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Local state file held something other than a JSON object of strings.
    #[error("invalid state file: {0}")]
    StorageFormat(#[from] serde_json::Error),
}

impl ClientError {
    /// The message a banner should display for this failure.
    pub fn display_message(&self) -> String {
        self.to_string()
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_call_displays_fixed_message_only() {
        let err = ClientError::RemoteCall {
            message: "Failed to create album",
            status: 404,
        };
        assert_eq!(err.to_string(), "Failed to create album");
    }

    #[test]
    fn validation_error_passes_through() {
        let err: ClientError = shutter_core::Error::MissingRequiredField("title".into()).into();
        assert_eq!(err.to_string(), "missing required field: title");
    }

    #[test]
    fn forbidden_display() {
        assert_eq!(
            ClientError::Forbidden.to_string(),
            "management actions are not permitted for this session"
        );
    }
}
