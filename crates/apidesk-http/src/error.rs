use serde_json::json;
use thiserror::Error;

/// The API document could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to load, please confirm that the API document address is correct: {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error(
        "Failed to load, please confirm that the API document address is correct: {url} returned HTTP {status}"
    )]
    Status { url: String, status: u16 },

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] apidesk_core::error::ParseError),
}

/// A live request failed after it was sent.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("request failed: {message}")]
    Transport { message: String },

    #[error("request failed with HTTP {status} {reason}")]
    Status {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("response from HTTP {status} is not JSON")]
    NotJson { status: u16, body: String },

    #[error("failed to attach {path}: {source}")]
    Attachment {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl DispatchError {
    /// The failure serialized as a status/body object, as shown to the user.
    pub fn notification(&self) -> String {
        let value = match self {
            DispatchError::Transport { message } => json!({
                "status": 0,
                "statusText": "error",
                "responseText": message,
            }),
            DispatchError::Status {
                status,
                reason,
                body,
            } => json!({
                "status": status,
                "statusText": reason,
                "responseText": body,
            }),
            DispatchError::NotJson { status, body } => json!({
                "status": status,
                "statusText": "parsererror",
                "responseText": body,
            }),
            DispatchError::Attachment { path, source } => json!({
                "status": 0,
                "statusText": "error",
                "responseText": format!("{path}: {source}"),
            }),
        };
        value.to_string()
    }
}

#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
