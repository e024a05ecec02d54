use thiserror::Error;

use vidchain_shared::VidChainError;

/// Failures that happen before, during or after the network round trip,
/// as opposed to the backend saying no.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Could not reach the gateway at all.
    #[error("Gateway unreachable: {0}")]
    Unreachable(String),

    /// The binding gave up waiting for a reply.
    #[error("Request timed out")]
    Timeout,

    /// The gateway refused the request before it reached the canister.
    #[error("Gateway rejected request ({status}): {body}")]
    Rejected { status: u16, body: String },

    /// A reply arrived but did not match the expected shape.
    #[error("Malformed reply: {0}")]
    MalformedReply(String),

    /// The binding was constructed with unusable settings.
    #[error("Invalid binding configuration: {0}")]
    Config(String),
}

impl TransportError {
    /// Whether retrying the same call later could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Unreachable(_) | Self::Timeout => true,
            Self::Rejected { status, .. } => *status >= 500 || *status == 429,
            Self::MalformedReply(_) | Self::Config(_) => false,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::MalformedReply(e.to_string())
        } else if e.is_builder() {
            Self::Config(e.to_string())
        } else {
            Self::Unreachable(e.to_string())
        }
    }
}

/// Outcome of a failed facade call.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The backend processed the request and rejected it.
    #[error("Backend rejected request: {0}")]
    Backend(#[from] VidChainError),

    /// The request never produced a backend verdict.
    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),
}

impl ClientError {
    pub fn backend(&self) -> Option<VidChainError> {
        match self {
            Self::Backend(e) => Some(*e),
            Self::Transport(_) => None,
        }
    }

    pub fn is_transient(&self) -> bool {
        match self {
            Self::Backend(_) => false,
            Self::Transport(e) => e.is_transient(),
        }
    }
}

/// Local failures while preparing an upload. Nothing has been sent yet.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Media file is empty: {0}")]
    EmptyMedia(String),

    #[error("Media file is not a video ({content_type}): {path}")]
    NotVideo { path: String, content_type: String },
}

/// Convenience alias used by the facade.
pub type Result<T> = std::result::Result<T, ClientError>;
