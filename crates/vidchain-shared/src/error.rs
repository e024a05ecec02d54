use thiserror::Error;

/// Rejections returned by the backend canister.
///
/// This set is closed: the backend never answers with anything else, and
/// nothing on the client side is ever folded into it. Transport failures
/// live in the client crate's own error type.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VidChainError {
    #[error("Caller is not authorized for this operation")]
    Unauthorized,

    #[error("Video not found")]
    VideoNotFound,

    #[error("Insufficient token balance")]
    InsufficientTokens,

    #[error("Content rejected as invalid")]
    InvalidContent,

    #[error("Action already performed")]
    DuplicateAction,

    #[error("Report limit exceeded")]
    ReportLimitExceeded,

    #[error("Invalid category")]
    InvalidCategory,

    #[error("Invalid duration")]
    InvalidDuration,
}

impl VidChainError {
    pub const ALL: [VidChainError; 8] = [
        VidChainError::Unauthorized,
        VidChainError::VideoNotFound,
        VidChainError::InsufficientTokens,
        VidChainError::InvalidContent,
        VidChainError::DuplicateAction,
        VidChainError::ReportLimitExceeded,
        VidChainError::InvalidCategory,
        VidChainError::InvalidDuration,
    ];

    /// Variant tag as it appears on the wire.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Unauthorized => "Unauthorized",
            Self::VideoNotFound => "VideoNotFound",
            Self::InsufficientTokens => "InsufficientTokens",
            Self::InvalidContent => "InvalidContent",
            Self::DuplicateAction => "DuplicateAction",
            Self::ReportLimitExceeded => "ReportLimitExceeded",
            Self::InvalidCategory => "InvalidCategory",
            Self::InvalidDuration => "InvalidDuration",
        }
    }

    /// Exact inverse of [`tag`](Self::tag). Unknown tags are `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.tag() == tag)
    }
}
