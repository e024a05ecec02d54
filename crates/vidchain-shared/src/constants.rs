/// Application name
pub const APP_NAME: &str = "VidChain";

/// Default gateway host (IC mainnet boundary nodes)
pub const DEFAULT_GATEWAY_URL: &str = "https://ic0.app";

/// Default per-request timeout enforced by the HTTP gateway binding, in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Media below this size is flagged short-form when the uploader does not say (50 MiB)
pub const SHORT_FORM_MAX_BYTES: u64 = 50 * 1024 * 1024;

/// Content type prefix accepted for the media part of an upload
pub const VIDEO_MIME_PREFIX: &str = "video/";

/// Nanoseconds per second (ledger timestamps are nanoseconds since the epoch)
pub const NANOS_PER_SEC: i64 = 1_000_000_000;
