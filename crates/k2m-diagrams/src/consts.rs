//! Internal constants for link encoding.

/// Public Kroki service used when no other base URL is configured.
pub const DEFAULT_KROKI_URL: &str = "https://kroki.io";
