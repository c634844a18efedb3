//! Fixed keys and defaults shared across the console.

/// localStorage key holding the opaque bearer token.
pub const TOKEN_STORAGE_KEY: &str = "console_auth_token";

/// localStorage key holding the persisted theme mode ("light"/"dark"/"system").
pub const THEME_STORAGE_KEY: &str = "console_theme_mode";

/// Base URL of the local development backend, used when `API_BASE_URL` is not
/// injected at build time.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Per-request deadline in milliseconds. Requests past this are aborted and
/// surface as a timeout error.
pub const REQUEST_TIMEOUT_MS: u32 = 30_000;

/// Default page size for log queries.
pub const DEFAULT_LOG_LIMIT: u32 = 50;
