use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "Veridoc";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Path the analysis backend exposes for document submission.
pub const ANALYZE_PATH: &str = "/api/analyze";

/// Backend used when `VERIDOC_BACKEND_URL` is not set.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Port the local dashboard binds to when `VERIDOC_PORT` is not set.
pub const DEFAULT_PORT: u16 = 4170;

/// Upper bound on a single analysis round trip.
pub const ANALYZE_TIMEOUT: Duration = Duration::from_secs(30);

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> &'static str {
    "info,veridoc=debug"
}

/// Settings resolved once at startup and injected everywhere.
///
/// The backend endpoint is an explicit configuration value — never derived
/// from ambient state at request time.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Analysis backend base URL, no trailing slash.
    pub backend_url: String,
    /// Use the built-in heuristic analyzer instead of the backend.
    pub offline: bool,
    /// Dashboard port on the loopback interface.
    pub port: u16,
}

impl AppConfig {
    /// Resolve configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = lookup("VERIDOC_BACKEND_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let offline = lookup("VERIDOC_OFFLINE")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let port = lookup("VERIDOC_PORT")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            backend_url,
            offline,
            port,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
