//! Configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).
//!
//! | Variable                        | Default                 |
//! |---------------------------------|-------------------------|
//! | `LISTEN_ADDR`                   | `0.0.0.0:3000`          |
//! | `PARKSYS_API_BASE_URL`          | `http://127.0.0.1:3000` |
//! | `PARKSYS_REQUEST_TIMEOUT_SECS`  | `10`                    |
//! | `PARKSYS_NOTIFICATION_CAPACITY` | `256`                   |
//! | `PARKSYS_SEED_DEMO_DATA`        | `false`                 |

use std::net::SocketAddr;
use std::time::Duration;

/// Settings for the reference backend binary.
///
/// Loaded once at startup via [`ServerConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Upper bound on the time spent serving one request.
    pub request_timeout: Duration,

    /// Whether to register a few demo assets at startup.
    pub seed_demo_data: bool,
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, std::net::AddrParseError> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()?;

        Ok(Self {
            listen_addr,
            request_timeout: Duration::from_secs(parse_env("PARKSYS_REQUEST_TIMEOUT_SECS", 10)),
            seed_demo_data: parse_env_bool("PARKSYS_SEED_DEMO_DATA", false),
        })
    }
}

/// Settings for the asset workspace and its HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the asset API, without a trailing slash.
    pub base_url: String,

    /// Timeout applied to every request.
    pub request_timeout: Duration,

    /// Capacity of the notification broadcast channel.
    pub notification_capacity: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            request_timeout: Duration::from_secs(10),
            notification_capacity: 256,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from environment variables, falling back to
    /// [`ClientConfig::default`] for anything unset or invalid.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let base_url = std::env::var("PARKSYS_API_BASE_URL")
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.base_url);

        Self {
            base_url,
            request_timeout: Duration::from_secs(parse_env(
                "PARKSYS_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )),
            notification_capacity: parse_env(
                "PARKSYS_NOTIFICATION_CAPACITY",
                defaults.notification_capacity,
            ),
        }
    }

    /// Same settings pointed at another base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("true" | "1") => true,
        Some("false" | "0") => false,
        _ => default,
    }
}
