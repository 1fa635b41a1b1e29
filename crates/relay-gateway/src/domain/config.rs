//! Relay configuration with validation.
//!
//! Values come from defaults overridden by environment variables, read once
//! at process start. Broadcast credentials are not validated
//! here: missing credentials surface on the first publish attempt.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Main relay configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// HTTP server configuration
    pub http: HttpConfig,
    /// Request limits
    pub limits: LimitsConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Broadcast service credentials and endpoint
    pub pusher: PusherConfig,
}

impl RelayConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        if self.limits.max_body_size == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_body_size cannot be 0".into(),
            ));
        }

        if self.pusher.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(
                "broadcast timeout cannot be 0".into(),
            ));
        }

        Ok(())
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `RELAY_HTTP_HOST`: Bind address (default: 0.0.0.0)
    /// - `RELAY_HTTP_PORT` or `PORT`: Listen port (default: 3000)
    /// - `RELAY_MAX_BODY_SIZE`: Max request body in bytes (default: 65536)
    /// - `RELAY_CORS_ORIGINS`: Comma separated origins, `*` for any (default: *)
    /// - `PUSHER_APP_ID`, `PUSHER_APP_KEY`, `PUSHER_APP_SECRET`, `PUSHER_APP_CLUSTER`
    /// - `PUSHER_HOST`: Override the API host (default: derived from cluster)
    /// - `PUSHER_SECURE`: Use https (default: true)
    /// - `PUSHER_TIMEOUT_SECS`: Publish request timeout (default: 5)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("RELAY_HTTP_HOST").and_then(|v| v.parse().ok()) {
            config.http.host = host;
        }
        if let Some(port) = lookup("RELAY_HTTP_PORT")
            .or_else(|| lookup("PORT"))
            .and_then(|v| v.parse().ok())
        {
            config.http.port = port;
        }
        if let Some(size) = lookup("RELAY_MAX_BODY_SIZE").and_then(|v| v.parse().ok()) {
            config.limits.max_body_size = size;
        }
        if let Some(origins) = lookup("RELAY_CORS_ORIGINS") {
            config.cors.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }

        let pusher = &mut config.pusher;
        pusher.app_id = lookup("PUSHER_APP_ID").unwrap_or_default();
        pusher.key = lookup("PUSHER_APP_KEY").unwrap_or_default();
        pusher.secret = lookup("PUSHER_APP_SECRET").unwrap_or_default();
        pusher.cluster = lookup("PUSHER_APP_CLUSTER").unwrap_or_default();
        pusher.host = lookup("PUSHER_HOST").filter(|h| !h.is_empty());
        if let Some(secure) = lookup("PUSHER_SECURE") {
            pusher.secure = !(secure.eq_ignore_ascii_case("false") || secure == "0");
        }
        if let Some(timeout) = lookup("PUSHER_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            pusher.timeout_secs = timeout;
        }

        config
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 3000)
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 3000,
        }
    }
}

/// Request limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Max request body size in bytes (default: 64KB)
    pub max_body_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_size: 64 * 1024,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Enable CORS
    pub enabled: bool,
    /// Allowed origins ("*" for all)
    pub allowed_origins: Vec<String>,
    /// Allowed headers
    pub allowed_headers: Vec<String>,
    /// Max age for preflight cache
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec!["*".to_string()],
            allowed_headers: vec!["Content-Type".to_string()],
            max_age: 86400, // 24 hours
        }
    }
}

/// Broadcast service (Pusher Channels) configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PusherConfig {
    pub app_id: String,
    pub key: String,
    #[serde(skip_serializing)]
    pub secret: String,
    /// Cluster region, e.g. "eu" or "us2"
    pub cluster: String,
    /// Explicit API host, overrides the cluster-derived one
    pub host: Option<String>,
    /// Use https
    pub secure: bool,
    /// Publish request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for PusherConfig {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            key: String::new(),
            secret: String::new(),
            cluster: String::new(),
            host: None,
            secure: true,
            timeout_secs: 5,
        }
    }
}

impl PusherConfig {
    /// API host: explicit override, else cluster host, else the legacy default.
    pub fn api_host(&self) -> String {
        match (&self.host, self.cluster.is_empty()) {
            (Some(host), _) => host.clone(),
            (None, false) => format!("api-{}.pusher.com", self.cluster),
            (None, true) => "api.pusherapp.com".to_string(),
        }
    }

    /// Base URL including scheme
    pub fn base_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{}://{}", scheme, self.api_host())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Names of required credentials that are empty.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        [
            ("PUSHER_APP_ID", &self.app_id),
            ("PUSHER_APP_KEY", &self.key),
            ("PUSHER_APP_SECRET", &self.secret),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

impl fmt::Debug for PusherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PusherConfig")
            .field("app_id", &self.app_id)
            .field("key", &self.key)
            .field("secret", &"[REDACTED]")
            .field("cluster", &self.cluster)
            .field("host", &self.host)
            .field("secure", &self.secure)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Port 0 is not a usable listen port
    #[error("invalid port: 0")]
    InvalidPort,
    /// Invalid size limit
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
    /// Invalid timeout value
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
}
