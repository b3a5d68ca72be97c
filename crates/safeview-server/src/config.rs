//! Server configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the server can start with zero
//! configuration for local development.

use std::net::SocketAddr;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address for the HTTP (axum) API server.
    /// Env: `HTTP_ADDR`
    /// Default: `0.0.0.0:8080`
    pub http_addr: SocketAddr,

    /// Email the dashboard endpoints resolve as "the current user".
    /// There is no session layer in the demo, so every request acts on
    /// this account.
    /// Env: `DEMO_USER_EMAIL`
    /// Default: `parent@example.com`
    pub demo_user_email: String,

    /// Human-readable name for this server instance.
    /// Env: `INSTANCE_NAME`
    /// Default: `"SafeView Demo"`
    pub instance_name: String,

    /// Per-IP request budget per minute (0 = unlimited).
    /// Env: `RATE_LIMIT_PER_MIN`
    /// Default: `600`
    pub rate_limit_per_min: u32,

    /// Whether to load the Johnson Family demo data set at startup.
    /// Env: `SEED_DEMO_DATA` (true/false)
    /// Default: `true`
    pub seed_demo_data: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: ([0, 0, 0, 0], 8080).into(),
            demo_user_email: "parent@example.com".to_string(),
            instance_name: "SafeView Demo".to_string(),
            rate_limit_per_min: 600,
            seed_demo_data: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("HTTP_ADDR") {
            if let Ok(parsed) = addr.parse::<SocketAddr>() {
                config.http_addr = parsed;
            } else {
                tracing::warn!(value = %addr, "Invalid HTTP_ADDR, using default");
            }
        }

        if let Ok(email) = std::env::var("DEMO_USER_EMAIL") {
            if !email.is_empty() {
                config.demo_user_email = email;
            }
        }

        if let Ok(name) = std::env::var("INSTANCE_NAME") {
            config.instance_name = name;
        }

        if let Ok(val) = std::env::var("RATE_LIMIT_PER_MIN") {
            if let Ok(n) = val.parse::<u32>() {
                config.rate_limit_per_min = n;
            } else {
                tracing::warn!(value = %val, "Invalid RATE_LIMIT_PER_MIN, using default");
            }
        }

        if let Ok(val) = std::env::var("SEED_DEMO_DATA") {
            config.seed_demo_data = val != "false" && val != "0";
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }
}
