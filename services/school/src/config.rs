use serde::Deserialize;

use campus_core::config::Config;

/// School service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct SchoolConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// HMAC secret for signing session tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// TCP port for the HTTP server (default 3000). Env var: `SCHOOL_PORT`.
    #[serde(default = "default_school_port")]
    pub school_port: u16,
}

fn default_school_port() -> u16 {
    3000
}

impl Config for SchoolConfig {}
