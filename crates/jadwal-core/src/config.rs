//! Configuration management
//!
//! All settings come from environment variables. The binary loads a `.env`
//! file first, so local development can keep credentials out of the shell.

/// Runtime configuration for the gateway
#[derive(Debug, Clone)]
pub struct Config {
    /// UltraMsg instance identifier
    pub instance_id: String,

    /// UltraMsg API token
    pub token: String,

    /// Shared secret for the schedule viewer endpoint.
    /// Unset means the endpoint rejects every request.
    pub access_token: Option<String>,

    /// Path to the schedule file
    pub schedule_path: String,

    /// HTTP listen port
    pub port: u16,
}

fn default_schedule_path() -> String {
    "jadwal.json".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Never fails: missing UltraMsg credentials are left empty so the
    /// server can still start, and the caller decides how loudly to
    /// complain about them.
    pub fn from_env() -> Self {
        Config {
            instance_id: std::env::var("ULTRAMSG_INSTANCE_ID").unwrap_or_default(),
            token: std::env::var("ULTRAMSG_TOKEN").unwrap_or_default(),
            access_token: std::env::var("JADWAL_ACCESS_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),
            schedule_path: std::env::var("JADWAL_PATH")
                .unwrap_or_else(|_| default_schedule_path()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or_else(default_port),
        }
    }

    /// Whether both UltraMsg credentials are present
    pub fn has_credentials(&self) -> bool {
        !self.instance_id.is_empty() && !self.token.is_empty()
    }
}
