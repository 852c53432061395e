use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section may be omitted; missing values fall back to the defaults
/// below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
}

/// Where the HTTP server listens and where it finds static files.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: IpAddr,
    pub port: u16,
    /// Directory holding `favicon.ico`.
    pub static_dir: PathBuf,
}

impl ServerSettings {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Contains the PostgreSQL connection parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Falls back to the `DATABASE_URL` environment variable when unset.
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    /// Create the tables at startup if they are missing.
    pub ensure_schema: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive, e.g. "info" or "web_server=debug,info".
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs are also written to daily-rolling files in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

// --- Default Implementations ---

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
            static_dir: PathBuf::from("static"),
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            acquire_timeout_secs: 5,
            ensure_schema: true,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "mercado.log".to_string(),
        }
    }
}
