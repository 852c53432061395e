use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, DatabaseSettings, LoggingSettings, ServerSettings};

/// Prefix of the environment variables that override file settings,
/// e.g. `MERCADO__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "MERCADO";

/// Loads the application configuration.
///
/// Sources are layered, later ones winning: built-in defaults, then the TOML
/// file (`config.toml` in the working directory when `path` is `None`, in
/// which case it is optional), then `MERCADO__*` environment variables.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("config.toml").required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    tracing::debug!(addr = %config.server.addr(), "Configuration loaded.");
    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.database.max_connections == 0 {
        return Err(ConfigError::ValidationError(
            "database.max_connections must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Command-line overrides applied on top of the loaded configuration.
#[cfg(feature = "clap")]
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ServerOverrides {
    /// Path to a TOML configuration file (defaults to ./config.toml if present).
    #[arg(long)]
    pub config: Option<std::path::PathBuf>,

    /// The address to bind, e.g. 127.0.0.1.
    #[arg(long)]
    pub host: Option<std::net::IpAddr>,

    /// The port to listen on.
    #[arg(long)]
    pub port: Option<u16>,
}

#[cfg(feature = "clap")]
impl ServerOverrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = from_toml("");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.max_connections, 10);
        assert!(config.database.url.is_none());
        assert!(config.database.ensure_schema);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn sections_override_only_what_they_name() {
        let config = from_toml(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [database]
            url = "postgres://localhost/mercado"
            "#,
        );
        assert_eq!(config.server.addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.database.url.as_deref(), Some("postgres://localhost/mercado"));
        assert_eq!(config.database.acquire_timeout_secs, 5);
    }

    #[test]
    fn zero_pool_size_is_rejected() {
        let config = from_toml("[database]\nmax_connections = 0");
        assert!(matches!(validate(&config), Err(ConfigError::ValidationError(_))));
    }
}
