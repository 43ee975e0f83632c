//! Layered application configuration
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults
//! 2. YAML file passed with `--config`
//! 3. environment variables `AREA_CALCULATOR__<SECTION>__<KEY>`
//! 4. CLI overrides

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

/// Prefix for environment overrides; nested keys are separated by `__`.
pub const ENV_PREFIX: &str = "AREA_CALCULATOR__";

/// Default listen address of the gRPC server.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:50051";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// `host:port` the gRPC server binds to. Port `0` picks an ephemeral port.
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set, e.g. `info` or `area_calculator=debug`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

/// Command-line values that take precedence over every other source.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub listen: Option<String>,
    /// Number of `-v` flags: 1 info, 2 debug, 3+ trace.
    pub verbose: u8,
}

impl AppConfig {
    /// Load the configuration from defaults, the optional YAML file and the environment.
    ///
    /// # Errors
    /// Returns an error if `path` does not point to a file or if any source fails
    /// to parse.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            if !path.is_file() {
                bail!("config file does not exist: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("failed to load configuration")
    }

    pub fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if let Some(listen) = &cli.listen {
            self.server.listen_addr.clone_from(listen);
        }

        match cli.verbose {
            0 => {}
            1 => "info".clone_into(&mut self.logging.level),
            2 => "debug".clone_into(&mut self.logging.level),
            _ => "trace".clone_into(&mut self.logging.level),
        }
    }

    /// Parse `server.listen_addr`.
    ///
    /// # Errors
    /// Returns an error if the address is not a valid `host:port` socket address.
    pub fn listen_socket_addr(&self) -> Result<SocketAddr> {
        self.server
            .listen_addr
            .parse()
            .with_context(|| format!("invalid server.listen_addr '{}'", self.server.listen_addr))
    }

    /// Render the effective configuration as YAML.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_saphyr::to_string(self)
            .map_err(|e| anyhow!("failed to serialize configuration to YAML: {e}"))
    }
}
