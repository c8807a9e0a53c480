//! Configuration types for the threadvault server.
//!
//! Values are layered: profile defaults, then an optional config file, then
//! `THREADVAULT_*` environment variables. Command-line flags are applied on
//! top by the binary.

use crate::error::{Error, Result};
use crate::profiles::ConfigProfile;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix (`THREADVAULT_PORT`, `THREADVAULT_DATA_PATH`, ...)
pub const ENV_PREFIX: &str = "THREADVAULT";

/// Base name looked up for a config file when none is given explicitly
pub const DEFAULT_CONFIG_NAME: &str = "threadvault";

/// Global server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Profile the defaults came from
    pub profile: String,

    /// Bundled dataset file
    pub data_path: PathBuf,
    /// Local store file (lists, comments, revisions)
    pub store_path: PathBuf,
    /// Directory served for non-API paths
    pub static_dir: PathBuf,
    /// Single-page client entry point used as the fallback page
    pub spa_index: PathBuf,
    /// Static export destination
    pub output_dir: PathBuf,

    // Network
    pub bind_address: String,
    pub port: u16,
    pub cors_enabled: bool,

    // Resolution
    pub max_link_depth: usize,
    /// Tweets one resolution may produce before remaining links go `null`
    pub max_link_nodes: usize,

    // Diagnostics
    pub log_level: String,
    pub health_on_startup: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            profile: "default".to_string(),
            data_path: PathBuf::from("documents.json"),
            store_path: PathBuf::from(".threadvault/local-data.json"),
            static_dir: PathBuf::from("public"),
            spa_index: PathBuf::from("dist/index.html"),
            output_dir: PathBuf::from("public"),
            bind_address: "127.0.0.1".to_string(),
            port: 3000,
            cors_enabled: true,
            max_link_depth: 64,
            max_link_nodes: 10_000,
            log_level: "INFO".to_string(),
            health_on_startup: true,
        }
    }
}

impl ServerConfig {
    /// Create new configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder seeded from defaults
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::new()
    }

    /// Load configuration from profile defaults, an optional file and the
    /// environment.
    ///
    /// When `file` is `None`, `threadvault.{yaml,toml,json}` in the working
    /// directory is used if present.
    pub fn load(profile: ConfigProfile, file: Option<&Path>) -> Result<Self> {
        let defaults = profile.create_config();
        let seed = config::Config::try_from(&defaults)
            .map_err(|e| Error::config_error(format!("Failed to seed defaults: {}", e)))?;

        let mut builder = config::Config::builder().add_source(seed);

        builder = match file {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::config_error(format!(
                        "Config file does not exist: {}",
                        path.display()
                    )));
                }
                builder.add_source(config::File::from(path).required(true))
            }
            None => builder.add_source(config::File::with_name(DEFAULT_CONFIG_NAME).required(false)),
        };

        let merged = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .map_err(|e| Error::config_error(format!("Failed to read configuration: {}", e)))?;

        let mut config: ServerConfig = merged
            .try_deserialize()
            .map_err(|e| Error::config_error(format!("Invalid configuration: {}", e)))?;

        config.expand_paths()?;
        config.validate()?;
        Ok(config)
    }

    /// Expand `~` and `$VAR` in every path setting
    pub fn expand_paths(&mut self) -> Result<()> {
        self.data_path = expand(&self.data_path)?;
        self.store_path = expand(&self.store_path)?;
        self.static_dir = expand(&self.static_dir)?;
        self.spa_index = expand(&self.spa_index)?;
        self.output_dir = expand(&self.output_dir)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.data_path.as_os_str().is_empty() {
            return Err(Error::config_error("data_path cannot be empty"));
        }
        if self.store_path.as_os_str().is_empty() {
            return Err(Error::config_error("store_path cannot be empty"));
        }
        if self.bind_address.trim().is_empty() {
            return Err(Error::config_error("bind_address cannot be empty"));
        }
        if self.max_link_depth == 0 {
            return Err(Error::config_error("max_link_depth must be at least 1"));
        }
        if self.max_link_nodes == 0 {
            return Err(Error::config_error("max_link_nodes must be at least 1"));
        }
        Ok(())
    }

    /// `address:port` for the listener
    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Render as YAML (used by `config show`)
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| Error::config_error(format!("Failed to serialize config: {}", e)))
    }
}

fn expand(path: &Path) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw).map_err(|e| {
        Error::config_error(format!("Failed to expand path '{}': {}", raw, e))
    })?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Builder for ServerConfig
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
        }
    }

    /// Start from a profile's defaults
    pub fn from_profile(profile: ConfigProfile) -> Self {
        Self {
            config: profile.create_config(),
        }
    }

    /// Set the dataset path
    pub fn data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_path = path.into();
        self
    }

    /// Set the local store path
    pub fn store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.store_path = path.into();
        self
    }

    /// Set the static directory
    pub fn static_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.static_dir = path.into();
        self
    }

    /// Set the export destination
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_dir = path.into();
        self
    }

    /// Set the listening port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the resolver depth limit
    pub fn max_link_depth(mut self, depth: usize) -> Self {
        self.config.max_link_depth = depth;
        self
    }

    /// Set the resolver node budget
    pub fn max_link_nodes(mut self, nodes: usize) -> Self {
        self.config.max_link_nodes = nodes;
        self
    }

    /// Build and validate
    pub fn build(self) -> Result<ServerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ServerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
