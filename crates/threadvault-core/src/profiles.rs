//! Pre-configured profiles for different deployment scenarios
//!
//! - Development: verbose logging, health report at startup
//! - Production: quieter logging, listens on all interfaces
//! - Static: static-site export only, no server concerns

use crate::config::ServerConfig;
use crate::error::{Error, Result};
use std::str::FromStr;

/// Profile selector for pre-configured deployments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigProfile {
    /// Development: debug logging, startup diagnostics
    Development,
    /// Production: info logging, bound to 0.0.0.0
    Production,
    /// Static: generation only
    Static,
}

impl ConfigProfile {
    /// Create a ServerConfig from this profile
    pub fn create_config(self) -> ServerConfig {
        let mut config = ServerConfig::new();
        config.profile = self.name().to_string();

        match self {
            Self::Development => {
                config.log_level = "DEBUG".to_string();
                config.health_on_startup = true;
            }

            Self::Production => {
                config.log_level = "INFO".to_string();
                config.bind_address = "0.0.0.0".to_string();
                config.health_on_startup = false;
            }

            Self::Static => {
                config.log_level = "WARN".to_string();
                config.health_on_startup = false;
                config.cors_enabled = false;
            }
        }

        config
    }

    /// Lower-case profile name
    pub fn name(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Static => "static",
        }
    }

    /// Get profile description
    pub fn description(self) -> &'static str {
        match self {
            Self::Development => "Debug logging and link health report at startup",
            Self::Production => "Info logging, listens on all interfaces",
            Self::Static => "Static site generation only",
        }
    }
}

impl FromStr for ConfigProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "static" => Ok(Self::Static),
            other => Err(Error::config_error(format!(
                "Unknown profile '{}'. Valid options: development, production, static",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_profile() {
        let config = ConfigProfile::Development.create_config();
        assert_eq!(config.log_level, "DEBUG");
        assert!(config.health_on_startup);
        assert_eq!(config.profile, "development");
    }

    #[test]
    fn test_production_profile() {
        let config = ConfigProfile::Production.create_config();
        assert_eq!(config.bind_address, "0.0.0.0");
        assert!(!config.health_on_startup);
    }

    #[test]
    fn test_parse_profile() {
        assert_eq!("prod".parse::<ConfigProfile>().unwrap(), ConfigProfile::Production);
        assert_eq!("Static".parse::<ConfigProfile>().unwrap(), ConfigProfile::Static);
        assert!("staging".parse::<ConfigProfile>().is_err());
    }
}
