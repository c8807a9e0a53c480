//! Logger installation for the binary

use std::str::FromStr;

/// Output format of log records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines with UTC timestamps
    #[default]
    Human,
    /// One JSON object per record
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" | "text" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(format!("Unknown log format '{}' (expected human or json)", other)),
        }
    }
}

/// Parse a level name, falling back to `Info`
pub fn parse_level(level: &str) -> log::LevelFilter {
    level.parse().unwrap_or(log::LevelFilter::Info)
}

/// Install the global logger.
///
/// `RUST_LOG` overrides `level` for the JSON format.
pub fn init(format: LogFormat, level: &str) -> Result<(), String> {
    match format {
        LogFormat::Human => simple_logger::SimpleLogger::new()
            .with_level(parse_level(level))
            .with_utc_timestamps()
            .init()
            .map_err(|e| format!("Failed to initialize logger: {}", e)),
        LogFormat::Json => {
            let filter = tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_ascii_lowercase()));
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| format!("Failed to initialize logger: {}", e))
        }
    }
}
