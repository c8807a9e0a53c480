//! threadvault CLI

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use threadvault::logging::{self, LogFormat};
use threadvault::{AppState, log_health_summary, serve};
use threadvault_core::{ConfigProfile, Dataset, ServerConfig};
use threadvault_export::StaticSiteGenerator;
use threadvault_graph::{HealthAnalyzer, LinkGraph};

/// threadvault - browse threaded documents with resolved cross-document links
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Bundled dataset file
    #[arg(short, long, global = true, env = "THREADVAULT_DATA_PATH")]
    data: Option<PathBuf>,

    /// Local store file for lists, comments and revisions
    #[arg(short, long, global = true, env = "THREADVAULT_STORE_PATH")]
    store: Option<PathBuf>,

    /// Configuration file (yaml, toml or json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Configuration profile (development, production, static)
    #[arg(short, long, global = true, default_value = "development")]
    profile: String,

    /// Log output format (human, json)
    #[arg(long, global = true, default_value = "human")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server
    Serve(ServeArgs),
    /// Write the static site
    Generate {
        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Report broken links, malformed links and cycles
    Check {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Exit with an error when the dataset is unhealthy
        #[arg(long)]
        strict: bool,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Listen port
    #[arg(long)]
    port: Option<u16>,

    /// Listen address
    #[arg(long)]
    bind: Option<String>,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective configuration as YAML
    Show,
}

fn resolve_config(cli: &Cli) -> anyhow::Result<ServerConfig> {
    let profile: ConfigProfile = cli.profile.parse()?;
    let mut config = ServerConfig::load(profile, cli.config.as_deref())
        .context("Failed to load configuration")?;

    if let Some(data) = &cli.data {
        config.data_path = data.clone();
    }
    if let Some(store) = &cli.store {
        config.store_path = store.clone();
    }
    match &cli.command {
        Command::Serve(args) => {
            if let Some(port) = args.port {
                config.port = port;
            }
            if let Some(bind) = &args.bind {
                config.bind_address = bind.clone();
            }
        }
        Command::Generate {
            output: Some(output),
        } => config.output_dir = output.clone(),
        _ => {}
    }

    config.expand_paths()?;
    config.validate()?;
    Ok(config)
}

fn load_dataset(config: &ServerConfig) -> anyhow::Result<Dataset> {
    Dataset::load(&config.data_path)
        .with_context(|| format!("Failed to load dataset from {}", config.data_path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    logging::init(cli.log_format, &config.log_level).map_err(anyhow::Error::msg)?;
    log::debug!("Profile: {} | data: {}", config.profile, config.data_path.display());

    match cli.command {
        Command::Serve(_) => {
            log::info!("threadvault v{}", env!("CARGO_PKG_VERSION"));
            let state = AppState::load(config)
                .await
                .context("Failed to start server")?;
            serve(Arc::new(state)).await?;
        }
        Command::Generate { .. } => {
            let dataset = load_dataset(&config)?;
            let summary = StaticSiteGenerator::new(&dataset, &config.output_dir)
                .with_max_link_depth(config.max_link_depth)
                .with_max_link_nodes(config.max_link_nodes)
                .generate()
                .context("Static generation failed")?;
            for skipped in &summary.skipped {
                log::warn!("Skipped page for '{}'", skipped);
            }
            println!(
                "Static files generated successfully! ({} documents, {} tweets, {} files)",
                summary.documents, summary.tweets, summary.files_written
            );
        }
        Command::Check { json, strict } => {
            let dataset = load_dataset(&config)?;
            let graph = LinkGraph::from_dataset(&dataset);
            let report = HealthAnalyzer::new(&dataset, &graph).analyze();

            if json {
                println!("{}", threadvault_core::to_json_string(&report, "health report")?);
            } else {
                log_health_summary(&report);
                println!(
                    "Health score: {} ({} unresolvable of {} links)",
                    report.health_score,
                    report.unresolvable_count(),
                    report.total_links
                );
            }

            if strict && !report.is_healthy() {
                bail!("Dataset health score {} is below 80", report.health_score);
            }
        }
        Command::Config {
            action: ConfigAction::Show,
        } => {
            print!("{}", config.to_yaml()?);
        }
    }

    Ok(())
}
