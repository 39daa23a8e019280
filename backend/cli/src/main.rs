mod config_cmd;
mod query_cmd;
mod status_cmd;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use triton_config::{config_dir, config_file_path, load_and_prepare, validate, TritonConfig};
use triton_gateway::{start_server, GatewayState};
use triton_orchestrator::TritonRuntime;

#[derive(Parser)]
#[command(name = "triton")]
#[command(about = "Triton: maritime AI query orchestrator")]
#[command(version)]
struct Cli {
    /// Config file (defaults to triton.yaml in the config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Answer one query in-process and print the result
    Query {
        /// Query text
        text: String,
        /// Task category (e.g. weather-analysis)
        #[arg(short, long)]
        task: Option<String>,
        /// JSON file with the query context
        #[arg(short, long)]
        context: Option<PathBuf>,
    },
    /// Show backend status from a running server
    Status,
    /// Probe both backends once and print availability
    Check,
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective config with secrets masked
    Show,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_file_path(&config_dir()));

    if let Commands::Config {
        action: ConfigAction::Init { force },
    } = &cli.command
    {
        return config_cmd::init(&path, *force).await;
    }

    let config = load_and_prepare(&path).await?;
    init_logging(&config);

    match cli.command {
        Commands::Serve { port } => run_server(config, port).await,
        Commands::Query { text, task, context } => {
            query_cmd::run(config, &text, task.as_deref(), context.as_deref()).await
        }
        Commands::Status => status_cmd::status(&config).await,
        Commands::Check => status_cmd::check(&config).await,
        Commands::Config { .. } => config_cmd::show(&config),
    }
}

fn init_logging(config: &TritonConfig) {
    let dir = config.logging.dir.as_deref().map(Path::new);
    triton_logging::init_logger(dir, &config.logging.level, config.logging.json);
    for warning in validate(config).warnings {
        warn!(path = %warning.path, "{}", warning.message);
    }
}

async fn run_server(config: TritonConfig, port: Option<u16>) -> Result<()> {
    let port = port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", config.server.bind, port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", config.server.bind, port))?;

    info!(%addr, "Starting Triton runtime");
    let runtime = TritonRuntime::start(config).await?;
    let state = GatewayState::new(runtime.orchestrator());

    let served = start_server(addr, state).await;
    runtime.shutdown();
    served
}
