//! kappa - text-coherence scoring
//!
//! Usage:
//!   kappa                                  → analyze the built-in sample text
//!   kappa analyze --text "..." | --file F  → analyze and write a JSON report
//!   kappa server --port 8765               → WebSocket scoring server
//!   kappa version                          → show version

use clap::{Parser, Subcommand};
use kappa::analyze::{default_output_path, summary, AnalysisReport, InputSource};
use kappa::logging::init_tracing;
use kappa::settings::{self, Overrides};
use kappa_core::KappaConfig;
use kappa_engine::KappaEngine;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "kappa",
    about = "Deterministic text-coherence scoring engine",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Stability sensitivity (> 0)
    #[arg(long, global = true)]
    sensitivity: Option<f64>,

    /// Coherence threshold, in (0, 1)
    #[arg(long, global = true)]
    threshold: Option<f64>,

    /// Write logs to a file (in addition to stderr)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a text and write a JSON report
    Analyze {
        /// Text to analyze
        #[arg(short, long)]
        text: Option<String>,
        /// Read the text from a file
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Report path (default: kappa_analysis_<timestamp>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run the WebSocket scoring server
    Server {
        /// Interface to bind
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Score many texts at once
    Batch,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Analyze {
        text: None,
        file: None,
        output: None,
    });

    match command {
        Commands::Version => {
            println!("kappa v{}", env!("CARGO_PKG_VERSION"));
        }

        Commands::Batch => {
            println!("Batch processing mode not yet implemented");
            std::process::exit(1);
        }

        Commands::Analyze { text, file, output } => {
            let _guard = init_tracing(cli.log_file.as_deref())?;
            let overrides = Overrides {
                sensitivity: cli.sensitivity,
                threshold: cli.threshold,
                ..Overrides::default()
            };
            let config = settings::resolve(cli.config.as_deref(), &overrides)?;
            run_analyze(&config, InputSource::from_args(text, file), output)?;
        }

        Commands::Server { host, port } => {
            let _guard = init_tracing(cli.log_file.as_deref())?;
            let overrides = Overrides {
                sensitivity: cli.sensitivity,
                threshold: cli.threshold,
                host,
                port,
            };
            let config = settings::resolve(cli.config.as_deref(), &overrides)?;
            let engine = Arc::new(KappaEngine::new(config.engine.clone())?);
            kappa_gateway::start_server(&config.server, engine).await?;
        }
    }

    Ok(())
}

fn run_analyze(
    config: &KappaConfig,
    source: InputSource,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let text = source.read()?;
    let engine = KappaEngine::new(config.engine.clone())?;

    println!("Computing coherence metrics...");
    let report = AnalysisReport::run(&engine, &text);
    println!();
    print!("{}", summary(&report.analysis));

    let path = output.unwrap_or_else(|| default_output_path(chrono::Local::now()));
    report.write(&path)?;
    println!();
    println!("Results saved to: {}", path.display());
    Ok(())
}
