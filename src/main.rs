//! Sentiment Dashboard CLI
//!
//! Terminal front end for the sentiment dashboard:
//! - Check API health
//! - Analyze a text, a keyword or a batch of texts
//! - Load or watch sentiment trends

use anyhow::Context;
use clap::{Parser, Subcommand};
use sentiment_dashboard::config::{DiscoveredConfig, LoggingConfig};
use sentiment_dashboard::{Config, DashboardError, DashboardSession, TextSurface};
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sentiment-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Live sentiment trends and analysis from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sentiment API base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check API health
    Health,

    /// Analyze the sentiment of a single text
    Analyze {
        /// Text to analyze
        text: String,
    },

    /// Analyze recent tweets for a keyword
    Twitter {
        /// Keyword to search
        keyword: String,
        /// Number of tweets (default from config)
        #[arg(short = 'n', long)]
        count: Option<u32>,
    },

    /// Load sentiment trends once
    Trends {
        /// Keyword to chart
        keyword: String,
    },

    /// Analyze one text per line from a file or stdin
    Batch {
        /// Input file (default: stdin)
        path: Option<PathBuf>,
    },

    /// Keep the trend chart refreshed until Ctrl-C
    Watch {
        /// Keyword to chart
        keyword: String,
        /// Refresh interval in milliseconds (default from config)
        #[arg(short, long)]
        interval_ms: Option<u64>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        return write_default_config(output.as_ref());
    }

    let discovered = match &cli.config {
        Some(path) => DiscoveredConfig {
            config: Config::load_with_env(path)?,
            source: Some(path.clone()),
            rejected: Vec::new(),
        },
        None => Config::discover(),
    };
    let mut config = discovered.config.clone();
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    init_tracing(&config.logging);
    discovered.log();
    tracing::info!(
        "Sentiment Dashboard v{} ({})",
        env!("CARGO_PKG_VERSION"),
        config.api.base_url
    );

    let session = DashboardSession::new(&config)?;

    let result = match cli.command {
        Commands::Health => {
            let status = session.check_health().await;
            println!("{}", status);
            Ok(())
        }

        Commands::Analyze { text } => session
            .analyze_text(&text)
            .await
            .map(|view| print!("{}", view)),

        Commands::Twitter { keyword, count } => session
            .analyze_twitter(&keyword, count)
            .await
            .map(|view| print!("{}", view)),

        Commands::Trends { keyword } => match session.load_trends(&keyword).await {
            Ok(_) => {
                print_trends(&session, &mut TextSurface::default()).await;
                Ok(())
            }
            Err(e) => Err(e),
        },

        Commands::Batch { path } => {
            let input = read_batch_input(path.as_ref())?;
            session
                .analyze_batch(&input)
                .await
                .map(|view| print!("{}", view))
        }

        Commands::Watch {
            keyword,
            interval_ms,
        } => watch(&session, &keyword, interval_ms.map(Duration::from_millis)).await,

        Commands::Config { .. } => Ok(()),
    };

    session.shutdown();

    if let Err(e) = result {
        let panels = session.panels().await;
        let message = match &e {
            DashboardError::Validation(message) => message.clone(),
            _ => [
                panels.text.error(),
                panels.twitter.error(),
                panels.trends.error(),
                panels.batch.error(),
            ]
            .into_iter()
            .flatten()
            .next()
            .map(str::to_string)
            .unwrap_or_else(|| e.to_string()),
        };
        eprintln!("{}", message);
        std::process::exit(1);
    }

    Ok(())
}

/// Initialize tracing from the logging config; `RUST_LOG` wins when set
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("sentiment_dashboard={}", logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Load once, then redraw after every refresh until Ctrl-C
async fn watch(
    session: &DashboardSession,
    keyword: &str,
    interval: Option<Duration>,
) -> Result<(), DashboardError> {
    let mut surface = TextSurface::default();

    match session.load_trends(keyword).await {
        Err(DashboardError::Fetch(e)) => tracing::warn!(error = %e, "Initial trends load failed"),
        other => {
            other?;
        }
    }
    session.start_auto_refresh(keyword, interval)?;
    print_trends(session, &mut surface).await;

    let mut changes = session.coordinator().subscribe();

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                print_trends(session, &mut surface).await;
            }
            _ = &mut ctrl_c => {
                tracing::info!("Interrupted, stopping auto-refresh");
                break;
            }
        }
    }

    Ok(())
}

async fn print_trends(session: &DashboardSession, surface: &mut TextSurface) {
    let trends = session.redraw_trends(&mut *surface).await;

    println!("{}", surface.output());
    print!("{}", trends);
    println!();
}

fn read_batch_input(path: Option<&PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read batch input {:?}", path)),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read batch input from stdin")?;
            Ok(input)
        }
    }
}

fn write_default_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = sentiment_dashboard::generate_default_config();

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", config),
    }

    Ok(())
}
