//! Linksweep main entry point
//!
//! Command-line interface for the linksweep broken-link checker.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use linksweep::config::{load_seed_list, CrawlConfig};
use linksweep::crawler::crawl;
use linksweep::{report, ConfigError};
use regex::Regex;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Linksweep: a recursive broken-link checker
///
/// Starting from a seed URL, linksweep follows every link within the
/// site's own domain (links leaving the site get a single shallow check)
/// and reports each visited URL's outcome as a JSON array.
#[derive(Parser, Debug)]
#[command(name = "linksweep")]
#[command(version)]
#[command(about = "Recursively checks a web site for broken links", long_about = None)]
struct Cli {
    /// The URL to traverse
    #[arg(short = 'u', long = "url")]
    url: Url,

    /// The number of recursions to stop crawling after. Default is infinite.
    #[arg(short = 's', long = "stop-after")]
    stop_after: Option<u32>,

    /// Resolved link URLs matching this regex are excluded from link expansion
    #[arg(short = 'i', long = "ignoreRegex")]
    ignore_regex: Option<String>,

    /// Path to a file with additional seed URLs, one per line
    #[arg(short = 'l', long = "list")]
    list: Option<PathBuf>,

    /// The file to save the JSON result array to
    #[arg(short = 'o', long = "output-file")]
    output_file: Option<PathBuf>,

    /// Whether to print the result to stdout
    #[arg(long = "dont-print-result")]
    dont_print_result: bool,

    /// Whether to pretty print the json output
    #[arg(long = "pretty-print")]
    pretty_print: bool,

    /// The log level to log at
    #[arg(short = 'L', long = "log-level", value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// The User-Agent header sent on every request, also used as the
    /// robots.txt agent token
    #[arg(long = "user-agent", default_value = concat!("linksweep/", env!("CARGO_PKG_VERSION")))]
    user_agent: String,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.log_level);

    // All configuration problems are fatal here, before any network
    // activity.
    let mut config = CrawlConfig::new(cli.url, &cli.user_agent)?;
    config.stop_after = cli.stop_after;
    if let Some(pattern) = &cli.ignore_regex {
        config.ignore = Some(Regex::new(pattern).map_err(ConfigError::from)?);
    }
    if let Some(path) = &cli.list {
        config.extra_seeds = load_seed_list(path)?;
    }

    let results = crawl(config).await?;
    tracing::info!("crawl finished with {} recorded result(s)", results.len());

    let rendered = report::to_json(&results, cli.pretty_print)?;
    if !cli.dont_print_result {
        println!("{rendered}");
    }
    if let Some(path) = &cli.output_file {
        std::fs::write(path, &rendered)
            .with_context(|| format!("failed to write results to {}", path.display()))?;
        tracing::info!("results written to {}", path.display());
    }

    Ok(())
}

/// Sets up the tracing subscriber at the requested level.
fn setup_logging(level: LogLevel) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level.as_filter()))
        .with_target(false)
        .init();
}
