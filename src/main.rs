//! Petrify main entry point
//!
//! Command-line interface for crawling a website into a static mirror.

use anyhow::Context;
use clap::Parser;
use petrify::config::{load_config, resolve_config, FileConfig, OutputTarget, Overrides};
use petrify::crawler::crawl;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Petrify: crawl a website into a deployable static mirror
///
/// Starting from the seed URL, petrify follows links, scripts, images,
/// stylesheets, and CSS-referenced assets on the allowed domains and writes
/// each resource to a local directory or an S3 bucket.
#[derive(Parser, Debug)]
#[command(name = "petrify")]
#[command(version)]
#[command(about = "Crawl a website into a static mirror", long_about = None)]
struct Cli {
    /// Seed URL to start the crawl from
    #[arg(value_name = "URL")]
    url: String,

    /// Optional TOML configuration file; flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the crawl to this directory, created if it does not exist
    #[arg(short = 'd', long, value_name = "DIRECTORY")]
    output_dir: Option<PathBuf>,

    /// Comma separated list of domains to crawl; others are ignored
    #[arg(long, value_delimiter = ',', value_name = "DOMAINS")]
    valid_domains: Option<Vec<String>>,

    /// Don't write files to disk or S3
    #[arg(long)]
    skip_write: bool,

    /// Mirror only the seed page and its assets, without following hyperlinks
    #[arg(long)]
    single_page: bool,

    /// Name of the S3 bucket to write to
    #[arg(long, value_name = "BUCKET")]
    aws_s3_bucket: Option<String>,

    /// AWS region of the bucket
    #[arg(long, value_name = "REGION")]
    aws_region: Option<String>,

    /// AWS access key ID
    #[arg(long, value_name = "KEY")]
    aws_access_key: Option<String>,

    /// AWS secret access key
    #[arg(long, value_name = "KEY")]
    aws_secret_key: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let file = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => FileConfig::default(),
    };

    let overrides = Overrides {
        output_dir: cli.output_dir,
        valid_domains: cli.valid_domains,
        skip_write: cli.skip_write,
        single_page: cli.single_page,
        s3_bucket: cli.aws_s3_bucket,
        s3_region: cli.aws_region,
        s3_access_key: cli.aws_access_key,
        s3_secret_key: cli.aws_secret_key,
    };

    let config = resolve_config(&cli.url, file, overrides)?;

    match &config.output {
        OutputTarget::Directory(dir) => {
            tracing::info!("Crawling {} into {}", config.seed_url, dir.display());
        }
        OutputTarget::S3(target) => {
            tracing::info!("Crawling {} into s3://{}", config.seed_url, target.bucket);
        }
    }

    let stats = crawl(config).await?;

    println!(
        "Crawl complete: {} fetched, {} saved, {} errors",
        stats.fetched, stats.saved, stats.errors
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("petrify=info,warn"),
            1 => EnvFilter::new("petrify=debug,info"),
            2 => EnvFilter::new("petrify=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
