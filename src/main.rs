use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use issue_metrics::metrics::MetricsError;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_AUTH: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;
const EXIT_DATA: i32 = 5;
const EXIT_WRITE: i32 = 6;

#[derive(Parser, Debug)]
#[command(name = "issue-metrics")]
#[command(about = "Measure time to first response and time to close for GitHub issues", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging and list every issue
    #[arg(short, long)]
    verbose: bool,

    /// Path to a YAML config file (defaults to ~/.config/issue-metrics/config.yaml,
    /// then environment variables)
    #[arg(short, long)]
    config: Option<String>,

    /// Search query, without the repo: qualifier (overrides SEARCH_QUERY)
    #[arg(short, long)]
    query: Option<String>,

    /// Repository URL, e.g. https://github.com/owner/repo (overrides REPOSITORY_URL)
    #[arg(short, long)]
    repository: Option<String>,

    /// Report file to write (overrides OUTPUT_FILE)
    #[arg(short, long)]
    output: Option<String>,

    /// Also print the Markdown report to stdout
    #[arg(long)]
    stdout: bool,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "issue_metrics=debug"
    } else {
        "issue_metrics=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let start_time = Instant::now();

    // Pick up a .env file in the working directory, if there is one
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match issue_metrics::config::load_config(config_path) {
        Ok(c) => c.with_overrides(cli.query, cli.repository, cli.output),
        Err(e) => {
            tracing::error!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = issue_metrics::config::validate_config(&config) {
        tracing::error!("Config errors:");
        for error in errors {
            tracing::error!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    tracing::debug!(?config, "Configuration loaded");

    let token = match issue_metrics::credentials::resolve_token(&config) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("Credential error: {}", e);
            std::process::exit(EXIT_AUTH);
        }
    };

    let client = match issue_metrics::github::create_client(&token) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to create GitHub client: {:#}", e);
            std::process::exit(EXIT_NETWORK);
        }
    };

    let report = match issue_metrics::fetch::collect_issue_metrics(&client, &config).await {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("{:#}", e);
            if e.downcast_ref::<MetricsError>().is_some() {
                std::process::exit(EXIT_DATA);
            }
            std::process::exit(EXIT_NETWORK);
        }
    };

    let markdown = issue_metrics::output::render_markdown(&report.issues, &report.summary);
    let output_path = PathBuf::from(&config.output_file);
    if let Err(e) = issue_metrics::output::write_report(&output_path, &markdown) {
        tracing::error!("{:#}", e);
        std::process::exit(EXIT_WRITE);
    }
    tracing::info!(path = %output_path.display(), "Wrote issue metrics");

    let use_colors = issue_metrics::output::should_use_colors();
    if cli.stdout {
        print!("{}", markdown);
    } else {
        println!(
            "{}",
            issue_metrics::output::format_summary(&report.summary, use_colors)
        );
        if cli.verbose {
            println!();
            println!(
                "{}",
                issue_metrics::output::format_issue_list(&report.issues, use_colors)
            );
        }
    }

    tracing::debug!(
        "Total: {} issues in {:?}",
        report.summary.total_count,
        start_time.elapsed()
    );

    std::process::exit(EXIT_SUCCESS);
}
