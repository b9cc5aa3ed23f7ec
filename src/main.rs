//! Feature Fetcher CLI application
//!
//! Interactive downloader for the feature bundles of a GitHub features repository.

use std::process;

use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use feature_fetcher::app::coordinator::run_until_interrupted;
use feature_fetcher::app::{Coordinator, GitHubClient};
use feature_fetcher::cli::{run_interactive, Cli, ConsoleReporter};
use feature_fetcher::config::AppConfig;
use feature_fetcher::errors::Result;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();
    let result = run_until_interrupted(run(cli)).await;

    if let Err(e) = result {
        let code = ConsoleReporter::stdout().fatal(&e);
        tracing::debug!("Run ended with {} error: {:?}", e.category(), e);
        process::exit(code);
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load(cli.global.config.clone()).await?;

    let log_level = match cli.log_level() {
        Some(level) => level,
        None => config.log_level()?,
    };
    init_logging(log_level, cli.global.very_verbose);

    info!("Feature Fetcher v{} starting", env!("CARGO_PKG_VERSION"));

    let client = GitHubClient::with_config(config.remote_config()?, config.client_config())?;
    let coordinator = Coordinator::new(client);

    let mut input = BufReader::new(tokio::io::stdin());
    let mut console = ConsoleReporter::stdout();
    run_interactive(&coordinator, &mut input, &mut console).await?;

    Ok(())
}

/// Initialize logging; `RUST_LOG` directives are honoured on top of `level`
fn init_logging(level: tracing::Level, show_level: bool) {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("feature_fetcher={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(show_level)
        .with_writer(std::io::stderr)
        .init();
}
