//! Sutra CLI binary.
//!
//! This binary provides command-line access to the image store:
//! - Fingerprint a cover image
//! - Upload a cover unless the same edition is already stored
//! - Look up the URL recorded for a fingerprint

use clap::Parser;
use sutra::{ObservabilityConfig, init_observability_with_config};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, fingerprint, load_config, lookup, put};

    // Load .env so DATABASE_URL is available
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose { "debug" } else { "info" };
    init_observability_with_config(
        ObservabilityConfig::new()
            .with_log_level(log_level)
            .with_json_logs(cli.json_logs),
    )?;

    // Execute the requested command
    match cli.command {
        Commands::Fingerprint { file, edition } => {
            fingerprint(&file, &edition).await?;
        }

        Commands::Put {
            file,
            edition,
            format,
        } => {
            let config = load_config(cli.config.as_deref())?;
            put(config, file, edition, format).await?;
        }

        Commands::Lookup {
            fingerprint: fp,
            format,
        } => {
            let config = load_config(cli.config.as_deref())?;
            lookup(config, fp, format).await?;
        }
    }

    Ok(())
}
