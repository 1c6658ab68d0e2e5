//! CLI command definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use sutra::EditionMetadata;

/// Sutra - content-addressed cover image store for the bookstall
#[derive(Parser, Debug)]
#[command(name = "sutra")]
#[command(about = "Content-addressed cover image store for the bookstall", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file layered over the bundled defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the fingerprint of an image file
    Fingerprint {
        /// Path to the image
        file: PathBuf,

        #[command(flatten)]
        edition: EditionArgs,
    },

    /// Upload an image unless an identical edition cover is already stored
    Put {
        /// Path to the image
        file: PathBuf,

        #[command(flatten)]
        edition: EditionArgs,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Look up the stored URL for a fingerprint
    Lookup {
        /// Fingerprint as printed by `sutra fingerprint`
        fingerprint: String,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },
}

/// Edition metadata folded into the fingerprint
#[derive(Args, Debug, Clone, Default)]
pub struct EditionArgs {
    /// Author of the edition
    #[arg(long)]
    pub author: Option<String>,

    /// Title of the edition
    #[arg(long)]
    pub title: Option<String>,

    /// Printing institute of the edition
    #[arg(long)]
    pub institute: Option<String>,
}

impl EditionArgs {
    /// Metadata for fingerprinting, or `None` when no field was given.
    pub fn metadata(&self) -> Option<EditionMetadata> {
        let mut metadata = EditionMetadata::default();
        if let Some(author) = &self.author {
            metadata = metadata.with_author(author);
        }
        if let Some(title) = &self.title {
            metadata = metadata.with_title(title);
        }
        if let Some(institute) = &self.institute {
            metadata = metadata.with_printing_institute(institute);
        }
        (!metadata.is_empty()).then_some(metadata)
    }
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
