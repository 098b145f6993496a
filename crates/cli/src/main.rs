//! Command-line interface for the taplink toolkit

use clap::{Parser, Subcommand};
use taplink::TagWriter;

mod commands;

use commands::*;

#[derive(Parser)]
#[command(version, about = "Write profile URLs to NFC tags and read them back")]
struct Cli {
    /// Optional reader name to use (will wait on any reader if not specified)
    #[arg(short, long)]
    reader: Option<String>,

    /// Trace level output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available readers
    List,

    /// Test the reader connection
    Test,

    /// Read a tag and print its contents
    Read {
        /// Seconds to wait for a tag
        #[arg(short, long, default_value_t = 15)]
        timeout: u64,
    },

    /// Write a URL onto a tag
    Write {
        /// URL to write
        url: String,

        /// Seconds to wait for a tag
        #[arg(short, long, default_value_t = 15)]
        timeout: u64,
    },

    /// Erase the data area of a tag
    Erase {
        /// Seconds to wait for a tag
        #[arg(short, long, default_value_t = 15)]
        timeout: u64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    let mut writer = TagWriter::new()?;
    if let Some(reader) = &cli.reader {
        writer = writer.with_reader(reader.as_str());
    }

    match &cli.command {
        Commands::List => list_command(&writer),
        Commands::Test => test_command(&writer),
        Commands::Read { timeout } => read_command(&writer, *timeout),
        Commands::Write { url, timeout } => write_command(&writer, url, *timeout),
        Commands::Erase { timeout } => erase_command(&writer, *timeout),
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(true)
        .init();
}
