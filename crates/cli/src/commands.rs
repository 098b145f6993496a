//! Subcommand implementations

use std::time::Duration;

use anyhow::bail;
use colored::Colorize;
use taplink::{Error, TagWriter};
use taplink_transport_pcsc::PcscError;

/// List all available readers
pub(crate) fn list_command(writer: &TagWriter) -> anyhow::Result<()> {
    let readers = match writer.readers() {
        Ok(readers) => readers,
        Err(Error::Transport(PcscError::NoReadersAvailable)) => {
            println!("No readers found!");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("Available readers:");
    for (i, reader) in readers.iter().enumerate() {
        let status = if reader.has_card() {
            "card present".green()
        } else {
            "no card".dimmed()
        };
        println!("{}. {} ({})", i + 1, reader.name(), status);
    }

    Ok(())
}

/// Probe the reader connection
pub(crate) fn test_command(writer: &TagWriter) -> anyhow::Result<()> {
    match writer.readers() {
        Ok(readers) => {
            println!("{} Connected, {} reader(s) found", "OK".green().bold(), readers.len());
            for reader in &readers {
                if let Some(atr) = reader.atr() {
                    println!("  {} (card ATR {})", reader.name(), hex::encode_upper(atr));
                } else {
                    println!("  {}", reader.name());
                }
            }
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "FAILED".red().bold(), e);
            bail!("no usable reader");
        }
    }
}

/// Read a tag and print its contents
pub(crate) fn read_command(writer: &TagWriter, timeout: u64) -> anyhow::Result<()> {
    println!("Place a card on the reader...");

    let content = writer.read(Duration::from_secs(timeout))?;

    println!("{} Read {}", "OK".green().bold(), content.kind);
    println!("  UID:  {}", hex::encode(&content.uid));
    println!("  NDEF: {}", if content.ndef { "yes" } else { "no" });
    if let Some(uri) = &content.uri {
        println!("  URL:  {}", uri.cyan());
    }
    if let Some(text) = &content.text {
        println!("  Text: {text}");
    }
    if content.uri.is_none() && content.text.is_none() {
        println!("  {}", "No URL stored on this tag".dimmed());
    }

    Ok(())
}

/// Write a URL onto a tag
pub(crate) fn write_command(writer: &TagWriter, url: &str, timeout: u64) -> anyhow::Result<()> {
    println!("Writing: {}", url.cyan());
    println!("Place a card on the reader...");

    let (tag, outcome) = writer.write_uri(url, Duration::from_secs(timeout))?;

    println!("{} {} {}", "OK".green().bold(), tag, outcome);
    Ok(())
}

/// Erase the data area of a tag
pub(crate) fn erase_command(writer: &TagWriter, timeout: u64) -> anyhow::Result<()> {
    println!("Place a card on the reader...");

    let tag = writer.erase(Duration::from_secs(timeout))?;

    println!("{} Erased {}", "OK".green().bold(), tag);
    Ok(())
}
