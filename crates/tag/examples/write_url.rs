//! Example showing how to write a profile URL onto whatever tag is
//! presented next

use std::time::Duration;

use taplink::TagWriter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://cards.example.com/u/jane".to_string());

    let writer = TagWriter::new()?;

    println!("Writing: {url}");
    println!("Place a card on the reader...");

    let (tag, outcome) = writer.write_uri(&url, Duration::from_secs(15))?;

    println!("Card detected: {tag}");
    println!("Result: {outcome}");

    Ok(())
}
