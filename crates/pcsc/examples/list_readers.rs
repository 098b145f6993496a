//! Example listing the available PC/SC readers and their card status

use taplink_transport_pcsc::PcscDeviceManager;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manager = PcscDeviceManager::new()?;

    let readers = manager.list_readers()?;
    println!("Found {} readers:", readers.len());

    for (i, reader) in readers.iter().enumerate() {
        let status = if reader.has_card() {
            match reader.atr() {
                Some(atr) => format!("card present, ATR {}", hex::encode_upper(atr)),
                None => "card present".to_string(),
            }
        } else {
            "no card".to_string()
        };
        println!("  {}. {} ({})", i + 1, reader.name(), status);
    }

    Ok(())
}
