use std::io::Read;
use std::path::Path;

use acars_formats::{IcaoHex, Label, RawMessage};
use acars_registry::Registry;
use chrono::Utc;
use eyre::Result;

/// Read `file` (`-` for stdin), dispatch it under `label` through the default
/// registry, and print each result as a JSON line.
pub fn run_parse(file: &Path, label: Option<&str>) -> Result<()> {
    let text = if file == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(file)?
    };

    let msg = RawMessage {
        id: 0,
        timestamp: Utc::now(),
        label: Label::new(label.unwrap_or("")),
        text: text.trim_end().to_string(),
        icao_hex: IcaoHex::new("000000"),
        tail: None,
        flight_hint: None,
    };

    let registry = Registry::with_default_parsers();
    let results = registry.dispatch(&msg);

    if results.is_empty() {
        println!("{}", serde_json::json!({ "unparsed": true, "label": msg.label.as_str() }));
        return Ok(());
    }
    for result in &results {
        println!("{}", serde_json::to_string(result)?);
    }
    Ok(())
}
