//! Writes the configuration JSON Schema to `config-schema.json`, or to the
//! path given as the first argument.

use anyhow::Context;
use dreamscape::config::Config;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config-schema.json"));

    let schema = Config::json_schema();
    std::fs::write(&path, format!("{}\n", schema))
        .with_context(|| format!("writing schema to {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
