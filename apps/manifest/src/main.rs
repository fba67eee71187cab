//! Build-time generator for `class-list.json`.
//!
//! ```text
//! lct-manifest --dir public/data/classes --out public/data/class-list.json
//! ```

use anyhow::Context;
use clap::Parser;
use lct_logger::Logger;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about = "Write the sorted list of class content units as JSON")]
struct Args {
    /// Directory holding one YAML file per class
    #[arg(long, default_value = "public/data/classes")]
    dir: PathBuf,

    /// Manifest file to write
    #[arg(long, default_value = "public/data/class-list.json")]
    out: PathBuf,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _log = Logger::builder(env!("CARGO_PKG_NAME")).level_str(&args.log_level)?.init()?;

    let files = lct_classes::manifest::generate(&args.dir, &args.out)
        .await
        .with_context(|| format!("Failed to generate manifest from {}", args.dir.display()))?;

    if files.is_empty() {
        tracing::warn!(dir = %args.dir.display(), "No class files found; wrote an empty manifest");
    }
    Ok(())
}
