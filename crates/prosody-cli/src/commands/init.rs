//! Init command implementation
//!
//! Creates the on-disk layout used by the request and submit commands.

use anyhow::{Context, Result};
use colored::Colorize;
use prosody_spec::Layout;
use std::process::ExitCode;

/// Run the init command
pub fn run(root: &str) -> Result<ExitCode> {
    let layout = Layout::new(root);
    layout
        .ensure()
        .with_context(|| format!("failed to create layout under {}", root))?;

    println!("{} {}", "Initialized:".green().bold(), layout.root().display());
    for dir in [
        layout.uploads_dir(),
        layout.requests_dir(),
        layout.generated_dir(),
    ] {
        println!("  {} {}", "->".dimmed(), dir.display());
    }
    Ok(ExitCode::SUCCESS)
}
