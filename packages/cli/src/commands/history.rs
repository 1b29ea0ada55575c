use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{FilePersistence, Persistence};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Store directory (holds draft.json, live.json, history.json)
    pub dir: PathBuf,
}

pub fn history(args: HistoryArgs) -> Result<()> {
    let backend = FilePersistence::new(&args.dir)
        .with_context(|| format!("opening store at {}", args.dir.display()))?;
    let entries = backend.list_history();

    if entries.is_empty() {
        println!("{} No publish history in {}", "⚠️".yellow(), args.dir.display());
        return Ok(());
    }

    println!(
        "{} {} publish {} in {}",
        "✓".green(),
        entries.len(),
        if entries.len() == 1 { "entry" } else { "entries" },
        args.dir.display().to_string().bright_white()
    );
    println!();
    // Newest last in storage; show newest first.
    for entry in entries.iter().rev() {
        println!(
            "  {}  {}  {}",
            entry.id.bright_white(),
            format!("t={}", entry.timestamp).dimmed(),
            entry.label
        );
    }

    Ok(())
}
