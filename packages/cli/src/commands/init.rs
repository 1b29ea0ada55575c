use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_document::SiteDocument;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Output file for the document
    #[arg(default_value = "site.json")]
    pub path: PathBuf,

    /// Force overwrite an existing document
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            args.path.display().to_string().bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let doc = SiteDocument::default();
    let json = serde_json::to_string_pretty(&doc)?;
    if let Some(parent) = args.path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    fs::write(&args.path, json).with_context(|| format!("writing {}", args.path.display()))?;

    println!(
        "{} Created {}",
        "✓".green(),
        args.path.display().to_string().bright_white()
    );
    println!();
    println!("Next steps:");
    println!("  1. Edit {}", args.path.display());
    println!("  2. Run: pagecraft render {}", args.path.display());

    Ok(())
}
