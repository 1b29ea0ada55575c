use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_document::SiteDocument;
use pagecraft_renderer::{render_page, HtmlOptions};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Site document to render
    pub input: PathBuf,

    /// Output HTML file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit without whitespace
    #[arg(long)]
    pub compact: bool,
}

pub fn render(args: RenderArgs) -> Result<()> {
    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let doc: SiteDocument = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", args.input.display()))?;

    let options = if args.compact {
        HtmlOptions::compact()
    } else {
        HtmlOptions::default()
    };
    let html = render_page(&doc, options);

    match &args.output {
        Some(path) => {
            fs::write(path, &html).with_context(|| format!("writing {}", path.display()))?;
            println!(
                "{} Rendered {} → {} ({} bytes)",
                "✓".green(),
                args.input.display(),
                path.display().to_string().bright_white(),
                html.len()
            );
        }
        None => print!("{html}"),
    }

    Ok(())
}
