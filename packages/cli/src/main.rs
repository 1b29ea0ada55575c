mod commands;

use clap::{Parser, Subcommand};
use commands::{history, init, render, HistoryArgs, InitArgs, RenderArgs};

/// PageCraft CLI - site document tooling
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose diagnostic logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a fresh default site document
    Init(InitArgs),

    /// Render a site document to HTML
    Render(RenderArgs),

    /// List the publish history of a file-backed store
    History(HistoryArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Init(args) => init(args),
        Command::Render(args) => render(args),
        Command::History(args) => history(args),
    }
}
