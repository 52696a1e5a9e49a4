use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "jot", about = concat!("jot v", env!("CARGO_PKG_VERSION"), " - compose with @mentions and #tags"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: ~/.config/jot/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Server base URL, overriding the config file
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Load people and tags from a JSON file instead of the server
    #[arg(long, global = true)]
    pub candidates: Option<PathBuf>,

    /// Log file (default: ~/.local/state/jot/jot.log)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Write the submitted text here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Initial text for the composer
    pub text: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the suggestions for TEXT with the caret at --caret
    Suggest(SuggestArgs),
    /// Commit one suggestion and print the resulting text
    Complete(CompleteArgs),
}

#[derive(Args)]
pub struct SuggestArgs {
    /// Text to evaluate
    pub text: String,
    /// Caret byte offset (default: end of text)
    #[arg(long)]
    pub caret: Option<usize>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompleteArgs {
    /// Text to complete
    pub text: String,
    /// 0-based index of the suggestion to insert
    #[arg(long)]
    pub pick: usize,
    /// Caret byte offset (default: end of text)
    #[arg(long)]
    pub caret: Option<usize>,
}
