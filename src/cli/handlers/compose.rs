use std::fs;

use crate::cli::commands::Cli;
use crate::io::config_io;
use crate::model::Config;
use crate::tui::{self, RunOptions};

/// Launch the composer. The submitted text goes to `--output` or stdout;
/// quitting without submitting prints nothing.
pub fn cmd_compose(cli: &Cli, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let candidates = match cli.candidates {
        Some(ref path) => Some(config_io::read_candidates_file(path)?),
        None => None,
    };

    let submitted = tui::run(RunOptions {
        text: cli.text.clone().unwrap_or_default(),
        config,
        candidates,
    })?;

    let Some(text) = submitted else {
        return Ok(());
    };
    match cli.output {
        Some(ref path) => {
            fs::write(path, &text)
                .map_err(|e| format!("could not write {}: {}", path.display(), e))?;
            tracing::info!(path = %path.display(), "wrote submitted text");
        }
        None => println!("{}", text),
    }
    Ok(())
}
