mod compose;
pub use compose::cmd_compose;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::fetch::{build_client, fetch_people, fetch_tags};
use crate::mention::{MentionController, find_trigger, suggestions_for};
use crate::model::{CandidateSource, Config};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&cli)?;

    match cli.command {
        None => cmd_compose(&cli, config),
        Some(Commands::Suggest(ref args)) => {
            let source = load_candidates(&cli, &config)?;
            cmd_suggest(args, &source)
        }
        Some(Commands::Complete(ref args)) => {
            let source = load_candidates(&cli, &config)?;
            cmd_complete(args, &source)
        }
    }
}

/// Config file plus command-line overrides
pub fn load_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = config_io::load_config(cli.config.as_deref())?;
    if let Some(ref server) = cli.server {
        config.server.base_url = Some(server.clone());
    }
    Ok(config)
}

/// Candidates for the one-shot commands: the `--candidates` file, else a
/// blocking fetch. A failed fetch leaves that list empty.
fn load_candidates(cli: &Cli, config: &Config) -> Result<CandidateSource, Box<dyn std::error::Error>> {
    if let Some(ref path) = cli.candidates {
        return Ok(config_io::read_candidates_file(path)?);
    }

    let mut source = CandidateSource::default();
    let (Some(people_url), Some(tags_url)) = (config.server.people_url(), config.server.tags_url())
    else {
        tracing::info!("no server configured, candidates stay empty");
        return Ok(source);
    };
    let client = build_client(&config.server)?;
    match fetch_people(&client, &people_url) {
        Ok(people) => source.people = people,
        Err(e) => tracing::warn!(error = %e, "people fetch failed"),
    }
    match fetch_tags(&client, &tags_url) {
        Ok(tags) => source.tags = tags,
        Err(e) => tracing::warn!(error = %e, "tags fetch failed"),
    }
    Ok(source)
}

/// Resolve `--caret`, defaulting to the end of the text
fn resolve_caret(text: &str, caret: Option<usize>) -> Result<usize, String> {
    let caret = caret.unwrap_or(text.len());
    if !text.is_char_boundary(caret) {
        return Err(format!(
            "caret {} is not a character boundary in a {}-byte text",
            caret,
            text.len()
        ));
    }
    Ok(caret)
}

// ---------------------------------------------------------------------------
// One-shot commands
// ---------------------------------------------------------------------------

fn cmd_suggest(args: &SuggestArgs, source: &CandidateSource) -> Result<(), Box<dyn std::error::Error>> {
    let caret = resolve_caret(&args.text, args.caret)?;
    let trigger = find_trigger(&args.text, caret);
    let (filter, suggestions) = match trigger {
        Some(t) => {
            let filter = t.filter_text(&args.text, caret);
            let suggestions = suggestions_for(source, t.symbol, &filter);
            (filter, suggestions)
        }
        None => (String::new(), Vec::new()),
    };

    if args.json {
        let out = SuggestJson {
            trigger,
            filter,
            suggestions,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for s in &suggestions {
            println!("{}", s.label());
        }
    }
    Ok(())
}

fn cmd_complete(args: &CompleteArgs, source: &CandidateSource) -> Result<(), Box<dyn std::error::Error>> {
    let caret = resolve_caret(&args.text, args.caret)?;
    let mut controller = MentionController::new();
    controller.on_text_changed(&args.text, caret, source);
    if !controller.is_visible() {
        return Err("no suggestions at the caret".into());
    }
    let commit = controller
        .click_row(args.pick, &args.text, caret)
        .ok_or_else(|| format!("no suggestion at index {}", args.pick))?;
    println!("{}", commit.text);
    Ok(())
}
