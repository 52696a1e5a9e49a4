use clap::Parser;
use jot::cli::commands::Cli;
use jot::cli::handlers;
use jot::io::logging;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.log_file.as_deref()) {
        eprintln!("warning: logging disabled: {}", e);
    }

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
