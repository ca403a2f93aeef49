use clap::Parser;
use storyline::cli::{handle_apply, Cli};
use storyline::Config;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::with_project(cli.project);

    if let Err(e) = handle_apply(&config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
