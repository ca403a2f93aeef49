use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "storyline")]
#[command(
    version,
    about = "Apply the chapter 19 update to a narrative project document"
)]
pub struct Cli {
    /// Project document to update (default: data/project.json)
    #[arg(long, short = 'p', value_name = "PATH")]
    pub project: Option<PathBuf>,
}
