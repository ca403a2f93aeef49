mod commands;
mod handlers;

pub use commands::Cli;
pub use handlers::{apply_batch, handle_apply};
