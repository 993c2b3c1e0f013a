//! Command-line interface module.

mod commands;
mod run;

pub use commands::{Cli, Commands};
pub use run::{run_generate, run_story, user_message};
