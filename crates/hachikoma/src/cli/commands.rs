//! CLI argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Eight-panel Instagram manga advertisement generator for salons.
#[derive(Debug, Parser)]
#[command(name = "hachikoma", version, about)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate the story and all eight panel images, then export them
    Generate {
        /// Salon name
        #[arg(long)]
        name: String,

        /// A salon strength (repeat for multiple)
        #[arg(long = "strength", required = true)]
        strengths: Vec<String>,

        /// An additional feature (repeat for multiple)
        #[arg(long = "feature")]
        features: Vec<String>,

        /// Directory the slide images are exported to
        #[arg(long, default_value = "out")]
        out_dir: PathBuf,
    },

    /// Generate the story only and print it as JSON
    Story {
        /// Salon name
        #[arg(long)]
        name: String,

        /// A salon strength (repeat for multiple)
        #[arg(long = "strength", required = true)]
        strengths: Vec<String>,

        /// An additional feature (repeat for multiple)
        #[arg(long = "feature")]
        features: Vec<String>,
    },
}
