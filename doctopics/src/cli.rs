//! Command-line interface definitions for doctopics

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI structure for the doctopics application
#[derive(Parser)]
#[command(name = "doctopics")]
#[command(version)]
#[command(about = "Split pages into topic trees along their headings", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Build configuration file (defaults to ./doctopics.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Available subcommands for doctopics
#[derive(Subcommand)]
pub enum Commands {
    /// Print the topic outline of one or more pages
    Show {
        /// Pages or directories to scan for .html/.htm/.md files
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,

        /// Shared options
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Save every topic of a page as its own HTML file
    Save {
        /// Page to split
        #[arg(value_name = "PATH")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "topics")]
        dir: PathBuf,

        /// Shared options
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Print the anchor index of a page
    Index {
        /// Page to index
        #[arg(value_name = "PATH")]
        input: PathBuf,

        /// Shared options
        #[command(flatten)]
        common: CommonArgs,
    },
}
