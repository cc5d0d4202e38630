//! doctopics - split pages into topic trees
//!
//! A CLI tool that cuts HTML and Markdown pages along their headings and
//! prints, indexes or saves the resulting topics.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(missing_docs))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, CommonArgs};
use doctopics::pipeline::{self, export};
use doctopics::{BuildConfig, CONFIG_FILE_NAME};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Main entry point for the doctopics CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Show { paths, common } => {
            let config = prepare(&common)?;
            handle_show_command(&paths, &config)?;
        }

        Commands::Save { input, dir, common } => {
            let config = prepare(&common)?;
            handle_save_command(&input, &dir, &config)?;
        }

        Commands::Index { input, common } => {
            let config = prepare(&common)?;
            handle_index_command(&input, &config)?;
        }
    }

    Ok(())
}

/// Initialize logging and load the build configuration
fn prepare(common: &CommonArgs) -> Result<BuildConfig> {
    let mut logger = env_logger::Builder::from_default_env();
    if common.verbose {
        logger.filter_level(log::LevelFilter::Info);
    }
    logger.init();

    load_config(common.config.as_deref())
}

/// Load the configuration file named on the command line, or ./doctopics.toml
///
/// # Returns
/// * `Ok(BuildConfig)` - Loaded configuration, or the defaults when no file is found
/// * `Err` - The file exists but could not be read or parsed
fn load_config(path: Option<&Path>) -> Result<BuildConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default_path = PathBuf::from(CONFIG_FILE_NAME);
            if !default_path.exists() {
                log::info!("No {} found, using defaults", CONFIG_FILE_NAME);
                return Ok(BuildConfig::default());
            }
            default_path
        }
    };

    log::info!("Loading configuration from {}", path.display());
    BuildConfig::load(&path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

/// Handle the show command
fn handle_show_command(paths: &[PathBuf], config: &BuildConfig) -> Result<()> {
    let documents =
        pipeline::discover_documents(paths).context("Failed to discover source pages")?;
    if documents.is_empty() {
        anyhow::bail!("No .html, .htm or .md pages found");
    }

    let mut stdout = std::io::stdout().lock();
    let multiple = documents.len() > 1;
    for (path, outline) in pipeline::process_all(&documents, config) {
        let outline = outline.with_context(|| format!("Failed to process {}", path.display()))?;
        if multiple {
            writeln!(stdout, "{}:", path.display())?;
        }
        export::print_tree(&outline, &mut stdout)
            .with_context(|| format!("Failed to print topics of {}", path.display()))?;
    }

    Ok(())
}

/// Handle the save command
fn handle_save_command(input: &Path, dir: &Path, config: &BuildConfig) -> Result<()> {
    let outline = pipeline::process(input, config)
        .with_context(|| format!("Failed to process {}", input.display()))?;

    let mut stdout = std::io::stdout().lock();
    let written = export::save_topics(&outline, dir, &mut stdout)
        .with_context(|| format!("Failed to save topics to {}", dir.display()))?;

    writeln!(stdout, "\n✓ Saved {} topics to {}", written.len(), dir.display())?;
    Ok(())
}

/// Handle the index command
fn handle_index_command(input: &Path, config: &BuildConfig) -> Result<()> {
    let outline = pipeline::process(input, config)
        .with_context(|| format!("Failed to process {}", input.display()))?;

    let mut stdout = std::io::stdout().lock();
    export::print_index(&outline, &mut stdout).context("Failed to print anchor index")?;
    Ok(())
}
