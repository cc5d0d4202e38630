//! Three-stage topic processing pipeline
//!
//! This module orchestrates the three stages of turning pages into topics:
//! 1. **Loading**: Discover and load source pages (HTML or Markdown)
//! 2. **Building**: Split each page into a topic tree with an anchor index
//! 3. **Export**: Print outlines and indexes, or save topic snapshots as pages

use crate::build_config::BuildConfig;
use crate::source_model::{Document, SourceModelError};
use crate::topic_tree::{TopicOutline, TopicTreeBuilder, TopicTreeError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Source formats the loader understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// HTML page (`.html`, `.htm`)
    Html,
    /// Markdown page (`.md`, `.markdown`)
    Markdown,
}

impl SourceFormat {
    /// Detect the format from a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "html" | "htm" => Some(Self::Html),
            "md" | "markdown" => Some(Self::Markdown),
            _ => None,
        }
    }
}

/// Stage 1: Expand input paths into the pages to load
///
/// Files are kept as given; directories are walked for files with a
/// supported extension. The result is sorted and free of duplicates.
///
/// # Parameters
/// * `paths` - Files and directories named on the command line
///
/// # Returns
/// * `Ok(Vec<PathBuf>)` - Pages to load, in path order
/// * `Err(LoadError)` - A path does not exist or a directory could not be read
pub fn discover_documents(paths: &[PathBuf]) -> Result<Vec<PathBuf>, LoadError> {
    let mut documents = Vec::new();

    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).follow_links(false) {
                let entry = entry.map_err(|e| LoadError::WalkError(path.clone(), e))?;
                if entry.file_type().is_file() && SourceFormat::from_path(entry.path()).is_some()
                {
                    documents.push(entry.into_path());
                }
            }
        } else if path.is_file() {
            documents.push(path.clone());
        } else {
            return Err(LoadError::IoError(
                path.clone(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
            ));
        }
    }

    documents.sort();
    documents.dedup();
    log::info!("Discovered {} source pages", documents.len());
    Ok(documents)
}

/// Stage 1: Load a single page
///
/// # Parameters
/// * `path` - Page to load; the format comes from its extension
/// * `config` - Build configuration (Markdown section splitting)
///
/// # Returns
/// * `Ok(Document)` - The parsed page
/// * `Err(LoadError)` - Blank path, unreadable file, unknown extension or malformed page
pub fn load_document(path: &Path, config: &BuildConfig) -> Result<Document, LoadError> {
    if path.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(LoadError::SourceModelError(
            path.to_path_buf(),
            SourceModelError::InvalidArgument("path must not be blank".to_string()),
        ));
    }

    let format = SourceFormat::from_path(path)
        .ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;
    let content =
        std::fs::read_to_string(path).map_err(|e| LoadError::IoError(path.to_path_buf(), e))?;

    log::info!("Loading {}", path.display());
    let document = match format {
        SourceFormat::Html => Document::parse_html(&content),
        SourceFormat::Markdown => {
            let title = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            Document::parse_markdown(&title, &content, config.split_markdown_on_rules)
        }
    }
    .map_err(|e| LoadError::SourceModelError(path.to_path_buf(), e))?;

    Ok(document)
}

/// Stage 2: Build the topic tree of a loaded page
///
/// # Parameters
/// * `document` - The loaded page
/// * `config` - Build configuration (cover names, anchor attributes)
///
/// # Returns
/// * `Ok(TopicOutline)` - Topic tree and anchor index
/// * `Err(TopicTreeError)` - The page could not be split into topics
pub fn build(document: &Document, config: &BuildConfig) -> Result<TopicOutline, TopicTreeError> {
    let outline = TopicTreeBuilder::new(config).build(document)?;
    log::info!(
        "Built {} topics for '{}'",
        outline.tree.walk().count(),
        outline.tree[outline.tree.root()].name()
    );
    Ok(outline)
}

/// Load and build a single page
pub fn process(path: &Path, config: &BuildConfig) -> Result<TopicOutline, ProcessError> {
    let document = load_document(path, config)?;
    build(&document, config).map_err(|e| ProcessError::BuildError(path.to_path_buf(), e))
}

/// Load and build several pages
///
/// Pages are processed in parallel when the `parallel` feature is enabled.
/// Results keep the order of `paths`.
pub fn process_all(
    paths: &[PathBuf],
    config: &BuildConfig,
) -> Vec<(PathBuf, Result<TopicOutline, ProcessError>)> {
    #[cfg(feature = "parallel")]
    let outlines = paths
        .par_iter()
        .map(|path| (path.clone(), process(path, config)))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let outlines = paths
        .iter()
        .map(|path| (path.clone(), process(path, config)))
        .collect();

    outlines
}

/// Stage 3: Export topic trees
pub mod export {
    use crate::topic_tree::{TopicId, TopicOutline, TopicTree};
    use itertools::Itertools;
    use std::io::Write;
    use std::path::{Path, PathBuf};

    /// Dotted 1-based position of a topic (e.g. "2.1"); empty for the root
    pub fn topic_path(tree: &TopicTree, id: TopicId) -> Option<String> {
        tree.path_of(id).map(|path| path.iter().join("."))
    }

    /// File name a topic snapshot is saved under
    pub fn topic_file_name(tree: &TopicTree, id: TopicId) -> Option<String> {
        topic_path(tree, id).map(|path| format!("H{}.html", path))
    }

    /// Print the topic outline, two spaces of indent per level
    ///
    /// # Parameters
    /// * `outline` - Built topic tree
    /// * `out` - Destination (usually stdout)
    pub fn print_tree<W: Write>(outline: &TopicOutline, out: &mut W) -> Result<(), ExportError> {
        for (depth, id) in outline.tree.walk() {
            writeln!(out, "{}-{}", "  ".repeat(depth), outline.tree[id].name())
                .map_err(ExportError::IoError)?;
        }
        Ok(())
    }

    /// Print every anchor id with the path and name of the topic it resolves to
    pub fn print_index<W: Write>(outline: &TopicOutline, out: &mut W) -> Result<(), ExportError> {
        for (anchor, id) in outline.index.iter() {
            let path = topic_path(&outline.tree, id).unwrap_or_default();
            writeln!(out, "{}\t{}\t{}", anchor, path, outline.tree[id].name())
                .map_err(ExportError::IoError)?;
        }
        Ok(())
    }

    /// Save each non-root topic snapshot as an HTML page
    ///
    /// # Parameters
    /// * `outline` - Built topic tree
    /// * `dir` - Output directory, created if missing
    /// * `out` - Destination for progress messages
    ///
    /// # Returns
    /// * `Ok(Vec<PathBuf>)` - Files written, in outline order
    /// * `Err(ExportError)` - The directory or a file could not be written
    pub fn save_topics<W: Write>(
        outline: &TopicOutline,
        dir: &Path,
        out: &mut W,
    ) -> Result<Vec<PathBuf>, ExportError> {
        std::fs::create_dir_all(dir).map_err(ExportError::IoError)?;

        let mut written = Vec::new();
        for (_, id) in outline.tree.walk().skip(1) {
            let topic = &outline.tree[id];
            let Some(content) = topic.content() else {
                log::debug!("Topic '{}' has no content, not saved", topic.name());
                continue;
            };
            let file_name = topic_file_name(&outline.tree, id)
                .ok_or_else(|| ExportError::FormatError(format!("topic {} is detached", id)))?;

            let path = dir.join(&file_name);
            std::fs::write(&path, content.to_html()).map_err(ExportError::IoError)?;
            writeln!(out, "Saved {} ({}).", file_name, topic.name())
                .map_err(ExportError::IoError)?;
            written.push(path);
        }

        log::info!("Saved {} topics to {}", written.len(), dir.display());
        Ok(written)
    }

    /// Export errors
    #[derive(Debug)]
    pub enum ExportError {
        IoError(std::io::Error),
        FormatError(String),
    }

    impl std::fmt::Display for ExportError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                ExportError::IoError(e) => write!(f, "IO error: {}", e),
                ExportError::FormatError(msg) => write!(f, "Format error: {}", msg),
            }
        }
    }

    impl std::error::Error for ExportError {}
}

/// Loading errors
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error reading {path}: {source}", path = .0.display(), source = .1)]
    IoError(PathBuf, #[source] std::io::Error),

    #[error("Error walking {path}: {source}", path = .0.display(), source = .1)]
    WalkError(PathBuf, #[source] walkdir::Error),

    #[error("Unsupported source format: {path}", path = .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Error parsing {path}: {source}", path = .0.display(), source = .1)]
    SourceModelError(PathBuf, #[source] SourceModelError),
}

/// Errors from loading and building one page
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error(transparent)]
    LoadError(#[from] LoadError),

    #[error("Error building topics for {path}: {source}", path = .0.display(), source = .1)]
    BuildError(PathBuf, #[source] TopicTreeError),
}
