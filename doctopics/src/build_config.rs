//! Build configuration from doctopics.toml

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default file name looked up next to the inputs
pub const CONFIG_FILE_NAME: &str = "doctopics.toml";

/// Options that shape a topic tree build
///
/// Every key is optional in the file; missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Name given to a section cover topic when the section has no class
    pub cover_name: String,

    /// Attributes whose values are indexed as anchor ids
    pub anchor_attributes: Vec<String>,

    /// Start a new section at every thematic break when loading Markdown
    pub split_markdown_on_rules: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            cover_name: "Cover".to_string(),
            anchor_attributes: vec!["name".to_string(), "id".to_string()],
            split_markdown_on_rules: true,
        }
    }
}

impl BuildConfig {
    /// Load configuration from a doctopics.toml file
    ///
    /// # Parameters
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(BuildConfig)` - Successfully loaded configuration
    /// * `Err(BuildConfigError)` - Error reading or parsing the configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, BuildConfigError> {
        let content = fs::read_to_string(&path).map_err(BuildConfigError::IoError)?;

        let config: BuildConfig =
            toml::from_str(&content).map_err(BuildConfigError::ParseError)?;

        Ok(config)
    }

    /// Save configuration to a doctopics.toml file
    ///
    /// # Parameters
    /// * `path` - Path where the configuration file will be written
    ///
    /// # Returns
    /// * `Ok(())` - Successfully saved configuration
    /// * `Err(BuildConfigError)` - Error serializing or writing the configuration file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), BuildConfigError> {
        let content = toml::to_string_pretty(self).map_err(BuildConfigError::SerializeError)?;

        fs::write(&path, content).map_err(BuildConfigError::IoError)?;

        Ok(())
    }
}

/// Errors that can occur when loading or saving the build configuration
#[derive(Debug)]
#[allow(clippy::enum_variant_names)]
pub enum BuildConfigError {
    /// IO error when reading or writing file
    IoError(std::io::Error),

    /// Error parsing TOML
    ParseError(toml::de::Error),

    /// Error serializing to TOML
    SerializeError(toml::ser::Error),
}

impl std::fmt::Display for BuildConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildConfigError::IoError(e) => write!(f, "IO error: {}", e),
            BuildConfigError::ParseError(e) => write!(f, "TOML parse error: {}", e),
            BuildConfigError::SerializeError(e) => write!(f, "TOML serialize error: {}", e),
        }
    }
}

impl std::error::Error for BuildConfigError {}
