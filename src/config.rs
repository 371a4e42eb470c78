//! Configuration for a recipe
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

/// Default recipe file extension
pub const DEFAULT_EXTENSION: &str = ".rcp";

/// Where a recipe lives on disk and how it is written
///
/// The target path is `folder + name + extension`, e.g.
/// `recipes/` + `line_a` + `.rcp` = `recipes/line_a.rcp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeConfig {
    // -------------------------------------------------------------------------
    // Path Configuration
    // -------------------------------------------------------------------------
    /// Directory holding the recipe file. Empty or ending with one `/`.
    #[serde(deserialize_with = "deserialize_folder")]
    pub folder: String,

    /// Base file name. Required before initialization.
    pub name: String,

    /// File extension. Empty or starting with one `.`.
    #[serde(deserialize_with = "deserialize_extension")]
    pub extension: String,

    // -------------------------------------------------------------------------
    // Write Configuration
    // -------------------------------------------------------------------------
    /// fsync the recipe file at the end of every save
    pub sync_on_save: bool,
}

impl Default for RecipeConfig {
    fn default() -> Self {
        Self {
            folder: String::new(),
            name: String::new(),
            extension: DEFAULT_EXTENSION.to_string(),
            sync_on_save: false,
        }
    }
}

impl RecipeConfig {
    /// Config with the given name and defaults for everything else
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create a new config builder
    pub fn builder() -> RecipeConfigBuilder {
        RecipeConfigBuilder::default()
    }

    /// Full path of the recipe file
    ///
    /// Folder and extension are normalized here as well, so configs built
    /// from struct literals resolve to the same path as built ones.
    pub fn path(&self) -> PathBuf {
        PathBuf::from(format!(
            "{}{}{}",
            normalize_folder(&self.folder),
            self.name,
            normalize_extension(&self.extension)
        ))
    }
}

/// Builder for RecipeConfig
#[derive(Default)]
pub struct RecipeConfigBuilder {
    config: RecipeConfig,
}

impl RecipeConfigBuilder {
    /// Set the recipe file name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Set the recipe directory (normalized to end with `/`)
    pub fn folder(mut self, folder: impl AsRef<str>) -> Self {
        self.config.folder = normalize_folder(folder.as_ref());
        self
    }

    /// Set the recipe extension (normalized to start with `.`)
    pub fn extension(mut self, extension: impl AsRef<str>) -> Self {
        self.config.extension = normalize_extension(extension.as_ref());
        self
    }

    /// fsync after every save
    pub fn sync_on_save(mut self, sync: bool) -> Self {
        self.config.sync_on_save = sync;
        self
    }

    pub fn build(self) -> RecipeConfig {
        self.config
    }
}

// =============================================================================
// Normalization
// =============================================================================

/// `"data"` → `"data/"`, `"data//"` → `"data/"`, `""` → `""`
pub fn normalize_folder(folder: &str) -> String {
    if folder.is_empty() {
        return String::new();
    }
    let trimmed = folder.trim_end_matches('/');
    format!("{}/", trimmed)
}

/// `"rcp"` → `".rcp"`, `"..rcp"` → `".rcp"`, `"."` → `"."`, `""` → `""`
pub fn normalize_extension(extension: &str) -> String {
    if extension.is_empty() {
        return String::new();
    }
    let trimmed = extension.trim_start_matches('.');
    format!(".{}", trimmed)
}

fn deserialize_folder<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    String::deserialize(deserializer).map(|folder| normalize_folder(&folder))
}

fn deserialize_extension<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    String::deserialize(deserializer).map(|extension| normalize_extension(&extension))
}
