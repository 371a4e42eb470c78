//! Recipe Module
//!
//! A set of application variables bound to one record file.
//!
//! ## Lifecycle
//! ```text
//!              set_name / set_folder / set_extension / configure / deinitialize
//!        ┌──────────────────────────────────────────────────────────┐
//!        ▼                                                          │
//!  ┌───────────────┐      initialize() ok      ┌─────────┐          │
//!  │ Uninitialized │ ────────────────────────► │  Ready  │ ─────────┘
//!  └───────────────┘ ◄──────────────────────── └─────────┘
//!                        initialize() err         save() / load()
//! ```
//!
//! Variables can be added and removed in either state; that never touches
//! disk. `save()` overwrites the file with every registered variable.
//! `load()` copies file values into registered variables whose size
//! matches and leaves everything else alone.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use crate::config::{normalize_extension, normalize_folder, RecipeConfig};
use crate::error::{RecipeError, Result};
use crate::record::{RecordReader, RecordWriter};
use crate::registry::Registry;
use crate::variable::VariableRef;

/// Whether load/save are currently allowed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeState {
    /// Path not yet validated; load/save are rejected
    Uninitialized,
    /// Backing file exists; load/save are allowed
    Ready,
}

/// Result of a load operation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of entries decoded from the file
    pub entries_read: u64,

    /// Number of entries copied into registered variables
    pub applied: u64,

    /// Number of entries with no registered variable
    pub unknown: u64,

    /// Number of entries whose size differs from the registered variable
    pub size_mismatched: u64,
}

/// Registry of variables backed by a record file
#[derive(Debug)]
pub struct Recipe {
    /// Path and write options
    config: RecipeConfig,

    /// Registered variables
    registry: Registry,

    /// Lifecycle state
    state: RecipeState,
}

impl Recipe {
    /// New recipe named `name`, default folder and extension
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(RecipeConfig::new(name))
    }

    /// New recipe from a full config
    ///
    /// Folder and extension are normalized. The recipe starts uninitialized.
    pub fn with_config(mut config: RecipeConfig) -> Self {
        config.folder = normalize_folder(&config.folder);
        config.extension = normalize_extension(&config.extension);
        Self {
            config,
            registry: Registry::new(),
            state: RecipeState::Uninitialized,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Make sure the recipe file exists and enable load/save
    ///
    /// 1. Reject an empty name without touching the filesystem
    /// 2. Accept an existing file as is
    /// 3. Otherwise create missing directories and an empty file
    pub fn initialize(&mut self) -> Result<()> {
        self.state = RecipeState::Uninitialized;

        if self.config.name.is_empty() {
            return Err(RecipeError::EmptyName);
        }

        let path = self.path();
        if path.is_file() {
            tracing::debug!("Recipe file {} exists", path.display());
            self.state = RecipeState::Ready;
            return Ok(());
        }
        if path.exists() {
            return Err(RecipeError::NotAFile(path));
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&path)?;

        tracing::debug!("Created recipe file {}", path.display());
        self.state = RecipeState::Ready;
        Ok(())
    }

    /// Block load/save until the next successful `initialize()`
    pub fn deinitialize(&mut self) {
        if self.state == RecipeState::Ready {
            tracing::debug!("Recipe {} deinitialized", self.config.name);
        }
        self.state = RecipeState::Uninitialized;
    }

    pub fn is_initialized(&self) -> bool {
        self.state == RecipeState::Ready
    }

    pub fn state(&self) -> RecipeState {
        self.state
    }

    // =========================================================================
    // Path Configuration
    // =========================================================================

    /// Full path of the recipe file
    pub fn path(&self) -> PathBuf {
        self.config.path()
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn folder(&self) -> &str {
        &self.config.folder
    }

    pub fn extension(&self) -> &str {
        &self.config.extension
    }

    pub fn config(&self) -> &RecipeConfig {
        &self.config
    }

    /// Set the file name. Deinitializes the recipe.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.config.name = name.into();
        self.deinitialize();
    }

    /// Set the directory. Deinitializes the recipe.
    pub fn set_folder(&mut self, folder: impl AsRef<str>) {
        self.config.folder = normalize_folder(folder.as_ref());
        self.deinitialize();
    }

    /// Set the extension. Deinitializes the recipe.
    pub fn set_extension(&mut self, extension: impl AsRef<str>) {
        self.config.extension = normalize_extension(extension.as_ref());
        self.deinitialize();
    }

    /// Replace the whole config. Deinitializes the recipe.
    pub fn configure(&mut self, mut config: RecipeConfig) {
        config.folder = normalize_folder(&config.folder);
        config.extension = normalize_extension(&config.extension);
        self.config = config;
        self.deinitialize();
    }

    // =========================================================================
    // Variables
    // =========================================================================

    /// Register `variable` under `id`. False if `id` is already taken.
    pub fn add_variable(&mut self, id: impl Into<String>, variable: VariableRef) -> bool {
        self.registry.add(id, variable)
    }

    /// Unregister `id`. False if it was not registered.
    pub fn remove_variable(&mut self, id: &str) -> bool {
        self.registry.remove(id)
    }

    pub fn variable(&self, id: &str) -> Option<&VariableRef> {
        self.registry.get(id)
    }

    pub fn variable_count(&self) -> usize {
        self.registry.len()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    // =========================================================================
    // Save / Load
    // =========================================================================

    /// Overwrite the recipe file with every registered variable
    ///
    /// Returns the number of entries written.
    pub fn save(&self) -> Result<usize> {
        self.ensure_ready()?;

        let path = self.path();
        let mut writer = RecordWriter::create(&path)?;
        for (id, variable) in self.registry.iter() {
            variable.read(|bytes| writer.write_entry(id.as_bytes(), bytes))?;
        }

        let written = writer.entry_count();
        let bytes = writer.bytes_written();
        let file = writer.finish_file()?;
        if self.config.sync_on_save {
            file.sync_all()?;
        }

        tracing::debug!(
            "Saved {} variables ({} bytes) to {}",
            written,
            bytes,
            path.display()
        );
        Ok(written)
    }

    /// Copy values from the recipe file into registered variables
    ///
    /// Per entry:
    /// - not registered → skipped
    /// - registered with a different size → skipped, variable untouched
    /// - otherwise → bytes copied into the variable
    ///
    /// A file that ends inside an entry fails with `Truncated`; entries
    /// before that point have already been applied.
    pub fn load(&self) -> Result<LoadReport> {
        self.ensure_ready()?;

        let path = self.path();
        let mut reader = RecordReader::open(&path)?;
        let mut report = LoadReport::default();

        loop {
            match self.load_entry(&mut reader, &mut report) {
                Ok(true) => continue,
                Ok(false) => break,
                Err(e) => {
                    tracing::warn!("Failed to load {}: {}", path.display(), e);
                    return Err(e);
                }
            }
        }

        tracing::debug!("Loaded {}: {:?}", path.display(), report);
        Ok(report)
    }

    /// Apply or skip one entry. Ok(false) at end of record.
    ///
    /// Skipped values are discarded without buffering, so memory stays
    /// bounded by the largest registered variable.
    fn load_entry<R: Read>(
        &self,
        reader: &mut RecordReader<R>,
        report: &mut LoadReport,
    ) -> Result<bool> {
        let header = match reader.next_header()? {
            Some(header) => header,
            None => return Ok(false),
        };
        report.entries_read += 1;

        let variable = match header.id_str().and_then(|id| self.registry.get(id)) {
            Some(variable) => variable,
            None => {
                tracing::debug!(
                    "Skipping unknown entry {:?}",
                    String::from_utf8_lossy(&header.id)
                );
                reader.skip_value(&header)?;
                report.unknown += 1;
                return Ok(true);
            }
        };

        if header.value_len != variable.len() as u64 {
            tracing::warn!(
                "Skipping entry {:?}: file holds {} bytes, variable holds {}",
                String::from_utf8_lossy(&header.id),
                header.value_len,
                variable.len()
            );
            reader.skip_value(&header)?;
            report.size_mismatched += 1;
            return Ok(true);
        }

        let value = reader.read_value(&header)?;
        variable.copy_from_slice(&value)?;
        report.applied += 1;
        Ok(true)
    }

    fn ensure_ready(&self) -> Result<()> {
        match self.state {
            RecipeState::Ready => Ok(()),
            RecipeState::Uninitialized => Err(RecipeError::NotInitialized),
        }
    }
}
