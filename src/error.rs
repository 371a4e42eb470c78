//! Error types for recipe-store
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using RecipeError
pub type Result<T> = std::result::Result<T, RecipeError>;

/// Unified error type for recipe operations
#[derive(Debug, Error)]
pub enum RecipeError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Recipe name is empty")]
    EmptyName,

    #[error("Recipe path is not a file: {0}")]
    NotAFile(PathBuf),

    // -------------------------------------------------------------------------
    // Lifecycle Errors
    // -------------------------------------------------------------------------
    #[error("Recipe is not initialized")]
    NotInitialized,

    // -------------------------------------------------------------------------
    // Record Errors
    // -------------------------------------------------------------------------
    #[error("Record truncated at offset {offset}: missing {context}")]
    Truncated { offset: u64, context: &'static str },

    // -------------------------------------------------------------------------
    // Variable Errors
    // -------------------------------------------------------------------------
    #[error("Size mismatch: variable holds {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}
