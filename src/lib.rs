//! # recipe-store
//!
//! Bind named application variables to a binary "recipe" file:
//! - Register fixed-size variables under string identifiers
//! - Save the whole set to a length-prefixed record file
//! - Load it back, updating only variables that are registered and whose
//!   size still matches (added, removed or resized fields are tolerated)
//!
//! ## Architecture Overview
//!
//! ```text
//!   application memory
//!   ┌─────────────┐ ┌─────────────┐ ┌─────────────┐
//!   │ VariableRef │ │ VariableRef │ │ VariableRef │
//!   └──────┬──────┘ └──────┬──────┘ └──────┬──────┘
//!          │               │               │
//! ┌────────▼───────────────▼───────────────▼───────┐
//! │                     Recipe                      │
//! │       Registry (id → VariableRef) + state       │
//! └───────┬─────────────────────────▲───────────────┘
//!    save │                         │ load
//!  ┌──────▼──────┐           ┌──────┴──────┐
//!  │RecordWriter │           │RecordReader │
//!  └──────┬──────┘           └──────▲──────┘
//!         └──────► folder/name.rcp ─┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use recipe_store::{Recipe, VariableRef};
//!
//! let speed = VariableRef::from_value(&0i32);
//!
//! let mut recipe = Recipe::new("line_a");
//! recipe.set_folder("recipes");
//! recipe.add_variable("speed", speed.clone());
//! recipe.initialize()?;
//!
//! recipe.load()?;
//! speed.set(&1200i32)?;
//! recipe.save()?;
//! # Ok::<(), recipe_store::RecipeError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod variable;
pub mod registry;
pub mod record;
pub mod recipe;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RecipeError, Result};
pub use config::{RecipeConfig, DEFAULT_EXTENSION};
pub use recipe::{LoadReport, Recipe, RecipeState};
pub use registry::Registry;
pub use variable::VariableRef;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of recipe-store
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
