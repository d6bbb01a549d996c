//! Configuration loading, parsing, and validation for runthis.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use runthis::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".runthis");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(
//!     dir.join("config.yml"),
//!     "repositories:\n  - name: octo/cat\n    language: Go\n",
//! )
//! .unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.repositories[0].name, "octo/cat");
//! ```
//!
//! Without a `.runthis/config.yml` the built-in defaults apply, including
//! the sample list of trending repositories.

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{
    default_config_path, load_config, load_config_file, parse_config, CONFIG_DIR, CONFIG_FILE,
};
pub use schema::{ExitPolicyKind, HarnessConfig, PlannerConfig, PlannerKind};
pub use validator::validate;
