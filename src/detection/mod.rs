//! Manifest and README detection.

pub mod file_detection;
pub mod manifest;
pub mod readme;
pub mod types;

pub use manifest::{ManifestDetector, MANIFEST_TABLE};
pub use readme::{Readme, ReadmeLocator, README_CANDIDATES};
pub use types::{DependencySet, Ecosystem};
