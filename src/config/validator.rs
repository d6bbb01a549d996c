//! Configuration validation.

use std::collections::HashMap;

use crate::config::schema::HarnessConfig;
use crate::error::{Result, RunthisError};

/// Validate a loaded configuration.
///
/// # Errors
///
/// Returns `ConfigValidationError` describing the first problem found, or
/// `InvalidRepository` for a malformed repository identifier.
pub fn validate(config: &HarnessConfig) -> Result<()> {
    if !(0.0..=100.0).contains(&config.success_threshold) {
        return Err(invalid(format!(
            "success_threshold must be between 0 and 100, got {}",
            config.success_threshold
        )));
    }

    if config.max_run_commands == 0 {
        return Err(invalid("max_run_commands must be at least 1".to_string()));
    }

    if config.clone_timeout_secs == 0 {
        return Err(invalid("clone_timeout_secs must be at least 1".to_string()));
    }

    if config.planner.timeout_secs == 0 {
        return Err(invalid(
            "planner.timeout_secs must be at least 1".to_string(),
        ));
    }

    if config.clone_base_url.trim().is_empty() {
        return Err(invalid("clone_base_url must not be empty".to_string()));
    }

    // Entries sharing a slug would share a checkout and a log file.
    let mut seen: HashMap<String, &str> = HashMap::new();
    for repo in &config.repositories {
        repo.validate()?;
        let slug = repo.slug();
        match seen.get(slug.as_str()) {
            Some(&first) if first == repo.name => {
                return Err(invalid(format!("repository listed twice: {}", repo.name)));
            }
            Some(&first) => {
                return Err(invalid(format!(
                    "repositories {} and {} both map to directory {}",
                    first, repo.name, slug
                )));
            }
            None => {
                seen.insert(slug, &repo.name);
            }
        }
    }

    Ok(())
}

fn invalid(message: String) -> RunthisError {
    RunthisError::ConfigValidationError { message }
}
