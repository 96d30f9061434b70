// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Warden agent.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), layered file lookup, `WARDEN_AGENT_*`
//! environment overrides, and miette diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use warden_config::load_and_validate;
//!
//! let config = load_and_validate(None).expect("config errors");
//! println!("trust domain: {}", config.agent.trust_domain);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::{Path, PathBuf};

pub use diagnostic::{ConfigError, render_errors, suggest_key};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{AgentConfig, PluginConfigEntry, PluginConfigMap, WardenConfig};

/// Load configuration and validate it.
///
/// With `path`, only that file is read; otherwise the standard lookup
/// paths are merged. Extraction failures are converted to diagnostics that
/// point into the offending file.
pub fn load_and_validate(path: Option<&Path>) -> Result<WardenConfig, Vec<ConfigError>> {
    let paths = match path {
        Some(p) => vec![p.to_path_buf()],
        None => loader::default_config_paths(),
    };
    let result = match path {
        Some(p) => loader::load_config_from_path(p),
        None => loader::load_config(),
    };
    match result {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(
            err,
            &collect_toml_sources(&paths),
        )),
    }
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<WardenConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Read each existing config file for diagnostic source spans.
fn collect_toml_sources(paths: &[PathBuf]) -> Vec<(String, String)> {
    paths
        .iter()
        .filter_map(|path| {
            let content = std::fs::read_to_string(path).ok()?;
            Some((path.display().to_string(), content))
        })
        .collect()
}
