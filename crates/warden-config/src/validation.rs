// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks constraints serde cannot express. Plugin kinds and names are
//! resolved later by the catalog, which knows the registered built-ins;
//! here only their shape is checked.

use crate::diagnostic::ConfigError;
use crate::model::WardenConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &WardenConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let trust_domain = config.agent.trust_domain.trim();
    if trust_domain.is_empty() {
        errors.push(ConfigError::Validation {
            message: "agent.trust_domain must not be empty".to_string(),
        });
    } else if let Some(message) = trust_domain_problem(trust_domain) {
        errors.push(ConfigError::Validation { message });
    }

    if config.agent.data_dir.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "agent.data_dir must not be empty".to_string(),
        });
    }

    let level = config.agent.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level `{}` is not one of: {}",
                config.agent.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    for (kind, names) in &config.plugins {
        if names.is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("plugins.{kind} declares no plugins"),
            });
        }
        for name in names.keys() {
            if name.trim().is_empty() {
                errors.push(ConfigError::Validation {
                    message: format!("plugins.{kind} contains a plugin with an empty name"),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Describe why `domain` is not a valid trust domain name, if it is not.
fn trust_domain_problem(domain: &str) -> Option<String> {
    if domain.contains("://") {
        return Some(format!(
            "agent.trust_domain `{domain}` must be a bare name, not a URI"
        ));
    }
    let valid = domain
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '-' | '_'));
    if !valid {
        return Some(format!(
            "agent.trust_domain `{domain}` may only contain lowercase letters, digits, `.`, `-` and `_`"
        ));
    }
    None
}
