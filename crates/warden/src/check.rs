// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `warden check` and `warden plugins`: offline views of the plugin setup.

use warden_catalog::{PluginRecord, PluginRegistry, PluginSource};
use warden_config::WardenConfig;
use warden_core::WardenError;

/// Resolve the configured plugins without starting any of them.
pub fn check(config: &WardenConfig) -> Result<(), WardenError> {
    let registry = warden_agent::builtins()?;
    let records = warden_catalog::resolve(&config.plugins, &registry)?;

    println!("configuration OK (trust domain {})", config.agent.trust_domain);
    for record in &records {
        println!("  {}", describe(record));
    }
    Ok(())
}

/// Print every built-in plugin, marking per-kind defaults.
pub fn list_plugins() -> Result<(), WardenError> {
    let registry = warden_agent::builtins()?;
    for line in plugin_lines(&registry) {
        println!("{line}");
    }
    Ok(())
}

fn plugin_lines(registry: &PluginRegistry) -> Vec<String> {
    registry
        .list_all()
        .into_iter()
        .map(|id| {
            if registry.default_for(id.kind) == Some(id.name.as_str()) {
                format!("{id} (default)")
            } else {
                id.to_string()
            }
        })
        .collect()
}

fn describe(record: &PluginRecord) -> String {
    let source = match &record.source {
        PluginSource::BuiltIn => "built-in".to_string(),
        PluginSource::External { cmd, .. } => format!("external: {cmd}"),
    };
    let state = if record.enabled { "" } else { ", disabled" };
    format!("{} ({source}{state})", record.id)
}

#[cfg(test)]
mod tests {
    use warden_core::PluginKind;

    use super::*;

    #[test]
    fn lists_builtins_with_default_marker() {
        let registry = warden_agent::builtins().unwrap();
        assert_eq!(
            plugin_lines(&registry),
            vec![
                "KeyManager \"disk\"",
                "KeyManager \"memory\" (default)",
                "NodeAttestor \"join_token\"",
                "WorkloadAttestor \"unix\"",
            ]
        );
    }

    #[test]
    fn describes_records() {
        let mut record = PluginRecord::built_in(PluginKind::KeyManager, "memory");
        assert_eq!(describe(&record), "KeyManager \"memory\" (built-in)");

        record.source = PluginSource::External {
            cmd: "/opt/km".into(),
            checksum: None,
        };
        record.enabled = false;
        assert_eq!(describe(&record), "KeyManager \"memory\" (external: /opt/km, disabled)");
    }

    #[test]
    fn check_accepts_minimal_config() {
        let config = warden_config::load_and_validate_str(
            r#"
[agent]
trust_domain = "example.org"

[plugins.NodeAttestor.join_token]
plugin_data = { token = "abc" }
[plugins.WorkloadAttestor.unix]
"#,
        )
        .unwrap();
        check(&config).unwrap();
    }
}
