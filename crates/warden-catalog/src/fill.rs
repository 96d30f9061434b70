// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Binds resolved plugin records into the slots of a [`PluginSet`].
//!
//! A fill call either populates every slot and returns a [`Closer`] for
//! the plugins it created, or shuts down everything it had configured
//! and returns the first error.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, info, warn};
use warden_core::{ConfigureRequest, GlobalConfig, HostService, PluginId, WardenError};

use crate::closer::Closer;
use crate::loader::PluginLoader;
use crate::registry::PluginRegistry;
use crate::resolver::{PluginRecord, PluginSource};
use crate::slot::{BoundSlots, LoadedPlugin, PluginSet};

/// Everything a fill call needs.
pub struct FillConfig<'a> {
    pub global: GlobalConfig,
    /// Resolved records, usually from [`resolve`](crate::resolve).
    pub plugins: Vec<PluginRecord>,
    pub registry: &'a PluginRegistry,
    /// Starts records with an external source.
    pub loader: &'a dyn PluginLoader,
    pub host_services: &'a [Arc<dyn HostService>],
}

/// Instantiate, configure and bind plugins for every slot of `T`.
///
/// Slots are processed in slot-table order. A plugin matched by several
/// slots is created once and shared. On error, every plugin configured
/// during this call is shut down in reverse order before returning.
pub async fn fill<T: PluginSet>(config: FillConfig<'_>) -> Result<(T, Closer), WardenError> {
    let mut binder = Binder {
        config: &config,
        loaded: Vec::new(),
        cache: HashMap::new(),
    };

    match binder.bind::<T>().await {
        Ok(target) => {
            info!(count = binder.loaded.len(), "plugins loaded");
            Ok((target, Closer::new(binder.loaded)))
        }
        Err(err) => {
            warn!(error = %err, count = binder.loaded.len(), "plugin loading failed, rolling back");
            let closer = Closer::new(binder.loaded);
            if let Err(rollback) = closer.close().await {
                warn!(error = %rollback, "rollback shutdown failed");
            }
            Err(err)
        }
    }
}

struct Binder<'c, 'a> {
    config: &'c FillConfig<'a>,
    /// Configured plugins in creation order.
    loaded: Vec<LoadedPlugin>,
    cache: HashMap<PluginId, LoadedPlugin>,
}

impl Binder<'_, '_> {
    async fn bind<T: PluginSet>(&mut self) -> Result<T, WardenError> {
        let config = self.config;
        check_unique(&config.plugins)?;

        let mut bound = BoundSlots::default();
        for slot in T::slots() {
            let matches: Vec<&PluginRecord> = config
                .plugins
                .iter()
                .filter(|r| r.enabled && r.id.kind == slot.kind)
                .collect();
            let names: Vec<&str> = matches.iter().map(|r| r.id.name.as_str()).collect();
            slot.cardinality.check(slot.kind, &names)?;

            let mut assigned = Vec::with_capacity(matches.len());
            for record in matches {
                assigned.push(self.instantiate(record).await?);
            }
            debug!(slot = slot.id, count = assigned.len(), "slot bound");
            bound.insert(slot.id, assigned);
        }

        T::from_bound(bound)
    }

    async fn instantiate(&mut self, record: &PluginRecord) -> Result<LoadedPlugin, WardenError> {
        if let Some(existing) = self.cache.get(&record.id) {
            return Ok(existing.clone());
        }

        let config = self.config;
        let id = record.id.clone();
        let instance = match &record.source {
            PluginSource::BuiltIn => {
                let factory = config.registry.get(&id).ok_or_else(|| {
                    WardenError::UnknownPlugin {
                        id: id.clone(),
                        suggestion: None,
                    }
                })?;
                factory.create().map_err(|e| WardenError::Instantiate {
                    id: id.clone(),
                    source: Box::new(e),
                })?
            }
            PluginSource::External { cmd, .. } => {
                debug!(plugin = %id, cmd, "loading external plugin");
                config
                    .loader
                    .load(record, config.host_services)
                    .await
                    .map_err(|e| WardenError::Instantiate {
                        id: id.clone(),
                        source: Box::new(e),
                    })?
            }
        };

        if instance.kind() != id.kind {
            // Never bound, so the rollback closer would not see it.
            if let Err(e) = instance.shutdown().await {
                warn!(plugin = %id, error = %e, "shutdown of mis-kinded plugin failed");
            }
            return Err(WardenError::Instantiate {
                source: format!("produced a {} instead", instance.kind()).into(),
                id,
            });
        }

        let request = ConfigureRequest {
            configuration: record.data.clone(),
            global: config.global.clone(),
        };
        instance
            .configure(request)
            .await
            .map_err(|e| WardenError::Configure {
                id: id.clone(),
                source: Box::new(e),
            })?;

        let loaded = LoadedPlugin {
            id: id.clone(),
            built_in: record.is_built_in(),
            instance,
        };
        self.loaded.push(loaded.clone());
        self.cache.insert(id.clone(), loaded.clone());

        match loaded.instance.plugin_info().await {
            Ok(info) => info!(
                plugin = %id,
                version = %info.version,
                built_in = loaded.built_in,
                "plugin configured"
            ),
            Err(e) => warn!(plugin = %id, error = %e, "plugin info unavailable"),
        }

        Ok(loaded)
    }
}

fn check_unique(records: &[PluginRecord]) -> Result<(), WardenError> {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(&record.id) {
            return Err(WardenError::DuplicatePlugin {
                id: record.id.clone(),
            });
        }
    }
    Ok(())
}
