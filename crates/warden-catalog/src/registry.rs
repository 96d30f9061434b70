// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registry of plugin kinds and compiled-in plugin factories.
//!
//! The `PluginRegistry` records which kinds a host supports, which built-in
//! implementations exist for each kind, and which built-in is the default
//! when configuration names none. Registries are plain values assembled by
//! the composition root; nothing here is global.

use std::collections::HashMap;
use std::sync::Arc;

use strum::IntoEnumIterator;
use warden_core::{PluginId, PluginInstance, PluginKind, WardenError};

/// Factory for a compiled-in plugin implementation.
///
/// Each call to [`create`](Self::create) returns a fresh, unconfigured
/// instance.
pub trait PluginFactory: Send + Sync {
    /// The kind this factory produces.
    fn kind(&self) -> PluginKind;

    /// Implementation name, as written in configuration.
    fn name(&self) -> &str;

    /// Create a new plugin instance.
    fn create(&self) -> Result<PluginInstance, WardenError>;
}

type CreateFn = dyn Fn() -> Result<PluginInstance, WardenError> + Send + Sync;

/// A [`PluginFactory`] backed by a constructor closure.
pub struct BuiltIn {
    id: PluginId,
    create: Box<CreateFn>,
}

impl BuiltIn {
    pub fn new<F>(kind: PluginKind, name: impl Into<String>, create: F) -> Self
    where
        F: Fn() -> Result<PluginInstance, WardenError> + Send + Sync + 'static,
    {
        Self {
            id: PluginId::new(kind, name),
            create: Box::new(create),
        }
    }
}

impl PluginFactory for BuiltIn {
    fn kind(&self) -> PluginKind {
        self.id.kind
    }

    fn name(&self) -> &str {
        &self.id.name
    }

    fn create(&self) -> Result<PluginInstance, WardenError> {
        (self.create)()
    }
}

impl std::fmt::Debug for BuiltIn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltIn").field("id", &self.id).finish()
    }
}

/// Known plugin kinds plus the built-in implementations for each.
pub struct PluginRegistry {
    kinds: Vec<PluginKind>,
    factories: HashMap<PluginId, Arc<dyn PluginFactory>>,
    defaults: HashMap<PluginKind, String>,
}

impl PluginRegistry {
    /// Create an empty registry supporting `kinds`, in the given order.
    ///
    /// Kind order decides the order fallback defaults are appended in.
    pub fn new(kinds: impl IntoIterator<Item = PluginKind>) -> Self {
        let mut supported = Vec::new();
        for kind in kinds {
            if !supported.contains(&kind) {
                supported.push(kind);
            }
        }
        Self {
            kinds: supported,
            factories: HashMap::new(),
            defaults: HashMap::new(),
        }
    }

    /// Register a built-in implementation.
    ///
    /// Fails if the kind is not supported or the `(kind, name)` pair is
    /// already taken.
    pub fn register(&mut self, factory: impl PluginFactory + 'static) -> Result<(), WardenError> {
        let id = PluginId::new(factory.kind(), factory.name());
        if !self.supports(id.kind) {
            return Err(WardenError::Config(format!(
                "cannot register {id}: plugin kind {} is not supported",
                id.kind
            )));
        }
        if self.factories.contains_key(&id) {
            return Err(WardenError::DuplicatePlugin { id });
        }
        self.factories.insert(id, Arc::new(factory));
        Ok(())
    }

    /// Register a built-in and make it the default for its kind.
    pub fn register_default(
        &mut self,
        factory: impl PluginFactory + 'static,
    ) -> Result<(), WardenError> {
        let kind = factory.kind();
        let name = factory.name().to_string();
        if let Some(existing) = self.defaults.get(&kind) {
            return Err(WardenError::Config(format!(
                "{kind} already has default plugin `{existing}`"
            )));
        }
        self.register(factory)?;
        self.defaults.insert(kind, name);
        Ok(())
    }

    /// Look up a built-in factory by identity.
    pub fn get(&self, id: &PluginId) -> Option<&Arc<dyn PluginFactory>> {
        self.factories.get(id)
    }

    pub fn supports(&self, kind: PluginKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Supported kinds, in registration order.
    pub fn known_kinds(&self) -> &[PluginKind] {
        &self.kinds
    }

    /// Names of the built-ins registered for `kind`, sorted.
    pub fn builtin_names(&self, kind: PluginKind) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .factories
            .keys()
            .filter(|id| id.kind == kind)
            .map(|id| id.name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// The default built-in for `kind`, if one was registered.
    pub fn default_for(&self, kind: PluginKind) -> Option<&str> {
        self.defaults.get(&kind).map(String::as_str)
    }

    /// Every registered built-in, sorted by kind then name.
    pub fn list_all(&self) -> Vec<&PluginId> {
        let mut ids: Vec<&PluginId> = self.factories.keys().collect();
        ids.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.name.cmp(&b.name)));
        ids
    }

    /// Returns the number of registered built-ins.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns true if no built-ins are registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Default for PluginRegistry {
    /// A registry supporting every plugin kind, with no built-ins.
    fn default() -> Self {
        Self::new(PluginKind::iter())
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("kinds", &self.kinds)
            .field("built_ins", &self.list_all())
            .field("defaults", &self.defaults)
            .finish()
    }
}
