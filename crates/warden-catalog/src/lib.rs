// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin catalog for the Warden agent.
//!
//! Loading a catalog happens in two steps. [`resolve`] turns the
//! `[plugins.*]` configuration into ordered [`PluginRecord`]s, adding the
//! registry's defaults for kinds left unconfigured. [`fill`] then binds
//! those records into the slots of a [`PluginSet`], creating and
//! configuring each plugin once, and returns the populated set with a
//! [`Closer`] that shuts the plugins down again.

pub mod closer;
pub mod fill;
pub mod loader;
pub mod registry;
pub mod resolver;
pub mod slot;

pub use closer::Closer;
pub use fill::{FillConfig, fill};
pub use loader::{PluginLoader, UnsupportedLoader};
pub use registry::{BuiltIn, PluginFactory, PluginRegistry};
pub use resolver::{PluginRecord, PluginSource, resolve};
pub use slot::{BoundSlots, Cardinality, LoadedPlugin, PluginSet, SlotSpec};
