// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin capability traits.
//!
//! Every plugin extends [`PluginAdapter`] and uses `#[async_trait]` so the
//! catalog can hold it behind an `Arc<dyn ...>`.

pub mod adapter;
pub mod host;
pub mod key_manager;
pub mod node_attestor;
pub mod workload_attestor;

pub use adapter::PluginAdapter;
pub use host::HostService;
pub use key_manager::KeyManager;
pub use node_attestor::NodeAttestor;
pub use workload_attestor::WorkloadAttestor;
