// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Workload attestor capability.

use async_trait::async_trait;

use crate::error::WardenError;
use crate::traits::adapter::PluginAdapter;
use crate::types::Selector;

/// Discovers selectors describing the workload behind a process id.
#[async_trait]
pub trait WorkloadAttestor: PluginAdapter {
    async fn attest(&self, pid: u32) -> Result<Vec<Selector>, WardenError>;
}
