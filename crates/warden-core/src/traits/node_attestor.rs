// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Node attestor capability.

use async_trait::async_trait;

use crate::error::WardenError;
use crate::traits::adapter::PluginAdapter;
use crate::types::AttestationData;

/// Produces evidence of the node's identity for the server.
#[async_trait]
pub trait NodeAttestor: PluginAdapter {
    async fn fetch_attestation_data(&self) -> Result<AttestationData, WardenError>;
}
