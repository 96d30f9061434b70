// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key manager capability.

use async_trait::async_trait;

use crate::error::WardenError;
use crate::traits::adapter::PluginAdapter;
use crate::types::KeyPair;

/// Generates and holds the agent's private key.
#[async_trait]
pub trait KeyManager: PluginAdapter {
    /// Generate a fresh key pair. Does not touch stored state.
    async fn generate_key_pair(&self) -> Result<KeyPair, WardenError>;

    /// Replace the stored private key with `private_key` (PKCS#8).
    async fn store_private_key(&self, private_key: &[u8]) -> Result<(), WardenError>;

    /// Fetch the stored private key, or `None` if nothing has been stored.
    async fn fetch_private_key(&self) -> Result<Option<Vec<u8>>, WardenError>;
}
