// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Services the host exposes for plugins to call back into.

/// A host-side service handed through to the external plugin loader.
///
/// The catalog never calls these; it only forwards them.
pub trait HostService: Send + Sync + 'static {
    /// Service name, used by loaders to route plugin requests.
    fn name(&self) -> &str;
}
