// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single shutdown handle for every plugin a fill call created.

use tokio::sync::Mutex;
use tracing::{debug, warn};
use warden_core::{ShutdownErrors, WardenError};

use crate::slot::LoadedPlugin;

/// Shuts down a set of plugins exactly once.
///
/// Plugins are closed in reverse creation order. The handle is `Send +
/// Sync`; concurrent calls to [`close`](Self::close) wait for the first
/// one and then return `Ok(())`.
pub struct Closer {
    plugins: Mutex<Option<Vec<LoadedPlugin>>>,
    count: usize,
}

impl Closer {
    pub(crate) fn new(plugins: Vec<LoadedPlugin>) -> Self {
        Self {
            count: plugins.len(),
            plugins: Mutex::new(Some(plugins)),
        }
    }

    /// Shut down every plugin, continuing past failures.
    ///
    /// Returns [`WardenError::Shutdown`] naming each plugin whose shutdown
    /// failed. Calls after the first are no-ops.
    pub async fn close(&self) -> Result<(), WardenError> {
        let mut guard = self.plugins.lock().await;
        let Some(plugins) = guard.take() else {
            debug!("plugins already closed");
            return Ok(());
        };

        let mut errors = ShutdownErrors::new();
        for plugin in plugins.into_iter().rev() {
            match plugin.instance.shutdown().await {
                Ok(()) => debug!(plugin = %plugin.id, "plugin shut down"),
                Err(e) => {
                    warn!(plugin = %plugin.id, error = %e, "plugin shutdown failed");
                    errors.push(plugin.id, e);
                }
            }
        }
        errors.into_result()
    }

    /// Number of plugins this closer was created with.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub async fn is_closed(&self) -> bool {
        self.plugins.lock().await.is_none()
    }
}

impl std::fmt::Debug for Closer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Closer").field("plugins", &self.count).finish()
    }
}

impl Drop for Closer {
    fn drop(&mut self) {
        if let Some(plugins) = self.plugins.get_mut()
            && !plugins.is_empty()
        {
            warn!(
                count = plugins.len(),
                "closer dropped without closing; plugins were not shut down"
            );
        }
    }
}
