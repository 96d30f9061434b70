// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `warden run`: load the catalog, bootstrap the agent key, wait for a
//! shutdown signal, then close every plugin.

use tracing::{error, info};
use warden_agent::{AgentCatalog, LoadConfig, ensure_agent_key, shutdown};
use warden_config::WardenConfig;
use warden_core::WardenError;

pub async fn run(config: WardenConfig) -> Result<(), WardenError> {
    init_tracing(&config.agent.log_level);
    info!(
        trust_domain = %config.agent.trust_domain,
        data_dir = %config.agent.data_dir,
        "starting warden agent"
    );

    let (catalog, closer) = warden_agent::load(LoadConfig::from_config(&config)).await?;
    for id in catalog.plugin_ids() {
        info!(plugin = %id, "plugin active");
    }

    if let Err(e) = bootstrap(&catalog).await {
        error!(error = %e, "agent bootstrap failed");
        if let Err(close_err) = closer.close().await {
            error!(error = %close_err, "plugin shutdown failed");
        }
        return Err(e);
    }

    let token = shutdown::install_signal_handler();
    info!("agent running, waiting for shutdown signal");
    token.cancelled().await;

    closer.close().await?;
    info!("all plugins shut down");
    Ok(())
}

/// Make sure the agent has a key and the node attestor can produce evidence.
async fn bootstrap(catalog: &AgentCatalog) -> Result<(), WardenError> {
    ensure_agent_key(catalog.key_manager().as_ref()).await?;
    let data = catalog
        .node_attestor()
        .plugin()
        .fetch_attestation_data()
        .await?;
    info!(
        attestor = catalog.node_attestor().name(),
        kind = %data.kind,
        payload_len = data.payload.len(),
        "node attestation data ready"
    );
    Ok(())
}

/// Initialize tracing. `RUST_LOG` overrides the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warden={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
