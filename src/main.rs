// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use kube::Client;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vaultsync::config::Config;
use vaultsync::kubernetes::wait_for_crd;
use vaultsync::reconcilers::VaultSecretReconciler;
use vaultsync::types::VaultSecret;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting vaultsync operator");

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: max_concurrent_reconciles={}, vault_request_timeout={:?}, watch_namespace={}",
        config.max_concurrent_reconciles,
        config.vault_request_timeout,
        config.watch_namespace.as_deref().unwrap_or("<all>")
    );

    let client = Client::try_default()
        .await
        .context("failed to create Kubernetes client")?;
    info!("Connected to Kubernetes cluster");

    info!("Waiting for VaultSecret CRD to become available...");
    wait_for_crd::<VaultSecret>(&client).await?;

    VaultSecretReconciler::new(client, config).run().await
}
