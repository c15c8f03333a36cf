// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resolution of the effective Vault endpoint and token.

use crate::error::{Result, SyncError};
use crate::kubernetes::ConfigLookup;
use crate::store::StoreEndpoint;
use crate::types::VaultSecret;
use kube::ResourceExt;
use tracing::{debug, instrument};

/// Resolve the Vault endpoint for a request.
///
/// Direct `vaultURL` + `vaultToken` win when both are set, otherwise the
/// referenced VaultSecretConfig is used.
#[instrument(skip_all, fields(request = %request.name_any()))]
pub async fn resolve_endpoint(
    request: &VaultSecret,
    lookup: &impl ConfigLookup,
) -> Result<StoreEndpoint> {
    let spec = &request.spec;
    let url = spec.vault_url.as_deref().unwrap_or_default();
    let token = spec.vault_token.as_deref().unwrap_or_default();

    if !url.is_empty() && !token.is_empty() {
        debug!("Using direct Vault configuration");
        return Ok(StoreEndpoint {
            url: url.to_string(),
            token: token.to_string(),
        });
    }

    let Some(config_name) = spec.vault_config.as_deref().filter(|n| !n.is_empty()) else {
        return Err(SyncError::MissingConfiguration);
    };

    let namespace = spec
        .vault_config_namespace
        .clone()
        .filter(|ns| !ns.is_empty())
        .unwrap_or_else(|| request.namespace().unwrap_or_default());

    debug!("Using VaultSecretConfig {}/{}", namespace, config_name);

    let config = lookup
        .get_config(&namespace, config_name)
        .await?
        .ok_or_else(|| SyncError::ConfigNotFound {
            namespace: namespace.clone(),
            name: config_name.to_string(),
        })?;

    Ok(StoreEndpoint {
        url: config.spec.vault_url,
        token: config.spec.vault_token,
    })
}
