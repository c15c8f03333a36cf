// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// Shared Vault connection settings referenced by VaultSecrets
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[kube(group = "vaultsync.geeko.me", version = "v1alpha1", kind = "VaultSecretConfig")]
#[kube(namespaced)]
pub struct VaultSecretConfigSpec {
    #[serde(rename = "vaultURL")]
    pub vault_url: String,
    #[serde(rename = "vaultToken")]
    pub vault_token: String,
}
