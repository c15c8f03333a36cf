// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::{CustomResource, ResourceExt};
use serde::{Deserialize, Serialize};

use crate::constants::conditions;

/// Sync a Vault path into a Kubernetes Secret, optionally restarting a Deployment on change
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "vaultsync.geeko.me", version = "v1alpha1", kind = "VaultSecret")]
#[kube(namespaced)]
#[kube(status = "VaultSecretStatus")]
#[kube(printcolumn = r#"{"name":"Secret","type":"string","jsonPath":".spec.secretName"}"#)]
#[kube(printcolumn = r#"{"name":"Ready","type":"string","jsonPath":".status.conditions[0].status"}"#)]
#[kube(printcolumn = r#"{"name":"Retries","type":"integer","jsonPath":".status.retryCount"}"#)]
#[serde(rename_all = "camelCase")]
pub struct VaultSecretSpec {
    /// Name of the VaultSecretConfig holding the Vault connection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault_config: Option<String>,
    /// Namespace of the VaultSecretConfig, defaults to this object's namespace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault_config_namespace: Option<String>,
    /// Direct Vault URL, takes precedence over vaultConfig together with vaultToken
    #[serde(default, rename = "vaultURL", skip_serializing_if = "Option::is_none")]
    pub vault_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault_token: Option<String>,
    /// Path of the secret in Vault, e.g. `secret/data/myapp`
    pub vault_path: String,
    /// Name of the Kubernetes Secret to maintain
    pub secret_name: String,
    /// Deployment restarted whenever the secret content changes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_name: Option<String>,
    /// Namespace of the Secret and Deployment, defaults to this object's namespace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// How often to re-read Vault, e.g. `5m`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_interval: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VaultSecretStatus {
    /// Time of the last successful sync (RFC 3339)
    #[serde(default)]
    pub last_sync_time: Option<String>,
    /// SHA-256 of the last applied secret data
    #[serde(default)]
    pub secret_hash: String,
    #[serde(default)]
    pub retry_count: u32,
    #[serde(default)]
    pub last_error: String,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub status: String,
    pub reason: String,
    pub message: String,
    pub last_transition_time: String,
}

impl VaultSecret {
    /// Namespace holding the target Secret and Deployment
    pub fn target_namespace(&self) -> String {
        self.spec
            .namespace
            .clone()
            .filter(|ns| !ns.is_empty())
            .unwrap_or_else(|| self.namespace().unwrap_or_default())
    }

    /// Name of the Deployment to restart, if any
    pub fn deployment_name(&self) -> Option<&str> {
        self.spec.deployment_name.as_deref().filter(|d| !d.is_empty())
    }

    /// Snapshot of the current status, empty when never reconciled
    pub fn current_status(&self) -> VaultSecretStatus {
        self.status.clone().unwrap_or_default()
    }

    /// Check if the last reconciliation left this object Ready
    pub fn is_ready(&self) -> bool {
        self.status
            .as_ref()
            .and_then(|s| s.conditions.first())
            .is_some_and(|c| c.condition_type == conditions::READY && c.status == "True")
    }
}
