// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster operations the sync engine depends on.
//!
//! Reads return `Ok(None)` when the object does not exist. Writes report
//! `ClusterNotFound` and `ClusterWriteConflict` through [`SyncError`](crate::error::SyncError).

use crate::error::Result;
use crate::types::{VaultSecret, VaultSecretConfig, VaultSecretStatus};
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Secret;

/// Lookup of shared Vault configuration by namespace and name
#[async_trait]
pub trait ConfigLookup: Send + Sync {
    async fn get_config(&self, namespace: &str, name: &str) -> Result<Option<VaultSecretConfig>>;
}

#[async_trait]
pub trait SecretApi: Send + Sync {
    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Option<Secret>>;
    async fn create_secret(&self, namespace: &str, secret: &Secret) -> Result<()>;
    async fn replace_secret(&self, namespace: &str, secret: &Secret) -> Result<()>;
}

#[async_trait]
pub trait WorkloadApi: Send + Sync {
    async fn get_deployment(&self, namespace: &str, name: &str) -> Result<Option<Deployment>>;
    async fn replace_deployment(&self, namespace: &str, deployment: &Deployment) -> Result<()>;
}

/// Access to the reconciled VaultSecret and its status subresource
#[async_trait]
pub trait RequestApi: Send + Sync {
    async fn get_request(&self, namespace: &str, name: &str) -> Result<Option<VaultSecret>>;
    async fn persist_status(&self, request: &VaultSecret, status: &VaultSecretStatus) -> Result<()>;
}

/// Everything a reconcile pass needs from the cluster
pub trait ClusterApi: ConfigLookup + SecretApi + WorkloadApi + RequestApi {}

impl<T: ConfigLookup + SecretApi + WorkloadApi + RequestApi> ClusterApi for T {}
