// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! kube-backed implementation of the cluster collaborator traits

use crate::constants::OPERATOR_NAME;
use crate::error::{Result, SyncError};
use crate::kubernetes::api::{ConfigLookup, RequestApi, SecretApi, WorkloadApi};
use crate::types::{VaultSecret, VaultSecretConfig, VaultSecretStatus};
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Secret;
use kube::{
    api::{Patch, PatchParams, PostParams},
    Api, Client, ResourceExt,
};
use tracing::{debug, instrument};

/// Cluster access through a kube [`Client`]
#[derive(Clone)]
pub struct KubeCluster {
    client: Client,
}

impl KubeCluster {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// Fetch an object, mapping 404 to `None`
async fn get_optional<K>(api: &Api<K>, name: &str, what: &str) -> Result<Option<K>>
where
    K: Clone + serde::de::DeserializeOwned + std::fmt::Debug,
{
    api.get_opt(name)
        .await
        .map_err(|e| SyncError::from_kube(e, &format!("{} {}", what, name)))
}

#[async_trait]
impl ConfigLookup for KubeCluster {
    #[instrument(skip(self))]
    async fn get_config(&self, namespace: &str, name: &str) -> Result<Option<VaultSecretConfig>> {
        let api: Api<VaultSecretConfig> = Api::namespaced(self.client.clone(), namespace);
        get_optional(&api, name, "VaultSecretConfig").await
    }
}

#[async_trait]
impl SecretApi for KubeCluster {
    #[instrument(skip(self))]
    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Option<Secret>> {
        let api: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
        get_optional(&api, name, "Secret").await
    }

    #[instrument(skip(self, secret), fields(secret = %secret.name_any()))]
    async fn create_secret(&self, namespace: &str, secret: &Secret) -> Result<()> {
        let api: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
        api.create(&PostParams::default(), secret)
            .await
            .map_err(|e| SyncError::from_kube(e, &format!("Secret {}/{}", namespace, secret.name_any())))?;
        Ok(())
    }

    #[instrument(skip(self, secret), fields(secret = %secret.name_any()))]
    async fn replace_secret(&self, namespace: &str, secret: &Secret) -> Result<()> {
        let api: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
        let name = secret.name_any();
        api.replace(&name, &PostParams::default(), secret)
            .await
            .map_err(|e| SyncError::from_kube(e, &format!("Secret {}/{}", namespace, name)))?;
        Ok(())
    }
}

#[async_trait]
impl WorkloadApi for KubeCluster {
    #[instrument(skip(self))]
    async fn get_deployment(&self, namespace: &str, name: &str) -> Result<Option<Deployment>> {
        let api: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        get_optional(&api, name, "Deployment").await
    }

    #[instrument(skip(self, deployment), fields(deployment = %deployment.name_any()))]
    async fn replace_deployment(&self, namespace: &str, deployment: &Deployment) -> Result<()> {
        let api: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        let name = deployment.name_any();
        api.replace(&name, &PostParams::default(), deployment)
            .await
            .map_err(|e| SyncError::from_kube(e, &format!("Deployment {}/{}", namespace, name)))?;
        Ok(())
    }
}

#[async_trait]
impl RequestApi for KubeCluster {
    #[instrument(skip(self))]
    async fn get_request(&self, namespace: &str, name: &str) -> Result<Option<VaultSecret>> {
        let api: Api<VaultSecret> = Api::namespaced(self.client.clone(), namespace);
        get_optional(&api, name, "VaultSecret").await
    }

    #[instrument(skip(self, request, status), fields(request = %request.name_any()))]
    async fn persist_status(&self, request: &VaultSecret, status: &VaultSecretStatus) -> Result<()> {
        let namespace = request.namespace().unwrap_or_default();
        let api: Api<VaultSecret> = Api::namespaced(self.client.clone(), &namespace);

        // Merge patch replaces the conditions array as a whole
        let patch = serde_json::json!({ "status": status });

        api.patch_status(
            &request.name_any(),
            &PatchParams {
                field_manager: Some(OPERATOR_NAME.to_string()),
                ..Default::default()
            },
            &Patch::Merge(&patch),
        )
        .await
        .map_err(|e| SyncError::StatusPersistFailure(e.to_string()))?;

        debug!("Status persisted for {}/{}", namespace, request.name_any());
        Ok(())
    }
}
