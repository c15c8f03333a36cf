// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("either vaultConfig or both vaultURL and vaultToken must be specified")]
    MissingConfiguration,

    #[error("VaultSecretConfig {namespace}/{name} not found")]
    ConfigNotFound { namespace: String, name: String },

    #[error("Invalid Vault endpoint: {0}")]
    InvalidStoreEndpoint(String),

    #[error("Vault unreachable: {0}")]
    StoreUnreachable(String),

    #[error("Vault denied access: {0}")]
    StoreUnauthorized(String),

    #[error("secret not found at path: {0}")]
    StoreNotFound(String),

    #[error("Conflicting write: {0}")]
    ClusterWriteConflict(String),

    #[error("Object not found: {0}")]
    ClusterNotFound(String),

    #[error("Missing object key: {0}")]
    MissingObjectKey(&'static str),

    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to persist status: {0}")]
    StatusPersistFailure(String),
}

impl SyncError {
    /// Classify a kube API error raised while touching `what`
    pub fn from_kube(error: kube::Error, what: &str) -> Self {
        match &error {
            kube::Error::Api(response) if response.code == 404 => {
                SyncError::ClusterNotFound(format!("{}: {}", what, response.message))
            }
            kube::Error::Api(response) if response.code == 409 => {
                SyncError::ClusterWriteConflict(format!("{}: {}", what, response.message))
            }
            _ => SyncError::KubeError(error),
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
