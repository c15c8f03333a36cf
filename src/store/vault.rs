// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Minimal Vault HTTP client for reading KV v1 and KV v2 secrets

use crate::error::{Result, SyncError};
use crate::store::{SecretData, SecretStore, StoreConnector, StoreEndpoint};
use async_trait::async_trait;
use http::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const TOKEN_HEADER: &str = "X-Vault-Token";

/// Creates Vault clients sharing one HTTP connection pool
#[derive(Clone, Debug)]
pub struct VaultConnector {
    http: reqwest::Client,
}

impl VaultConnector {
    pub fn new(request_timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| SyncError::InvalidStoreEndpoint(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { http })
    }
}

impl StoreConnector for VaultConnector {
    fn connect(&self, endpoint: &StoreEndpoint) -> Result<Box<dyn SecretStore>> {
        Ok(Box::new(VaultClient::new(
            self.http.clone(),
            &endpoint.url,
            &endpoint.token,
        )?))
    }
}

/// Client bound to a single Vault address and token
pub struct VaultClient {
    http: reqwest::Client,
    address: Url,
    token: String,
}

impl std::fmt::Debug for VaultClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultClient")
            .field("address", &self.address.as_str())
            .finish_non_exhaustive()
    }
}

impl VaultClient {
    pub fn new(http: reqwest::Client, address: &str, token: &str) -> Result<Self> {
        let address = Url::parse(address)
            .map_err(|e| SyncError::InvalidStoreEndpoint(format!("{}: {}", address, e)))?;

        if !matches!(address.scheme(), "http" | "https") {
            return Err(SyncError::InvalidStoreEndpoint(format!(
                "unsupported scheme '{}' in {}",
                address.scheme(),
                address
            )));
        }

        Ok(Self {
            http,
            address,
            token: token.to_string(),
        })
    }

    /// URL of the logical read endpoint for `path`
    pub fn read_url(&self, path: &str) -> Result<Url> {
        let base = self.address.as_str().trim_end_matches('/');
        let path = path.trim_matches('/');
        Url::parse(&format!("{}/v1/{}", base, path))
            .map_err(|e| SyncError::InvalidStoreEndpoint(format!("{}: {}", path, e)))
    }
}

#[async_trait]
impl SecretStore for VaultClient {
    #[instrument(skip(self), fields(vault = %self.address))]
    async fn read(&self, path: &str) -> Result<SecretData> {
        let url = self.read_url(path)?;

        let response = self
            .http
            .get(url)
            .header(TOKEN_HEADER, &self.token)
            .send()
            .await
            .map_err(|e| SyncError::StoreUnreachable(format!("failed to read secret from vault: {}", e)))?;

        let status = response.status();
        debug!("Vault responded with {}", status);

        match status {
            StatusCode::NOT_FOUND | StatusCode::NO_CONTENT => {
                return Err(SyncError::StoreNotFound(path.to_string()))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(SyncError::StoreUnauthorized(format!(
                    "permission denied reading {}",
                    path
                )))
            }
            s if !s.is_success() => {
                return Err(SyncError::StoreUnreachable(format!(
                    "vault returned {} for {}",
                    s, path
                )))
            }
            _ => {}
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SyncError::StoreUnreachable(format!("invalid vault response: {}", e)))?;

        extract_secret_data(path, body)
    }
}

/// Pull the key/value map out of a Vault logical read response.
///
/// KV v2 nests the secret under `data.data`, KV v1 returns it directly under `data`.
pub fn extract_secret_data(path: &str, body: Value) -> Result<SecretData> {
    let Some(Value::Object(mut data)) = body.get("data").cloned() else {
        return Err(SyncError::StoreNotFound(path.to_string()));
    };

    let nested = match data.get_mut("data") {
        Some(Value::Object(nested)) => Some(std::mem::take(nested)),
        _ => None,
    };
    if let Some(nested) = nested {
        data = nested;
    }

    Ok(data
        .into_iter()
        .map(|(k, v)| {
            let value = match v {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (k, value)
        })
        .collect())
}
