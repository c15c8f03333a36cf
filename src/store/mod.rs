// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! External secret store access.

pub mod vault;

use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

pub use vault::{VaultClient, VaultConnector};

/// Key/value payload read from the store, iteration order is unspecified
pub type SecretData = HashMap<String, String>;

/// Resolved store endpoint and credential
#[derive(Clone, PartialEq, Eq)]
pub struct StoreEndpoint {
    pub url: String,
    pub token: String,
}

impl std::fmt::Debug for StoreEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreEndpoint")
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Path-keyed read access to a secret store
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Read the secret at `path`, failing with StoreNotFound, StoreUnauthorized or StoreUnreachable
    async fn read(&self, path: &str) -> Result<SecretData>;
}

/// Builds a store client for a resolved endpoint
pub trait StoreConnector: Send + Sync {
    fn connect(&self, endpoint: &StoreEndpoint) -> Result<Box<dyn SecretStore>>;
}
