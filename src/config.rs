// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

const DEFAULT_MAX_CONCURRENT_RECONCILES: u16 = 10;
const DEFAULT_VAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Operator configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Upper bound on VaultSecrets reconciled in parallel
    pub max_concurrent_reconciles: u16,
    /// Timeout applied to every Vault HTTP request
    pub vault_request_timeout: Duration,
    /// Restrict the controller to a single namespace, watches all namespaces when unset
    pub watch_namespace: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let max_concurrent_reconciles = match lookup("MAX_CONCURRENT_RECONCILES") {
            Some(v) => v
                .parse()
                .with_context(|| format!("MAX_CONCURRENT_RECONCILES is not a number: {}", v))?,
            None => DEFAULT_MAX_CONCURRENT_RECONCILES,
        };

        let timeout_secs = match lookup("VAULT_REQUEST_TIMEOUT_SECS") {
            Some(v) => v
                .parse()
                .with_context(|| format!("VAULT_REQUEST_TIMEOUT_SECS is not a number: {}", v))?,
            None => DEFAULT_VAULT_REQUEST_TIMEOUT_SECS,
        };

        let watch_namespace = lookup("WATCH_NAMESPACE").filter(|ns| !ns.is_empty());

        Ok(Config {
            max_concurrent_reconciles,
            vault_request_timeout: Duration::from_secs(timeout_secs),
            watch_namespace,
        })
    }
}
