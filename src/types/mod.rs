// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Custom resources managed and consumed by vaultsync.

pub mod vault_secret;
pub mod vault_secret_config;

pub use vault_secret::{Condition, VaultSecret, VaultSecretSpec, VaultSecretStatus};
pub use vault_secret_config::{VaultSecretConfig, VaultSecretConfigSpec};
