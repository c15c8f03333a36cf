// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Print the vaultsync CustomResourceDefinitions as a multi-document YAML stream

use anyhow::Result;
use kube::CustomResourceExt;
use vaultsync::types::{VaultSecret, VaultSecretConfig};

fn main() -> Result<()> {
    print!("{}", serde_yaml::to_string(&VaultSecret::crd())?);
    println!("---");
    print!("{}", serde_yaml::to_string(&VaultSecretConfig::crd())?);
    Ok(())
}
