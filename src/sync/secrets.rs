// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Idempotent create-or-update of the target Secret

use crate::error::{Result, SyncError};
use crate::kubernetes::SecretApi;
use crate::store::SecretData;
use crate::types::VaultSecret;
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::ByteString;
use kube::{api::ObjectMeta, Resource, ResourceExt};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

const SECRET_TYPE_OPAQUE: &str = "Opaque";

/// What applying the target Secret did during this pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Created,
    Updated,
    Unchanged,
}

impl SyncOutcome {
    /// Whether the Secret content changed and dependents should be restarted
    pub fn changed(self) -> bool {
        matches!(self, SyncOutcome::Created | SyncOutcome::Updated)
    }
}

/// Desired state of one target Secret
#[derive(Debug)]
pub struct DesiredSecret<'a> {
    pub name: &'a str,
    pub namespace: &'a str,
    pub data: &'a SecretData,
    /// Digest of `data`
    pub digest: &'a str,
    /// Digest recorded in status by the last successful pass
    pub recorded_digest: &'a str,
}

/// Create the Secret if missing, overwrite its data if the digest moved, otherwise leave it alone
#[instrument(skip_all, fields(secret = %format!("{}/{}", desired.namespace, desired.name)))]
pub async fn apply_secret(
    api: &impl SecretApi,
    owner: &VaultSecret,
    desired: &DesiredSecret<'_>,
) -> Result<SyncOutcome> {
    debug!(
        "Hash comparison: old={} new={} changed={}",
        desired.recorded_digest,
        desired.digest,
        desired.recorded_digest != desired.digest
    );

    match api.get_secret(desired.namespace, desired.name).await? {
        None => {
            let secret = new_secret(owner, desired)?;
            api.create_secret(desired.namespace, &secret).await?;
            info!("Created Secret {}/{}", desired.namespace, desired.name);
            Ok(SyncOutcome::Created)
        }
        Some(mut existing) if desired.recorded_digest != desired.digest => {
            existing.data = Some(to_bytes(desired.data));
            existing.string_data = None;
            existing.type_ = Some(SECRET_TYPE_OPAQUE.to_string());
            api.replace_secret(desired.namespace, &existing).await?;
            info!("Updated Secret {}/{}", desired.namespace, desired.name);
            Ok(SyncOutcome::Updated)
        }
        Some(_) => {
            info!(
                "Secret data unchanged, skipping update for {}/{}",
                desired.namespace, desired.name
            );
            Ok(SyncOutcome::Unchanged)
        }
    }
}

fn new_secret(owner: &VaultSecret, desired: &DesiredSecret<'_>) -> Result<Secret> {
    let owner_references = if owner.namespace().as_deref() == Some(desired.namespace) {
        let owner_ref = owner
            .controller_owner_ref(&())
            .ok_or(SyncError::MissingObjectKey(".metadata.uid"))?;
        Some(vec![owner_ref])
    } else {
        warn!(
            "Secret {}/{} lives outside the VaultSecret's namespace, it will not be garbage collected",
            desired.namespace, desired.name
        );
        None
    };

    Ok(Secret {
        metadata: ObjectMeta {
            name: Some(desired.name.to_string()),
            namespace: Some(desired.namespace.to_string()),
            owner_references,
            ..Default::default()
        },
        data: Some(to_bytes(desired.data)),
        type_: Some(SECRET_TYPE_OPAQUE.to_string()),
        ..Default::default()
    })
}

fn to_bytes(data: &SecretData) -> BTreeMap<String, ByteString> {
    data.iter()
        .map(|(k, v)| (k.clone(), ByteString(v.as_bytes().to_vec())))
        .collect()
}
