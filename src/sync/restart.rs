// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Rollout of the Deployment consuming the synced Secret

use crate::constants::annotations;
use crate::error::{Result, SyncError};
use crate::kubernetes::WorkloadApi;
use chrono::{SecondsFormat, Utc};
use tracing::{info, instrument};

/// Bump the restart annotation on the Deployment's pod template so it rolls out new pods
#[instrument(skip(api))]
pub async fn restart_deployment(api: &impl WorkloadApi, namespace: &str, name: &str) -> Result<()> {
    let mut deployment = api
        .get_deployment(namespace, name)
        .await?
        .ok_or_else(|| SyncError::ClusterNotFound(format!("Deployment {}/{}", namespace, name)))?;

    let restarted_at = Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true);

    deployment
        .spec
        .get_or_insert_with(Default::default)
        .template
        .metadata
        .get_or_insert_with(Default::default)
        .annotations
        .get_or_insert_with(Default::default)
        .insert(annotations::RESTARTED_AT.to_string(), restarted_at);

    api.replace_deployment(namespace, &deployment).await?;

    info!("Restarted Deployment {}/{}", namespace, name);
    Ok(())
}
