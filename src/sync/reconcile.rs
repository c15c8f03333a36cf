// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! One reconcile pass for a single VaultSecret.
//!
//! The pass reads the VaultSecret fresh, runs resolve → fetch → digest →
//! apply → restart, and persists the resulting status as its last action.
//! Failures of any step are folded into the status and turned into a
//! backoff delay; only a failed status write is returned as an error.

use crate::error::{Result, SyncError};
use crate::kubernetes::ClusterApi;
use crate::store::StoreConnector;
use crate::sync::digest::secret_digest;
use crate::sync::interval::sync_interval;
use crate::sync::resolver::resolve_endpoint;
use crate::sync::restart::restart_deployment;
use crate::sync::retry::{backoff, next_retry_count};
use crate::sync::secrets::{apply_secret, DesiredSecret, SyncOutcome};
use crate::sync::status::{failure_status, success_status, Stage};
use crate::types::{VaultSecret, VaultSecretStatus};
use chrono::Utc;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// What a pass ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassResult {
    /// The VaultSecret no longer exists
    Deleted,
    Synced { outcome: SyncOutcome, restarted: bool },
    Failed { stage: Stage, retry_count: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    pub result: PassResult,
    /// When to run the next pass, `None` to wait for the next change
    pub requeue_after: Option<Duration>,
}

struct StageError {
    stage: Stage,
    error: SyncError,
}

fn at(stage: Stage) -> impl FnOnce(SyncError) -> StageError {
    move |error| StageError { stage, error }
}

/// Reconcile the VaultSecret `namespace/name`
#[instrument(skip(cluster, connector))]
pub async fn reconcile_request<C, S>(
    cluster: &C,
    connector: &S,
    namespace: &str,
    name: &str,
) -> Result<ReconcileReport>
where
    C: ClusterApi,
    S: StoreConnector,
{
    let Some(request) = cluster.get_request(namespace, name).await? else {
        info!("VaultSecret not found, ignoring since object must be deleted");
        return Ok(ReconcileReport {
            result: PassResult::Deleted,
            requeue_after: None,
        });
    };

    let interval = sync_interval(request.spec.sync_interval.as_deref());
    let previous = request.current_status();

    match sync_once(cluster, connector, &request, &previous).await {
        Ok((digest, outcome, restarted)) => {
            let status = success_status(&previous, &digest, request.metadata.generation, Utc::now());
            persist(cluster, &request, &status).await?;

            if previous.retry_count > 0 && !request.is_ready() {
                info!("Recovered after {} failed attempts", previous.retry_count);
            }
            info!("Secret synced successfully, requeueing in {:?}", interval);

            Ok(ReconcileReport {
                result: PassResult::Synced { outcome, restarted },
                requeue_after: Some(interval),
            })
        }
        Err(StageError { stage, error }) => {
            let retry_count = next_retry_count(previous.retry_count);
            let delay = backoff(retry_count, interval);
            let status = failure_status(
                &previous,
                stage,
                &error,
                retry_count,
                request.metadata.generation,
                Utc::now(),
            );
            persist(cluster, &request, &status).await?;

            warn!(
                "{} (retry {}), retrying in {:?}: {}",
                stage, retry_count, delay, error
            );

            Ok(ReconcileReport {
                result: PassResult::Failed { stage, retry_count },
                requeue_after: Some(delay),
            })
        }
    }
}

async fn sync_once<C, S>(
    cluster: &C,
    connector: &S,
    request: &VaultSecret,
    previous: &VaultSecretStatus,
) -> std::result::Result<(String, SyncOutcome, bool), StageError>
where
    C: ClusterApi,
    S: StoreConnector,
{
    let endpoint = resolve_endpoint(request, cluster)
        .await
        .map_err(at(Stage::ConfigResolution))?;

    let store = connector
        .connect(&endpoint)
        .map_err(at(Stage::ClientCreation))?;

    let data = store
        .read(&request.spec.vault_path)
        .await
        .map_err(at(Stage::SecretFetch))?;

    let digest = secret_digest(&data);
    let namespace = request.target_namespace();

    let outcome = apply_secret(
        cluster,
        request,
        &DesiredSecret {
            name: &request.spec.secret_name,
            namespace: &namespace,
            data: &data,
            digest: &digest,
            recorded_digest: &previous.secret_hash,
        },
    )
    .await
    .map_err(at(Stage::SecretApply))?;

    let mut restarted = false;
    if outcome.changed() {
        if let Some(deployment) = request.deployment_name() {
            restart_deployment(cluster, &namespace, deployment)
                .await
                .map_err(at(Stage::DeploymentRestart))?;
            restarted = true;
        }
    }

    Ok((digest, outcome, restarted))
}

async fn persist<C: ClusterApi>(
    cluster: &C,
    request: &VaultSecret,
    status: &VaultSecretStatus,
) -> Result<()> {
    cluster
        .persist_status(request, status)
        .await
        .map_err(|e| match e {
            SyncError::StatusPersistFailure(_) => e,
            other => SyncError::StatusPersistFailure(other.to_string()),
        })
}
