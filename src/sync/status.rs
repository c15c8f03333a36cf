// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Assembly of the persisted VaultSecret status.
//!
//! Every function here is pure: it takes the status snapshot read at the
//! start of the pass and returns the next one, which the caller writes once.

use crate::constants::conditions::{READY, SYNCED_MESSAGE, SYNCED_REASON};
use crate::constants::retry::MAX_RETRIES;
use crate::error::SyncError;
use crate::types::{Condition, VaultSecretStatus};
use chrono::{DateTime, SecondsFormat, Utc};

/// Step of a reconcile pass, reported as the condition reason when it fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ConfigResolution,
    ClientCreation,
    SecretFetch,
    SecretApply,
    DeploymentRestart,
}

impl Stage {
    pub fn reason(self) -> &'static str {
        match self {
            Stage::ConfigResolution => "VaultConfigResolutionFailed",
            Stage::ClientCreation => "VaultClientCreationFailed",
            Stage::SecretFetch => "VaultSecretFetchFailed",
            Stage::SecretApply => "SecretApplyFailed",
            Stage::DeploymentRestart => "DeploymentRestartFailed",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.reason())
    }
}

fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// The single Ready condition, keeping the previous transition time when the status did not flip
fn ready_condition(
    previous: &VaultSecretStatus,
    ready: bool,
    reason: &str,
    message: String,
    now: DateTime<Utc>,
) -> Condition {
    let status = if ready { "True" } else { "False" };

    let last_transition_time = previous
        .conditions
        .iter()
        .find(|c| c.condition_type == READY && c.status == status)
        .map(|c| c.last_transition_time.clone())
        .unwrap_or_else(|| timestamp(now));

    Condition {
        condition_type: READY.to_string(),
        status: status.to_string(),
        reason: reason.to_string(),
        message,
        last_transition_time,
    }
}

/// Status after a fully successful pass
pub fn success_status(
    previous: &VaultSecretStatus,
    digest: &str,
    generation: Option<i64>,
    now: DateTime<Utc>,
) -> VaultSecretStatus {
    VaultSecretStatus {
        last_sync_time: Some(timestamp(now)),
        secret_hash: digest.to_string(),
        retry_count: 0,
        last_error: String::new(),
        conditions: vec![ready_condition(
            previous,
            true,
            SYNCED_REASON,
            SYNCED_MESSAGE.to_string(),
            now,
        )],
        observed_generation: generation,
    }
}

/// Status after a pass that failed at `stage`; sync time and digest stay as they were
pub fn failure_status(
    previous: &VaultSecretStatus,
    stage: Stage,
    error: &SyncError,
    retry_count: u32,
    generation: Option<i64>,
    now: DateTime<Utc>,
) -> VaultSecretStatus {
    let message = format!("Retry {} (max {}): {}", retry_count, MAX_RETRIES, error);

    VaultSecretStatus {
        last_sync_time: previous.last_sync_time.clone(),
        secret_hash: previous.secret_hash.clone(),
        retry_count,
        last_error: error.to_string(),
        conditions: vec![ready_condition(previous, false, stage.reason(), message, now)],
        observed_generation: generation,
    }
}
