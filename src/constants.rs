// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// The operator name used as field manager for status patches
pub const OPERATOR_NAME: &str = "vaultsync";

/// Kubernetes annotation keys written by vaultsync
pub mod annotations {
    /// Pod template annotation bumped to force a Deployment rollout
    pub const RESTARTED_AT: &str = "vaultsync.geeko.me/restartedAt";
}

/// Sync interval bounds
pub mod interval {
    use std::time::Duration;

    pub const DEFAULT: Duration = Duration::from_secs(5 * 60);
    pub const MIN: Duration = Duration::from_secs(30);
    pub const MAX: Duration = Duration::from_secs(60 * 60);
}

/// Retry and backoff configuration
pub mod retry {
    use std::time::Duration;

    /// Retry counter never goes above this value
    pub const MAX_RETRIES: u32 = 20;
    /// Base backoff, doubled on every consecutive failure
    pub const BASE_BACKOFF: Duration = Duration::from_secs(10);
    /// Exponent cap, 10s * 2^8 = 2560s
    pub const MAX_EXPONENT: u32 = 8;
    /// No retry ever waits longer than this
    pub const MAX_BACKOFF: Duration = Duration::from_secs(5 * 60);
    /// Requeue delay used when the failure cannot be recorded in status
    pub const ERROR_POLICY_REQUEUE: Duration = Duration::from_secs(60);
}

/// Status condition type and reasons
pub mod conditions {
    pub const READY: &str = "Ready";
    pub const SYNCED_REASON: &str = "SecretSynced";
    pub const SYNCED_MESSAGE: &str = "Secret successfully synced from Vault";
}

/// CRD polling configuration
pub mod crd {
    /// Initial polling interval in seconds when waiting for CRD
    pub const POLL_INTERVAL_SECS: u64 = 10;
    /// Maximum polling interval in seconds (exponential backoff cap)
    pub const POLL_MAX_INTERVAL_SECS: u64 = 60;
}
