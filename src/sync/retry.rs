// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Retry counter and exponential backoff.

use crate::constants::retry::{BASE_BACKOFF, MAX_BACKOFF, MAX_EXPONENT, MAX_RETRIES};
use std::time::Duration;

/// Retry counter after one more failure, saturating at MAX_RETRIES
pub fn next_retry_count(current: u32) -> u32 {
    current.saturating_add(1).min(MAX_RETRIES)
}

/// Delay before retrying after `retry_count` consecutive failures.
///
/// `10s * 2^min(retry_count - 1, 8)`, never below 10s and never above
/// `min(sync_interval, 5m)`.
pub fn backoff(retry_count: u32, sync_interval: Duration) -> Duration {
    let exponent = retry_count.saturating_sub(1).min(MAX_EXPONENT);
    let delay = BASE_BACKOFF * 2u32.pow(exponent);

    delay
        .max(BASE_BACKOFF)
        .min(sync_interval)
        .min(MAX_BACKOFF)
}
