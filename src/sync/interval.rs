// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Sync interval parsing and clamping.

use crate::constants::interval::{DEFAULT, MAX, MIN};
use std::time::Duration;
use tracing::warn;

/// Effective re-evaluation period for a requested interval string.
///
/// Empty or unparsable input falls back to 5 minutes, anything else is
/// clamped to `[30s, 1h]`.
pub fn sync_interval(requested: Option<&str>) -> Duration {
    let Some(requested) = requested.filter(|s| !s.is_empty()) else {
        return DEFAULT;
    };

    match parse_duration(requested) {
        Some(SignedDuration::Negative) => MIN,
        Some(SignedDuration::Positive(d)) => d.clamp(MIN, MAX),
        None => {
            warn!("Invalid sync interval '{}', using default {:?}", requested, DEFAULT);
            DEFAULT
        }
    }
}

#[derive(Debug, PartialEq)]
enum SignedDuration {
    Positive(Duration),
    Negative,
}

/// Parse a Go-style duration such as `300ms`, `1.5h` or `2h45m`
fn parse_duration(input: &str) -> Option<SignedDuration> {
    let (negative, mut rest) = match input.as_bytes().first()? {
        b'-' => (true, &input[1..]),
        b'+' => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Some(SignedDuration::Positive(Duration::ZERO));
    }
    if rest.is_empty() {
        return None;
    }

    let mut total_nanos: f64 = 0.0;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let number = &rest[..number_len];
        if number.is_empty() || number == "." {
            return None;
        }
        let value: f64 = number.parse().ok()?;
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let unit_nanos = match &rest[..unit_len] {
            "ns" => 1.0,
            "us" | "µs" | "μs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            "h" => 3600e9,
            _ => return None,
        };
        rest = &rest[unit_len..];

        total_nanos += value * unit_nanos;
    }

    // Durations are signed 64-bit nanosecond counts, larger totals are invalid
    if !total_nanos.is_finite() || total_nanos > i64::MAX as f64 {
        return None;
    }
    if negative && total_nanos > 0.0 {
        return Some(SignedDuration::Negative);
    }
    Some(SignedDuration::Positive(Duration::from_nanos(total_nanos as u64)))
}
