// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Change detection for secret payloads.

use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// SHA-256 over the payload, hex encoded.
///
/// Keys are fed in ascending order, each followed by its value, so the digest
/// only depends on content and never on the map's iteration order.
pub fn secret_digest(data: &HashMap<String, String>) -> String {
    let mut keys: Vec<&String> = data.keys().collect();
    keys.sort();

    let mut hasher = Sha256::new();
    for k in keys {
        hasher.update(k.as_bytes());
        hasher.update(data[k].as_bytes());
    }
    hex::encode(hasher.finalize())
}
