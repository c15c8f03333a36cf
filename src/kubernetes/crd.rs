// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Block startup until a custom resource is served by the API server

use crate::constants::crd::{POLL_INTERVAL_SECS, POLL_MAX_INTERVAL_SECS};
use crate::error::Result;
use kube::{discovery::Discovery, Client, Resource};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// Poll discovery until `K` is served, doubling the wait between attempts.
pub async fn wait_for_crd<K>(client: &Client) -> Result<()>
where
    K: Resource<DynamicType = ()>,
{
    let resource = format!("{} ({})", K::kind(&()), K::api_version(&()));
    let mut wait = POLL_INTERVAL_SECS;

    loop {
        match is_served::<K>(client).await {
            Ok(true) => {
                info!("{} is served", resource);
                return Ok(());
            }
            Ok(false) => info!("{} not served yet, retrying in {}s", resource, wait),
            Err(e) => warn!("Discovery of {} failed: {}, retrying in {}s", resource, e, wait),
        }

        sleep(Duration::from_secs(wait)).await;
        wait = next_poll_interval(wait);
    }
}

fn next_poll_interval(wait: u64) -> u64 {
    (wait * 2).min(POLL_MAX_INTERVAL_SECS)
}

async fn is_served<K>(client: &Client) -> Result<bool>
where
    K: Resource<DynamicType = ()>,
{
    let group = K::group(&());
    let version = K::version(&());
    let kind = K::kind(&());

    let discovery = Discovery::new(client.clone())
        .filter(&[group.as_ref()])
        .run()
        .await?;

    Ok(discovery
        .get(&group)
        .map(|g| {
            g.recommended_resources()
                .iter()
                .any(|(ar, _)| ar.kind == kind && ar.version == version)
        })
        .unwrap_or(false))
}
