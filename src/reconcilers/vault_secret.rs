// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! VaultSecret reconciler - drives the sync engine from the kube-runtime controller.

use crate::config::Config;
use crate::constants::retry::ERROR_POLICY_REQUEUE;
use crate::error::{Result, SyncError};
use crate::kubernetes::KubeCluster;
use crate::store::VaultConnector;
use crate::sync::{reconcile_request, ReconcileReport};
use crate::types::VaultSecret;
use futures::StreamExt;
use k8s_openapi::api::core::v1::Secret;
use kube::{
    runtime::{
        controller::{self, Action},
        predicates, reflector, watcher, Controller, WatchStreamExt,
    },
    Api, Client, ResourceExt,
};
use kube_runtime::watcher::Config as WatcherConfig;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Shared state handed to every reconcile invocation
pub struct Context {
    cluster: KubeCluster,
    connector: VaultConnector,
}

pub struct VaultSecretReconciler {
    client: Client,
    config: Config,
}

impl VaultSecretReconciler {
    pub fn new(client: Client, config: Config) -> Self {
        Self { client, config }
    }

    fn api<K>(&self) -> Api<K>
    where
        K: kube::Resource<Scope = k8s_openapi::NamespaceResourceScope>,
        K::DynamicType: Default,
    {
        match &self.config.watch_namespace {
            Some(ns) => Api::namespaced(self.client.clone(), ns),
            None => Api::all(self.client.clone()),
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let requests: Api<VaultSecret> = self.api();
        let secrets: Api<Secret> = self.api();

        let context = Arc::new(Context {
            cluster: KubeCluster::new(self.client.clone()),
            connector: VaultConnector::new(self.config.vault_request_timeout)?,
        });

        // Status writes do not bump the generation, so they never retrigger a pass
        let (reader, writer) = reflector::store();
        let trigger = watcher(requests, WatcherConfig::default())
            .default_backoff()
            .reflect(writer)
            .applied_objects()
            .predicate_filter(predicates::generation);

        info!(
            "Starting VaultSecret controller (concurrency {})",
            self.config.max_concurrent_reconciles
        );

        Controller::for_stream(trigger, reader)
            .owns(secrets, WatcherConfig::default())
            .with_config(controller::Config::default().concurrency(self.config.max_concurrent_reconciles))
            .shutdown_on_signal()
            .run(reconcile, error_policy, context)
            .for_each(|res| async move {
                match res {
                    Ok(o) => debug!("Reconciled VaultSecret: {:?}", o),
                    Err(e) => warn!("Reconciliation error: {:?}", e),
                }
            })
            .await;

        info!("VaultSecret controller stopped");
        Ok(())
    }
}

async fn reconcile(request: Arc<VaultSecret>, ctx: Arc<Context>) -> Result<Action> {
    let name = request.name_any();
    let namespace = request
        .namespace()
        .ok_or(SyncError::MissingObjectKey(".metadata.namespace"))?;

    let report = reconcile_request(&ctx.cluster, &ctx.connector, &namespace, &name).await?;
    Ok(action_for(&report))
}

/// Scheduler action for a finished pass
fn action_for(report: &ReconcileReport) -> Action {
    match report.requeue_after {
        Some(delay) => Action::requeue(delay),
        None => Action::await_change(),
    }
}

fn error_policy(request: Arc<VaultSecret>, error: &SyncError, _ctx: Arc<Context>) -> Action {
    error!(
        "Reconciliation of VaultSecret {}/{} failed: {}",
        request.namespace().unwrap_or_default(),
        request.name_any(),
        error
    );
    Action::requeue(ERROR_POLICY_REQUEUE)
}
