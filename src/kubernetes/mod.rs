// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes access: the collaborator traits used by the sync engine, their
//! kube-backed implementation, and CRD discovery.

pub mod api;
pub mod client;
pub mod crd;

pub use api::{ClusterApi, ConfigLookup, RequestApi, SecretApi, WorkloadApi};
pub use client::KubeCluster;
pub use crd::wait_for_crd;
