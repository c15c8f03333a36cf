// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities: a mock HTTP backend for kube clients, and in-memory
//! fakes of the cluster and store collaborators.

use crate::error::{Result, SyncError};
use crate::kubernetes::{ConfigLookup, RequestApi, SecretApi, WorkloadApi};
use crate::store::{SecretData, SecretStore, StoreConnector, StoreEndpoint};
use crate::types::{VaultSecret, VaultSecretConfig, VaultSecretStatus};
use async_trait::async_trait;
use http::{Request, Response};
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Secret;
use kube::client::Body;
use kube::{Client, ResourceExt};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A mock HTTP service that returns predefined responses based on request paths.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    /// Add a response for PUT (replace) requests matching the exact path
    pub fn on_put(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PUT", path, status, body)
    }

    /// Add a response for PATCH requests matching the exact path
    pub fn on_patch(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PATCH", path, status, body)
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        self.responses
            .lock()
            .unwrap()
            .get(&(method.to_string(), path.to_string()))
            .cloned()
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = std::result::Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let (status, body) = self
            .find_response(&method, &path)
            .unwrap_or_else(|| (404, not_found_json("object", &path)));

        Box::pin(async move {
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} \"{}\" not found", resource, name),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}

/// Failure injected into one [`FakeCluster`] operation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FakeFailure {
    CreateSecret,
    ReplaceSecret,
    ReplaceDeployment,
    PersistStatus,
}

#[derive(Default)]
pub struct FakeClusterState {
    pub requests: HashMap<(String, String), VaultSecret>,
    pub configs: HashMap<(String, String), VaultSecretConfig>,
    pub secrets: HashMap<(String, String), Secret>,
    pub deployments: HashMap<(String, String), Deployment>,
    pub secret_creates: usize,
    pub secret_replaces: usize,
    pub deployment_replaces: usize,
    pub status_writes: usize,
    pub failures: Vec<FakeFailure>,
}

/// In-memory cluster keeping objects by (namespace, name).
///
/// Persisted status is written back onto the stored VaultSecret so the next
/// pass reads it fresh, as it would from the API server.
#[derive(Clone, Default)]
pub struct FakeCluster {
    pub state: Arc<Mutex<FakeClusterState>>,
}

fn key(namespace: &str, name: &str) -> (String, String) {
    (namespace.to_string(), name.to_string())
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request(self, request: VaultSecret) -> Self {
        let k = key(&request.namespace().unwrap_or_default(), &request.name_any());
        self.state.lock().unwrap().requests.insert(k, request);
        self
    }

    pub fn with_config(self, config: VaultSecretConfig) -> Self {
        let k = key(&config.namespace().unwrap_or_default(), &config.name_any());
        self.state.lock().unwrap().configs.insert(k, config);
        self
    }

    pub fn with_deployment(self, deployment: Deployment) -> Self {
        let k = key(&deployment.namespace().unwrap_or_default(), &deployment.name_any());
        self.state.lock().unwrap().deployments.insert(k, deployment);
        self
    }

    pub fn with_secret(self, secret: Secret) -> Self {
        let k = key(&secret.namespace().unwrap_or_default(), &secret.name_any());
        self.state.lock().unwrap().secrets.insert(k, secret);
        self
    }

    pub fn fail(&self, failure: FakeFailure) {
        self.state.lock().unwrap().failures.push(failure);
    }

    pub fn heal(&self) {
        self.state.lock().unwrap().failures.clear();
    }

    pub fn request(&self, namespace: &str, name: &str) -> VaultSecret {
        self.state.lock().unwrap().requests[&key(namespace, name)].clone()
    }

    pub fn status(&self, namespace: &str, name: &str) -> VaultSecretStatus {
        self.request(namespace, name).status.unwrap_or_default()
    }

    pub fn secret(&self, namespace: &str, name: &str) -> Option<Secret> {
        self.state.lock().unwrap().secrets.get(&key(namespace, name)).cloned()
    }

    pub fn deployment(&self, namespace: &str, name: &str) -> Option<Deployment> {
        self.state
            .lock()
            .unwrap()
            .deployments
            .get(&key(namespace, name))
            .cloned()
    }

    pub fn secret_writes(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.secret_creates + state.secret_replaces
    }

    pub fn status_writes(&self) -> usize {
        self.state.lock().unwrap().status_writes
    }

    pub fn deployment_replaces(&self) -> usize {
        self.state.lock().unwrap().deployment_replaces
    }

    fn failing(&self, failure: FakeFailure) -> bool {
        self.state.lock().unwrap().failures.contains(&failure)
    }
}

#[async_trait]
impl ConfigLookup for FakeCluster {
    async fn get_config(&self, namespace: &str, name: &str) -> Result<Option<VaultSecretConfig>> {
        Ok(self.state.lock().unwrap().configs.get(&key(namespace, name)).cloned())
    }
}

#[async_trait]
impl SecretApi for FakeCluster {
    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Option<Secret>> {
        Ok(self.secret(namespace, name))
    }

    async fn create_secret(&self, namespace: &str, secret: &Secret) -> Result<()> {
        if self.failing(FakeFailure::CreateSecret) {
            return Err(SyncError::ClusterWriteConflict("secret already exists".to_string()));
        }
        let mut state = self.state.lock().unwrap();
        state.secret_creates += 1;
        state.secrets.insert(key(namespace, &secret.name_any()), secret.clone());
        Ok(())
    }

    async fn replace_secret(&self, namespace: &str, secret: &Secret) -> Result<()> {
        if self.failing(FakeFailure::ReplaceSecret) {
            return Err(SyncError::ClusterWriteConflict("the object has been modified".to_string()));
        }
        let mut state = self.state.lock().unwrap();
        state.secret_replaces += 1;
        state.secrets.insert(key(namespace, &secret.name_any()), secret.clone());
        Ok(())
    }
}

#[async_trait]
impl WorkloadApi for FakeCluster {
    async fn get_deployment(&self, namespace: &str, name: &str) -> Result<Option<Deployment>> {
        Ok(self.deployment(namespace, name))
    }

    async fn replace_deployment(&self, namespace: &str, deployment: &Deployment) -> Result<()> {
        if self.failing(FakeFailure::ReplaceDeployment) {
            return Err(SyncError::ClusterWriteConflict("the object has been modified".to_string()));
        }
        let mut state = self.state.lock().unwrap();
        state.deployment_replaces += 1;
        state
            .deployments
            .insert(key(namespace, &deployment.name_any()), deployment.clone());
        Ok(())
    }
}

#[async_trait]
impl RequestApi for FakeCluster {
    async fn get_request(&self, namespace: &str, name: &str) -> Result<Option<VaultSecret>> {
        Ok(self.state.lock().unwrap().requests.get(&key(namespace, name)).cloned())
    }

    async fn persist_status(&self, request: &VaultSecret, status: &VaultSecretStatus) -> Result<()> {
        if self.failing(FakeFailure::PersistStatus) {
            return Err(SyncError::StatusPersistFailure("etcd unavailable".to_string()));
        }
        let mut state = self.state.lock().unwrap();
        state.status_writes += 1;
        let k = key(&request.namespace().unwrap_or_default(), &request.name_any());
        if let Some(stored) = state.requests.get_mut(&k) {
            stored.status = Some(status.clone());
        }
        Ok(())
    }
}

/// Outcome served by [`FakeStore`] for every read
#[derive(Clone, Debug)]
pub enum FakeRead {
    Data(SecretData),
    NotFound,
    Unauthorized,
    Unreachable,
}

/// In-memory store whose content can be changed between passes
#[derive(Clone)]
pub struct FakeStore {
    read: Arc<Mutex<FakeRead>>,
    pub reads: Arc<Mutex<Vec<(StoreEndpoint, String)>>>,
}

impl FakeStore {
    pub fn new(data: &[(&str, &str)]) -> Self {
        Self {
            read: Arc::new(Mutex::new(FakeRead::Data(secret_data(data)))),
            reads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set(&self, read: FakeRead) {
        *self.read.lock().unwrap() = read;
    }

    pub fn read_count(&self) -> usize {
        self.reads.lock().unwrap().len()
    }

    pub fn last_endpoint(&self) -> Option<StoreEndpoint> {
        self.reads.lock().unwrap().last().map(|(e, _)| e.clone())
    }
}

struct FakeStoreClient {
    endpoint: StoreEndpoint,
    store: FakeStore,
}

#[async_trait]
impl SecretStore for FakeStoreClient {
    async fn read(&self, path: &str) -> Result<SecretData> {
        self.store
            .reads
            .lock()
            .unwrap()
            .push((self.endpoint.clone(), path.to_string()));

        match self.store.read.lock().unwrap().clone() {
            FakeRead::Data(data) => Ok(data),
            FakeRead::NotFound => Err(SyncError::StoreNotFound(path.to_string())),
            FakeRead::Unauthorized => Err(SyncError::StoreUnauthorized("permission denied".to_string())),
            FakeRead::Unreachable => Err(SyncError::StoreUnreachable("connection refused".to_string())),
        }
    }
}

impl StoreConnector for FakeStore {
    fn connect(&self, endpoint: &StoreEndpoint) -> Result<Box<dyn SecretStore>> {
        if !endpoint.url.starts_with("http") {
            return Err(SyncError::InvalidStoreEndpoint(endpoint.url.clone()));
        }
        Ok(Box::new(FakeStoreClient {
            endpoint: endpoint.clone(),
            store: self.clone(),
        }))
    }
}

pub fn secret_data(pairs: &[(&str, &str)]) -> SecretData {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
