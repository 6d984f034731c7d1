// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use crate::error::{Result, VzError};
use crate::kubernetes::{Cascade, ObjectStore};
use crate::types::{ObjectKey, UnstructuredObject};
use async_trait::async_trait;
use http::{Request, Response};
use kube::client::Body;
use kube::error::ErrorResponse;
use kube::Client;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A request seen by [`MockService`]
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: Value,
}

/// A mock HTTP service that returns predefined responses based on request paths.
/// Clones share their routes and request log.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
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

    /// Add a response for POST requests matching the exact path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on("POST", path, status, body)
    }

    /// Add a response for PUT requests matching the exact path
    pub fn on_put(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PUT", path, status, body)
    }

    /// Add a response for DELETE requests matching the exact path
    pub fn on_delete(self, path: &str, status: u16, body: &str) -> Self {
        self.on("DELETE", path, status, body)
    }

    /// Add a response for PATCH requests matching the exact path
    pub fn on_patch(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PATCH", path, status, body)
    }

    /// Every request received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests received with the given HTTP method
    pub fn requests_with(&self, method: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method)
            .collect()
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

        let response = self.find_response(&method, &path);
        let requests = self.requests.clone();

        Box::pin(async move {
            let bytes = req.into_body().collect_bytes().await?;
            let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            requests.lock().unwrap().push(RecordedRequest {
                method,
                path: path.clone(),
                body,
            });

            let (status, body) = response.unwrap_or_else(|| (404, not_found_json("resource", &path)));
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Discovery document for the core v1 group, serving ConfigMaps and Namespaces
pub fn core_v1_resources_json() -> String {
    serde_json::json!({
        "kind": "APIResourceList",
        "apiVersion": "v1",
        "groupVersion": "v1",
        "resources": [
            {
                "name": "configmaps",
                "singularName": "configmap",
                "namespaced": true,
                "kind": "ConfigMap",
                "verbs": ["create", "delete", "get", "list", "patch", "update", "watch"]
            },
            {
                "name": "namespaces",
                "singularName": "namespace",
                "namespaced": false,
                "kind": "Namespace",
                "verbs": ["create", "delete", "get", "list", "patch", "update", "watch"]
            }
        ]
    })
    .to_string()
}

/// Create a mock ConfigMap JSON response
pub fn configmap_json(name: &str, namespace: &str) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "ConfigMap",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "uid": "test-uid",
            "resourceVersion": "1"
        },
        "data": {"key": "value"}
    })
    .to_string()
}

/// Create a mock Namespace JSON response
pub fn namespace_json(name: &str) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "Namespace",
        "metadata": {
            "name": name,
            "uid": "test-uid",
            "resourceVersion": "1"
        }
    })
    .to_string()
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

fn api_error(code: u16, reason: &str, message: String) -> VzError {
    VzError::KubeError(kube::Error::Api(ErrorResponse {
        status: "Failure".to_string(),
        message,
        reason: reason.to_string(),
        code,
    }))
}

/// In-memory [`ObjectStore`] with API server semantics for create/update/delete
#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<BTreeMap<ObjectKey, UnstructuredObject>>,
    failing: Mutex<HashSet<String>>,
    deletions: Mutex<Vec<(ObjectKey, Cascade)>>,
    creates: Mutex<usize>,
    updates: Mutex<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a live object directly, bypassing the create counter
    pub fn seed(&self, obj: UnstructuredObject) {
        let key = obj.key().unwrap();
        self.objects.lock().unwrap().insert(key, obj);
    }

    /// Make every write to objects with this name fail with a 500
    pub fn fail_on(&self, name: &str) {
        self.failing.lock().unwrap().insert(name.to_string());
    }

    pub fn object(
        &self,
        api_version: &str,
        kind: &str,
        namespace: Option<&str>,
        name: &str,
    ) -> Option<UnstructuredObject> {
        let key = ObjectKey {
            api_version: api_version.to_string(),
            kind: kind.to_string(),
            namespace: namespace.map(str::to_string),
            name: name.to_string(),
        };
        self.objects.lock().unwrap().get(&key).cloned()
    }

    pub fn contains(&self, api_version: &str, kind: &str, namespace: Option<&str>, name: &str) -> bool {
        self.object(api_version, kind, namespace, name).is_some()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn create_count(&self) -> usize {
        *self.creates.lock().unwrap()
    }

    pub fn update_count(&self) -> usize {
        *self.updates.lock().unwrap()
    }

    pub fn deletions(&self) -> Vec<(ObjectKey, Cascade)> {
        self.deletions.lock().unwrap().clone()
    }

    fn check_failure(&self, key: &ObjectKey) -> Result<()> {
        if self.failing.lock().unwrap().contains(&key.name) {
            return Err(api_error(500, "InternalError", format!("injected failure for {}", key)));
        }
        Ok(())
    }
}

fn set_metadata(obj: &mut UnstructuredObject, field: &str, value: &str) {
    if let Some(Value::Object(metadata)) = obj.fields_mut().get_mut("metadata") {
        metadata.insert(field.to_string(), Value::String(value.to_string()));
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn get(&self, key: &ObjectKey) -> Result<Option<UnstructuredObject>> {
        Ok(self.objects.lock().unwrap().get(key).cloned())
    }

    async fn create(&self, obj: &UnstructuredObject) -> Result<UnstructuredObject> {
        let key = obj.key()?;
        self.check_failure(&key)?;
        let mut objects = self.objects.lock().unwrap();
        if objects.contains_key(&key) {
            return Err(api_error(409, "AlreadyExists", format!("{} already exists", key)));
        }
        let mut stored = obj.clone();
        set_metadata(&mut stored, "uid", &format!("uid-{}", key.name));
        set_metadata(&mut stored, "resourceVersion", "1");
        objects.insert(key, stored.clone());
        *self.creates.lock().unwrap() += 1;
        Ok(stored)
    }

    async fn update(&self, obj: &UnstructuredObject) -> Result<UnstructuredObject> {
        let key = obj.key()?;
        self.check_failure(&key)?;
        let mut objects = self.objects.lock().unwrap();
        let Some(current) = objects.get(&key) else {
            return Err(api_error(404, "NotFound", format!("{} not found", key)));
        };
        let version: u64 = current
            .get("metadata")
            .and_then(|m| m.get("resourceVersion"))
            .and_then(Value::as_str)
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        let mut stored = obj.clone();
        set_metadata(&mut stored, "resourceVersion", &(version + 1).to_string());
        objects.insert(key, stored.clone());
        *self.updates.lock().unwrap() += 1;
        Ok(stored)
    }

    async fn delete(&self, key: &ObjectKey, cascade: Cascade) -> Result<()> {
        self.check_failure(key)?;
        if self.objects.lock().unwrap().remove(key).is_none() {
            return Err(api_error(404, "NotFound", format!("{} not found", key)));
        }
        self.deletions.lock().unwrap().push((key.clone(), cascade));
        Ok(())
    }
}
