// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Access to live objects on the API server.

use crate::error::{Result, VzError};
use crate::types::{ObjectKey, UnstructuredObject};
use async_trait::async_trait;
use kube::{
    api::{ApiResource, DeleteParams, DynamicObject, PostParams},
    core::GroupVersionKind,
    discovery::{pinned_kind, ApiCapabilities, Scope},
    Api, Client,
};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// How dependents of a deleted object are treated
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cascade {
    /// Dependents survive the owner
    Orphan,
    /// Dependents are garbage collected asynchronously
    #[default]
    Background,
}

impl Cascade {
    pub fn as_str(self) -> &'static str {
        match self {
            Cascade::Orphan => "orphan",
            Cascade::Background => "background",
        }
    }

    fn delete_params(self) -> DeleteParams {
        match self {
            Cascade::Orphan => DeleteParams::orphan(),
            Cascade::Background => DeleteParams::background(),
        }
    }
}

impl FromStr for Cascade {
    type Err = VzError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "orphan" => Ok(Cascade::Orphan),
            "background" => Ok(Cascade::Background),
            other => Err(VzError::IllegalConfiguration(format!(
                "unknown delete cascade {:?}, expected orphan or background",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Cascade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Blocking round trips to wherever live objects are kept
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch the live object, `None` when it does not exist
    async fn get(&self, key: &ObjectKey) -> Result<Option<UnstructuredObject>>;

    async fn create(&self, obj: &UnstructuredObject) -> Result<UnstructuredObject>;

    /// Replace the live object with `obj`
    async fn update(&self, obj: &UnstructuredObject) -> Result<UnstructuredObject>;

    /// Delete the object. A missing object surfaces as a not-found error.
    async fn delete(&self, key: &ObjectKey, cascade: Cascade) -> Result<()>;
}

type Discovered = (ApiResource, ApiCapabilities);

/// [`ObjectStore`] backed by a Kubernetes API server
#[derive(Clone)]
pub struct KubeStore {
    client: Client,
    discovered: Arc<Mutex<HashMap<GroupVersionKind, Discovered>>>,
}

impl KubeStore {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            discovered: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Discovery result for a kind, looked up once per store
    async fn discover(&self, gvk: GroupVersionKind) -> Result<Discovered> {
        let mut discovered = self.discovered.lock().await;
        if let Some(found) = discovered.get(&gvk) {
            return Ok(found.clone());
        }
        debug!("Discovering {}/{} {}", gvk.group, gvk.version, gvk.kind);
        let found = pinned_kind(&self.client, &gvk).await?;
        discovered.insert(gvk, found.clone());
        Ok(found)
    }

    /// Resolve the key's kind through discovery and build a dynamic Api for it
    async fn api_for(&self, key: &ObjectKey) -> Result<Api<DynamicObject>> {
        let gvk = GroupVersionKind::gvk(key.group(), key.version(), &key.kind);
        let (resource, capabilities) = self.discover(gvk).await?;

        if capabilities.scope == Scope::Namespaced {
            let namespace = key.namespace.as_deref().unwrap_or("default");
            Ok(Api::namespaced_with(self.client.clone(), namespace, &resource))
        } else {
            Ok(Api::all_with(self.client.clone(), &resource))
        }
    }
}

fn to_dynamic(obj: &UnstructuredObject) -> Result<DynamicObject> {
    Ok(serde_json::from_value(obj.clone().into_value())?)
}

fn from_dynamic(obj: DynamicObject) -> Result<UnstructuredObject> {
    UnstructuredObject::from_value(serde_json::to_value(obj)?)
}

#[async_trait]
impl ObjectStore for KubeStore {
    #[instrument(skip(self), fields(object = %key))]
    async fn get(&self, key: &ObjectKey) -> Result<Option<UnstructuredObject>> {
        let api = self.api_for(key).await?;
        match api.get_opt(&key.name).await? {
            Some(obj) => Ok(Some(from_dynamic(obj)?)),
            None => {
                debug!("{} does not exist", key);
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, obj), fields(kind = %obj.kind(), name = ?obj.name()))]
    async fn create(&self, obj: &UnstructuredObject) -> Result<UnstructuredObject> {
        let api = self.api_for(&obj.key()?).await?;
        let created = api.create(&PostParams::default(), &to_dynamic(obj)?).await?;
        from_dynamic(created)
    }

    #[instrument(skip(self, obj), fields(kind = %obj.kind(), name = ?obj.name()))]
    async fn update(&self, obj: &UnstructuredObject) -> Result<UnstructuredObject> {
        let key = obj.key()?;
        let api = self.api_for(&key).await?;
        let updated = api
            .replace(&key.name, &PostParams::default(), &to_dynamic(obj)?)
            .await?;
        from_dynamic(updated)
    }

    #[instrument(skip(self), fields(object = %key))]
    async fn delete(&self, key: &ObjectKey, cascade: Cascade) -> Result<()> {
        let api = self.api_for(key).await?;
        api.delete(&key.name, &cascade.delete_params()).await?;
        Ok(())
    }
}
