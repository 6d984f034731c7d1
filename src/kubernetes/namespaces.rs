// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Namespace management utilities

use crate::error::Result;
use crate::kubernetes::ObjectStore;
use crate::types::{ObjectKey, UnstructuredObject};
use serde_json::json;
use tracing::{debug, info, instrument};

/// Ensure a namespace exists in the cluster, create if it doesn't
#[instrument(skip(store))]
pub async fn ensure_namespace_exists<S: ObjectStore + ?Sized>(store: &S, namespace: &str) -> Result<()> {
    let key = ObjectKey {
        api_version: "v1".to_string(),
        kind: "Namespace".to_string(),
        namespace: None,
        name: namespace.to_string(),
    };

    if store.get(&key).await?.is_some() {
        debug!("Namespace {} already exists", namespace);
        return Ok(());
    }

    info!("Creating namespace {}", namespace);
    let ns = UnstructuredObject::from_value(json!({
        "apiVersion": "v1",
        "kind": "Namespace",
        "metadata": {"name": namespace}
    }))?;
    store.create(&ns).await?;
    info!("Namespace {} created successfully", namespace);
    Ok(())
}
