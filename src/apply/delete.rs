// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::error::Result;
use crate::kubernetes::{Cascade, ObjectStore};
use crate::types::UnstructuredObject;
use tracing::{debug, instrument};

/// Delete `obj` from the server. An object that is already gone counts as deleted.
#[instrument(skip(store, obj), fields(kind = %obj.kind(), name = ?obj.name()))]
pub async fn delete_object<S: ObjectStore + ?Sized>(
    store: &S,
    mut obj: UnstructuredObject,
    namespace_override: Option<&str>,
    cascade: Cascade,
) -> Result<()> {
    if let Some(namespace) = namespace_override {
        obj.set_namespace(namespace);
    }
    let key = obj.key()?;

    match store.delete(&key, cascade).await {
        Ok(()) => {
            debug!("Deleted {} ({})", key, cascade);
            Ok(())
        }
        Err(e) if e.is_not_found() => {
            debug!("{} already deleted", key);
            Ok(())
        }
        Err(e) => Err(e),
    }
}
