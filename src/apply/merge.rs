// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Create-or-merge of a desired object onto the live one, with `kubectl apply` semantics:
//! top-level maps are merged one level deep, lists are replaced and top-level fields the
//! desired object no longer declares are pruned.

use crate::constants::{annotations::LAST_APPLIED_CONFIG, fields};
use crate::error::Result;
use crate::kubernetes::ObjectStore;
use crate::types::UnstructuredObject;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

/// Shape of a field value, which decides how it merges
#[derive(Debug)]
enum FieldKind<'a> {
    Null,
    Scalar(&'a Value),
    List(&'a [Value]),
    Map(&'a Map<String, Value>),
}

impl<'a> From<&'a Value> for FieldKind<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => FieldKind::Null,
            Value::Array(items) => FieldKind::List(items),
            Value::Object(map) => FieldKind::Map(map),
            scalar => FieldKind::Scalar(scalar),
        }
    }
}

/// A top-level field of the desired object, captured before merging
#[derive(Clone, Debug)]
struct FieldSnapshot {
    name: String,
    value: Value,
}

/// What happened to the object on the server
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyVerb {
    Created,
    Updated,
    Unchanged,
}

impl ApplyVerb {
    pub fn as_str(self) -> &'static str {
        match self {
            ApplyVerb::Created => "created",
            ApplyVerb::Updated => "updated",
            ApplyVerb::Unchanged => "unchanged",
        }
    }
}

impl std::fmt::Display for ApplyVerb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of applying one object
#[derive(Clone, Debug)]
pub struct ApplyOutcome {
    /// The object as persisted by the server
    pub object: UnstructuredObject,
    pub verb: ApplyVerb,
    /// `<Kind><.group>/<name> <verb>`
    pub message: String,
}

fn result_message(obj: &UnstructuredObject, verb: ApplyVerb) -> String {
    let group = obj.group();
    let name = obj.name().unwrap_or_default();
    if group.is_empty() {
        format!("{}/{} {}", obj.kind(), name, verb)
    } else {
        format!("{}.{}/{} {}", obj.kind(), group, name, verb)
    }
}

fn is_identity_field(name: &str) -> bool {
    name == fields::KIND || name == fields::API_VERSION
}

/// Stamp `obj` with its own serialization under the last-applied annotation
pub fn annotate_last_applied(obj: &mut UnstructuredObject) -> Result<()> {
    let serialized = serde_json::to_string(obj)?;
    obj.set_annotation(LAST_APPLIED_CONFIG, serialized);
    Ok(())
}

fn snapshot_fields(obj: &UnstructuredObject) -> Vec<FieldSnapshot> {
    obj.fields()
        .iter()
        .filter(|(name, _)| !is_identity_field(name))
        .map(|(name, value)| FieldSnapshot {
            name: name.clone(),
            value: value.clone(),
        })
        .collect()
}

/// Merge one desired field onto its live counterpart
fn merge_field(desired: &Value, live: Option<&Value>) -> Value {
    match (FieldKind::from(desired), live.map(FieldKind::from)) {
        (FieldKind::Map(desired), Some(FieldKind::Map(live))) => {
            let mut merged = live.clone();
            for (key, value) in desired {
                merged.insert(key.clone(), value.clone());
            }
            Value::Object(merged)
        }
        // Lists replace wholesale, and any other pairing lets the desired value win
        _ => desired.clone(),
    }
}

/// Write every snapshotted field into `live`, then drop live fields the snapshot does not name
fn merge_into_live(live: &mut UnstructuredObject, snapshot: &[FieldSnapshot]) {
    for field in snapshot {
        let merged = merge_field(&field.value, live.get(&field.name));
        live.insert(field.name.clone(), merged);
    }
    live.fields_mut()
        .retain(|name, _| is_identity_field(name) || snapshot.iter().any(|f| &f.name == name));
}

/// Create `desired` or merge it onto the live object and update it
#[instrument(skip(store, desired), fields(kind = %desired.kind(), name = ?desired.name()))]
pub async fn apply_object<S: ObjectStore + ?Sized>(
    store: &S,
    mut desired: UnstructuredObject,
    namespace_override: Option<&str>,
) -> Result<ApplyOutcome> {
    if let Some(namespace) = namespace_override {
        desired.set_namespace(namespace);
    }
    annotate_last_applied(&mut desired)?;
    let snapshot = snapshot_fields(&desired);
    let key = desired.key()?;

    let Some(mut live) = store.get(&key).await? else {
        debug!("{} does not exist, creating", key);
        let created = store.create(&desired).await?;
        return Ok(ApplyOutcome {
            message: result_message(&desired, ApplyVerb::Created),
            object: created,
            verb: ApplyVerb::Created,
        });
    };

    let before = live.clone();
    merge_into_live(&mut live, &snapshot);
    let verb = if live == before {
        ApplyVerb::Unchanged
    } else {
        ApplyVerb::Updated
    };

    let updated = store.update(&live).await?;
    Ok(ApplyOutcome {
        message: result_message(&desired, verb),
        object: updated,
        verb,
    })
}
