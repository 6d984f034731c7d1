// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Generic keyed document representing one Kubernetes object.

use crate::constants::fields;
use crate::error::{Result, VzError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A Kubernetes object without compile-time schema knowledge
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct UnstructuredObject(Map<String, Value>);

/// Identity of an object on the API server
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey {
    pub api_version: String,
    pub kind: String,
    pub namespace: Option<String>,
    pub name: String,
}

impl ObjectKey {
    /// Group part of the apiVersion, empty for the core group
    pub fn group(&self) -> &str {
        self.api_version
            .rsplit_once('/')
            .map(|(group, _)| group)
            .unwrap_or("")
    }

    /// Version part of the apiVersion
    pub fn version(&self) -> &str {
        self.api_version
            .rsplit_once('/')
            .map(|(_, version)| version)
            .unwrap_or(&self.api_version)
    }
}

impl std::fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{} {}/{}", self.kind, ns, self.name),
            None => write!(f, "{} {}", self.kind, self.name),
        }
    }
}

impl UnstructuredObject {
    /// Build from a JSON value, which must be a mapping
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(VzError::InvalidObject(format!(
                "expected a mapping, got {}",
                other
            ))),
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn fields_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.0
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(field.into(), value)
    }

    pub fn api_version(&self) -> &str {
        self.str_field(fields::API_VERSION)
    }

    pub fn kind(&self) -> &str {
        self.str_field(fields::KIND)
    }

    /// Group part of the apiVersion, empty for the core group
    pub fn group(&self) -> &str {
        self.api_version()
            .rsplit_once('/')
            .map(|(group, _)| group)
            .unwrap_or("")
    }

    pub fn name(&self) -> Option<&str> {
        self.metadata()?.get("name")?.as_str()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.metadata()?
            .get("namespace")?
            .as_str()
            .filter(|ns| !ns.is_empty())
    }

    pub fn set_namespace(&mut self, namespace: &str) {
        self.metadata_mut()
            .insert("namespace".to_string(), Value::String(namespace.to_string()));
    }

    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.metadata()?.get("annotations")?.get(key)?.as_str()
    }

    pub fn set_annotation(&mut self, key: &str, value: String) {
        Self::string_map_mut(self.metadata_mut(), "annotations")
            .insert(key.to_string(), Value::String(value));
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.metadata()?.get("labels")?.get(key)?.as_str()
    }

    /// The API identity of this object. Fails when kind, apiVersion or name is missing.
    pub fn key(&self) -> Result<ObjectKey> {
        let name = self
            .name()
            .ok_or_else(|| VzError::InvalidObject("object has no metadata.name".to_string()))?;
        if self.kind().is_empty() || self.api_version().is_empty() {
            return Err(VzError::InvalidObject(format!(
                "object {} is missing kind or apiVersion",
                name
            )));
        }
        Ok(ObjectKey {
            api_version: self.api_version().to_string(),
            kind: self.kind().to_string(),
            namespace: self.namespace().map(str::to_string),
            name: name.to_string(),
        })
    }

    fn str_field(&self, field: &str) -> &str {
        self.0.get(field).and_then(Value::as_str).unwrap_or("")
    }

    fn metadata(&self) -> Option<&Map<String, Value>> {
        self.0.get(fields::METADATA)?.as_object()
    }

    fn metadata_mut(&mut self) -> &mut Map<String, Value> {
        Self::string_map_mut(&mut self.0, fields::METADATA)
    }

    /// Get the nested map under `key`, replacing any non-map value with an empty map
    fn string_map_mut<'a>(parent: &'a mut Map<String, Value>, key: &str) -> &'a mut Map<String, Value> {
        let entry = parent
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        match entry {
            Value::Object(map) => map,
            _ => unreachable!("entry was just replaced with a map"),
        }
    }
}
