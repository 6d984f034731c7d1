// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VzError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to parse manifest: {0}")]
    ParseError(String),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to read manifest {path}: {source}")]
    ManifestReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No manifests found: {0}")]
    NoManifestsFound(String),

    #[error("Invalid object: {0}")]
    InvalidObject(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Illegal configuration state: {0}")]
    IllegalConfiguration(String),
}

impl VzError {
    /// True when the API server answered 404 for the requested object
    pub fn is_not_found(&self) -> bool {
        matches!(self, VzError::KubeError(kube::Error::Api(err)) if err.code == 404)
    }
}

pub type Result<T> = std::result::Result<T, VzError>;
