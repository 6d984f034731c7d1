// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::kubernetes::Cascade;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Operator configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace holding the Verrazzano resource and its Modules
    pub namespace: String,
    /// Bootstrap manifests applied once at start-up
    pub manifest_dir: Option<PathBuf>,
    /// Namespace forced onto every bootstrap manifest
    pub force_namespace: Option<String>,
    pub delete_cascade: Cascade,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let namespace = lookup("VZ_NAMESPACE").context("VZ_NAMESPACE environment variable not set")?;
        let manifest_dir = lookup("VZ_MANIFEST_DIR").filter(|v| !v.is_empty()).map(PathBuf::from);
        let force_namespace = lookup("VZ_FORCE_NAMESPACE").filter(|v| !v.is_empty());
        let delete_cascade = match lookup("VZ_DELETE_CASCADE") {
            Some(value) => value
                .parse()
                .with_context(|| format!("invalid VZ_DELETE_CASCADE value {:?}", value))?,
            None => Cascade::default(),
        };

        Ok(Config {
            namespace,
            manifest_dir,
            force_namespace,
            delete_cascade,
        })
    }
}
