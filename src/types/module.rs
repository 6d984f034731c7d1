// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::types::verrazzano::common::Overrides;
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// Generic installer resource: install one chart with an ordered list of overrides
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[kube(group = "platform.verrazzano.io", version = "v1alpha1", kind = "Module")]
#[kube(namespaced)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSpec {
    pub chart_name: String,
    pub target_namespace: String,
    pub chart_path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<Overrides>,
}
