// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Component specs and status types shared by both Verrazzano API versions.

use crate::error::{Result, VzError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reference to a key inside a ConfigMap or Secret
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeySelector {
    pub name: String,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
}

/// One Helm values override. Later entries win over earlier ones.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_map_ref: Option<KeySelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_ref: Option<KeySelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<serde_json::Value>,
}

impl Overrides {
    pub fn config_map(name: &str, key: &str) -> Self {
        Self {
            config_map_ref: Some(KeySelector {
                name: name.to_string(),
                key: key.to_string(),
                optional: None,
            }),
            ..Default::default()
        }
    }

    pub fn values(values: serde_json::Value) -> Self {
        Self {
            values: Some(values),
            ..Default::default()
        }
    }
}

/// Spec shared by every component that only carries an enabled flag and overrides
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComponentConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<Overrides>,
}

impl ComponentConfig {
    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled: Some(enabled),
            ..Default::default()
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IstioComponent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub injection_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<Overrides>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaIssuer {
    pub secret_name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LetsEncryptAcmeIssuer {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email_address: String,
    /// "staging" or "production"; empty means production
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub environment: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClusterIssuerComponent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_resource_namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca: Option<CaIssuer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lets_encrypt: Option<LetsEncryptAcmeIssuer>,
}

impl ClusterIssuerComponent {
    /// True when the issuer is configured for a CA. Exactly one issuer type may be set.
    pub fn is_ca_issuer(&self) -> Result<bool> {
        match (&self.ca, &self.lets_encrypt) {
            (Some(_), Some(_)) => Err(VzError::IllegalConfiguration(
                "cluster issuer configures both CA and LetsEncrypt".to_string(),
            )),
            (ca, _) => Ok(ca.is_some()),
        }
    }

    /// True when the issuer is configured for LetsEncrypt. Exactly one issuer type may be set.
    pub fn is_lets_encrypt_issuer(&self) -> Result<bool> {
        match (&self.ca, &self.lets_encrypt) {
            (Some(_), Some(_)) => Err(VzError::IllegalConfiguration(
                "cluster issuer configures both CA and LetsEncrypt".to_string(),
            )),
            (_, lets_encrypt) => Ok(lets_encrypt.is_some()),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OciDns {
    #[serde(rename = "dnsZoneOCID")]
    pub dns_zone_ocid: String,
    pub dns_zone_name: String,
    pub oci_config_secret: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WildcardDns {
    pub domain: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DnsComponent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oci: Option<OciDns>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wildcard: Option<WildcardDns>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<Overrides>,
}

/// Lifecycle state recorded per component in the CR status
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, schemars::JsonSchema)]
pub enum CompState {
    Disabled,
    PreInstalling,
    Installing,
    Ready,
    Uninstalling,
    Uninstalled,
    Upgrading,
    Error,
    Failed,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComponentStatusDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<CompState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerrazzanoStatus {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub components: BTreeMap<String, ComponentStatusDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}
