// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The Verrazzano custom resource in both of its served API versions.

pub mod common;
pub mod v1alpha1;
pub mod v1beta1;

use crate::error::{Result, VzError};
use crate::types::unstructured::UnstructuredObject;
use common::{ClusterIssuerComponent, ComponentConfig, DnsComponent, IstioComponent, Overrides, VerrazzanoStatus};

const V1ALPHA1: &str = "install.verrazzano.io/v1alpha1";
const V1BETA1: &str = "install.verrazzano.io/v1beta1";

/// Platform components whose enablement is driven by the CR
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Component {
    ApplicationOperator,
    ArgoCd,
    AuthProxy,
    Capi,
    CertManager,
    CertManagerWebhookOci,
    ClusterIssuer,
    ClusterOperator,
    CoherenceOperator,
    Console,
    Fluentd,
    Grafana,
    IngressNginx,
    Istio,
    JaegerOperator,
    Keycloak,
    Kiali,
    KubeStateMetrics,
    MySqlOperator,
    Oam,
    OpenSearch,
    OpenSearchDashboards,
    Prometheus,
    PrometheusAdapter,
    PrometheusNodeExporter,
    PrometheusOperator,
    PrometheusPushgateway,
    Rancher,
    RancherBackup,
    Thanos,
    Velero,
    Verrazzano,
    WebLogicOperator,
}

impl Component {
    pub const ALL: [Component; 33] = [
        Component::ApplicationOperator,
        Component::ArgoCd,
        Component::AuthProxy,
        Component::Capi,
        Component::CertManager,
        Component::CertManagerWebhookOci,
        Component::ClusterIssuer,
        Component::ClusterOperator,
        Component::CoherenceOperator,
        Component::Console,
        Component::Fluentd,
        Component::Grafana,
        Component::IngressNginx,
        Component::Istio,
        Component::JaegerOperator,
        Component::Keycloak,
        Component::Kiali,
        Component::KubeStateMetrics,
        Component::MySqlOperator,
        Component::Oam,
        Component::OpenSearch,
        Component::OpenSearchDashboards,
        Component::Prometheus,
        Component::PrometheusAdapter,
        Component::PrometheusNodeExporter,
        Component::PrometheusOperator,
        Component::PrometheusPushgateway,
        Component::Rancher,
        Component::RancherBackup,
        Component::Thanos,
        Component::Velero,
        Component::Verrazzano,
        Component::WebLogicOperator,
    ];

    /// Name used for status entries and Module resources
    pub fn name(self) -> &'static str {
        match self {
            Component::ApplicationOperator => "verrazzano-application-operator",
            Component::ArgoCd => "argocd",
            Component::AuthProxy => "verrazzano-authproxy",
            Component::Capi => "cluster-api",
            Component::CertManager => "cert-manager",
            Component::CertManagerWebhookOci => "cert-manager-webhook-oci",
            Component::ClusterIssuer => "cluster-issuer",
            Component::ClusterOperator => "verrazzano-cluster-operator",
            Component::CoherenceOperator => "coherence-operator",
            Component::Console => "verrazzano-console",
            Component::Fluentd => "fluentd",
            Component::Grafana => "grafana",
            Component::IngressNginx => "ingress-controller",
            Component::Istio => "istio",
            Component::JaegerOperator => "jaeger-operator",
            Component::Keycloak => "keycloak",
            Component::Kiali => "kiali-server",
            Component::KubeStateMetrics => "kube-state-metrics",
            Component::MySqlOperator => "mysql-operator",
            Component::Oam => "oam-kubernetes-runtime",
            Component::OpenSearch => "opensearch",
            Component::OpenSearchDashboards => "opensearch-dashboards",
            Component::Prometheus => "prometheus",
            Component::PrometheusAdapter => "prometheus-adapter",
            Component::PrometheusNodeExporter => "prometheus-node-exporter",
            Component::PrometheusOperator => "prometheus-operator",
            Component::PrometheusPushgateway => "prometheus-pushgateway",
            Component::Rancher => "rancher",
            Component::RancherBackup => "rancher-backup",
            Component::Thanos => "thanos",
            Component::Velero => "velero",
            Component::Verrazzano => "verrazzano",
            Component::WebLogicOperator => "weblogic-operator",
        }
    }

    pub fn from_name(name: &str) -> Option<Component> {
        Component::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Enablement when the CR says nothing about the component
    pub fn default_enabled(self) -> bool {
        !matches!(
            self,
            Component::ArgoCd
                | Component::CertManagerWebhookOci
                | Component::JaegerOperator
                | Component::KubeStateMetrics
                | Component::PrometheusAdapter
                | Component::PrometheusPushgateway
                | Component::RancherBackup
                | Component::Thanos
                | Component::Velero
        )
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Version-independent view of one component's settings
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComponentView<'a> {
    pub enabled: Option<bool>,
    pub overrides: &'a [Overrides],
}

impl<'a> From<&'a ComponentConfig> for ComponentView<'a> {
    fn from(config: &'a ComponentConfig) -> Self {
        Self {
            enabled: config.enabled,
            overrides: &config.overrides,
        }
    }
}

impl<'a> From<&'a IstioComponent> for ComponentView<'a> {
    fn from(istio: &'a IstioComponent) -> Self {
        Self {
            enabled: istio.enabled,
            overrides: &istio.overrides,
        }
    }
}

impl<'a> From<&'a ClusterIssuerComponent> for ComponentView<'a> {
    fn from(issuer: &'a ClusterIssuerComponent) -> Self {
        Self {
            enabled: issuer.enabled,
            overrides: &[],
        }
    }
}

/// Uniform access to the components section of either API version
pub trait ComponentAccessor {
    fn component(&self, component: Component) -> Option<ComponentView<'_>>;
    fn istio(&self) -> Option<&IstioComponent>;
    fn cluster_issuer(&self) -> Option<&ClusterIssuerComponent>;
    fn dns(&self) -> Option<&DnsComponent>;
}

/// A Verrazzano CR of any served API version
#[derive(Clone, Debug)]
pub enum VerrazzanoResource {
    V1Alpha1(v1alpha1::Verrazzano),
    V1Beta1(v1beta1::Verrazzano),
}

impl VerrazzanoResource {
    pub fn components(&self) -> &dyn ComponentAccessor {
        match self {
            VerrazzanoResource::V1Alpha1(vz) => &vz.spec.components,
            VerrazzanoResource::V1Beta1(vz) => &vz.spec.components,
        }
    }

    pub fn status(&self) -> Option<&VerrazzanoStatus> {
        match self {
            VerrazzanoResource::V1Alpha1(vz) => vz.status.as_ref(),
            VerrazzanoResource::V1Beta1(vz) => vz.status.as_ref(),
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        match self {
            VerrazzanoResource::V1Alpha1(vz) => vz.metadata.namespace.as_deref(),
            VerrazzanoResource::V1Beta1(vz) => vz.metadata.namespace.as_deref(),
        }
    }
}

impl From<v1alpha1::Verrazzano> for VerrazzanoResource {
    fn from(vz: v1alpha1::Verrazzano) -> Self {
        VerrazzanoResource::V1Alpha1(vz)
    }
}

impl From<v1beta1::Verrazzano> for VerrazzanoResource {
    fn from(vz: v1beta1::Verrazzano) -> Self {
        VerrazzanoResource::V1Beta1(vz)
    }
}

impl TryFrom<UnstructuredObject> for VerrazzanoResource {
    type Error = VzError;

    fn try_from(obj: UnstructuredObject) -> Result<Self> {
        if obj.kind() != "Verrazzano" {
            return Err(VzError::IllegalConfiguration(format!(
                "unable to resolve Verrazzano resource from kind {:?}",
                obj.kind()
            )));
        }
        match obj.api_version() {
            V1ALPHA1 => Ok(VerrazzanoResource::V1Alpha1(serde_json::from_value(obj.into_value())?)),
            V1BETA1 => Ok(VerrazzanoResource::V1Beta1(serde_json::from_value(obj.into_value())?)),
            other => Err(VzError::IllegalConfiguration(format!(
                "unable to resolve Verrazzano resource from apiVersion {:?}",
                other
            ))),
        }
    }
}
