// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use super::common::{ClusterIssuerComponent, ComponentConfig, DnsComponent, IstioComponent, VerrazzanoStatus};
use super::{Component, ComponentAccessor, ComponentView};
use kube::CustomResource;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "install.verrazzano.io", version = "v1alpha1", kind = "Verrazzano")]
#[kube(namespaced)]
#[kube(status = "VerrazzanoStatus")]
#[serde(rename_all = "camelCase")]
pub struct VerrazzanoSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_name: Option<String>,
    #[serde(default)]
    pub components: ComponentSpec,
}

/// Component settings as named by the legacy API: OpenSearch is `elasticsearch`,
/// OpenSearch Dashboards is `kibana` and ingress-nginx is `ingress`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_operator: Option<ComponentConfig>,
    #[serde(rename = "argoCD", skip_serializing_if = "Option::is_none")]
    pub argo_cd: Option<ComponentConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_proxy: Option<ComponentConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capi: Option<ComponentConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert_manager: Option<ComponentConfig>,
    #[serde(rename = "certManagerWebhookOCI", skip_serializing_if = "Option::is_none")]
    pub cert_manager_webhook_oci: Option<ComponentConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_issuer: Option<ClusterIssuerComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_operator: Option<ComponentConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coherence_operator: Option<ComponentConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console: Option<ComponentConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns: Option<DnsComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fluentd: Option<ComponentConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grafana: Option<ComponentConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress: Option<ComponentConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub istio: Option<IstioComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jaeger_operator: Option<ComponentConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keycloak: Option<ComponentConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kiali: Option<ComponentConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kube_state_metrics: Option<ComponentConfig>,
    #[serde(rename = "mySQLOperator", skip_serializing_if = "Option::is_none")]
    pub mysql_operator: Option<ComponentConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oam: Option<ComponentConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elasticsearch: Option<ComponentConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kibana: Option<ComponentConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prometheus: Option<ComponentConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prometheus_adapter: Option<ComponentConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prometheus_node_exporter: Option<ComponentConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prometheus_operator: Option<ComponentConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prometheus_pushgateway: Option<ComponentConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rancher: Option<ComponentConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rancher_backup: Option<ComponentConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thanos: Option<ComponentConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub velero: Option<ComponentConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verrazzano: Option<ComponentConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weblogic_operator: Option<ComponentConfig>,
}

impl ComponentAccessor for ComponentSpec {
    fn component(&self, component: Component) -> Option<ComponentView<'_>> {
        let config = match component {
            Component::ApplicationOperator => &self.application_operator,
            Component::ArgoCd => &self.argo_cd,
            Component::AuthProxy => &self.auth_proxy,
            Component::Capi => &self.capi,
            Component::CertManager => &self.cert_manager,
            Component::CertManagerWebhookOci => &self.cert_manager_webhook_oci,
            Component::ClusterOperator => &self.cluster_operator,
            Component::CoherenceOperator => &self.coherence_operator,
            Component::Console => &self.console,
            Component::Fluentd => &self.fluentd,
            Component::Grafana => &self.grafana,
            Component::IngressNginx => &self.ingress,
            Component::JaegerOperator => &self.jaeger_operator,
            Component::Keycloak => &self.keycloak,
            Component::Kiali => &self.kiali,
            Component::KubeStateMetrics => &self.kube_state_metrics,
            Component::MySqlOperator => &self.mysql_operator,
            Component::Oam => &self.oam,
            Component::OpenSearch => &self.elasticsearch,
            Component::OpenSearchDashboards => &self.kibana,
            Component::Prometheus => &self.prometheus,
            Component::PrometheusAdapter => &self.prometheus_adapter,
            Component::PrometheusNodeExporter => &self.prometheus_node_exporter,
            Component::PrometheusOperator => &self.prometheus_operator,
            Component::PrometheusPushgateway => &self.prometheus_pushgateway,
            Component::Rancher => &self.rancher,
            Component::RancherBackup => &self.rancher_backup,
            Component::Thanos => &self.thanos,
            Component::Velero => &self.velero,
            Component::Verrazzano => &self.verrazzano,
            Component::WebLogicOperator => &self.weblogic_operator,
            Component::Istio => return self.istio.as_ref().map(ComponentView::from),
            Component::ClusterIssuer => return self.cluster_issuer.as_ref().map(ComponentView::from),
        };
        config.as_ref().map(ComponentView::from)
    }

    fn istio(&self) -> Option<&IstioComponent> {
        self.istio.as_ref()
    }

    fn cluster_issuer(&self) -> Option<&ClusterIssuerComponent> {
        self.cluster_issuer.as_ref()
    }

    fn dns(&self) -> Option<&DnsComponent> {
        self.dns.as_ref()
    }
}
