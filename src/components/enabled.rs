// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Component enablement derived from a Verrazzano CR of either API version.
//!
//! Boolean checks never fail: a missing CR, component section or `enabled` flag resolves
//! to the component's default. Only checks that must tell a CA issuer from a LetsEncrypt
//! issuer return a `Result`.

use crate::error::{Result, VzError};
use crate::types::verrazzano::common::{CompState, LetsEncryptAcmeIssuer};
use crate::types::{Component, VerrazzanoResource};

const LETS_ENCRYPT_STAGING: &str = "staging";
const LETS_ENCRYPT_PRODUCTION: &str = "production";

fn explicit_enabled(cr: Option<&VerrazzanoResource>, component: Component) -> Option<bool> {
    cr?.components().component(component)?.enabled
}

/// Desired enablement of `component`: the explicit `enabled` flag when set, the default otherwise
pub fn is_component_enabled(cr: Option<&VerrazzanoResource>, component: Component) -> bool {
    let explicit = explicit_enabled(cr, component);
    match component {
        Component::PrometheusNodeExporter => {
            explicit.unwrap_or_else(|| is_component_enabled(cr, Component::Prometheus))
        }
        _ => explicit.unwrap_or_else(|| component.default_enabled()),
    }
}

/// Sidecar injection needs Istio enabled and injection not switched off
pub fn is_istio_injection_enabled(cr: Option<&VerrazzanoResource>) -> bool {
    if !is_component_enabled(cr, Component::Istio) {
        return false;
    }
    cr.and_then(|cr| cr.components().istio())
        .and_then(|istio| istio.injection_enabled)
        .unwrap_or(true)
}

/// The monitoring stack runs when any of its members is enabled
pub fn is_vmo_enabled(cr: Option<&VerrazzanoResource>) -> bool {
    [
        Component::Prometheus,
        Component::OpenSearch,
        Component::OpenSearchDashboards,
        Component::Grafana,
    ]
    .into_iter()
    .any(|component| is_component_enabled(cr, component))
}

pub fn is_oci_dns_enabled(cr: Option<&VerrazzanoResource>) -> bool {
    cr.and_then(|cr| cr.components().dns())
        .is_some_and(|dns| dns.oci.is_some())
}

/// External DNS is deployed only for OCI DNS
pub fn is_external_dns_enabled(cr: Option<&VerrazzanoResource>) -> bool {
    is_oci_dns_enabled(cr)
}

fn require_cr(cr: Option<&VerrazzanoResource>) -> Result<&VerrazzanoResource> {
    cr.ok_or_else(|| {
        VzError::IllegalConfiguration(
            "unable to resolve cluster issuer type without a Verrazzano resource".to_string(),
        )
    })
}

/// True when certificates come from a CA. A CR without a cluster issuer section uses the default CA.
pub fn is_ca_config(cr: Option<&VerrazzanoResource>) -> Result<bool> {
    match require_cr(cr)?.components().cluster_issuer() {
        Some(issuer) => issuer.is_ca_issuer(),
        None => Ok(true),
    }
}

/// True when certificates come from LetsEncrypt
pub fn is_lets_encrypt_config(cr: Option<&VerrazzanoResource>) -> Result<bool> {
    match require_cr(cr)?.components().cluster_issuer() {
        Some(issuer) => issuer.is_lets_encrypt_issuer(),
        None => Ok(false),
    }
}

pub fn is_lets_encrypt_staging_env(acme: &LetsEncryptAcmeIssuer) -> bool {
    acme.environment.eq_ignore_ascii_case(LETS_ENCRYPT_STAGING)
}

/// An empty environment means production
pub fn is_lets_encrypt_production_env(acme: &LetsEncryptAcmeIssuer) -> bool {
    acme.environment.is_empty() || acme.environment.eq_ignore_ascii_case(LETS_ENCRYPT_PRODUCTION)
}

/// The OCI DNS webhook is needed when enabled explicitly, or implicitly when LetsEncrypt
/// certificates are issued against OCI DNS through an enabled cluster issuer
pub fn is_cert_manager_webhook_oci_required(cr: Option<&VerrazzanoResource>) -> bool {
    if is_component_enabled(cr, Component::CertManagerWebhookOci) {
        return true;
    }
    let lets_encrypt = is_lets_encrypt_config(cr).unwrap_or(false);
    is_oci_dns_enabled(cr) && lets_encrypt && is_component_enabled(cr, Component::ClusterIssuer)
}

/// Whether the component is currently installed according to the CR status, as opposed to desired
pub fn is_component_status_enabled(cr: Option<&VerrazzanoResource>, component_name: &str) -> bool {
    cr.and_then(|cr| cr.status())
        .and_then(|status| status.components.get(component_name))
        .is_some_and(|details| {
            !matches!(
                details.state,
                Some(CompState::Disabled | CompState::Uninstalled | CompState::Uninstalling)
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::verrazzano::common::{
        CaIssuer, ClusterIssuerComponent, ComponentConfig, ComponentStatusDetails, DnsComponent,
        IstioComponent, OciDns, VerrazzanoStatus,
    };
    use crate::types::verrazzano::{v1alpha1, v1beta1};

    fn beta(components: v1beta1::ComponentSpec) -> VerrazzanoResource {
        v1beta1::Verrazzano::new(
            "vz",
            v1beta1::VerrazzanoSpec {
                components,
                ..Default::default()
            },
        )
        .into()
    }

    fn alpha(components: v1alpha1::ComponentSpec) -> VerrazzanoResource {
        v1alpha1::Verrazzano::new(
            "vz",
            v1alpha1::VerrazzanoSpec {
                components,
                ..Default::default()
            },
        )
        .into()
    }

    fn lets_encrypt_issuer(enabled: Option<bool>) -> ClusterIssuerComponent {
        ClusterIssuerComponent {
            enabled,
            lets_encrypt: Some(LetsEncryptAcmeIssuer {
                email_address: "admin@example.com".to_string(),
                environment: String::new(),
            }),
            ..Default::default()
        }
    }

    fn oci_dns() -> DnsComponent {
        DnsComponent {
            oci: Some(OciDns::default()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_on_empty_cr() {
        let enabled_by_default = [
            Component::Prometheus,
            Component::Istio,
            Component::IngressNginx,
            Component::CertManager,
            Component::ClusterIssuer,
            Component::Grafana,
            Component::Kiali,
            Component::Console,
            Component::Keycloak,
            Component::Rancher,
            Component::MySqlOperator,
            Component::Oam,
            Component::Verrazzano,
            Component::ApplicationOperator,
            Component::WebLogicOperator,
            Component::CoherenceOperator,
            Component::ClusterOperator,
            Component::PrometheusNodeExporter,
        ];
        let disabled_by_default = [
            Component::Velero,
            Component::RancherBackup,
            Component::ArgoCd,
            Component::Thanos,
            Component::PrometheusAdapter,
            Component::PrometheusPushgateway,
            Component::KubeStateMetrics,
            Component::JaegerOperator,
            Component::CertManagerWebhookOci,
        ];

        for cr in [Some(beta(Default::default())), Some(alpha(Default::default())), None] {
            for component in enabled_by_default {
                assert!(is_component_enabled(cr.as_ref(), component), "{} should be enabled", component);
            }
            for component in disabled_by_default {
                assert!(!is_component_enabled(cr.as_ref(), component), "{} should be disabled", component);
            }
        }
    }

    #[test]
    fn test_explicit_flag_wins() {
        let cr = beta(v1beta1::ComponentSpec {
            velero: Some(ComponentConfig::enabled(true)),
            rancher: Some(ComponentConfig::enabled(false)),
            kube_state_metrics: Some(ComponentConfig::default()),
            ..Default::default()
        });

        assert!(is_component_enabled(Some(&cr), Component::Velero));
        assert!(!is_component_enabled(Some(&cr), Component::Rancher));
        assert!(!is_component_enabled(Some(&cr), Component::KubeStateMetrics));
    }

    #[test]
    fn test_v1alpha1_legacy_field_names() {
        let cr = alpha(v1alpha1::ComponentSpec {
            elasticsearch: Some(ComponentConfig::enabled(false)),
            ingress: Some(ComponentConfig::enabled(false)),
            ..Default::default()
        });

        assert!(!is_component_enabled(Some(&cr), Component::OpenSearch));
        assert!(!is_component_enabled(Some(&cr), Component::IngressNginx));
        assert!(is_component_enabled(Some(&cr), Component::OpenSearchDashboards));
    }

    #[test]
    fn test_node_exporter_follows_prometheus() {
        let prometheus_off = beta(v1beta1::ComponentSpec {
            prometheus: Some(ComponentConfig::enabled(false)),
            ..Default::default()
        });
        let explicit_on = beta(v1beta1::ComponentSpec {
            prometheus: Some(ComponentConfig::enabled(false)),
            prometheus_node_exporter: Some(ComponentConfig::enabled(true)),
            ..Default::default()
        });

        assert!(!is_component_enabled(Some(&prometheus_off), Component::PrometheusNodeExporter));
        assert!(is_component_enabled(Some(&explicit_on), Component::PrometheusNodeExporter));
    }

    #[test]
    fn test_istio_injection() {
        let istio = |enabled, injection_enabled| {
            beta(v1beta1::ComponentSpec {
                istio: Some(IstioComponent {
                    enabled,
                    injection_enabled,
                    ..Default::default()
                }),
                ..Default::default()
            })
        };

        assert!(!is_istio_injection_enabled(Some(&istio(Some(false), None))));
        assert!(!is_istio_injection_enabled(Some(&istio(Some(true), Some(false)))));
        assert!(is_istio_injection_enabled(Some(&istio(Some(true), Some(true)))));
        assert!(is_istio_injection_enabled(Some(&istio(None, None))));
        assert!(is_istio_injection_enabled(None));
    }

    #[test]
    fn test_vmo_enabled() {
        let all_off = beta(v1beta1::ComponentSpec {
            prometheus: Some(ComponentConfig::enabled(false)),
            opensearch: Some(ComponentConfig::enabled(false)),
            opensearch_dashboards: Some(ComponentConfig::enabled(false)),
            grafana: Some(ComponentConfig::enabled(false)),
            ..Default::default()
        });
        let grafana_only = beta(v1beta1::ComponentSpec {
            prometheus: Some(ComponentConfig::enabled(false)),
            opensearch: Some(ComponentConfig::enabled(false)),
            opensearch_dashboards: Some(ComponentConfig::enabled(false)),
            ..Default::default()
        });

        assert!(!is_vmo_enabled(Some(&all_off)));
        assert!(is_vmo_enabled(Some(&grafana_only)));
    }

    #[test]
    fn test_webhook_required_by_explicit_flag() {
        let cr = beta(v1beta1::ComponentSpec {
            cert_manager_webhook_oci: Some(ComponentConfig::enabled(true)),
            cluster_issuer: Some(ClusterIssuerComponent {
                enabled: Some(false),
                ..Default::default()
            }),
            ..Default::default()
        });

        assert!(is_cert_manager_webhook_oci_required(Some(&cr)));
    }

    #[test]
    fn test_webhook_not_required_with_disabled_issuer() {
        let cr = beta(v1beta1::ComponentSpec {
            dns: Some(oci_dns()),
            cluster_issuer: Some(lets_encrypt_issuer(Some(false))),
            ..Default::default()
        });

        assert!(!is_cert_manager_webhook_oci_required(Some(&cr)));
    }

    #[test]
    fn test_webhook_required_by_oci_dns_and_lets_encrypt() {
        let cr = beta(v1beta1::ComponentSpec {
            dns: Some(oci_dns()),
            cluster_issuer: Some(lets_encrypt_issuer(None)),
            ..Default::default()
        });
        let without_dns = beta(v1beta1::ComponentSpec {
            cluster_issuer: Some(lets_encrypt_issuer(None)),
            ..Default::default()
        });
        let with_ca = beta(v1beta1::ComponentSpec {
            dns: Some(oci_dns()),
            cluster_issuer: Some(ClusterIssuerComponent {
                ca: Some(CaIssuer::default()),
                ..Default::default()
            }),
            ..Default::default()
        });

        assert!(is_cert_manager_webhook_oci_required(Some(&cr)));
        assert!(!is_cert_manager_webhook_oci_required(Some(&without_dns)));
        assert!(!is_cert_manager_webhook_oci_required(Some(&with_ca)));
        assert!(!is_cert_manager_webhook_oci_required(None));
    }

    #[test]
    fn test_issuer_discriminators() {
        let default_issuer = beta(Default::default());
        let lets_encrypt = alpha(v1alpha1::ComponentSpec {
            cluster_issuer: Some(lets_encrypt_issuer(None)),
            ..Default::default()
        });
        let both = beta(v1beta1::ComponentSpec {
            cluster_issuer: Some(ClusterIssuerComponent {
                ca: Some(CaIssuer::default()),
                ..lets_encrypt_issuer(None)
            }),
            ..Default::default()
        });

        assert!(is_ca_config(Some(&default_issuer)).unwrap());
        assert!(!is_lets_encrypt_config(Some(&default_issuer)).unwrap());
        assert!(!is_ca_config(Some(&lets_encrypt)).unwrap());
        assert!(is_lets_encrypt_config(Some(&lets_encrypt)).unwrap());
        assert!(is_ca_config(Some(&both)).is_err());
        assert!(is_ca_config(None).is_err());
        assert!(is_lets_encrypt_config(None).is_err());
    }

    #[test]
    fn test_lets_encrypt_environment() {
        let acme = |environment: &str| LetsEncryptAcmeIssuer {
            email_address: String::new(),
            environment: environment.to_string(),
        };

        assert!(is_lets_encrypt_staging_env(&acme("Staging")));
        assert!(!is_lets_encrypt_staging_env(&acme("")));
        assert!(is_lets_encrypt_production_env(&acme("")));
        assert!(is_lets_encrypt_production_env(&acme("PRODUCTION")));
        assert!(!is_lets_encrypt_production_env(&acme("staging")));
    }

    #[test]
    fn test_oci_dns() {
        let cr = beta(v1beta1::ComponentSpec {
            dns: Some(oci_dns()),
            ..Default::default()
        });
        assert!(is_oci_dns_enabled(Some(&cr)));
        assert!(is_external_dns_enabled(Some(&cr)));
        assert!(!is_oci_dns_enabled(Some(&beta(Default::default()))));
    }

    #[test]
    fn test_component_status_enabled() {
        let mut vz = v1beta1::Verrazzano::new("vz", Default::default());
        let mut status = VerrazzanoStatus::default();
        for (name, state) in [
            ("rancher", Some(CompState::Ready)),
            ("velero", Some(CompState::Uninstalled)),
            ("thanos", Some(CompState::Uninstalling)),
            ("argocd", Some(CompState::Disabled)),
            ("grafana", None),
        ] {
            status.components.insert(
                name.to_string(),
                ComponentStatusDetails {
                    state,
                    ..Default::default()
                },
            );
        }
        vz.status = Some(status);
        let cr = VerrazzanoResource::from(vz);

        assert!(is_component_status_enabled(Some(&cr), "rancher"));
        assert!(is_component_status_enabled(Some(&cr), "grafana"));
        assert!(!is_component_status_enabled(Some(&cr), "velero"));
        assert!(!is_component_status_enabled(Some(&cr), "thanos"));
        assert!(!is_component_status_enabled(Some(&cr), "argocd"));
        assert!(!is_component_status_enabled(Some(&cr), "keycloak"));
        assert!(!is_component_status_enabled(None, "rancher"));
    }
}
