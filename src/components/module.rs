// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Mapping of enabled components onto Module resources.

use crate::components::enabled::is_component_enabled;
use crate::constants::{fields, labels, modules};
use crate::error::Result;
use crate::kubernetes::{Cascade, ObjectStore};
use crate::types::verrazzano::common::Overrides;
use crate::types::{Component, Module, ModuleSpec, ObjectKey, UnstructuredObject, VerrazzanoResource};
use kube::Resource;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// Everything needed to install one component as a Module
#[derive(Clone, Debug, PartialEq)]
pub struct ModuleDescriptor {
    pub enabled: bool,
    pub name: String,
    pub namespace: String,
    pub chart_namespace: String,
    pub chart_path: String,
    pub overrides: Vec<Overrides>,
}

impl ModuleDescriptor {
    fn spec(&self) -> ModuleSpec {
        ModuleSpec {
            chart_name: self.name.clone(),
            target_namespace: self.chart_namespace.clone(),
            chart_path: self.chart_path.clone(),
            overrides: self.overrides.clone(),
        }
    }

    fn key(&self) -> ObjectKey {
        ObjectKey {
            api_version: Module::api_version(&()).to_string(),
            kind: Module::kind(&()).to_string(),
            namespace: Some(self.namespace.clone()),
            name: self.name.clone(),
        }
    }
}

/// Builds a component's descriptor from the CR
pub type ModuleFactory = Box<dyn Fn(&VerrazzanoResource) -> ModuleDescriptor + Send + Sync>;

/// What [`apply_component_as_module`] did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModuleOutcome {
    /// No factory is registered under the name
    UnknownComponent,
    Disabled,
    Created,
    Updated,
}

/// Component name to descriptor factory
#[derive(Default)]
pub struct ModuleRegistry {
    factories: BTreeMap<String, ModuleFactory>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the components installed through Modules
    pub fn with_defaults() -> Self {
        const MONITORING: &str = "verrazzano-monitoring";

        let mut registry = Self::new();
        registry.register_component(Component::CertManager, "cert-manager", "cert-manager", true);
        registry.register_component(Component::IngressNginx, "ingress-nginx", "ingress-nginx", true);
        registry.register_component(Component::JaegerOperator, MONITORING, "jaegertracing/jaeger-operator", false);
        registry.register_component(
            Component::PrometheusOperator,
            MONITORING,
            "prometheus-community/kube-prometheus-stack",
            true,
        );
        registry.register_component(
            Component::PrometheusAdapter,
            MONITORING,
            "prometheus-community/prometheus-adapter",
            false,
        );
        registry.register_component(
            Component::PrometheusPushgateway,
            MONITORING,
            "prometheus-community/prometheus-pushgateway",
            false,
        );
        registry.register_component(
            Component::KubeStateMetrics,
            MONITORING,
            "prometheus-community/kube-state-metrics",
            false,
        );
        registry.register_component(
            Component::PrometheusNodeExporter,
            MONITORING,
            "prometheus-community/prometheus-node-exporter",
            false,
        );
        registry.register_component(Component::Velero, "verrazzano-backup", "velero", false);
        registry.register_component(Component::RancherBackup, "cattle-resources-system", "rancher-backup", false);
        registry.register_component(Component::ArgoCd, "argocd", "argocd", false);
        registry.register_component(Component::Thanos, MONITORING, "thanos", false);
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, factory: ModuleFactory) {
        self.factories.insert(name.into(), factory);
    }

    /// Register a factory for `component`. With `generated_values`, an override pointing at the
    /// component's generated values ConfigMap goes ahead of the user's overrides.
    fn register_component(
        &mut self,
        component: Component,
        chart_namespace: &'static str,
        chart_path: &'static str,
        generated_values: bool,
    ) {
        let factory = move |cr: &VerrazzanoResource| {
            let name = component.name().to_string();
            let user_overrides = cr
                .components()
                .component(component)
                .map(|view| view.overrides)
                .unwrap_or_default();

            let mut overrides = Vec::with_capacity(user_overrides.len() + 1);
            if generated_values {
                overrides.push(Overrides::config_map(
                    &format!("{}{}", name, modules::GENERATED_VALUES_SUFFIX),
                    modules::GENERATED_VALUES_KEY,
                ));
            }
            overrides.extend_from_slice(user_overrides);

            ModuleDescriptor {
                enabled: is_component_enabled(Some(cr), component),
                namespace: cr.namespace().unwrap_or(modules::MODULE_NAMESPACE).to_string(),
                chart_namespace: chart_namespace.to_string(),
                chart_path: chart_path.to_string(),
                name,
                overrides,
            }
        };
        self.register(component.name(), Box::new(factory));
    }

    pub fn lookup(&self, name: &str) -> Option<&ModuleFactory> {
        self.factories.get(name)
    }

    /// Registered component names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

/// Create or update the Module for component `name`.
///
/// An unregistered name is not an error: it yields [`ModuleOutcome::UnknownComponent`] and
/// touches nothing. On update the whole spec is replaced.
#[instrument(skip(store, registry, cr))]
pub async fn apply_component_as_module<S: ObjectStore + ?Sized>(
    store: &S,
    registry: &ModuleRegistry,
    cr: &VerrazzanoResource,
    name: &str,
) -> Result<ModuleOutcome> {
    let Some(factory) = registry.lookup(name) else {
        debug!("No module registered for component {}", name);
        return Ok(ModuleOutcome::UnknownComponent);
    };

    let descriptor = factory(cr);
    if !descriptor.enabled {
        debug!("Component {} is disabled, skipping module", name);
        return Ok(ModuleOutcome::Disabled);
    }

    let spec = serde_json::to_value(descriptor.spec())?;
    let key = descriptor.key();

    if let Some(mut live) = store.get(&key).await? {
        live.insert(fields::SPEC, spec);
        store.update(&live).await?;
        info!("Updated module {}", key);
        return Ok(ModuleOutcome::Updated);
    }

    let mut module = Module::new(&descriptor.name, descriptor.spec());
    module.metadata.namespace = Some(descriptor.namespace.clone());
    module.metadata.labels = Some(BTreeMap::from([(
        labels::MODULE_OWNER.to_string(),
        labels::MODULE_OWNER_VALUE.to_string(),
    )]));
    store
        .create(&UnstructuredObject::from_value(serde_json::to_value(&module)?)?)
        .await?;
    info!("Created module {}", key);
    Ok(ModuleOutcome::Created)
}

/// Apply every registered component of `registry` as a Module, stopping at the first failure
pub async fn apply_registered_modules<S: ObjectStore + ?Sized>(
    store: &S,
    registry: &ModuleRegistry,
    cr: &VerrazzanoResource,
) -> Result<Vec<(String, ModuleOutcome)>> {
    let mut outcomes = Vec::new();
    for name in registry.names() {
        let outcome = apply_component_as_module(store, registry, cr, name).await?;
        outcomes.push((name.to_string(), outcome));
    }
    Ok(outcomes)
}

/// Delete the Module of every registered component. Modules already gone are skipped.
#[instrument(skip(store, registry, cr))]
pub async fn delete_registered_modules<S: ObjectStore + ?Sized>(
    store: &S,
    registry: &ModuleRegistry,
    cr: &VerrazzanoResource,
    cascade: Cascade,
) -> Result<()> {
    for factory in registry.factories.values() {
        let key = factory(cr).key();
        match store.delete(&key, cascade).await {
            Ok(()) => info!("Deleted module {}", key),
            Err(e) if e.is_not_found() => debug!("Module {} does not exist", key),
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
