// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Verrazzano reconciler - watches Verrazzano resources and keeps their Modules in sync.

use crate::components::{
    apply_registered_modules, delete_registered_modules, ModuleOutcome, ModuleRegistry,
};
use crate::constants::{finalizers::MODULE_CLEANUP, FIELD_MANAGER, REQUEUE_SECS};
use crate::error::{Result, VzError};
use crate::kubernetes::{Cascade, ObjectStore};
use crate::types::verrazzano::v1beta1::Verrazzano;
use crate::types::VerrazzanoResource;
use futures::StreamExt;
use serde_json::json;
use kube::{
    api::{Patch, PatchParams},
    runtime::{controller::Action, Controller},
    Api, Client, ResourceExt,
};
use kube_runtime::watcher::Config as WatcherConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub struct VerrazzanoReconciler {
    client: Client,
    namespace: String,
    store: Arc<dyn ObjectStore>,
    registry: ModuleRegistry,
    cascade: Cascade,
}

impl VerrazzanoReconciler {
    pub fn new(
        client: Client,
        namespace: String,
        store: Arc<dyn ObjectStore>,
        registry: ModuleRegistry,
        cascade: Cascade,
    ) -> Self {
        Self {
            client,
            namespace,
            store,
            registry,
            cascade,
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let resources: Api<Verrazzano> = Api::namespaced(self.client.clone(), &self.namespace);
        let context = Arc::new(self);

        Controller::new(resources, WatcherConfig::default())
            .run(reconcile, error_policy, context)
            .for_each(|res| async move {
                match res {
                    Ok(o) => debug!("Reconciled verrazzano: {:?}", o),
                    Err(e) => warn!("Reconciliation error: {:?}", e),
                }
            })
            .await;

        Ok(())
    }
}

async fn reconcile(vz: Arc<Verrazzano>, ctx: Arc<VerrazzanoReconciler>) -> Result<Action> {
    let name = vz.name_any();
    let namespace = vz.namespace().unwrap_or_else(|| ctx.namespace.clone());
    let api: Api<Verrazzano> = Api::namespaced(ctx.client.clone(), &namespace);
    let has_finalizer = vz.finalizers().iter().any(|f| f == MODULE_CLEANUP);
    let cr = VerrazzanoResource::from((*vz).clone());

    if vz.metadata.deletion_timestamp.is_some() {
        if !has_finalizer {
            debug!("Verrazzano {} is being deleted, modules already removed", name);
            return Ok(Action::await_change());
        }

        info!("Verrazzano {} is being deleted, removing modules ({})", name, ctx.cascade);
        delete_registered_modules(ctx.store.as_ref(), &ctx.registry, &cr, ctx.cascade).await?;

        let remaining: Vec<String> = vz
            .finalizers()
            .iter()
            .filter(|f| *f != MODULE_CLEANUP)
            .cloned()
            .collect();
        set_finalizers(&api, &name, remaining).await?;
        info!("Removed finalizer from verrazzano {}", name);
        return Ok(Action::await_change());
    }

    if !has_finalizer {
        let mut finalizers = vz.finalizers().to_vec();
        finalizers.push(MODULE_CLEANUP.to_string());
        set_finalizers(&api, &name, finalizers).await?;
        debug!("Added finalizer to verrazzano {}", name);
    }

    debug!("Reconciling verrazzano: {}", name);

    let outcomes = apply_registered_modules(ctx.store.as_ref(), &ctx.registry, &cr).await?;

    let changed = outcomes
        .iter()
        .filter(|(_, outcome)| matches!(outcome, ModuleOutcome::Created | ModuleOutcome::Updated))
        .count();
    info!("Verrazzano {}: {} modules applied", name, changed);

    Ok(Action::await_change())
}

/// Overwrite the finalizer list of a Verrazzano resource with a merge patch
async fn set_finalizers(api: &Api<Verrazzano>, name: &str, finalizers: Vec<String>) -> Result<()> {
    let patch = json!({
        "metadata": {
            "finalizers": finalizers
        }
    });
    api.patch(name, &PatchParams::apply(FIELD_MANAGER), &Patch::Merge(&patch)).await?;
    Ok(())
}

fn error_policy(_vz: Arc<Verrazzano>, error: &VzError, _ctx: Arc<VerrazzanoReconciler>) -> Action {
    error!("Reconciliation error: {}", error);
    Action::requeue(Duration::from_secs(REQUEUE_SECS))
}
