// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use kube::Client;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use vzkit::apply::ApplierSession;
use vzkit::components::ModuleRegistry;
use vzkit::config::Config;
use vzkit::kubernetes::{ensure_namespace_exists, KubeStore, ObjectStore};
use vzkit::reconcilers::VerrazzanoReconciler;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    info!("Starting Verrazzano platform operator");

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: namespace={}, delete_cascade={}",
        config.namespace, config.delete_cascade
    );

    // Create Kubernetes client
    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    let store: Arc<dyn ObjectStore> = Arc::new(KubeStore::new(client.clone()));
    ensure_namespace_exists(store.as_ref(), &config.namespace).await?;

    if let Some(dir) = &config.manifest_dir {
        info!("Applying bootstrap manifests from {}", dir.display());
        let mut session = ApplierSession::new(store.clone(), config.force_namespace.clone());
        session
            .apply_dir(dir)
            .await
            .with_context(|| format!("failed to apply manifests from {}", dir.display()))?;
        info!("Applied {} bootstrap objects", session.objects().len());
    }

    let reconciler = VerrazzanoReconciler::new(
        client,
        config.namespace.clone(),
        store,
        ModuleRegistry::with_defaults(),
        config.delete_cascade,
    );

    info!("Starting reconciler...");
    reconciler.run().await?;

    // This should never be reached as the reconciler runs forever
    warn!("Reconciler stopped unexpectedly");
    Ok(())
}
