// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Stateful apply/delete over manifest files, directories, strings and templates.
//!
//! A session is not meant to be shared between concurrent callers; use one session per task.

use crate::apply::{apply_object, delete_object};
use crate::error::{Result, VzError};
use crate::kubernetes::{Cascade, ObjectStore};
use crate::manifest::{parse_str, TemplateRenderer};
use crate::types::UnstructuredObject;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument};

pub struct ApplierSession {
    store: Arc<dyn ObjectStore>,
    namespace: Option<String>,
    renderer: TemplateRenderer,
    objects: Vec<UnstructuredObject>,
    results: Vec<String>,
}

impl ApplierSession {
    /// Create a session writing through `store`. When `namespace` is set, it replaces the
    /// namespace of every object applied or deleted.
    pub fn new(store: Arc<dyn ObjectStore>, namespace: Option<String>) -> Self {
        Self {
            store,
            namespace,
            renderer: TemplateRenderer::new(),
            objects: Vec::new(),
            results: Vec::new(),
        }
    }

    /// Objects applied so far, in application order
    pub fn objects(&self) -> &[UnstructuredObject] {
        &self.objects
    }

    /// Result messages, index-aligned with [`objects`](Self::objects)
    pub fn results(&self) -> &[String] {
        &self.results
    }

    /// Apply every `.yml`/`.yaml` file of `dir` in lexical order
    #[instrument(skip(self, dir), fields(dir = %dir.as_ref().display()))]
    pub async fn apply_dir(&mut self, dir: impl AsRef<Path>) -> Result<()> {
        for file in manifest_files(dir.as_ref()).await? {
            self.apply_file(&file).await?;
        }
        Ok(())
    }

    pub async fn apply_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let text = read_manifest(path.as_ref()).await?;
        self.apply_str(&text).await
    }

    pub async fn apply_str(&mut self, text: &str) -> Result<()> {
        let objects = parse_str(text)?;
        self.apply_objects(objects).await
    }

    /// Render the template file with `data` and apply the result
    pub async fn apply_template_file<T: Serialize>(&mut self, path: impl AsRef<Path>, data: &T) -> Result<()> {
        let template = read_manifest(path.as_ref()).await?;
        let text = self.renderer.render(&template, data)?;
        self.apply_str(&text).await
    }

    /// Render every `.yml`/`.yaml` template of `dir` in lexical order with the same `data`
    /// and apply it. Stops at the first file that fails to render or apply.
    #[instrument(skip(self, dir, data), fields(dir = %dir.as_ref().display()))]
    pub async fn apply_template_dir<T: Serialize>(&mut self, dir: impl AsRef<Path>, data: &T) -> Result<()> {
        for file in manifest_files(dir.as_ref()).await? {
            self.apply_template_file(&file, data).await?;
        }
        Ok(())
    }

    pub async fn apply_template_bytes<T: Serialize>(&mut self, template: &[u8], data: &T) -> Result<()> {
        let text = self.renderer.render(template_str(template)?, data)?;
        self.apply_str(&text).await
    }

    /// Delete the objects of every `.yml`/`.yaml` file of `dir` in lexical order
    #[instrument(skip(self, dir), fields(dir = %dir.as_ref().display()))]
    pub async fn delete_dir(&mut self, dir: impl AsRef<Path>, cascade: Cascade) -> Result<()> {
        for file in manifest_files(dir.as_ref()).await? {
            self.delete_file(&file, cascade).await?;
        }
        Ok(())
    }

    pub async fn delete_file(&mut self, path: impl AsRef<Path>, cascade: Cascade) -> Result<()> {
        let text = read_manifest(path.as_ref()).await?;
        self.delete_str(&text, cascade).await
    }

    pub async fn delete_str(&mut self, text: &str, cascade: Cascade) -> Result<()> {
        let objects = parse_str(text)?;
        self.delete_objects(objects, cascade).await
    }

    pub async fn delete_template_file<T: Serialize>(
        &mut self,
        path: impl AsRef<Path>,
        data: &T,
        cascade: Cascade,
    ) -> Result<()> {
        let template = read_manifest(path.as_ref()).await?;
        let text = self.renderer.render(&template, data)?;
        self.delete_str(&text, cascade).await
    }

    #[instrument(skip(self, dir, data), fields(dir = %dir.as_ref().display()))]
    pub async fn delete_template_dir<T: Serialize>(
        &mut self,
        dir: impl AsRef<Path>,
        data: &T,
        cascade: Cascade,
    ) -> Result<()> {
        for file in manifest_files(dir.as_ref()).await? {
            self.delete_template_file(&file, data, cascade).await?;
        }
        Ok(())
    }

    pub async fn delete_template_bytes<T: Serialize>(
        &mut self,
        template: &[u8],
        data: &T,
        cascade: Cascade,
    ) -> Result<()> {
        let text = self.renderer.render(template_str(template)?, data)?;
        self.delete_str(&text, cascade).await
    }

    /// Delete every tracked object, newest first. Tracking is cleared only when all deletes succeed.
    #[instrument(skip(self), fields(tracked = self.objects.len()))]
    pub async fn delete_all(&mut self, cascade: Cascade) -> Result<()> {
        for obj in self.objects.iter().rev() {
            delete_object(self.store.as_ref(), obj.clone(), self.namespace.as_deref(), cascade).await?;
        }
        info!("Deleted {} tracked objects", self.objects.len());
        self.objects.clear();
        self.results.clear();
        Ok(())
    }

    async fn apply_objects(&mut self, objects: Vec<UnstructuredObject>) -> Result<()> {
        for obj in objects {
            let outcome = apply_object(self.store.as_ref(), obj, self.namespace.as_deref()).await?;
            info!("{}", outcome.message);
            self.objects.push(outcome.object);
            self.results.push(outcome.message);
        }
        Ok(())
    }

    async fn delete_objects(&mut self, objects: Vec<UnstructuredObject>, cascade: Cascade) -> Result<()> {
        for obj in objects {
            delete_object(self.store.as_ref(), obj, self.namespace.as_deref(), cascade).await?;
        }
        Ok(())
    }
}

fn template_str(template: &[u8]) -> Result<&str> {
    std::str::from_utf8(template)
        .map_err(|e| VzError::TemplateError(format!("template is not valid UTF-8: {}", e)))
}

async fn read_manifest(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| VzError::ManifestReadError {
            path: path.to_path_buf(),
            source,
        })
}

/// Regular `.yml`/`.yaml` files directly under `dir`, sorted by path
async fn manifest_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let read_error = |source| VzError::ManifestReadError {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(read_error)?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(read_error)? {
        let path = entry.path();
        let is_manifest = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yml") | Some("yaml")
        );
        if is_manifest && entry.file_type().await.map_err(read_error)?.is_file() {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(VzError::NoManifestsFound(dir.display().to_string()));
    }
    files.sort();
    Ok(files)
}
