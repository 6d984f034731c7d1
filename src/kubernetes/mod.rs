// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities: live-object access and namespace management.

pub mod namespaces;
pub mod store;

pub use namespaces::ensure_namespace_exists;
pub use store::{Cascade, KubeStore, ObjectStore};
