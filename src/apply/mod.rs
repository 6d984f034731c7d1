// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Applying and deleting manifests against live cluster state.

pub mod delete;
pub mod merge;
pub mod session;

pub use delete::delete_object;
pub use merge::{annotate_last_applied, apply_object, ApplyOutcome, ApplyVerb};
pub use session::ApplierSession;
