// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Platform components: enablement rules and installation through Module resources.

pub mod enabled;
pub mod module;

pub use enabled::*;
pub use module::{
    apply_component_as_module, apply_registered_modules, delete_registered_modules, ModuleDescriptor,
    ModuleFactory, ModuleOutcome, ModuleRegistry,
};
