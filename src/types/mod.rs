// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resource types: generic objects, the Verrazzano CR and the Module CR.

pub mod module;
pub mod unstructured;
pub mod verrazzano;

pub use module::{Module, ModuleSpec};
pub use unstructured::{ObjectKey, UnstructuredObject};
pub use verrazzano::{Component, VerrazzanoResource};
