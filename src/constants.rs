// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Kubernetes annotation keys written by vzkit
pub mod annotations {
    /// Full serialized desired object as of the last apply
    pub const LAST_APPLIED_CONFIG: &str = "kubectl.kubernetes.io/last-applied-configuration";
}

/// Kubernetes label keys written by vzkit
pub mod labels {
    /// Marks a Module resource as created by the Verrazzano platform operator
    pub const MODULE_OWNER: &str = "platform.verrazzano.io/module-owner";
    /// Value stored under [`MODULE_OWNER`]
    pub const MODULE_OWNER_VALUE: &str = "verrazzano";
}

/// Finalizers placed on watched resources
pub mod finalizers {
    /// Holds a Verrazzano resource until its Modules have been deleted
    pub const MODULE_CLEANUP: &str = "install.verrazzano.io/module-cleanup";
}

/// Field manager recorded on patches issued by the reconciler
pub const FIELD_MANAGER: &str = "verrazzano-platform-operator";

/// Top-level object fields that never take part in merging or pruning
pub mod fields {
    pub const API_VERSION: &str = "apiVersion";
    pub const KIND: &str = "kind";
    pub const METADATA: &str = "metadata";
    pub const SPEC: &str = "spec";
}

/// Module adapter defaults
pub mod modules {
    /// Namespace where Module resources are created
    pub const MODULE_NAMESPACE: &str = "verrazzano-install";
    /// Suffix of the ConfigMap holding generated Helm values for a module
    pub const GENERATED_VALUES_SUFFIX: &str = "-values";
    /// Key inside the generated ConfigMap
    pub const GENERATED_VALUES_KEY: &str = "values.yaml";
}

/// Requeue delay used by the reconciler error policy
pub const REQUEUE_SECS: u64 = 60;
