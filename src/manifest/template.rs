// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Template rendering for manifest templates.

use crate::error::{Result, VzError};
use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

/// Renders manifest templates. Referencing a variable missing from the data is an error.
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);

        env.add_function("contains", contains);
        env.add_function("nindent", nindent);
        env.add_function("multiLineIndent", multi_line_indent);

        Self { env }
    }

    /// Render `template` with the fields of `data` as top-level variables
    pub fn render<S: Serialize>(&self, template: &str, data: &S) -> Result<String> {
        self.env
            .render_str(template, data)
            .map_err(|e| VzError::TemplateError(e.to_string()))
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Usage: {{ contains(name, "prod") }}
pub fn contains(s: String, substr: String) -> bool {
    s.contains(&substr)
}

/// Trim every line and re-join them indented by `spaces`, without a trailing newline
///
/// Usage: {{ nindent(4, config) }}
pub fn nindent(spaces: usize, text: String) -> String {
    let indent = " ".repeat(spaces);
    text.lines()
        .map(|line| format!("{}{}", indent, line.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prefix every line with `spaces` spaces, keeping embedded and trailing newlines
///
/// Usage: {{ multiLineIndent(4, certificate) }}
pub fn multi_line_indent(spaces: usize, text: String) -> String {
    let indent = " ".repeat(spaces);
    text.split_inclusive('\n')
        .map(|line| format!("{}{}", indent, line))
        .collect()
}
