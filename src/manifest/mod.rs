// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Manifest text handling: template rendering and YAML document parsing.

pub mod parser;
pub mod template;

pub use parser::{parse_reader, parse_str};
pub use template::TemplateRenderer;
