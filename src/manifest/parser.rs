// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Multi-document YAML stream parsing.

use crate::error::{Result, VzError};
use crate::types::UnstructuredObject;
use serde_json::Value;
use std::io::BufRead;

const SEPARATOR: &str = "---";

/// Parse a multi-document YAML string into objects, in document order
pub fn parse_str(text: &str) -> Result<Vec<UnstructuredObject>> {
    parse_lines(text.lines())
}

/// Parse a multi-document YAML stream into objects, in document order
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Vec<UnstructuredObject>> {
    let lines = reader
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| VzError::ParseError(format!("failed to read manifest stream: {}", e)))?;
    parse_lines(lines)
}

fn parse_lines<I, S>(lines: I) -> Result<Vec<UnstructuredObject>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut objects = Vec::new();
    let mut buffer = String::new();
    let mut index = 0;

    for line in lines {
        let line = line.as_ref();
        let trimmed = line.trim();
        if trimmed == SEPARATOR {
            flush(&mut buffer, index, &mut objects)?;
            index += 1;
            continue;
        }
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        buffer.push_str(line);
        buffer.push('\n');
    }
    flush(&mut buffer, index, &mut objects)?;

    Ok(objects)
}

/// Decode the buffered document, keeping it only when it has at least one top-level key
fn flush(buffer: &mut String, index: usize, objects: &mut Vec<UnstructuredObject>) -> Result<()> {
    if buffer.is_empty() {
        return Ok(());
    }
    let doc = std::mem::take(buffer);

    let value: Value = serde_yaml::from_str(&doc)
        .map_err(|e| VzError::ParseError(format!("document {}: {}", index, e)))?;
    match value {
        Value::Null => Ok(()),
        Value::Object(map) if map.is_empty() => Ok(()),
        Value::Object(_) => {
            objects.push(UnstructuredObject::from_value(value)?);
            Ok(())
        }
        other => Err(VzError::ParseError(format!(
            "document {} is not a mapping: {}",
            index, other
        ))),
    }
}
