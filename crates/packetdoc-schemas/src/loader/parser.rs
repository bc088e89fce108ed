//! JSON document parsing for packet and enum sources
//!
//! Copyright (c) 2025 Packetdoc Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use serde_json::{Map, Value};
use std::path::Path;

/// Parser for the JSON documents found in an input directory
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaParser;

impl SchemaParser {
    /// Create a new schema parser
    pub fn new() -> Self {
        Self
    }

    /// Read and parse a JSON document from disk
    pub fn parse_file(&self, path: &Path) -> LoaderResult<Value> {
        let content =
            std::fs::read_to_string(path).map_err(|e| LoaderError::io_error(path, e))?;

        self.parse_str(&content, path)
    }

    /// Parse JSON content, using `path` only for error context
    pub fn parse_str(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        // Editors on Windows like to leave a byte order mark behind
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        serde_json::from_str(content).map_err(|e| LoaderError::json_parse_error(path, e))
    }

    /// Parse a document and require a JSON object at the root
    pub fn parse_object_file(&self, path: &Path) -> LoaderResult<Map<String, Value>> {
        match self.parse_file(path)? {
            Value::Object(map) => Ok(map),
            other => Err(LoaderError::unexpected_shape(
                path,
                format!("expected a JSON object at the root, found {}", json_kind(&other)),
            )),
        }
    }
}

/// Human-readable name of a JSON value kind, for error messages
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
