//! Registry of externally defined enums
//!
//! Enum sources are small documents of the form
//! `{"title": "Color", "enum": ["Red", "Green"]}`. They are loaded once,
//! before any packet is rendered, and are read-only afterwards.
//!
//! Copyright (c) 2025 Packetdoc Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use crate::loader::parser::SchemaParser;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Enum values keyed by the declared enum title
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumRegistry {
    enums: HashMap<String, Vec<String>>,
}

impl EnumRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from enum source files.
    ///
    /// Sources that cannot be read or parsed are skipped with a warning.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Self {
        let parser = SchemaParser::new();
        let mut registry = Self::new();

        for path in paths {
            let path = path.as_ref();
            match Self::read_source(&parser, path) {
                Ok(Some((title, values))) => {
                    tracing::debug!(path = %path.display(), title = %title, values = values.len(), "Loaded enum");
                    registry.insert(title, values);
                }
                Ok(None) => {
                    tracing::debug!(path = %path.display(), "Enum source has no title or values, ignoring");
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Could not load enum");
                }
            }
        }

        registry
    }

    fn read_source(parser: &SchemaParser, path: &Path) -> LoaderResult<Option<(String, Vec<String>)>> {
        let document = parser.parse_object_file(path)?;
        Self::from_document(&Value::Object(document), path)
    }

    /// Extract `(title, values)` from an enum document.
    ///
    /// Returns `Ok(None)` when the document has no title or no `enum` key.
    pub fn from_document(document: &Value, path: &Path) -> LoaderResult<Option<(String, Vec<String>)>> {
        let title = match document.get("title").and_then(Value::as_str) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => return Ok(None),
        };

        let values = match document.get("enum") {
            None => return Ok(None),
            Some(Value::Array(values)) => values.iter().map(enum_value_text).collect(),
            Some(_) => {
                return Err(LoaderError::unexpected_shape(path, "'enum' must be an array"));
            }
        };

        Ok(Some((title, values)))
    }

    /// Register an enum, replacing any previous enum with the same title
    pub fn insert(&mut self, title: impl Into<String>, values: Vec<String>) {
        let title = title.into();
        if self.enums.insert(title.clone(), values).is_some() {
            tracing::debug!(title = %title, "Enum title declared more than once, keeping the last");
        }
    }

    /// Values of the enum with this title
    pub fn get(&self, title: &str) -> Option<&[String]> {
        self.enums.get(title).map(Vec::as_slice)
    }

    /// Whether an enum with this title is registered
    pub fn contains(&self, title: &str) -> bool {
        self.enums.contains_key(title)
    }

    /// Number of registered enums
    pub fn len(&self) -> usize {
        self.enums.len()
    }

    /// True when no enum is registered
    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }
}

/// Text of a single enum value; non-strings keep their JSON spelling
pub(crate) fn enum_value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
