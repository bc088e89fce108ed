//! Per-document processing
//!
//! Copyright (c) 2025 Packetdoc Team
//! Licensed under the Apache-2.0 license

use crate::documentation::model::Table;
use crate::documentation::schema::{is_payload_title, PacketDocument, ResolvedRef, SchemaError};
use crate::documentation::table::TableRenderer;
use crate::loader::{EnumRegistry, LoaderError, SchemaParser};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Property name of the payload wrapper that gets unwrapped
pub const PAYLOAD_PROPERTY: &str = "mPayload";

/// Reasons a single document could not be rendered
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Load(#[from] LoaderError),

    #[error("Unexpected document shape in '{path}': {source}")]
    Shape { path: PathBuf, source: SchemaError },
}

/// A packet ready to be written as a page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedPacket {
    pub packet_id: i64,
    /// Page title, including the ` (<id>)` suffix when the id is declared
    pub title: String,
    pub description: String,
    pub details: Option<String>,
    /// Field table; `None` for documents without object properties
    pub table: Option<Table>,
}

/// Why a document produced no page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// The document is a Payload fragment, only ever inlined elsewhere
    PayloadFragment { title: String },
    /// Reading or rendering failed
    Failed { message: String },
}

/// Outcome of processing one document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenderResult {
    Rendered(RenderedPacket),
    Skipped(SkipReason),
}

/// Turns packet documents into [`RenderedPacket`]s
#[derive(Debug, Clone, Copy)]
pub struct PacketProcessor<'a> {
    registry: &'a EnumRegistry,
    parser: SchemaParser,
}

impl<'a> PacketProcessor<'a> {
    pub fn new(registry: &'a EnumRegistry) -> Self {
        Self {
            registry,
            parser: SchemaParser::new(),
        }
    }

    /// Process a document file. Failures are logged and reported as a skip;
    /// they never propagate.
    pub fn process_file(&self, path: &Path) -> RenderResult {
        match self.try_process_file(path) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping document");
                RenderResult::Skipped(SkipReason::Failed {
                    message: e.to_string(),
                })
            }
        }
    }

    /// Process a document file, returning failures to the caller
    pub fn try_process_file(&self, path: &Path) -> Result<RenderResult, DocumentError> {
        let value = self.parser.parse_file(path)?;
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();

        self.process_value(&value, stem).map_err(|source| DocumentError::Shape {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Process an already parsed document; `fallback_title` replaces a missing title
    pub fn process_value(&self, value: &Value, fallback_title: &str) -> Result<RenderResult, SchemaError> {
        let document = PacketDocument::from_value(value, fallback_title)?;
        Ok(self.process(&document))
    }

    /// Render a parsed document
    pub fn process(&self, document: &PacketDocument) -> RenderResult {
        let title = document.title();
        if is_payload_title(title) {
            tracing::debug!(title = %title, "Payload fragment, no standalone page");
            return RenderResult::Skipped(SkipReason::PayloadFragment {
                title: title.to_string(),
            });
        }

        let metadata = &document.metadata;
        let display_title = match metadata.packet_id {
            Some(id) => format!("{} ({})", title, id),
            None => title.to_string(),
        };

        let renderer = TableRenderer::new(&document.definitions, self.registry);
        let table = match payload_target(document) {
            Some(target) => {
                tracing::trace!(definition = %target.id, "Unwrapping payload");
                renderer.render_definition(target, "", 0)
            }
            None => renderer.render(&document.schema, "", 0),
        };

        RenderResult::Rendered(RenderedPacket {
            packet_id: metadata.packet_id(),
            title: display_title,
            description: document.schema.description.clone().unwrap_or_default(),
            details: metadata.details.clone(),
            table,
        })
    }
}

/// The Payload definition behind a lone `mPayload` reference, if any.
///
/// Only a declared title counts here; the id fallback used for labels does not.
fn payload_target(document: &PacketDocument) -> Option<ResolvedRef<'_>> {
    let schema = &document.schema;
    if !schema.is_object() {
        return None;
    }

    let [(name, field)] = schema.properties.as_slice() else {
        return None;
    };
    if name != PAYLOAD_PROPERTY {
        return None;
    }

    document
        .definitions
        .resolve(field.reference.as_deref()?)
        .filter(|target| target.schema.title.as_deref().is_some_and(is_payload_title))
}
