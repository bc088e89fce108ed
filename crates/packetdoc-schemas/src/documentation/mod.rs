//! Packet documentation generation
//!
//! This module turns cereal packet schemas into HTML reference pages:
//! - `schema`: typed view of documents, fields and definitions
//! - `resolver`, `table`, `union`: the rendering engine producing a [`model`] tree
//! - `packet`: per-document processing with payload unwrapping
//! - `templates`, `generator`: HTML output and batch runs
//!
//! Copyright (c) 2025 Packetdoc Team
//! Licensed under the Apache-2.0 license

pub mod generator;
pub mod model;
pub mod packet;
pub mod resolver;
pub mod schema;
pub mod table;
pub mod templates;
pub mod union;

pub use generator::{
    BatchReport, DocGenerator, DocumentOutcome, DocumentReport, GeneratorConfig, GeneratorError,
    GeneratorResult, Listing, ListingEntry, PageSummary,
};
pub use model::{EnumTable, FieldRow, Nested, Table, UnionRow, UnionTable, VariantBlock};
pub use packet::{DocumentError, PacketProcessor, RenderResult, RenderedPacket, SkipReason};
pub use resolver::TypeResolver;
pub use schema::{Definitions, FieldSchema, FieldShape, PacketDocument, Schema, SchemaError};
pub use table::{NestedSource, TableRenderer};
pub use templates::HtmlTemplate;
pub use union::UnionRenderer;
