//! Packetdoc Schemas - HTML reference documentation for cereal packet schemas
//!
//! This crate reads JSON Schema documents that describe binary protocol
//! packets and renders them as nested HTML tables. Wire-level information
//! comes from the cereal extensions:
//! - `x-underlying-type`: the wire type shown instead of the JSON type
//! - `x-ordinal-index`: field order on the wire
//! - `x-control-value-type`: discriminant type of `oneOf` unions
//! - `x-serialization-options`: free-form options such as `Compression`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use packetdoc_schemas::{DocGenerator, GeneratorConfig, SourceSet};
//! use std::path::Path;
//!
//! let sources = SourceSet::discover(Path::new("schemas"))?;
//! let generator = DocGenerator::new(GeneratorConfig::default().with_output_dir("docs"));
//! let report = generator.generate(&sources)?;
//! println!("{} pages, {} failed", report.rendered, report.failed);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Rendering rules
//!
//! - Fields sort by ordinal; unordered fields render last in declaration order
//! - Definitions whose title ends in `Payload` are never expanded in place
//! - A packet whose only field is an `mPayload` reference to a Payload
//!   definition renders that definition's fields directly
//! - Documents named `enum_*.json` feed the enum registry and get no page
//!
//! Copyright (c) 2025 Packetdoc Team
//! Licensed under the Apache-2.0 license

pub mod documentation;
pub mod loader;

// Re-export commonly used types for convenience
pub use documentation::{
    BatchReport, DocGenerator, DocumentOutcome, DocumentReport, GeneratorConfig, GeneratorError,
    HtmlTemplate, PacketProcessor, RenderResult, RenderedPacket, SkipReason, TableRenderer,
    TypeResolver, UnionRenderer,
};
pub use loader::{EnumRegistry, LoaderError, LoaderResult, SchemaParser, SourceSet};
