//! Document loading
//!
//! This module reads the input side of a documentation run:
//! - Directory discovery, splitting enum sources from packet documents
//! - JSON parsing with declaration order preserved
//! - The enum registry shared by every rendered packet
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use packetdoc_schemas::loader::{EnumRegistry, SourceSet};
//! use std::path::Path;
//!
//! let sources = SourceSet::discover(Path::new("schemas"))?;
//! let registry = EnumRegistry::load(&sources.enum_sources);
//! println!("{} packets, {} enums", sources.packet_documents.len(), registry.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Packetdoc Team
//! Licensed under the Apache-2.0 license

pub mod discovery;
pub mod enums;
pub mod error;
pub mod parser;

pub use discovery::{is_enum_source, SourceSet, ENUM_FILE_PREFIX};
pub use enums::EnumRegistry;
pub use error::{LoaderError, LoaderResult};
pub use parser::SchemaParser;
