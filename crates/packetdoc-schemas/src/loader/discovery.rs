//! Input directory discovery
//!
//! Copyright (c) 2025 Packetdoc Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use std::path::{Path, PathBuf};

/// File name prefix marking enum source documents
pub const ENUM_FILE_PREFIX: &str = "enum_";

/// Extension of every document the tool reads
pub const DOCUMENT_EXTENSION: &str = "json";

/// The documents found in one input directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSet {
    /// Directory the documents were collected from
    pub root: PathBuf,
    /// Enum sources, used only to populate the enum registry
    pub enum_sources: Vec<PathBuf>,
    /// Packet documents, in scan order
    pub packet_documents: Vec<PathBuf>,
}

impl SourceSet {
    /// Scan `dir` (non-recursively) for JSON documents.
    ///
    /// Both lists are sorted by file name so that scan order is stable across
    /// platforms and file systems.
    pub fn discover(dir: &Path) -> LoaderResult<Self> {
        if !dir.exists() {
            return Err(LoaderError::InputNotFound {
                path: dir.to_path_buf(),
            });
        }
        if !dir.is_dir() {
            return Err(LoaderError::NotADirectory {
                path: dir.to_path_buf(),
            });
        }

        let entries = std::fs::read_dir(dir).map_err(|e| LoaderError::io_error(dir, e))?;

        let mut enum_sources = Vec::new();
        let mut packet_documents = Vec::new();

        for entry in entries {
            let path = entry.map_err(|e| LoaderError::io_error(dir, e))?.path();
            if !path.is_file() || !has_document_extension(&path) {
                continue;
            }

            if is_enum_source(&path) {
                enum_sources.push(path);
            } else {
                packet_documents.push(path);
            }
        }

        enum_sources.sort();
        packet_documents.sort();

        tracing::debug!(
            root = %dir.display(),
            enums = enum_sources.len(),
            packets = packet_documents.len(),
            "Scanned input directory"
        );

        Ok(Self {
            root: dir.to_path_buf(),
            enum_sources,
            packet_documents,
        })
    }

    /// True when there is nothing to render
    pub fn is_empty(&self) -> bool {
        self.packet_documents.is_empty()
    }
}

/// Whether a path names an enum source document
pub fn is_enum_source(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with(ENUM_FILE_PREFIX))
        .unwrap_or(false)
}

fn has_document_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(DOCUMENT_EXTENSION))
        .unwrap_or(false)
}
