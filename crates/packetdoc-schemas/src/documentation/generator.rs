//! Main documentation generator
//!
//! Copyright (c) 2025 Packetdoc Team
//! Licensed under the Apache-2.0 license

use crate::documentation::packet::{PacketProcessor, RenderResult, RenderedPacket, SkipReason};
use crate::documentation::templates::{HtmlTemplate, IndexLink};
use crate::loader::{EnumRegistry, SourceSet};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the aggregated listing page
pub const INDEX_FILE_NAME: &str = "index.html";

/// Default heading of the listing page
pub const DEFAULT_INDEX_TITLE: &str = "Game Protocol Documentation";

/// Default number of description characters kept in the listing
pub const DEFAULT_DESCRIPTION_LIMIT: usize = 100;

/// Documentation generator configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Directory receiving the generated pages
    pub output_dir: PathBuf,
    /// Heading and page title of the index
    pub index_title: String,
    /// Description characters shown per listing entry before truncation
    pub description_limit: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("docs"),
            index_title: DEFAULT_INDEX_TITLE.to_string(),
            description_limit: DEFAULT_DESCRIPTION_LIMIT,
        }
    }
}

impl GeneratorConfig {
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }
}

/// Result type for generator operations
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Failures that abort a whole run
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Failed to create output directory '{path}': {source}")]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write index '{path}': {source}")]
    IndexWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Summary of a written packet page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSummary {
    pub packet_id: i64,
    pub title: String,
    pub description: String,
    /// Page file name, relative to the output directory
    pub file_name: String,
}

/// What happened to one input document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentOutcome {
    Rendered(PageSummary),
    Skipped(SkipReason),
}

/// Per-document entry of a [`BatchReport`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentReport {
    pub source: PathBuf,
    #[serde(flatten)]
    pub outcome: DocumentOutcome,
}

impl DocumentReport {
    /// File name of the source document
    pub fn name(&self) -> String {
        self.source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn page(&self) -> Option<&PageSummary> {
        match &self.outcome {
            DocumentOutcome::Rendered(page) => Some(page),
            DocumentOutcome::Skipped(_) => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, DocumentOutcome::Skipped(SkipReason::Failed { .. }))
    }
}

/// Outcome of a whole run, one entry per packet document in scan order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub output_dir: PathBuf,
    pub enums_loaded: usize,
    pub entries: Vec<DocumentReport>,
    pub rendered: usize,
    /// Payload fragments, which never get a page
    pub skipped: usize,
    pub failed: usize,
    /// Path of the written index page
    pub index: Option<PathBuf>,
}

impl BatchReport {
    fn record(&mut self, entry: DocumentReport) {
        match &entry.outcome {
            DocumentOutcome::Rendered(_) => self.rendered += 1,
            DocumentOutcome::Skipped(SkipReason::PayloadFragment { .. }) => self.skipped += 1,
            DocumentOutcome::Skipped(SkipReason::Failed { .. }) => self.failed += 1,
        }
        self.entries.push(entry);
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &DocumentReport> {
        self.entries.iter().filter(|entry| entry.is_failure())
    }
}

/// One line of the index page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingEntry {
    pub packet_id: i64,
    pub title: String,
    /// Truncated description
    pub description: String,
    pub file_name: String,
}

/// Index entries ordered by packet id
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Listing {
    pub entries: Vec<ListingEntry>,
}

impl Listing {
    /// Collect rendered pages, sorted by packet id. The sort is stable, so
    /// packets sharing an id (including the unknown id) keep scan order.
    pub fn from_report(report: &BatchReport, description_limit: usize) -> Self {
        let mut entries: Vec<ListingEntry> = report
            .entries
            .iter()
            .filter_map(DocumentReport::page)
            .map(|page| ListingEntry {
                packet_id: page.packet_id,
                title: page.title.clone(),
                description: truncate_description(&page.description, description_limit),
                file_name: page.file_name.clone(),
            })
            .collect();

        entries.sort_by_key(|entry| entry.packet_id);
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn links(&self) -> Vec<IndexLink<'_>> {
        self.entries
            .iter()
            .map(|entry| IndexLink {
                title: &entry.title,
                description: &entry.description,
                file_name: &entry.file_name,
            })
            .collect()
    }
}

/// Keep the first `limit` characters, marking the cut with `...`
pub fn truncate_description(description: &str, limit: usize) -> String {
    match description.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &description[..cut]),
        None => description.to_string(),
    }
}

/// Main documentation generator
pub struct DocGenerator {
    config: GeneratorConfig,
}

impl DocGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Render every packet document of `sources` and write the index
    pub fn generate(&self, sources: &SourceSet) -> GeneratorResult<BatchReport> {
        self.generate_with_progress(sources, |_| {})
    }

    /// Like [`generate`](Self::generate), calling `on_document` after each document
    pub fn generate_with_progress<F>(&self, sources: &SourceSet, mut on_document: F) -> GeneratorResult<BatchReport>
    where
        F: FnMut(&DocumentReport),
    {
        let output_dir = &self.config.output_dir;
        fs::create_dir_all(output_dir).map_err(|source| GeneratorError::OutputDirectory {
            path: output_dir.clone(),
            source,
        })?;

        // Every enum must be known before the first packet renders
        let registry = EnumRegistry::load(&sources.enum_sources);
        let processor = PacketProcessor::new(&registry);

        let mut report = BatchReport {
            output_dir: output_dir.clone(),
            enums_loaded: registry.len(),
            ..BatchReport::default()
        };

        for path in &sources.packet_documents {
            let span = tracing::debug_span!("document", path = %path.display());
            let _guard = span.enter();

            let outcome = match processor.process_file(path) {
                RenderResult::Rendered(packet) => self.write_page(path, &packet),
                RenderResult::Skipped(reason) => DocumentOutcome::Skipped(reason),
            };

            let entry = DocumentReport {
                source: path.clone(),
                outcome,
            };
            on_document(&entry);
            report.record(entry);
        }

        let listing = Listing::from_report(&report, self.config.description_limit);
        report.index = Some(self.write_index(&listing)?);

        tracing::info!(
            rendered = report.rendered,
            skipped = report.skipped,
            failed = report.failed,
            "Documentation generated"
        );
        Ok(report)
    }

    fn write_page(&self, source: &Path, packet: &RenderedPacket) -> DocumentOutcome {
        let stem = source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_name = format!("{}.html", stem);
        let target = self.config.output_dir.join(&file_name);

        match fs::write(&target, HtmlTemplate::packet_page(packet)) {
            Ok(()) => {
                tracing::debug!(page = %target.display(), "Wrote packet page");
                DocumentOutcome::Rendered(PageSummary {
                    packet_id: packet.packet_id,
                    title: packet.title.clone(),
                    description: packet.description.clone(),
                    file_name,
                })
            }
            Err(e) => {
                tracing::warn!(page = %target.display(), error = %e, "Failed to write packet page");
                DocumentOutcome::Skipped(SkipReason::Failed {
                    message: format!("Failed to write '{}': {}", target.display(), e),
                })
            }
        }
    }

    fn write_index(&self, listing: &Listing) -> GeneratorResult<PathBuf> {
        let path = self.config.output_dir.join(INDEX_FILE_NAME);
        let html = HtmlTemplate::index_page(&self.config.index_title, &listing.links());

        fs::write(&path, html).map_err(|source| GeneratorError::IndexWrite {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(entries = listing.len(), index = %path.display(), "Wrote index page");
        Ok(path)
    }
}
