//! Command handler for a documentation run
//!
//! Resolves the effective settings, scans the input directory and drives
//! the generator, reporting progress and the final summary.

use crate::cli::Cli;
use crate::config::{Config, RunSettings};
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use packetdoc_schemas::{BatchReport, DocGenerator, SourceSet};
use tracing::{debug, info};

/// Render every packet document of the input directory
pub fn handle_generate(cli: &Cli, config: &Config, output: &mut OutputWriter) -> Result<BatchReport> {
    let settings = RunSettings::resolve(cli, config)?;
    if !settings.show_progress {
        output.disable_progress();
    }

    output.info(&format!("Input directory: {}", settings.input_dir.display()))?;
    output.info(&format!("Output directory: {}", settings.output_dir.display()))?;

    let sources = {
        let timer = Timer::with_details("discovery", &settings.input_dir.display().to_string());
        let _entered = timer.span().enter();
        SourceSet::discover(&settings.input_dir)?
    };

    if sources.is_empty() {
        return Err(Error::NoDocuments {
            path: settings.input_dir.clone(),
        });
    }

    info!(
        packets = sources.packet_documents.len(),
        enums = sources.enum_sources.len(),
        "Generating documentation"
    );

    let timer = Timer::new("generation");
    let progress = output.progress_bar(sources.packet_documents.len() as u64, "Rendering");
    let generator = DocGenerator::new(settings.generator.clone());
    let report = generator.generate_with_progress(&sources, |entry| {
        debug!(document = %entry.name(), failed = entry.is_failure(), "Document processed");
        if let Some(pb) = &progress {
            pb.set_message(entry.name());
            pb.inc(1);
        }
    })?;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    output.report(&report)?;
    output.info(&format!("Finished in {:.2?}", timer.elapsed()))?;

    if report.has_failures() {
        if settings.fail_on_error {
            return Err(Error::DocumentsFailed { count: report.failed });
        }
        output.warning(&format!(
            "{} document(s) could not be rendered; rerun with --fail-on-error to treat this as an error",
            report.failed
        ))?;
    }

    Ok(report)
}
