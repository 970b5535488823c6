//! Per-vocabulary pipeline: fetch → classify → resolve → assemble → render
//! → write.
//!
//! Vocabularies are processed strictly sequentially; nothing is shared
//! between them. Fetch, format, parse, and naming failures abort the run,
//! since a missing or unreadable vocabulary makes the remaining steps
//! meaningless. A failed write is reported and the run continues with the
//! next entry.

use std::io::Read;
use std::path::PathBuf;

use crate::classify::Classification;
use crate::error::{Error, Result};
use crate::fetch::{fetch, FetchOptions};
use crate::model::{VocabularyModel, VocabularySource};
use crate::render::{render, write_artifact, OutputVariant};
use crate::resolve::resolve;
use crate::stream::feed_document;

/// Run-wide configuration.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Root directory for generated files.
    pub output_dir: PathBuf,
    /// Optional `::`-separated module path mapped to subdirectories under
    /// the output root.
    pub module_path: Option<String>,
    /// Rendering variant.
    pub variant: OutputVariant,
    /// Overwrite existing output files.
    pub overwrite: bool,
    /// Keep deprecated entities, marked, instead of dropping them.
    pub include_deprecated: bool,
    /// Fetch behavior.
    pub fetch: FetchOptions,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("generated"),
            module_path: None,
            variant: OutputVariant::default(),
            overwrite: false,
            include_deprecated: false,
            fetch: FetchOptions::default(),
        }
    }
}

/// What a run produced.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Files written.
    pub generated: Vec<PathBuf>,
    /// Targets skipped because they exist and overwrite is off.
    pub skipped: Vec<PathBuf>,
    /// Targets whose write failed; the run continued past them.
    pub failed: Vec<PathBuf>,
}

/// Processes every vocabulary and writes the generated modules.
///
/// # Errors
///
/// Returns the first fatal error: [`Error::Fetch`],
/// [`Error::FormatUnresolved`], [`Error::Parse`], or
/// [`Error::UnnamedVocabulary`]. Write failures are recorded in the report
/// instead.
pub fn run(sources: &[VocabularySource], options: &RunOptions) -> Result<RunReport> {
    tracing::info!(count = sources.len(), "parsing vocabularies");

    let mut report = RunReport::default();
    for source in sources {
        process(source, options, &mut report)?;
    }
    Ok(report)
}

fn process(
    source: &VocabularySource,
    options: &RunOptions,
    report: &mut RunReport,
) -> Result<()> {
    tracing::info!(url = %source.url, "parsing vocabulary");

    let mut fetched = fetch(&source.url, &options.fetch)?;
    let mut content = String::new();
    fetched
        .reader
        .read_to_string(&mut content)
        .map_err(|e| Error::Fetch {
            locator: source.url.clone(),
            source: e.into(),
        })?;

    let mut accumulator = Classification::new(source);
    feed_document(&source.url, fetched.format, &content, &mut accumulator)?;
    let outcome = accumulator.finish();

    let entities = resolve(&outcome, options.include_deprecated);
    let model = assemble(&outcome.vocabulary, entities)?;

    let target = target_path(options, &model);
    if target.exists() && !options.overwrite {
        tracing::info!(path = %target.display(), "target exists and overwrite is off, skipping");
        report.skipped.push(target);
        return Ok(());
    }

    let content = render(&model, options.variant);
    match write_artifact(&target, &content) {
        Ok(()) => {
            tracing::info!(path = %target.display(), entities = model.entities.len(), "generated");
            report.generated.push(target);
        }
        Err(error) => {
            // Recoverable: one bad target must not block the rest.
            tracing::warn!(%error, path = %target.display(), "failed to write vocabulary");
            report.failed.push(target);
        }
    }
    Ok(())
}

/// Packages the resolved metadata and entities for the renderer.
fn assemble(
    vocabulary: &crate::model::ResolvedVocabulary,
    entities: Vec<crate::model::EntityRecord>,
) -> Result<VocabularyModel> {
    let prefix = vocabulary
        .prefix
        .clone()
        .ok_or_else(|| Error::UnnamedVocabulary {
            locator: vocabulary.locator.clone(),
        })?;
    Ok(VocabularyModel {
        prefix,
        namespace: vocabulary.namespace.clone(),
        locator: vocabulary.locator.clone(),
        entities,
    })
}

fn target_path(options: &RunOptions, model: &VocabularyModel) -> PathBuf {
    let mut path = options.output_dir.clone();
    if let Some(module_path) = &options.module_path {
        for segment in module_path.split("::").filter(|s| !s.is_empty()) {
            path.push(segment);
        }
    }
    path.push(model.file_name());
    path
}
