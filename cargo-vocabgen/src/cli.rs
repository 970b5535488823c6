//! Command-line interface for the `cargo vocabgen` subcommand.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use vocabgen::{OutputVariant, VocabularySource};

use crate::manifest::Manifest;

/// Wrapper so the binary parses `cargo vocabgen <args>`.
#[derive(Debug, Parser)]
#[command(name = "cargo", bin_name = "cargo")]
pub enum Cargo {
    /// Generate Rust IRI-constant modules from RDF vocabularies.
    #[command(version, about)]
    Vocabgen(Args),
}

/// Arguments of the `vocabgen` subcommand.
#[derive(Debug, clap::Args)]
pub struct Args {
    /// Manifest listing the vocabularies and run options.
    #[arg(long, default_value = "Vocabgen.toml")]
    pub manifest: PathBuf,

    /// Extra vocabulary, `url[,prefix[,namespace]]`. Repeatable.
    #[arg(long = "vocab", value_name = "SPEC")]
    pub vocabularies: Vec<String>,

    /// Output root, overriding the manifest.
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Module path under the output root, overriding the manifest.
    #[arg(long, value_name = "PATH")]
    pub module: Option<String>,

    /// Rendering variant (`modern` or `strings`), overriding the manifest.
    #[arg(long)]
    pub variant: Option<OutputVariant>,

    /// Overwrite existing output files.
    #[arg(long)]
    pub overwrite: bool,

    /// Keep deprecated entities, marked, instead of dropping them.
    #[arg(long)]
    pub include_deprecated: bool,

    /// Bypass the vocabulary cache.
    #[arg(long)]
    pub no_cache: bool,

    /// Cache root directory, overriding the manifest.
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Network timeout in seconds, overriding the manifest.
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,
}

/// Runs the subcommand to completion.
///
/// # Errors
///
/// Returns an error when no vocabularies are configured, the manifest is
/// unreadable, or processing fails with a fatal fetch/format/parse error.
pub fn execute(args: &Args) -> Result<()> {
    let manifest = if args.manifest.exists() {
        Manifest::load(&args.manifest)?
    } else if args.vocabularies.is_empty() {
        bail!(
            "manifest {} not found and no --vocab given",
            args.manifest.display()
        );
    } else {
        Manifest::default()
    };

    let mut sources = manifest.sources();
    for spec in &args.vocabularies {
        sources.push(parse_vocabulary_spec(spec)?);
    }
    if sources.is_empty() {
        bail!("no vocabularies configured; add [[vocabulary]] entries or pass --vocab");
    }

    let mut options = manifest.run_options();
    if let Some(dir) = &args.out_dir {
        options.output_dir.clone_from(dir);
    }
    if args.module.is_some() {
        options.module_path.clone_from(&args.module);
    }
    if let Some(variant) = args.variant {
        options.variant = variant;
    }
    options.overwrite |= args.overwrite;
    options.include_deprecated |= args.include_deprecated;
    if args.no_cache {
        options.fetch.use_cache = false;
    }
    if let Some(dir) = &args.cache_dir {
        options.fetch.cache_dir.clone_from(dir);
    }
    if let Some(secs) = args.timeout_secs {
        options.fetch.timeout = std::time::Duration::from_secs(secs);
    }

    let report = vocabgen::run(&sources, &options)?;

    println!(
        "vocabgen: {} generated, {} skipped, {} failed",
        report.generated.len(),
        report.skipped.len(),
        report.failed.len()
    );
    Ok(())
}

/// Parses a `--vocab url[,prefix[,namespace]]` specification.
fn parse_vocabulary_spec(spec: &str) -> Result<VocabularySource> {
    let mut parts = spec.splitn(3, ',').map(str::trim);
    let Some(url) = parts.next().filter(|u| !u.is_empty()) else {
        bail!("empty --vocab specification");
    };
    Ok(VocabularySource {
        url: url.to_string(),
        prefix: parts.next().filter(|p| !p.is_empty()).map(str::to_string),
        namespace: parts.next().filter(|n| !n.is_empty()).map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocab_spec_parsing() -> Result<()> {
        let bare = parse_vocabulary_spec("http://example.org/v.ttl")?;
        assert_eq!(bare.url, "http://example.org/v.ttl");
        assert_eq!(bare.prefix, None);

        let full = parse_vocabulary_spec("http://example.org/v.ttl, ex, http://example.org/ns/")?;
        assert_eq!(full.prefix.as_deref(), Some("ex"));
        assert_eq!(full.namespace.as_deref(), Some("http://example.org/ns/"));

        assert!(parse_vocabulary_spec("").is_err());
        Ok(())
    }

    #[test]
    fn cli_parses_the_subcommand_form() {
        let Cargo::Vocabgen(args) = Cargo::parse_from([
            "cargo",
            "vocabgen",
            "--vocab",
            "http://example.org/v.ttl,ex",
            "--overwrite",
            "--no-cache",
        ]);
        assert_eq!(args.vocabularies.len(), 1);
        assert!(args.overwrite);
        assert!(args.no_cache);
    }
}
