//! `Vocabgen.toml` manifest loading.
//!
//! The manifest mirrors the run-wide inputs: output location and variant,
//! cache policy, and the list of vocabularies to generate. Command-line
//! flags override individual fields after loading.
//!
//! ```toml
//! [output]
//! dir = "src/generated"
//! module = "vocab"
//! variant = "modern"
//!
//! [[vocabulary]]
//! url = "http://xmlns.com/foaf/spec/index.ttl"
//! prefix = "foaf"
//! namespace = "http://xmlns.com/foaf/0.1/"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use vocabgen::{FetchOptions, OutputVariant, RunOptions, VocabularySource};

/// The parsed manifest.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Output location and rendering options.
    #[serde(default)]
    pub output: OutputSection,
    /// Cache policy.
    #[serde(default)]
    pub cache: CacheSection,
    /// Vocabularies to generate, in manifest order.
    #[serde(rename = "vocabulary", default)]
    pub vocabularies: Vec<VocabularyEntry>,
}

/// `[output]` section.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct OutputSection {
    /// Root directory for generated files.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    /// Optional `::`-separated module path under the output root.
    #[serde(default)]
    pub module: Option<String>,
    /// Rendering variant.
    #[serde(default)]
    pub variant: OutputVariant,
    /// Overwrite existing output files.
    #[serde(default)]
    pub overwrite: bool,
    /// Keep deprecated entities, marked, instead of dropping them.
    #[serde(default)]
    pub include_deprecated: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            module: None,
            variant: OutputVariant::default(),
            overwrite: false,
            include_deprecated: false,
        }
    }
}

/// `[cache]` section.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct CacheSection {
    /// Serve repeat fetches from the on-disk cache.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cache root directory.
    #[serde(default = "default_cache_dir")]
    pub dir: PathBuf,
    /// Network timeout in seconds for a single fetch.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: default_cache_dir(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// One `[[vocabulary]]` entry.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VocabularyEntry {
    /// Locator of the vocabulary document.
    pub url: String,
    /// Prefix override; inferred from the document when absent.
    #[serde(default)]
    pub prefix: Option<String>,
    /// Namespace override; inferred from the document when absent.
    #[serde(default)]
    pub namespace: Option<String>,
}

impl Manifest {
    /// Loads and parses a manifest file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or is not a valid
    /// manifest.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse manifest {}", path.display()))
    }

    /// The vocabulary sources, in manifest order.
    #[must_use]
    pub fn sources(&self) -> Vec<VocabularySource> {
        self.vocabularies
            .iter()
            .map(|entry| VocabularySource {
                url: entry.url.clone(),
                prefix: entry.prefix.clone(),
                namespace: entry.namespace.clone(),
            })
            .collect()
    }

    /// Run options derived from the manifest sections.
    #[must_use]
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            output_dir: self.output.dir.clone(),
            module_path: self.output.module.clone(),
            variant: self.output.variant,
            overwrite: self.output.overwrite,
            include_deprecated: self.output.include_deprecated,
            fetch: FetchOptions {
                use_cache: self.cache.enabled,
                cache_dir: self.cache.dir.clone(),
                timeout: Duration::from_secs(self.cache.timeout_secs),
                ..FetchOptions::default()
            },
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("src/generated")
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".vocabgen-cache")
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}
