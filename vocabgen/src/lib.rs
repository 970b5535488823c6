//! vocabgen — RDF vocabulary reducer.
//!
//! Consumes a machine-readable vocabulary (a stream of subject–predicate–
//! object statements describing the classes and properties of a schema) and
//! produces a deterministic, deduplicated, name-safe entity list, rendered
//! as a Rust module of IRI constants.
//!
//! # Pipeline
//!
//! | Stage | Module | Role |
//! |-------|--------|------|
//! | Fetch | [`fetch`] | locator → byte stream, with a durable cache |
//! | Classify | [`classify`] | statement stream → ordered entity sets |
//! | Resolve | [`resolve`] | entity sets → collision-free names |
//! | Assemble + render | [`run`], [`render`] | model → generated module |
//!
//! # Entry Point
//!
//! ```no_run
//! use vocabgen::{run, RunOptions, VocabularySource};
//!
//! let sources = vec![VocabularySource::new("http://xmlns.com/foaf/spec/index.ttl")];
//! let report = run(&sources, &RunOptions::default())?;
//! println!("generated {} file(s)", report.generated.len());
//! # Ok::<(), vocabgen::Error>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod classify;
pub mod error;
pub mod fetch;
pub mod model;
pub mod render;
pub mod resolve;
pub mod run;
pub mod stream;

pub use classify::{Classification, ClassificationOutcome};
pub use error::{Error, Result};
pub use fetch::{fetch as fetch_vocabulary, FetchOptions, Format};
pub use model::{
    EntityRecord, EntityRole, Object, ResolvedVocabulary, Statement, VocabularyModel,
    VocabularySource,
};
pub use render::{render, OutputVariant};
pub use resolve::resolve;
pub use run::{run, RunOptions, RunReport};
