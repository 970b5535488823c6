//! cargo-vocabgen — generate Rust IRI-constant modules from RDF
//! vocabularies, driven by a `Vocabgen.toml` manifest.
//!
//! The heavy lifting (fetching, statement classification, identifier
//! resolution, rendering) lives in the [`vocabgen`] crate; this crate is
//! the cargo-facing shell: manifest loading, flag merging, and logging
//! setup.

pub mod cli;
pub mod manifest;

pub use cli::{execute, Args, Cargo};
pub use manifest::Manifest;
