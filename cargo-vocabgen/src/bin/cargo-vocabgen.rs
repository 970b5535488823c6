//! `cargo vocabgen` entry point.

use anyhow::Result;
use clap::Parser;

use cargo_vocabgen::{execute, Cargo};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let Cargo::Vocabgen(args) = Cargo::parse();
    execute(&args)
}
