//! Builds the person factory and prints the person chosen by a key.

// Keep the built-in `#[person_type]` registrations in the final binary.
extern crate persons;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use persons::PersonFactory;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "person-factory-demo", about = "Pick a person implementation by key")]
struct Args {
    /// Deciding factor, e.g. `female`, `f`, `male`, `m`.
    #[arg(default_value = "female")]
    key: String,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// List registered keys and exit.
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = factory_config::load(args.config.as_deref())?;
    let factory = PersonFactory::from_config(&config).context("building person factory")?;

    if args.list {
        for descriptor in factory.registry().implementations() {
            println!(
                "{:<12} {:<32} {}",
                descriptor.display_name(),
                descriptor.id(),
                descriptor.keys().join(", ")
            );
        }
        return Ok(());
    }

    let person = factory
        .person_for(&args.key)
        .with_context(|| format!("no person for `{}`", args.key))?;
    info!(key = %args.key, kind = person.kind(), "person created");
    println!("{person:?}");
    Ok(())
}
