//! Look up a postal code from the command line and print the generated link.
//!
//! Usage: `voices-lookup "K1A 0A6" --name "Pat Smith" --templates ./templates`

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]
#![allow(clippy::print_stdout)]

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use voices_api::{
    config::{Config, TemplatesConfig},
    pipeline::AdvocacyService,
    represent::{HttpRepresentClient, RepresentativeLookup},
    templates::load_catalog,
};
use voices_targeting::TargetingError;

#[derive(Debug, Parser)]
#[command(name = "voices-lookup", version, about = "Find your representatives and draft an email")]
struct Args {
    /// Canadian postal code, e.g. "K1A 0A6"
    postal_code: String,

    /// Your name, used for the signature
    #[arg(long)]
    name: Option<String>,

    /// Template directory (overrides configuration)
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Party mapping file (overrides configuration)
    #[arg(long)]
    party_mapping: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load().map_err(|e| anyhow::anyhow!("{e}"))?;
    let templates = TemplatesConfig {
        dir: args.templates.unwrap_or(config.templates.dir),
        party_mapping_file: args
            .party_mapping
            .unwrap_or(config.templates.party_mapping_file),
    };

    let catalog = Arc::new(load_catalog(&templates).await?);
    let directory = Arc::new(HttpRepresentClient::from_config(&config.represent)?);
    let service = AdvocacyService::new(RepresentativeLookup::new(directory), Arc::clone(&catalog));

    let result = service.lookup(&args.postal_code).await?;
    if !result.has_any_representatives() {
        println!("No representatives found for {}", args.postal_code);
        return Ok(());
    }

    println!("Representatives for {}:", result.normalized_postal_code());
    for rep in result.representatives() {
        let ideology = catalog.ideology_for(rep.party.as_deref());
        println!(
            "  {:<10} {:<12} {} ({}) <{}>",
            rep.level(),
            ideology,
            rep.name,
            rep.elected_office,
            rep.email.as_deref().unwrap_or("no email"),
        );
    }

    match service.compose(&result, args.name.as_deref()) {
        Ok(email) => {
            println!();
            println!("Template: {}", email.template_id);
            println!("CC: {}", email.cc_count);
            println!("{}", email.mailto);
        }
        Err(TargetingError::NoEmailableRecipient) => {
            println!();
            println!("None of these representatives has a published email address.");
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}
