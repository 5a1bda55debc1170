pub mod cli;
pub mod error;
pub mod inaturalist;
pub mod report;
pub mod spreadsheet;
pub mod taxon;

use clap::Parser;
use cli::Cli;
use error::Result;
use inaturalist::InatClient;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info};
use report::lookup_species;
use spreadsheet::load_species_column;
use std::time::Instant;
use taxon::normalizer::normalize_species_name;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // RUST_LOG overrides the default level
    if let Err(e) = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_target(false)
        .format_timestamp_secs()
        .try_init()
    {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let cli = Cli::parse();
    info!("Starting vision coverage check...");
    info!("Input file: {:?}", cli.excel_file);

    let start_time = Instant::now();

    let species_names = match load_species_column(&cli.excel_file) {
        Ok(names) => names,
        Err(e) => {
            error!("Failed to load species list: {}", e);
            return Err(e);
        }
    };

    if species_names.is_empty() {
        info!("Input file contains no species names. Exiting.");
        return Ok(());
    }

    let client = InatClient::new()?;

    let pb = ProgressBar::new(species_names.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("##-"),
    );

    for raw_name in &species_names {
        let species = normalize_species_name(raw_name);
        pb.set_message(species.clone());

        let outcome = match lookup_species(&client, &species).await {
            Ok(outcome) => outcome,
            Err(e) => {
                pb.abandon();
                error!("Lookup failed for {}: {}", species, e);
                return Err(e);
            }
        };
        if let Some(taxon_id) = outcome.taxon_id() {
            debug!("{} -> taxon {}", species, taxon_id);
        }
        pb.suspend(|| println!("{}", outcome));
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!(
        "Checked {} species in {:.2?}",
        species_names.len(),
        start_time.elapsed()
    );

    Ok(())
}
