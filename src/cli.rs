use clap::Parser;
use std::path::PathBuf;

/// Checks which species in a spreadsheet are covered by the iNaturalist vision model.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Spreadsheet whose first column lists species names (xlsx, xls, ods, csv, ...).
    #[arg(short = 'f', long, value_name = "FILE")]
    pub excel_file: PathBuf,
}
