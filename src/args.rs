use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::Variant;

/// Clean up a MercadoPago or Credicoop CSV export. The result is written next to the input,
/// named after the date range it covers.
#[derive(Parser, Debug)]
pub struct Args {
    /// Path to the exported CSV file. Asked for if missing.
    pub input: Option<PathBuf>,

    /// Kind of export. Asked for if missing.
    #[clap(short, long, value_enum)]
    pub variant: Option<Variant>,

    /// YAML config file, e.g. to change the concepts that are dropped from bank statements
    #[clap(short, long)]
    pub config: Option<PathBuf>,
}

pub fn parse() -> Args {
    Args::parse()
}
