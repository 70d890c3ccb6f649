use anyhow::{Context as _, Result};
use console::{style, StyledObject};
use std::path::PathBuf;

use crate::args::Args;
use crate::config::Config;
use crate::pipeline::{self, ProcessReport, Variant};
use crate::terminal;

pub fn main(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::load(path).context("Failed to load config")?,
        None => Config::default(),
    };
    let input = match args.input {
        Some(input) => input,
        None => PathBuf::from(terminal::prompt("CSV file to clean up")?.trim()),
    };
    let variant = match args.variant {
        Some(variant) => variant,
        None => Variant::ALL[terminal::select("Kind of export", &Variant::ALL)?],
    };

    let report = pipeline::process_with_config(&input, variant, &config)
        .with_context(|| format!("Failed to process {} as {variant}", input.display()))?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &ProcessReport) {
    println!(
        "{} {}",
        style_header("Saved to"),
        style_path(&report.output_path.display().to_string())
    );
    println!(
        "Kept {} of {} rows",
        style(report.rows_kept).bold(),
        report.rows_read
    );
}

fn style_header(header: &str) -> StyledObject<&str> {
    style(header).bold()
}

fn style_path(path: &str) -> StyledObject<&str> {
    style(path).cyan()
}
