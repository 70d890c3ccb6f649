use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::ProcessError;
use crate::export::write_table;
use crate::import::read_table;
use crate::naming::{file_name, DateRange, SPANISH_MONTHS};
use crate::rules::{self, BankRules, OutputRecord, PaymentProcessorRules, RuleSet};

/// Which kind of export the input file is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Variant {
    /// MercadoPago settlement report
    #[value(name = "mercadopago")]
    PaymentProcessor,
    /// Credicoop account statement
    #[value(name = "credicoop")]
    Bank,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::PaymentProcessor, Variant::Bank];

    pub fn display_name(&self) -> &'static str {
        match self {
            Variant::PaymentProcessor => "MercadoPago",
            Variant::Bank => "Credicoop",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessReport {
    pub output_path: PathBuf,
    pub date_range: DateRange,
    pub rows_read: usize,
    pub rows_kept: usize,
}

/// Clean up `file_path` and write the result next to it. Returns the path of the written file.
pub fn process(file_path: &Path, variant: Variant) -> Result<PathBuf, ProcessError> {
    process_with_config(file_path, variant, &Config::default()).map(|report| report.output_path)
}

pub fn process_with_config(
    file_path: &Path,
    variant: Variant,
    config: &Config,
) -> Result<ProcessReport, ProcessError> {
    config.validate()?;
    log::info!("Processing {} as {variant}...", file_path.display());
    let report = match variant {
        Variant::PaymentProcessor => run(file_path, &PaymentProcessorRules)?,
        Variant::Bank => run(file_path, &BankRules::new(&config.bank.concept_denylist))?,
    };
    log::info!("Processing {} as {variant}...done", file_path.display());
    Ok(report)
}

fn run<S: RuleSet>(file_path: &Path, rules: &S) -> Result<ProcessReport, ProcessError> {
    let table = read_table(file_path, rules.input_format())?;
    let records = rules::apply(rules, &table)?;
    let date_range = DateRange::spanning(records.iter().map(OutputRecord::date))?;

    let format = rules.output_format();
    let output_path = output_directory(file_path).join(file_name(
        &date_range,
        format.file_name_suffix,
        &SPANISH_MONTHS,
    ));
    let rows_kept = records.len();
    write_table(
        &output_path,
        &format,
        records.into_iter().map(OutputRecord::into_fields),
    )?;

    Ok(ProcessReport {
        output_path,
        date_range,
        rows_read: table.rows.len(),
        rows_kept,
    })
}

fn output_directory(file_path: &Path) -> &Path {
    file_path.parent().unwrap_or_else(|| Path::new(""))
}
