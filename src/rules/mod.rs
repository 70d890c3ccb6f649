//! Turning raw rows into the rows that end up in the output file.
//!
//! Each export format is a [RuleSet]: which columns it needs, how a row is bound into a typed
//! record, which filters a record has to pass, and how the output looks. [apply] runs any of them.

use chrono::NaiveDate;

use crate::error::{ParseError, ProcessError};
use crate::export::OutputFormat;
use crate::import::{InputFormat, RawRow, RawTable};

pub mod bank;
pub mod payment_processor;

pub use bank::{BankMovement, BankRules};
pub use payment_processor::{Payment, PaymentProcessorRules};

/// A row that survived extraction. Immutable, filters only look at it.
pub trait OutputRecord {
    /// The date used to compute the date range of the output file
    fn date(&self) -> NaiveDate;

    /// Fields of the output row, in output column order
    fn into_fields(self) -> Vec<String>;
}

pub trait RuleSet {
    type Record: OutputRecord;

    /// Column positions resolved from the input header
    type Columns;

    fn input_format(&self) -> InputFormat;

    fn output_format(&self) -> OutputFormat;

    /// Column names that must be present in the input header. Empty means the header isn't checked.
    fn required_columns(&self) -> &'static [&'static str] {
        &[]
    }

    fn resolve_columns(&self, table: &RawTable) -> Result<Self::Columns, ProcessError>;

    /// Bind a row into a typed record. Fails if a field the rules need doesn't parse.
    fn extract(&self, columns: &Self::Columns, row: &RawRow) -> Result<Self::Record, ParseError>;

    /// A record is kept iff it passes all of these
    fn filters(&self) -> Vec<Filter<'_, Self::Record>>;
}

pub struct Filter<'a, R> {
    pub name: &'static str,
    keep: Box<dyn Fn(&R) -> bool + 'a>,
}

impl<'a, R> Filter<'a, R> {
    pub fn new(name: &'static str, keep: impl Fn(&R) -> bool + 'a) -> Self {
        Self {
            name,
            keep: Box::new(keep),
        }
    }

    pub fn keeps(&self, record: &R) -> bool {
        (self.keep)(record)
    }
}

pub fn validate_header(
    required_columns: &[&str],
    header: Option<&[String]>,
) -> Result<(), ProcessError> {
    let header = header.unwrap_or_default();
    let missing: Vec<String> = required_columns
        .iter()
        .filter(|required| !header.iter().any(|column| column == *required))
        .map(|required| required.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ProcessError::HeaderValidation { missing })
    }
}

/// Rows that fail to parse or fail a filter are dropped. Only a bad header fails the whole run.
pub fn apply<S: RuleSet>(rules: &S, table: &RawTable) -> Result<Vec<S::Record>, ProcessError> {
    validate_header(rules.required_columns(), table.header.as_deref())?;
    let columns = rules.resolve_columns(table)?;
    let filters = rules.filters();

    let kept: Vec<S::Record> = table
        .rows
        .iter()
        .filter_map(|row| {
            let record = match rules.extract(&columns, row) {
                Ok(record) => record,
                Err(err) => {
                    log::debug!("Dropping line {}: {}", row.line, err);
                    return None;
                }
            };
            if let Some(failed) = filters.iter().find(|filter| !filter.keeps(&record)) {
                log::debug!("Dropping line {}: failed filter '{}'", row.line, failed.name);
                return None;
            }
            Some(record)
        })
        .collect();

    log::info!("Kept {} of {} rows", kept.len(), table.rows.len());
    Ok(kept)
}
