//! Credicoop account statement exports.
//!
//! Columns are addressed by position only, the header row is read and thrown away.
//! Input columns: Fecha, Concepto, Nro.Cpbte., Débito, Crédito, Saldo, Cód.
//! Saldo (the running balance) is never written out.

use chrono::NaiveDate;

use super::{Filter, OutputRecord, RuleSet};
use crate::error::{ParseError, ProcessError};
use crate::export::OutputFormat;
use crate::import::amount::parse_integer_floor;
use crate::import::date::parse_day_month_year;
use crate::import::{InputFormat, RawRow, RawTable};

pub const OUTPUT_COLUMNS: [&str; 6] = [
    "Fecha",
    "Concepto",
    "Nro.Cpbte.",
    "Débito",
    "Crédito",
    "Cód.",
];

mod position {
    pub const DATE: usize = 0;
    pub const CONCEPT: usize = 1;
    pub const VOUCHER_NUMBER: usize = 2;
    pub const DEBIT: usize = 3;
    pub const CREDIT: usize = 4;
    pub const CODE: usize = 6;
}

pub struct BankRules<'a> {
    concept_denylist: &'a [String],
}

impl<'a> BankRules<'a> {
    /// Rows whose concept contains any of `concept_denylist` are dropped
    pub fn new(concept_denylist: &'a [String]) -> Self {
        Self { concept_denylist }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankMovement {
    /// Date as written in the input, it's passed through unchanged
    pub date_text: String,
    pub date: NaiveDate,
    pub concept: String,
    pub voucher_number: String,
    pub debit: i64,
    pub credit: i64,
    pub code: String,
}

impl OutputRecord for BankMovement {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn into_fields(self) -> Vec<String> {
        vec![
            self.date_text,
            self.concept,
            self.voucher_number,
            self.debit.to_string(),
            self.credit.to_string(),
            self.code,
        ]
    }
}

impl RuleSet for BankRules<'_> {
    type Record = BankMovement;
    type Columns = ();

    fn input_format(&self) -> InputFormat {
        InputFormat {
            delimiter: b',',
            has_header: true,
        }
    }

    fn output_format(&self) -> OutputFormat {
        OutputFormat {
            delimiter: b';',
            header: &OUTPUT_COLUMNS,
            encoding: encoding_rs::WINDOWS_1252,
            file_name_suffix: "Credicoop",
        }
    }

    fn resolve_columns(&self, _table: &RawTable) -> Result<(), ProcessError> {
        Ok(())
    }

    fn extract(&self, _columns: &(), row: &RawRow) -> Result<BankMovement, ParseError> {
        let field = |index: usize| row.get(index).ok_or(ParseError::MissingField(index));
        let date_text = field(position::DATE)?;
        Ok(BankMovement {
            date_text: date_text.to_string(),
            date: parse_day_month_year(date_text)?,
            concept: field(position::CONCEPT)?.to_string(),
            voucher_number: field(position::VOUCHER_NUMBER)?.to_string(),
            debit: parse_integer_floor(field(position::DEBIT)?),
            credit: parse_integer_floor(field(position::CREDIT)?),
            code: field(position::CODE)?.to_string(),
        })
    }

    fn filters(&self) -> Vec<Filter<'_, BankMovement>> {
        vec![
            Filter::new("no debit", |movement: &BankMovement| movement.debit <= 0),
            Filter::new("concept not denylisted", move |movement: &BankMovement| {
                !self
                    .concept_denylist
                    .iter()
                    .any(|denied| movement.concept.contains(denied.as_str()))
            }),
        ]
    }
}
