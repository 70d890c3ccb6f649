//! MercadoPago settlement exports.
//!
//! The output header is [CANONICAL_COLUMNS], matched to the input fields by position, not by name.
//! If MercadoPago ever reorders its export columns, values silently end up under the wrong
//! header. A header with a different column count, or a required column sitting where
//! [CANONICAL_COLUMNS] names something else, is logged as a warning.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{Filter, OutputRecord, RuleSet};
use crate::error::{ParseError, ProcessError};
use crate::export::OutputFormat;
use crate::import::amount::{format_decimal_comma, parse_decimal};
use crate::import::date::parse_iso8601_date;
use crate::import::{InputFormat, RawRow, RawTable};

/// Output header. Position `i` names the `i`-th input field.
pub const CANONICAL_COLUMNS: [&str; 23] = [
    "EXTERNAL_REFERENCE",
    "SOURCE_ID",
    "USER_ID",
    "PAYMENT_METHOD_TYPE",
    "PAYMENT_METHOD",
    "SITE",
    "TRANSACTION_TYPE",
    "TRANSACTION_AMOUNT",
    "TRANSACTION_CURRENCY",
    "ORIGIN_DATE",
    "FEE_AMOUNT",
    "SETTLEMENT_NET_AMOUNT",
    "SETTLEMENT_CURRENCY",
    "APPROVAL_DATE",
    "REAL_AMOUNT",
    "COUPON_AMOUNT",
    "METADATA",
    "ORDER_ID",
    "SHIPPING_ID",
    "SHIPMENT_MODE",
    "PACK_ID",
    "POI_WALLET_NAME*",
    "POI_BANK_NAME*",
];

const TRANSACTION_AMOUNT: &str = "TRANSACTION_AMOUNT";
const SOURCE_ID: &str = "SOURCE_ID";
const TRANSACTION_DATE: &str = "TRANSACTION_DATE";
const ORDER_ID: &str = "ORDER_ID";

const REQUIRED_COLUMNS: &[&str] = &[TRANSACTION_AMOUNT, SOURCE_ID, TRANSACTION_DATE, ORDER_ID];

/// Input names that are written out under a different canonical name at the same position.
const EXPECTED_RENAMES: &[(&str, &str)] = &[(TRANSACTION_DATE, "ORIGIN_DATE")];

pub const MAX_SOURCE_ID_LEN: usize = 11;

pub struct PaymentProcessorRules;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    amount: usize,
    source_id: usize,
    date: usize,
    order_id: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub amount: Decimal,
    pub source_id: String,
    pub order_id: String,
    pub date: NaiveDate,
    /// All input fields in input order, they're written out by position
    positional_fields: Vec<String>,
    amount_position: usize,
}

impl OutputRecord for Payment {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn into_fields(self) -> Vec<String> {
        let mut fields = self.positional_fields;
        fields[self.amount_position] = format_decimal_comma(self.amount);
        fields
    }
}

/// Describes how `header` deviates from the positional layout [CANONICAL_COLUMNS] assumes,
/// or `None` if the column count matches.
pub fn layout_mismatch(header: &[String]) -> Option<String> {
    if header.len() == CANONICAL_COLUMNS.len() {
        None
    } else {
        Some(format!(
            "Input has {} columns but the output header has {}, values are written by position and may end up under the wrong column",
            header.len(),
            CANONICAL_COLUMNS.len(),
        ))
    }
}

/// Describes each required column whose position in `header` is written out under another
/// canonical name, which means its values end up under the wrong output column.
/// Required columns that are absent are left to header validation.
pub fn misplaced_columns(header: &[String]) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .filter_map(|&name| {
            let position = header.iter().position(|column| column == name)?;
            match CANONICAL_COLUMNS.get(position) {
                Some(&canonical) if canonical == name => None,
                Some(&canonical) if EXPECTED_RENAMES.contains(&(name, canonical)) => None,
                Some(canonical) => Some(format!(
                    "Column {name} is at position {position}, its values are written under {canonical}"
                )),
                None => Some(format!(
                    "Column {name} is at position {position}, past the end of the output header"
                )),
            }
        })
        .collect()
}

impl RuleSet for PaymentProcessorRules {
    type Record = Payment;
    type Columns = Columns;

    fn input_format(&self) -> InputFormat {
        InputFormat {
            delimiter: b';',
            has_header: true,
        }
    }

    fn output_format(&self) -> OutputFormat {
        OutputFormat {
            delimiter: b';',
            header: &CANONICAL_COLUMNS,
            encoding: encoding_rs::UTF_8,
            file_name_suffix: "MP",
        }
    }

    fn required_columns(&self) -> &'static [&'static str] {
        REQUIRED_COLUMNS
    }

    fn resolve_columns(&self, table: &RawTable) -> Result<Columns, ProcessError> {
        let header = table.header.as_deref().unwrap_or_default();
        if let Some(mismatch) = layout_mismatch(header) {
            log::warn!("{mismatch}");
        }
        for misplaced in misplaced_columns(header) {
            log::warn!("{misplaced}");
        }
        for (position, (input, output)) in header.iter().zip(CANONICAL_COLUMNS).enumerate() {
            if input != output {
                log::debug!("Column {position}: '{input}' is written as '{output}'");
            }
        }

        let index = |name: &str| {
            table
                .column_index(name)
                .ok_or_else(|| ProcessError::HeaderValidation {
                    missing: vec![name.to_string()],
                })
        };
        Ok(Columns {
            amount: index(TRANSACTION_AMOUNT)?,
            source_id: index(SOURCE_ID)?,
            date: index(TRANSACTION_DATE)?,
            order_id: index(ORDER_ID)?,
        })
    }

    fn extract(&self, columns: &Columns, row: &RawRow) -> Result<Payment, ParseError> {
        let field = |index: usize| row.get(index).ok_or(ParseError::MissingField(index));
        let amount = parse_decimal(field(columns.amount)?)?;
        let date = parse_iso8601_date(field(columns.date)?)?;
        Ok(Payment {
            amount,
            source_id: field(columns.source_id)?.to_string(),
            order_id: field(columns.order_id)?.to_string(),
            date,
            positional_fields: row.fields.clone(),
            amount_position: columns.amount,
        })
    }

    fn filters(&self) -> Vec<Filter<'_, Payment>> {
        vec![
            Filter::new("non-negative amount", |payment: &Payment| {
                payment.amount >= Decimal::ZERO
            }),
            Filter::new("short source id", |payment: &Payment| {
                payment.source_id.chars().count() <= MAX_SOURCE_ID_LEN
            }),
            Filter::new("no order id", |payment: &Payment| payment.order_id.is_empty()),
        ]
    }
}
