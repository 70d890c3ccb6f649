use chrono::{Datelike as _, NaiveDate};

use crate::error::ProcessError;

/// Month names, January first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthTable(pub [&'static str; 12]);

impl MonthTable {
    pub fn name(&self, date: NaiveDate) -> &'static str {
        self.0[date.month0() as usize]
    }
}

pub const SPANISH_MONTHS: MonthTable = MonthTable([
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

impl DateRange {
    pub fn spanning(dates: impl IntoIterator<Item = NaiveDate>) -> Result<Self, ProcessError> {
        dates
            .into_iter()
            .fold(None, |range: Option<DateRange>, date| {
                Some(match range {
                    None => DateRange {
                        earliest: date,
                        latest: date,
                    },
                    Some(range) => DateRange {
                        earliest: range.earliest.min(date),
                        latest: range.latest.max(date),
                    },
                })
            })
            .ok_or(ProcessError::EmptyResult)
    }
}

/// e.g. `05 de marzo al 20 de marzo 2024 MP.csv`
pub fn file_name(range: &DateRange, suffix: &str, months: &MonthTable) -> String {
    format!(
        "{:02} de {} al {:02} de {} {} {}.csv",
        range.earliest.day(),
        months.name(range.earliest),
        range.latest.day(),
        months.name(range.latest),
        range.latest.year(),
        suffix,
    )
}
