use std::path::Path;

use csv::{ByteRecord, StringRecord};

use crate::error::ProcessError;

pub mod amount;
pub mod date;

const UTF8_BYTE_ORDER_MARK: &[u8] = b"\xEF\xBB\xBF";

/// How to split an input file into rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputFormat {
    pub delimiter: u8,
    pub has_header: bool,
}

/// One input row, fields in input column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line of the row in the input file, for diagnostics
    pub line: u64,
    pub fields: Vec<String>,
}

impl RawRow {
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub header: Option<Vec<String>>,
    pub rows: Vec<RawRow>,
    /// Rows that were dropped because they were malformed
    pub skipped: usize,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header
            .as_ref()?
            .iter()
            .position(|column| column == name)
    }
}

pub fn read_table(path: &Path, format: InputFormat) -> Result<RawTable, ProcessError> {
    log::info!("Reading {}...", path.display());
    let content = std::fs::read(path).map_err(|err| ProcessError::io(path, err))?;
    let table = parse_table(&content, format);
    log::info!(
        "Reading {}...done ({} rows, {} skipped)",
        path.display(),
        table.rows.len(),
        table.skipped,
    );
    Ok(table)
}

/// The first record is the header if `format.has_header`, whatever its encoding. Malformed data
/// rows (field count differing from the first record, invalid UTF-8) are skipped, not reported
/// as errors.
pub fn parse_table(content: &[u8], format: InputFormat) -> RawTable {
    let content = content
        .strip_prefix(UTF8_BYTE_ORDER_MARK)
        .unwrap_or(content);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(format.delimiter)
        .has_headers(false)
        .flexible(false)
        .from_reader(content);

    let mut header = None;
    let mut rows = vec![];
    let mut skipped = 0;
    let mut record = ByteRecord::new();
    loop {
        match reader.read_byte_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {
                let line = record.position().map(|pos| pos.line()).unwrap_or_default();
                if format.has_header && header.is_none() {
                    // The first record is the header, even if it isn't valid UTF-8
                    header = Some(
                        record
                            .iter()
                            .map(|field| String::from_utf8_lossy(field).into_owned())
                            .collect(),
                    );
                    continue;
                }
                match StringRecord::from_byte_record(record.clone()) {
                    Ok(fields) => {
                        let fields = fields.iter().map(str::to_string).collect();
                        rows.push(RawRow { line, fields });
                    }
                    Err(err) => {
                        log::debug!("Skipping line {line}: {err}");
                        skipped += 1;
                    }
                }
            }
            Err(err) => {
                if err.is_io_error() {
                    // Reading from memory, this can't happen, but stop instead of looping forever.
                    log::warn!("Stopped reading: {err}");
                    break;
                }
                log::debug!("Skipping malformed row: {err}");
                skipped += 1;
            }
        }
    }

    RawTable {
        header,
        rows,
        skipped,
    }
}
