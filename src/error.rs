use std::path::PathBuf;

/// Everything that can make a run fail. The `Display` output is the message shown to the user.
#[derive(thiserror::Error, Debug)]
pub enum ProcessError {
    #[error("The input file is missing the required columns: {}", .missing.join(", "))]
    HeaderValidation { missing: Vec<String> },

    #[error("No rows are left after filtering, can't compute the date range of the output file")]
    EmptyResult,

    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    HeaderValidation,
    EmptyResult,
    Io,
    Config,
}

impl ProcessError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::HeaderValidation { .. } => ErrorKind::HeaderValidation,
            Self::EmptyResult => ErrorKind::EmptyResult,
            Self::Io { .. } | Self::Csv(_) => ErrorKind::Io,
            Self::Config(_) => ErrorKind::Config,
        }
    }
}

/// A single field that couldn't be parsed. Never fails a run, the row gets dropped instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid decimal number: '{0}'")]
    Decimal(String),

    #[error("Invalid date: '{0}'")]
    Date(String),

    #[error("Row has no column {0}")]
    MissingField(usize),
}
