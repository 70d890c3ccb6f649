pub mod args;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod naming;
pub mod pipeline;
pub mod rules;
pub mod terminal;

pub use error::{ErrorKind, ProcessError};
pub use pipeline::{process, process_with_config, ProcessReport, Variant};
