use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ProcessError;

const DEFAULT_CONCEPT_DENYLIST: &[&str] = &["30712536051", "375-0119282"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub bank: BankConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BankConfig {
    /// Bank rows whose concept contains any of these are dropped, e.g. transfers between own accounts
    pub concept_denylist: Vec<String>,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            concept_denylist: DEFAULT_CONCEPT_DENYLIST
                .iter()
                .map(|entry| entry.to_string())
                .collect(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ProcessError> {
        log::info!("Loading config from {}...", path.display());
        let content = std::fs::read_to_string(path).map_err(|err| ProcessError::io(path, err))?;
        let config = Self::parse(&content)?;
        log::info!("Loading config from {}...done", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, ProcessError> {
        let config: Config =
            serde_yaml::from_str(content).map_err(|err| ProcessError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ProcessError> {
        if self
            .bank
            .concept_denylist
            .iter()
            .any(|entry| entry.trim().is_empty())
        {
            // An empty entry is contained in every concept and would drop every row
            return Err(ProcessError::Config(
                "bank.concept_denylist must not contain empty entries".to_string(),
            ));
        }
        Ok(())
    }
}
