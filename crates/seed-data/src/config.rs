//! Configuration for seeding runs.

use std::{env, fmt, fs, path::PathBuf, str::FromStr};

use serde::{Deserialize, Serialize};

use catalog::config::MongoSettings;

use crate::{
    datasets::{self, SeedRecord},
    db::SeedError,
};

/// Built-in seed lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    /// Four products with creation and update history.
    #[default]
    Catalog,
    /// Notebook, Coffee and Keyboard, created at seeding time.
    Starter,
}

impl Dataset {
    pub fn records(self) -> Vec<SeedRecord> {
        match self {
            Dataset::Catalog => datasets::catalog(),
            Dataset::Starter => datasets::starter(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dataset::Catalog => "catalog",
            Dataset::Starter => "starter",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dataset {
    type Err = SeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "catalog" => Ok(Dataset::Catalog),
            "starter" => Ok(Dataset::Starter),
            other => Err(SeedError::UnknownDataset(other.to_string())),
        }
    }
}

/// Configuration for seeding operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Connection, target database and document key convention.
    pub mongo: MongoSettings,

    /// Built-in dataset used when no seed file is given.
    pub dataset: Dataset,

    /// JSON array of seed records overriding `dataset`.
    pub seed_file: Option<PathBuf>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            mongo: MongoSettings::default().with_app_name("seed"),
            dataset: Dataset::default(),
            seed_file: None,
        }
    }
}

impl SeedConfig {
    /// Reads the Mongo settings plus `SEED_DATASET` and `SEED_FILE`.
    pub fn from_env() -> Result<Self, SeedError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SeedError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mongo = MongoSettings::from_lookup(&lookup)?.with_app_name("seed");
        let dataset = match get("SEED_DATASET") {
            Some(raw) => raw.parse()?,
            None => Dataset::default(),
        };

        Ok(Self {
            mongo,
            dataset,
            seed_file: get("SEED_FILE").map(PathBuf::from),
        })
    }

    pub fn with_dataset(mut self, dataset: Dataset) -> Self {
        self.dataset = dataset;
        self
    }

    /// Returns the records to seed: the seed file if set, the built-in dataset otherwise.
    pub fn load_records(&self) -> Result<Vec<SeedRecord>, SeedError> {
        match &self.seed_file {
            Some(path) => {
                let raw = fs::read_to_string(path)?;
                Ok(serde_json::from_str(&raw)?)
            }
            None => Ok(self.dataset.records()),
        }
    }

    /// Human-readable source of the records, for logging.
    pub fn source(&self) -> String {
        match &self.seed_file {
            Some(path) => path.display().to_string(),
            None => format!("{} dataset", self.dataset),
        }
    }
}
