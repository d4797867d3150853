mod colony_config;
mod general_search_config;
mod graph_creation_config;

pub use colony_config::ColonyConfig;
pub use general_search_config::{FullConfig, GeneralSearchConfig, UnseededConfig};
pub use graph_creation_config::{
    ErdosRenyiGeneration, FileLoad, GraphCreationConfig, GridGeneration, RingGeneration,
    UnseededErdosRenyiGeneration, UnseededGridGeneration,
};

use crate::graph::PheromoneGraph;

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

pub trait Fix<CorrectType> {
    fn to_fixed(&self) -> CorrectType;
}

#[derive(Deserialize, Serialize, Debug)]
pub struct SearchConfig {
    pub search: GeneralSearchConfig,
    pub colony: ColonyConfig,
    pub graph_creation: GraphCreationConfig,
}

impl SearchConfig {
    /// Reads a `.yaml`, `.yml` or `.ron` file and validates it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SearchConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        let content = fs::read_to_string(path)
            .map_err(|e| SearchConfigError::MissingFile(format!("{}: {}", path.display(), e)))?;

        match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            Some("ron") => Self::from_ron_str(&content),
            _ => Err(SearchConfigError::UnsupportedFormat(
                path.display().to_string(),
            )),
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, SearchConfigError> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| SearchConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_ron_str(content: &str) -> Result<Self, SearchConfigError> {
        let config: Self =
            ron::de::from_str(content).map_err(|e| SearchConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SearchConfigError> {
        self.colony.validate()?;
        self.graph_creation.validate()
    }

    /// Builds the configured graph with enough channels for the configured search.
    pub fn graph(&self) -> Result<PheromoneGraph<usize>, SearchConfigError> {
        let required = self.colony.search_params(0).required_channels();
        let channels = self.graph_creation.channels().unwrap_or(required);
        self.graph_creation
            .builder()?
            .build(channels, self.colony.bounds())
            .map_err(|e| SearchConfigError::InvalidGraphConfig(e.to_string()))
    }
}

#[derive(Debug, PartialEq)]
pub enum SearchConfigError {
    NotFileBased,
    NotGrid,
    NotErdosRenyi,
    InvalidGraphConfig(String),
    InvalidColonyConfig(String),
    UnsupportedFormat(String),
    MissingFile(String),
    Parse(String),
}

impl fmt::Display for SearchConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFileBased => write!(f, "Config is not a valid file import config."),
            Self::NotGrid => write!(f, "Config is not a valid grid generation config."),
            Self::NotErdosRenyi => write!(f, "Config is not a valid ErdosRenyi generation config."),
            Self::InvalidGraphConfig(msg) => write!(f, "{}", msg),
            Self::InvalidColonyConfig(msg) => write!(f, "{}", msg),
            Self::UnsupportedFormat(file) => {
                write!(f, "Unsupported config format, use yaml or ron: {}", file)
            }
            Self::MissingFile(msg) => write!(f, "Missing config file: {}", msg),
            Self::Parse(msg) => write!(f, "Config could not be parsed: {}", msg),
        }
    }
}

impl Error for SearchConfigError {}
