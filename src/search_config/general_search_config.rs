use serde::{Deserialize, Serialize};

use crate::rng::os_random_seed;
use crate::search_config::Fix;

#[derive(Deserialize, Serialize, Debug)]
#[serde(untagged)]
pub enum GeneralSearchConfig {
    Full(FullConfig),
    Unseeded(UnseededConfig),
}

impl GeneralSearchConfig {
    pub fn cfg(&self) -> FullConfig {
        match self {
            Self::Full(cfg) => cfg.clone(),
            Self::Unseeded(cfg) => cfg.to_fixed(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct FullConfig {
    pub seed: u64,
    pub aggregation_rate: usize,
    /// Random nodes are drawn for missing endpoints.
    pub start: Option<usize>,
    pub end: Option<usize>,
    /// Where to write the meta-graph in dot format.
    pub dot_output: Option<String>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct UnseededConfig {
    pub aggregation_rate: usize,
    pub start: Option<usize>,
    pub end: Option<usize>,
    pub dot_output: Option<String>,
}

impl Fix<FullConfig> for UnseededConfig {
    fn to_fixed(&self) -> FullConfig {
        FullConfig {
            seed: (os_random_seed() >> 64) as u64,
            aggregation_rate: self.aggregation_rate,
            start: self.start,
            end: self.end,
            dot_output: self.dot_output.clone(),
        }
    }
}
