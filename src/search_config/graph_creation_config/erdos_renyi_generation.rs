use serde::{Deserialize, Serialize};

use crate::rng::os_random_seed;
use crate::search_config::Fix;

#[derive(Copy, Clone, Deserialize, Serialize, Debug, PartialEq)]
pub struct ErdosRenyiGeneration {
    pub seed: u64,
    pub size: usize,
    pub connection_probability: f64,
    pub ew_range: (f64, f64),
}

#[derive(Copy, Clone, Deserialize, Serialize, Debug)]
pub struct UnseededErdosRenyiGeneration {
    pub size: usize,
    pub connection_probability: f64,
    pub ew_range: (f64, f64),
}

impl Fix<ErdosRenyiGeneration> for UnseededErdosRenyiGeneration {
    fn to_fixed(&self) -> ErdosRenyiGeneration {
        ErdosRenyiGeneration {
            seed: (os_random_seed() >> 64) as u64,
            size: self.size,
            connection_probability: self.connection_probability,
            ew_range: self.ew_range,
        }
    }
}
