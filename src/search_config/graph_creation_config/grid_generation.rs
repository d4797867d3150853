use serde::{Deserialize, Serialize};

use crate::rng::os_random_seed;
use crate::search_config::Fix;

#[derive(Copy, Clone, Deserialize, Serialize, Debug, PartialEq)]
pub struct GridGeneration {
    pub seed: u64,
    pub size: (usize, usize),
    pub ew_range: (f64, f64),
}

#[derive(Copy, Clone, Deserialize, Serialize, Debug)]
pub struct UnseededGridGeneration {
    pub size: (usize, usize),
    pub ew_range: (f64, f64),
}

impl Fix<GridGeneration> for UnseededGridGeneration {
    fn to_fixed(&self) -> GridGeneration {
        GridGeneration {
            seed: (os_random_seed() >> 64) as u64,
            size: self.size,
            ew_range: self.ew_range,
        }
    }
}
