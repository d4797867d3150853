use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Deserialize, Serialize, Debug, PartialEq)]
pub struct RingGeneration {
    pub size: usize,
    pub length: f64,
}
