use serde::{Deserialize, Serialize};

use crate::graph::PheromoneBounds;
use crate::metaheuristic::Params;
use crate::search::SearchParams;
use crate::search_config::SearchConfigError;

fn default_q() -> f64 {
    1.0
}

fn default_pheromone_max() -> f64 {
    1.0
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct ColonyConfig {
    pub colonies: usize,
    pub ant_count: usize,
    pub max_steps: usize,
    pub rho: f64,
    #[serde(default = "default_q")]
    pub q: f64,
    #[serde(default)]
    pub pheromone_min: f64,
    #[serde(default = "default_pheromone_max")]
    pub pheromone_max: f64,
    #[serde(default)]
    pub pheromone_initial: f64,
    pub training_iterations: usize,
    pub endpoint_iterations: usize,
    pub meta_iterations: usize,
    pub final_iterations: usize,
}

impl ColonyConfig {
    pub fn validate(&self) -> Result<(), SearchConfigError> {
        let invalid = |msg: &str| -> Result<(), SearchConfigError> {
            Err(SearchConfigError::InvalidColonyConfig(msg.to_string()))
        };

        if self.colonies == 0 {
            invalid("At least one colony is needed.")
        } else if self.ant_count == 0 {
            invalid("Colonies need at least one ant.")
        } else if self.max_steps == 0 {
            invalid("max_steps has to be positive.")
        } else if !(0.0..=1.0).contains(&self.rho) {
            invalid("rho has to be in [0, 1].")
        } else if !self.q.is_finite() || self.q <= 0.0 {
            invalid("q has to be positive.")
        } else if !(self.pheromone_min.is_finite() && self.pheromone_max.is_finite())
            || self.pheromone_min < 0.0
            || self.pheromone_max < self.pheromone_min
        {
            invalid("Pheromone bounds need 0 <= pheromone_min <= pheromone_max.")
        } else if !self.pheromone_initial.is_finite() {
            invalid("pheromone_initial has to be finite.")
        } else {
            Ok(())
        }
    }

    pub fn bounds(&self) -> PheromoneBounds {
        PheromoneBounds::new(
            self.pheromone_min,
            self.pheromone_max,
            self.pheromone_initial,
        )
    }

    pub fn search_params(&self, seed: u128) -> SearchParams {
        SearchParams::new(
            self.colonies,
            Params::new(self.ant_count, self.max_steps, self.rho, self.q, Some(seed)),
            self.training_iterations,
            self.endpoint_iterations,
            self.meta_iterations,
            self.final_iterations,
        )
    }
}
