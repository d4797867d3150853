pub mod graph;
pub mod metaheuristic;
pub mod rng;
pub mod search;
pub mod search_config;
