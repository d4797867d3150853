use serde::{Deserialize, Serialize};

/// A csv edge list with `from,to,length` columns.
#[derive(Clone, Deserialize, Serialize, Debug, PartialEq)]
pub struct FileLoad {
    pub filename: String,
    /// Overrides the amount of pheromone channels the search asks for.
    pub channels: Option<usize>,
}
