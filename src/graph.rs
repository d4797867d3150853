mod builder;
mod error;
mod pheromone_graph;
mod trail;

pub mod export;
pub mod generate;
pub mod import;

pub use builder::GraphBuilder;
pub use error::GraphError;
pub use pheromone_graph::{EdgeData, EdgeIndex, PheromoneGraph};
pub use trail::{ChannelId, PheromoneBounds, PheromoneTrail};

use std::fmt::{Debug, Display};
use std::hash::Hash;

pub type Edge<IndexType> = (IndexType, IndexType);

/// Everything a node identifier has to provide to be searched by colonies running in parallel.
pub trait NodeId: Copy + Eq + Hash + Ord + Debug + Display + Send + Sync {}
impl<T> NodeId for T where T: Copy + Eq + Hash + Ord + Debug + Display + Send + Sync {}
