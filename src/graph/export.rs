mod dot;

pub use dot::Dot;

use crate::graph::{ChannelId, NodeId, PheromoneGraph};

/// An exporter for pheromone graphs.
pub trait Export {
    /// Returns a String representation of the graph according to the export format used.
    /// If a channel is given, its pheromone is rendered alongside the edge lengths.
    fn from_pheromone_graph<IndexType: NodeId>(
        graph: &PheromoneGraph<IndexType>,
        channel: Option<ChannelId>,
        name: &str,
    ) -> String;
}
