mod erdos_renyi;
mod grid;
mod ring;

pub use erdos_renyi::ErdosRenyi;
pub use grid::Grid;
pub use ring::Ring;

use crate::graph::{GraphBuilder, GraphError};

/// A Generator for weighted, directed datasets.
pub trait Generate {
    /// Generates the nodes and weighted edges of a graph, ready to be built with any amount
    /// of pheromone channels.
    fn generate(&mut self) -> Result<GraphBuilder<usize>, GraphError<usize>>;
}
