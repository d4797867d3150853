use super::Generate;
use crate::graph::{GraphBuilder, GraphError};

/// A cycle of `size` nodes where every node is connected to both of its neighbors.
pub struct Ring {
    size: usize,
    length: f64,
}

impl Ring {
    pub fn new(size: usize, length: f64) -> Self {
        Ring { size, length }
    }
}

impl Generate for Ring {
    fn generate(&mut self) -> Result<GraphBuilder<usize>, GraphError<usize>> {
        let mut builder = GraphBuilder::new();
        for i in 0..self.size {
            builder.add_node(i);
        }

        // a ring of two nodes would add the same pair of edges twice
        if self.size > 2 {
            for i in 0..self.size {
                builder.add_undirected_edge((i, (i + 1) % self.size), self.length)?;
            }
        } else if self.size == 2 {
            builder.add_undirected_edge((0, 1), self.length)?;
        }

        Ok(builder)
    }
}
