use crate::graph::{Edge, GraphError, NodeId, PheromoneBounds, PheromoneGraph};

use decorum::R64;
use std::collections::HashSet;

/// Collects nodes and weighted edges before they are frozen into a `PheromoneGraph`.
///
/// Used for imported datasets, generated graphs and the meta-graph compiled from a
/// neighbourhood's proximity matrix.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder<IndexType: NodeId> {
    nodes: Vec<IndexType>,
    node_set: HashSet<IndexType>,
    edges: Vec<(Edge<IndexType>, R64)>,
    edge_set: HashSet<Edge<IndexType>>,
}

impl<IndexType: NodeId> GraphBuilder<IndexType> {
    pub fn new() -> Self {
        GraphBuilder {
            nodes: Vec::new(),
            node_set: HashSet::new(),
            edges: Vec::new(),
            edge_set: HashSet::new(),
        }
    }

    /// Adds a node, returns false if it was already known.
    pub fn add_node(&mut self, id: IndexType) -> bool {
        if self.node_set.insert(id) {
            self.nodes.push(id);
            true
        } else {
            false
        }
    }

    /// Adds a directed edge between two known nodes.
    pub fn add_edge(
        &mut self,
        edge: Edge<IndexType>,
        length: f64,
    ) -> Result<(), GraphError<IndexType>> {
        let (from, to) = edge;
        if !self.node_set.contains(&from) {
            return Err(GraphError::MissingNode(from));
        } else if !self.node_set.contains(&to) {
            return Err(GraphError::MissingNode(to));
        } else if !length.is_finite() || length < 0.0 {
            return Err(GraphError::InvalidLength(edge));
        } else if self.edge_set.contains(&edge) {
            return Err(GraphError::DuplicateEdge(edge));
        }

        self.edge_set.insert(edge);
        self.edges.push((edge, R64::from_inner(length)));
        Ok(())
    }

    /// Adds the edge in both directions with the same length.
    pub fn add_undirected_edge(
        &mut self,
        edge: Edge<IndexType>,
        length: f64,
    ) -> Result<(), GraphError<IndexType>> {
        self.add_edge(edge, length)?;
        self.add_edge((edge.1, edge.0), length)
    }

    pub fn has_node(&self, id: IndexType) -> bool {
        self.node_set.contains(&id)
    }

    pub fn has_edge(&self, edge: Edge<IndexType>) -> bool {
        self.edge_set.contains(&edge)
    }

    pub fn order(&self) -> usize {
        self.nodes.len()
    }

    pub fn size(&self) -> usize {
        self.edges.len()
    }

    /// Freezes the collected dataset into a graph with the given amount of pheromone channels.
    pub fn build(
        self,
        channels: usize,
        bounds: PheromoneBounds,
    ) -> Result<PheromoneGraph<IndexType>, GraphError<IndexType>> {
        PheromoneGraph::from_parts(self.nodes, self.edges, channels, bounds)
    }
}
