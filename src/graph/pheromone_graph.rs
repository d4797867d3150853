use crate::graph::{ChannelId, Edge, GraphError, NodeId, PheromoneBounds, PheromoneTrail};
use crate::rng::rand_index;

use decorum::R64;
use oorandom::Rand64;
use std::collections::{HashMap, HashSet};

pub type EdgeIndex = usize;

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeData<IndexType> {
    pub index: EdgeIndex,
    pub from: IndexType,
    pub to: IndexType,
    pub length: R64,
}

/// A directed graph with static edge lengths and one pheromone trail per channel.
///
/// Nodes are mapped to consecutive internal ids, outgoing edges are kept as adjacency lists.
/// The amount of channels is fixed on construction, colonies claim one each through
/// `allocate_channel`.
#[derive(Debug, Clone)]
pub struct PheromoneGraph<IndexType> {
    nodes: Vec<IndexType>,
    node_map: HashMap<IndexType, usize>,
    edges: Vec<EdgeData<IndexType>>,
    outgoing: Vec<Vec<EdgeIndex>>,
    trails: Vec<PheromoneTrail>,
    allocated: usize,
    bounds: PheromoneBounds,
}

impl<IndexType: NodeId> PheromoneGraph<IndexType> {
    pub(crate) fn from_parts(
        nodes: Vec<IndexType>,
        edges: Vec<(Edge<IndexType>, R64)>,
        channels: usize,
        bounds: PheromoneBounds,
    ) -> Result<Self, GraphError<IndexType>> {
        let mut node_map = HashMap::with_capacity(nodes.len());
        for (i, id) in nodes.iter().enumerate() {
            node_map.insert(*id, i);
        }

        let mut outgoing = vec![Vec::new(); nodes.len()];
        let mut edge_data = Vec::with_capacity(edges.len());
        for (index, ((from, to), length)) in edges.into_iter().enumerate() {
            let inner_from = match node_map.get(&from) {
                Some(&inner) => inner,
                None => return Err(GraphError::MissingNode(from)),
            };
            if !node_map.contains_key(&to) {
                return Err(GraphError::MissingNode(to));
            }

            outgoing[inner_from].push(index);
            edge_data.push(EdgeData {
                index,
                from,
                to,
                length,
            });
        }

        let trails = (0..channels)
            .map(|c| PheromoneTrail::new(ChannelId::new(c), edge_data.len(), bounds))
            .collect();

        Ok(PheromoneGraph {
            nodes,
            node_map,
            edges: edge_data,
            outgoing,
            trails,
            allocated: 0,
            bounds,
        })
    }

    /// Returns true if there are no nodes, or false otherwise.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of nodes in this graph.
    pub fn order(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges in this graph.
    pub fn size(&self) -> usize {
        self.edges.len()
    }

    /// Returns the number of pheromone channels this graph was built with.
    pub fn channels(&self) -> usize {
        self.trails.len()
    }

    pub fn bounds(&self) -> PheromoneBounds {
        self.bounds
    }

    pub fn iter_node_ids(&self) -> impl Iterator<Item = IndexType> + '_ {
        self.nodes.iter().copied()
    }

    pub fn node_ids(&self) -> Vec<IndexType> {
        self.nodes.clone()
    }

    pub fn has_node(&self, id: IndexType) -> bool {
        self.node_map.contains_key(&id)
    }

    pub fn has_edge(&self, edge: Edge<IndexType>) -> bool {
        self.edge_between(edge).is_ok()
    }

    /// Panics if the index was not handed out by this graph.
    pub fn edge(&self, index: EdgeIndex) -> &EdgeData<IndexType> {
        &self.edges[index]
    }

    pub fn edge_between(
        &self,
        edge: Edge<IndexType>,
    ) -> Result<&EdgeData<IndexType>, GraphError<IndexType>> {
        let (from, to) = edge;
        self.iter_outgoing(from)?
            .find(|data| data.to == to)
            .ok_or(GraphError::MissingEdge(edge))
    }

    pub fn iter_edges(&self) -> impl Iterator<Item = &EdgeData<IndexType>> + '_ {
        self.edges.iter()
    }

    /// Returns an iterator over the edges leaving the node with id.
    /// Returns an error if the node is not in the graph.
    pub fn iter_outgoing(
        &self,
        id: IndexType,
    ) -> Result<impl Iterator<Item = &EdgeData<IndexType>> + '_, GraphError<IndexType>> {
        let inner = self.inner_id(id)?;
        Ok(self.outgoing[inner].iter().map(move |&e| &self.edges[e]))
    }

    /// Returns the count of outgoing edges at node with given id.
    pub fn degree(&self, id: IndexType) -> Result<usize, GraphError<IndexType>> {
        Ok(self.outgoing[self.inner_id(id)?].len())
    }

    /// Outgoing edges of a node whose destination has not been visited yet.
    /// An empty result is a regular dead end, not an error.
    pub fn feasible_edges(
        &self,
        id: IndexType,
        visited: &HashSet<IndexType>,
    ) -> Result<Vec<EdgeIndex>, GraphError<IndexType>> {
        Ok(self
            .iter_outgoing(id)?
            .filter(|data| !visited.contains(&data.to))
            .map(|data| data.index)
            .collect())
    }

    /// Returns None for an empty graph.
    pub fn random_node(&self, rng: &mut Rand64) -> Option<IndexType> {
        if self.nodes.is_empty() {
            return None;
        }
        Some(self.nodes[rand_index(rng, self.nodes.len())])
    }

    /// Hands out the next unused channel.
    pub fn allocate_channel(&mut self) -> Result<ChannelId, GraphError<IndexType>> {
        if self.allocated >= self.trails.len() {
            return Err(GraphError::ChannelsExhausted(self.trails.len()));
        }
        let channel = ChannelId::new(self.allocated);
        self.allocated += 1;
        Ok(channel)
    }

    pub fn trail(&self, channel: ChannelId) -> Result<&PheromoneTrail, GraphError<IndexType>> {
        self.trails
            .get(channel.index())
            .ok_or_else(|| GraphError::MissingChannel(channel.index()))
    }

    pub fn trail_mut(
        &mut self,
        channel: ChannelId,
    ) -> Result<&mut PheromoneTrail, GraphError<IndexType>> {
        self.trails
            .get_mut(channel.index())
            .ok_or_else(|| GraphError::MissingChannel(channel.index()))
    }

    /// All trails at once, so that colonies owning different channels can update in parallel.
    pub fn trails_mut(&mut self) -> &mut [PheromoneTrail] {
        &mut self.trails
    }

    /// Pheromone on an edge for the given channel.
    /// Panics if the channel was not built into this graph, use `trail` to check beforehand.
    pub fn pheromone(&self, edge: EdgeIndex, channel: ChannelId) -> R64 {
        self.trails[channel.index()].get(edge)
    }

    pub fn deposit(
        &mut self,
        edge: EdgeIndex,
        channel: ChannelId,
        delta: R64,
    ) -> Result<(), GraphError<IndexType>> {
        self.trail_mut(channel)?.deposit(edge, delta);
        Ok(())
    }

    pub fn evaporate(&mut self, channel: ChannelId, rate: f64) -> Result<(), GraphError<IndexType>> {
        self.trail_mut(channel)?.evaporate(rate);
        Ok(())
    }

    fn inner_id(&self, id: IndexType) -> Result<usize, GraphError<IndexType>> {
        self.node_map
            .get(&id)
            .copied()
            .ok_or(GraphError::MissingNode(id))
    }
}
