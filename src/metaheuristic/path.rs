use crate::graph::{EdgeData, EdgeIndex, NodeId, PheromoneGraph};

use decorum::R64;
use num_traits::identities::Zero;
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, PartialEq)]
pub enum PathError<IndexType: PartialEq> {
    InvalidStartingNode(IndexType),
}

/// The edges one ant traversed in one run, the nodes it passed and their summed length.
#[derive(Debug, Clone, PartialEq)]
pub struct Path<IndexType> {
    node_list: Vec<IndexType>,
    edge_list: Vec<EdgeIndex>,
    length: R64,
}

impl<IndexType> Default for Path<IndexType>
where
    IndexType: PartialEq + Copy,
{
    fn default() -> Self {
        Path::new()
    }
}

impl<IndexType> Path<IndexType>
where
    IndexType: PartialEq + Copy,
{
    pub fn new() -> Self {
        Path {
            node_list: Vec::new(),
            edge_list: Vec::new(),
            length: R64::zero(),
        }
    }

    /// An empty path that already knows where it starts.
    pub fn starting_at(node: IndexType) -> Self {
        Path {
            node_list: vec![node],
            edge_list: Vec::new(),
            length: R64::zero(),
        }
    }

    pub fn from_edges<'e, I>(edges: I) -> Result<Self, PathError<IndexType>>
    where
        IndexType: 'e,
        I: IntoIterator<Item = &'e EdgeData<IndexType>>,
    {
        let mut path = Path::new();
        for edge in edges {
            path.push_edge(edge)?;
        }

        Ok(path)
    }

    pub fn push_edge(&mut self, edge: &EdgeData<IndexType>) -> Result<(), PathError<IndexType>> {
        // If we are looking at the first edge our node list may still be empty.
        // Thus we need to initialize it with the start of this edge.
        if let Some(last) = self.node_list.last() {
            if last != &edge.from {
                return Err(PathError::InvalidStartingNode(edge.from));
            }
        } else {
            self.node_list.push(edge.from);
        }

        self.node_list.push(edge.to);
        self.edge_list.push(edge.index);
        self.length += edge.length;
        Ok(())
    }

    pub fn iter_nodes(&self) -> impl Iterator<Item = &IndexType> + '_ {
        self.node_list.iter()
    }

    pub fn iter_edges(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.edge_list.iter().copied()
    }

    pub fn nodes(&self) -> Vec<IndexType> {
        self.node_list.clone()
    }

    pub fn edges(&self) -> &[EdgeIndex] {
        &self.edge_list
    }

    pub fn start(&self) -> Option<IndexType> {
        self.node_list.first().copied()
    }

    pub fn end(&self) -> Option<IndexType> {
        self.node_list.last().copied()
    }

    /// Number of edges.
    pub fn hops(&self) -> usize {
        self.edge_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edge_list.is_empty()
    }

    pub fn length(&self) -> R64 {
        self.length
    }

    pub fn contains_node(&self, node: IndexType) -> bool {
        self.node_list.contains(&node)
    }
}

impl<IndexType: NodeId> Path<IndexType> {
    /// The first `hops` edges of this path, lengths are looked up in the graph it was walked on.
    pub fn prefix(&self, hops: usize, graph: &PheromoneGraph<IndexType>) -> Self {
        let hops = hops.min(self.edge_list.len());
        let edge_list = self.edge_list[..hops].to_vec();
        let length = edge_list
            .iter()
            .fold(R64::zero(), |acc, &e| acc + graph.edge(e).length);
        Path {
            node_list: self.node_list[..(hops + 1).min(self.node_list.len())].to_vec(),
            edge_list,
            length,
        }
    }
}

/// Picks the cheapest path, ties are broken in favour of fewer hops.
/// The first of several equal candidates wins.
pub fn best_path<'p, IndexType, I>(candidates: I) -> Option<&'p Path<IndexType>>
where
    IndexType: 'p,
    I: IntoIterator<Item = &'p Path<IndexType>>,
{
    let mut best: Option<&Path<IndexType>> = None;
    for candidate in candidates {
        best = match best {
            Some(current)
                if (current.length, current.edge_list.len())
                    <= (candidate.length, candidate.edge_list.len()) =>
            {
                Some(current)
            }
            _ => Some(candidate),
        };
    }
    best
}

impl<IndexType: Display> Display for Path<IndexType> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.node_list
                .iter()
                .map(|x| format!("{}", x))
                .collect::<Vec<String>>()
                .join(" -> ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphBuilder, PheromoneBounds};

    fn edge(index: EdgeIndex, from: usize, to: usize, length: f64) -> EdgeData<usize> {
        EdgeData {
            index,
            from,
            to,
            length: R64::from_inner(length),
        }
    }

    fn edge_list() -> Vec<EdgeData<usize>> {
        vec![
            edge(0, 1, 4, 1.0),
            edge(3, 4, 3, 0.5),
            edge(7, 3, 2, 2.0),
            edge(2, 2, 6, 1.5),
        ]
    }

    fn chain(lengths: &[f64]) -> Path<usize> {
        let edges: Vec<EdgeData<usize>> = lengths
            .iter()
            .enumerate()
            .map(|(i, l)| edge(i, i, i + 1, *l))
            .collect();
        Path::from_edges(edges.iter()).unwrap()
    }

    #[test]
    fn iter_nodes_works() {
        let path = Path::from_edges(edge_list().iter()).unwrap();

        assert!(path.iter_nodes().eq([1usize, 4, 3, 2, 6].iter()));
    }

    #[test]
    fn iter_edges_works() {
        let path = Path::from_edges(edge_list().iter()).unwrap();

        assert!(path.iter_edges().eq(vec![0usize, 3, 7, 2].into_iter()));
        assert_eq!(path.hops(), 4);
    }

    #[test]
    fn length_is_accumulated() {
        let path = Path::from_edges(edge_list().iter()).unwrap();

        assert_eq!(path.length(), R64::from_inner(5.0));
    }

    #[test]
    fn push_edge_errors_on_invalid_from_node() {
        let mut path = Path::from_edges(edge_list().iter()).unwrap();
        let result = path.push_edge(&edge(9, 1, 3, 1.0));

        assert_eq!(result, Err(PathError::InvalidStartingNode(1)));
    }

    #[test]
    fn starting_at_checks_first_edge() {
        let mut path = Path::starting_at(4);

        assert!(path.push_edge(&edge(0, 1, 4, 1.0)).is_err());
        assert!(path.push_edge(&edge(3, 4, 3, 0.5)).is_ok());
        assert_eq!(path.nodes(), vec![4usize, 3]);
    }

    #[test]
    fn prefix_works() {
        let mut builder = GraphBuilder::<usize>::new();
        for id in 0..4 {
            builder.add_node(id);
        }
        builder.add_edge((0, 1), 1.0).unwrap();
        builder.add_edge((1, 2), 0.5).unwrap();
        builder.add_edge((2, 3), 2.0).unwrap();
        let graph = builder.build(1, PheromoneBounds::default()).unwrap();
        let path = Path::from_edges(graph.iter_edges()).unwrap();
        let prefix = path.prefix(2, &graph);

        assert_eq!(prefix.nodes(), vec![0usize, 1, 2]);
        assert_eq!(prefix.edges(), &[0usize, 1]);
        assert_eq!(prefix.length(), R64::from_inner(1.5));
        assert_eq!(path.prefix(10, &graph), path);
    }

    #[test]
    fn display_works() {
        let path = Path::from_edges(edge_list().iter()).unwrap();

        assert_eq!(format!("{}", path), "1 -> 4 -> 3 -> 2 -> 6");
    }

    #[test]
    fn best_path_prefers_lower_cost() {
        let candidates = vec![chain(&[1.5, 1.5]), chain(&[0.75; 4]), chain(&[1.0, 1.0, 0.5])];
        let best = best_path(candidates.iter()).unwrap();

        assert_eq!(best.length(), R64::from_inner(2.5));
        assert_eq!(best.hops(), 3);
    }

    #[test]
    fn best_path_breaks_ties_by_hops() {
        let candidates = vec![chain(&[0.75; 4]), chain(&[1.5, 1.5])];
        let best = best_path(candidates.iter()).unwrap();

        assert_eq!(best.length(), R64::from_inner(3.0));
        assert_eq!(best.hops(), 2);
    }

    #[test]
    fn best_path_of_nothing_is_none() {
        let candidates: Vec<Path<usize>> = Vec::new();

        assert!(best_path(candidates.iter()).is_none());
    }
}
