use crate::graph::{ChannelId, GraphBuilder, GraphError, NodeId, PheromoneBounds, PheromoneGraph};
use crate::metaheuristic::{NeighbourColony, Neighbourhood, Objective, ObjectiveSession, Path};

use std::collections::HashMap;

fn connect<IndexType: NodeId>(
    builder: &mut GraphBuilder<IndexType>,
    from: IndexType,
    to: IndexType,
    proximity: f64,
) -> Result<(), GraphError<IndexType>> {
    if proximity > 0.0 && from != to && !builder.has_edge((from, to)) {
        builder.add_edge((from, to), 1.0 - proximity)?;
    }
    Ok(())
}

/// Compiles the proximities of a trained neighbourhood and both endpoint colonies into a
/// graph over base nodes. Close colonies are joined by short edges, colonies that never
/// reached each other are not joined at all.
pub fn build_meta_graph<IndexType: NodeId>(
    neighbourhood: &Neighbourhood<IndexType>,
    start_colony: &NeighbourColony<IndexType>,
    end_colony: &NeighbourColony<IndexType>,
    bounds: PheromoneBounds,
) -> Result<PheromoneGraph<IndexType>, GraphError<IndexType>> {
    let start = start_colony.get_base_node();
    let end = end_colony.get_base_node();
    let bases = neighbourhood.get_base_nodes();
    let matrix = neighbourhood.get_proximity_matrix();

    let mut builder = GraphBuilder::new();
    builder.add_node(start);
    builder.add_node(end);
    for &base in bases.iter() {
        builder.add_node(base);
    }

    let to_bases = start_colony.get_proximity_vector();
    let from_bases = end_colony.get_proximity_vector();
    for (i, &base) in bases.iter().enumerate() {
        connect(&mut builder, start, base, to_bases[i])?;
        connect(&mut builder, base, end, from_bases[i])?;
        for (j, &other) in bases.iter().enumerate() {
            connect(&mut builder, base, other, matrix[i][j])?;
        }
    }

    builder.build(1, bounds)
}

/// Turns the waypoints of a meta-path into objectives. Later waypoints get higher
/// priorities, so the session leads with the end of the path.
///
/// Panics if a waypoint has no channel, every node of a meta-graph is a colony base.
pub fn objectives_from_meta_path<IndexType: NodeId>(
    meta_path: &Path<IndexType>,
    channels: &HashMap<IndexType, ChannelId>,
) -> ObjectiveSession<IndexType> {
    let objectives = meta_path
        .iter_nodes()
        .skip(1)
        .enumerate()
        .map(|(position, &waypoint)| {
            let channel = match channels.get(&waypoint) {
                Some(&channel) => channel,
                None => panic!("meta-path waypoint {} has no pheromone channel", waypoint),
            };
            Objective::new(waypoint, channel, (position + 1) as f64)
        })
        .collect();

    let mut session = ObjectiveSession::new();
    session.set_objectives(objectives);
    session
}
