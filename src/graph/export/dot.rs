use super::Export;
use crate::graph::{ChannelId, NodeId, PheromoneGraph};

/// Empty struct. Only implements Export trait functionalities.
pub struct Dot {}

impl Export for Dot {
    /// Returns a string representing the graph in Graphviz dot format.
    /// Edge lengths are used as labels, pheromone of the chosen channel is mapped to the
    /// pen width so that reinforced routes stand out.
    fn from_pheromone_graph<IndexType: NodeId>(
        graph: &PheromoneGraph<IndexType>,
        channel: Option<ChannelId>,
        name: &str,
    ) -> String {
        let mut out = format!("digraph {} {{\n", name);

        for node in graph.iter_node_ids() {
            out.push_str(format!("\t\"{}\"\n", node).as_str());
        }

        let trail = channel.and_then(|c| graph.trail(c).ok());
        for edge in graph.iter_edges() {
            let length = edge.length.into_inner();
            match trail {
                Some(trail) => {
                    let pheromone = trail.get(edge.index).into_inner();
                    out.push_str(
                        format!(
                            "\t\"{}\" -> \"{}\" [label=\"{:.3} / {:.3}\" penwidth={:.3}]\n",
                            edge.from,
                            edge.to,
                            length,
                            pheromone,
                            1.0 + 4.0 * pheromone
                        )
                        .as_str(),
                    );
                }
                None => {
                    out.push_str(
                        format!(
                            "\t\"{}\" -> \"{}\" [label=\"{:.3}\"]\n",
                            edge.from, edge.to, length
                        )
                        .as_str(),
                    );
                }
            }
        }

        out.push('}');
        out
    }
}
