use crate::graph::{ChannelId, GraphError, NodeId, PheromoneGraph};

use std::cmp::Ordering;

/// A waypoint to steer towards by following the pheromone another colony left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Objective<IndexType> {
    pub target: IndexType,
    pub channel: ChannelId,
    pub priority: f64,
}

impl<IndexType> Objective<IndexType> {
    pub fn new(target: IndexType, channel: ChannelId, priority: f64) -> Self {
        Objective {
            target,
            channel,
            priority,
        }
    }
}

/// The objectives shared by all ants of a multi-objective search, highest priority first.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveSession<IndexType> {
    objectives: Vec<Objective<IndexType>>,
}

impl<IndexType> Default for ObjectiveSession<IndexType> {
    fn default() -> Self {
        ObjectiveSession {
            objectives: Vec::new(),
        }
    }
}

impl<IndexType: NodeId> ObjectiveSession<IndexType> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the objectives, ordered by descending priority.
    /// Objectives of equal priority keep their relative order.
    pub fn set_objectives(&mut self, mut objectives: Vec<Objective<IndexType>>) {
        objectives.sort_by(|a, b| {
            b.priority
                .partial_cmp(&a.priority)
                .unwrap_or(Ordering::Equal)
        });
        self.objectives = objectives;
    }

    pub fn clear_objectives(&mut self) {
        self.objectives.clear();
    }

    pub fn objectives(&self) -> &[Objective<IndexType>] {
        &self.objectives
    }

    pub fn len(&self) -> usize {
        self.objectives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objectives.is_empty()
    }

    /// Checks that every objective's channel exists in the graph.
    pub fn validate(&self, graph: &PheromoneGraph<IndexType>) -> Result<(), GraphError<IndexType>> {
        for objective in self.objectives.iter() {
            graph.trail(objective.channel)?;
        }
        Ok(())
    }
}
