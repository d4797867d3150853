use serde::Serialize;
use std::ops::AddAssign;
use std::time::Duration;

/// The graph a colony searches. Channel ids are only unique within one graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Graph,
    Meta,
}

impl Default for Layer {
    fn default() -> Self {
        Layer::Graph
    }
}

/// Statistics of one colony iteration, sent to the supervisor.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub layer: Layer,
    pub channel: usize,
    pub iteration: usize,
    pub ants: usize,
    pub successes: usize,
    pub steps: usize,
    pub best_length: Option<f64>,
    pub metric: f64,
    pub cpu_time: Duration,
}

impl Message {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        layer: Layer,
        channel: usize,
        iteration: usize,
        ants: usize,
        successes: usize,
        steps: usize,
        best_length: Option<f64>,
        metric: f64,
        cpu_time: Duration,
    ) -> Self {
        Self {
            layer,
            channel,
            iteration,
            ants,
            successes,
            steps,
            best_length,
            metric,
            cpu_time,
        }
    }

    pub fn get_info(&self) -> MessageInfo {
        MessageInfo {
            iterations: 1,
            ants: self.ants,
            successes: self.successes,
            steps: self.steps,
            best_length: self.best_length,
            metric: self.metric,
            cpu_time_us: self.cpu_time.as_micros() as u64,
        }
    }
}

/// Message contents summed up over several iterations.
#[derive(Default, Debug, Clone, PartialEq, Serialize)]
pub struct MessageInfo {
    pub iterations: usize,
    pub ants: usize,
    pub successes: usize,
    pub steps: usize,
    pub best_length: Option<f64>,
    pub metric: f64,
    pub cpu_time_us: u64,
}

impl AddAssign for MessageInfo {
    fn add_assign(&mut self, other: Self) {
        let best_length = match (self.best_length, other.best_length) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        *self = Self {
            iterations: self.iterations + other.iterations,
            ants: self.ants + other.ants,
            successes: self.successes + other.successes,
            steps: self.steps + other.steps,
            best_length,
            metric: self.metric.max(other.metric),
            cpu_time_us: self.cpu_time_us + other.cpu_time_us,
        };
    }
}
