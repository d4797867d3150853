use super::EdgeIndex;

use decorum::R64;
use num_traits::identities::{One, Zero};
use std::cmp::{max, min};
use std::fmt;

/// Index of a pheromone channel, fixed when the graph is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(usize);

impl ChannelId {
    pub fn new(index: usize) -> Self {
        ChannelId(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The Max-Min interval every pheromone value is kept in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PheromoneBounds {
    pub min: R64,
    pub max: R64,
    pub initial: R64,
}

impl PheromoneBounds {
    /// Negative minimums are raised to zero, a maximum below the minimum is raised to it
    /// and the initial value is clamped into the resulting interval.
    pub fn new(min_value: f64, max_value: f64, initial: f64) -> Self {
        let lower = R64::from_inner(min_value.max(0.0));
        let upper = max(lower, R64::from_inner(max_value));
        let mut bounds = PheromoneBounds {
            min: lower,
            max: upper,
            initial: lower,
        };
        bounds.initial = bounds.clamp(R64::from_inner(initial));
        bounds
    }

    pub fn clamp(&self, value: R64) -> R64 {
        max(self.min, min(self.max, value))
    }

    pub fn contains(&self, value: R64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for PheromoneBounds {
    fn default() -> Self {
        PheromoneBounds {
            min: R64::zero(),
            max: R64::one(),
            initial: R64::zero(),
        }
    }
}

/// Pheromone of a single channel on every edge of a graph.
///
/// A colony only ever writes the trail of its own channel, so disjoint trails can be
/// updated from different threads while the rest of the graph stays untouched.
#[derive(Debug, Clone)]
pub struct PheromoneTrail {
    channel: ChannelId,
    values: Vec<R64>,
    bounds: PheromoneBounds,
}

impl PheromoneTrail {
    pub(crate) fn new(channel: ChannelId, edges: usize, bounds: PheromoneBounds) -> Self {
        PheromoneTrail {
            channel,
            values: vec![bounds.initial; edges],
            bounds,
        }
    }

    pub fn channel(&self) -> ChannelId {
        self.channel
    }

    pub fn bounds(&self) -> PheromoneBounds {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Panics if the edge index does not belong to the graph this trail was built for.
    pub fn get(&self, edge: EdgeIndex) -> R64 {
        self.values[edge]
    }

    pub fn iter(&self) -> impl Iterator<Item = R64> + '_ {
        self.values.iter().copied()
    }

    pub fn deposit(&mut self, edge: EdgeIndex, delta: R64) {
        let value = self.values[edge] + delta;
        self.values[edge] = self.bounds.clamp(value);
    }

    pub fn evaporate(&mut self, rate: f64) {
        let keep = R64::from_inner(1.0 - rate);
        let bounds = self.bounds;
        for value in self.values.iter_mut() {
            *value = bounds.clamp(keep * *value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn bounds() -> PheromoneBounds {
        PheromoneBounds::new(0.1, 2.0, 1.0)
    }

    #[test]
    fn bounds_are_sanitized() {
        let b = PheromoneBounds::new(-1.0, -5.0, 3.0);

        assert_eq!(b.min, R64::zero());
        assert_eq!(b.max, R64::zero());
        assert_eq!(b.initial, R64::zero());
    }

    #[test]
    fn deposit_is_capped_at_max() {
        let mut trail = PheromoneTrail::new(ChannelId::new(0), 3, bounds());
        trail.deposit(1, R64::from_inner(5.0));

        assert_eq!(trail.get(1), R64::from_inner(2.0));
        assert_eq!(trail.get(0), R64::from_inner(1.0));
    }

    #[test]
    fn evaporation_stops_at_min() {
        let mut trail = PheromoneTrail::new(ChannelId::new(0), 2, bounds());
        for _ in 0..100 {
            trail.evaporate(0.5);
        }

        assert!(trail.iter().all(|v| approx_eq!(f64, v.into_inner(), 0.1)));
    }
}
