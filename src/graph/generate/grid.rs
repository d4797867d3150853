use super::Generate;
use crate::graph::{GraphBuilder, GraphError};

use std::collections::HashMap;

/// A triangular grid: every cell is connected to its horizontal and vertical neighbors
/// in both directions and to its diagonal neighbors along one axis.
pub struct Grid<'a> {
    size: (usize, usize),
    ew_generator: &'a mut dyn FnMut() -> f64,
}

impl<'a> Grid<'a> {
    pub fn new(size: (usize, usize), ew_generator: &'a mut dyn FnMut() -> f64) -> Grid<'a> {
        Grid { size, ew_generator }
    }

    fn connect(
        &mut self,
        builder: &mut GraphBuilder<usize>,
        from: usize,
        to: usize,
    ) -> Result<(), GraphError<usize>> {
        let length = (self.ew_generator)();
        builder.add_edge((from, to), length)
    }
}

impl<'a> Generate for Grid<'a> {
    fn generate(&mut self) -> Result<GraphBuilder<usize>, GraphError<usize>> {
        let mut builder = GraphBuilder::new();

        // count is used to generate consecutive numbered ids.
        // This means we need to remember which id an abstract (i, j) cell corresponds to.
        let mut id_map = HashMap::new();
        let mut count = 0;
        for i in 0..self.size.0 {
            for j in 0..self.size.1 {
                id_map.insert((i, j), count);
                builder.add_node(count);
                count += 1;
            }
        }

        let (width, height) = self.size;
        for i in 0..width {
            for j in 0..height {
                let id = id_map[&(i, j)];
                // right neighbor
                if i + 1 < width {
                    self.connect(&mut builder, id, id_map[&(i + 1, j)])?;
                }
                // left neighbor
                if i > 0 {
                    self.connect(&mut builder, id, id_map[&(i - 1, j)])?;
                }
                // below neighbor
                if j + 1 < height {
                    self.connect(&mut builder, id, id_map[&(i, j + 1)])?;
                }
                // above neighbor
                if j > 0 {
                    self.connect(&mut builder, id, id_map[&(i, j - 1)])?;
                }
                // right below neighbor
                if i + 1 < width && j + 1 < height {
                    self.connect(&mut builder, id, id_map[&(i + 1, j + 1)])?;
                }
                // above left neighbor
                if i > 0 && j > 0 {
                    self.connect(&mut builder, id, id_map[&(i - 1, j - 1)])?;
                }
            }
        }

        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::PheromoneBounds;
    use crate::rng::preseeded_rng64;
    use decorum::R64;

    #[test]
    fn constant_weighted_works() {
        let mut edge_gen = || 2.0;
        let mut gen = Grid::new((5, 5), &mut edge_gen);
        let graph = gen
            .generate()
            .unwrap()
            .build(1, PheromoneBounds::default())
            .unwrap();

        assert_eq!(graph.order(), 25, "A 5x5 grid graph should have 25 nodes.");
        assert_eq!(
            graph.size(),
            112,
            "A 5x5 triangular grid graph should have 112 edges."
        );
        for edge in graph.iter_edges() {
            assert_eq!(
                edge.length,
                R64::from_inner(2.0),
                "All lengths should have been initialized with the value 2.0."
            )
        }
    }

    #[test]
    fn random_weighted_works() {
        let mut edge_rng = preseeded_rng64();
        let mut edge_gen = || edge_rng.rand_float();
        let mut gen = Grid::new((5, 5), &mut edge_gen);
        let builder = gen.generate().unwrap();

        assert_eq!(builder.order(), 25, "A 5x5 grid graph should have 25 nodes.");
        assert_eq!(
            builder.size(),
            112,
            "A 5x5 triangular grid graph should have 112 edges."
        );
    }
}
