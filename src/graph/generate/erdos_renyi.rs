use super::Generate;
use crate::graph::{GraphBuilder, GraphError};

use oorandom::Rand64;

/// Directed G(n, p) graph without self loops.
pub struct ErdosRenyi<'a> {
    size: usize,
    connection_probability: f64,
    ew_generator: &'a mut dyn FnMut() -> f64,
    rng: &'a mut Rand64,
}

impl<'a> ErdosRenyi<'a> {
    pub fn new(
        size: usize,
        connection_probability: f64,
        ew_generator: &'a mut dyn FnMut() -> f64,
        rng: &'a mut Rand64,
    ) -> ErdosRenyi<'a> {
        ErdosRenyi {
            size,
            connection_probability,
            ew_generator,
            rng,
        }
    }
}

impl<'a> Generate for ErdosRenyi<'a> {
    fn generate(&mut self) -> Result<GraphBuilder<usize>, GraphError<usize>> {
        let mut builder = GraphBuilder::new();
        for i in 0..self.size {
            builder.add_node(i);
        }

        // Populate edges with given probablity and length from the generator.
        for i in 0..self.size {
            for j in 0..self.size {
                if i != j && self.rng.rand_float() < self.connection_probability {
                    let length = (self.ew_generator)();
                    builder.add_edge((i, j), length)?;
                }
            }
        }

        Ok(builder)
    }
}
