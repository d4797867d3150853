use crate::metaheuristic::Params;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    /// Colonies of the neighbourhood.
    pub colonies: usize,
    /// Parameters shared by every colony of the search, each one gets its own seed.
    pub colony: Params,
    pub training_iterations: usize,
    pub endpoint_iterations: usize,
    pub meta_iterations: usize,
    pub final_iterations: usize,
}

impl SearchParams {
    pub fn new(
        colonies: usize,
        colony: Params,
        training_iterations: usize,
        endpoint_iterations: usize,
        meta_iterations: usize,
        final_iterations: usize,
    ) -> Self {
        SearchParams {
            colonies,
            colony,
            training_iterations,
            endpoint_iterations,
            meta_iterations,
            final_iterations,
        }
    }

    /// Channels a graph needs: one per neighbourhood colony, both endpoint colonies and
    /// the final colony.
    pub fn required_channels(&self) -> usize {
        self.colonies + 3
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams::new(10, Params::default(), 50, 20, 20, 30)
    }
}
