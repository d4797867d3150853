use crate::rng::os_random_seed;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    /// Ants walking per iteration.
    pub ant_count: usize,
    /// Upper bound for the number of edges of one walk.
    pub max_steps: usize,
    /// Evaporation rate in `[0, 1]`.
    pub rho: f64,
    /// Deposit weight.
    pub q: f64,
    pub seed: u128,
}

impl Params {
    pub fn new(ant_count: usize, max_steps: usize, rho: f64, q: f64, seed: Option<u128>) -> Self {
        Params {
            ant_count,
            max_steps,
            rho: rho.max(0.0).min(1.0),
            q,
            seed: seed.unwrap_or_else(os_random_seed),
        }
    }

    /// The same parameters with another seed, so that colonies created from one
    /// configuration do not walk in lockstep.
    pub fn reseeded(&self, seed: u128) -> Self {
        Params { seed, ..*self }
    }
}

impl Default for Params {
    fn default() -> Self {
        Params::new(20, 100, 0.1, 1.0, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rho_is_clamped() {
        assert_eq!(Params::new(1, 1, 1.5, 1.0, Some(0)).rho, 1.0);
        assert_eq!(Params::new(1, 1, -0.5, 1.0, Some(0)).rho, 0.0);
    }

    #[test]
    fn reseeded_keeps_the_rest() {
        let params = Params::new(7, 12, 0.2, 2.0, Some(3));
        let other = params.reseeded(9);

        assert_eq!(other.seed, 9);
        assert_eq!(other.ant_count, 7);
        assert_eq!(other.max_steps, 12);
    }
}
