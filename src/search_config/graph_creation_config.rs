mod erdos_renyi_generation;
mod file_load;
mod grid_generation;
mod ring_generation;

pub use erdos_renyi_generation::{ErdosRenyiGeneration, UnseededErdosRenyiGeneration};
pub use file_load::FileLoad;
pub use grid_generation::{GridGeneration, UnseededGridGeneration};
pub use ring_generation::RingGeneration;

use serde::{Deserialize, Serialize};

use super::{Fix, SearchConfigError};
use crate::graph::generate::{ErdosRenyi, Generate, Grid, Ring};
use crate::graph::import::import_csv_edges;
use crate::graph::GraphBuilder;
use crate::rng::{next_seed, rng64};

/// Variants are tried in order, the ones asking for more fields come first.
#[derive(Deserialize, Serialize, Debug)]
#[serde(untagged)]
pub enum GraphCreationConfig {
    ErdosRenyi(ErdosRenyiGeneration),
    UnseededErdosRenyi(UnseededErdosRenyiGeneration),
    Grid(GridGeneration),
    UnseededGrid(UnseededGridGeneration),
    Ring(RingGeneration),
    File(FileLoad),
}

fn check_range(range: (f64, f64)) -> Result<(), SearchConfigError> {
    if range.0 < 0.0 || range.1 < range.0 || !range.1.is_finite() {
        return Err(SearchConfigError::InvalidGraphConfig(format!(
            "Edge lengths need a range 0 <= min <= max, got ({}, {}).",
            range.0, range.1
        )));
    }
    Ok(())
}

impl GraphCreationConfig {
    pub fn file(&self) -> Result<FileLoad, SearchConfigError> {
        match self {
            Self::File(file) => Ok(file.clone()),
            _ => Err(SearchConfigError::NotFileBased),
        }
    }

    pub fn grid(&self) -> Result<GridGeneration, SearchConfigError> {
        match self {
            Self::Grid(grid) => Ok(*grid),
            Self::UnseededGrid(grid) => Ok(grid.to_fixed()),
            _ => Err(SearchConfigError::NotGrid),
        }
    }

    pub fn erdos_renyi(&self) -> Result<ErdosRenyiGeneration, SearchConfigError> {
        match self {
            Self::ErdosRenyi(erdos_renyi) => Ok(*erdos_renyi),
            Self::UnseededErdosRenyi(erdos_renyi) => Ok(erdos_renyi.to_fixed()),
            _ => Err(SearchConfigError::NotErdosRenyi),
        }
    }

    /// Channels requested by the configuration itself, only file imports can ask for some.
    pub fn channels(&self) -> Option<usize> {
        match self {
            Self::File(file) => file.channels,
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), SearchConfigError> {
        match self {
            Self::ErdosRenyi(ErdosRenyiGeneration {
                connection_probability,
                ew_range,
                ..
            })
            | Self::UnseededErdosRenyi(UnseededErdosRenyiGeneration {
                connection_probability,
                ew_range,
                ..
            }) => {
                if !(0.0..=1.0).contains(connection_probability) {
                    return Err(SearchConfigError::InvalidGraphConfig(
                        "connection_probability has to be in [0, 1].".to_string(),
                    ));
                }
                check_range(*ew_range)
            }
            Self::Grid(GridGeneration { ew_range, .. })
            | Self::UnseededGrid(UnseededGridGeneration { ew_range, .. }) => {
                check_range(*ew_range)
            }
            Self::Ring(ring) => check_range((ring.length, ring.length)),
            Self::File(_) => Ok(()),
        }
    }

    /// Generates or imports the configured dataset.
    pub fn builder(&self) -> Result<GraphBuilder<usize>, SearchConfigError> {
        self.validate()?;
        let invalid = |e: crate::graph::GraphError<usize>| {
            SearchConfigError::InvalidGraphConfig(e.to_string())
        };

        match self {
            Self::File(file) => import_csv_edges(file.filename.as_str())
                .map_err(|e| SearchConfigError::InvalidGraphConfig(e.to_string())),
            Self::Ring(ring) => Ring::new(ring.size, ring.length)
                .generate()
                .map_err(invalid),
            Self::Grid(_) | Self::UnseededGrid(_) => {
                let grid = self.grid()?;
                let mut rng = rng64(grid.seed as u128);
                let (low, high) = grid.ew_range;
                let mut ew_generator = || low + rng.rand_float() * (high - low);
                Grid::new(grid.size, &mut ew_generator)
                    .generate()
                    .map_err(invalid)
            }
            Self::ErdosRenyi(_) | Self::UnseededErdosRenyi(_) => {
                let erdos_renyi = self.erdos_renyi()?;
                let mut weight_rng = rng64(erdos_renyi.seed as u128);
                let mut structure_rng = rng64(next_seed(&mut weight_rng));
                let (low, high) = erdos_renyi.ew_range;
                let mut ew_generator = || low + weight_rng.rand_float() * (high - low);
                ErdosRenyi::new(
                    erdos_renyi.size,
                    erdos_renyi.connection_probability,
                    &mut ew_generator,
                    &mut structure_rng,
                )
                .generate()
                .map_err(invalid)
            }
        }
    }
}
