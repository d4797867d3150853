pub mod colony;
pub mod multi_objective;
pub mod neighbourhood;
mod path;
mod success;
mod supervisor;

pub use colony::{Colony, Layer, Message, Params};
pub use multi_objective::{MultiObjectiveColony, Objective, ObjectiveSession};
pub use neighbourhood::{NeighbourColony, Neighbourhood};
pub use path::{best_path, Path, PathError};
pub use success::{NodeSetFound, Success, TargetFound, UniquePaths};
pub use supervisor::Supervisor;
