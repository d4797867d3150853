mod csv_edges;
mod error;

pub use csv_edges::{import_csv_edges, read_csv_edges};
pub use error::ImportError;
