use crate::graph::import::ImportError;
use crate::graph::GraphBuilder;

use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct EdgeRecord {
    from: usize,
    to: usize,
    length: f64,
}

/// Loads a directed edge list with the header `from,to,length`.
/// Nodes are added in order of their first appearance.
pub fn import_csv_edges(filename: &str) -> Result<GraphBuilder<usize>, ImportError> {
    if !Path::new(filename).exists() {
        return Err(ImportError::MissingFile(filename.to_string()));
    }

    let file = File::open(filename).map_err(|e| ImportError::MissingFile(e.to_string()))?;
    read_csv_edges(file)
}

pub fn read_csv_edges<R: Read>(reader: R) -> Result<GraphBuilder<usize>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut builder = GraphBuilder::new();
    for (line, result) in csv_reader.deserialize::<EdgeRecord>().enumerate() {
        let invalid = |reason: String| ImportError::InvalidRecord {
            record: line + 1,
            reason,
        };
        let record = result.map_err(|e| invalid(e.to_string()))?;
        builder.add_node(record.from);
        builder.add_node(record.to);
        builder
            .add_edge((record.from, record.to), record.length)
            .map_err(|e| invalid(e.to_string()))?;
    }

    Ok(builder)
}
