use crate::graph::GraphError;

use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display};

/// The step of a hierarchical search that came up empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStage {
    Endpoints,
    MetaPath,
    FinalPath,
}

impl fmt::Display for SearchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Endpoints => write!(f, "endpoint colonies"),
            Self::MetaPath => write!(f, "meta-path search"),
            Self::FinalPath => write!(f, "final path search"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum SearchError<IndexType> {
    /// No ant got through, more iterations or colonies might help.
    NoRoute(SearchStage),
    Graph(GraphError<IndexType>),
}

impl<IndexType> From<GraphError<IndexType>> for SearchError<IndexType> {
    fn from(error: GraphError<IndexType>) -> Self {
        SearchError::Graph(error)
    }
}

impl<IndexType: Display> fmt::Display for SearchError<IndexType> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRoute(stage) => write!(f, "No route found during the {}", stage),
            Self::Graph(error) => write!(f, "{}", error),
        }
    }
}

impl<IndexType: Debug + Display> Error for SearchError<IndexType> {}
