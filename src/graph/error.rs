use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display};

#[derive(Debug, PartialEq)]
pub enum GraphError<IndexType> {
    MissingEdge((IndexType, IndexType)),
    DuplicateEdge((IndexType, IndexType)),
    MissingNode(IndexType),
    InvalidLength((IndexType, IndexType)),
    MissingChannel(usize),
    ChannelsExhausted(usize),
    ChannelInUse(usize),
}

impl<IndexType: Display> fmt::Display for GraphError<IndexType> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEdge((from, to)) => write!(f, "Missing edge {} -> {}", from, to),
            Self::DuplicateEdge((from, to)) => write!(f, "Duplicate edge {} -> {}", from, to),
            Self::MissingNode(id) => write!(f, "Missing node {}", id),
            Self::InvalidLength((from, to)) => write!(
                f,
                "Edge {} -> {} needs a finite, non-negative length",
                from, to
            ),
            Self::MissingChannel(channel) => write!(f, "Missing pheromone channel #{}", channel),
            Self::ChannelsExhausted(channels) => write!(
                f,
                "All {} pheromone channels of this graph are allocated",
                channels
            ),
            Self::ChannelInUse(channel) => write!(
                f,
                "Pheromone channel #{} is used by more than one colony",
                channel
            ),
        }
    }
}

impl<IndexType: Debug + Display> Error for GraphError<IndexType> {}
