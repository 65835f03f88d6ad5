//! Message types for vertex communication
//!
//! Vertices communicate by sending messages to each other.
//! A message emitted in superstep `r` is delivered at the barrier that ends
//! `r`, so the target sees it only when it is drained in superstep `r + 1`.

use serde::{Deserialize, Serialize};

use crate::graph::VertexId;

/// Payload carried by a message
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    /// Hop distance proposed to the target
    Distance(u64),
    /// Rank contribution (PageRank)
    Rank(f64),
    /// Reachability notification
    Marker(bool),
}

impl Payload {
    pub fn as_distance(&self) -> Option<u64> {
        match self {
            Payload::Distance(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_rank(&self) -> Option<f64> {
        match self {
            Payload::Rank(r) => Some(*r),
            _ => None,
        }
    }
}

/// Immutable envelope: target vertex plus payload
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Message {
    target: VertexId,
    payload: Payload,
}

impl Message {
    pub fn new(target: VertexId, payload: Payload) -> Self {
        Self { target, payload }
    }

    pub fn target(&self) -> VertexId {
        self.target
    }

    pub fn payload(&self) -> Payload {
        self.payload
    }
}
