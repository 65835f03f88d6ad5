//! Superstep (Pregel-style) computation engine
//!
//! Key concepts:
//!
//! - **Vertex computation**: per-vertex update rule, run once per superstep
//! - **Superstep**: one synchronized pass over every vertex
//! - **Message**: the only channel between vertices, buffered until the
//!   round barrier
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SuperstepEngine                          │
//! │  ┌─────────┐  ┌─────────┐  ┌─────────┐                      │
//! │  │Superstep│  │Superstep│  │Superstep│   one per step()     │
//! │  │    0    │  │    1    │  │    2    │                      │
//! │  └─────────┘  └─────────┘  └─────────┘                      │
//! │       │            │            │                           │
//! │       ▼            ▼            ▼                           │
//! │  ┌─────────────────────────────────────────────────────┐    │
//! │  │ Per-Superstep: Drain → Compute → Barrier → Deliver  │    │
//! │  └─────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod computation;
pub mod config;
pub mod engine;
pub mod error;
pub mod message;
pub mod runner;

// Re-exports
pub use computation::{BoxedComputation, ComputeContext, Topology, VertexComputation};
pub use config::EngineConfig;
pub use engine::{PartitionStats, RoundRecord, StepReport, SuperstepEngine};
pub use error::PregelError;
pub use message::{Message, Payload};
pub use runner::{run_rounds, run_to_quiescence, run_until, HaltCondition, RunSummary};
