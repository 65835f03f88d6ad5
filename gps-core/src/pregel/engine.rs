//! Superstep Engine - one synchronized round per call
//!
//! Each call to [`SuperstepEngine::step`] follows the sequence:
//! Drain → Compute → Barrier (collect, apply deferred writes) → Deliver.
//!
//! Messages emitted during a round are buffered in a round-local multimap
//! and only delivered after every vertex has been computed, so no vertex can
//! observe a message sent in the same round. The engine never decides on its
//! own when to stop; see [`crate::pregel::runner`] for caller-side loops.

use std::collections::{BTreeMap, BTreeSet};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::graph::{assign_partitions, Graph, Vertex, VertexId};

use super::computation::{BoxedComputation, ComputeContext, Topology, VertexComputation};
use super::config::EngineConfig;
use super::message::Message;

/// Messages emitted during one superstep, grouped by target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub superstep: usize,
    /// Target vertex -> messages, in emission order
    pub deliveries: BTreeMap<VertexId, Vec<Message>>,
}

impl RoundRecord {
    /// Total number of messages emitted in the round
    pub fn message_count(&self) -> usize {
        self.deliveries.values().map(Vec::len).sum()
    }

    /// Messages addressed to `id` in this round
    pub fn messages_for(&self, id: VertexId) -> &[Message] {
        self.deliveries.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Per-partition activity in one round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionStats {
    pub partition: usize,
    pub vertices: usize,
    /// Messages emitted by vertices of this partition
    pub messages_sent: usize,
}

/// Summary of a completed superstep
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    /// Index of the superstep that just ran
    pub superstep: usize,
    pub vertices_computed: usize,
    pub messages_sent: usize,
    pub messages_delivered: usize,
    /// Messages addressed to vertices that no longer exist
    pub messages_dropped: usize,
    /// Vertices whose value differs from before the round
    pub values_changed: usize,
    /// Empty unless partition statistics are enabled
    pub partition_stats: Vec<PartitionStats>,
}

impl StepReport {
    /// True when no vertex emitted a message (natural fixpoint signal)
    pub fn is_quiescent(&self) -> bool {
        self.messages_sent == 0
    }
}

/// What one vertex produced during a round
struct VertexOutput {
    id: VertexId,
    outbox: Vec<Message>,
    remote_values: Vec<(VertexId, f64)>,
    changed: bool,
}

fn value_changed(before: f64, after: f64) -> bool {
    before.to_bits() != after.to_bits() && before != after
}

/// Drain, compute and capture the outputs of a single vertex
fn compute_vertex(
    computation: &dyn VertexComputation,
    vertex: &mut Vertex,
    superstep: usize,
    topology: Option<&Topology>,
) -> VertexOutput {
    let incoming = vertex.drain_inbox();
    let before = vertex.value();
    let mut ctx = ComputeContext::new(vertex.id(), superstep, topology);

    computation.compute(vertex, &incoming, &mut ctx);

    trace!(
        vertex = vertex.id(),
        superstep,
        received = incoming.len(),
        sent = ctx.sent_count(),
        "Vertex computed"
    );

    let (outbox, remote_values) = ctx.into_parts();
    VertexOutput {
        id: vertex.id(),
        outbox,
        remote_values,
        changed: value_changed(before, vertex.value()),
    }
}

/// Superstep engine over an owned graph
///
/// Owns the graph, the active computation, the round counter and the
/// delivery history. Callers mutate the graph between rounds through
/// [`SuperstepEngine::graph_mut`].
pub struct SuperstepEngine {
    config: EngineConfig,
    graph: Graph,
    computation: BoxedComputation,
    superstep: usize,
    history: Vec<RoundRecord>,
    last_report: Option<StepReport>,
    pool: Option<rayon::ThreadPool>,
}

impl SuperstepEngine {
    /// Create an engine with default configuration
    pub fn new(graph: Graph, computation: BoxedComputation) -> Self {
        Self::with_config(graph, computation, EngineConfig::default())
    }

    /// Create an engine with custom configuration
    ///
    /// If the worker pool cannot be built, rounds are computed sequentially.
    pub fn with_config(graph: Graph, computation: BoxedComputation, config: EngineConfig) -> Self {
        let pool = if config.is_parallel() {
            match rayon::ThreadPoolBuilder::new()
                .num_threads(config.parallelism)
                .thread_name(|i| format!("superstep-worker-{i}"))
                .build()
            {
                Ok(pool) => Some(pool),
                Err(e) => {
                    warn!(error = %e, parallelism = config.parallelism, "Worker pool unavailable, computing sequentially");
                    None
                }
            }
        } else {
            None
        };

        Self {
            config,
            graph,
            computation,
            superstep: 0,
            history: Vec::new(),
            last_report: None,
            pool,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Mutable access to the graph between rounds
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }

    pub fn computation(&self) -> &dyn VertexComputation {
        self.computation.as_ref()
    }

    /// Swap the active computation. Round state is left untouched; call
    /// [`reset`](Self::reset) to start the new algorithm from scratch.
    pub fn set_computation(&mut self, computation: BoxedComputation) {
        self.computation = computation;
    }

    /// Index of the next superstep to run
    pub fn superstep(&self) -> usize {
        self.superstep
    }

    /// Delivery history, one record per completed superstep
    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    /// Record for a specific superstep, if retained
    pub fn round(&self, superstep: usize) -> Option<&RoundRecord> {
        self.history.iter().find(|r| r.superstep == superstep)
    }

    /// Replay the history as (superstep, target -> messages) in round order
    pub fn replay(&self) -> impl Iterator<Item = (usize, &BTreeMap<VertexId, Vec<Message>>)> {
        self.history.iter().map(|r| (r.superstep, &r.deliveries))
    }

    /// Report of the most recent round
    pub fn last_report(&self) -> Option<&StepReport> {
        self.last_report.as_ref()
    }

    /// Whether any vertex emitted a message in the most recent round.
    ///
    /// `None` before the first round.
    pub fn last_round_emitted(&self) -> Option<bool> {
        self.last_report.as_ref().map(|r| !r.is_quiescent())
    }

    /// Return to the initial state: counter 0, empty history, every value
    /// +∞, every inbox discarded, every vertex active.
    pub fn reset(&mut self) {
        self.superstep = 0;
        self.history.clear();
        self.last_report = None;
        for vertex in self.graph.vertices_mut().values_mut() {
            vertex.set_value(f64::INFINITY);
            vertex.drain_inbox();
            vertex.set_active(true);
        }
    }

    /// Execute exactly one superstep
    pub fn step(&mut self) -> StepReport {
        let superstep = self.superstep;

        // 1. Drain + compute every vertex
        let topology = self
            .computation
            .requires_topology()
            .then(|| Topology::from_graph(&self.graph));
        let outputs = self.compute_vertices(superstep, topology.as_ref());

        // 2. Barrier: collect every message before any delivery
        let mut report = StepReport {
            superstep,
            vertices_computed: outputs.len(),
            ..Default::default()
        };
        let mut sent_by_vertex = Vec::with_capacity(outputs.len());
        let mut changed: BTreeSet<VertexId> = BTreeSet::new();
        let mut remote_values = Vec::new();
        let mut deliveries: BTreeMap<VertexId, Vec<Message>> = BTreeMap::new();

        for output in outputs {
            if output.changed {
                changed.insert(output.id);
            }
            sent_by_vertex.push((output.id, output.outbox.len()));
            report.messages_sent += output.outbox.len();
            for msg in output.outbox {
                deliveries.entry(msg.target()).or_default().push(msg);
            }
            remote_values.extend(output.remote_values);
        }

        self.apply_remote_values(remote_values, &mut changed);
        report.values_changed = changed.len();

        // 3. Deliver into next round's inboxes
        self.deliver(&deliveries, &mut report);

        if self.config.partition_stats_enabled() {
            report.partition_stats = self.partition_stats(&sent_by_vertex);
        }

        if self.config.record_history {
            self.history.push(RoundRecord {
                superstep,
                deliveries,
            });
        }

        if self.config.tracing_enabled {
            debug!(
                superstep,
                algorithm = self.computation.name(),
                sent = report.messages_sent,
                dropped = report.messages_dropped,
                changed = report.values_changed,
                "Superstep complete"
            );
        }

        self.superstep += 1;
        self.last_report = Some(report.clone());
        report
    }

    /// Compute all vertices, on the worker pool when configured
    ///
    /// Outputs come back in ascending vertex id order either way.
    fn compute_vertices(&mut self, superstep: usize, topology: Option<&Topology>) -> Vec<VertexOutput> {
        let computation: &dyn VertexComputation = self.computation.as_ref();
        let vertices = self.graph.vertices_mut();
        let run = |vertex: &mut Vertex| compute_vertex(computation, vertex, superstep, topology);

        match &self.pool {
            Some(pool) => pool.install(|| vertices.par_iter_mut().map(|(_, v)| run(v)).collect()),
            None => vertices.values_mut().map(run).collect(),
        }
    }

    fn apply_remote_values(&mut self, writes: Vec<(VertexId, f64)>, changed: &mut BTreeSet<VertexId>) {
        for (target, value) in writes {
            match self.graph.vertex_mut(target) {
                Some(vertex) => {
                    if value_changed(vertex.value(), value) {
                        changed.insert(target);
                    }
                    vertex.set_value(value);
                }
                None => trace!(target, "Dropping value write for missing vertex"),
            }
        }
    }

    fn deliver(&mut self, deliveries: &BTreeMap<VertexId, Vec<Message>>, report: &mut StepReport) {
        for (&target, messages) in deliveries {
            match self.graph.vertex_mut(target) {
                Some(vertex) => {
                    vertex.receive_messages(messages.iter().copied());
                    report.messages_delivered += messages.len();
                }
                None => {
                    trace!(target, count = messages.len(), "Dropping messages for missing vertex");
                    report.messages_dropped += messages.len();
                }
            }
        }
    }

    fn partition_stats(&self, sent_by_vertex: &[(VertexId, usize)]) -> Vec<PartitionStats> {
        let assignment = assign_partitions(
            self.graph.vertex_ids(),
            self.config.partition_strategy,
            self.config.partitions,
        );

        let mut stats: Vec<PartitionStats> = (0..self.config.partitions)
            .map(|partition| PartitionStats {
                partition,
                ..Default::default()
            })
            .collect();

        for partition in assignment.values() {
            stats[*partition].vertices += 1;
        }
        for (id, sent) in sent_by_vertex {
            if let Some(&partition) = assignment.get(id) {
                stats[partition].messages_sent += sent;
            }
        }
        stats
    }
}

impl std::fmt::Debug for SuperstepEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuperstepEngine")
            .field("algorithm", &self.computation.name())
            .field("superstep", &self.superstep)
            .field("vertices", &self.graph.vertex_count())
            .field("history", &self.history.len())
            .field("parallel", &self.pool.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::graph::PartitionStrategy;
    use crate::pregel::message::Payload;

    static_assertions::assert_impl_all!(SuperstepEngine: Send, Sync);

    fn share(computation: impl VertexComputation + 'static) -> BoxedComputation {
        Arc::new(computation)
    }

    // Sets value to the number of messages drained; broadcasts at superstep 0
    struct CountingComputation;

    impl VertexComputation for CountingComputation {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn compute(&self, vertex: &mut Vertex, incoming: &[Message], ctx: &mut ComputeContext<'_>) {
            vertex.set_value(incoming.len() as f64);
            if ctx.is_first_superstep() {
                ctx.broadcast(vertex.neighbors(), Payload::Marker(true));
            }
        }
    }

    // Forwards every received message to all neighbors, forever
    struct FloodComputation;

    impl VertexComputation for FloodComputation {
        fn name(&self) -> &'static str {
            "flood"
        }

        fn compute(&self, vertex: &mut Vertex, incoming: &[Message], ctx: &mut ComputeContext<'_>) {
            if ctx.is_first_superstep() {
                ctx.broadcast(vertex.neighbors(), Payload::Distance(vertex.id()));
            }
            for msg in incoming {
                ctx.broadcast(vertex.neighbors(), msg.payload());
            }
            vertex.set_value(vertex.value().min(0.0) + incoming.len() as f64);
        }
    }

    fn sequential(graph: Graph, computation: BoxedComputation) -> SuperstepEngine {
        SuperstepEngine::with_config(graph, computation, EngineConfig::sequential())
    }

    #[test]
    fn test_engine_creation() {
        let engine = SuperstepEngine::new(Graph::new(), share(CountingComputation));
        assert_eq!(engine.superstep(), 0);
        assert!(engine.history().is_empty());
        assert_eq!(engine.last_round_emitted(), None);
        assert_eq!(engine.computation().name(), "counting");
    }

    #[test]
    fn test_round_isolation() {
        // 1 is computed before 2, but 2 must not see 1's message this round
        let graph = Graph::from_edges([(1, 2)]);
        let mut engine = sequential(graph, share(CountingComputation));

        let report = engine.step();
        assert_eq!(report.messages_sent, 1);
        assert_eq!(engine.graph().vertex(2).unwrap().value(), 0.0);
        assert_eq!(engine.graph().vertex(2).unwrap().pending_messages(), 1);

        engine.step();
        assert_eq!(engine.graph().vertex(2).unwrap().value(), 1.0);
        assert_eq!(engine.graph().vertex(2).unwrap().pending_messages(), 0);
    }

    #[test]
    fn test_counter_and_history() {
        let graph = Graph::from_edges([(1, 2), (1, 3), (2, 3)]);
        let mut engine = sequential(graph, share(CountingComputation));

        engine.step();
        engine.step();

        assert_eq!(engine.superstep(), 2);
        assert_eq!(engine.history().len(), 2);

        let round0 = engine.round(0).unwrap();
        assert_eq!(round0.message_count(), 3);
        assert_eq!(round0.messages_for(3).len(), 2);
        assert!(engine.round(1).unwrap().deliveries.is_empty());

        let replayed: Vec<usize> = engine.replay().map(|(s, d)| s + d.len()).collect();
        assert_eq!(replayed, vec![2, 1]);
    }

    #[test]
    fn test_quiescence_signal() {
        let graph = Graph::from_edges([(1, 2)]);
        let mut engine = sequential(graph, share(CountingComputation));

        assert!(!engine.step().is_quiescent());
        assert_eq!(engine.last_round_emitted(), Some(true));
        assert!(engine.step().is_quiescent());
        assert_eq!(engine.last_round_emitted(), Some(false));
    }

    #[test]
    fn test_removed_vertex_takes_pending_messages() {
        let graph = Graph::from_edges([(1, 2), (1, 3)]);
        let mut engine = sequential(graph, share(FloodComputation));

        engine.step();
        // Vertex 3 disappears with one message for it still pending
        engine.graph_mut().remove_vertex(3);
        let report = engine.step();
        assert_eq!(report.vertices_computed, 2);
        assert_eq!(engine.graph().vertex(2).unwrap().value(), 1.0);
    }

    #[test]
    fn test_stale_target_counted_as_dropped() {
        // A computation that always targets a vertex that never exists
        struct Stray;
        impl VertexComputation for Stray {
            fn name(&self) -> &'static str {
                "stray"
            }
            fn compute(&self, _vertex: &mut Vertex, _incoming: &[Message], ctx: &mut ComputeContext<'_>) {
                ctx.send(999, Payload::Marker(true));
            }
        }

        let mut engine = sequential(Graph::from_edges([(1, 2)]), share(Stray));
        let report = engine.step();
        assert_eq!(report.messages_sent, 2);
        assert_eq!(report.messages_dropped, 2);
        assert_eq!(report.messages_delivered, 0);
        // Dropped messages are still part of the round's history
        assert_eq!(engine.round(0).unwrap().messages_for(999).len(), 2);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let graph = Graph::from_edges([(1, 2), (2, 1)]);
        let mut engine = sequential(graph, share(FloodComputation));

        engine.step();
        engine.graph_mut().vertex_mut(1).unwrap().set_active(false);
        engine.reset();

        assert_eq!(engine.superstep(), 0);
        assert!(engine.history().is_empty());
        assert_eq!(engine.last_round_emitted(), None);
        for vertex in engine.graph().vertices() {
            assert!(vertex.value().is_infinite());
            assert_eq!(vertex.pending_messages(), 0);
            assert!(vertex.is_active());
        }
    }

    #[test]
    fn test_history_disabled() {
        let config = EngineConfig::sequential().with_history(false);
        let graph = Graph::from_edges([(1, 2)]);
        let mut engine = SuperstepEngine::with_config(graph, share(CountingComputation), config);

        engine.step();
        assert_eq!(engine.superstep(), 1);
        assert!(engine.history().is_empty());
        assert!(engine.round(0).is_none());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let edges: Vec<(u64, u64)> = (0..200u64).flat_map(|i| [(i, (i * 7 + 3) % 200), (i, (i + 1) % 200)]).collect();

        let mut seq = sequential(Graph::from_edges(edges.clone()), share(FloodComputation));
        let mut par = SuperstepEngine::with_config(
            Graph::from_edges(edges),
            share(FloodComputation),
            EngineConfig::sequential().with_parallelism(4),
        );

        for _ in 0..3 {
            assert_eq!(seq.step(), par.step());
        }
        assert_eq!(seq.history(), par.history());
        assert_eq!(seq.graph().values(), par.graph().values());
    }

    #[test]
    fn test_partition_stats() {
        let config = EngineConfig::sequential()
            .with_partitions(2)
            .with_partition_strategy(PartitionStrategy::Range);
        let graph = Graph::from_edges([(1, 2), (1, 3), (3, 4)]);
        let mut engine = SuperstepEngine::with_config(graph, share(CountingComputation), config);

        let report = engine.step();
        assert_eq!(report.partition_stats.len(), 2);
        // Range: {1, 2} -> 0, {3, 4} -> 1
        assert_eq!(report.partition_stats[0].vertices, 2);
        assert_eq!(report.partition_stats[0].messages_sent, 2);
        assert_eq!(report.partition_stats[1].messages_sent, 1);
    }

    #[test]
    fn test_values_changed_count() {
        let graph = Graph::from_edges([(1, 2), (2, 3)]);
        let mut engine = sequential(graph, share(CountingComputation));

        // Every value goes from +inf to a finite count
        assert_eq!(engine.step().values_changed, 3);
        // Only 2 and 3 received something; 1 stays at 0
        assert_eq!(engine.step().values_changed, 2);
        // Nothing was sent in round 1, so 2 and 3 fall back to 0
        assert_eq!(engine.step().values_changed, 2);
        assert_eq!(engine.step().values_changed, 0);
    }
}
