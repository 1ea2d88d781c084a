//! Per-wire DAG lowering of a gate history.

use petgraph::graph::{DiGraph, NodeIndex as PetNodeIndex};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::instruction::Instruction;
use crate::qubit::QubitId;

/// Node index type for the circuit DAG.
pub type NodeIndex = PetNodeIndex<u32>;

/// An edge in the circuit DAG, labelled with the wire it orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DagEdge {
    /// The wire this edge represents.
    pub wire: QubitId,
}

/// Per-wire lowering state.
struct WireCursor {
    /// Nodes the next gate on this wire must follow. A single node in the
    /// common case; all members of an open sibling run otherwise.
    frontier: Vec<NodeIndex>,
    /// Tag shared by the frontier if it is an open sibling run.
    run_tag: Option<String>,
    /// Frontier that preceded the current run (empty at wire start).
    run_pred: Vec<NodeIndex>,
}

/// DAG representation of a gate history.
///
/// One node per gate record; for each wire the records touching it form a
/// chain, except that consecutive records sharing a non-empty `group_tag`
/// (a sibling run) hang in parallel off the run's predecessor: members of a
/// commuting group impose no order on each other, so the effective root of
/// any member is the run's earliest node and the effective terminal its
/// latest.
///
/// `roots[q]` is the first record on wire `q` and `terminals[q]` the last;
/// the frontier accessors expose the co-initial and co-final sibling sets
/// (singletons outside runs) that reuse edges must respect.
#[derive(Debug, Clone)]
pub struct CircuitDag {
    /// The underlying graph.
    graph: DiGraph<Instruction, DagEdge, u32>,
    /// First record on each wire.
    roots: FxHashMap<QubitId, NodeIndex>,
    /// Last record on each wire.
    terminals: FxHashMap<QubitId, NodeIndex>,
    /// Records on each wire with no same-wire predecessor.
    root_frontier: FxHashMap<QubitId, Vec<NodeIndex>>,
    /// Records on each wire with no same-wire successor.
    terminal_frontier: FxHashMap<QubitId, Vec<NodeIndex>>,
    /// Number of logical wires of the source circuit.
    width: usize,
}

impl CircuitDag {
    /// Lower a circuit's gate history.
    ///
    /// `reset` controls whether reset records participate as nodes; when
    /// false they are skipped entirely. A record referencing a wire at or
    /// beyond the circuit width, or a second measurement on a wire of a
    /// static circuit, is rejected with `MalformedCircuit`.
    pub fn build(circuit: &Circuit, reset: bool) -> IrResult<Self> {
        let width = circuit.width();
        let mut graph = DiGraph::default();
        let mut cursors: FxHashMap<QubitId, WireCursor> = FxHashMap::default();
        let mut roots = FxHashMap::default();
        let mut root_frontier: FxHashMap<QubitId, Vec<NodeIndex>> = FxHashMap::default();
        let mut measured: FxHashSet<QubitId> = FxHashSet::default();

        for inst in circuit.gate_history() {
            for &q in &inst.qubits {
                if q.index() >= width {
                    return Err(IrError::MalformedCircuit(format!(
                        "record {} references wire {q} beyond width {width}",
                        inst.signature
                    )));
                }
            }
            if inst.is_measure() {
                let q = inst.qubits[0];
                if !measured.insert(q) && !circuit.is_dynamic() {
                    return Err(IrError::MalformedCircuit(format!(
                        "static circuit measures wire {q} twice"
                    )));
                }
            }
            if inst.is_reset() {
                measured.remove(&inst.qubits[0]);
                if !reset {
                    continue;
                }
            }

            let node = graph.add_node(inst.clone());
            for &q in &inst.qubits {
                match cursors.get_mut(&q) {
                    None => {
                        roots.insert(q, node);
                        root_frontier.insert(q, vec![node]);
                        cursors.insert(
                            q,
                            WireCursor {
                                frontier: vec![node],
                                run_tag: inst.group_tag.clone(),
                                run_pred: vec![],
                            },
                        );
                    }
                    Some(cursor) => {
                        let joins_run =
                            inst.group_tag.is_some() && cursor.run_tag == inst.group_tag;
                        if joins_run {
                            for &pred in &cursor.run_pred {
                                graph.add_edge(pred, node, DagEdge { wire: q });
                            }
                            if cursor.run_pred.is_empty() {
                                root_frontier.get_mut(&q).expect("wire seen").push(node);
                            }
                            cursor.frontier.push(node);
                        } else {
                            for &pred in &cursor.frontier {
                                graph.add_edge(pred, node, DagEdge { wire: q });
                            }
                            cursor.run_pred = std::mem::take(&mut cursor.frontier);
                            cursor.frontier = vec![node];
                            cursor.run_tag = inst.group_tag.clone();
                        }
                    }
                }
            }
        }

        let mut terminals = FxHashMap::default();
        let mut terminal_frontier = FxHashMap::default();
        for (q, cursor) in cursors {
            // Effective terminal of a trailing run is its latest member.
            let last = cursor
                .frontier
                .iter()
                .copied()
                .max_by_key(|&n| graph[n].signature)
                .expect("frontier is never empty");
            terminals.insert(q, last);
            terminal_frontier.insert(q, cursor.frontier);
        }

        Ok(Self {
            graph,
            roots,
            terminals,
            root_frontier,
            terminal_frontier,
            width,
        })
    }

    /// Get the underlying graph.
    pub fn graph(&self) -> &DiGraph<Instruction, DagEdge, u32> {
        &self.graph
    }

    /// First record on each wire.
    pub fn roots(&self) -> &FxHashMap<QubitId, NodeIndex> {
        &self.roots
    }

    /// Last record on each wire.
    pub fn terminals(&self) -> &FxHashMap<QubitId, NodeIndex> {
        &self.terminals
    }

    /// Records on a wire with no same-wire predecessor.
    ///
    /// A reuse edge targeting the wire must precede every one of them.
    pub fn root_frontier(&self, q: QubitId) -> &[NodeIndex] {
        self.root_frontier.get(&q).map_or(&[], Vec::as_slice)
    }

    /// Records on a wire with no same-wire successor.
    ///
    /// A reuse edge sourced from the wire must follow every one of them.
    pub fn terminal_frontier(&self, q: QubitId) -> &[NodeIndex] {
        self.terminal_frontier.get(&q).map_or(&[], Vec::as_slice)
    }

    /// Number of logical wires of the source circuit.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of records lowered to nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the record at a node.
    #[inline]
    pub fn instruction(&self, node: NodeIndex) -> &Instruction {
        &self.graph[node]
    }

    /// Whether the wire's terminal record is a measurement.
    pub fn is_measured(&self, q: QubitId) -> bool {
        self.terminals
            .get(&q)
            .is_some_and(|&t| self.graph[t].is_measure())
    }

    /// Whether the wire carries any record.
    pub fn touches(&self, q: QubitId) -> bool {
        self.roots.contains_key(&q)
    }

    /// Check that the graph is acyclic.
    pub fn verify_acyclic(&self) -> IrResult<()> {
        if petgraph::algo::is_cyclic_directed(&self.graph) {
            return Err(IrError::MalformedCircuit(
                "circuit DAG contains a cycle".into(),
            ));
        }
        Ok(())
    }
}
