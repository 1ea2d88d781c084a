//! Re-linearization: turning a DAG plus reuse edges into a dynamic gate
//! history.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use petgraph::Direction;
use petgraph::visit::EdgeRef;
use rustc_hash::FxHashMap;

use ouro_ir::{CircuitDag, DagEdge, Instruction, NodeIndex, QubitId};

use crate::error::{CompileError, CompileResult};
use crate::layout::Layout;
use crate::plan::ReusePlan;

/// Apply a reuse plan to a lowered circuit.
///
/// Builds the augmented graph `G ∪ R`, emits its records in a
/// signature-stable topological order, and inserts a reset on the reused
/// wire directly after each reuse source's measurement, forming the
/// mid-circuit `measure; reset` pairs. The emitted history keeps logical
/// wire indices; the returned [`Layout`] maps them onto physical wires
/// (reuse chains share one), compacted in order of first activation.
///
/// Fresh records (the resets) take signatures from `next_signature`
/// upwards. A plan whose edges close a directed cycle is rejected with
/// [`CompileError::PlanCyclic`].
pub fn relinearize(
    dag: &CircuitDag,
    plan: &ReusePlan,
    mut next_signature: u64,
) -> CompileResult<(Vec<Instruction>, Layout)> {
    let mut graph = dag.graph().clone();

    // A reuse edge must order every co-final record of the measured wire
    // before every co-initial record of the reused wire.
    for edge in &plan.edges {
        for &t in dag.terminal_frontier(edge.measured) {
            for &r in dag.root_frontier(edge.reused) {
                graph.add_edge(t, r, DagEdge { wire: edge.reused });
            }
        }
    }

    // Reset goes right after the reuse source's terminal measurement.
    let mut reset_after: FxHashMap<NodeIndex, QubitId> = FxHashMap::default();
    for edge in &plan.edges {
        if let Some(&t) = dag.terminals().get(&edge.measured) {
            reset_after.insert(t, edge.reused);
        }
    }

    // Kahn's algorithm with a min-heap on signatures: among ready records
    // the earliest-emitted wins, which keeps sibling-group members and the
    // overall schedule as close to the source order as dependencies allow.
    let mut indegree: Vec<usize> = graph
        .node_indices()
        .map(|n| graph.edges_directed(n, Direction::Incoming).count())
        .collect();
    let mut ready: BinaryHeap<Reverse<(u64, usize)>> = graph
        .node_indices()
        .filter(|n| indegree[n.index()] == 0)
        .map(|n| Reverse((graph[n].signature, n.index())))
        .collect();

    let mut history: Vec<Instruction> = Vec::with_capacity(graph.node_count() + plan.edges.len());
    let mut emitted = 0usize;
    while let Some(Reverse((_, idx))) = ready.pop() {
        let node = NodeIndex::new(idx);
        history.push(graph[node].clone());
        emitted += 1;

        if let Some(&reused) = reset_after.get(&node) {
            history.push(Instruction::reset(reused, next_signature));
            next_signature += 1;
        }

        for edge in graph.edges_directed(node, Direction::Outgoing) {
            let succ = edge.target();
            indegree[succ.index()] -= 1;
            if indegree[succ.index()] == 0 {
                ready.push(Reverse((graph[succ].signature, succ.index())));
            }
        }
    }

    if emitted != graph.node_count() {
        return Err(CompileError::PlanCyclic);
    }

    let layout = derive_layout(&history, plan);
    Ok((history, layout))
}

/// Assign physical wires: heads of reuse chains get fresh indices in order
/// of first appearance, chain members inherit their predecessor's index.
fn derive_layout(history: &[Instruction], plan: &ReusePlan) -> Layout {
    let pred: FxHashMap<QubitId, QubitId> = plan
        .edges
        .iter()
        .map(|e| (e.reused, e.measured))
        .collect();

    let mut layout = Layout::new();
    let mut next_physical = 0u32;
    for inst in history {
        for &q in &inst.qubits {
            if layout.get_physical(q).is_some() {
                continue;
            }
            match pred.get(&q).and_then(|m| layout.get_physical(*m)) {
                Some(physical) => layout.add(q, physical),
                None => {
                    layout.add(q, next_physical);
                    next_physical += 1;
                }
            }
        }
    }
    layout
}
