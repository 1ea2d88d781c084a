//! Dependency matrices: biadjacency and reuse candidates.
//!
//! The biadjacency matrix `B` records wire-level reachability:
//! `B[i][j] = 1` iff the first record on wire `i` reaches the last record
//! on wire `j`, i.e. initial wire `i` lies in the causal cone of the
//! measurement on wire `j`. The candidate matrix `C` records which reuse
//! edges are admissible: `C[i][j] = 1` iff appending the edge
//! `terminals[i] → roots[j]` keeps the DAG acyclic, which holds exactly
//! when `roots[j]` does not reach `terminals[i]` — so `C` is the
//! off-diagonal complement of `Bᵀ`.

use std::str::FromStr;

use petgraph::visit::EdgeRef;
use rustc_hash::FxHashMap;

use ouro_ir::{Circuit, CircuitDag, NodeIndex, QubitId};

use crate::bitmatrix::BitMatrix;
use crate::error::{CompileError, CompileResult};

/// How to compute the reachability underlying `B`.
///
/// Both methods produce identical matrices; the selector exists for
/// benchmarking the two fixpoints against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatrixMethod {
    /// Wire-width bitset dataflow in one topological sweep. Cheaper when
    /// the wire count is far below the record count.
    #[default]
    BooleanMatrix,
    /// Node-level reachability closure by repeated boolean squaring, at
    /// most ⌈log₂ n⌉ rounds.
    TransitiveClosure,
}

impl MatrixMethod {
    /// The selector string understood by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            MatrixMethod::BooleanMatrix => "boolean_matrix",
            MatrixMethod::TransitiveClosure => "transitive_closure",
        }
    }
}

impl FromStr for MatrixMethod {
    type Err = CompileError;

    fn from_str(s: &str) -> CompileResult<Self> {
        match s {
            "boolean_matrix" => Ok(MatrixMethod::BooleanMatrix),
            "transitive_closure" => Ok(MatrixMethod::TransitiveClosure),
            other => Err(CompileError::InvalidMethod(other.to_string())),
        }
    }
}

/// Compute `(B, C)` for a lowered circuit.
pub fn biadjacency_and_candidate(dag: &CircuitDag, method: MatrixMethod) -> (BitMatrix, BitMatrix) {
    let b = match method {
        MatrixMethod::BooleanMatrix => biadjacency_by_dataflow(dag),
        MatrixMethod::TransitiveClosure => biadjacency_by_closure(dag),
    };
    let c = candidate_from_biadjacency(&b);
    (b, c)
}

/// Convenience wrapper lowering a circuit first.
pub fn biadjacency_and_candidate_matrices(
    circuit: &Circuit,
    method: MatrixMethod,
) -> CompileResult<(BitMatrix, BitMatrix)> {
    let dag = circuit.to_dag(true)?;
    Ok(biadjacency_and_candidate(&dag, method))
}

/// Derive the candidate matrix: `C = ¬Bᵀ ∧ ¬I`.
pub fn candidate_from_biadjacency(b: &BitMatrix) -> BitMatrix {
    b.transposed().complement_off_diagonal()
}

/// One topological sweep propagating per-node cones as wire-width bitsets.
fn biadjacency_by_dataflow(dag: &CircuitDag) -> BitMatrix {
    let w = dag.width();
    let n = dag.node_count();

    // Which wires each node begins (it is in their root frontier).
    let mut begins: FxHashMap<NodeIndex, Vec<usize>> = FxHashMap::default();
    for q in 0..w {
        for &node in dag.root_frontier(QubitId(q as u32)) {
            begins.entry(node).or_default().push(q);
        }
    }

    // cones[node] = set of initial wires whose root reaches the node.
    let mut cones = BitMatrix::new(n, w);
    let order = petgraph::algo::toposort(dag.graph(), None)
        .expect("circuit DAG is acyclic by construction");
    for node in order {
        if let Some(wires) = begins.get(&node) {
            for &q in wires {
                cones.set(node.index(), q);
            }
        }
        let cone_row = cones.row(node.index()).to_vec();
        for edge in dag.graph().edges(node) {
            cones.or_into_row(edge.target().index(), &cone_row);
        }
    }

    let mut b = BitMatrix::new(w, w);
    for j in 0..w {
        for &t in dag.terminal_frontier(QubitId(j as u32)) {
            for i in 0..w {
                if cones.get(t.index(), i) {
                    b.set(i, j);
                }
            }
        }
    }
    b
}

/// Node-level reflexive reachability closure by repeated boolean squaring.
fn biadjacency_by_closure(dag: &CircuitDag) -> BitMatrix {
    let w = dag.width();
    let n = dag.node_count();

    let mut closure = BitMatrix::identity(n);
    for edge in dag.graph().edge_references() {
        closure.set(edge.source().index(), edge.target().index());
    }
    loop {
        let next = closure.or(&closure.multiply(&closure));
        if next == closure {
            break;
        }
        closure = next;
    }

    let mut b = BitMatrix::new(w, w);
    for i in 0..w {
        let qi = QubitId(i as u32);
        for j in 0..w {
            let qj = QubitId(j as u32);
            let reachable = dag.root_frontier(qi).iter().any(|&r| {
                dag.terminal_frontier(qj)
                    .iter()
                    .any(|&t| closure.get(r.index(), t.index()))
            });
            if reachable {
                b.set(i, j);
            }
        }
    }
    b
}

#[cfg(test)]
mod tests {
    use super::*;
    use ouro_ir::Circuit;

    fn both_methods(circuit: &Circuit) -> ((BitMatrix, BitMatrix), (BitMatrix, BitMatrix)) {
        let dag = circuit.to_dag(true).unwrap();
        (
            biadjacency_and_candidate(&dag, MatrixMethod::BooleanMatrix),
            biadjacency_and_candidate(&dag, MatrixMethod::TransitiveClosure),
        )
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!(
            "boolean_matrix".parse::<MatrixMethod>().unwrap(),
            MatrixMethod::BooleanMatrix
        );
        assert_eq!(
            "transitive_closure".parse::<MatrixMethod>().unwrap(),
            MatrixMethod::TransitiveClosure
        );
        assert!(matches!(
            "closure".parse::<MatrixMethod>(),
            Err(CompileError::InvalidMethod(_))
        ));
    }

    #[test]
    fn test_independent_wires() {
        let mut circuit = Circuit::new("test");
        circuit.h(QubitId(0)).unwrap();
        circuit.h(QubitId(1)).unwrap();
        circuit.measure_all().unwrap();
        let ((b, c), _) = both_methods(&circuit);

        assert!(b.get(0, 0));
        assert!(b.get(1, 1));
        assert!(!b.get(0, 1));
        assert!(!b.get(1, 0));
        // Either wire may host the other after its measurement.
        assert!(c.get(0, 1));
        assert!(c.get(1, 0));
        assert!(!c.get(0, 0));
    }

    #[test]
    fn test_entangling_gate_widens_cone() {
        let mut circuit = Circuit::new("test");
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.measure_all().unwrap();
        let ((b, c), _) = both_methods(&circuit);

        // Both measurements depend on both initial wires.
        for i in 0..2 {
            for j in 0..2 {
                assert!(b.get(i, j), "B[{i}][{j}]");
            }
        }
        assert!(c.is_zero());
    }

    #[test]
    fn test_order_matters_for_reachability() {
        // cx(0,1) before cx(1,2): wire 0 reaches measurement 2, but wire 2
        // does not reach measurement 0.
        let mut circuit = Circuit::new("test");
        circuit.h(QubitId(0)).unwrap();
        circuit.h(QubitId(1)).unwrap();
        circuit.h(QubitId(2)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.cx(QubitId(1), QubitId(2)).unwrap();
        circuit.measure_all().unwrap();
        let ((b, c), _) = both_methods(&circuit);

        assert!(b.get(0, 2));
        assert!(!b.get(2, 0));
        // Edge terminals[2] → roots[0] would close a cycle through B[0][2].
        assert!(!c.get(2, 0));
        // Edge terminals[0] → roots[2] is fine even though B[0][2] = 1.
        assert!(c.get(0, 2));
    }

    #[test]
    fn test_methods_agree_on_bv() {
        let circuit = Circuit::bernstein_vazirani("10110").unwrap();
        let ((b1, c1), (b2, c2)) = both_methods(&circuit);
        assert_eq!(b1, b2);
        assert_eq!(c1, c2);
    }

    #[test]
    fn test_methods_agree_with_group_tags() {
        let mut circuit = Circuit::iqp(4, &[(0, 1), (1, 2), (2, 3), (0, 3)]).unwrap();
        circuit.tag_gates_named("cz", "z_group");
        let ((b1, _), (b2, _)) = both_methods(&circuit);
        assert_eq!(b1, b2);
    }

    #[test]
    fn test_diagonal_set_for_measured_wires() {
        let circuit = Circuit::ripple_carry_adder(2).unwrap();
        let ((b, c), _) = both_methods(&circuit);
        for q in 0..circuit.width() {
            assert!(b.get(q, q));
            assert!(!c.get(q, q));
        }
    }

    #[test]
    fn test_sibling_expansion_densifies_candidates() {
        let pairs = [(0, 1), (1, 2), (2, 3)];
        let plain = Circuit::iqp(4, &pairs).unwrap();
        let mut tagged = Circuit::iqp(4, &pairs).unwrap();
        tagged.tag_gates_named("cz", "z_group");

        let (_, c_plain) =
            biadjacency_and_candidate_matrices(&plain, MatrixMethod::BooleanMatrix).unwrap();
        let (_, c_tagged) =
            biadjacency_and_candidate_matrices(&tagged, MatrixMethod::BooleanMatrix).unwrap();

        let count = |m: &BitMatrix| {
            (0..4)
                .flat_map(|i| (0..4).map(move |j| (i, j)))
                .filter(|&(i, j)| m.get(i, j))
                .count()
        };
        assert!(count(&c_tagged) >= count(&c_plain));
        // The chain 0-1-2-3 entangles everything when the CZs are ordered;
        // commuting them frees at least one extra pair.
        assert!(count(&c_tagged) > count(&c_plain));
    }
}
