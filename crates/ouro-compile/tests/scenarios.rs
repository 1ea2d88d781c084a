//! End-to-end scenarios for the qubit-reuse compiler.
//!
//! Each test mirrors one of the analytic or numerical experiments shipped
//! with the original toolkit: Bernstein-Vazirani, the fully entangled
//! circuit, ripple-carry adders against DCKF, tagged IQP circuits, and
//! Max-Cut QAOA under the random planner.

use ouro_compile::{
    BitMatrix, MatrixMethod, PlannerMethod, ReduceOptions, biadjacency_and_candidate_matrices,
    reduce,
};
use ouro_ir::Circuit;

fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn options(method: PlannerMethod) -> ReduceOptions {
    ReduceOptions::new().with_method(method)
}

// ============================================================================
// S1: Bernstein-Vazirani compiles to two wires
// ============================================================================

#[test]
fn bernstein_vazirani_reduces_to_two_wires() {
    init_logging();
    let circuit = Circuit::bernstein_vazirani("10110").unwrap();
    assert_eq!(circuit.width(), 6);

    let reduction = reduce(&circuit, &options(PlannerMethod::DeterministicGreedy)).unwrap();
    assert_eq!(reduction.width(), 2);
    assert_eq!(reduction.plan.reuse_count(), 4);

    // The dynamic history interleaves measurement and reset mid-circuit.
    let names: Vec<_> = reduction
        .circuit
        .gate_history()
        .iter()
        .map(|inst| inst.name().to_string())
        .collect();
    let first_measure = names.iter().position(|n| n == "m").unwrap();
    let last_gate = names.iter().rposition(|n| n == "h").unwrap();
    assert!(first_measure < last_gate);
    assert_eq!(names.iter().filter(|n| *n == "r").count(), 4);
}

#[test]
fn bernstein_vazirani_optimal_scheme_is_nilpotent() {
    // The adjacency matrix [[0, B], [Op, 0]] of the chain reuse scheme
    // (i, i+1) must be nilpotent with index at most 2w.
    let circuit = Circuit::bernstein_vazirani("10110").unwrap();
    let w = circuit.width();
    let (b, _) =
        biadjacency_and_candidate_matrices(&circuit, MatrixMethod::BooleanMatrix).unwrap();

    let mut adjacency = BitMatrix::new(2 * w, 2 * w);
    for i in 0..w {
        for j in 0..w {
            if b.get(i, j) {
                adjacency.set(i, w + j);
            }
        }
    }
    for i in 0..w - 2 {
        adjacency.set(w + i, i + 1);
    }

    let mut power = adjacency.clone();
    for _ in 1..2 * w {
        power = power.multiply(&adjacency);
    }
    assert!(power.is_zero());
}

// ============================================================================
// S2: Fully entangled circuit admits no reuse
// ============================================================================

#[test]
fn fully_entangled_circuit_is_irreducible() {
    init_logging();
    let circuit = Circuit::fully_entangled(6, 1).unwrap();
    let (b, c) =
        biadjacency_and_candidate_matrices(&circuit, MatrixMethod::BooleanMatrix).unwrap();

    assert!(b.is_all_ones());
    assert!(c.is_zero());

    let reduction = reduce(&circuit, &options(PlannerMethod::DeterministicGreedy)).unwrap();
    assert_eq!(reduction.width(), 6);
    assert_eq!(reduction.reducibility_factor(), 0.0);
}

// ============================================================================
// S3: Ripple-carry adders, deterministic greedy vs DCKF
// ============================================================================

#[test]
fn adder_deterministic_greedy_never_loses_to_dckf() {
    init_logging();
    for bits in 2..=19 {
        let circuit = Circuit::ripple_carry_adder(bits).unwrap();
        let det = reduce(&circuit, &options(PlannerMethod::DeterministicGreedy)).unwrap();
        let dckf = reduce(&circuit, &options(PlannerMethod::Dckf)).unwrap();
        assert!(
            det.width() <= dckf.width(),
            "{} bits: deterministic {} > dckf {}",
            bits,
            det.width(),
            dckf.width()
        );
    }
}

#[test]
fn adder_first_qubit_search_never_loses_to_plain_dckf() {
    for bits in [2, 5, 9] {
        let circuit = Circuit::ripple_carry_adder(bits).unwrap();
        let plain = reduce(&circuit, &options(PlannerMethod::Dckf)).unwrap();
        let searched = reduce(&circuit, &options(PlannerMethod::DckfFirstQubitSearch)).unwrap();
        assert!(searched.width() <= plain.width());
    }
}

// ============================================================================
// S4: Commuting-group tags strictly improve a 12-wire IQP circuit
// ============================================================================

/// 24 CZ pairs over 12 wires: an ascending chain, a descending chain, and
/// two chords. Ordered this way the untagged biadjacency is all-ones.
fn iqp_pairs() -> Vec<(u32, u32)> {
    let mut pairs: Vec<(u32, u32)> = (0..11).map(|i| (i, i + 1)).collect();
    pairs.extend((0..11).rev().map(|i| (i, i + 1)));
    pairs.push((0, 2));
    pairs.push((9, 11));
    pairs
}

#[test]
fn iqp_group_tags_strictly_reduce_width() {
    init_logging();
    let pairs = iqp_pairs();
    assert_eq!(pairs.len(), 24);

    let plain = Circuit::iqp(12, &pairs).unwrap();
    let mut tagged = Circuit::iqp(12, &pairs).unwrap();
    assert_eq!(tagged.tag_gates_named("cz", "z_group"), 24);

    // The interleaved chains entangle everything when the CZ order is kept.
    let (b, _) = biadjacency_and_candidate_matrices(&plain, MatrixMethod::BooleanMatrix).unwrap();
    assert!(b.is_all_ones());

    let plain_width = reduce(&plain, &options(PlannerMethod::DeterministicGreedy))
        .unwrap()
        .width();
    let tagged_width = reduce(&tagged, &options(PlannerMethod::DeterministicGreedy))
        .unwrap()
        .width();

    assert_eq!(plain_width, 12);
    assert!(
        tagged_width < plain_width,
        "tags did not help: {tagged_width} vs {plain_width}"
    );
}

// ============================================================================
// S5/S6: Max-Cut QAOA under the random planner
// ============================================================================

/// A fixed unweighted 3-regular graph on 20 vertices: a ring plus a
/// perfect matching of chords.
fn u3r_edges() -> Vec<(u32, u32)> {
    let mut edges: Vec<(u32, u32)> = (0..20).map(|i| (i, (i + 1) % 20)).collect();
    edges.extend([
        (0, 7),
        (1, 12),
        (2, 15),
        (3, 9),
        (4, 17),
        (5, 11),
        (6, 14),
        (8, 18),
        (10, 16),
        (13, 19),
    ]);
    edges
}

/// The QAOA problem unitary commutes gate-by-gate, so the driver tags it,
/// exactly as the original Max-Cut experiments do.
fn qaoa_circuit() -> Circuit {
    let mut circuit = Circuit::maxcut_qaoa(20, &u3r_edges(), 1).unwrap();
    circuit.tag_gates_named("cz", "z_group");
    circuit
}

#[test]
fn qaoa_random_greedy_matches_deterministic_within_ten_trials() {
    init_logging();
    let circuit = qaoa_circuit();
    let det_width = reduce(&circuit, &options(PlannerMethod::DeterministicGreedy))
        .unwrap()
        .width();

    let best_random = (0..10)
        .map(|seed| {
            reduce(
                &circuit,
                &options(PlannerMethod::RandomGreedy)
                    .with_shots(5)
                    .with_seed(seed),
            )
            .unwrap()
            .width()
        })
        .min()
        .unwrap();

    assert!(
        best_random <= det_width,
        "no random trial reached the deterministic width {det_width}"
    );
}

#[test]
fn random_greedy_is_deterministic_under_a_seed() {
    init_logging();
    let circuit = qaoa_circuit();
    let opts = options(PlannerMethod::RandomGreedy)
        .with_shots(10)
        .with_seed(42);

    let first = reduce(&circuit, &opts).unwrap();
    let second = reduce(&circuit, &opts).unwrap();

    let serialize =
        |c: &Circuit| serde_json::to_string(c.gate_history()).expect("history serializes");
    assert_eq!(serialize(&first.circuit), serialize(&second.circuit));
    assert_eq!(first.plan, second.plan);
}

// ============================================================================
// Idempotence: compiling a compiled circuit changes nothing
// ============================================================================

#[test]
fn recompiling_a_dynamic_circuit_keeps_its_width() {
    init_logging();
    let circuit = Circuit::bernstein_vazirani("10110").unwrap();
    let opts = options(PlannerMethod::DeterministicGreedy);

    let once = reduce(&circuit, &opts).unwrap();
    assert_eq!(once.width(), 2);

    let twice = reduce(&once.circuit, &opts).unwrap();
    assert_eq!(twice.width(), 2);
    assert_eq!(twice.plan.reuse_count(), 0);
}

// ============================================================================
// Width monotonicity across planners
// ============================================================================

#[test]
fn compiled_width_is_bounded_by_original() {
    for method in [
        PlannerMethod::DeterministicGreedy,
        PlannerMethod::RandomGreedy,
        PlannerMethod::Dckf,
        PlannerMethod::DckfFirstQubitSearch,
    ] {
        let circuit = Circuit::ripple_carry_adder(4).unwrap();
        let reduction = reduce(&circuit, &options(method).with_seed(1)).unwrap();
        assert!(reduction.width() >= 1);
        assert!(reduction.width() <= circuit.width());
    }
}
