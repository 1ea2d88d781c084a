//! Ouro Qubit-Reuse Compilation
//!
//! This crate compiles a *static* quantum circuit (one wire per logical
//! qubit, measured at the end) into an equivalent *dynamic* circuit in
//! which wires are measured mid-computation, reset, and reused to host
//! later qubits. The only objective is **width**: the peak number of
//! concurrently live wires. Gate count, depth and fidelity are untouched.
//!
//! # Pipeline
//!
//! ```text
//! Circuit (ouro-ir)
//!       │  to_dag()
//!       ▼
//! ┌──────────────┐   biadjacency B, candidate C
//! │ CircuitDag   ├──────────────────────────────┐
//! └──────────────┘                              ▼
//!       │                              ┌────────────────┐
//!       │                              │ CausalCones    │
//!       │                              └────────────────┘
//!       │                                      │
//!       │         ReusePlan (measurement order │ + reuse edges)
//!       │  ◄───── DeterministicGreedy / RandomGreedy / DckfGreedy
//!       ▼
//! relinearize(): topological re-emission, measure/reset insertion
//!       │
//!       ▼
//! Dynamic circuit + Layout (logical → physical wires)
//! ```
//!
//! # Example
//!
//! ```rust
//! use ouro_compile::{ReduceOptions, reduce};
//! use ouro_ir::Circuit;
//!
//! let circuit = Circuit::bernstein_vazirani("10110").unwrap();
//! assert_eq!(circuit.width(), 6);
//!
//! let reduction = reduce(&circuit, &ReduceOptions::new()).unwrap();
//! assert_eq!(reduction.width(), 2);
//! ```
//!
//! # Determinism
//!
//! Compilation is single-threaded and synchronous. The random planner owns
//! a seeded generator, so identical inputs and seeds yield byte-identical
//! output circuits.

pub mod bitmatrix;
pub mod cone;
pub mod dependency;
pub mod error;
pub mod layout;
pub mod plan;
pub mod planner;
pub mod reduce;
pub mod relinearize;

pub use bitmatrix::BitMatrix;
pub use cone::{CausalCones, WireSet};
pub use dependency::{
    MatrixMethod, biadjacency_and_candidate, biadjacency_and_candidate_matrices,
    candidate_from_biadjacency,
};
pub use error::{CompileError, CompileResult};
pub use layout::Layout;
pub use plan::{ReuseEdge, ReusePlan};
pub use planner::{DckfGreedy, DeterministicGreedy, PlannerMethod, RandomGreedy, ReusePlanner};
pub use reduce::{ReduceOptions, Reduction, reduce, reduce_in_place};
pub use relinearize::relinearize;
