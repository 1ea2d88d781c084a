//! Ouro Circuit Intermediate Representation
//!
//! Core data structures for static and dynamic quantum circuits: the gate
//! catalog, the append-only circuit builder, and the per-wire DAG lowering
//! that the qubit-reuse compiler in `ouro-compile` consumes.
//!
//! # Overview
//!
//! A circuit is an ordered list of immutable gate records over logical
//! wires. Lowering the list produces a DAG with one node per record and one
//! chain per wire; the first and last record on each wire (`roots` and
//! `terminals`) are the attachment points for wire reuse. Records tagged
//! with a shared commuting-group label relax the per-wire chain: members of
//! a group may be scheduled in any mutual order.
//!
//! # Example: Building and lowering a circuit
//!
//! ```rust
//! use ouro_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::new("bell");
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! let dag = circuit.to_dag(true).unwrap();
//! assert_eq!(dag.node_count(), 4);
//! assert!(dag.is_measured(QubitId(1)));
//! ```
//!
//! # Supported records
//!
//! | Name | Wires | Description |
//! |------|-------|-------------|
//! | `h`, `x`, `y`, `z`, `s`, `t` | 1 | Fixed single-qubit gates |
//! | `rx`, `ry`, `rz` | 1 | Rotation gates |
//! | `u`, `u3` | 1 | General single-qubit gates |
//! | `cx`, `cz`, `swap` | 2 | Two-qubit gates |
//! | `ccx` | 3 | Toffoli gate |
//! | `m` | 1 | Measurement (carries a `mid` label) |
//! | `r` | 1 | Reset to \|0⟩ |
//! | `depolarizing` | 1 | Noise channel (carries `prob`) |

pub mod catalog;
pub mod circuit;
pub mod dag;
pub mod error;
pub mod instruction;
pub mod qubit;

pub use catalog::StandardGate;
pub use circuit::Circuit;
pub use dag::{CircuitDag, DagEdge, NodeIndex};
pub use error::{IrError, IrResult};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{MidId, QubitId};
