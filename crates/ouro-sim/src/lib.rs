//! Ouro Simulator Interface
//!
//! The narrow seam between the qubit-reuse compiler and external execution
//! engines: a synchronous [`Backend`] trait with a single
//! `run(circuit, shots) → counts` obligation, the backend family
//! enumeration, and a deterministic [`MockBackend`] for tests.
//!
//! Real numerical engines (state-vector, density-matrix, MBQC) live
//! outside this workspace and plug in by implementing [`Backend`]. A
//! backend used on compiled circuits must support mid-circuit measurement
//! and reset; the width saved by the compiler is only real on hardware and
//! simulators that reuse the freed wire.
//!
//! # Example
//!
//! ```rust
//! use ouro_ir::{Circuit, QubitId};
//! use ouro_sim::{MockBackend, run};
//!
//! let mut circuit = Circuit::new("demo");
//! circuit.h(QubitId(0)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! let result = run(&circuit, 10, &MockBackend::default()).unwrap();
//! assert_eq!(result.shots, 10);
//! ```

pub mod backend;
pub mod error;
pub mod mock;
pub mod result;

pub use backend::{Backend, BackendKind, run};
pub use error::{SimResult, SimulatorError};
pub use mock::MockBackend;
pub use result::{Counts, ExecutionResult};
