//! Backend trait and enumeration.

use serde::{Deserialize, Serialize};

use ouro_ir::Circuit;

use crate::error::SimResult;
use crate::result::ExecutionResult;

/// The family of simulation a backend implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackendKind {
    /// Pure-state simulation.
    StateVector,
    /// Mixed-state simulation.
    DensityMatrix,
    /// Measurement-based quantum computation.
    Mbqc,
}

/// A circuit execution engine.
///
/// Backends are external numerical collaborators consumed through this one
/// synchronous seam; the compiler never depends on them. Dynamic circuits
/// are expected to work unmodified: a backend must honour mid-circuit
/// measurement and reset.
pub trait Backend {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Which simulation family this backend implements.
    fn kind(&self) -> BackendKind;

    /// Execute a circuit for the given number of shots.
    fn run(&self, circuit: &Circuit, shots: u32) -> SimResult<ExecutionResult>;
}

/// Run a circuit on a backend.
///
/// Thin delegation kept for call-site symmetry with the circuit-building
/// API.
pub fn run(circuit: &Circuit, shots: u32, backend: &dyn Backend) -> SimResult<ExecutionResult> {
    backend.run(circuit, shots)
}
