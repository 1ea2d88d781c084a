//! Deterministic mock backend.

use crate::backend::{Backend, BackendKind};
use crate::error::{SimResult, SimulatorError};
use crate::result::{Counts, ExecutionResult};

use ouro_ir::Circuit;

/// A stand-in backend for tests and dry runs.
///
/// Every shot reports the all-zeros bitstring over the circuit's output
/// labels, which is the exact result of any circuit whose measured wires
/// carry only diagonal gates from |0⟩. No numerics are involved.
pub struct MockBackend {
    name: String,
    max_width: usize,
}

impl MockBackend {
    /// Create a mock backend with the given wire capacity.
    pub fn new(max_width: usize) -> Self {
        Self {
            name: format!("mock_{max_width}q"),
            max_width,
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new(64)
    }
}

impl Backend for MockBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> BackendKind {
        BackendKind::StateVector
    }

    fn run(&self, circuit: &Circuit, shots: u32) -> SimResult<ExecutionResult> {
        if circuit.width() > self.max_width {
            return Err(SimulatorError::CircuitTooLarge {
                backend: self.name.clone(),
                width: circuit.width(),
                max_width: self.max_width,
            });
        }
        let bitstring = "0".repeat(circuit.output_ids().len());
        let mut counts = Counts::default();
        counts.insert(bitstring, u64::from(shots));
        Ok(ExecutionResult::new(counts, shots))
    }
}
