//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur while building or lowering circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// The circuit violates a structural invariant.
    #[error("Malformed circuit: {0}")]
    MalformedCircuit(String),

    /// Gate name not in the catalog.
    #[error("Unknown gate '{0}'")]
    UnknownGate(String),

    /// Gate requires a different number of wires.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of wires.
        expected: u32,
        /// Actual number of wires provided.
        got: u32,
    },

    /// Noise probability outside `[0, 1]`.
    #[error("Invalid probability {0}: must lie in [0, 1]")]
    InvalidProbability(f64),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
