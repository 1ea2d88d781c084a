//! Error types for the simulator interface.

use thiserror::Error;

/// Errors surfaced by simulation backends.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimulatorError {
    /// Failure reported by the backend, propagated unchanged.
    #[error("Backend error: {0}")]
    Backend(String),

    /// Circuit exceeds the backend's capacity.
    #[error("Circuit has {width} wires but backend '{backend}' supports {max_width}")]
    CircuitTooLarge {
        /// Name of the backend.
        backend: String,
        /// Wires in the circuit.
        width: usize,
        /// Wires the backend supports.
        max_width: usize,
    },
}

/// Result type for simulator operations.
pub type SimResult<T> = Result<T, SimulatorError>;
