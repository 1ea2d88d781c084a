//! Error types for the compilation crate.

use thiserror::Error;

/// Errors that can occur during qubit-reuse compilation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// Error from the IR crate.
    #[error("IR error: {0}")]
    Ir(#[from] ouro_ir::IrError),

    /// A reuse plan introduced a directed cycle.
    ///
    /// Planners construct plans that are acyclic by design, so hitting this
    /// indicates a compiler bug; it is never caught internally.
    #[error("Reuse plan introduces a cycle in the circuit DAG")]
    PlanCyclic,

    /// Unknown method selector.
    #[error("Invalid method '{0}'")]
    InvalidMethod(String),
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
