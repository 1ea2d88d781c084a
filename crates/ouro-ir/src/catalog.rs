//! The closed gate catalog.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};

/// Standard gates with known semantics.
///
/// The catalog is closed: every gate the compiler can see is listed here.
/// Rotation angles are concrete `f64` radians; the compiler never inspects
/// them, it only schedules the records that carry them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// S gate (sqrt(Z)).
    S,
    /// T gate (fourth root of Z).
    T,
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),
    /// General single-qubit gate U(θ, φ, γ) = Rz(φ)·Rx(θ)·Rz(γ).
    U(f64, f64, f64),
    /// General single-qubit gate U3(θ, φ, γ) = Rz(φ)·Ry(θ)·Rz(γ).
    U3(f64, f64, f64),
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,
    /// Toffoli gate (CCX).
    CCX,
}

impl StandardGate {
    /// Get the wire-format name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::H => "h",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::S => "s",
            StandardGate::T => "t",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::U(_, _, _) => "u",
            StandardGate::U3(_, _, _) => "u3",
            StandardGate::CX => "cx",
            StandardGate::CZ => "cz",
            StandardGate::Swap => "swap",
            StandardGate::CCX => "ccx",
        }
    }

    /// Get the number of wires this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::H
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::S
            | StandardGate::T
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_)
            | StandardGate::U(_, _, _)
            | StandardGate::U3(_, _, _) => 1,

            StandardGate::CX | StandardGate::CZ | StandardGate::Swap => 2,

            StandardGate::CCX => 3,
        }
    }

    /// Whether the gate acts identically under any permutation of its wires.
    ///
    /// Directed gates (controlled-NOT, Toffoli) distinguish control from
    /// target; CZ and SWAP do not.
    #[inline]
    pub fn is_symmetric(&self) -> bool {
        matches!(self, StandardGate::CZ | StandardGate::Swap)
    }

    /// Get the rotation parameters of this gate, if any.
    pub fn params(&self) -> Vec<f64> {
        match self {
            StandardGate::Rx(t) | StandardGate::Ry(t) | StandardGate::Rz(t) => vec![*t],
            StandardGate::U(a, b, c) | StandardGate::U3(a, b, c) => vec![*a, *b, *c],
            _ => vec![],
        }
    }

    /// Reconstruct a gate from its wire-format name and parameters.
    pub fn from_name(name: &str, params: &[f64]) -> IrResult<Self> {
        let gate = match (name, params) {
            ("h", []) => StandardGate::H,
            ("x", []) => StandardGate::X,
            ("y", []) => StandardGate::Y,
            ("z", []) => StandardGate::Z,
            ("s", []) => StandardGate::S,
            ("t", []) => StandardGate::T,
            ("rx", [t]) => StandardGate::Rx(*t),
            ("ry", [t]) => StandardGate::Ry(*t),
            ("rz", [t]) => StandardGate::Rz(*t),
            ("u", [a, b, c]) => StandardGate::U(*a, *b, *c),
            ("u3", [a, b, c]) => StandardGate::U3(*a, *b, *c),
            ("cx", []) => StandardGate::CX,
            ("cz", []) => StandardGate::CZ,
            ("swap", []) => StandardGate::Swap,
            ("ccx", []) => StandardGate::CCX,
            ("h" | "x" | "y" | "z" | "s" | "t" | "rx" | "ry" | "rz" | "u" | "u3" | "cx" | "cz"
            | "swap" | "ccx", _) => {
                return Err(IrError::MalformedCircuit(format!(
                    "gate '{name}' does not take {} parameter(s)",
                    params.len()
                )));
            }
            _ => return Err(IrError::UnknownGate(name.to_string())),
        };
        Ok(gate)
    }
}

/// Get the arity of a record by its wire-format name.
///
/// Covers the whole catalog, including the non-unitary records `m`
/// (measurement), `r` (reset) and `depolarizing` (noise channel).
pub fn arity(name: &str) -> IrResult<u32> {
    match name {
        "h" | "x" | "y" | "z" | "s" | "t" | "rx" | "ry" | "rz" | "u" | "u3" | "m" | "r"
        | "depolarizing" => Ok(1),
        "cx" | "cz" | "swap" => Ok(2),
        "ccx" => Ok(3),
        _ => Err(IrError::UnknownGate(name.to_string())),
    }
}

/// Whether a record is wire-symmetric, by its wire-format name.
pub fn is_symmetric(name: &str) -> IrResult<bool> {
    arity(name)?;
    Ok(matches!(name, "cz" | "swap"))
}
