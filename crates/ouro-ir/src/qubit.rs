//! Logical wire and measurement-label identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a logical wire within a circuit.
///
/// In a static circuit every logical qubit owns one wire end-to-end; after
/// compilation several logical wires may share a physical wire, separated by
/// mid-circuit measurement and reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// The wire index as a `usize`, for matrix and register addressing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

impl From<usize> for QubitId {
    fn from(id: usize) -> Self {
        QubitId(u32::try_from(id).expect("QubitId overflow: exceeds u32::MAX"))
    }
}

/// Label of a classical measurement outcome.
///
/// Each measurement may carry a `mid` identifying its output bit; the labels
/// survive compilation unchanged, so results of a dynamic circuit line up
/// with the static original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MidId(pub u32);

impl fmt::Display for MidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl From<u32> for MidId {
    fn from(id: u32) -> Self {
        MidId(id)
    }
}

impl From<usize> for MidId {
    fn from(id: usize) -> Self {
        MidId(u32::try_from(id).expect("MidId overflow: exceeds u32::MAX"))
    }
}
